use std::collections::HashSet;
use std::path::PathBuf;

use rusqlite::Connection;
use tracing::{debug, info};

use crate::models::{GeneFeature, LocusError, LocusResult, Strand, Window};

/// Adapter over the refFlat gene annotation database (SQLite, as shipped
/// with LocusZoom 1.4).
pub struct GeneStore {
    pub db_path: PathBuf,
}

impl GeneStore {
    /// Transcripts whose [txStart, txEnd] intersects the window, one per
    /// gene name (the store holds several isoforms per gene; the first
    /// returned wins), sorted ascending by txStart as the row packer
    /// requires.
    pub fn query_region(&self, chromosome: &str, window: &Window) -> LocusResult<Vec<GeneFeature>> {
        info!(
            "Querying gene annotations for {} in [{}, {}]",
            chromosome, window.position_min, window.position_max
        );

        let conn = Connection::open(&self.db_path).map_err(|e| {
            LocusError::DataUnavailable(format!(
                "cannot open gene database {}: {e}",
                self.db_path.display()
            ))
        })?;

        let mut stmt = conn
            .prepare(
                "SELECT chrom, txStart, txEnd, strand, geneName, exonStarts, exonEnds \
                 FROM refFlat WHERE chrom = ?1",
            )
            .map_err(|e| LocusError::DataUnavailable(format!("gene query failed: {e}")))?;

        let rows = stmt
            .query_map([chromosome], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, String>(5)?,
                    row.get::<_, String>(6)?,
                ))
            })
            .map_err(|e| LocusError::DataUnavailable(format!("gene query failed: {e}")))?;

        let mut features: Vec<GeneFeature> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        for row in rows {
            let (chrom, tx_start, tx_end, strand, gene_name, exon_starts, exon_ends) =
                row.map_err(|e| LocusError::DataUnavailable(format!("gene query failed: {e}")))?;

            if tx_end < window.position_min || window.position_max < tx_start {
                continue;
            }
            if !seen.insert(gene_name.clone()) {
                continue;
            }

            let exon_starts = parse_exon_list(&exon_starts)?;
            let exon_ends = parse_exon_list(&exon_ends)?;
            if exon_starts.len() != exon_ends.len() {
                return Err(LocusError::Precondition(format!(
                    "gene {gene_name}: {} exon starts but {} exon ends",
                    exon_starts.len(),
                    exon_ends.len()
                )));
            }

            features.push(GeneFeature {
                chrom,
                tx_start,
                tx_end,
                strand: Strand::from_symbol(&strand)?,
                gene_name,
                exon_starts,
                exon_ends,
            });
        }

        features.sort_by_key(|f| f.tx_start);
        debug!("{} gene features intersect the window", features.len());
        Ok(features)
    }
}

/// refFlat stores exon coordinates as comma-separated text with a
/// trailing comma.
fn parse_exon_list(text: &str) -> LocusResult<Vec<i64>> {
    text.split(',')
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<i64>()
                .map_err(|_| LocusError::Parse(format!("bad exon coordinate '{token}'")))
        })
        .collect()
}
