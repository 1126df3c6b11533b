use tracing::debug;

use crate::models::{
    GeneFeature, GeneRow, LocusError, LocusResult, ScaledGeneFeature, ScaledGeneRow, Window,
    MEGABASE,
};

/// Width constant for the label collision estimate, in window-fraction
/// units per label character. A pure guesstimate; real glyph widths
/// depend on the renderer's font, so callers can pass their own.
pub const DEFAULT_LABEL_SCALE: f64 = 0.015;

fn overlap_interval<T: PartialOrd>(a_min: T, a_max: T, b_min: T, b_max: T) -> bool {
    if a_max < b_min {
        false
    } else if b_max < a_min {
        false
    } else {
        true
    }
}

fn overlap_region(a: &GeneFeature, b: &GeneFeature) -> bool {
    overlap_interval(a.tx_start, a.tx_end, b.tx_start, b.tx_end)
}

/// Estimated label footprints: centered on the transcript midpoint,
/// half-width proportional to 1 + name length, in window fractions.
fn overlap_text(a: &GeneFeature, b: &GeneFeature, window: &Window, label_scale: f64) -> bool {
    let span = window.span() as f64;

    let center_a_x = (a.center() - window.position_min as f64) / span;
    let a_width = label_scale * (1 + a.gene_name.len()) as f64;

    let center_b_x = (b.center() - window.position_min as f64) / span;
    let b_width = label_scale * (1 + b.gene_name.len()) as f64;

    overlap_interval(
        center_a_x - a_width / 2.0,
        center_a_x + a_width / 2.0,
        center_b_x - b_width / 2.0,
        center_b_x + b_width / 2.0,
    )
}

/// Pack features into display rows so that no two features in a row
/// overlap on [txStart, txEnd] or by label footprint.
///
/// Greedy first-fit in scan order: each pass walks the remaining
/// features, placing every one that clears the last placed feature and
/// deferring the rest to the next pass. Each pass places at least one
/// feature, so this terminates after at most one row per feature. Not
/// globally row-minimal.
///
/// Input must already be sorted ascending by txStart (the gene store
/// returns it that way).
pub fn pack_gene_rows(
    features: &[GeneFeature],
    window: &Window,
    label_scale: f64,
) -> LocusResult<Vec<GeneRow>> {
    if window.span() <= 0 {
        return Err(LocusError::Precondition(format!(
            "window [{}, {}] has no extent",
            window.position_min, window.position_max
        )));
    }
    if features.windows(2).any(|pair| pair[0].tx_start > pair[1].tx_start) {
        return Err(LocusError::Precondition(
            "gene features must be sorted ascending by txStart".to_string(),
        ));
    }

    let mut records: Vec<&GeneFeature> = features.iter().collect();
    let mut rows: Vec<GeneRow> = Vec::new();
    while !records.is_empty() {
        let mut current_row: Vec<&GeneFeature> = Vec::new();
        let mut remainder: Vec<&GeneFeature> = Vec::new();
        let mut last_item: Option<&GeneFeature> = None;

        for feature in records {
            match last_item {
                None => {
                    current_row.push(feature);
                    last_item = Some(feature);
                }
                Some(last) if overlap_region(last, feature) => remainder.push(feature),
                Some(last) if overlap_text(last, feature, window, label_scale) => {
                    remainder.push(feature)
                }
                Some(_) => {
                    current_row.push(feature);
                    last_item = Some(feature);
                }
            }
        }

        rows.push(current_row.into_iter().cloned().collect());
        records = remainder;
    }

    debug!("packed {} features into {} rows", features.len(), rows.len());
    Ok(rows)
}

/// Rescale packed rows to megabases for display. Returns a new view;
/// the nucleotide-coordinate input stays untouched so it can be reused
/// across render calls.
pub fn scale_gene_rows(rows: &[GeneRow]) -> Vec<ScaledGeneRow> {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|gene| ScaledGeneFeature {
                    chrom: gene.chrom.clone(),
                    tx_start: gene.tx_start as f64 / MEGABASE,
                    tx_end: gene.tx_end as f64 / MEGABASE,
                    strand: gene.strand,
                    gene_name: gene.gene_name.clone(),
                    exon_starts: gene.exon_starts.iter().map(|&s| s as f64 / MEGABASE).collect(),
                    exon_ends: gene.exon_ends.iter().map(|&e| e as f64 / MEGABASE).collect(),
                })
                .collect()
        })
        .collect()
}
