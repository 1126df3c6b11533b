use std::path::PathBuf;

use polars::prelude::*;
use tracing::{debug, info};

use crate::helper_functions::read_csv;
use crate::models::{LocusError, LocusResult, Window};

/// Association results CSV with columns {chromo, position, simple_pvalue}.
/// Rows at or above the significance threshold are discarded on load.
pub struct PvalueFile {
    pub path: PathBuf,
    pub threshold: f64,
}

impl PvalueFile {
    pub fn new(path: impl Into<PathBuf>) -> PvalueFile {
        PvalueFile { path: path.into(), threshold: 1.0 }
    }

    /// Canonical p-value frame: columns {chrom, position, pvalue, variant}
    /// with variant ids in the form `chr{chrom}:{position}`.
    pub fn load(&self) -> LocusResult<DataFrame> {
        info!("Reading p-values from: {}", self.path.display());
        let frame = read_csv(&self.path).map_err(|e| match e {
            PolarsError::IO { .. } => LocusError::DataUnavailable(format!(
                "cannot read p-value file {}: {e}",
                self.path.display()
            )),
            other => LocusError::Parse(format!(
                "p-value file {}: {other}",
                self.path.display()
            )),
        })?;

        for required in ["chromo", "position", "simple_pvalue"] {
            if frame.column(required).is_err() {
                return Err(LocusError::Parse(format!(
                    "p-value file {} lacks column '{required}'",
                    self.path.display()
                )));
            }
        }

        let reduced = frame
            .lazy()
            .filter(col("simple_pvalue").lt(lit(self.threshold)))
            .select([
                col("chromo").alias("chrom"),
                col("position"),
                col("simple_pvalue").alias("pvalue"),
            ])
            .collect()?;

        let reduced = with_variant_ids(reduced)?;
        debug!("{} p-value rows pass the threshold", reduced.height());
        Ok(reduced)
    }

    /// Load already restricted to the region of interest.
    pub fn load_windowed(&self, window: &Window) -> LocusResult<DataFrame> {
        window_positions(self.load()?, window)
    }
}

/// Synthesize the canonical variant id column from chrom and position.
fn with_variant_ids(mut frame: DataFrame) -> LocusResult<DataFrame> {
    let chrom_col = frame.column("chrom")?.cast(&DataType::String)?;
    let chroms = chrom_col.str()?;
    let position_col = frame.column("position")?.cast(&DataType::Int64)?;
    let positions = position_col.i64()?;

    let mut ids = Vec::with_capacity(frame.height());
    for (chrom, position) in chroms.iter().zip(positions.iter()) {
        match (chrom, position) {
            (Some(chrom), Some(position)) => ids.push(format!("chr{chrom}:{position}")),
            _ => {
                return Err(LocusError::Parse(
                    "null chromosome or position in p-value input".to_string(),
                ))
            }
        }
    }
    frame.with_column(Column::new("variant".into(), ids))?;
    Ok(frame)
}

/// Keep records with position inside the window, inclusive on both ends.
/// Applied to the bare p-value series or to merged series alike.
pub fn window_positions(frame: DataFrame, window: &Window) -> LocusResult<DataFrame> {
    let filtered = frame
        .lazy()
        .filter(
            col("position")
                .gt_eq(lit(window.position_min))
                .and(col("position").lt_eq(lit(window.position_max))),
        )
        .collect()?;
    Ok(filtered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_pvalue_csv(dir: &std::path::Path, body: &str) -> PathBuf {
        let path = dir.join("pvalues.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{body}").unwrap();
        path
    }

    #[test]
    fn load_synthesizes_variant_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_pvalue_csv(
            dir.path(),
            "chromo,position,simple_pvalue\n3,49721532,1e-8\n3,49721600,0.0002\n",
        );
        let frame = PvalueFile::new(&path).load().unwrap();
        assert_eq!(frame.height(), 2);
        let ids = frame.column("variant").unwrap();
        let ids = ids.str().unwrap();
        assert_eq!(ids.get(0).unwrap(), "chr3:49721532");
        assert_eq!(ids.get(1).unwrap(), "chr3:49721600");
    }

    #[test]
    fn threshold_discards_weak_associations() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_pvalue_csv(
            dir.path(),
            "chromo,position,simple_pvalue\n3,100,1e-8\n3,200,0.05\n3,300,0.9\n",
        );
        let mut source = PvalueFile::new(&path);
        source.threshold = 0.05;
        let frame = source.load().unwrap();
        assert_eq!(frame.height(), 1);
    }

    #[test]
    fn missing_column_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_pvalue_csv(dir.path(), "chromo,position\n3,100\n");
        let err = PvalueFile::new(&path).load().unwrap_err();
        assert!(matches!(err, LocusError::Parse(_)));
    }

    #[test]
    fn windowing_is_inclusive_and_idempotent() {
        let frame = df![
            "chrom" => &["3", "3", "3"],
            "position" => &[100i64, 200, 300],
            "pvalue" => &[0.1, 0.2, 0.3],
        ]
        .unwrap();
        let window = Window { position_min: 100, position_max: 200 };

        let once = window_positions(frame, &window).unwrap();
        assert_eq!(once.height(), 2);

        let twice = window_positions(once.clone(), &window).unwrap();
        assert!(once.equals(&twice));
    }
}
