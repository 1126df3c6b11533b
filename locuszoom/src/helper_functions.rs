use std::env;
use std::path::{Path, PathBuf};

use polars::prelude::*;

use crate::models::{LocusError, LocusResult};

/// Root of the LocusZoom 1.4 data tree. Falls back to the current
/// directory if LOCUSZOOM_DIR is not set.
pub fn locuszoom_dir() -> PathBuf {
    match env::var_os("LOCUSZOOM_DIR") {
        Some(val) => PathBuf::from(val),
        None => env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Gene annotation database shipped with LocusZoom 1.4.
pub fn gene_db_path(locuszoom_dir: &Path) -> PathBuf {
    locuszoom_dir.join("locuszoom/data/database/locuszoom_hg19.db")
}

/// 1000G genotype panel prefix template shipped with LocusZoom 1.4.
/// `{ancestry}` and `{chrom}` are substituted per run.
pub fn default_genotype_template(locuszoom_dir: &Path) -> String {
    locuszoom_dir
        .join("locuszoom/data/1000G/genotypes/2014-10-14/{ancestry}/{chrom}")
        .to_string_lossy()
        .into_owned()
}

pub fn genotype_panel_prefix(template: &str, ancestry: &str, chrom: &str) -> String {
    template
        .replace("{ancestry}", ancestry)
        .replace("{chrom}", chrom)
}

/// Locate the PLINK executable once, up front. The resolved path is then
/// injected into `PlinkLdOptions` rather than looked up at call sites.
pub fn resolve_plink() -> LocusResult<PathBuf> {
    which::which("plink")
        .map_err(|e| LocusError::DataUnavailable(format!("plink executable not found: {e}")))
}

pub fn read_csv(file_path: &Path) -> PolarsResult<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(file_path.to_path_buf()))?
        .finish()
}
