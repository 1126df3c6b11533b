use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, error, info};

use crate::models::{LocusError, LocusResult};

/// Holds user-defined parameters for one PLINK r2 run against a 1000G
/// genotype panel.
#[derive(Debug)]
pub struct PlinkLdOptions {
    /// Path to the `plink` binary, resolved once by the caller (see
    /// `helper_functions::resolve_plink`).
    pub plink_path: PathBuf,

    /// Genotype panel prefix (a PLINK .bed/.bim/.fam set without the
    /// extension).
    pub bfile_prefix: String,

    /// Variant every r2 value is computed against.
    pub target_variant: String,

    /// Half-window in kilobases around the target variant.
    pub window_kb: u32,

    /// Final location of the LD report.
    pub output_file: PathBuf,
}

/// Run `plink --r2` for the target variant and leave the report at
/// `output_file`. PLINK writes `<out>.ld` plus bookkeeping files; the
/// bookkeeping is discarded and the report renamed into place.
pub fn generate_plink_ld_file(opts: &PlinkLdOptions) -> LocusResult<()> {
    info!(
        "Running PLINK r2 for {} against panel {}",
        opts.target_variant, opts.bfile_prefix
    );
    debug!("PLINK options: {:?}", opts);

    let output = Command::new(&opts.plink_path)
        .arg("--bfile")
        .arg(&opts.bfile_prefix)
        .arg("--r2")
        .arg("--ld-snp")
        .arg(&opts.target_variant)
        .arg("--ld-window-kb")
        .arg(opts.window_kb.to_string())
        .arg("--ld-window")
        .arg("99999")
        .arg("--ld-window-r2")
        .arg("0")
        .arg("--out")
        .arg(&opts.output_file)
        .output()
        .map_err(|e| {
            LocusError::DataUnavailable(format!(
                "failed to launch {}: {e}",
                opts.plink_path.display()
            ))
        })?;

    if !output.status.success() {
        error!(
            "PLINK exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr)
        );
        return Err(LocusError::DataUnavailable(format!(
            "PLINK failed with status {}",
            output.status
        )));
    }

    let ld_path = append_extension(&opts.output_file, "ld");
    // .nosex only appears for some panels
    let _ = fs::remove_file(append_extension(&opts.output_file, "log"));
    let _ = fs::remove_file(append_extension(&opts.output_file, "nosex"));
    fs::rename(&ld_path, &opts.output_file).map_err(|e| {
        LocusError::DataUnavailable(format!(
            "PLINK did not produce {}: {e}",
            ld_path.display()
        ))
    })?;
    Ok(())
}

fn append_extension(path: &Path, ext: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}
