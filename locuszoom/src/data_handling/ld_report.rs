use std::fs;
use std::path::Path;

use polars::prelude::*;
use regex::Regex;
use tracing::{debug, info};

use crate::models::{LocusError, LocusResult};

/// PLINK column names mapped to what the rest of the pipeline expects.
const HEADER_MAP: [(&str, &str); 5] = [
    ("SNP_A", "target_variant"),
    ("CHR_B", "chrom"),
    ("BP_B", "position"),
    ("SNP_B", "variant"),
    ("R2", "ld_r2"),
];

/// Parse a PLINK `--r2` report into a frame with columns
/// {target_variant, chrom, position, variant, ld_r2}. PLINK pads its
/// columns with a variable amount of whitespace, so rows are split on
/// runs of spaces/tabs. A malformed row is an error, never skipped.
pub fn load_plink_ld(path: &Path) -> LocusResult<DataFrame> {
    info!("Reading PLINK LD report from: {}", path.display());
    let text = fs::read_to_string(path).map_err(|e| {
        LocusError::DataUnavailable(format!("cannot read LD report {}: {e}", path.display()))
    })?;

    let splitter = Regex::new(r"[ \t]+").expect("static regex is valid");
    let mut lines = text
        .lines()
        .map(|line| line.trim_matches(|c| c == ' ' || c == '\t'))
        .filter(|line| !line.is_empty());

    let header_line = lines
        .next()
        .ok_or_else(|| LocusError::Parse(format!("LD report {} is empty", path.display())))?;
    let header: Vec<&str> = splitter.split(header_line).collect();

    let mut indices = Vec::with_capacity(HEADER_MAP.len());
    for (plink_name, _) in HEADER_MAP {
        let idx = header
            .iter()
            .position(|column| *column == plink_name)
            .ok_or_else(|| {
                LocusError::Parse(format!("LD report header lacks column {plink_name}"))
            })?;
        indices.push(idx);
    }

    let mut target_variants: Vec<String> = Vec::new();
    let mut chroms: Vec<String> = Vec::new();
    let mut positions: Vec<i64> = Vec::new();
    let mut variants: Vec<String> = Vec::new();
    let mut ld_values: Vec<f64> = Vec::new();

    for (offset, line) in lines.enumerate() {
        let lineno = offset + 2;
        let fields: Vec<&str> = splitter.split(line).collect();
        if fields.len() != header.len() {
            return Err(LocusError::Parse(format!(
                "LD report line {lineno}: expected {} fields, found {}",
                header.len(),
                fields.len()
            )));
        }
        target_variants.push(fields[indices[0]].to_string());
        chroms.push(fields[indices[1]].to_string());
        positions.push(fields[indices[2]].parse::<i64>().map_err(|_| {
            LocusError::Parse(format!(
                "LD report line {lineno}: bad position '{}'",
                fields[indices[2]]
            ))
        })?);
        variants.push(fields[indices[3]].to_string());
        ld_values.push(fields[indices[4]].parse::<f64>().map_err(|_| {
            LocusError::Parse(format!(
                "LD report line {lineno}: bad r2 '{}'",
                fields[indices[4]]
            ))
        })?);
    }

    let frame = DataFrame::new(vec![
        Column::new("target_variant".into(), target_variants),
        Column::new("chrom".into(), chroms),
        Column::new("position".into(), positions),
        Column::new("variant".into(), variants),
        Column::new("ld_r2".into(), ld_values),
    ])?;
    debug!("LD report holds {} pairings", frame.height());
    Ok(frame)
}
