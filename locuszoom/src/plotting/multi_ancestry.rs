use std::path::PathBuf;

use plotters::prelude::*;
use polars::prelude::DataFrame;
use tracing::info;

use super::gene_track::draw_gene_track;
use super::r2_track::draw_r2_track;
use super::{draw_r2_legend, prepare_gene_rows, render_err};
use crate::analysis::ld_color::{classify_ld_colors, merge_pvalue_ld};
use crate::data_handling::ld_report::load_plink_ld;
use crate::data_handling::pvalue::window_positions;
use crate::models::{LocusError, LocusResult, Window};

/// Stacked locus zoom: one r2 panel per ancestry's LD report, all fed
/// from the same p-value frame, with the gene track at the bottom.
#[derive(Debug)]
pub struct MultiAncestryOptions {
    /// (panel label, LD report path) per ancestry, top to bottom.
    pub ancestry_ld_files: Vec<(String, PathBuf)>,
    pub gene_db: PathBuf,
    pub target_variant: String,
    pub target_pos: i64,
    pub fancy_name: String,
    pub flank: i64,
    pub label_scale: f64,
    pub output_plot: PathBuf,
}

/// The caller supplies the p-value frame pre-loaded; it is windowed here
/// once and then joined against each ancestry's LD report in turn.
pub fn multi_ancestry_locuszoom(
    pvalue_frame: &DataFrame,
    opts: &MultiAncestryOptions,
) -> LocusResult<()> {
    if opts.ancestry_ld_files.is_empty() {
        return Err(LocusError::Precondition(
            "at least one ancestry LD report is required".to_string(),
        ));
    }

    let target_chromosome = opts
        .target_variant
        .split(':')
        .next()
        .unwrap_or(&opts.target_variant);
    let window = Window::around(opts.target_pos, opts.flank);

    let gene_rows = prepare_gene_rows(&opts.gene_db, target_chromosome, &window, opts.label_scale)?;
    let pvalue_frame = window_positions(pvalue_frame.clone(), &window)?;

    let n_panels = opts.ancestry_ld_files.len() as u32;
    info!(
        "Rendering {} ancestry panels to {}",
        n_panels,
        opts.output_plot.display()
    );

    let root = BitMapBackend::new(&opts.output_plot, (1200, 1650)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    // 10 height units per r2 panel, one per gene row
    let gene_units = (gene_rows.len() as u32).max(1);
    let total_units = 10 * n_panels + gene_units;
    let (_, total_height) = root.dim_in_pixel();
    let panel_height = total_height * 10 / total_units;

    let mut rest = root.clone();
    for (i, (label, ld_file)) in opts.ancestry_ld_files.iter().enumerate() {
        let (panel, below) = rest.split_vertically(panel_height as i32);

        let ld_frame = load_plink_ld(ld_file)?;
        let merged = merge_pvalue_ld(&pvalue_frame, &ld_frame)?;
        let groups = classify_ld_colors(&merged, &opts.target_variant)?;

        draw_r2_track(&panel, &groups, &window, &opts.fancy_name, Some(label))?;
        if i == 0 {
            draw_r2_legend(&panel)?;
        }
        rest = below;
    }
    draw_gene_track(&rest, &gene_rows, &window)?;

    root.present().map_err(render_err)?;
    Ok(())
}
