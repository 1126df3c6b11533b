use std::path::PathBuf;

use plotters::prelude::*;
use tracing::info;

use super::gene_track::draw_gene_track;
use super::r2_track::draw_r2_track;
use super::{draw_r2_legend, prepare_gene_rows, render_err};
use crate::analysis::ld_color::{classify_ld_colors, merge_pvalue_ld};
use crate::data_handling::ld_report::load_plink_ld;
use crate::data_handling::pvalue::PvalueFile;
use crate::models::{LocusResult, Window};

/// One basic locus zoom render: r2 scatter panel over the gene-model
/// panel, sharing the genomic x axis.
#[derive(Debug)]
pub struct BasicLocusZoomOptions {
    pub pvalue_file: PathBuf,
    /// LD report already produced by `generate_plink_ld_file`.
    pub ld_file: PathBuf,
    pub gene_db: PathBuf,
    pub target_variant: String,
    pub target_pos: i64,
    /// Display name for the target variant, usually its rs id.
    pub fancy_name: String,
    /// Flank on each side of the target position.
    pub flank: i64,
    pub label_scale: f64,
    pub title: Option<String>,
    pub output_plot: PathBuf,
}

pub fn basic_locuszoom(opts: &BasicLocusZoomOptions) -> LocusResult<()> {
    let target_chromosome = opts
        .target_variant
        .split(':')
        .next()
        .unwrap_or(&opts.target_variant);
    let window = Window::around(opts.target_pos, opts.flank);

    let gene_rows = prepare_gene_rows(&opts.gene_db, target_chromosome, &window, opts.label_scale)?;

    let pvalue_frame = PvalueFile::new(&opts.pvalue_file).load_windowed(&window)?;
    let ld_frame = load_plink_ld(&opts.ld_file)?;
    let merged = merge_pvalue_ld(&pvalue_frame, &ld_frame)?;
    let groups = classify_ld_colors(&merged, &opts.target_variant)?;

    let n_gene_rows = gene_rows.len() as u32;
    info!(
        "Rendering locus zoom to {} ({} gene rows)",
        opts.output_plot.display(),
        n_gene_rows
    );

    let root = BitMapBackend::new(&opts.output_plot, (1200, 900)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    let figure = match &opts.title {
        Some(title) => root.titled(title, ("sans-serif", 20)).map_err(render_err)?,
        None => root.clone(),
    };

    // r2 panel to gene panel height ratio is 10 : n gene rows
    let gene_units = n_gene_rows.max(1);
    let (_, total_height) = figure.dim_in_pixel();
    let gene_height = total_height * gene_units / (10 + gene_units);
    let (r2_area, gene_area) = figure.split_vertically((total_height - gene_height) as i32);

    draw_r2_track(&r2_area, &groups, &window, &opts.fancy_name, None)?;
    draw_r2_legend(&r2_area)?;
    draw_gene_track(&gene_area, &gene_rows, &window)?;

    root.present().map_err(render_err)?;
    Ok(())
}
