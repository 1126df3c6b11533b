pub mod basic;
pub mod gene_track;
pub mod multi_ancestry;
pub mod r2_track;

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::analysis::ld_color::LD_REGIMES;
use crate::analysis::row_pack::{pack_gene_rows, scale_gene_rows};
use crate::data_handling::gene_store::GeneStore;
use crate::models::{LocusError, LocusResult, ScaledGeneRow, Window};

/// Funnel for the drawing backend's error types.
pub(crate) fn render_err<E: std::fmt::Display>(e: E) -> LocusError {
    LocusError::Render(e.to_string())
}

/// Gene-track pipeline: query the store, pack into rows, rescale to Mb.
pub fn prepare_gene_rows(
    gene_db: &Path,
    chromosome: &str,
    window: &Window,
    label_scale: f64,
) -> LocusResult<Vec<ScaledGeneRow>> {
    let store = GeneStore { db_path: gene_db.to_path_buf() };
    let features = store.query_region(chromosome, window)?;
    let rows = pack_gene_rows(&features, window, label_scale)?;
    Ok(scale_gene_rows(&rows))
}

/// Small r2 color key in the panel's upper left, one swatch per regime,
/// strongest on top.
pub(crate) fn draw_r2_legend<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>) -> LocusResult<()> {
    let swatch = 14i32;
    let x0 = 80i32;
    let mut y = 40i32;

    area.draw(&Text::new("r2".to_string(), (x0, y - 18), ("sans-serif", 13)))
        .map_err(render_err)?;
    for regime in LD_REGIMES.iter().rev() {
        let (r, g, b) = regime.color;
        area.draw(&Rectangle::new(
            [(x0, y), (x0 + swatch, y + swatch)],
            RGBColor(r, g, b).filled(),
        ))
        .map_err(render_err)?;
        area.draw(&Text::new(
            format!("{:.1}", regime.r2_max),
            (x0 + swatch + 5, y + 2),
            ("sans-serif", 11),
        ))
        .map_err(render_err)?;
        y += swatch;
    }
    area.draw(&Text::new(
        "0.0".to_string(),
        (x0 + swatch + 5, y + 2),
        ("sans-serif", 11),
    ))
    .map_err(render_err)?;
    Ok(())
}
