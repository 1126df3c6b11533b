use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::render_err;
use crate::models::{LocusResult, ScaledGeneRow, Strand, Window, MEGABASE};

/// Gene model track: one horizontal band per packed row at y = -row
/// index, thin line for the transcript body, thick segments for exons,
/// and the gene name with a strand arrow centered above the body.
pub fn draw_gene_track<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    gene_rows: &[ScaledGeneRow],
    window: &Window,
) -> LocusResult<()> {
    let position_min = window.position_min as f64 / MEGABASE;
    let position_max = window.position_max as f64 / MEGABASE;
    let nrows = gene_rows.len();

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(position_min..position_max, (-(nrows as f64) + 0.5)..1.0)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .disable_y_axis()
        .x_desc("position (Mb)")
        .axis_desc_style(("sans-serif", 14))
        .label_style(("sans-serif", 12))
        .draw()
        .map_err(render_err)?;

    let body_style = BLUE.stroke_width(1);
    let exon_style = BLUE.stroke_width(5);
    let label_style = TextStyle::from(("sans-serif", 11))
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    let text_yoffset = 0.4;

    for (i, row) in gene_rows.iter().enumerate() {
        let y = -(i as f64);
        for gene in row {
            chart
                .draw_series(std::iter::once(PathElement::new(
                    vec![(gene.tx_start, y), (gene.tx_end, y)],
                    body_style,
                )))
                .map_err(render_err)?;

            // end ticks keep short genes visible at coarse resolutions
            for x in [gene.tx_start, gene.tx_end] {
                chart
                    .draw_series(std::iter::once(
                        EmptyElement::at((x, y))
                            + PathElement::new(vec![(0, -4), (0, 4)], body_style),
                    ))
                    .map_err(render_err)?;
            }

            for (&exon_start, &exon_end) in gene.exon_starts.iter().zip(gene.exon_ends.iter()) {
                chart
                    .draw_series(std::iter::once(PathElement::new(
                        vec![(exon_start, y), (exon_end, y)],
                        exon_style,
                    )))
                    .map_err(render_err)?;
            }

            let center_x = (gene.tx_start + gene.tx_end) / 2.0;
            let label = match gene.strand {
                Strand::Plus => format!("{}\u{2192}", gene.gene_name),
                Strand::Minus => format!("\u{2190}{}", gene.gene_name),
            };
            chart
                .draw_series(std::iter::once(Text::new(
                    label,
                    (center_x, y + text_yoffset),
                    label_style.clone(),
                )))
                .map_err(render_err)?;
        }
    }
    Ok(())
}
