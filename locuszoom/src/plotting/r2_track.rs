use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::render_err;
use crate::analysis::ld_color::LdColorGroups;
use crate::models::{LocusResult, Window, MEGABASE};

const GRAY: RGBColor = RGBColor(0x80, 0x80, 0x80);
const PURPLE: RGBColor = RGBColor(0x80, 0x00, 0x80);

/// Association scatter panel. Buckets are drawn gray-first, then the
/// regimes in ascending r2 order so dense weak-LD scatter cannot bury
/// the interesting points; the target marker goes on last, annotated
/// with its display name.
pub fn draw_r2_track<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    groups: &LdColorGroups,
    window: &Window,
    fancy_variant_name: &str,
    panel_title: Option<&str>,
) -> LocusResult<()> {
    let position_min = window.position_min as f64 / MEGABASE;
    let position_max = window.position_max as f64 / MEGABASE;

    let mut y_max = groups.anchor.1;
    for &(_, y) in &groups.unknown {
        y_max = y_max.max(y);
    }
    for (_, points) in &groups.regimes {
        for &(_, y) in points {
            y_max = y_max.max(y);
        }
    }

    let mut builder = ChartBuilder::on(area);
    builder
        .margin(10)
        .x_label_area_size(10)
        .y_label_area_size(50);
    if let Some(title) = panel_title {
        builder.caption(title, ("sans-serif", 16));
    }
    let mut chart = builder
        .build_cartesian_2d(position_min..position_max, 0.0..(y_max * 1.05 + 0.5))
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_desc("-log10(p-value)")
        .axis_desc_style(("sans-serif", 14))
        .label_style(("sans-serif", 12))
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(
            groups
                .unknown
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 3, GRAY.filled())),
        )
        .map_err(render_err)?;

    for (regime, points) in &groups.regimes {
        let (r, g, b) = regime.color;
        let color = RGBColor(r, g, b);
        chart
            .draw_series(points.iter().map(move |&(x, y)| Circle::new((x, y), 3, color.filled())))
            .map_err(render_err)?;
    }

    let annotation_style = TextStyle::from(("sans-serif", 12))
        .color(&BLACK)
        .pos(Pos::new(HPos::Left, VPos::Center));
    chart
        .draw_series(std::iter::once(
            EmptyElement::at(groups.anchor)
                + Polygon::new(vec![(0, -5), (5, 0), (0, 5), (-5, 0)], PURPLE.filled())
                + Text::new(fancy_variant_name.to_string(), (8, 0), annotation_style),
        ))
        .map_err(render_err)?;

    Ok(())
}
