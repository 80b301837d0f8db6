use std::path::Path;

use anyhow::{Context, Result};
use image::{ColorType, ImageFormat};
use plotters::coord::Shift;
use plotters::prelude::*;

use super::ticks::{format_tick, log_dashes, DecadeAxis};
use crate::color::generate_palette;
use crate::data::model::SmoothedRun;

const FONT: &str = "sans-serif";
/// On-screen length of one dash plus its gap, in pixels.
const DASH_PERIOD_PX: u32 = 8;

// ---------------------------------------------------------------------------
// Drawable points
// ---------------------------------------------------------------------------

/// Split a smoothed series into runs of consecutive drawable points.
///
/// A point is drawable when its value is defined and both coordinates are
/// positive and finite; anything else breaks the curve.
pub fn segments(sizes: &[f64], values: &[Option<f64>]) -> Vec<Vec<(f64, f64)>> {
    let mut out = Vec::new();
    let mut current = Vec::new();
    for (&x, v) in sizes.iter().zip(values) {
        match v {
            Some(y) if on_log_axis(x) && on_log_axis(*y) => current.push((x, *y)),
            _ => {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

fn on_log_axis(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Axes for a run: fitted to the drawable points, `[1, 10]` where none exist.
pub fn axes_for(run: &SmoothedRun) -> (DecadeAxis, DecadeAxis) {
    let points: Vec<(f64, f64)> = run
        .series()
        .iter()
        .flat_map(|s| segments(&run.sizes, &s.values))
        .flatten()
        .collect();

    let x = DecadeAxis::covering(points.iter().map(|p| p.0))
        .or_else(|| DecadeAxis::covering(run.sizes.iter().copied()))
        .unwrap_or_default();
    let y = DecadeAxis::covering(points.iter().map(|p| p.1)).unwrap_or_default();
    (x, y)
}

// ---------------------------------------------------------------------------
// PNG output
// ---------------------------------------------------------------------------

/// Render `run` into a fresh canvas and write it to `path` as PNG.
pub fn render_png(path: &Path, run: &SmoothedRun, title: &str, size: (u32, u32)) -> Result<()> {
    let (width, height) = size;
    let mut buf = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buf, size).into_drawing_area();
        draw_comparison(&root, run, title)?;
        root.present()?;
    }
    image::save_buffer_with_format(path, &buf, width, height, ColorType::Rgb8, ImageFormat::Png)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Chart
// ---------------------------------------------------------------------------

/// Draw both smoothed series of `run` on a log-log chart.
pub fn draw_comparison<DB>(
    root: &DrawingArea<DB, Shift>,
    run: &SmoothedRun,
    title: &str,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let (x_axis, y_axis) = axes_for(run);
    let x_majors = x_axis.majors();
    let y_majors = y_axis.majors();
    let y_ticks = y_axis.all_ticks();
    log::debug!(
        "run {}: x [{}, {}], y [{}, {}]",
        run.index,
        x_axis.lo(),
        x_axis.hi(),
        y_axis.lo(),
        y_axis.hi()
    );

    let mut chart = ChartBuilder::on(root)
        .caption(title, (FONT, 18))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(
            (x_axis.lo()..x_axis.hi())
                .log_scale()
                .with_key_points(x_majors.clone()),
            (y_axis.lo()..y_axis.hi())
                .log_scale()
                .with_key_points(y_ticks.clone()),
        )?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("size(bytes)")
        .y_desc("runtime(ns)")
        .x_labels(x_majors.len())
        .y_labels(y_ticks.len())
        .x_label_formatter(&|v| format!("{:.0}", v))
        .y_label_formatter(&|v| format_tick(*v))
        .label_style((FONT, 11))
        .draw()?;

    // Dashed grid: y at every tick, x at powers of ten only.
    let (plot_w, plot_h) = chart.plotting_area().dim_in_pixel();
    let major = BLACK.mix(0.4).stroke_width(1);
    let minor = BLACK.mix(0.15).stroke_width(1);

    let across = (plot_w / DASH_PERIOD_PX) as usize;
    for &y in &y_ticks {
        let style = if y_majors.iter().any(|m| (m - y).abs() <= 1e-9 * m) {
            major
        } else {
            minor
        };
        chart.draw_series(
            log_dashes(x_axis.lo(), x_axis.hi(), across, 0.6)
                .into_iter()
                .map(|(a, b)| PathElement::new(vec![(a, y), (b, y)], style)),
        )?;
    }

    let down = (plot_h / DASH_PERIOD_PX) as usize;
    for &x in &x_majors {
        chart.draw_series(
            log_dashes(y_axis.lo(), y_axis.hi(), down, 0.6)
                .into_iter()
                .map(|(a, b)| PathElement::new(vec![(x, a), (x, b)], major)),
        )?;
    }

    // Curves. The empty series carries the legend entry so a series with no
    // drawable point is still listed.
    let series = run.series();
    for (s, color) in series.iter().zip(generate_palette(series.len())) {
        let style = color.stroke_width(2);
        chart
            .draw_series(LineSeries::new(std::iter::empty::<(f64, f64)>(), style))?
            .label(s.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));

        let parts = segments(&run.sizes, &s.values);
        if parts.is_empty() {
            log::warn!("run {}: series '{}' has no drawable point", run.index, s.label);
        }
        for part in parts {
            chart.draw_series(LineSeries::new(part, style))?;
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .label_font((FONT, 13))
        .draw()?;

    Ok(())
}
