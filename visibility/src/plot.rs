//! Position angle availability plots
//!
//! Each panel fills the achievable PA range per day. Ranges that wrap
//! through 0 are drawn as separate upper and lower bands so the filled
//! region never spans the 0/360 seam.

use std::path::Path;

use ephemeris::mjd::iso_date;
use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::banding::{contiguous_runs, split_wraparound, FULL_CIRCLE_DEG};
use crate::error::{Result, VisibilityError};
use crate::instrument::Instrument;
use crate::projector::EnvelopeSeries;

/// Row-major panel order of the full figure
pub const PANEL_ORDER: [Instrument; 6] = [
    Instrument::V3,
    Instrument::NirCam,
    Instrument::Miri,
    Instrument::NirSpec,
    Instrument::Niriss,
    Instrument::Fgs,
];

const FIGURE_SIZE: (u32, u32) = (1400, 800);
const Y_LABEL: &str = "Available Position Angle (Degree)";
const FILL: RGBColor = RGBColor(179, 179, 179);

/// Which panels to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotLayout {
    /// 2x3 grid with every instrument
    AllInstruments,
    /// One instrument filling the figure
    Single(Instrument),
}

fn plot_err<E: std::fmt::Display>(err: E) -> VisibilityError {
    VisibilityError::Plot(err.to_string())
}

/// Figure title for a fixed target, coordinates as the user gave them
pub fn fixed_target_title(name: &str, ra: &str, dec: &str) -> String {
    format!("{name} (RA = {ra}, DEC = {dec})")
}

/// Render the envelopes to `path`; `.svg` selects SVG output, anything else a bitmap.
pub fn render_plot(
    path: &Path,
    series: &EnvelopeSeries,
    span: (f64, f64),
    layout: PlotLayout,
    title: &str,
) -> Result<()> {
    let is_svg = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));

    if is_svg {
        let root = SVGBackend::new(path, FIGURE_SIZE).into_drawing_area();
        draw_figure(&root, series, span, layout, title)?;
        root.present().map_err(plot_err)?;
    } else {
        let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
        draw_figure(&root, series, span, layout, title)?;
        root.present().map_err(plot_err)?;
    }

    info!("Plot saved to {}", path.display());
    Ok(())
}

fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    series: &EnvelopeSeries,
    span: (f64, f64),
    layout: PlotLayout,
    title: &str,
) -> Result<()> {
    root.fill(&WHITE).map_err(plot_err)?;
    let body = root.titled(title, ("sans-serif", 28)).map_err(plot_err)?;

    match layout {
        PlotLayout::AllInstruments => {
            let areas = body.split_evenly((2, 3));
            for (area, inst) in areas.iter().zip(PANEL_ORDER) {
                draw_panel(area, series, span, inst, inst.name())?;
            }
        }
        PlotLayout::Single(inst) => draw_panel(&body, series, span, inst, inst.panel_title())?,
    }
    Ok(())
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    series: &EnvelopeSeries,
    span: (f64, f64),
    instrument: Instrument,
    caption: &str,
) -> Result<()> {
    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(span.0..span.1, 0.0..FULL_CIRCLE_DEG)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_labels(5)
        .x_label_formatter(&|mjd| iso_date(*mjd).unwrap_or_default())
        .y_desc(Y_LABEL)
        .label_style(("sans-serif", 12))
        .draw()
        .map_err(plot_err)?;

    let bands = split_wraparound(&series.instrument(instrument));
    for band in bands.bands() {
        let polygons = contiguous_runs(series.epochs(), band).into_iter().map(|run| {
            let lower = run.iter().map(|&(t, r)| (t, r.min));
            let upper = run.iter().rev().map(|&(t, r)| (t, r.max));
            Polygon::new(lower.chain(upper).collect::<Vec<_>>(), FILL.filled())
        });
        chart.draw_series(polygons).map_err(plot_err)?;
    }
    Ok(())
}
