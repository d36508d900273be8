// src/plot_framework.rs

use plotters::backend::{BitMapBackend, DrawingBackend, SVGBackend};
use plotters::chart::ChartBuilder;
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, DrawingAreaErrorKind, IntoDrawingArea};
use plotters::element::{Circle, EmptyElement, Polygon, Rectangle};
use plotters::style::colors::WHITE;
use plotters::style::{Color, RGBColor};

use ndarray::Array1;
use ndarray_stats::QuantileExt;

use std::ops::Range;
use std::path::Path;

use crate::constants::{
    FIGURE_HEIGHT_IN, FIGURE_WIDTH_IN, FONT_SIZE_AXIS_LABEL, FONT_SIZE_TICK_LABEL,
    PANEL_MARGIN_PX, TICK_LABEL_COUNT,
};
use crate::errors::{AnalysisError, AnalysisResult};

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for AnalysisError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        AnalysisError::Render(err.to_string())
    }
}

/// Calculate plot range with padding.
/// Adds 15% padding, or a fixed padding for very small ranges.
pub fn calculate_range(min_val: f64, max_val: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = (max - min).abs();
    let padding = if range < 1e-6 { 0.5 } else { range * 0.15 };
    (min - padding, max + padding)
}

/// Tick label text: "k"/"M" notation for large values, decimals for small fractional ones.
pub fn format_tick(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if magnitude >= 1000.0 {
        let thousands = value / 1000.0;
        if thousands.fract() != 0.0 {
            format!("{:.1}k", thousands)
        } else {
            format!("{:.0}k", thousands)
        }
    } else if magnitude < 1.0 && value.fract() != 0.0 {
        format!("{:.2}", value)
    } else if magnitude < 10.0 && value.fract() != 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{:.0}", value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    Circle,
    Square,
    Diamond,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub shape: MarkerShape,
    pub color: RGBColor,
    /// Half-width of the marker in pixels.
    pub size: u32,
}

/// One scatter panel of a figure.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub points: Vec<(f64, f64)>,
    pub x_label: String,
    pub y_label: String,
    pub marker: MarkerStyle,
}

impl Panel {
    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|&(x, _)| x).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|&(_, y)| y).collect()
    }

    pub fn x_range(&self) -> Range<f64> {
        padded_range(&Array1::from(self.xs()))
    }

    pub fn y_range(&self) -> Range<f64> {
        padded_range(&Array1::from(self.ys()))
    }
}

fn padded_range(values: &Array1<f64>) -> Range<f64> {
    match (values.min(), values.max()) {
        (Ok(&lo), Ok(&hi)) if lo.is_finite() && hi.is_finite() => {
            let (start, end) = calculate_range(lo, hi);
            start..end
        }
        _ => -1.0..1.0,
    }
}

/// Vertically stacked scatter panels, sized in inches.
///
/// This is plain data; nothing is drawn until it is passed to
/// [`render_figure`], [`save_png`] or [`save_svg`].
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub width_in: f64,
    pub height_in: f64,
    pub panels: Vec<Panel>,
}

impl Default for Figure {
    fn default() -> Self {
        Self {
            width_in: FIGURE_WIDTH_IN,
            height_in: FIGURE_HEIGHT_IN,
            panels: Vec::new(),
        }
    }
}

impl Figure {
    pub fn new(width_in: f64, height_in: f64) -> Self {
        Self {
            width_in,
            height_in,
            panels: Vec::new(),
        }
    }

    pub fn with_panel(mut self, panel: Panel) -> Self {
        self.panels.push(panel);
        self
    }

    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    /// Canvas size in pixels at the given resolution.
    pub fn pixel_size(&self, dpi: u32) -> (u32, u32) {
        let to_px = |inches: f64| (inches * dpi as f64).round().max(1.0) as u32;
        (to_px(self.width_in), to_px(self.height_in))
    }
}

/// Estimated pixel width of `text` at `font_px`.
fn estimate_text_width(text: &str, font_px: i32) -> u32 {
    // Approximate character width relative to font size
    const CHAR_WIDTH_RATIO: f32 = 0.6;
    (text.chars().count() as f32 * font_px as f32 * CHAR_WIDTH_RATIO).ceil() as u32
}

/// Label area sizes `(x_area_height, y_area_width)` that keep tick labels
/// and axis descriptions clear of the neighbouring panel.
pub fn label_area_sizes(panel: &Panel) -> (u32, u32) {
    let tick_height = FONT_SIZE_TICK_LABEL as u32;
    let desc_height = FONT_SIZE_AXIS_LABEL as u32;
    let x_area = tick_height + desc_height + 2 * PANEL_MARGIN_PX;

    let y_range = panel.y_range();
    let widest_tick = [y_range.start, y_range.end, (y_range.start + y_range.end) / 2.0]
        .iter()
        .map(|&v| estimate_text_width(&format_tick(v), FONT_SIZE_TICK_LABEL))
        .max()
        .unwrap_or(0);
    let y_area = widest_tick + desc_height + 2 * PANEL_MARGIN_PX;

    (x_area, y_area)
}

fn draw_panel<DB>(area: &DrawingArea<DB, Shift>, panel: &Panel) -> AnalysisResult<()>
where
    DB: DrawingBackend,
{
    let (x_area, y_area) = label_area_sizes(panel);

    let mut chart = ChartBuilder::on(area)
        .margin(PANEL_MARGIN_PX)
        .x_label_area_size(x_area)
        .y_label_area_size(y_area)
        .build_cartesian_2d(panel.x_range(), panel.y_range())?;

    chart
        .configure_mesh()
        .x_desc(panel.x_label.as_str())
        .y_desc(panel.y_label.as_str())
        .x_labels(TICK_LABEL_COUNT)
        .y_labels(TICK_LABEL_COUNT)
        .x_label_formatter(&|x| format_tick(*x))
        .y_label_formatter(&|y| format_tick(*y))
        .light_line_style(WHITE.mix(0.7))
        .label_style(("sans-serif", FONT_SIZE_TICK_LABEL))
        .axis_desc_style(("sans-serif", FONT_SIZE_AXIS_LABEL))
        .draw()?;

    let size = panel.marker.size as i32;
    let style = panel.marker.color.filled();
    let points = panel.points.iter().copied();
    match panel.marker.shape {
        MarkerShape::Circle => {
            chart.draw_series(
                points.map(|p| EmptyElement::at(p) + Circle::new((0, 0), size, style)),
            )?;
        }
        MarkerShape::Square => {
            chart.draw_series(points.map(|p| {
                EmptyElement::at(p) + Rectangle::new([(-size, -size), (size, size)], style)
            }))?;
        }
        MarkerShape::Diamond => {
            chart.draw_series(points.map(|p| {
                EmptyElement::at(p)
                    + Polygon::new(vec![(0, -size), (size, 0), (0, size), (-size, 0)], style)
            }))?;
        }
    }

    Ok(())
}

/// Draws every panel of `figure` onto `root`, stacked top to bottom.
pub fn render_figure<DB>(figure: &Figure, root: &DrawingArea<DB, Shift>) -> AnalysisResult<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE)?;
    if figure.panels.is_empty() {
        return Ok(());
    }

    let sub_plot_areas = root.split_evenly((figure.panels.len(), 1));
    for (area, panel) in sub_plot_areas.iter().zip(&figure.panels) {
        draw_panel(area, panel)?;
    }
    Ok(())
}

/// Renders `figure` to a PNG file at `dpi` pixels per inch.
pub fn save_png(figure: &Figure, path: &Path, dpi: u32) -> AnalysisResult<()> {
    let root_area = BitMapBackend::new(path, figure.pixel_size(dpi)).into_drawing_area();
    render_figure(figure, &root_area)?;
    root_area.present()?;
    tracing::info!(path = %path.display(), dpi, "Figure saved as PNG");
    Ok(())
}

/// Renders `figure` to an SVG file; `dpi` only sets the canvas size.
pub fn save_svg(figure: &Figure, path: &Path, dpi: u32) -> AnalysisResult<()> {
    let root_area = SVGBackend::new(path, figure.pixel_size(dpi)).into_drawing_area();
    render_figure(figure, &root_area)?;
    root_area.present()?;
    tracing::info!(path = %path.display(), dpi, "Figure saved as SVG");
    Ok(())
}


// src/plot_framework.rs
