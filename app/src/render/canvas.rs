// ==============================================================================
// canvas.rs - Shared Drawing Helpers
// ==============================================================================
// Description: Canvas setup, text, plot-area mapping, axes and reference lines
// Created: 2026-10-14
// Modified: 2026-10-14
// Version: 1.0.0
// ==============================================================================

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{register_font, FontStyle, FontTransform, TextStyle};
use std::error::Error;
use std::ops::Range;
use std::path::Path;
use std::sync::OnceLock;

/// Result of a drawing routine; boxed so every plotters error converts with `?`
pub(crate) type DrawResult = Result<(), Box<dyn Error>>;

pub(crate) type Canvas<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Family name the bundled font is registered under
pub(crate) const FONT_FAMILY: &str = "sans-serif";

/// DejaVu Sans (license in assets/DejaVuSans-LICENSE.txt)
static FONT_DATA: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

const TITLE_SIZE: f64 = 28.0;
const TICK_LABEL_SIZE: f64 = 14.0;

/// Dash and gap length (pixels) for reference lines
const DASH: i32 = 8;
const GAP: i32 = 5;

/// Rectangular plot region mapping data coordinates to pixels
///
/// The y axis grows upwards in data space and downwards in pixel space.
#[derive(Debug, Clone)]
pub(crate) struct PlotArea {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
}

impl PlotArea {
    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    pub fn map(&self, x: f64, y: f64) -> (i32, i32) {
        (self.map_x(x), self.map_y(y))
    }

    pub fn map_x(&self, x: f64) -> i32 {
        let span = self.x_range.end - self.x_range.start;
        let t = if span > 0.0 { (x - self.x_range.start) / span } else { 0.5 };
        self.left + (t * self.width as f64).round() as i32
    }

    pub fn map_y(&self, y: f64) -> i32 {
        let span = self.y_range.end - self.y_range.start;
        let t = if span > 0.0 { (y - self.y_range.start) / span } else { 0.5 };
        self.bottom() - (t * self.height as f64).round() as i32
    }

    pub fn contains_x(&self, x: f64) -> bool {
        self.x_range.start <= x && x <= self.x_range.end
    }

    pub fn contains_y(&self, y: f64) -> bool {
        self.y_range.start <= y && y <= self.y_range.end
    }
}

/// Register the bundled font with plotters' glyph table (once per process)
pub(crate) fn ensure_font() -> DrawResult {
    static REGISTERED: OnceLock<Result<(), String>> = OnceLock::new();

    REGISTERED
        .get_or_init(|| {
            register_font(FONT_FAMILY, FontStyle::Normal, FONT_DATA)
                .map_err(|_| "bundled font is not a valid TrueType file".to_string())
        })
        .clone()
        .map_err(Into::into)
}

/// White bitmap canvas of `size` pixels that writes to `path` on `present()`
pub(crate) fn open_canvas(path: &Path, size: (u32, u32)) -> Result<Canvas<'_>, Box<dyn Error>> {
    ensure_font()?;
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;
    Ok(root)
}

/// Black text of `size` px anchored at `anchor`
pub(crate) fn text_style(size: f64, anchor: Pos) -> TextStyle<'static> {
    (FONT_FAMILY, size).into_font().color(&BLACK).pos(anchor)
}

/// Centered title across the top margin
pub(crate) fn draw_title(root: &Canvas<'_>, title: &str, center_y: i32) -> DrawResult {
    let (width, _) = root.dim_in_pixel();
    root.draw(&Text::new(
        title,
        (width as i32 / 2, center_y),
        text_style(TITLE_SIZE, Pos::new(HPos::Center, VPos::Center)),
    ))?;
    Ok(())
}

/// Axis titles: `x_label` centered below the plot, `y_label` rotated left of it
pub(crate) fn draw_axis_labels(
    root: &Canvas<'_>,
    area: &PlotArea,
    x_label: &str,
    y_label: &str,
    size: f64,
) -> DrawResult {
    root.draw(&Text::new(
        x_label,
        (area.left + area.width / 2, area.bottom() + 45),
        text_style(size, Pos::new(HPos::Center, VPos::Center)),
    ))?;

    let rotated = (FONT_FAMILY, size)
        .into_font()
        .transform(FontTransform::Rotate270)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    root.draw(&Text::new(
        y_label,
        (area.left - 55, area.top + area.height / 2),
        rotated,
    ))?;
    Ok(())
}

/// Draw the left and bottom axes with labelled ticks at every whole data unit
pub(crate) fn draw_axes(root: &Canvas<'_>, area: &PlotArea) -> DrawResult {
    root.draw(&PathElement::new(
        vec![(area.left, area.bottom()), (area.right(), area.bottom())],
        BLACK.stroke_width(2),
    ))?;
    root.draw(&PathElement::new(
        vec![(area.left, area.top), (area.left, area.bottom())],
        BLACK.stroke_width(2),
    ))?;

    for x in whole_units(&area.x_range) {
        let px = area.map_x(x);
        root.draw(&PathElement::new(
            vec![(px, area.bottom()), (px, area.bottom() + 6)],
            BLACK.stroke_width(1),
        ))?;
        root.draw(&Text::new(
            format!("{}", x),
            (px, area.bottom() + 10),
            text_style(TICK_LABEL_SIZE, Pos::new(HPos::Center, VPos::Top)),
        ))?;
    }
    for y in whole_units(&area.y_range) {
        let py = area.map_y(y);
        root.draw(&PathElement::new(
            vec![(area.left - 6, py), (area.left, py)],
            BLACK.stroke_width(1),
        ))?;
        root.draw(&Text::new(
            format!("{}", y),
            (area.left - 10, py),
            text_style(TICK_LABEL_SIZE, Pos::new(HPos::Right, VPos::Center)),
        ))?;
    }

    Ok(())
}

/// Dashed horizontal line across the plot area at data height `y`
pub(crate) fn dashed_hline(
    root: &Canvas<'_>,
    area: &PlotArea,
    y: f64,
    color: RGBColor,
) -> DrawResult {
    if !area.contains_y(y) {
        return Ok(());
    }
    let py = area.map_y(y);
    let mut x = area.left;
    while x < area.right() {
        let end = (x + DASH).min(area.right());
        root.draw(&PathElement::new(vec![(x, py), (end, py)], color.stroke_width(2)))?;
        x = end + GAP;
    }
    Ok(())
}

/// Dashed vertical line across the plot area at data position `x`
pub(crate) fn dashed_vline(
    root: &Canvas<'_>,
    area: &PlotArea,
    x: f64,
    color: RGBColor,
) -> DrawResult {
    if !area.contains_x(x) {
        return Ok(());
    }
    let px = area.map_x(x);
    let mut y = area.top;
    while y < area.bottom() {
        let end = (y + DASH).min(area.bottom());
        root.draw(&PathElement::new(vec![(px, y), (px, end)], color.stroke_width(2)))?;
        y = end + GAP;
    }
    Ok(())
}

fn whole_units(range: &Range<f64>) -> impl Iterator<Item = f64> {
    let start = range.start.ceil() as i64;
    let end = range.end.floor() as i64;
    (start..=end).map(|v| v as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_area_mapping() {
        let area = PlotArea {
            left: 100,
            top: 50,
            width: 200,
            height: 100,
            x_range: -1.0..1.0,
            y_range: 0.0..10.0,
        };

        assert_eq!(area.map(-1.0, 0.0), (100, 150));
        assert_eq!(area.map(1.0, 10.0), (300, 50));
        assert_eq!(area.map(0.0, 5.0), (200, 100));
        assert!(area.contains_x(0.5));
        assert!(!area.contains_y(11.0));
    }

    #[test]
    fn test_degenerate_range_maps_to_center() {
        let area = PlotArea {
            left: 0,
            top: 0,
            width: 100,
            height: 100,
            x_range: 2.0..2.0,
            y_range: 0.0..1.0,
        };
        assert_eq!(area.map_x(2.0), 50);
    }

    #[test]
    fn test_bundled_font_registers() {
        ensure_font().unwrap();
        // Repeat calls reuse the first registration
        ensure_font().unwrap();

        let style = text_style(TITLE_SIZE, Pos::new(HPos::Center, VPos::Center));
        let ((x0, _), (x1, _)) = style.font.layout_box("Volcano").unwrap();
        assert!(x1 > x0);
    }

    #[test]
    fn test_whole_units() {
        let ticks: Vec<f64> = whole_units(&(-2.5..1.2)).collect();
        assert_eq!(ticks, vec![-2.0, -1.0, 0.0, 1.0]);
    }
}
