// ==============================================================================
// heatmap.rs - Correlation Heatmap Renderer
// ==============================================================================
// Description: Diverging color-mapped grid of a correlation matrix
// Created: 2026-10-14
// Modified: 2026-10-14
// Version: 1.0.0
// ==============================================================================

use plotters::prelude::*;
use std::path::Path;

use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::canvas::{draw_title, open_canvas, text_style, DrawResult};
use crate::correlation::CorrelationMatrix;

const WIDTH: u32 = 1200;
const HEIGHT: u32 = 1000;
const MARGIN: i32 = 60;
const COLORBAR_WIDTH: i32 = 30;
const COLORBAR_GAP: i32 = 40;
const COLORBAR_STEPS: i32 = 100;
const COLORBAR_LABEL_SIZE: f64 = 16.0;

/// Undefined (zero-variance) cells are left blank
const UNDEFINED_COLOR: RGBColor = WHITE;

/// Blue - grey - red diverging scale, centered at zero
const COOL: (f64, f64, f64) = (59.0, 76.0, 192.0);
const NEUTRAL: (f64, f64, f64) = (221.0, 221.0, 221.0);
const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);

/// Map a correlation in [-1, 1] onto the diverging scale
pub(crate) fn diverging_color(r: f64) -> RGBColor {
    if r.is_nan() {
        return UNDEFINED_COLOR;
    }

    let r = r.clamp(-1.0, 1.0);
    let (to, t) = if r < 0.0 { (COOL, -r) } else { (WARM, r) };

    let lerp = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    RGBColor(
        lerp(NEUTRAL.0, to.0),
        lerp(NEUTRAL.1, to.1),
        lerp(NEUTRAL.2, to.2),
    )
}

pub(crate) fn draw(correlation: &CorrelationMatrix, title: &str, path: &Path) -> DrawResult {
    let root = open_canvas(path, (WIDTH, HEIGHT))?;
    draw_title(&root, title, MARGIN / 2)?;

    let n = correlation.size().max(1);
    let available_w = WIDTH as i32 - 2 * MARGIN - COLORBAR_GAP - COLORBAR_WIDTH;
    let available_h = HEIGHT as i32 - 2 * MARGIN;
    let grid = available_w.min(available_h);
    let cell = grid as f64 / n as f64;

    // Edge positions are rounded per index so adjacent cells share borders
    let edge = |k: usize| MARGIN + (k as f64 * cell).round() as i32;

    for i in 0..correlation.size() {
        for (j, &r) in correlation.row(i).iter().enumerate() {
            root.draw(&Rectangle::new(
                [(edge(j), edge(i)), (edge(j + 1), edge(i + 1))],
                diverging_color(r).filled(),
            ))?;
        }
    }

    root.draw(&Rectangle::new(
        [(MARGIN, MARGIN), (MARGIN + grid, MARGIN + grid)],
        BLACK.stroke_width(1),
    ))?;

    // Colorbar: +1 at the top, -1 at the bottom
    let bar_left = MARGIN + grid + COLORBAR_GAP;
    let step = grid as f64 / COLORBAR_STEPS as f64;
    for s in 0..COLORBAR_STEPS {
        let r = 1.0 - 2.0 * (s as f64 + 0.5) / COLORBAR_STEPS as f64;
        let y0 = MARGIN + (s as f64 * step).round() as i32;
        let y1 = MARGIN + ((s + 1) as f64 * step).round() as i32;
        root.draw(&Rectangle::new(
            [(bar_left, y0), (bar_left + COLORBAR_WIDTH, y1)],
            diverging_color(r).filled(),
        ))?;
    }
    root.draw(&Rectangle::new(
        [(bar_left, MARGIN), (bar_left + COLORBAR_WIDTH, MARGIN + grid)],
        BLACK.stroke_width(1),
    ))?;
    for (label, y) in [("1", MARGIN), ("0", MARGIN + grid / 2), ("-1", MARGIN + grid)] {
        root.draw(&Text::new(
            label,
            (bar_left + COLORBAR_WIDTH + 8, y),
            text_style(COLORBAR_LABEL_SIZE, Pos::new(HPos::Left, VPos::Center)),
        ))?;
    }

    root.present()?;
    Ok(())
}
