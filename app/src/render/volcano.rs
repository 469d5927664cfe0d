// ==============================================================================
// volcano.rs - Volcano Plot Renderer
// ==============================================================================
// Description: Log-fold-change vs -log10(p) scatter with fixed cutoff lines
// Created: 2026-10-14
// Modified: 2026-10-14
// Version: 1.0.0
// ==============================================================================

use plotters::prelude::*;
use std::path::Path;

use super::canvas::{
    dashed_hline, dashed_vline, draw_axes, draw_axis_labels, draw_title, open_canvas, DrawResult,
    PlotArea,
};
use crate::diffexpr::{DeTable, LOG_FOLD_CHANGE_THRESHOLD, P_VALUE_THRESHOLD};

const WIDTH: u32 = 1000;
const HEIGHT: u32 = 800;
const MARGIN_LEFT: i32 = 90;
const MARGIN_RIGHT: i32 = 40;
const MARGIN_TOP: i32 = 60;
const MARGIN_BOTTOM: i32 = 80;
const AXIS_LABEL_SIZE: f64 = 18.0;

pub(crate) const X_LABEL: &str = "Log2 Fold Change";
pub(crate) const Y_LABEL: &str = "-log10(p-value)";
const POINT_RADIUS: i32 = 5;

const POINT_COLOR: RGBColor = RGBColor(31, 119, 180);
const SIGNIFICANT_COLOR: RGBColor = RGBColor(214, 39, 40);
const CUTOFF_COLOR: RGBColor = RED;

/// Data ranges covering every point and every cutoff line, padded by 10%
pub(crate) fn data_ranges(table: &DeTable) -> (std::ops::Range<f64>, std::ops::Range<f64>) {
    let max_abs_lfc = table
        .rows()
        .iter()
        .map(|row| row.log_fold_change.abs())
        .fold(LOG_FOLD_CHANGE_THRESHOLD, f64::max);
    let max_y = table
        .rows()
        .iter()
        .map(|row| row.neg_log10_p())
        .fold(-P_VALUE_THRESHOLD.log10(), f64::max);

    let x = max_abs_lfc * 1.1;
    (-x..x, 0.0..max_y * 1.1)
}

pub(crate) fn draw(table: &DeTable, title: &str, path: &Path) -> DrawResult {
    let root = open_canvas(path, (WIDTH, HEIGHT))?;
    draw_title(&root, title, MARGIN_TOP / 2)?;

    let (x_range, y_range) = data_ranges(table);
    let area = PlotArea {
        left: MARGIN_LEFT,
        top: MARGIN_TOP,
        width: WIDTH as i32 - MARGIN_LEFT - MARGIN_RIGHT,
        height: HEIGHT as i32 - MARGIN_TOP - MARGIN_BOTTOM,
        x_range,
        y_range,
    };

    draw_axes(&root, &area)?;
    draw_axis_labels(&root, &area, X_LABEL, Y_LABEL, AXIS_LABEL_SIZE)?;

    for row in table.rows() {
        let center = area.map(row.log_fold_change, row.neg_log10_p());
        let fill = if row.is_significant() {
            SIGNIFICANT_COLOR
        } else {
            POINT_COLOR
        };
        root.draw(&Circle::new(center, POINT_RADIUS, fill.mix(0.7).filled()))?;
        root.draw(&Circle::new(center, POINT_RADIUS, BLACK.stroke_width(1)))?;
    }

    dashed_hline(&root, &area, -P_VALUE_THRESHOLD.log10(), CUTOFF_COLOR)?;
    dashed_vline(&root, &area, -LOG_FOLD_CHANGE_THRESHOLD, CUTOFF_COLOR)?;
    dashed_vline(&root, &area, LOG_FOLD_CHANGE_THRESHOLD, CUTOFF_COLOR)?;

    root.present()?;
    Ok(())
}
