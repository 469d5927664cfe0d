// ==============================================================================
// network.rs - Correlation Network Renderer
// ==============================================================================
// Description: Node-link diagram of a feature graph on a spring layout
// Created: 2026-10-14
// Modified: 2026-10-14
// Version: 1.0.0
// ==============================================================================

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

use super::canvas::{draw_title, open_canvas, text_style, DrawResult, PlotArea};
use crate::layout::Point;
use crate::network::FeatureGraph;

const WIDTH: u32 = 1500;
const HEIGHT: u32 = 1200;
const MARGIN: i32 = 60;
const NODE_RADIUS: i32 = 12;
const NODE_LABEL_SIZE: f64 = 12.0;

const NODE_COLOR: RGBColor = RGBColor(173, 216, 230);
const EDGE_COLOR: RGBColor = RGBColor(128, 128, 128);

/// Draw `graph` with nodes at `positions` (layout space [-1, 1]²), each
/// labelled with its feature name
pub(crate) fn draw(
    graph: &FeatureGraph,
    positions: &[Point],
    title: &str,
    path: &Path,
) -> DrawResult {
    let root = open_canvas(path, (WIDTH, HEIGHT))?;
    draw_title(&root, title, MARGIN / 2)?;

    let area = PlotArea {
        left: MARGIN,
        top: MARGIN,
        width: WIDTH as i32 - 2 * MARGIN,
        height: HEIGHT as i32 - 2 * MARGIN,
        x_range: -1.0..1.0,
        y_range: -1.0..1.0,
    };
    let pixel = |idx: usize| area.map(positions[idx].x, positions[idx].y);

    for (a, b, _) in graph.edge_indices() {
        root.draw(&PathElement::new(
            vec![pixel(a), pixel(b)],
            EDGE_COLOR.mix(0.7).stroke_width(1),
        ))?;
    }

    for (idx, label) in graph.node_labels().into_iter().enumerate().take(positions.len()) {
        root.draw(&Circle::new(pixel(idx), NODE_RADIUS, NODE_COLOR.mix(0.7).filled()))?;
        root.draw(&Text::new(
            label,
            pixel(idx),
            text_style(NODE_LABEL_SIZE, Pos::new(HPos::Center, VPos::Center)),
        ))?;
    }

    root.present()?;
    Ok(())
}
