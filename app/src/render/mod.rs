// ==============================================================================
// render/mod.rs - Artifact Renderers
// ==============================================================================
// Description: Heatmap, volcano and network image renderers
// Created: 2026-10-14
// Modified: 2026-10-14
// Version: 1.0.0
// ==============================================================================
// Every renderer owns its drawing surface for the duration of one call: the
// bitmap is created, presented (written) and dropped inside `render`, so no
// state carries over between artifacts. Text uses the bundled font
// registered by `canvas::ensure_font`.
// ==============================================================================

mod canvas;
mod heatmap;
mod network;
mod volcano;

use rand::Rng;
use std::path::Path;
use tracing::{debug, info};

use crate::correlation::CorrelationMatrix;
use crate::diffexpr::DeTable;
use crate::error::{OmicsError, Result};
use crate::layout::{spring_layout, LayoutConfig};
use crate::network::FeatureGraph;

/// Derived structure handed to a renderer
#[derive(Debug, Clone, Copy)]
pub enum Figure<'a> {
    Heatmap(&'a CorrelationMatrix),
    Volcano(&'a DeTable),
    Network(&'a FeatureGraph),
}

impl Figure<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Figure::Heatmap(_) => "heatmap",
            Figure::Volcano(_) => "volcano",
            Figure::Network(_) => "network",
        }
    }
}

/// Render `figure` to a PNG at `path`, overwriting any existing file
///
/// `rng` seeds the network layout; the other figures ignore it.
pub fn render<R: Rng + ?Sized>(
    figure: Figure<'_>,
    title: &str,
    path: &Path,
    rng: &mut R,
) -> Result<()> {
    debug!("Rendering {} '{}' to {:?}", figure.name(), title, path);

    let drawn = match figure {
        Figure::Heatmap(correlation) => heatmap::draw(correlation, title, path),
        Figure::Volcano(table) => volcano::draw(table, title, path),
        Figure::Network(graph) => {
            let positions = spring_layout(graph, &LayoutConfig::default(), rng);
            network::draw(graph, &positions, title, path)
        }
    };

    drawn.map_err(|e| OmicsError::Render {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    info!("Rendered '{}' to {:?}", title, path);
    Ok(())
}
