// ==============================================================================
// layout.rs - Force-Directed Graph Layout
// ==============================================================================
// Description: Fruchterman-Reingold spring layout for feature graphs
// Created: 2026-10-14
// Modified: 2026-10-14
// Version: 1.0.0
// ==============================================================================

use rand::Rng;

use crate::network::FeatureGraph;

/// Configuration for the spring layout
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Simulation steps
    pub iterations: usize,

    /// Optimal node distance; `None` derives 1/sqrt(n) for the unit square
    pub optimal_distance: Option<f64>,

    /// Initial maximum displacement per step (cools linearly to zero)
    pub initial_temperature: f64,

    /// Minimum distance used in force calculation (prevents explosion)
    pub min_distance: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            iterations: 50,
            optimal_distance: None,
            initial_temperature: 0.1,
            min_distance: 0.01,
        }
    }
}

/// Node position in layout space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Compute node positions for `graph`, rescaled into [-1, 1] on both axes
///
/// Positions are returned in node order. The result depends on `rng`: the
/// same seed reproduces the same layout, an unseeded source does not.
pub fn spring_layout<R: Rng + ?Sized>(
    graph: &FeatureGraph,
    config: &LayoutConfig,
    rng: &mut R,
) -> Vec<Point> {
    let n = graph.node_count();
    match n {
        0 => return Vec::new(),
        1 => return vec![Point { x: 0.0, y: 0.0 }],
        _ => {}
    }

    let mut positions: Vec<Point> = (0..n)
        .map(|_| Point {
            x: rng.gen::<f64>(),
            y: rng.gen::<f64>(),
        })
        .collect();

    let edges = graph.edge_indices();
    let k = config
        .optimal_distance
        .unwrap_or_else(|| (1.0 / n as f64).sqrt());
    let cooling = config.initial_temperature / (config.iterations.max(1) as f64 + 1.0);
    let mut temperature = config.initial_temperature;

    for _ in 0..config.iterations {
        let mut displacement = vec![Point { x: 0.0, y: 0.0 }; n];

        // Repulsion between all node pairs: k² / d
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = positions[i].x - positions[j].x;
                let dy = positions[i].y - positions[j].y;
                let dist = (dx * dx + dy * dy).sqrt().max(config.min_distance);
                let force = k * k / dist;
                let (fx, fy) = (dx / dist * force, dy / dist * force);

                displacement[i].x += fx;
                displacement[i].y += fy;
                displacement[j].x -= fx;
                displacement[j].y -= fy;
            }
        }

        // Attraction along edges: w · d² / k
        for &(a, b, weight) in &edges {
            let dx = positions[a].x - positions[b].x;
            let dy = positions[a].y - positions[b].y;
            let dist = (dx * dx + dy * dy).sqrt().max(config.min_distance);
            let force = weight * dist * dist / k;
            let (fx, fy) = (dx / dist * force, dy / dist * force);

            displacement[a].x -= fx;
            displacement[a].y -= fy;
            displacement[b].x += fx;
            displacement[b].y += fy;
        }

        // Move by at most the current temperature
        for (pos, disp) in positions.iter_mut().zip(displacement.iter()) {
            let length = (disp.x * disp.x + disp.y * disp.y).sqrt();
            if length > 0.0 {
                let step = length.min(temperature);
                pos.x += disp.x / length * step;
                pos.y += disp.y / length * step;
            }
        }

        temperature -= cooling;
    }

    rescale(&mut positions);
    positions
}

/// Center on the origin and scale so the largest coordinate magnitude is 1
fn rescale(positions: &mut [Point]) {
    let n = positions.len() as f64;
    let cx = positions.iter().map(|p| p.x).sum::<f64>() / n;
    let cy = positions.iter().map(|p| p.y).sum::<f64>() / n;

    let mut extent: f64 = 0.0;
    for p in positions.iter_mut() {
        p.x -= cx;
        p.y -= cy;
        extent = extent.max(p.x.abs()).max(p.y.abs());
    }

    if extent > 0.0 {
        for p in positions.iter_mut() {
            p.x /= extent;
            p.y /= extent;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correlation::correlate;
    use crate::models::{Modality, ModalityMatrix};
    use crate::network::{build_graph, DEFAULT_THRESHOLD};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn chain_graph() -> FeatureGraph {
        // Four features, all strongly correlated
        let rows = vec![
            vec![1.0, 2.0, 1.1, 3.0],
            vec![2.0, 4.1, 2.0, 6.2],
            vec![3.0, 6.0, 3.2, 8.9],
            vec![4.0, 8.2, 3.9, 12.1],
        ];
        let features = (1..=4).map(|i| format!("F{}", i)).collect();
        let samples = (1..=4).map(|i| format!("s{}", i)).collect();
        let matrix = ModalityMatrix::new(Modality::Genomics, samples, features, rows).unwrap();
        build_graph(&correlate(&matrix), DEFAULT_THRESHOLD)
    }

    #[test]
    fn test_positions_within_unit_box() {
        let graph = chain_graph();
        let mut rng = StdRng::seed_from_u64(4);
        let positions = spring_layout(&graph, &LayoutConfig::default(), &mut rng);

        assert_eq!(positions.len(), graph.node_count());
        for p in &positions {
            assert!(p.x.is_finite() && p.y.is_finite());
            assert!(p.x.abs() <= 1.0 + 1e-9 && p.y.abs() <= 1.0 + 1e-9);
        }
        // Rescaling stretches the layout to touch the boundary
        let max = positions.iter().map(|p| p.x.abs().max(p.y.abs())).fold(0.0, f64::max);
        assert!((max - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_seeded_layout_is_repeatable() {
        let graph = chain_graph();
        let config = LayoutConfig::default();

        let a = spring_layout(&graph, &config, &mut StdRng::seed_from_u64(12));
        let b = spring_layout(&graph, &config, &mut StdRng::seed_from_u64(12));
        assert_eq!(a, b);
    }

    #[test]
    fn test_degenerate_graphs() {
        let rows = vec![vec![1.0, 1.0], vec![2.0, 5.0]];
        let features = vec!["A".to_string(), "B".to_string()];
        let samples = vec!["s1".to_string(), "s2".to_string()];
        let matrix = ModalityMatrix::new(Modality::Metabolomics, samples, features, rows).unwrap();

        // Two samples: the pair has |r| = 1 -> a single edge
        let graph = build_graph(&correlate(&matrix), DEFAULT_THRESHOLD);
        let config = LayoutConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(spring_layout(&graph, &config, &mut rng).len(), 2);

        let empty = build_graph(&correlate(&matrix), 1.0);
        assert!(spring_layout(&empty, &config, &mut rng).is_empty());
    }
}
