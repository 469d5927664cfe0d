// ==============================================================================
// network.rs - Correlation Threshold Graph
// ==============================================================================
// Description: Undirected feature graph from strong pairwise correlations
// Created: 2026-10-14
// Modified: 2026-10-14
// Version: 1.0.0
// ==============================================================================

use petgraph::graph::{NodeIndex, UnGraph};
use tracing::debug;

use crate::correlation::CorrelationMatrix;

/// Strong correlation cutoff for graph edges
pub const DEFAULT_THRESHOLD: f64 = 0.7;

/// Features connected by |r| above a threshold
///
/// Nodes are only the features that take part in at least one edge, in the
/// correlation matrix's feature order. Edge weights are |r|.
#[derive(Debug, Clone)]
pub struct FeatureGraph {
    graph: UnGraph<String, f64>,
    threshold: f64,
}

impl FeatureGraph {
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn node_labels(&self) -> Vec<&str> {
        self.graph
            .node_indices()
            .map(|idx| self.graph[idx].as_str())
            .collect()
    }

    /// Edge endpoints as node positions (index into `node_labels`) with weight
    pub fn edge_indices(&self) -> Vec<(usize, usize, f64)> {
        self.graph
            .edge_indices()
            .filter_map(|edge| {
                let (a, b) = self.graph.edge_endpoints(edge)?;
                Some((a.index(), b.index(), self.graph[edge]))
            })
            .collect()
    }

    /// Edges as feature label pairs, lower matrix index first
    pub fn edges(&self) -> Vec<(&str, &str)> {
        self.edge_indices()
            .into_iter()
            .map(|(a, b, _)| {
                (
                    self.graph[NodeIndex::new(a)].as_str(),
                    self.graph[NodeIndex::new(b)].as_str(),
                )
            })
            .collect()
    }
}

/// Build the graph of feature pairs with |r| strictly above `threshold`
///
/// Undefined (NaN) correlations never exceed the threshold.
pub fn build_graph(correlation: &CorrelationMatrix, threshold: f64) -> FeatureGraph {
    let labels = correlation.labels();
    let n = correlation.size();

    let mut strong = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            let strength = correlation.get(i, j).abs();
            if strength > threshold {
                strong.push((i, j, strength));
            }
        }
    }

    let mut connected = vec![false; n];
    for &(i, j, _) in &strong {
        connected[i] = true;
        connected[j] = true;
    }

    // Nodes go in before any edge so node indices follow column order
    let mut graph = UnGraph::<String, f64>::with_capacity(n, strong.len());
    let mut node_for: Vec<Option<NodeIndex>> = vec![None; n];
    for (idx, _) in connected.iter().enumerate().filter(|(_, &c)| c) {
        node_for[idx] = Some(graph.add_node(labels[idx].clone()));
    }

    for (i, j, strength) in strong {
        if let (Some(a), Some(b)) = (node_for[i], node_for[j]) {
            graph.add_edge(a, b, strength);
        }
    }

    debug!(
        "Built correlation graph at |r| > {}: {} nodes, {} edges",
        threshold,
        graph.node_count(),
        graph.edge_count()
    );

    FeatureGraph { graph, threshold }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correlation::correlate;
    use crate::models::{Modality, ModalityMatrix};
    use crate::synthetic::{generate, ModalitySpec};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn matrix_from_columns(columns: &[Vec<f64>]) -> ModalityMatrix {
        let rows = (0..columns[0].len())
            .map(|r| columns.iter().map(|c| c[r]).collect())
            .collect();
        let features = (1..=columns.len()).map(|i| format!("F{}", i)).collect();
        let samples = (1..=columns[0].len()).map(|i| format!("s{}", i)).collect();
        ModalityMatrix::new(Modality::Genomics, samples, features, rows).unwrap()
    }

    fn edge_set(graph: &FeatureGraph) -> HashSet<(String, String)> {
        graph
            .edges()
            .into_iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect()
    }

    #[test]
    fn test_strong_pairs_only() {
        let matrix = matrix_from_columns(&[
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
            vec![2.1, 3.9, 6.2, 8.0, 9.8],  // ~ +F1
            vec![5.0, 4.1, 2.9, 2.2, 0.8],  // ~ -F1
            vec![1.0, -1.0, 1.0, -1.0, 1.0], // unrelated
        ]);
        let graph = build_graph(&correlate(&matrix), DEFAULT_THRESHOLD);

        assert_eq!(graph.node_labels(), vec!["F1", "F2", "F3"]);
        assert_eq!(graph.edge_count(), 3);
        assert!(edge_set(&graph).contains(&("F1".to_string(), "F3".to_string())));
        assert!(graph.edge_indices().iter().all(|(_, _, w)| *w > DEFAULT_THRESHOLD));
    }

    #[test]
    fn test_nodes_follow_column_order() {
        let a = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let b = vec![1.0, -1.0, 1.0, -1.0, 1.0];
        let matrix = matrix_from_columns(&[
            a.clone(),
            b.clone(),
            b.iter().map(|v| v * 2.0).collect(),
            a.iter().map(|v| v * 3.0).collect(),
        ]);
        let graph = build_graph(&correlate(&matrix), DEFAULT_THRESHOLD);

        // The F1-F4 edge is found before F2 or F3 joins the graph
        assert_eq!(graph.node_labels(), vec!["F1", "F2", "F3", "F4"]);
        assert_eq!(graph.edges(), vec![("F1", "F4"), ("F2", "F3")]);
        assert_eq!(graph.edge_indices()[0].0, 0);
        assert_eq!(graph.edge_indices()[0].1, 3);
    }

    #[test]
    fn test_no_self_loops_or_duplicates() {
        let matrix = generate(
            &ModalitySpec::for_modality(Modality::Genomics),
            &mut StdRng::seed_from_u64(17),
        )
        .unwrap();
        let graph = build_graph(&correlate(&matrix), 0.3);

        let mut seen = HashSet::new();
        for (a, b) in graph.edges() {
            assert_ne!(a, b);
            let key = if a < b { (a, b) } else { (b, a) };
            assert!(seen.insert(key), "duplicate edge {:?}", key);
        }
    }

    #[test]
    fn test_threshold_monotonic() {
        let matrix = generate(
            &ModalitySpec::for_modality(Modality::Proteomics),
            &mut StdRng::seed_from_u64(23),
        )
        .unwrap();
        let corr = correlate(&matrix);

        let loose = edge_set(&build_graph(&corr, 0.2));
        let medium = edge_set(&build_graph(&corr, 0.5));
        let strict = edge_set(&build_graph(&corr, 0.9));

        assert!(medium.is_subset(&loose));
        assert!(strict.is_subset(&medium));
    }

    #[test]
    fn test_constant_features_yield_empty_graph() {
        let matrix = matrix_from_columns(&[vec![2.0; 6], vec![2.0; 6], vec![-1.0; 6]]);
        let graph = build_graph(&correlate(&matrix), DEFAULT_THRESHOLD);

        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_weak_correlations_yield_empty_graph() {
        let matrix = matrix_from_columns(&[
            vec![1.0, 2.0, 3.0, 4.0],
            vec![1.0, -1.0, -1.0, 1.0],
        ]);
        let graph = build_graph(&correlate(&matrix), DEFAULT_THRESHOLD);

        assert_eq!(graph.node_count(), 0);
        assert!(graph.node_labels().is_empty());
    }

    #[test]
    fn test_threshold_is_strict() {
        // r = 0.8 exactly
        let matrix = matrix_from_columns(&[
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
            vec![2.0, 1.0, 4.0, 3.0, 5.0],
        ]);
        let corr = correlate(&matrix);
        let r = corr.get(0, 1);

        assert_eq!(build_graph(&corr, r).edge_count(), 0);
        assert_eq!(build_graph(&corr, r - 1e-9).edge_count(), 1);
    }
}
