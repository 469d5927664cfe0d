// ==============================================================================
// diffexpr.rs - Differential Expression Simulator
// ==============================================================================
// Description: Simulated per-feature log-fold-change and p-value table
// Created: 2026-10-14
// Modified: 2026-10-14
// Version: 1.0.0
// ==============================================================================
// NOTE: No inference is performed. Fold changes and p-values are random draws
// regardless of the input data; the table only drives the volcano plot.
// ==============================================================================

use rand::distributions::Distribution;
use rand::Rng;
use statrs::distribution::Normal;
use tracing::debug;

use crate::error::{OmicsError, Result};

/// Spread of the simulated log2 fold-change distribution
pub const LOG_FOLD_CHANGE_SD: f64 = 2.0;

/// Significance cutoff drawn as the volcano plot's horizontal line
pub const P_VALUE_THRESHOLD: f64 = 0.05;

/// Effect-size cutoff drawn as the volcano plot's vertical lines (±)
pub const LOG_FOLD_CHANGE_THRESHOLD: f64 = 1.0;

/// One simulated feature result
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeRow {
    pub log_fold_change: f64,
    /// In (0, 1]
    pub p_value: f64,
}

impl DeRow {
    pub fn neg_log10_p(&self) -> f64 {
        -self.p_value.log10()
    }

    /// Beyond both the effect-size and significance cutoffs
    pub fn is_significant(&self) -> bool {
        self.log_fold_change.abs() > LOG_FOLD_CHANGE_THRESHOLD && self.p_value < P_VALUE_THRESHOLD
    }
}

/// Differential expression table, one row per feature
#[derive(Debug, Clone, Default)]
pub struct DeTable {
    rows: Vec<DeRow>,
}

impl DeTable {
    pub fn rows(&self) -> &[DeRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn significant_count(&self) -> usize {
        self.rows.iter().filter(|row| row.is_significant()).count()
    }
}

/// Draw `feature_count` independent (log-fold-change, p-value) pairs
///
/// Log fold changes come from N(0, 2); p-values are uniform on (0, 1].
/// Output is only repeatable when `rng` is seeded.
pub fn simulate_de<R: Rng + ?Sized>(feature_count: usize, rng: &mut R) -> Result<DeTable> {
    let lfc = Normal::new(0.0, LOG_FOLD_CHANGE_SD)
        .map_err(|e| OmicsError::Distribution(e.to_string()))?;

    let log_fold_changes: Vec<f64> = (0..feature_count).map(|_| lfc.sample(rng)).collect();

    let rows: Vec<DeRow> = log_fold_changes
        .into_iter()
        .map(|log_fold_change| DeRow {
            log_fold_change,
            // gen::<f64>() is in [0, 1); flip it so zero is excluded
            p_value: 1.0 - rng.gen::<f64>(),
        })
        .collect();

    let table = DeTable { rows };
    debug!(
        "Simulated differential expression for {} features ({} significant)",
        feature_count,
        table.significant_count()
    );

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_row_count_and_p_value_bounds() {
        let mut rng = StdRng::seed_from_u64(2024);

        for count in [0, 1, 75, 1000] {
            let table = simulate_de(count, &mut rng).unwrap();
            assert_eq!(table.len(), count);
            for row in table.rows() {
                assert!(row.p_value > 0.0 && row.p_value <= 1.0);
                assert!(row.log_fold_change.is_finite());
                assert!(row.neg_log10_p() >= 0.0);
            }
        }
    }

    #[test]
    fn test_fold_change_spread() {
        let table = simulate_de(5000, &mut StdRng::seed_from_u64(8)).unwrap();
        let n = table.len() as f64;
        let mean = table.rows().iter().map(|r| r.log_fold_change).sum::<f64>() / n;
        let var = table
            .rows()
            .iter()
            .map(|r| (r.log_fold_change - mean).powi(2))
            .sum::<f64>()
            / n;

        assert!(mean.abs() < 0.2, "mean should be ~0, got {}", mean);
        assert!((var.sqrt() - 2.0).abs() < 0.2, "sd should be ~2, got {}", var.sqrt());
    }

    #[test]
    fn test_seeded_simulation_is_repeatable() {
        let a = simulate_de(20, &mut StdRng::seed_from_u64(1)).unwrap();
        let b = simulate_de(20, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(a.rows(), b.rows());
    }

    #[test]
    fn test_significance() {
        let hit = DeRow { log_fold_change: -1.5, p_value: 0.01 };
        let weak_effect = DeRow { log_fold_change: 0.5, p_value: 0.01 };
        let not_significant = DeRow { log_fold_change: 3.0, p_value: 0.2 };

        assert!(hit.is_significant());
        assert!(!weak_effect.is_significant());
        assert!(!not_significant.is_significant());
        assert!((DeRow { log_fold_change: 0.0, p_value: 0.01 }.neg_log10_p() - 2.0).abs() < 1e-12);
    }
}
