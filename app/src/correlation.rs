// ==============================================================================
// correlation.rs - Feature Correlation Engine
// ==============================================================================
// Description: Pairwise Pearson correlation across a modality's features
// Created: 2026-10-14
// Modified: 2026-10-14
// Version: 1.0.0
// ==============================================================================

use tracing::debug;

use crate::models::ModalityMatrix;

/// Square, symmetric feature × feature correlation matrix
///
/// Entries involving a zero-variance feature are `NaN` (undefined), and that
/// includes the feature's own diagonal cell. Every other diagonal cell is
/// exactly 1.0.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    labels: Vec<String>,
    /// Flat storage (row-major, n×n)
    data: Vec<f64>,
}

impl CorrelationMatrix {
    pub fn size(&self) -> usize {
        self.labels.len()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.labels.len() + j]
    }

    /// Whether the entry is a defined correlation
    pub fn is_defined(&self, i: usize, j: usize) -> bool {
        !self.get(i, j).is_nan()
    }

    /// Row of correlations for feature `i`
    pub fn row(&self, i: usize) -> &[f64] {
        let n = self.labels.len();
        &self.data[i * n..(i + 1) * n]
    }

    /// Number of zero-variance features (undefined diagonal)
    pub fn undefined_features(&self) -> usize {
        (0..self.size()).filter(|&i| !self.is_defined(i, i)).count()
    }
}

/// Centered observations and their sum of squares for one feature
struct CenteredColumn {
    deviations: Vec<f64>,
    sum_sq: f64,
}

impl CenteredColumn {
    fn new(values: Vec<f64>) -> Self {
        // Exact check: the mean of a constant column can round away from
        // the value, leaving spurious non-zero deviations
        if values.windows(2).all(|w| w[0] == w[1]) {
            return Self {
                deviations: vec![0.0; values.len()],
                sum_sq: 0.0,
            };
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;

        let deviations: Vec<f64> = values.into_iter().map(|v| v - mean).collect();
        let sum_sq = deviations.iter().map(|d| d * d).sum();

        Self { deviations, sum_sq }
    }

    fn has_variance(&self) -> bool {
        self.sum_sq > 0.0
    }
}

/// Pearson correlation between two centered columns, `NaN` when undefined
fn pearson(x: &CenteredColumn, y: &CenteredColumn) -> f64 {
    if !x.has_variance() || !y.has_variance() {
        return f64::NAN;
    }

    let cov: f64 = x
        .deviations
        .iter()
        .zip(y.deviations.iter())
        .map(|(dx, dy)| dx * dy)
        .sum();

    (cov / (x.sum_sq * y.sum_sq).sqrt()).clamp(-1.0, 1.0)
}

/// Compute the feature × feature Pearson correlation matrix
///
/// Only the upper triangle is computed; the lower triangle is mirrored so
/// the result is symmetric by construction.
pub fn correlate(matrix: &ModalityMatrix) -> CorrelationMatrix {
    let n = matrix.n_features();
    let columns: Vec<CenteredColumn> = (0..n)
        .map(|j| CenteredColumn::new(matrix.column(j)))
        .collect();

    let mut data = vec![0.0; n * n];
    for i in 0..n {
        data[i * n + i] = if columns[i].has_variance() { 1.0 } else { f64::NAN };

        for j in (i + 1)..n {
            let r = pearson(&columns[i], &columns[j]);
            data[i * n + j] = r;
            data[j * n + i] = r;
        }
    }

    let result = CorrelationMatrix {
        labels: matrix.features().to_vec(),
        data,
    };

    debug!(
        "Correlated {} {} features ({} zero-variance)",
        n,
        matrix.modality(),
        result.undefined_features()
    );

    result
}
