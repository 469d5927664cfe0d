// ==============================================================================
// models.rs - Omics Data Models
// ==============================================================================
// Description: Modality matrices, artifact table entries and run manifests
// Created: 2026-10-14
// Modified: 2026-10-14
// Version: 1.0.0
// ==============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{OmicsError, Result};

/// Omics data type
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Genomics,
    Metabolomics,
    Proteomics,
}

impl Modality {
    pub const ALL: [Modality; 3] = [
        Modality::Genomics,
        Modality::Metabolomics,
        Modality::Proteomics,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Modality::Genomics => "genomics",
            Modality::Metabolomics => "metabolomics",
            Modality::Proteomics => "proteomics",
        }
    }

    /// Capitalised name used in artifact titles
    pub fn display_name(&self) -> &'static str {
        match self {
            Modality::Genomics => "Genomics",
            Modality::Metabolomics => "Metabolomics",
            Modality::Proteomics => "Proteomics",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Modality {
    type Err = OmicsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "genomics" => Ok(Modality::Genomics),
            "metabolomics" => Ok(Modality::Metabolomics),
            "proteomics" => Ok(Modality::Proteomics),
            other => Err(OmicsError::Config(format!("Unknown modality '{}'", other))),
        }
    }
}

/// Sample × feature matrix for one modality
///
/// Values are stored row-major (one row per sample). Construction enforces
/// unique feature labels, finite values and a consistent row width, so every
/// downstream stage can rely on those invariants.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalityMatrix {
    modality: Modality,
    sample_ids: Vec<String>,
    features: Vec<String>,
    values: Vec<f64>,
}

impl ModalityMatrix {
    pub fn new(
        modality: Modality,
        sample_ids: Vec<String>,
        features: Vec<String>,
        rows: Vec<Vec<f64>>,
    ) -> Result<Self> {
        let invalid = |reason: String| OmicsError::InvalidMatrix { modality, reason };

        if features.is_empty() {
            return Err(invalid("matrix has no features".to_string()));
        }
        if rows.is_empty() {
            return Err(invalid("matrix has no samples".to_string()));
        }
        if sample_ids.len() != rows.len() {
            return Err(invalid(format!(
                "{} sample ids for {} rows",
                sample_ids.len(),
                rows.len()
            )));
        }

        let mut seen = HashSet::with_capacity(features.len());
        for label in &features {
            if !seen.insert(label.as_str()) {
                return Err(invalid(format!("duplicate feature label '{}'", label)));
            }
        }

        let mut values = Vec::with_capacity(rows.len() * features.len());
        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != features.len() {
                return Err(invalid(format!(
                    "row {} has {} values, expected {}",
                    row_idx + 1,
                    row.len(),
                    features.len()
                )));
            }
            if let Some(col_idx) = row.iter().position(|v| !v.is_finite()) {
                return Err(invalid(format!(
                    "non-finite value at row {}, feature '{}'",
                    row_idx + 1,
                    features[col_idx]
                )));
            }
            values.extend(row);
        }

        Ok(Self {
            modality,
            sample_ids,
            features,
            values,
        })
    }

    pub fn modality(&self) -> Modality {
        self.modality
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn sample_ids(&self) -> &[String] {
        &self.sample_ids
    }

    pub fn n_samples(&self) -> usize {
        self.sample_ids.len()
    }

    pub fn n_features(&self) -> usize {
        self.features.len()
    }

    pub fn value(&self, sample: usize, feature: usize) -> f64 {
        self.values[sample * self.features.len() + feature]
    }

    /// Observations of one feature across all samples
    pub fn column(&self, feature: usize) -> Vec<f64> {
        (0..self.n_samples())
            .map(|sample| self.value(sample, feature))
            .collect()
    }
}

/// Kind of rendered artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// Feature × feature correlation heatmap
    Heatmap,
    /// Simulated differential-expression volcano plot
    Volcano,
    /// Correlation threshold network diagram
    Network,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Heatmap => "heatmap",
            ArtifactKind::Volcano => "volcano",
            ArtifactKind::Network => "network",
        }
    }
}

impl FromStr for ArtifactKind {
    type Err = OmicsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "heatmap" => Ok(ArtifactKind::Heatmap),
            "volcano" => Ok(ArtifactKind::Volcano),
            "network" => Ok(ArtifactKind::Network),
            other => Err(OmicsError::Config(format!("Unknown artifact kind '{}'", other))),
        }
    }
}

/// One (modality, artifact kind) entry of the pipeline's artifact table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactSpec {
    pub modality: Modality,
    pub kind: ArtifactKind,
}

impl ArtifactSpec {
    pub fn new(modality: Modality, kind: ArtifactKind) -> Self {
        Self { modality, kind }
    }

    /// Deterministic file name, e.g. `genomics_heatmap.png`
    pub fn file_name(&self) -> String {
        format!("{}_{}.png", self.modality.as_str(), self.kind.as_str())
    }

    pub fn title(&self) -> String {
        let name = self.modality.display_name();
        match self.kind {
            ArtifactKind::Heatmap => format!("{} Data Correlation Heatmap", name),
            ArtifactKind::Volcano => format!("{} Differential Expression Volcano Plot", name),
            ArtifactKind::Network => format!("{} Correlation Network", name),
        }
    }
}

/// Details of one artifact written by a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactRecord {
    pub file_name: String,
    pub modality: Modality,
    pub kind: ArtifactKind,
    pub title: String,
    pub bytes: u64,
    pub sha256: String,
}

/// Ordered list of artifacts produced by one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub message: String,

    /// Artifact file names relative to the results directory, in render order
    pub visualizations: Vec<String>,

    pub artifacts: Vec<ArtifactRecord>,
}

impl Manifest {
    pub fn new(run_id: Uuid) -> Self {
        Self {
            run_id,
            generated_at: Utc::now(),
            message: String::new(),
            visualizations: Vec::new(),
            artifacts: Vec::new(),
        }
    }

    pub fn push(&mut self, record: ArtifactRecord) {
        self.visualizations.push(record.file_name.clone());
        self.artifacts.push(record);
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.visualizations.iter().any(|name| name == file_name)
    }

    pub fn len(&self) -> usize {
        self.visualizations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visualizations.is_empty()
    }
}
