// ==============================================================================
// config.rs - Pipeline Configuration
// ==============================================================================
// Description: Results location, seeding, threshold and artifact table
// Created: 2026-10-14
// Modified: 2026-10-14
// Version: 1.0.0
// ==============================================================================

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{OmicsError, Result};
use crate::models::{ArtifactKind, ArtifactSpec, Modality};
use crate::network::DEFAULT_THRESHOLD;

/// Configuration for one pipeline run
///
/// Loadable from JSON; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Directory artifacts are written under
    pub results_dir: PathBuf,

    /// Seed for synthetic data, simulated DE values and network layout.
    /// `None` draws from OS entropy.
    pub seed: Option<u64>,

    /// |r| must be strictly above this for a graph edge
    pub correlation_threshold: f64,

    /// Ordered (modality, artifact kind) pairs to render
    pub artifacts: Vec<ArtifactSpec>,

    /// Write into `<results_dir>/<run_id>/` instead of `results_dir` itself
    pub isolate_runs: bool,

    /// Remove images in the output directory that the run did not produce
    pub prune_stale: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from("results"),
            seed: None,
            correlation_threshold: DEFAULT_THRESHOLD,
            artifacts: default_artifacts(),
            isolate_runs: false,
            prune_stale: true,
        }
    }
}

/// genomics → heatmap, metabolomics → heatmap, proteomics → volcano
pub fn default_artifacts() -> Vec<ArtifactSpec> {
    vec![
        ArtifactSpec::new(Modality::Genomics, ArtifactKind::Heatmap),
        ArtifactSpec::new(Modality::Metabolomics, ArtifactKind::Heatmap),
        ArtifactSpec::new(Modality::Proteomics, ArtifactKind::Volcano),
    ]
}

impl PipelineConfig {
    /// Load and validate a JSON configuration file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        debug!("Loading pipeline configuration from {:?}", path);
        let contents = std::fs::read_to_string(path)?;
        let config: PipelineConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Append an artifact unless the table already has it
    pub fn add_artifact(&mut self, spec: ArtifactSpec) {
        if !self.artifacts.contains(&spec) {
            self.artifacts.push(spec);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.correlation_threshold) {
            return Err(OmicsError::Config(format!(
                "correlation_threshold must be within [0, 1], got {}",
                self.correlation_threshold
            )));
        }

        if self.artifacts.is_empty() {
            return Err(OmicsError::Config("artifact table is empty".to_string()));
        }

        // Two entries with the same file name would overwrite each other
        for (i, spec) in self.artifacts.iter().enumerate() {
            if self.artifacts[..i].contains(spec) {
                return Err(OmicsError::Config(format!(
                    "artifact {} listed more than once",
                    spec.file_name()
                )));
            }
        }

        Ok(())
    }
}
