// ==============================================================================
// processor.rs - Pipeline Orchestrator
// ==============================================================================
// Description: Derives and renders every configured artifact into a manifest
// Created: 2026-10-14
// Modified: 2026-10-14
// Version: 1.0.0
// ==============================================================================

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::PipelineConfig;
use crate::correlation::correlate;
use crate::diffexpr::simulate_de;
use crate::error::{OmicsError, Result, RunError};
use crate::models::{ArtifactKind, ArtifactRecord, ArtifactSpec, Manifest};
use crate::network::build_graph;
use crate::render::{render, Figure};
use crate::results;
use crate::store::MatrixStore;

pub const SUCCESS_MESSAGE: &str = "Omics data processed successfully";

/// Seeded generator when `seed` is set, OS entropy otherwise
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

pub struct OmicsProcessor {
    config: PipelineConfig,
}

impl OmicsProcessor {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Directory the artifacts of run `run_id` are written to
    pub fn output_dir(&self, run_id: Uuid) -> PathBuf {
        if self.config.isolate_runs {
            self.config.results_dir.join(run_id.to_string())
        } else {
            self.config.results_dir.clone()
        }
    }

    /// Run the pipeline with randomness from the configured seed
    pub fn run(&self, store: &MatrixStore) -> std::result::Result<Manifest, RunError> {
        let mut rng = make_rng(self.config.seed);
        self.run_with_rng(store, &mut rng)
    }

    /// Render every artifact in table order
    ///
    /// Stops at the first failure; the error carries a manifest of the
    /// artifacts written before it.
    pub fn run_with_rng<R: Rng + ?Sized>(
        &self,
        store: &MatrixStore,
        rng: &mut R,
    ) -> std::result::Result<Manifest, RunError> {
        let mut manifest = Manifest::new(Uuid::new_v4());
        let output_dir = self.output_dir(manifest.run_id);

        info!(
            "Starting omics run {}: {} artifact(s) into {:?}",
            manifest.run_id,
            self.config.artifacts.len(),
            output_dir
        );

        if let Err(e) = std::fs::create_dir_all(&output_dir) {
            return Err(fail(manifest, OmicsError::Io(e)));
        }

        for spec in &self.config.artifacts {
            match self.render_artifact(spec, store, &output_dir, rng) {
                Ok(record) => manifest.push(record),
                Err(e) => return Err(fail(manifest, e)),
            }
        }

        if self.config.prune_stale {
            if let Err(e) = results::prune_stale(&output_dir, &manifest) {
                return Err(fail(manifest, e));
            }
        }

        manifest.message = SUCCESS_MESSAGE.to_string();
        info!(
            "Run {} complete: {} artifact(s) written",
            manifest.run_id,
            manifest.len()
        );
        Ok(manifest)
    }

    fn render_artifact<R: Rng + ?Sized>(
        &self,
        spec: &ArtifactSpec,
        store: &MatrixStore,
        output_dir: &Path,
        rng: &mut R,
    ) -> Result<ArtifactRecord> {
        let matrix = store.get(spec.modality)?;
        let title = spec.title();
        let file_name = spec.file_name();
        let path = output_dir.join(&file_name);

        debug!(
            "Deriving {} for {} ({} samples x {} features)",
            spec.kind.as_str(),
            spec.modality,
            matrix.n_samples(),
            matrix.n_features()
        );

        match spec.kind {
            ArtifactKind::Heatmap => {
                let correlation = correlate(matrix);
                render(Figure::Heatmap(&correlation), &title, &path, rng)?;
            }
            ArtifactKind::Volcano => {
                let table = simulate_de(matrix.n_features(), rng)?;
                render(Figure::Volcano(&table), &title, &path, rng)?;
            }
            ArtifactKind::Network => {
                let graph = build_graph(&correlate(matrix), self.config.correlation_threshold);
                info!(
                    "{} network: {} nodes, {} edges at |r| > {}",
                    spec.modality,
                    graph.node_count(),
                    graph.edge_count(),
                    graph.threshold()
                );
                render(Figure::Network(&graph), &title, &path, rng)?;
            }
        }

        let contents = std::fs::read(&path)?;
        Ok(ArtifactRecord {
            file_name,
            modality: spec.modality,
            kind: spec.kind,
            title,
            bytes: contents.len() as u64,
            sha256: format!("{:x}", Sha256::digest(&contents)),
        })
    }
}

fn fail(mut manifest: Manifest, source: OmicsError) -> RunError {
    warn!(
        "Run {} stopped after {} artifact(s): {}",
        manifest.run_id,
        manifest.len(),
        source
    );
    manifest.message = format!("Omics processing failed: {}", source);
    RunError { manifest, source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Modality, ModalityMatrix};
    use crate::store::Provenance;
    use tempfile::TempDir;

    fn config_in(dir: &Path) -> PipelineConfig {
        PipelineConfig {
            results_dir: dir.to_path_buf(),
            seed: Some(7),
            ..PipelineConfig::default()
        }
    }

    fn synthetic_store(seed: u64) -> MatrixStore {
        MatrixStore::synthetic(&mut StdRng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn test_full_run_writes_default_artifacts() {
        let dir = TempDir::new().unwrap();
        let processor = OmicsProcessor::new(config_in(dir.path())).unwrap();

        let manifest = processor.run(&synthetic_store(1)).unwrap();

        assert_eq!(manifest.message, SUCCESS_MESSAGE);
        assert_eq!(
            manifest.visualizations,
            vec![
                "genomics_heatmap.png",
                "metabolomics_heatmap.png",
                "proteomics_volcano.png"
            ]
        );
        for record in &manifest.artifacts {
            let path = dir.path().join(&record.file_name);
            let size = std::fs::metadata(&path).unwrap().len();
            assert!(size > 0);
            assert_eq!(size, record.bytes);
            assert_eq!(record.sha256.len(), 64);
        }
        assert_eq!(
            manifest.artifacts[2].title,
            "Proteomics Differential Expression Volcano Plot"
        );
    }

    #[test]
    fn test_rerun_overwrites_and_prunes() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("genomics_heatmap.png"), b"old").unwrap();
        std::fs::write(dir.path().join("genomics_volcano.png"), b"stale").unwrap();

        let processor = OmicsProcessor::new(config_in(dir.path())).unwrap();
        let first = processor.run(&synthetic_store(2)).unwrap();
        let second = processor.run(&synthetic_store(2)).unwrap();

        let listed = results::list_artifacts(dir.path()).unwrap();
        assert_eq!(listed, second.visualizations);
        assert!(!dir.path().join("genomics_volcano.png").exists());

        // Same seed, same inputs: identical images
        let hashes = |m: &Manifest| {
            m.artifacts
                .iter()
                .map(|a| a.sha256.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(hashes(&first), hashes(&second));
        assert_ne!(first.run_id, second.run_id);
    }

    #[test]
    fn test_partial_failure_keeps_completed_artifacts() {
        let dir = TempDir::new().unwrap();
        let mut store = MatrixStore::new();
        store.fill_synthetic(Modality::Genomics, &mut StdRng::seed_from_u64(3)).unwrap();

        let processor = OmicsProcessor::new(config_in(dir.path())).unwrap();
        let err = processor.run(&store).unwrap_err();

        assert!(matches!(err.source, OmicsError::MissingModality(Modality::Metabolomics)));
        assert_eq!(err.manifest.visualizations, vec!["genomics_heatmap.png"]);
        assert!(dir.path().join("genomics_heatmap.png").exists());
        assert!(!dir.path().join("metabolomics_heatmap.png").exists());
        assert_ne!(err.manifest.message, SUCCESS_MESSAGE);
    }

    #[test]
    fn test_unwritable_results_dir() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("results");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let processor = OmicsProcessor::new(config_in(&blocker)).unwrap();
        let err = processor.run(&synthetic_store(4)).unwrap_err();

        assert!(matches!(err.source, OmicsError::Io(_)));
        assert!(err.manifest.is_empty());
    }

    #[test]
    fn test_isolated_network_run() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(dir.path());
        config.isolate_runs = true;
        config.correlation_threshold = 0.3;
        config.artifacts = vec![ArtifactSpec::new(Modality::Proteomics, ArtifactKind::Network)];

        let processor = OmicsProcessor::new(config).unwrap();
        let manifest = processor.run(&synthetic_store(5)).unwrap();

        let run_dir = dir.path().join(manifest.run_id.to_string());
        assert_eq!(processor.output_dir(manifest.run_id), run_dir);
        assert_eq!(manifest.visualizations, vec!["proteomics_network.png"]);
        assert!(std::fs::metadata(run_dir.join("proteomics_network.png")).unwrap().len() > 0);
    }

    #[test]
    fn test_constant_matrix_renders_empty_outputs() {
        let dir = TempDir::new().unwrap();
        let features = vec!["G1".to_string(), "G2".to_string(), "G3".to_string()];
        let samples = (1..=4).map(|i| format!("samp{}", i)).collect();
        let rows = vec![vec![1.0, 0.5, -2.0]; 4];
        let matrix = ModalityMatrix::new(Modality::Genomics, samples, features, rows).unwrap();

        let mut store = MatrixStore::new();
        store.insert(matrix, Provenance::Synthetic);

        let mut config = config_in(dir.path());
        config.artifacts = vec![
            ArtifactSpec::new(Modality::Genomics, ArtifactKind::Heatmap),
            ArtifactSpec::new(Modality::Genomics, ArtifactKind::Network),
            ArtifactSpec::new(Modality::Genomics, ArtifactKind::Volcano),
        ];

        let manifest = OmicsProcessor::new(config).unwrap().run(&store).unwrap();
        assert_eq!(manifest.len(), 3);
        assert!(dir.path().join("genomics_network.png").exists());
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = PipelineConfig {
            correlation_threshold: -0.1,
            ..PipelineConfig::default()
        };
        assert!(OmicsProcessor::new(config).is_err());
    }
}
