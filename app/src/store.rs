// ==============================================================================
// store.rs - Matrix Store
// ==============================================================================
// Description: Named collection of modality matrices for one pipeline run
// Created: 2026-10-14
// Modified: 2026-10-14
// Version: 1.0.0
// ==============================================================================

use rand::Rng;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

use crate::error::{OmicsError, Result};
use crate::models::{Modality, ModalityMatrix};
use crate::parsers::{MatrixParseError, MatrixParser};
use crate::synthetic::{self, ModalitySpec};

/// Where a stored matrix came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provenance {
    Synthetic,
    Uploaded(String),
}

/// In-memory matrices keyed by modality
///
/// Matrices are immutable once inserted; the store only hands out shared
/// references to them.
#[derive(Debug, Default)]
pub struct MatrixStore {
    matrices: BTreeMap<Modality, (ModalityMatrix, Provenance)>,
}

impl MatrixStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding freshly generated matrices for every modality
    pub fn synthetic<R: Rng + ?Sized>(rng: &mut R) -> Result<Self> {
        let mut store = Self::new();
        for modality in Modality::ALL {
            store.fill_synthetic(modality, rng)?;
        }
        Ok(store)
    }

    /// Generate and insert a synthetic matrix for one modality
    pub fn fill_synthetic<R: Rng + ?Sized>(
        &mut self,
        modality: Modality,
        rng: &mut R,
    ) -> Result<()> {
        let matrix = synthetic::generate(&ModalitySpec::for_modality(modality), rng)?;
        self.insert(matrix, Provenance::Synthetic);
        Ok(())
    }

    /// Parse an uploaded CSV and insert it under `modality`
    ///
    /// Values that parse but break a matrix invariant surface as
    /// `InvalidMatrix`, the same as any other matrix.
    pub fn load_csv(&mut self, modality: Modality, path: &Path) -> Result<()> {
        let matrix = MatrixParser::parse(path, modality).map_err(|e| match e {
            MatrixParseError::Matrix(inner) => *inner,
            other => OmicsError::Parse(other),
        })?;
        info!(
            "Loaded {} matrix from {:?}: {} samples x {} features",
            modality,
            path,
            matrix.n_samples(),
            matrix.n_features()
        );
        self.insert(matrix, Provenance::Uploaded(path.display().to_string()));
        Ok(())
    }

    /// Insert (or replace) the matrix for its modality
    pub fn insert(&mut self, matrix: ModalityMatrix, provenance: Provenance) {
        self.matrices.insert(matrix.modality(), (matrix, provenance));
    }

    pub fn get(&self, modality: Modality) -> Result<&ModalityMatrix> {
        self.matrices
            .get(&modality)
            .map(|(matrix, _)| matrix)
            .ok_or(OmicsError::MissingModality(modality))
    }

    pub fn provenance(&self, modality: Modality) -> Option<&Provenance> {
        self.matrices.get(&modality).map(|(_, provenance)| provenance)
    }

    pub fn modalities(&self) -> impl Iterator<Item = Modality> + '_ {
        self.matrices.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }
}
