// ==============================================================================
// error.rs - Pipeline Error Taxonomy
// ==============================================================================
// Description: Input-shape, derivation and render/IO errors for the pipeline
// Created: 2026-10-14
// Modified: 2026-10-14
// Version: 1.0.0
// ==============================================================================

use std::path::PathBuf;
use thiserror::Error;

use crate::models::{Manifest, Modality};
use crate::parsers::MatrixParseError;

/// Errors raised by the omics pipeline core
#[derive(Error, Debug)]
pub enum OmicsError {
    /// A matrix violates a shape invariant (labels, finiteness, dimensions)
    #[error("Invalid {modality} matrix: {reason}")]
    InvalidMatrix { modality: Modality, reason: String },

    /// The artifact table names a modality the store does not hold
    #[error("No {0} matrix loaded")]
    MissingModality(Modality),

    /// Failed to read or parse an uploaded matrix
    #[error("Matrix parse error: {0}")]
    Parse(#[from] MatrixParseError),

    /// Failed to construct a sampling distribution
    #[error("Distribution error: {0}")]
    Distribution(String),

    /// Drawing or encoding an image failed
    #[error("Failed to render {path}: {reason}")]
    Render { path: PathBuf, reason: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
}

/// A failed pipeline run, carrying the artifacts written before the failure
#[derive(Error, Debug)]
#[error("Pipeline run failed after {} artifact(s): {source}", .manifest.visualizations.len())]
pub struct RunError {
    /// Partial manifest (only artifacts fully written)
    pub manifest: Manifest,
    #[source]
    pub source: OmicsError,
}

pub type Result<T> = std::result::Result<T, OmicsError>;
