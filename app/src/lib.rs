// ==============================================================================
// lib.rs - Omics Pipeline Library
// ==============================================================================
// Description: Library interface for the multi-omics visualization pipeline
// Created: 2026-10-14
// Modified: 2026-10-14
// Version: 1.0.0
// ==============================================================================

pub mod config;
pub mod correlation;
pub mod diffexpr;
pub mod error;
pub mod layout;
pub mod models;
pub mod network;
pub mod parsers;
pub mod processor;
pub mod render;
pub mod results;
pub mod store;
pub mod synthetic;
pub mod validator;

pub use config::PipelineConfig;
pub use error::{OmicsError, Result, RunError};
pub use models::{ArtifactKind, ArtifactSpec, Manifest, Modality, ModalityMatrix};
pub use processor::OmicsProcessor;
pub use store::MatrixStore;
