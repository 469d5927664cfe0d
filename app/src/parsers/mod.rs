// ==============================================================================
// parsers/mod.rs - File parser modules
// ==============================================================================
// Description: Parsers for uploaded omics matrix files
// Created: 2026-10-14
// Modified: 2026-10-14
// Version: 1.0.0
// ==============================================================================

pub mod matrix;

pub use matrix::{MatrixParseError, MatrixParser};
