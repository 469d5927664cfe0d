// ==============================================================================
// matrix.rs - Wide-Form Omics Matrix Parser
// ==============================================================================
// Description: Parses sample x feature CSV uploads into modality matrices
// Created: 2026-10-14
// Modified: 2026-10-14
// Version: 1.0.0
// ==============================================================================
// Format: CSV file with header, one sample per row, optionally gzip-compressed
// Example:
//   sample,Gene_1,Gene_2,Gene_3
//   samp1,0.365,-0.300,1.020
//   samp2,0.118,0.742,-0.551
// The sample column is optional; without it samples are numbered samp1..sampN.
// ==============================================================================

use csv::{ReaderBuilder, StringRecord, Trim};
use flate2::read::GzDecoder;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;

use crate::error::OmicsError;
use crate::models::{Modality, ModalityMatrix};

/// Header names recognised as a sample identifier column
const SAMPLE_COLUMN_NAMES: [&str; 4] = ["sample", "sample_id", "id", ""];

/// Errors that can occur during matrix file parsing
#[derive(Error, Debug)]
pub enum MatrixParseError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("File is empty or contains no header")]
    EmptyFile,

    #[error("Header contains no feature columns")]
    NoFeatures,

    #[error("File contains no sample rows")]
    NoSamples,

    #[error("Duplicate feature label: {0}")]
    DuplicateFeature(String),

    #[error("Row {row} has {found} fields, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Parsed cleanly but the values break a matrix invariant
    #[error(transparent)]
    Matrix(#[from] Box<OmicsError>),
}

/// Wide-form matrix parser
pub struct MatrixParser;

impl MatrixParser {
    /// Parse a matrix from a `.csv` or `.csv.gz` file
    pub fn parse(
        path: impl AsRef<Path>,
        modality: Modality,
    ) -> Result<ModalityMatrix, MatrixParseError> {
        let path = path.as_ref();
        let file = File::open(path)?;

        let is_gzip = path
            .file_name()
            .map(|name| name.to_string_lossy().to_lowercase().ends_with(".gz"))
            .unwrap_or(false);

        if is_gzip {
            Self::parse_reader(GzDecoder::new(BufReader::new(file)), modality)
        } else {
            Self::parse_reader(BufReader::new(file), modality)
        }
    }

    /// Parse a matrix from any CSV byte stream
    pub fn parse_reader<R: Read>(
        reader: R,
        modality: Modality,
    ) -> Result<ModalityMatrix, MatrixParseError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Err(MatrixParseError::EmptyFile);
        }

        let first_col = clean_field(headers.get(0).unwrap_or_default()).to_lowercase();
        let has_sample_column = SAMPLE_COLUMN_NAMES.contains(&first_col.as_str());
        let skip = usize::from(has_sample_column);

        let features = Self::feature_labels(&headers, skip)?;

        let mut sample_ids = Vec::new();
        let mut rows = Vec::new();

        for (row_idx, result) in reader.records().enumerate() {
            let record = result?;

            if record.len() != headers.len() {
                return Err(MatrixParseError::RaggedRow {
                    row: row_idx + 1,
                    found: record.len(),
                    expected: headers.len(),
                });
            }

            let sample_id = if has_sample_column {
                clean_field(record.get(0).unwrap_or_default()).to_string()
            } else {
                format!("samp{}", row_idx + 1)
            };

            let mut row = Vec::with_capacity(features.len());
            for (col_idx, value_str) in record.iter().skip(skip).enumerate() {
                let value: f64 = clean_field(value_str).parse().map_err(|e| {
                    MatrixParseError::InvalidValue(format!(
                        "Failed to parse value '{}' at row {}, feature '{}': {}",
                        value_str,
                        row_idx + 1,
                        features[col_idx],
                        e
                    ))
                })?;
                row.push(value);
            }

            sample_ids.push(sample_id);
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(MatrixParseError::NoSamples);
        }

        // Finiteness is checked once, by the matrix itself
        let matrix = ModalityMatrix::new(modality, sample_ids, features, rows).map_err(Box::new)?;
        Ok(matrix)
    }

    fn feature_labels(
        headers: &StringRecord,
        skip: usize,
    ) -> Result<Vec<String>, MatrixParseError> {
        let features: Vec<String> = headers
            .iter()
            .skip(skip)
            .map(|h| clean_field(h).to_string())
            .collect();

        if features.is_empty() {
            return Err(MatrixParseError::NoFeatures);
        }

        let mut seen = HashSet::with_capacity(features.len());
        for label in &features {
            if label.is_empty() {
                return Err(MatrixParseError::InvalidValue(
                    "Empty feature label in header".to_string(),
                ));
            }
            if !seen.insert(label.as_str()) {
                return Err(MatrixParseError::DuplicateFeature(label.clone()));
            }
        }

        Ok(features)
    }
}

fn clean_field(field: &str) -> &str {
    field.trim().trim_matches('"')
}
