// ==============================================================================
// validator.rs - Input File Validation
// ==============================================================================
// Description: Validates uploaded omics matrix files (size, type, format)
// Created: 2026-10-14
// Modified: 2026-10-14
// Version: 1.0.0
// Security: Allowlist-only file types, magic number verification
// ==============================================================================

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

const MAX_FILE_SIZE: usize = 100 * 1024 * 1024; // 100 MB

#[derive(Debug, Serialize)]
pub struct ValidatedFile {
    pub original_name: String,
    pub safe_name: String,
    pub extension: String,
    pub size: u64,
    pub column_count: usize,
    pub hash_sha256: String,
    pub validated_at: chrono::DateTime<chrono::Utc>,
}

pub struct FileValidator {
    max_file_size: usize,
    allowed_types: HashMap<String, Vec<u8>>,
}

impl FileValidator {
    pub fn new() -> Self {
        let mut allowed_types = HashMap::new();

        // Plain CSV (no magic number)
        allowed_types.insert("csv".to_string(), vec![]);

        // Gzip compressed CSV
        allowed_types.insert("csv.gz".to_string(), vec![0x1f, 0x8b, 0x08]);

        Self {
            max_file_size: MAX_FILE_SIZE,
            allowed_types,
        }
    }

    /// Override the size limit (bytes)
    pub fn with_max_file_size(mut self, max_file_size: usize) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    pub fn validate_upload(&self, file_path: &Path) -> Result<ValidatedFile> {
        let file_name = file_path
            .file_name()
            .ok_or_else(|| anyhow::anyhow!("Invalid file path"))?
            .to_string_lossy()
            .to_string();

        info!("Validating file: {}", file_name);

        // 1. Size check
        let metadata = std::fs::metadata(file_path)
            .context("Failed to get file metadata")?;
        let size = metadata.len() as usize;

        if size == 0 {
            anyhow::bail!("File is empty");
        }
        if size > self.max_file_size {
            anyhow::bail!(
                "File too large: {} bytes (max: {} bytes)",
                size,
                self.max_file_size
            );
        }
        debug!("Size check passed: {} bytes", size);

        // 2. Filename sanitization
        let safe_name = self.sanitize_filename(&file_name)?;
        debug!("Sanitized filename: {}", safe_name);

        // 3. Extension check (allowlist)
        let ext = self.get_extension(&safe_name)?;
        if !self.allowed_types.contains_key(&ext) {
            anyhow::bail!("Invalid file type: {}", ext);
        }
        debug!("Extension check passed: {}", ext);

        // 4. Magic number verification
        if let Some(expected_magic) = self.allowed_types.get(&ext) {
            if !expected_magic.is_empty() {
                let actual_magic = self.read_magic_number(file_path)?;
                if !self.verify_magic_number(expected_magic, &actual_magic) {
                    anyhow::bail!("Magic number mismatch for .{} file", ext);
                }
                debug!("Magic number check passed");
            }
        }

        // 5. Content validation (header row)
        let column_count = self.validate_content(file_path, &ext)?;
        debug!("Content validation passed: {} columns", column_count);

        // 6. Compute SHA-256 hash
        let hash = compute_sha256(file_path)?;
        debug!("SHA-256: {}", hash);

        Ok(ValidatedFile {
            original_name: file_name,
            safe_name,
            extension: ext,
            size: metadata.len(),
            column_count,
            hash_sha256: hash,
            validated_at: chrono::Utc::now(),
        })
    }

    fn sanitize_filename(&self, name: &str) -> Result<String> {
        // Remove path separators, null bytes, control characters
        let safe = name
            .replace(['/', '\\', '\0'], "_")
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '.' || *c == '-')
            .collect::<String>();

        // Limit length to 255 characters
        let truncated: String = safe.chars().take(255).collect();

        if truncated.is_empty() {
            anyhow::bail!("Invalid filename after sanitization");
        }

        Ok(truncated)
    }

    fn get_extension(&self, filename: &str) -> Result<String> {
        let lower = filename.to_lowercase();

        // Handle compound extension
        if lower.ends_with(".csv.gz") {
            return Ok("csv.gz".to_string());
        }

        if !lower.contains('.') {
            anyhow::bail!("No file extension found");
        }

        lower
            .rsplit('.')
            .next()
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("No file extension found"))
    }

    fn read_magic_number(&self, path: &Path) -> Result<Vec<u8>> {
        let mut file = File::open(path)?;
        let mut buffer = vec![0u8; 4];
        file.read_exact(&mut buffer)?;
        Ok(buffer)
    }

    fn verify_magic_number(&self, expected: &[u8], actual: &[u8]) -> bool {
        expected.len() <= actual.len()
            && expected.iter().zip(actual.iter()).all(|(e, a)| e == a)
    }

    fn validate_content(&self, path: &Path, ext: &str) -> Result<usize> {
        let file = File::open(path)?;
        let reader: Box<dyn BufRead> = match ext {
            "csv.gz" => Box::new(BufReader::new(GzDecoder::new(file))),
            _ => Box::new(BufReader::new(file)),
        };

        // First non-blank line is the header
        for line in reader.lines() {
            let line = line.context("Unable to read the CSV file")?;
            if line.trim().is_empty() {
                continue;
            }
            let columns = line.split(',').filter(|c| !c.trim().is_empty()).count();
            if columns == 0 {
                anyhow::bail!("Invalid CSV structure: header has no columns");
            }
            return Ok(columns);
        }

        anyhow::bail!("The uploaded CSV file is empty")
    }
}

impl Default for FileValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Hex SHA-256 digest of a file's contents
pub fn compute_sha256(path: &Path) -> Result<String> {
    let mut file = File::open(path)
        .with_context(|| format!("Failed to open {:?} for hashing", path))?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}
