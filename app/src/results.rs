// ==============================================================================
// results.rs - Results Directory Management
// ==============================================================================
// Description: Listing, archiving and pruning of rendered artifacts
// Created: 2026-10-14
// Modified: 2026-10-14
// Version: 1.0.0
// ==============================================================================

use std::fs::File;
use std::io;
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::error::Result;
use crate::models::Manifest;

/// Default archive file name inside the results directory
pub const ARCHIVE_NAME: &str = "omics_results.zip";

/// File extensions treated as rendered artifacts
const IMAGE_EXTENSIONS: [&str; 3] = ["png", "svg", "jpg"];

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
        .unwrap_or(false)
}

/// Path of `path` relative to `root`, with `/` separators
fn relative_name(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Option<Vec<&str>> = relative.components().map(|c| c.as_os_str().to_str()).collect();
    Some(parts?.join("/"))
}

/// Sorted image paths under `dir`, relative to it
///
/// Artifacts from isolated runs show up as `<run_id>/<file>`. A missing
/// directory has no artifacts.
pub fn list_artifacts(dir: &Path) -> Result<Vec<String>> {
    if !dir.exists() {
        debug!("Results directory {:?} does not exist", dir);
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_file() && is_image(entry.path()) {
            if let Some(name) = relative_name(dir, entry.path()) {
                names.push(name);
            }
        }
    }

    names.sort();
    debug!("Found {} artifact(s) in {:?}", names.len(), dir);
    Ok(names)
}

/// Write every artifact under `dir` into a zip at `zip_path`
///
/// Entries use the names from [`list_artifacts`] and are stored without
/// compression (PNG data is already compressed). Returns the entry count.
pub fn package_archive(dir: &Path, zip_path: &Path) -> Result<usize> {
    info!("Creating results archive: {:?}", zip_path);

    // Listed before the archive is created, so it never contains itself
    let names = list_artifacts(dir)?;

    let mut zip = ZipWriter::new(File::create(zip_path)?);
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

    for name in &names {
        let source = dir.join(name);
        if source == zip_path {
            continue;
        }

        debug!("Adding to archive: {}", name);
        zip.start_file(name.as_str(), options)?;
        let mut file = File::open(&source)?;
        io::copy(&mut file, &mut zip)?;
    }

    zip.finish()?;
    info!("Archive created with {} file(s)", names.len());
    Ok(names.len())
}

/// Delete images directly inside `dir` that `manifest` does not list
///
/// Subdirectories (isolated runs) are left alone. Returns the number of
/// files removed.
pub fn prune_stale(dir: &Path, manifest: &Manifest) -> Result<usize> {
    let mut removed = 0;

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_file() || !is_image(entry.path()) {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if !manifest.contains(&name) {
            debug!("Removing stale artifact {:?}", entry.path());
            std::fs::remove_file(entry.path())?;
            removed += 1;
        }
    }

    if removed > 0 {
        info!("Pruned {} stale artifact(s) from {:?}", removed, dir);
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArtifactKind, ArtifactRecord, Modality};
    use std::io::Read;
    use tempfile::TempDir;
    use uuid::Uuid;

    fn touch(dir: &Path, name: &str) {
        if let Some(parent) = dir.join(name).parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(dir.join(name), name.as_bytes()).unwrap();
    }

    fn manifest_of(names: &[&str]) -> Manifest {
        let mut manifest = Manifest::new(Uuid::new_v4());
        for name in names {
            manifest.push(ArtifactRecord {
                file_name: name.to_string(),
                modality: Modality::Genomics,
                kind: ArtifactKind::Heatmap,
                title: String::new(),
                bytes: 0,
                sha256: String::new(),
            });
        }
        manifest
    }

    #[test]
    fn test_list_images_only() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "proteomics_volcano.png");
        touch(dir.path(), "genomics_heatmap.png");
        touch(dir.path(), "figure.SVG");
        touch(dir.path(), "photo.jpg");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "run1/metabolomics_heatmap.png");

        let names = list_artifacts(dir.path()).unwrap();
        assert_eq!(
            names,
            vec![
                "figure.SVG",
                "genomics_heatmap.png",
                "photo.jpg",
                "proteomics_volcano.png",
                "run1/metabolomics_heatmap.png",
            ]
        );
    }

    #[test]
    fn test_list_missing_directory() {
        let dir = TempDir::new().unwrap();
        assert!(list_artifacts(&dir.path().join("absent")).unwrap().is_empty());
    }

    #[test]
    fn test_package_archive() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "genomics_heatmap.png");
        touch(dir.path(), "proteomics_volcano.png");
        touch(dir.path(), "readme.txt");

        let zip_path = dir.path().join(ARCHIVE_NAME);
        assert_eq!(package_archive(dir.path(), &zip_path).unwrap(), 2);

        // Re-packaging replaces the archive and never includes it
        assert_eq!(package_archive(dir.path(), &zip_path).unwrap(), 2);

        let mut archive = zip::ZipArchive::new(File::open(&zip_path).unwrap()).unwrap();
        assert_eq!(archive.len(), 2);

        let mut entry = archive.by_name("genomics_heatmap.png").unwrap();
        assert_eq!(entry.compression(), zip::CompressionMethod::Stored);
        let mut contents = String::new();
        entry.read_to_string(&mut contents).unwrap();
        assert_eq!(contents, "genomics_heatmap.png");
    }

    #[test]
    fn test_prune_stale() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "genomics_heatmap.png");
        touch(dir.path(), "genomics_volcano.png");
        touch(dir.path(), "keep.txt");
        touch(dir.path(), "run1/old.png");

        let removed = prune_stale(dir.path(), &manifest_of(&["genomics_heatmap.png"])).unwrap();
        assert_eq!(removed, 1);
        assert!(dir.path().join("genomics_heatmap.png").exists());
        assert!(!dir.path().join("genomics_volcano.png").exists());
        assert!(dir.path().join("keep.txt").exists());
        assert!(dir.path().join("run1/old.png").exists());
    }
}
