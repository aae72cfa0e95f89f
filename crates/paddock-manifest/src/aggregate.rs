//! Aggregation drivers: one grouped manifest at the data root, or one
//! manifest per sim folder.
//!
//! Both modes walk the immediate subdirectories of the data root (hidden
//! names excluded, sorted) and share the folder scan from [`crate::folder`].
//! They differ only in output shape:
//!
//! - **Root mode** ([`generate_root_manifest`]) accumulates every valid car
//!   into one mapping keyed by sim folder name and writes a single
//!   `manifest.json` at the data root. Each record's path is rewritten to
//!   `"<folder>/<file>"` so a consumer can resolve it from the root.
//! - **Per-folder mode** ([`generate_folder_manifests`]) writes a separate
//!   `manifest.json` inside each sim folder and tallies totals across the
//!   run.
//!
//! A missing data root is the only fatal condition. Finding zero valid cars
//! is a successful run that performs no write.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::car::CarRecord;
use crate::folder::{
    generate_folder_manifest, scan_folder, warn_skipped, write_manifest_file, SkippedFile,
    MANIFEST_FILE_NAME,
};
use crate::ManifestError;

// ---------------------------------------------------------------------------
// Output shapes and reports
// ---------------------------------------------------------------------------

/// The on-disk shape of the root manifest: records grouped by sim folder.
///
/// A `BTreeMap` keeps the folder keys in lexicographic order when
/// serialized, so the output is deterministic across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootManifest {
    pub cars: BTreeMap<String, Vec<CarRecord>>,
}

/// Outcome of a root-mode run.
#[derive(Debug, Clone, Default)]
pub struct RootReport {
    /// Total records written across all sim folders (0 means no file was
    /// written).
    pub cars_written: usize,
    /// Skipped files grouped by sim folder, folders in scan order.
    pub skipped_by_folder: Vec<(String, Vec<SkippedFile>)>,
}

/// Outcome of a per-folder run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunSummary {
    /// Folders that produced a manifest (at least one valid car).
    pub folders_written: usize,
    /// Total cars written across all folders.
    pub cars_written: usize,
    /// Total input files skipped across all folders.
    pub files_skipped: usize,
}

// ---------------------------------------------------------------------------
// Sim folder enumeration
// ---------------------------------------------------------------------------

/// Immediate subdirectories of the data root, hidden (dot-prefixed) names
/// excluded, sorted by name.
///
/// # Errors
///
/// [`ManifestError::DataDirNotFound`] when `data_dir` is not an existing
/// directory -- the one condition that aborts a run before any folder is
/// visited.
fn sim_folders(data_dir: &Path) -> Result<Vec<(String, PathBuf)>, ManifestError> {
    if !data_dir.is_dir() {
        return Err(ManifestError::DataDirNotFound {
            path: data_dir.to_path_buf(),
        });
    }

    let entries = fs::read_dir(data_dir).map_err(|source| ManifestError::Io {
        path: data_dir.to_path_buf(),
        source,
    })?;

    let mut folders: Vec<(String, PathBuf)> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ManifestError::Io {
            path: data_dir.to_path_buf(),
            source,
        })?;
        if !entry.path().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        folders.push((name, entry.path()));
    }
    folders.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(folders)
}

// ---------------------------------------------------------------------------
// Root mode
// ---------------------------------------------------------------------------

/// Generate a single `manifest.json` at the data root covering all sim
/// folders.
///
/// Every valid car across all folders lands in one mapping keyed by folder
/// name, each record's path rewritten to `"<folder>/<file>"`. Skip reports
/// are grouped by folder and logged after the walk. If the total valid-car
/// count is zero, no file is written and the report carries a zero count.
///
/// # Errors
///
/// [`ManifestError::DataDirNotFound`] when `data_dir` does not exist;
/// [`ManifestError::Io`] when enumeration or the final write fails.
pub fn generate_root_manifest(data_dir: &Path) -> Result<RootReport, ManifestError> {
    let mut cars_by_folder: BTreeMap<String, Vec<CarRecord>> = BTreeMap::new();
    let mut report = RootReport::default();

    for (name, path) in sim_folders(data_dir)? {
        let mut scan = scan_folder(&path)?;
        for record in &mut scan.cars {
            record.path = format!("{name}/{}", record.path);
        }
        if !scan.skipped.is_empty() {
            report.skipped_by_folder.push((name.clone(), scan.skipped));
        }
        if !scan.cars.is_empty() {
            report.cars_written += scan.cars.len();
            cars_by_folder.insert(name, scan.cars);
        }
    }

    for (folder, skipped) in &report.skipped_by_folder {
        warn_skipped(folder, skipped);
    }

    if report.cars_written == 0 {
        return Ok(report);
    }

    let manifest = RootManifest {
        cars: cars_by_folder,
    };
    write_manifest_file(&data_dir.join(MANIFEST_FILE_NAME), &manifest)?;
    tracing::info!(
        cars = report.cars_written,
        folders = manifest.cars.len(),
        "root manifest written"
    );
    Ok(report)
}

// ---------------------------------------------------------------------------
// Per-folder mode
// ---------------------------------------------------------------------------

/// Generate a separate `manifest.json` inside each sim folder.
///
/// Invokes the assembler once per subfolder and tallies totals. Folders
/// with zero valid cars get no manifest and do not count toward
/// `folders_written`.
///
/// # Errors
///
/// [`ManifestError::DataDirNotFound`] when `data_dir` does not exist;
/// [`ManifestError::Io`] when a folder cannot be enumerated or a manifest
/// cannot be written.
pub fn generate_folder_manifests(data_dir: &Path) -> Result<RunSummary, ManifestError> {
    let mut summary = RunSummary::default();

    for (_, path) in sim_folders(data_dir)? {
        let report = generate_folder_manifest(&path)?;
        if report.cars_written > 0 {
            summary.folders_written += 1;
            summary.cars_written += report.cars_written;
        }
        summary.files_skipped += report.files_skipped;
    }

    tracing::info!(
        folders = summary.folders_written,
        cars = summary.cars_written,
        "generated per-folder manifests"
    );
    Ok(summary)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
