//! Per-folder manifest assembly.
//!
//! [`scan_folder`] enumerates the car definition files directly inside one
//! sim folder (non-recursive), runs each through the loader, and collects
//! valid records in filename order alongside the files that were skipped.
//! [`generate_folder_manifest`] writes the result as `manifest.json` inside
//! the folder -- unless zero valid cars were found, in which case nothing is
//! written and a zero count is reported (the normal "empty" case, not an
//! error).
//!
//! The generated `manifest.json` is excluded from input consideration, so
//! re-running over an already-indexed folder never ingests the previous
//! output.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::car::{load_car_record, CarRecord};
use crate::ManifestError;

/// Name of the generated index file. Exclusively output: any file with this
/// exact name inside a scanned folder is never treated as a car source.
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

// ---------------------------------------------------------------------------
// Scan results
// ---------------------------------------------------------------------------

/// One input file that was skipped, with the reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedFile {
    /// Bare filename inside the scanned folder.
    pub file_name: String,
    /// Human-readable failure reason.
    pub message: String,
}

/// Result of scanning one sim folder: valid records in ascending filename
/// order, plus the files that failed to load.
#[derive(Debug, Clone, Default)]
pub struct FolderScan {
    pub cars: Vec<CarRecord>,
    pub skipped: Vec<SkippedFile>,
}

/// The on-disk shape of a per-folder manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderManifest {
    pub cars: Vec<CarRecord>,
}

/// Outcome of [`generate_folder_manifest`] for one folder.
#[derive(Debug, Clone, Copy)]
pub struct FolderReport {
    /// Valid cars written to the manifest (0 means nothing was written).
    pub cars_written: usize,
    /// Input files skipped with a recorded reason.
    pub files_skipped: usize,
}

// ---------------------------------------------------------------------------
// Scanning
// ---------------------------------------------------------------------------

/// Scan one sim folder for car definition files.
///
/// Enumerates `*.json` files directly inside `folder` (non-recursive),
/// excluding [`MANIFEST_FILE_NAME`] and hidden (dot-prefixed) names, in
/// ascending lexicographic filename order. Each file goes through
/// [`load_car_record`]; a failure becomes a [`SkippedFile`] entry and the
/// scan continues -- one bad file never aborts the batch.
///
/// # Errors
///
/// Only the directory enumeration itself can fail ([`ManifestError::Io`]).
pub fn scan_folder(folder: &Path) -> Result<FolderScan, ManifestError> {
    let entries = fs::read_dir(folder).map_err(|source| ManifestError::Io {
        path: folder.to_path_buf(),
        source,
    })?;

    let mut file_names: Vec<String> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ManifestError::Io {
            path: folder.to_path_buf(),
            source,
        })?;
        if !entry.path().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.ends_with(".json") || name.starts_with('.') || name == MANIFEST_FILE_NAME {
            continue;
        }
        file_names.push(name);
    }
    file_names.sort();

    let mut scan = FolderScan::default();
    for name in file_names {
        match load_car_record(&folder.join(&name)) {
            Ok(record) => scan.cars.push(record),
            Err(err) => scan.skipped.push(SkippedFile {
                file_name: name,
                message: err.to_string(),
            }),
        }
    }
    Ok(scan)
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Write a manifest payload the way every paddock manifest is written:
/// pretty-printed with 2-space indentation, trailing newline, non-ASCII
/// characters preserved literally. Overwrites any existing file.
pub(crate) fn write_manifest_file<T: Serialize>(
    path: &Path,
    payload: &T,
) -> Result<(), ManifestError> {
    let mut text = serde_json::to_string_pretty(payload)
        .expect("manifest payloads should always be JSON-serializable");
    text.push('\n');
    fs::write(path, text).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Log the warning block for a folder's skipped files, one line per file.
pub(crate) fn warn_skipped(folder_name: &str, skipped: &[SkippedFile]) {
    if skipped.is_empty() {
        return;
    }
    tracing::warn!(
        folder = %folder_name,
        count = skipped.len(),
        "skipped unreadable or invalid car file(s)"
    );
    for skip in skipped {
        tracing::warn!(folder = %folder_name, file = %skip.file_name, "{}", skip.message);
    }
}

/// Generate `manifest.json` for one sim folder.
///
/// Scans the folder, reports skipped files, and writes the manifest if at
/// least one valid car was found. Zero valid cars performs no write and
/// reports a zero count. Running twice over an unchanged folder produces
/// byte-identical output both times.
///
/// # Errors
///
/// [`ManifestError::Io`] when the folder cannot be enumerated or the
/// manifest cannot be written.
pub fn generate_folder_manifest(folder: &Path) -> Result<FolderReport, ManifestError> {
    let scan = scan_folder(folder)?;
    let folder_name = folder
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    warn_skipped(&folder_name, &scan.skipped);

    let report = FolderReport {
        cars_written: scan.cars.len(),
        files_skipped: scan.skipped.len(),
    };
    if scan.cars.is_empty() {
        return Ok(report);
    }

    let manifest = FolderManifest { cars: scan.cars };
    write_manifest_file(&folder.join(MANIFEST_FILE_NAME), &manifest)?;
    tracing::info!(folder = %folder_name, cars = report.cars_written, "manifest written");
    Ok(report)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
