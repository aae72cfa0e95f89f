//! Paddock Manifest -- car manifest generation for sim racing data folders.
//!
//! This crate scans a data directory containing one subfolder per racing
//! simulator, each holding car definition JSON files, and produces aggregate
//! `manifest.json` index files listing the cars found. Two output modes share
//! one loading/validation primitive:
//!
//! - [`aggregate::generate_root_manifest`]: one manifest at the data root,
//!   grouping cars by sim folder.
//! - [`aggregate::generate_folder_manifests`]: a separate manifest inside
//!   each sim folder.
//!
//! # Quick Start
//!
//! ```no_run
//! use paddock_manifest::prelude::*;
//!
//! let report = generate_root_manifest(std::path::Path::new("data"))?;
//! println!("{} car(s) indexed", report.cars_written);
//! # Ok::<(), ManifestError>(())
//! ```
//!
//! A bad input file never aborts a run: it is recorded as a
//! [`folder::SkippedFile`] and reported, and its siblings are still
//! processed. The only fatal condition is a missing data directory.

#![deny(unsafe_code)]

pub mod aggregate;
pub mod car;
pub mod folder;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced while loading a single car definition file.
///
/// These never abort a batch: the assembler records the failure as a
/// [`folder::SkippedFile`] and continues with the next file.
#[derive(Debug, thiserror::Error)]
pub enum CarFileError {
    /// The file could not be read from disk.
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// The file content is not well-formed JSON.
    #[error("malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The required `carId` field is absent, empty, or not a string.
    #[error("missing or empty carId")]
    MissingId,
}

/// Errors that abort a manifest generation run.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// The base data directory does not exist. The only condition the CLI
    /// maps to a non-zero exit code.
    #[error("data directory not found: {path}")]
    DataDirNotFound {
        path: std::path::PathBuf,
    },

    /// Directory enumeration or manifest write failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::aggregate::{
        generate_folder_manifests, generate_root_manifest, RootManifest, RootReport, RunSummary,
    };
    pub use crate::car::{load_car_record, CarRecord};
    pub use crate::folder::{
        generate_folder_manifest, scan_folder, FolderManifest, FolderReport, FolderScan,
        SkippedFile, MANIFEST_FILE_NAME,
    };
    pub use crate::{CarFileError, ManifestError};
}
