//! Car record loading and validation.
//!
//! One car definition file is one JSON object with an optional `carName`
//! (display name) and a required `carId` (identity). Everything else in the
//! file is ignored and not reproduced in manifests. [`load_car_record`] is
//! the single validation primitive shared by both aggregation modes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::CarFileError;

// ---------------------------------------------------------------------------
// CarRecord
// ---------------------------------------------------------------------------

/// A validated car identity extracted from one definition file.
///
/// Identity is the non-empty `car_id`; `car_name` defaults to `""` when the
/// source file has none. Wire names match the on-disk schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarRecord {
    /// Display name, `""` when the source file has none.
    #[serde(rename = "carName")]
    pub car_name: String,
    /// Non-empty identifier.
    #[serde(rename = "carId")]
    pub car_id: String,
    /// Source position: the bare filename as loaded, or
    /// `"<folder>/<file>"` once a driver adds folder context. Derived from
    /// the filesystem, never read from the file itself.
    pub path: String,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load and validate one car definition file.
///
/// Extracts `carName` (defaulting to `""`) and `carId` from the JSON object
/// at `path`. Extra fields are ignored. The returned record's `path` is the
/// file's own name; callers rewrite it to add folder context.
///
/// # Errors
///
/// - [`CarFileError::Io`] when the file cannot be read.
/// - [`CarFileError::Parse`] when the content is not well-formed JSON.
/// - [`CarFileError::MissingId`] when `carId` is absent, empty, or not a
///   string (a non-object document has no `carId` either).
pub fn load_car_record(path: &Path) -> Result<CarRecord, CarFileError> {
    let bytes = fs::read(path)?;
    let data: serde_json::Value = serde_json::from_slice(&bytes)?;

    let car_name = data
        .get("carName")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default()
        .to_owned();
    let car_id = data
        .get("carId")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default()
        .to_owned();

    if car_id.is_empty() {
        return Err(CarFileError::MissingId);
    }

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(CarRecord {
        car_name,
        car_id,
        path: file_name,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
