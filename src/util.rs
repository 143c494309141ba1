//! Utility functions for Lexiplay.
//!
//! Host-edge file reading: every input file (config, pattern statistics,
//! replay scripts, snapshots) goes through the size-limited readers here.

use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use crate::error::{LexiError, Result};

/// Maximum file size that can be read into memory (10 MB).
///
/// Content packs and statistics exports are far below this under normal use.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024; // 10 MB

/// Read a file into a string with size limit protection.
///
/// # Errors
///
/// Returns an error if:
/// * The file cannot be read (doesn't exist, permission denied, etc.)
/// * The file exceeds `MAX_FILE_SIZE`
pub fn read_to_string_limited(path: &Path) -> Result<String> {
    read_to_string_with_limit(path, MAX_FILE_SIZE)
}

/// Read a file into a string with a custom size limit.
///
/// # Errors
///
/// Returns an error if the file exceeds `max_size` or cannot be read.
pub fn read_to_string_with_limit(path: &Path, max_size: u64) -> Result<String> {
    let metadata = fs::metadata(path).map_err(|e| LexiError::storage(path, e))?;

    let size = metadata.len();
    if size > max_size {
        return Err(LexiError::invalid_input(format!(
            "File {} is too large ({} bytes, max {} bytes)",
            path.display(),
            size,
            max_size
        )));
    }

    fs::read_to_string(path).map_err(|e| LexiError::storage(path, e))
}

/// Read and decode a JSON file through the size-limited reader.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = read_to_string_limited(path)?;
    serde_json::from_str(&content)
        .map_err(|e| LexiError::serde(format!("{}: {}", path.display(), e)))
}
