//! Utility functions for error handling
//!
//! Helpers that turn raw filesystem failures into [`LoadError`]s carrying
//! the path and the reason the file was needed.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::LoadError;

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
            purpose: purpose.to_string(),
        });
    }

    if !path.is_file() {
        return Err(LoadError::Unreadable {
            path: path.to_path_buf(),
            source: io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Expected a file for: {purpose}"),
            ),
        });
    }

    fs::File::open(path).map_err(|e| {
        let source = match e.kind() {
            io::ErrorKind::PermissionDenied => io::Error::new(
                e.kind(),
                "Permission denied - check file permissions",
            ),
            _ => e,
        };
        LoadError::Unreadable {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Safely read a file to string with rich error information
pub fn safe_read_to_string(path: &Path, purpose: &str) -> Result<String, LoadError> {
    let mut file = safe_open_file(path, purpose)?;

    let mut content = String::new();
    io::Read::read_to_string(&mut file, &mut content).map_err(|source| LoadError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content)
}
