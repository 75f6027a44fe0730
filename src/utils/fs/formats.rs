//! Reading structured files.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::core::BzlError;

/// Reads a text file, naming the path on failure.
pub fn read_text_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Reads and deserializes a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, or [`BzlError::TomlError`] if it cannot
/// be parsed
pub fn read_toml_file<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = read_text_file(path)?;
    toml::from_str(&content)
        .map_err(BzlError::from)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}
