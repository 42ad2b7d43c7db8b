//! Watched address list.
//!
//! The list is a plain text file with one address per line. Entries are kept
//! as written: order is preserved, duplicates are not removed and no format
//! check happens here.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
#[error("failed to read address list {path}: {source}")]
pub struct AddressListError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Read the address list file at `path`.
pub fn load_addresses(path: impl AsRef<Path>) -> Result<Vec<String>, AddressListError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| AddressListError {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(parse_addresses(&contents))
}

/// Split file contents into trimmed, non-empty lines.
pub fn parse_addresses(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
