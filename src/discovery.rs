//! Board file discovery
//!
//! Resolves the single board file in a directory. The parser never touches
//! the filesystem; this module hands it an open reader.

use brdmill_core::{DiscoveryError, Error};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

/// Outcome of searching a directory for board files
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discovery {
    /// Exactly one candidate
    Found(PathBuf),
    /// No candidate
    None,
    /// More than one candidate, sorted by path
    Ambiguous(Vec<PathBuf>),
}

impl Discovery {
    /// Search `dir` for regular files with `extension`
    ///
    /// The extension is matched case-insensitively and given without a
    /// leading dot.
    pub fn search(dir: &Path, extension: &str) -> Result<Self, DiscoveryError> {
        let mut candidates = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            let matches = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
            if matches && entry.file_type()?.is_file() {
                candidates.push(path);
            }
        }
        candidates.sort();

        Ok(match candidates.len() {
            0 => Discovery::None,
            1 => Discovery::Found(candidates.remove(0)),
            _ => Discovery::Ambiguous(candidates),
        })
    }

    /// The single candidate, or a distinct error for zero or several
    pub fn into_path(self, dir: &Path, extension: &str) -> Result<PathBuf, DiscoveryError> {
        match self {
            Discovery::Found(path) => Ok(path),
            Discovery::None => Err(DiscoveryError::NoCandidate {
                dir: dir.to_path_buf(),
                extension: extension.to_string(),
            }),
            Discovery::Ambiguous(candidates) => Err(DiscoveryError::Ambiguous {
                dir: dir.to_path_buf(),
                candidates,
            }),
        }
    }
}

/// Locate the single board file in `dir`
pub fn find_board(dir: &Path, extension: &str) -> Result<PathBuf, DiscoveryError> {
    let path = Discovery::search(dir, extension)?.into_path(dir, extension)?;
    info!("Using board file {}", path.display());
    Ok(path)
}

/// Locate and open the single board file in `dir`
pub fn open_board(dir: &Path, extension: &str) -> brdmill_core::Result<(PathBuf, File)> {
    let path = find_board(dir, extension)?;
    match File::open(&path) {
        Ok(file) => Ok((path, file)),
        Err(source) => Err(Error::Open { path, source }),
    }
}
