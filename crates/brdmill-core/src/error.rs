//! Error handling for brdmill
//!
//! Provides the error types shared across the workspace:
//! - Range errors (a tool coordinate outside the device's addressable range)
//! - Discovery errors (locating the single board file in a directory)
//!
//! Document parse errors live with the parser in `brdmill-parser`.
//! All error types use `thiserror` for ergonomic error handling.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Planar tool axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// X axis
    X,
    /// Y axis
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// Coordinate range error
///
/// Raised when an emitted coordinate would command the tool outside the
/// range the motion-control protocol can represent.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RangeError {
    /// Coordinate magnitude reached or exceeded the axis bound
    #[error("Coordinate {value} on {axis} axis is out of range (|value| must be < {bound})")]
    OutOfRange {
        /// The offending axis.
        axis: Axis,
        /// The rejected coordinate value.
        value: f64,
        /// The exclusive magnitude bound for the axis.
        bound: f64,
    },
}

/// Board file discovery error
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// No file with the board extension was found
    #[error("No .{extension} board file found in {}; place one board file in the directory", dir.display())]
    NoCandidate {
        /// The directory that was searched.
        dir: PathBuf,
        /// The board file extension searched for.
        extension: String,
    },

    /// More than one board file was found
    #[error("Multiple board files found in {}: {}; remove unneeded board files", dir.display(), list_paths(candidates))]
    Ambiguous {
        /// The directory that was searched.
        dir: PathBuf,
        /// Every matching file.
        candidates: Vec<PathBuf>,
    },

    /// The directory could not be read or the board file could not be opened
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn list_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Error raised while locating and opening a board
#[derive(Error, Debug)]
pub enum Error {
    /// Discovery error
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// The board file could not be opened
    #[error("Failed to open board file {}: {source}", path.display())]
    Open {
        /// The board file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_error_display() {
        let err = RangeError::OutOfRange {
            axis: Axis::X,
            value: 8388607.0,
            bound: 8388607.0,
        };
        assert_eq!(
            err.to_string(),
            "Coordinate 8388607 on x axis is out of range (|value| must be < 8388607)"
        );
    }

    #[test]
    fn test_discovery_error_display() {
        let err = DiscoveryError::NoCandidate {
            dir: PathBuf::from("boards"),
            extension: "brd".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No .brd board file found in boards; place one board file in the directory"
        );

        let err = DiscoveryError::Ambiguous {
            dir: PathBuf::from("boards"),
            candidates: vec![PathBuf::from("a.brd"), PathBuf::from("b.brd")],
        };
        assert!(err.to_string().contains("a.brd, b.brd"));
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = DiscoveryError::from(io_err).into();
        assert!(matches!(err, Error::Discovery(DiscoveryError::Io(_))));
        assert_eq!(err.to_string(), "I/O error: missing");

        let err = Error::Open {
            path: PathBuf::from("board.brd"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "Failed to open board file board.brd: denied");
    }
}
