//! Error types for the board parser.

use std::io;
use thiserror::Error;

/// Errors raised while reading a board document.
///
/// Any error aborts the whole parse; no partial board is returned.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The document is not well-formed XML.
    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The document could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A required section tag is absent.
    #[error("Missing required element: {0}")]
    MissingElement(&'static str),

    /// A required attribute is absent.
    #[error("Missing required attribute '{attr}' on element '{element}'")]
    MissingAttribute {
        element: &'static str,
        attr: &'static str,
    },

    /// An attribute that must be numeric could not be parsed.
    #[error("Invalid number '{value}' for attribute '{attr}' on element '{element}'")]
    InvalidNumber {
        element: &'static str,
        attr: &'static str,
        value: String,
    },
}

/// Result type alias for parse operations.
pub type Result<T> = std::result::Result<T, ParseError>;
