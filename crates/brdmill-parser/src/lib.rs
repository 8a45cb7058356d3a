//! # brdmill Parser
//!
//! Reads an XML board document and builds the immutable [`Board`] model.
//!
//! The parser recognises four required sections:
//!
//! - **plain**: board outline wires, circles and holes
//! - **signals**: copper wires, vias and polygons (with nested vertices)
//! - **elements**: placed parts
//! - **layers**: the layer table
//!
//! Every circle is discretized into a closed 40-sided polygon while the
//! board is built, so the toolpath compiler can mill it like wires.
//! The parser never touches the filesystem; callers hand it an already
//! opened reader or the document text.

pub mod brd;
pub mod circle_router;
pub mod error;

pub use brd::BoardParser;
pub use circle_router::{CircleRouter, CIRCLE_SEGMENTS};
pub use error::{ParseError, Result};

use brdmill_core::Board;
use std::io::Read;

/// Parse a board document from text
pub fn parse_board_str(xml: &str) -> Result<Board> {
    BoardParser::new().parse_str(xml)
}

/// Parse a board document from an open reader
pub fn parse_board<R: Read>(reader: R) -> Result<Board> {
    BoardParser::new().parse_reader(reader)
}
