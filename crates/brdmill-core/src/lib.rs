//! # brdmill Core
//!
//! Core types and utilities for brdmill.
//! Provides the immutable board geometry model produced by the parser,
//! the fixed millimetre unit and coordinate precision helpers, and the
//! error taxonomy shared by the other crates.

pub mod board;
pub mod error;
pub mod geometry;
pub mod units;

pub use board::{Board, BoardContents, UNKNOWN_DIMENSION};
pub use error::{Axis, DiscoveryError, Error, RangeError, Result};
pub use geometry::{
    Circle, Hole, LayerTable, Part, PerimeterSegment, Point, Polygon, Route, RoutedCircle, Vertex,
    Via, Wire,
};
pub use units::{coordinates_coincide, format_coordinate, round_coordinate, BOARD_UNIT};
