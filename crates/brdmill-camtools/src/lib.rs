//! # brdmill CAM Tools
//!
//! Turns a parsed board into a command stream for a Roland Modela style
//! 2.5-axis mill.
//!
//! ## Components
//!
//! - **Tool State**: tracks the virtual tool position and rejects any
//!   coordinate the device cannot represent
//! - **RML Commands**: the textual instruction set written to the mill
//! - **Mill Job Generator**: sequences the wires and discretized circles of
//!   one layer into milling moves, lifting the pen only between routes that
//!   do not touch

pub mod error;
pub mod mill_job;
pub mod rml;
pub mod tool;

pub use error::{CamToolError, CamToolResult, ParameterError, ParameterResult};
pub use mill_job::{MillJob, MillJobGenerator, MillJobParameters, MillJobStats};
pub use rml::RmlCommand;
pub use tool::{ToolState, MAX_COORDINATE};
