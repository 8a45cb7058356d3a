//! RML command tokens
//!
//! The mill reads a flat sequence of semicolon-terminated instructions.
//! Coordinates are written rounded to seven fractional digits without
//! trailing zeros.

use brdmill_core::{format_coordinate, Point};
use std::fmt;

/// One instruction of the command stream
#[derive(Debug, Clone, PartialEq)]
pub enum RmlCommand {
    /// `IN;` initialize device
    Initialize,
    /// `VS<n>;` tool travel velocity in mm/s
    TravelVelocity(f64),
    /// `!VZ<n>;` z-axis velocity in mm/s
    ZVelocity(f64),
    /// `PZ<down>,<up>;` pen down and up z positions
    PenZ { down: f64, up: f64 },
    /// `PU;` lift in place
    PenUp,
    /// `PU<x>,<y>;` travel to a point with the pen up
    PenUpTo(Point),
    /// `PD;` lower in place
    PenDown,
    /// `PD<x>,<y>;` mill to a point with the pen down
    PenDownTo(Point),
    /// `PA<x>,<y>;` move to a point keeping the current pen state
    PlotAbsolute(Point),
    /// `MC1;` / `MC0;`
    MillMode(bool),
    /// `DF` finalize, the only unterminated token
    Finalize,
}

impl fmt::Display for RmlCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let point = |p: &Point| format!("{},{}", format_coordinate(p.x), format_coordinate(p.y));
        match self {
            RmlCommand::Initialize => write!(f, "IN;"),
            RmlCommand::TravelVelocity(v) => write!(f, "VS{};", format_coordinate(*v)),
            RmlCommand::ZVelocity(v) => write!(f, "!VZ{};", format_coordinate(*v)),
            RmlCommand::PenZ { down, up } => write!(
                f,
                "PZ{},{};",
                format_coordinate(*down),
                format_coordinate(*up)
            ),
            RmlCommand::PenUp => write!(f, "PU;"),
            RmlCommand::PenUpTo(p) => write!(f, "PU{};", point(p)),
            RmlCommand::PenDown => write!(f, "PD;"),
            RmlCommand::PenDownTo(p) => write!(f, "PD{};", point(p)),
            RmlCommand::PlotAbsolute(p) => write!(f, "PA{};", point(p)),
            RmlCommand::MillMode(on) => write!(f, "MC{};", if *on { 1 } else { 0 }),
            RmlCommand::Finalize => write!(f, "DF"),
        }
    }
}
