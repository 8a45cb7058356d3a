//! Mill Job Generator
//!
//! Compiles the routes of one board layer into an RML command stream.
//!
//! Wires are milled first in stored order, then the edges of discretized
//! circles. Every route is emitted as move-to-start, pen-down, mill-to-end.
//! The pen is lifted after a route unless the next route of the same
//! layer starts where this one ends (compared at seven fractional digits).

use crate::error::{CamToolResult, ParameterError, ParameterResult};
use crate::rml::RmlCommand;
use crate::tool::{ToolState, MAX_COORDINATE};
use brdmill_core::{coordinates_coincide, round_coordinate, Board, Point, Route};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};
use tracing::{debug, info};

/// Separator between the wire and circle sections of a job
pub const SECTION_SEPARATOR: &str = "\n\n\n";

/// Machine parameters written into the initialization sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MillJobParameters {
    /// Tool travel velocity (mm/s)
    pub travel_velocity: f64,
    /// Z-axis velocity (mm/s)
    pub z_velocity: f64,
    /// Z position of the lowered pen
    pub pen_down_z: f64,
    /// Z position of the raised pen
    pub pen_up_z: f64,
}

impl Default for MillJobParameters {
    fn default() -> Self {
        Self {
            travel_velocity: 5.0,
            z_velocity: 5.0,
            pen_down_z: 0.0,
            pen_up_z: 300.0,
        }
    }
}

impl MillJobParameters {
    /// Validate the parameters
    pub fn validate(&self) -> ParameterResult<()> {
        for (name, value) in [
            ("travel_velocity", self.travel_velocity),
            ("z_velocity", self.z_velocity),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ParameterError::InvalidValue {
                    name: name.to_string(),
                    reason: format!("must be a finite value greater than 0, got {value}"),
                });
            }
        }

        for (name, value) in [("pen_down_z", self.pen_down_z), ("pen_up_z", self.pen_up_z)] {
            // Checked as emitted, after rounding
            let rounded = round_coordinate(value);
            if rounded.is_nan() || rounded.abs() >= MAX_COORDINATE {
                return Err(ParameterError::OutOfRange {
                    name: name.to_string(),
                    value,
                    min: -MAX_COORDINATE,
                    max: MAX_COORDINATE,
                });
            }
        }

        if self.pen_up_z <= self.pen_down_z {
            return Err(ParameterError::InvalidValue {
                name: "pen_up_z".to_string(),
                reason: format!("must be above pen_down_z ({})", self.pen_down_z),
            });
        }

        Ok(())
    }
}

/// Counters gathered while compiling a layer
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MillJobStats {
    /// Wire routes milled
    pub wire_routes: usize,
    /// Circle edges milled
    pub circle_routes: usize,
    /// Pen lifts between routes, excluding the leading lift
    pub pen_lifts: usize,
    /// Total length cut with the pen down (mm)
    pub milled_length: f64,
}

impl MillJobStats {
    pub fn routes_milled(&self) -> usize {
        self.wire_routes + self.circle_routes
    }
}

/// A compiled command stream for one layer
#[derive(Debug, Clone, PartialEq)]
pub struct MillJob {
    layer: i32,
    commands: String,
    stats: MillJobStats,
}

impl MillJob {
    /// Layer the job mills
    pub fn layer(&self) -> i32 {
        self.layer
    }

    /// Command stream text
    pub fn commands(&self) -> &str {
        &self.commands
    }

    pub fn stats(&self) -> &MillJobStats {
        &self.stats
    }

    pub fn into_commands(self) -> String {
        self.commands
    }
}

impl fmt::Display for MillJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.commands)
    }
}

/// Generator for mill jobs
///
/// Holds only parameters; compiling reads the board without modifying it,
/// so one generator and one board can serve several layers at once.
#[derive(Debug, Clone, Default)]
pub struct MillJobGenerator {
    params: MillJobParameters,
}

impl MillJobGenerator {
    /// Create a generator, validating the parameters
    pub fn new(params: MillJobParameters) -> CamToolResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn parameters(&self) -> &MillJobParameters {
        &self.params
    }

    /// Initialization sequence commands
    ///
    /// Sets velocities and pen heights, lifts the pen, travels to the
    /// origin and lowers the pen.
    pub fn initialization_commands(&self) -> Vec<RmlCommand> {
        vec![
            RmlCommand::Initialize,
            RmlCommand::TravelVelocity(self.params.travel_velocity),
            RmlCommand::ZVelocity(self.params.z_velocity),
            RmlCommand::PenZ {
                down: self.params.pen_down_z,
                up: self.params.pen_up_z,
            },
            RmlCommand::PenUp,
            RmlCommand::PenUpTo(Point::new(0.0, 0.0)),
            RmlCommand::PenDown,
        ]
    }

    /// Re-home, re-initialize and terminate
    pub fn finalize_commands() -> [RmlCommand; 3] {
        [
            RmlCommand::MillMode(true),
            RmlCommand::Initialize,
            RmlCommand::Finalize,
        ]
    }

    /// Initialization sequence text, e.g. `IN; VS5; !VZ5; PZ0,300; PU; PU0,0; PD;`
    pub fn initialize_tool(&self) -> String {
        self.initialization_commands()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Compile the routes of `layer`
    ///
    /// The stream starts with a pen lift and ends with the finalize
    /// sequence. A layer without routes yields only those. Any coordinate
    /// outside the device range aborts the compilation and no text is
    /// returned.
    pub fn compile_layer(&self, layer: i32, board: &Board) -> CamToolResult<MillJob> {
        let mut tool = ToolState::new();
        let mut commands = String::new();
        let mut stats = MillJobStats::default();

        write!(commands, "{}", RmlCommand::PenUp)?;

        let wires: Vec<_> = board.wires_on_layer(layer).collect();
        stats.wire_routes = wires.len();
        mill_routes(&wires, &mut tool, &mut commands, &mut stats)?;

        commands.push_str(SECTION_SEPARATOR);

        let circles: Vec<_> = board.routed_circles_on_layer(layer).collect();
        stats.circle_routes = circles.len();
        mill_routes(&circles, &mut tool, &mut commands, &mut stats)?;

        for command in Self::finalize_commands() {
            write!(commands, "{command}")?;
        }

        debug!(
            layer,
            wires = stats.wire_routes,
            circle_edges = stats.circle_routes,
            pen_lifts = stats.pen_lifts,
            milled_length = stats.milled_length,
            "Compiled layer"
        );

        Ok(MillJob {
            layer,
            commands,
            stats,
        })
    }

    /// Initialization followed by the compiled layer
    pub fn generate_job(&self, layer: i32, board: &Board) -> CamToolResult<MillJob> {
        let compiled = self.compile_layer(layer, board)?;
        let commands = format!("{}\n{}", self.initialize_tool(), compiled.commands);

        info!(
            layer,
            routes = compiled.stats.routes_milled(),
            pen_lifts = compiled.stats.pen_lifts,
            "Mill job generated"
        );

        Ok(MillJob {
            commands,
            ..compiled
        })
    }
}

/// Mill a same-layer route sequence, lifting the pen between routes that
/// do not touch and after the last one
fn mill_routes<R: Route>(
    routes: &[&R],
    tool: &mut ToolState,
    commands: &mut String,
    stats: &mut MillJobStats,
) -> CamToolResult<()> {
    for (index, route) in routes.iter().enumerate() {
        let start = route.start();
        let end = route.end();

        tool.move_to(start)?;
        write!(commands, "{}", RmlCommand::PlotAbsolute(start))?;
        write!(commands, "{}", RmlCommand::PenDown)?;

        tool.move_to(end)?;
        write!(commands, "{}", RmlCommand::PenDownTo(end))?;
        stats.milled_length += route.length();

        let continues = routes.get(index + 1).is_some_and(|next| {
            let next_start = next.start();
            coordinates_coincide((end.x, end.y), (next_start.x, next_start.y))
        });

        if !continues {
            writeln!(commands, "{}", RmlCommand::PenUp)?;
            stats.pen_lifts += 1;
        }
    }
    Ok(())
}
