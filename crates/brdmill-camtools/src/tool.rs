//! Tool State
//!
//! Tracks the absolute position of the milling tool while a job is being
//! compiled. Every coordinate the job commands passes through here first.

use brdmill_core::{round_coordinate, Axis, Point, RangeError};

/// Exclusive magnitude bound for a device coordinate on either axis
///
/// The device addresses a signed 24-bit range; values must stay strictly
/// below this magnitude on both sides.
pub const MAX_COORDINATE: f64 = 8_388_607.0;

/// Virtual tool position
///
/// Local to a single compilation; never shared.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToolState {
    x: f64,
    y: f64,
}

impl ToolState {
    /// Tool at the origin
    pub fn new() -> Self {
        Self::default()
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Bound for `axis`
    pub fn bound(axis: Axis) -> f64 {
        match axis {
            Axis::X | Axis::Y => MAX_COORDINATE,
        }
    }

    /// Move one axis to an absolute coordinate
    ///
    /// The value is checked as it will be emitted, rounded to the
    /// coordinate precision. Fails when `|rounded| >= bound`; the stored
    /// position is left untouched. Values are never clamped.
    pub fn set_absolute_position(&mut self, axis: Axis, value: f64) -> Result<(), RangeError> {
        let bound = Self::bound(axis);
        let rounded = round_coordinate(value);
        if rounded.is_nan() || rounded.abs() >= bound {
            return Err(RangeError::OutOfRange { axis, value, bound });
        }

        match axis {
            Axis::X => self.x = rounded,
            Axis::Y => self.y = rounded,
        }
        Ok(())
    }

    /// Move both axes, checking both before either is updated
    pub fn move_to(&mut self, point: Point) -> Result<(), RangeError> {
        let mut next = self.clone();
        next.set_absolute_position(Axis::X, point.x)?;
        next.set_absolute_position(Axis::Y, point.y)?;
        *self = next;
        Ok(())
    }
}
