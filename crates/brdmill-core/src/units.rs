//! Unit and precision utilities
//!
//! Board geometry is always interpreted in millimetres. The `grid` unit
//! found in board documents describes the editor grid, not the geometry,
//! so it is never used for conversion.
//!
//! Coordinates are compared and emitted at a fixed decimal precision to
//! absorb floating point noise from trigonometric discretization.

/// Unit of every length in the board model
pub const BOARD_UNIT: &str = "mm";

/// Number of fractional digits kept when comparing or emitting coordinates
pub const COORDINATE_PRECISION: i32 = 7;

/// Round a coordinate to [`COORDINATE_PRECISION`] fractional digits
pub fn round_coordinate(value: f64) -> f64 {
    let scale = 10f64.powi(COORDINATE_PRECISION);
    let rounded = (value * scale).round() / scale;
    // Normalize -0.0 so it formats and compares like 0.0
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Whether two points are the same once rounded to the coordinate precision
pub fn coordinates_coincide(a: (f64, f64), b: (f64, f64)) -> bool {
    round_coordinate(a.0) == round_coordinate(b.0) && round_coordinate(a.1) == round_coordinate(b.1)
}

/// Format a coordinate for the command stream
///
/// The value is rounded to the coordinate precision and written without
/// trailing zeros, so `5.0` becomes `5` and `1.25` stays `1.25`.
pub fn format_coordinate(value: f64) -> String {
    let text = format!(
        "{:.*}",
        COORDINATE_PRECISION as usize,
        round_coordinate(value)
    );
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}
