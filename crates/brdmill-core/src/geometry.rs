//! Board geometry records
//!
//! Plain, immutable value types for every entity a board document
//! describes. All lengths are millimetres. Records carry no behavior
//! beyond field access and a few derived measurements.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Mapping from layer number to layer name
pub type LayerTable = BTreeMap<i32, String>;

/// A point in the board plane
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A straight segment the tool can mill on a single layer
///
/// Implemented by authored wires and by the edges of discretized circles,
/// so the toolpath compiler can sequence both the same way.
pub trait Route {
    /// Start point of the segment
    fn start(&self) -> Point;
    /// End point of the segment
    fn end(&self) -> Point;
    /// Layer number the segment lives on
    fn layer(&self) -> i32;

    /// Length of the segment
    fn length(&self) -> f64 {
        self.start().distance_to(&self.end())
    }
}

/// One segment of the board outline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerimeterSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub width: f64,
    /// Arc bulge factor; `None` for a straight segment
    pub curve: Option<f64>,
}

/// A straight copper trace segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wire {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub width: f64,
    pub layer: i32,
}

impl Route for Wire {
    fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    fn layer(&self) -> i32 {
        self.layer
    }
}

/// A circle drawn on a layer, before discretization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub width: f64,
    pub layer: i32,
}

impl Circle {
    /// Center of the circle
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// One polygon edge of a discretized [`Circle`]
///
/// Never authored in a document; derived while the board is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutedCircle {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub width: f64,
    pub layer: i32,
}

impl Route for RoutedCircle {
    fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    fn layer(&self) -> i32 {
        self.layer
    }
}

/// A non-plated drill point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hole {
    pub x: f64,
    pub y: f64,
    /// Drill diameter
    pub drill: f64,
}

/// A plated interconnect between layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Via {
    pub x: f64,
    pub y: f64,
    /// Layer span descriptor, e.g. `1-16`
    pub extent: String,
    /// Drill diameter
    pub drill: f64,
}

/// Placement of a component footprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub name: String,
    pub library: String,
    pub package: String,
    pub value: String,
    pub x: f64,
    pub y: f64,
    /// Rotation descriptor such as `R90` or `MR180`; `None` when not recorded
    pub rot: Option<String>,
}

/// A polygon boundary vertex
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    /// Curvature of the edge leaving this vertex; `None` means no curvature
    pub curve: Option<f64>,
}

/// A filled region such as a ground pour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub width: f64,
    pub layer: i32,
    /// Boundary path in document order
    pub vertices: Vec<Vertex>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_route() {
        let wire = Wire {
            x1: 0.0,
            y1: 0.0,
            x2: 3.0,
            y2: 4.0,
            width: 0.25,
            layer: 1,
        };
        assert_eq!(wire.start(), Point::new(0.0, 0.0));
        assert_eq!(wire.end(), Point::new(3.0, 4.0));
        assert_eq!(Route::layer(&wire), 1);
        assert_eq!(wire.length(), 5.0);
    }

    #[test]
    fn test_vertex_curve_distinguishes_absent_from_zero() {
        let straight = Vertex {
            x: 1.0,
            y: 1.0,
            curve: None,
        };
        let zero = Vertex {
            x: 1.0,
            y: 1.0,
            curve: Some(0.0),
        };
        assert_ne!(straight, zero);
    }

    #[test]
    fn test_part_serialization_keeps_missing_rotation() {
        let part = Part {
            name: "R1".to_string(),
            library: "rcl".to_string(),
            package: "0805".to_string(),
            value: "10k".to_string(),
            x: 12.5,
            y: 3.0,
            rot: None,
        };
        let json = serde_json::to_string(&part).unwrap();
        assert!(json.contains("\"rot\":null"));
        let back: Part = serde_json::from_str(&json).unwrap();
        assert_eq!(back, part);
    }
}
