//! Board aggregate
//!
//! A [`Board`] owns every geometry collection parsed from one document.
//! It is built once and only ever handed out by shared reference, so
//! several toolpath compilations may read it at the same time.

use crate::geometry::{
    Circle, Hole, LayerTable, Part, PerimeterSegment, Polygon, Route, RoutedCircle, Via, Wire,
};
use crate::units::BOARD_UNIT;
use serde::{Deserialize, Serialize};

/// Width/height reported when the board has no perimeter
pub const UNKNOWN_DIMENSION: f64 = -1.0;

/// Collections gathered by the parser, used to build a [`Board`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardContents {
    pub perimeter: Vec<PerimeterSegment>,
    pub wires: Vec<Wire>,
    pub circles: Vec<Circle>,
    pub routed_circles: Vec<RoutedCircle>,
    pub holes: Vec<Hole>,
    pub vias: Vec<Via>,
    pub parts: Vec<Part>,
    pub layers: LayerTable,
    pub polygons: Vec<Polygon>,
    /// Unit of the editor grid as written in the document, informational only
    pub grid_unit: Option<String>,
}

/// Normalized, read-only model of a circuit board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    width: f64,
    height: f64,
    unit: String,
    grid_unit: Option<String>,
    perimeter: Vec<PerimeterSegment>,
    wires: Vec<Wire>,
    circles: Vec<Circle>,
    routed_circles: Vec<RoutedCircle>,
    holes: Vec<Hole>,
    vias: Vec<Via>,
    parts: Vec<Part>,
    layers: LayerTable,
    polygons: Vec<Polygon>,
}

impl Board {
    /// Build a board, deriving its dimensions from the perimeter
    pub fn new(contents: BoardContents) -> Self {
        let (width, height) =
            perimeter_dimensions(&contents.perimeter).unwrap_or((UNKNOWN_DIMENSION, UNKNOWN_DIMENSION));

        Self {
            width,
            height,
            unit: BOARD_UNIT.to_string(),
            grid_unit: contents.grid_unit,
            perimeter: contents.perimeter,
            wires: contents.wires,
            circles: contents.circles,
            routed_circles: contents.routed_circles,
            holes: contents.holes,
            vias: contents.vias,
            parts: contents.parts,
            layers: contents.layers,
            polygons: contents.polygons,
        }
    }

    /// Board width, or [`UNKNOWN_DIMENSION`] without a perimeter
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Board height, or [`UNKNOWN_DIMENSION`] without a perimeter
    pub fn height(&self) -> f64 {
        self.height
    }

    /// `(width, height)` when the perimeter defines them
    pub fn dimensions(&self) -> Option<(f64, f64)> {
        if self.perimeter.is_empty() {
            None
        } else {
            Some((self.width, self.height))
        }
    }

    /// Unit of all lengths, always millimetres
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Editor grid unit found in the document, if any
    pub fn grid_unit(&self) -> Option<&str> {
        self.grid_unit.as_deref()
    }

    pub fn perimeter(&self) -> &[PerimeterSegment] {
        &self.perimeter
    }

    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    pub fn routed_circles(&self) -> &[RoutedCircle] {
        &self.routed_circles
    }

    pub fn holes(&self) -> &[Hole] {
        &self.holes
    }

    pub fn vias(&self) -> &[Via] {
        &self.vias
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn layers(&self) -> &LayerTable {
        &self.layers
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Name of a layer from the layer table
    pub fn layer_name(&self, layer: i32) -> Option<&str> {
        self.layers.get(&layer).map(String::as_str)
    }

    /// Wires on `layer`, in stored order
    pub fn wires_on_layer(&self, layer: i32) -> impl Iterator<Item = &Wire> + '_ {
        self.wires.iter().filter(move |w| w.layer() == layer)
    }

    /// Routed circle segments on `layer`, in stored order
    pub fn routed_circles_on_layer(&self, layer: i32) -> impl Iterator<Item = &RoutedCircle> + '_ {
        self.routed_circles.iter().filter(move |c| c.layer() == layer)
    }

    /// Distinct layers carrying wires, routed circles or polygons
    ///
    /// Layers are listed in order of first appearance: wires first, then
    /// routed circles, then polygons.
    pub fn non_empty_layers(&self) -> Vec<i32> {
        let mut layers = Vec::new();
        let candidates = self
            .wires
            .iter()
            .map(|w| w.layer)
            .chain(self.routed_circles.iter().map(|c| c.layer))
            .chain(self.polygons.iter().map(|p| p.layer));

        for layer in candidates {
            if !layers.contains(&layer) {
                layers.push(layer);
            }
        }
        layers
    }
}

/// Bounding extent of the perimeter
///
/// Width is `max(x2) - min(x1)` and height is `max(y2) - min(y1)` over all
/// segments. Returns `None` for an empty perimeter.
fn perimeter_dimensions(perimeter: &[PerimeterSegment]) -> Option<(f64, f64)> {
    if perimeter.is_empty() {
        return None;
    }

    let min_x = perimeter.iter().map(|s| s.x1).fold(f64::INFINITY, f64::min);
    let max_x = perimeter.iter().map(|s| s.x2).fold(f64::NEG_INFINITY, f64::max);
    let min_y = perimeter.iter().map(|s| s.y1).fold(f64::INFINITY, f64::min);
    let max_y = perimeter.iter().map(|s| s.y2).fold(f64::NEG_INFINITY, f64::max);

    Some((max_x - min_x, max_y - min_y))
}
