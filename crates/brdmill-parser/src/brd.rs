//! Board document parser
//!
//! Parses XML board files (`.brd`) into a [`Board`].
//!
//! Key format details:
//! - All geometry is read as millimetres; the `grid` unit is the editor
//!   grid and is recorded but never applied
//! - The board outline is every `wire` under `plain`
//! - Copper wires, vias and polygons are nested under `signals/signal`
//! - Layers are identified by integer number

use crate::circle_router::CircleRouter;
use crate::error::{ParseError, Result};
use brdmill_core::{
    Board, BoardContents, Circle, Hole, LayerTable, Part, PerimeterSegment, Polygon, Vertex, Via,
    Wire, BOARD_UNIT,
};
use roxmltree::{Document, Node, ParsingOptions};
use std::io::Read;
use std::str::FromStr;
use tracing::{debug, warn};

/// Parser for XML board documents
#[derive(Debug, Default)]
pub struct BoardParser {
    router: CircleRouter,
}

impl BoardParser {
    pub fn new() -> Self {
        Self {
            router: CircleRouter::new(),
        }
    }

    /// Parse a board from an open reader
    pub fn parse_reader<R: Read>(&self, mut reader: R) -> Result<Board> {
        let mut xml = String::new();
        reader.read_to_string(&mut xml)?;
        self.parse_str(&xml)
    }

    /// Parse a board from document text
    pub fn parse_str(&self, xml: &str) -> Result<Board> {
        // Board files carry a DOCTYPE declaration
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let doc = Document::parse_with_options(xml, options)?;
        self.parse_document(&doc)
    }

    fn parse_document(&self, doc: &Document) -> Result<Board> {
        let root = doc.root_element();

        let plain = find_section(root, "plain")?;
        let signals = find_section(root, "signals")?;
        let elements = find_section(root, "elements")?;
        let layers = find_section(root, "layers")?;

        let perimeter = Self::parse_perimeter(plain)?;
        let circles = Self::parse_circles(plain)?;
        let holes = Self::parse_holes(plain)?;
        let wires = Self::parse_wires(signals)?;
        let vias = Self::parse_vias(signals)?;
        let polygons = Self::parse_polygons(signals)?;
        let parts = Self::parse_parts(elements)?;
        let layers = Self::parse_layers(layers)?;
        let routed_circles = self.router.route_all(&circles);

        let grid_unit = Self::parse_grid_unit(root);
        if let Some(unit) = grid_unit.as_deref() {
            if unit != BOARD_UNIT {
                warn!(
                    "Document grid unit is '{}'; board geometry is read as {}",
                    unit, BOARD_UNIT
                );
            }
        }

        debug!(
            perimeter = perimeter.len(),
            wires = wires.len(),
            circles = circles.len(),
            routed_circles = routed_circles.len(),
            holes = holes.len(),
            vias = vias.len(),
            parts = parts.len(),
            layers = layers.len(),
            polygons = polygons.len(),
            "Parsed board document"
        );

        Ok(Board::new(BoardContents {
            perimeter,
            wires,
            circles,
            routed_circles,
            holes,
            vias,
            parts,
            layers,
            polygons,
            grid_unit,
        }))
    }

    fn parse_grid_unit(root: Node) -> Option<String> {
        root.descendants()
            .find(|n| n.has_tag_name("grid"))
            .and_then(|grid| grid.attribute("unit"))
            .map(str::to_string)
    }

    fn parse_perimeter(plain: Node) -> Result<Vec<PerimeterSegment>> {
        children_named(plain, "wire")
            .map(|wire| {
                Ok(PerimeterSegment {
                    x1: parse_attr(&wire, "x1", "wire")?,
                    y1: parse_attr(&wire, "y1", "wire")?,
                    x2: parse_attr(&wire, "x2", "wire")?,
                    y2: parse_attr(&wire, "y2", "wire")?,
                    width: parse_attr(&wire, "width", "wire")?,
                    curve: parse_optional_attr(&wire, "curve", "wire")?,
                })
            })
            .collect()
    }

    fn parse_wires(signals: Node) -> Result<Vec<Wire>> {
        children_named(signals, "wire")
            .map(|wire| {
                Ok(Wire {
                    x1: parse_attr(&wire, "x1", "wire")?,
                    y1: parse_attr(&wire, "y1", "wire")?,
                    x2: parse_attr(&wire, "x2", "wire")?,
                    y2: parse_attr(&wire, "y2", "wire")?,
                    width: parse_attr(&wire, "width", "wire")?,
                    layer: parse_attr(&wire, "layer", "wire")?,
                })
            })
            .collect()
    }

    fn parse_circles(plain: Node) -> Result<Vec<Circle>> {
        children_named(plain, "circle")
            .map(|circle| {
                Ok(Circle {
                    x: parse_attr(&circle, "x", "circle")?,
                    y: parse_attr(&circle, "y", "circle")?,
                    radius: parse_attr(&circle, "radius", "circle")?,
                    width: parse_attr(&circle, "width", "circle")?,
                    layer: parse_attr(&circle, "layer", "circle")?,
                })
            })
            .collect()
    }

    fn parse_holes(plain: Node) -> Result<Vec<Hole>> {
        children_named(plain, "hole")
            .map(|hole| {
                Ok(Hole {
                    x: parse_attr(&hole, "x", "hole")?,
                    y: parse_attr(&hole, "y", "hole")?,
                    drill: parse_attr(&hole, "drill", "hole")?,
                })
            })
            .collect()
    }

    fn parse_vias(signals: Node) -> Result<Vec<Via>> {
        children_named(signals, "via")
            .map(|via| {
                Ok(Via {
                    x: parse_attr(&via, "x", "via")?,
                    y: parse_attr(&via, "y", "via")?,
                    extent: required_str(&via, "extent", "via")?,
                    drill: parse_attr(&via, "drill", "via")?,
                })
            })
            .collect()
    }

    fn parse_parts(elements: Node) -> Result<Vec<Part>> {
        children_named(elements, "element")
            .map(|element| {
                Ok(Part {
                    name: required_str(&element, "name", "element")?,
                    library: required_str(&element, "library", "element")?,
                    package: required_str(&element, "package", "element")?,
                    value: required_str(&element, "value", "element")?,
                    x: parse_attr(&element, "x", "element")?,
                    y: parse_attr(&element, "y", "element")?,
                    rot: element.attribute("rot").map(str::to_string),
                })
            })
            .collect()
    }

    fn parse_layers(layers: Node) -> Result<LayerTable> {
        let mut table = LayerTable::new();
        for layer in children_named(layers, "layer") {
            let number: i32 = parse_attr(&layer, "number", "layer")?;
            let name = required_str(&layer, "name", "layer")?;
            // Duplicate numbers: last one wins
            table.insert(number, name);
        }
        Ok(table)
    }

    fn parse_polygons(signals: Node) -> Result<Vec<Polygon>> {
        children_named(signals, "polygon")
            .map(|polygon| {
                let vertices = children_named(polygon, "vertex")
                    .map(|vertex| {
                        Ok(Vertex {
                            x: parse_attr(&vertex, "x", "vertex")?,
                            y: parse_attr(&vertex, "y", "vertex")?,
                            curve: parse_optional_attr(&vertex, "curve", "vertex")?,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;

                Ok(Polygon {
                    width: parse_attr(&polygon, "width", "polygon")?,
                    layer: parse_attr(&polygon, "layer", "polygon")?,
                    vertices,
                })
            })
            .collect()
    }
}

/// First element with `tag` anywhere below the root
fn find_section<'a, 'input>(
    root: Node<'a, 'input>,
    tag: &'static str,
) -> Result<Node<'a, 'input>> {
    root.descendants()
        .find(|n| n.has_tag_name(tag))
        .ok_or(ParseError::MissingElement(tag))
}

/// Every element named `tag` nested anywhere inside `section`, in document order
fn children_named<'a, 'input: 'a>(
    section: Node<'a, 'input>,
    tag: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    section.descendants().filter(move |n| n.has_tag_name(tag))
}

fn required_str(node: &Node, attr: &'static str, element: &'static str) -> Result<String> {
    node.attribute(attr)
        .map(str::to_string)
        .ok_or(ParseError::MissingAttribute { element, attr })
}

/// Numeric attribute types
trait Numeric: FromStr {
    /// `NaN` and infinities parse as floats but are not coordinates
    fn is_usable(&self) -> bool;
}

impl Numeric for f64 {
    fn is_usable(&self) -> bool {
        self.is_finite()
    }
}

impl Numeric for i32 {
    fn is_usable(&self) -> bool {
        true
    }
}

fn parse_number<T: Numeric>(value: &str, attr: &'static str, element: &'static str) -> Result<T> {
    value
        .trim()
        .parse::<T>()
        .ok()
        .filter(T::is_usable)
        .ok_or_else(|| ParseError::InvalidNumber {
            element,
            attr,
            value: value.to_string(),
        })
}

fn parse_attr<T: Numeric>(node: &Node, attr: &'static str, element: &'static str) -> Result<T> {
    let value = node
        .attribute(attr)
        .ok_or(ParseError::MissingAttribute { element, attr })?;
    parse_number(value, attr, element)
}

fn parse_optional_attr<T: Numeric>(
    node: &Node,
    attr: &'static str,
    element: &'static str,
) -> Result<Option<T>> {
    node.attribute(attr)
        .map(|value| parse_number(value, attr, element))
        .transpose()
}
