//! Board report
//!
//! Human readable summaries of a parsed board for the `info` and `layers`
//! commands.

use brdmill_core::{format_coordinate, Board, Route};
use std::collections::BTreeMap;
use std::fmt::{self, Write};

fn heading(out: &mut String, title: &str) -> fmt::Result {
    writeln!(out, "{title}:")?;
    writeln!(out, "--------------------")
}

fn point(x: f64, y: f64) -> String {
    format!("({}, {})", format_coordinate(x), format_coordinate(y))
}

fn optional(value: Option<f64>) -> String {
    value.map_or_else(|| "none".to_string(), format_coordinate)
}

/// Group routes by layer, keeping stored order within a layer
fn by_layer<R: Route>(routes: &[R]) -> BTreeMap<i32, Vec<&R>> {
    let mut grouped: BTreeMap<i32, Vec<&R>> = BTreeMap::new();
    for route in routes {
        grouped.entry(route.layer()).or_default().push(route);
    }
    grouped
}

fn write_routes<R: Route>(out: &mut String, routes: &[R]) -> fmt::Result {
    for (layer, routes) in by_layer(routes) {
        writeln!(out, "Layer {layer}:")?;
        for route in routes {
            let (start, end) = (route.start(), route.end());
            writeln!(
                out,
                "  {} -> {}",
                point(start.x, start.y),
                point(end.x, end.y)
            )?;
        }
    }
    Ok(())
}

/// Full report of every entity on the board
pub fn board_report(board: &Board) -> Result<String, fmt::Error> {
    let mut out = String::new();

    heading(&mut out, "Board dimensions")?;
    match board.dimensions() {
        Some((width, height)) => {
            writeln!(out, "Width: {}", format_coordinate(width))?;
            writeln!(out, "Height: {}", format_coordinate(height))?;
        }
        None => writeln!(out, "Unknown (no perimeter)")?,
    }

    writeln!(out)?;
    heading(&mut out, "Unit")?;
    writeln!(out, "{}", board.unit())?;
    if let Some(grid) = board.grid_unit() {
        writeln!(out, "Grid unit in document: {grid}")?;
    }

    writeln!(out)?;
    heading(&mut out, "Perimeter")?;
    for segment in board.perimeter() {
        writeln!(
            out,
            "{} -> {} with curvature {}, width: {}",
            point(segment.x1, segment.y1),
            point(segment.x2, segment.y2),
            optional(segment.curve),
            format_coordinate(segment.width)
        )?;
    }

    writeln!(out)?;
    heading(&mut out, "Layers")?;
    for (number, name) in board.layers() {
        writeln!(out, "{number}: {name}")?;
    }

    writeln!(out)?;
    heading(&mut out, "Parts")?;
    for part in board.parts() {
        writeln!(
            out,
            "{} {} {} {} at {}, rotation {}",
            part.name,
            part.value,
            part.library,
            part.package,
            point(part.x, part.y),
            part.rot.as_deref().unwrap_or("none")
        )?;
    }

    writeln!(out)?;
    heading(&mut out, "Wires")?;
    write_routes(&mut out, board.wires())?;

    writeln!(out)?;
    heading(&mut out, "Circles")?;
    for circle in board.circles() {
        writeln!(
            out,
            "{}, radius: {}, width: {}, layer: {}",
            point(circle.x, circle.y),
            format_coordinate(circle.radius),
            format_coordinate(circle.width),
            circle.layer
        )?;
    }

    writeln!(out)?;
    heading(&mut out, "Holes")?;
    for hole in board.holes() {
        writeln!(
            out,
            "{}, drill size: {}",
            point(hole.x, hole.y),
            format_coordinate(hole.drill)
        )?;
    }

    writeln!(out)?;
    heading(&mut out, "Vias")?;
    for via in board.vias() {
        writeln!(
            out,
            "{}, drill size: {}, extent: {}",
            point(via.x, via.y),
            format_coordinate(via.drill),
            via.extent
        )?;
    }

    writeln!(out)?;
    heading(&mut out, "Polygons")?;
    for polygon in board.polygons() {
        writeln!(
            out,
            "Polygon on layer {} with width {}",
            polygon.layer,
            format_coordinate(polygon.width)
        )?;
        for vertex in &polygon.vertices {
            writeln!(
                out,
                "   {} curve {}",
                point(vertex.x, vertex.y),
                optional(vertex.curve)
            )?;
        }
    }

    writeln!(out)?;
    heading(&mut out, "Routed circles")?;
    write_routes(&mut out, board.routed_circles())?;

    Ok(out)
}

/// One line per non-empty layer: number and name
pub fn layer_summary(board: &Board) -> Result<String, fmt::Error> {
    let mut out = String::new();
    for layer in board.non_empty_layers() {
        let wires = board.wires_on_layer(layer).count();
        let edges = board.routed_circles_on_layer(layer).count();
        write!(out, "{layer}")?;
        if let Some(name) = board.layer_name(layer) {
            write!(out, "\t{name}")?;
        }
        writeln!(out, "\t{wires} wires, {edges} circle edges")?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use brdmill_core::{
        BoardContents, Hole, LayerTable, Part, PerimeterSegment, Polygon, Vertex, Via, Wire,
    };

    fn board() -> Board {
        let mut layers = LayerTable::new();
        layers.insert(1, "Top".to_string());
        Board::new(BoardContents {
            perimeter: vec![PerimeterSegment {
                x1: 0.0,
                y1: 0.0,
                x2: 10.0,
                y2: 0.0,
                width: 0.0,
                curve: Some(-90.0),
            }],
            wires: vec![Wire {
                x1: 0.0,
                y1: 0.0,
                x2: 5.0,
                y2: 5.0,
                width: 0.2,
                layer: 1,
            }],
            holes: vec![Hole {
                x: 1.0,
                y: 2.0,
                drill: 3.2,
            }],
            vias: vec![Via {
                x: 4.0,
                y: 4.5,
                extent: "1-16".to_string(),
                drill: 0.6,
            }],
            parts: vec![Part {
                name: "R1".to_string(),
                library: "rcl".to_string(),
                package: "R0805".to_string(),
                value: "330".to_string(),
                x: 12.7,
                y: 3.0,
                rot: None,
            }],
            polygons: vec![Polygon {
                width: 0.4,
                layer: 16,
                vertices: vec![Vertex {
                    x: 1.0,
                    y: 1.0,
                    curve: None,
                }],
            }],
            layers,
            grid_unit: Some("mil".to_string()),
            ..Default::default()
        })
    }

    #[test]
    fn test_board_report_sections() {
        let report = board_report(&board()).unwrap();
        assert!(report.contains("Width: 10\nHeight: 0\n"));
        assert!(report.contains("Grid unit in document: mil"));
        assert!(report.contains("(0, 0) -> (10, 0) with curvature -90, width: 0"));
        assert!(report.contains("1: Top"));
        assert!(report.contains("R1 330 rcl R0805 at (12.7, 3), rotation none"));
        assert!(report.contains("Layer 1:\n  (0, 0) -> (5, 5)"));
        assert!(report.contains("(1, 2), drill size: 3.2"));
        assert!(report.contains("(4, 4.5), drill size: 0.6, extent: 1-16"));
        assert!(report.contains("Polygon on layer 16 with width 0.4\n   (1, 1) curve none"));
    }

    #[test]
    fn test_report_without_perimeter() {
        let report = board_report(&Board::new(BoardContents::default())).unwrap();
        assert!(report.contains("Unknown (no perimeter)"));
        assert!(report.contains("mm"));
    }

    #[test]
    fn test_layer_summary() {
        let summary = layer_summary(&board()).unwrap();
        assert_eq!(summary, "1\tTop\t1 wires, 0 circle edges\n16\t0 wires, 0 circle edges\n");
    }
}
