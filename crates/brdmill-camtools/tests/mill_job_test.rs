use brdmill_camtools::{CamToolError, MillJobGenerator, MAX_COORDINATE};
use brdmill_core::{Axis, Board, BoardContents, Circle, RangeError, RoutedCircle, Wire};
use brdmill_parser::{parse_board_str, CircleRouter};

fn wire(x1: f64, y1: f64, x2: f64, y2: f64, layer: i32) -> Wire {
    Wire {
        x1,
        y1,
        x2,
        y2,
        width: 0.25,
        layer,
    }
}

fn board_with_wires(wires: Vec<Wire>) -> Board {
    Board::new(BoardContents {
        wires,
        ..Default::default()
    })
}

fn compile(layer: i32, board: &Board) -> String {
    MillJobGenerator::default()
        .compile_layer(layer, board)
        .unwrap()
        .into_commands()
}

#[test]
fn test_single_wire_scenario() {
    let xml = r#"<eagle><drawing>
        <layers><layer number="1" name="Top"/></layers>
        <board>
            <plain><wire x1="0" y1="0" x2="10" y2="0" width="0"/></plain>
            <elements/>
            <signals><signal name="S"><wire x1="0" y1="0" x2="5" y2="5" width="0.2" layer="1"/></signal></signals>
        </board>
    </drawing></eagle>"#;
    let board = parse_board_str(xml).unwrap();

    let commands = compile(1, &board);
    assert!(commands.starts_with("PU;"));
    assert!(commands.contains("PA0,0;PD;PD5,5;"));
    assert!(commands.ends_with("MC1;IN;DF"));
    assert_eq!(commands, "PU;PA0,0;PD;PD5,5;PU;\n\n\n\nMC1;IN;DF");
}

#[test]
fn test_adjacent_wires_keep_pen_down() {
    let board = board_with_wires(vec![
        wire(0.0, 0.0, 5.0, 5.0, 1),
        wire(5.0, 5.0, 10.0, 5.0, 1),
    ]);
    let job = MillJobGenerator::default().compile_layer(1, &board).unwrap();

    assert_eq!(
        job.commands(),
        "PU;PA0,0;PD;PD5,5;PA5,5;PD;PD10,5;PU;\n\n\n\nMC1;IN;DF"
    );
    assert_eq!(job.stats().pen_lifts, 1);
    assert_eq!(job.stats().wire_routes, 2);
}

#[test]
fn test_adjacency_tolerates_sub_precision_noise() {
    let board = board_with_wires(vec![
        wire(0.0, 0.0, 1.0, 1.0, 1),
        wire(1.00000001, 0.99999999, 2.0, 2.0, 1),
    ]);
    let job = MillJobGenerator::default().compile_layer(1, &board).unwrap();
    assert_eq!(job.stats().pen_lifts, 1);

    let first_route = job.commands().find("PD1,1;").unwrap();
    let second_route = job.commands().find("PA1,1;").unwrap();
    assert!(!job.commands()[first_route..second_route].contains("PU;"));
}

#[test]
fn test_disjoint_wires_lift_pen() {
    let board = board_with_wires(vec![
        wire(0.0, 0.0, 5.0, 5.0, 1),
        wire(6.0, 6.0, 7.0, 7.0, 1),
    ]);
    let job = MillJobGenerator::default().compile_layer(1, &board).unwrap();

    assert_eq!(
        job.commands(),
        "PU;PA0,0;PD;PD5,5;PU;\nPA6,6;PD;PD7,7;PU;\n\n\n\nMC1;IN;DF"
    );
    assert_eq!(job.stats().pen_lifts, 2);
}

#[test]
fn test_adjacency_uses_same_layer_sequence() {
    // The layer 16 wire between them must not break the layer 1 chain
    let board = board_with_wires(vec![
        wire(0.0, 0.0, 5.0, 5.0, 1),
        wire(40.0, 40.0, 50.0, 50.0, 16),
        wire(5.0, 5.0, 10.0, 0.0, 1),
    ]);

    let job = MillJobGenerator::default().compile_layer(1, &board).unwrap();
    assert_eq!(
        job.commands(),
        "PU;PA0,0;PD;PD5,5;PA5,5;PD;PD10,0;PU;\n\n\n\nMC1;IN;DF"
    );
    assert!(!job.commands().contains("PA40,40"));

    let job = MillJobGenerator::default().compile_layer(16, &board).unwrap();
    assert_eq!(
        job.commands(),
        "PU;PA40,40;PD;PD50,50;PU;\n\n\n\nMC1;IN;DF"
    );
}

#[test]
fn test_last_route_is_milled_and_lifted() {
    let board = board_with_wires(vec![wire(1.0, 2.0, 3.0, 4.0, 1)]);
    let commands = compile(1, &board);
    assert!(commands.contains("PA1,2;PD;PD3,4;PU;\n"));
}

#[test]
fn test_absent_layer_yields_only_preamble_and_finalize() {
    let board = board_with_wires(vec![wire(0.0, 0.0, 5.0, 5.0, 1)]);
    let job = MillJobGenerator::default().compile_layer(99, &board).unwrap();

    assert_eq!(job.commands(), "PU;\n\n\nMC1;IN;DF");
    assert!(!job.commands().contains("PA"));
    assert_eq!(job.stats().routes_milled(), 0);
}

#[test]
fn test_circle_routes_follow_separator() {
    let router = CircleRouter::new();
    let circle = Circle {
        x: 10.0,
        y: 10.0,
        radius: 2.0,
        width: 0.2,
        layer: 1,
    };
    let board = Board::new(BoardContents {
        wires: vec![wire(0.0, 0.0, 1.0, 0.0, 1)],
        routed_circles: router.route(&circle),
        circles: vec![circle],
        ..Default::default()
    });

    let job = MillJobGenerator::default().compile_layer(1, &board).unwrap();
    let commands = job.commands();

    let (wire_section, circle_section) = commands.split_once("\n\n\n").unwrap();
    assert_eq!(wire_section, "PU;PA0,0;PD;PD1,0;PU;");
    assert!(circle_section.trim_start().starts_with("PA12,10;PD;"));
    assert!(circle_section.ends_with("PU;\nMC1;IN;DF"));

    // The 40 edges form one closed chain, so the pen lifts only once
    assert_eq!(job.stats().circle_routes, 40);
    assert_eq!(job.stats().pen_lifts, 2);
    assert_eq!(circle_section.matches("PU;").count(), 1);
    assert_eq!(circle_section.matches("PA").count(), 40);
}

#[test]
fn test_two_circles_lift_between_polygons() {
    let router = CircleRouter::new();
    let circles = vec![
        Circle {
            x: 0.0,
            y: 0.0,
            radius: 1.0,
            width: 0.1,
            layer: 16,
        },
        Circle {
            x: 20.0,
            y: 0.0,
            radius: 1.0,
            width: 0.1,
            layer: 16,
        },
    ];
    let board = Board::new(BoardContents {
        routed_circles: router.route_all(&circles),
        circles,
        ..Default::default()
    });

    let job = MillJobGenerator::default().compile_layer(16, &board).unwrap();
    assert_eq!(job.stats().pen_lifts, 2);
    assert_eq!(job.stats().routes_milled(), 80);
}

#[test]
fn test_milled_length() {
    let board = board_with_wires(vec![
        wire(0.0, 0.0, 3.0, 4.0, 1),
        wire(3.0, 4.0, 3.0, 10.0, 1),
    ]);
    let job = MillJobGenerator::default().compile_layer(1, &board).unwrap();
    assert!((job.stats().milled_length - 11.0).abs() < 1e-12);
}

#[test]
fn test_out_of_range_aborts_compilation() {
    let board = board_with_wires(vec![
        wire(0.0, 0.0, 5.0, 5.0, 1),
        wire(5.0, 5.0, MAX_COORDINATE, 5.0, 1),
    ]);

    let err = MillJobGenerator::default()
        .compile_layer(1, &board)
        .unwrap_err();
    assert!(err.is_range_error());
    match err {
        CamToolError::Range(RangeError::OutOfRange { axis, value, .. }) => {
            assert_eq!(axis, Axis::X);
            assert_eq!(value, MAX_COORDINATE);
        }
        other => panic!("expected range error, got {other:?}"),
    }
}

#[test]
fn test_out_of_range_circle_edge_aborts_compilation() {
    let board = Board::new(BoardContents {
        routed_circles: vec![RoutedCircle {
            x1: 0.0,
            y1: -8388607.5,
            x2: 1.0,
            y2: 0.0,
            width: 0.1,
            layer: 1,
        }],
        ..Default::default()
    });
    assert!(MillJobGenerator::default().compile_layer(1, &board).is_err());
    // Other layers are unaffected
    assert!(MillJobGenerator::default().compile_layer(2, &board).is_ok());
}

#[test]
fn test_generate_job_prepends_single_initialization() {
    let board = board_with_wires(vec![wire(0.0, 0.0, 5.0, 5.0, 1)]);
    let generator = MillJobGenerator::default();
    let job = generator.generate_job(1, &board).unwrap();

    assert_eq!(
        job.commands(),
        "IN; VS5; !VZ5; PZ0,300; PU; PU0,0; PD;\nPU;PA0,0;PD;PD5,5;PU;\n\n\n\nMC1;IN;DF"
    );
    assert_eq!(job.commands().matches("VS5;").count(), 1);
    assert_eq!(job.to_string(), job.commands());
}

#[test]
fn test_compilation_is_deterministic() {
    let board = board_with_wires(vec![
        wire(0.123456789, 1.0, 2.0, 3.0, 1),
        wire(9.0, 9.0, 1.0, 1.0, 1),
    ]);
    let generator = MillJobGenerator::default();
    let first = generator.compile_layer(1, &board).unwrap();
    let second = generator.compile_layer(1, &board).unwrap();
    assert_eq!(first, second);
    assert!(first.commands().contains("PA0.1234568,1;"));
}

#[test]
fn test_coordinate_rounding_onto_bound_aborts_compilation() {
    // Written as 8388607 after rounding, so it must be rejected
    let board = board_with_wires(vec![wire(0.0, 0.0, 8388606.99999999, 0.0, 1)]);

    let err = MillJobGenerator::default()
        .compile_layer(1, &board)
        .unwrap_err();
    assert!(err.is_range_error());

    let board = board_with_wires(vec![wire(0.0, 0.0, 8388606.9999999, 0.0, 1)]);
    let job = MillJobGenerator::default().compile_layer(1, &board).unwrap();
    assert!(job.commands().contains("PD8388606.9999999,0;"));
}
