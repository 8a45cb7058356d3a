use brdmill_core::{Board, BoardContents, PerimeterSegment, Route, Wire};
use std::sync::Arc;
use std::thread;

fn assert_send_sync<T: Send + Sync>() {}

fn board() -> Board {
    let wires = (0..100)
        .map(|i| Wire {
            x1: i as f64,
            y1: 0.0,
            x2: i as f64 + 1.0,
            y2: 0.0,
            width: 0.2,
            layer: if i % 2 == 0 { 1 } else { 16 },
        })
        .collect();

    Board::new(BoardContents {
        perimeter: vec![PerimeterSegment {
            x1: 0.0,
            y1: 0.0,
            x2: 100.0,
            y2: 80.0,
            width: 0.0,
            curve: None,
        }],
        wires,
        ..Default::default()
    })
}

#[test]
fn test_board_is_shareable() {
    assert_send_sync::<Board>();
}

#[test]
fn test_concurrent_layer_reads() {
    let board = Arc::new(board());

    let handles: Vec<_> = [1, 16]
        .into_iter()
        .map(|layer| {
            let board = Arc::clone(&board);
            thread::spawn(move || {
                let length: f64 = board.wires_on_layer(layer).map(|w| w.length()).sum();
                (layer, board.wires_on_layer(layer).count(), length)
            })
        })
        .collect();

    for handle in handles {
        let (_layer, count, length) = handle.join().unwrap();
        assert_eq!(count, 50);
        assert!((length - 50.0).abs() < 1e-12);
    }

    assert_eq!(board.dimensions(), Some((100.0, 80.0)));
    assert_eq!(board.non_empty_layers(), vec![1, 16]);
}

#[test]
fn test_board_serializes() {
    let board = board();
    let json = serde_json::to_value(&board).unwrap();
    assert_eq!(json["width"], 100.0);
    assert_eq!(json["unit"], "mm");
    assert_eq!(json["wires"].as_array().unwrap().len(), 100);
}
