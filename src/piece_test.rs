#![allow(clippy::float_cmp)]

use super::*;

fn make_piece(id: PieceId, cols: u32) -> Piece {
    let row = id / cols;
    let col = id % cols;
    Piece::new(
        id,
        row,
        col,
        Point::new(f64::from(col) * 100.0, f64::from(row) * 100.0),
        Point::new(0.0, 400.0),
    )
}

// =============================================================
// GridShape
// =============================================================

#[test]
fn grid_len_is_rows_times_columns() {
    assert_eq!(GridShape::new(2, 5).len(), 10);
    assert_eq!(GridShape::new(3, 3).len(), 9);
}

#[test]
fn grid_empty_when_any_dimension_zero() {
    assert!(GridShape::new(0, 5).is_empty());
    assert!(GridShape::new(2, 0).is_empty());
    assert!(!GridShape::new(1, 1).is_empty());
}

#[test]
fn grid_id_of_is_row_major() {
    let grid = GridShape::new(2, 5);
    assert_eq!(grid.id_of(0, 0), 0);
    assert_eq!(grid.id_of(0, 4), 4);
    assert_eq!(grid.id_of(1, 0), 5);
    assert_eq!(grid.id_of(1, 4), 9);
}

#[test]
fn grid_cell_of_inverts_id_of() {
    let grid = GridShape::new(3, 4);
    for row in 0..3 {
        for col in 0..4 {
            assert_eq!(grid.cell_of(grid.id_of(row, col)), Some((row, col)));
        }
    }
}

#[test]
fn grid_cell_of_out_of_range_is_none() {
    assert_eq!(GridShape::new(2, 5).cell_of(10), None);
    assert_eq!(GridShape::new(0, 5).cell_of(0), None);
}

// =============================================================
// Piece
// =============================================================

#[test]
fn piece_new_is_unplaced() {
    assert!(!make_piece(3, 5).is_placed);
}

#[test]
fn piece_distance_is_per_axis_absolute() {
    let mut piece = make_piece(0, 5);
    piece.current = Point::new(-12.0, 7.5);
    assert_eq!(piece.distance_to_target(), (12.0, 7.5));
}

#[test]
fn piece_lock_sets_current_to_target_exactly() {
    let mut piece = make_piece(6, 5);
    piece.current = Point::new(123.4, 98.7);
    piece.lock();
    assert!(piece.is_placed);
    assert_eq!(piece.current, piece.target);
}

// =============================================================
// PieceSet
// =============================================================

#[test]
fn set_new_is_empty() {
    let set = PieceSet::new();
    assert!(set.is_empty());
    assert_eq!(set.len(), 0);
}

#[test]
fn set_from_pieces_orders_by_id() {
    let set = PieceSet::from_pieces(vec![make_piece(2, 5), make_piece(0, 5), make_piece(1, 5)]);
    let ids: Vec<PieceId> = set.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![0, 1, 2]);
}

#[test]
fn set_get_by_id() {
    let set = PieceSet::from_pieces(vec![make_piece(4, 5), make_piece(7, 5)]);
    assert_eq!(set.get(7).map(|p| p.col), Some(2));
    assert!(set.get(5).is_none());
}

#[test]
fn set_get_mut_mutates_in_place() {
    let mut set = PieceSet::from_pieces(vec![make_piece(0, 5)]);
    if let Some(piece) = set.get_mut(0) {
        piece.current = Point::new(1.0, 2.0);
    }
    assert_eq!(set.get(0).map(|p| p.current), Some(Point::new(1.0, 2.0)));
}

#[test]
fn set_placed_count_and_all_placed() {
    let mut set = PieceSet::from_pieces((0..3).map(|id| make_piece(id, 5)).collect());
    assert_eq!(set.placed_count(), 0);
    assert!(!set.all_placed());

    for piece in set.iter_mut() {
        piece.lock();
    }
    assert_eq!(set.placed_count(), 3);
    assert!(set.all_placed());
}

#[test]
fn set_all_placed_false_until_last_piece() {
    let mut set = PieceSet::from_pieces((0..3).map(|id| make_piece(id, 5)).collect());
    for id in 0..2 {
        if let Some(piece) = set.get_mut(id) {
            piece.lock();
        }
        assert!(!set.all_placed());
    }
    if let Some(piece) = set.get_mut(2) {
        piece.lock();
    }
    assert!(set.all_placed());
}

#[test]
fn set_clear_drops_everything() {
    let mut set = PieceSet::from_pieces(vec![make_piece(0, 5), make_piece(1, 5)]);
    set.clear();
    assert!(set.is_empty());
}

#[test]
fn piece_serializes_with_field_names() {
    let json = serde_json::to_value(make_piece(1, 5)).unwrap();
    assert_eq!(json["id"], 1);
    assert_eq!(json["col"], 1);
    assert_eq!(json["is_placed"], false);
    assert_eq!(json["target"]["x"], 100.0);
}
