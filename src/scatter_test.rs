#![allow(clippy::float_cmp, clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]

use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;
use crate::geometry::Size;
use crate::piece::PieceId;

fn band() -> ScatterBand {
    ScatterBand { margin: 50.0, range: 200.0 }
}

fn geometry_2x5() -> BoardGeometry {
    BoardGeometry::new(Size::new(500.0, 200.0), GridShape::new(2, 5))
}

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

fn positions(pieces: &[Piece]) -> Vec<(u64, u64)> {
    let mut out: Vec<(u64, u64)> = pieces.iter().map(|p| (p.current.x.to_bits(), p.current.y.to_bits())).collect();
    out.sort_unstable();
    out
}

fn unshuffled(count: u32) -> Vec<Piece> {
    (0..count)
        .map(|id| Piece::new(id, 0, id, Point::new(0.0, 0.0), Point::new(f64::from(id), f64::from(id) * 10.0)))
        .collect()
}

// =============================================================
// generate_pieces: grid coverage
// =============================================================

#[test]
fn generates_one_piece_per_cell() {
    let set = generate_pieces(&geometry_2x5(), GridShape::new(2, 5), band(), &mut rng(1));
    assert_eq!(set.len(), 10);

    let cells: HashSet<(u32, u32)> = set.iter().map(|p| (p.row, p.col)).collect();
    assert_eq!(cells.len(), 10);
    for piece in &set {
        assert_eq!(piece.id, piece.row * 5 + piece.col);
    }
}

#[test]
fn generates_exact_coverage_for_many_shapes() {
    for (rows, cols) in [(1, 1), (1, 7), (3, 3), (4, 6)] {
        let grid = GridShape::new(rows, cols);
        let geometry = BoardGeometry::new(Size::new(600.0, 400.0), grid);
        let set = generate_pieces(&geometry, grid, band(), &mut rng(9));
        let ids: HashSet<PieceId> = set.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), grid.len(), "{rows}x{cols}");
        assert!(ids.iter().all(|id| (*id as usize) < grid.len()));
    }
}

#[test]
fn targets_are_slot_origins() {
    let geometry = geometry_2x5();
    let set = generate_pieces(&geometry, GridShape::new(2, 5), band(), &mut rng(2));
    for piece in &set {
        assert_eq!(piece.target, Point::new(f64::from(piece.col) * 100.0, f64::from(piece.row) * 100.0));
    }
}

#[test]
fn generated_pieces_start_unplaced() {
    let set = generate_pieces(&geometry_2x5(), GridShape::new(2, 5), band(), &mut rng(3));
    assert_eq!(set.placed_count(), 0);
}

// =============================================================
// Scatter containment
// =============================================================

#[test]
fn scatter_stays_in_staging_band() {
    let geometry = geometry_2x5();
    for seed in 0..50 {
        let set = generate_pieces(&geometry, GridShape::new(2, 5), band(), &mut rng(seed));
        for piece in &set {
            assert!(piece.current.x >= 0.0 && piece.current.x <= 400.0, "x={}", piece.current.x);
            assert!(piece.current.y >= 250.0 && piece.current.y < 450.0, "y={}", piece.current.y);
            assert!(piece.current.y >= geometry.board.height);
        }
    }
}

#[test]
fn scatter_single_column_pins_x_to_zero() {
    let grid = GridShape::new(3, 1);
    let geometry = BoardGeometry::new(Size::new(100.0, 300.0), grid);
    let set = generate_pieces(&geometry, grid, band(), &mut rng(4));
    assert!(set.iter().all(|p| p.current.x == 0.0));
}

#[test]
fn same_seed_same_deal() {
    let a = generate_pieces(&geometry_2x5(), GridShape::new(2, 5), band(), &mut rng(42));
    let b = generate_pieces(&geometry_2x5(), GridShape::new(2, 5), band(), &mut rng(42));
    assert_eq!(a, b);
}

#[test]
fn different_seeds_differ() {
    let a = generate_pieces(&geometry_2x5(), GridShape::new(2, 5), band(), &mut rng(1));
    let b = generate_pieces(&geometry_2x5(), GridShape::new(2, 5), band(), &mut rng(2));
    assert_ne!(a, b);
}

// =============================================================
// shuffle_positions
// =============================================================

#[test]
fn shuffle_is_a_permutation_of_positions() {
    let mut pieces = unshuffled(10);
    let before = positions(&pieces);
    shuffle_positions(&mut pieces, &mut rng(5));
    assert_eq!(positions(&pieces), before);
}

#[test]
fn shuffle_leaves_identity_untouched() {
    let mut pieces = unshuffled(8);
    shuffle_positions(&mut pieces, &mut rng(6));
    for (index, piece) in pieces.iter().enumerate() {
        assert_eq!(piece.id as usize, index);
        assert_eq!(piece.col as usize, index);
        assert_eq!(piece.target, Point::new(0.0, 0.0));
    }
}

#[test]
fn shuffle_keeps_x_and_y_paired() {
    let mut pieces = unshuffled(10);
    shuffle_positions(&mut pieces, &mut rng(7));
    for piece in &pieces {
        assert_eq!(piece.current.y, piece.current.x * 10.0);
    }
}

#[test]
fn shuffle_handles_empty_and_single() {
    let mut empty: Vec<Piece> = Vec::new();
    shuffle_positions(&mut empty, &mut rng(8));
    let mut one = unshuffled(1);
    shuffle_positions(&mut one, &mut rng(8));
    assert_eq!(one[0].current, Point::new(0.0, 0.0));
}

#[test]
fn shuffle_outcomes_are_uniform() {
    // Three pieces have six orderings; each should appear about 1/6 of the time.
    const TRIALS: usize = 60_000;
    let mut counts = std::collections::HashMap::new();
    let mut r = rng(11);
    for _ in 0..TRIALS {
        let mut pieces = unshuffled(3);
        shuffle_positions(&mut pieces, &mut r);
        let order: Vec<u32> = pieces.iter().map(|p| p.current.x as u32).collect();
        *counts.entry(order).or_insert(0usize) += 1;
    }
    assert_eq!(counts.len(), 6);
    let expected = TRIALS as f64 / 6.0;
    for (order, count) in &counts {
        let deviation = (*count as f64 - expected).abs() / expected;
        assert!(deviation < 0.05, "ordering {order:?} seen {count} times");
    }
}

#[test]
fn shuffled_position_is_independent_of_index() {
    // Each original position should land on each index about equally often.
    const TRIALS: usize = 20_000;
    const N: usize = 5;
    let mut hits = [[0usize; N]; N];
    let mut r = rng(13);
    for _ in 0..TRIALS {
        let mut pieces = unshuffled(N as u32);
        shuffle_positions(&mut pieces, &mut r);
        for (index, piece) in pieces.iter().enumerate() {
            hits[index][piece.current.x as usize] += 1;
        }
    }
    let expected = TRIALS as f64 / N as f64;
    for row in &hits {
        for &count in row {
            assert!((count as f64 - expected).abs() / expected < 0.06, "count {count}");
        }
    }
}
