//! Piece set generation: slot targets, staging-band scatter and shuffle.
//!
//! Pieces start in a band below the board so the empty board outline stays
//! visible. Scatter positions are drawn per piece and then permuted across
//! pieces with Fisher–Yates, so a piece's image slice tells nothing about
//! where it starts. Both steps draw from a caller-supplied [`Rng`].

#[cfg(test)]
#[path = "scatter_test.rs"]
mod scatter_test;

use rand::Rng;

use crate::geometry::{BoardGeometry, Point};
use crate::piece::{GridShape, Piece, PieceSet};

/// Bounds of the staging band pieces are scattered into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterBand {
    /// Gap between the board's bottom edge and the top of the band.
    pub margin: f64,
    /// Height of the band.
    pub range: f64,
}

/// Generate a fresh, scattered and shuffled piece set for `grid`.
#[must_use]
pub fn generate_pieces<R: Rng + ?Sized>(
    geometry: &BoardGeometry,
    grid: GridShape,
    band: ScatterBand,
    rng: &mut R,
) -> PieceSet {
    let mut pieces = Vec::with_capacity(grid.len());
    for row in 0..grid.rows {
        for col in 0..grid.columns {
            let id = grid.id_of(row, col);
            let target = geometry.slot_origin(row, col);
            let start = scatter_point(geometry, band, rng);
            pieces.push(Piece::new(id, row, col, target, start));
        }
    }
    shuffle_positions(&mut pieces, rng);
    PieceSet::from_pieces(pieces)
}

/// Draw one starting point inside the staging band.
///
/// `x` is uniform in `[0, board.width - piece.width)`; `y` is uniform in
/// `[board.height + margin, board.height + margin + range)`.
pub fn scatter_point<R: Rng + ?Sized>(geometry: &BoardGeometry, band: ScatterBand, rng: &mut R) -> Point {
    let span_x = (geometry.board.width - geometry.piece.width).max(0.0);
    let x = rng.random::<f64>() * span_x;
    let y = geometry.board.height + band.margin + rng.random::<f64>() * band.range;
    Point::new(x, y)
}

/// Fisher–Yates over the `current` positions of `pieces`.
///
/// Identity fields (`id`, `row`, `col`, `target`) stay with their piece; only
/// the starting points move. Every permutation is equally likely.
pub fn shuffle_positions<R: Rng + ?Sized>(pieces: &mut [Piece], rng: &mut R) {
    for i in (1..pieces.len()).rev() {
        let j = rng.random_range(0..=i);
        if j < i {
            let (head, tail) = pieces.split_at_mut(i);
            std::mem::swap(&mut head[j].current, &mut tail[0].current);
        }
    }
}
