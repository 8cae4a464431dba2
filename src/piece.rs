//! Piece model: grid shape, individual pieces and the per-session store.
//!
//! A piece's grid identity (`id`, `row`, `col`) and its `target` are fixed for
//! the session. Only `current` and `is_placed` change, and `is_placed` only
//! ever goes from `false` to `true`.

#[cfg(test)]
#[path = "piece_test.rs"]
mod piece_test;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Stable identifier of a piece within a session: `row * columns + col`.
pub type PieceId = u32;

/// Rows × columns the board is cut into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridShape {
    pub rows: u32,
    pub columns: u32,
}

impl GridShape {
    #[must_use]
    pub fn new(rows: u32, columns: u32) -> Self {
        Self { rows, columns }
    }

    /// Number of pieces in a full grid.
    #[must_use]
    pub fn len(self) -> usize {
        self.rows as usize * self.columns as usize
    }

    /// Returns `true` if the grid has no cells.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.rows == 0 || self.columns == 0
    }

    /// Piece id of the cell at `(row, col)`.
    #[must_use]
    pub fn id_of(self, row: u32, col: u32) -> PieceId {
        row * self.columns + col
    }

    /// `(row, col)` of a piece id, or `None` if the id lies outside the grid.
    #[must_use]
    pub fn cell_of(self, id: PieceId) -> Option<(u32, u32)> {
        if self.is_empty() || id as usize >= self.len() {
            return None;
        }
        Some((id / self.columns, id % self.columns))
    }
}

/// One rectangular cell of the source image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub row: u32,
    pub col: u32,
    /// Top-left corner the piece must reach to be placed.
    pub target: Point,
    /// Top-left corner the piece is drawn at.
    pub current: Point,
    pub is_placed: bool,
}

impl Piece {
    /// Create an unplaced piece.
    #[must_use]
    pub fn new(id: PieceId, row: u32, col: u32, target: Point, current: Point) -> Self {
        Self { id, row, col, target, current, is_placed: false }
    }

    /// Per-axis absolute distance between `current` and `target`.
    #[must_use]
    pub fn distance_to_target(&self) -> (f64, f64) {
        ((self.current.x - self.target.x).abs(), (self.current.y - self.target.y).abs())
    }

    /// Lock the piece onto its target. Idempotent.
    pub fn lock(&mut self) {
        self.current = self.target;
        self.is_placed = true;
    }
}

/// The pieces of one session, kept ordered by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PieceSet {
    pieces: Vec<Piece>,
}

impl PieceSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self { pieces: Vec::new() }
    }

    /// Build a set from generated pieces. Order of `pieces` is irrelevant.
    #[must_use]
    pub fn from_pieces(mut pieces: Vec<Piece>) -> Self {
        pieces.sort_by_key(|p| p.id);
        Self { pieces }
    }

    /// Return a reference to a piece by id.
    #[must_use]
    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        self.index_of(id).map(|i| &self.pieces[i])
    }

    /// Return a mutable reference to a piece by id.
    pub fn get_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.index_of(id).map(|i| &mut self.pieces[i])
    }

    fn index_of(&self, id: PieceId) -> Option<usize> {
        self.pieces.iter().position(|p| p.id == id)
    }

    /// Iterate pieces in id order.
    pub fn iter(&self) -> std::slice::Iter<'_, Piece> {
        self.pieces.iter()
    }

    /// Iterate pieces mutably in id order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Piece> {
        self.pieces.iter_mut()
    }

    /// Number of pieces in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Returns `true` if the set contains no pieces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Number of pieces locked into their slot.
    #[must_use]
    pub fn placed_count(&self) -> usize {
        self.pieces.iter().filter(|p| p.is_placed).count()
    }

    /// Completion predicate: every piece is placed.
    ///
    /// Vacuously true for an empty set; the engine never plays an empty grid.
    #[must_use]
    pub fn all_placed(&self) -> bool {
        self.pieces.iter().all(|p| p.is_placed)
    }

    /// Drop every piece.
    pub fn clear(&mut self) {
        self.pieces.clear();
    }
}

impl<'a> IntoIterator for &'a PieceSet {
    type Item = &'a Piece;
    type IntoIter = std::slice::Iter<'a, Piece>;

    fn into_iter(self) -> Self::IntoIter {
        self.pieces.iter()
    }
}
