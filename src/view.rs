//! Render projection of a session.
//!
//! `BoardView` is everything a host needs to draw a frame: where each piece
//! sits, which slice of the image it shows, its stacking layer, which slot
//! outlines are still visible, and the progress counter. It is rebuilt from
//! engine state on demand and never fed back into the engine.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use rand::Rng;
use serde::Serialize;

use crate::consts::{LAYER_ACTIVE, LAYER_LOOSE, LAYER_PLACED, STAGE_EXTRA_HEIGHT_PX};
use crate::engine::{GameCore, Phase};
use crate::geometry::{Point, Size};
use crate::piece::{Piece, PieceId};

/// Draw data for one piece.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieceView {
    pub id: PieceId,
    pub row: u32,
    pub col: u32,
    pub position: Point,
    pub size: Size,
    /// CSS-style background offset selecting this piece's slice of the image.
    pub background_offset: Point,
    pub layer: u32,
    pub is_placed: bool,
    pub is_active: bool,
}

/// Dashed outline of one target slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotView {
    pub row: u32,
    pub col: u32,
    pub origin: Point,
    pub size: Size,
    /// Hidden once the slot's piece is placed.
    pub outlined: bool,
}

/// A complete frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardView {
    pub phase: Phase,
    pub puzzle_id: &'static str,
    pub image_asset: &'static str,
    /// Size of the target area; also the image's background size.
    pub board: Size,
    /// Height of the whole stage, including the staging band while playing.
    pub stage_height: f64,
    pub pieces: Vec<PieceView>,
    pub slots: Vec<SlotView>,
    pub placed: usize,
    pub total: usize,
}

impl BoardView {
    /// Project the current engine state. Pieces and slots are empty while the
    /// geometry is not renderable.
    #[must_use]
    pub fn project<R: Rng>(core: &GameCore<R>) -> Self {
        let geometry = core.geometry();
        let phase = core.phase();
        let active = core.active_piece();
        let (placed, total) = core.progress();
        let puzzle = core.puzzle();

        let (pieces, slots) = if core.is_renderable() {
            let pieces = core.pieces().iter().map(|p| piece_view(p, geometry.piece, active)).collect();
            let slots = if phase == Phase::Playing {
                core.pieces()
                    .iter()
                    .map(|p| SlotView {
                        row: p.row,
                        col: p.col,
                        origin: p.target,
                        size: geometry.piece,
                        outlined: !p.is_placed,
                    })
                    .collect()
            } else {
                Vec::new()
            };
            (pieces, slots)
        } else {
            (Vec::new(), Vec::new())
        };

        let stage_height = if phase == Phase::Playing {
            geometry.board.height + STAGE_EXTRA_HEIGHT_PX
        } else {
            geometry.board.height
        };

        Self {
            phase,
            puzzle_id: puzzle.id,
            image_asset: puzzle.asset,
            board: geometry.board,
            stage_height,
            pieces,
            slots,
            placed,
            total,
        }
    }

    /// Progress caption, e.g. `"Pieces placed: 3 / 10"`.
    #[must_use]
    pub fn progress_label(&self) -> String {
        format!("Pieces placed: {} / {}", self.placed, self.total)
    }

    /// Pieces in draw order: lowest layer first, id breaking ties.
    #[must_use]
    pub fn draw_order(&self) -> Vec<&PieceView> {
        let mut ordered: Vec<&PieceView> = self.pieces.iter().collect();
        ordered.sort_by(|a, b| a.layer.cmp(&b.layer).then_with(|| a.id.cmp(&b.id)));
        ordered
    }
}

fn piece_view(piece: &Piece, size: Size, active: Option<PieceId>) -> PieceView {
    let is_active = active == Some(piece.id);
    let layer = if is_active {
        LAYER_ACTIVE
    } else if piece.is_placed {
        LAYER_PLACED
    } else {
        LAYER_LOOSE
    };
    PieceView {
        id: piece.id,
        row: piece.row,
        col: piece.col,
        position: piece.current,
        size,
        background_offset: Point::new(-f64::from(piece.col) * size.width, -f64::from(piece.row) * size.height),
        layer,
        is_placed: piece.is_placed,
        is_active,
    }
}
