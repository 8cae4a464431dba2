//! Input model: pointer identity and the drag state machine.
//!
//! Only one pointer may drive a drag at a time. `InputState` records which
//! piece is being dragged, by which pointer, and where the pointer grabbed it
//! so moves keep that grab point under the pointer instead of re-centering.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::piece::PieceId;

/// Identifier of a mouse, pen or touch contact as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PointerId(pub u32);

impl PointerId {
    /// The mouse, or the first touch contact.
    pub const PRIMARY: PointerId = PointerId(0);
}

/// Drag tracker state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No drag in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A piece is following a pointer.
    DraggingPiece {
        /// Id of the piece being dragged.
        id: PieceId,
        /// Pointer that started the drag; other pointers are ignored.
        pointer: PointerId,
        /// Pointer position minus the piece's top-left at drag start.
        grab_offset: Point,
        /// Piece top-left at drag start.
        origin: Point,
    },
}

impl InputState {
    /// Start tracking a drag of `id` grabbed at `pointer_at` while its
    /// top-left sits at `piece_at`.
    #[must_use]
    pub fn grab(id: PieceId, pointer: PointerId, pointer_at: Point, piece_at: Point) -> Self {
        Self::DraggingPiece { id, pointer, grab_offset: pointer_at.offset_from(piece_at), origin: piece_at }
    }

    /// The piece being dragged, if any.
    #[must_use]
    pub fn active_piece(&self) -> Option<PieceId> {
        match self {
            Self::Idle => None,
            Self::DraggingPiece { id, .. } => Some(*id),
        }
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::DraggingPiece { .. })
    }

    /// Whether `pointer` is the one driving the current drag.
    #[must_use]
    pub fn is_driven_by(&self, pointer: PointerId) -> bool {
        matches!(self, Self::DraggingPiece { pointer: p, .. } if *p == pointer)
    }

    /// New top-left for the dragged piece when the pointer is at `pointer_at`.
    #[must_use]
    pub fn piece_position(&self, pointer_at: Point) -> Option<Point> {
        match self {
            Self::Idle => None,
            Self::DraggingPiece { grab_offset, .. } => Some(pointer_at.offset_from(*grab_offset)),
        }
    }
}
