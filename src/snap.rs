//! Release-time placement check.

#[cfg(test)]
#[path = "snap_test.rs"]
mod snap_test;

use crate::piece::Piece;

/// Result of releasing a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapOutcome {
    /// The piece was within threshold on both axes and is now locked.
    Placed,
    /// The piece stays exactly where it was dropped.
    Dropped,
    /// The piece was already locked; nothing changed.
    AlreadyPlaced,
}

/// Lock `piece` onto its target when both `|dx|` and `|dy|` are strictly
/// below `threshold`. The check is per axis, not a radius.
pub fn evaluate(piece: &mut Piece, threshold: f64) -> SnapOutcome {
    if piece.is_placed {
        return SnapOutcome::AlreadyPlaced;
    }
    let (dx, dy) = piece.distance_to_target();
    if dx < threshold && dy < threshold {
        piece.lock();
        SnapOutcome::Placed
    } else {
        SnapOutcome::Dropped
    }
}
