#![allow(clippy::float_cmp)]

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;
use crate::config::PuzzleConfig;
use crate::geometry::BoardGeometry;
use crate::piece::GridShape;

fn geometry() -> BoardGeometry {
    BoardGeometry::new(Size::new(500.0, 200.0), GridShape::new(2, 5))
}

fn playing() -> GameCore<StdRng> {
    let mut core = GameCore::with_rng(PuzzleConfig::default(), StdRng::seed_from_u64(21));
    core.start_session(GridShape::new(2, 5), geometry());
    core
}

fn place(core: &mut GameCore<StdRng>, id: PieceId) {
    let (start, target) = core.piece(id).map(|p| (p.current, p.target)).unwrap();
    core.begin_drag(id, start);
    core.move_drag(target);
    core.end_drag();
}

fn view_of(view: &BoardView, id: PieceId) -> &PieceView {
    view.pieces.iter().find(|p| p.id == id).unwrap()
}

// =============================================================
// Phases
// =============================================================

#[test]
fn start_screen_shows_image_only() {
    let mut core = GameCore::with_rng(PuzzleConfig::default(), StdRng::seed_from_u64(1));
    core.resize(geometry());
    let view = BoardView::project(&core);
    assert_eq!(view.phase, Phase::Start);
    assert!(view.pieces.is_empty());
    assert!(view.slots.is_empty());
    assert_eq!(view.stage_height, 200.0);
    assert_eq!(view.image_asset, "assets/farmyard.jpg");
    assert_eq!(view.progress_label(), "Pieces placed: 0 / 0");
}

#[test]
fn playing_shows_pieces_slots_and_staging_band() {
    let view = BoardView::project(&playing());
    assert_eq!(view.pieces.len(), 10);
    assert_eq!(view.slots.len(), 10);
    assert!(view.slots.iter().all(|s| s.outlined));
    assert_eq!(view.board, Size::new(500.0, 200.0));
    assert_eq!(view.stage_height, 500.0);
}

#[test]
fn complete_hides_slots_and_band() {
    let mut core = playing();
    for id in 0..10 {
        place(&mut core, id);
    }
    let view = BoardView::project(&core);
    assert_eq!(view.phase, Phase::Complete);
    assert!(view.slots.is_empty());
    assert_eq!(view.pieces.len(), 10);
    assert_eq!(view.stage_height, 200.0);
    assert_eq!(view.progress_label(), "Pieces placed: 10 / 10");
}

// =============================================================
// Pieces
// =============================================================

#[test]
fn background_offset_selects_piece_slice() {
    let view = BoardView::project(&playing());
    let piece = view_of(&view, 7);
    assert_eq!((piece.row, piece.col), (1, 2));
    assert_eq!(piece.background_offset, Point::new(-200.0, -100.0));
    assert_eq!(piece.size, Size::new(100.0, 100.0));
    assert_eq!(view_of(&view, 0).background_offset, Point::new(0.0, 0.0));
}

#[test]
fn layers_follow_piece_state() {
    let mut core = playing();
    place(&mut core, 0);
    let start = core.piece(1).map(|p| p.current).unwrap();
    core.begin_drag(1, start);

    let view = BoardView::project(&core);
    assert_eq!(view_of(&view, 1).layer, LAYER_ACTIVE);
    assert!(view_of(&view, 1).is_active);
    assert_eq!(view_of(&view, 0).layer, LAYER_PLACED);
    assert_eq!(view_of(&view, 2).layer, LAYER_LOOSE);
}

#[test]
fn draw_order_puts_active_piece_last() {
    let mut core = playing();
    place(&mut core, 9);
    let start = core.piece(4).map(|p| p.current).unwrap();
    core.begin_drag(4, start);

    let view = BoardView::project(&core);
    let order: Vec<PieceId> = view.draw_order().iter().map(|p| p.id).collect();
    assert_eq!(order.first(), Some(&9));
    assert_eq!(order.last(), Some(&4));
    assert_eq!(&order[1..9], &[0, 1, 2, 3, 5, 6, 7, 8]);
}

#[test]
fn placed_slot_loses_outline() {
    let mut core = playing();
    place(&mut core, 3);
    let view = BoardView::project(&core);
    let slot = view.slots.iter().find(|s| s.row == 0 && s.col == 3).unwrap();
    assert!(!slot.outlined);
    assert_eq!(slot.origin, Point::new(300.0, 0.0));
    assert_eq!(view.placed, 1);
    assert_eq!(view.progress_label(), "Pieces placed: 1 / 10");
}

#[test]
fn degenerate_geometry_hides_everything() {
    let mut core = playing();
    core.resize(BoardGeometry::default());
    let view = BoardView::project(&core);
    assert!(view.pieces.is_empty());
    assert!(view.slots.is_empty());
    assert_eq!(view.total, 10);
}

#[test]
fn view_serializes_for_the_host() {
    let json = serde_json::to_value(BoardView::project(&playing())).unwrap();
    assert_eq!(json["phase"], "playing");
    assert_eq!(json["puzzle_id"], "farmyard");
    assert_eq!(json["pieces"].as_array().map(Vec::len), Some(10));
}
