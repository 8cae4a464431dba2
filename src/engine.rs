//! Session engine: phases, input events and the placement pipeline.
//!
//! DESIGN
//! ======
//! `GameCore` is a single-threaded reducer. Every host input is an [`Event`];
//! handling one mutates the session and returns the [`Action`]s the host must
//! react to (redraw a piece, change screens, start the celebration). Inputs
//! that make no sense in the current state are ignored: the reason is logged
//! at debug level and no actions are returned.
//!
//! The pipeline for a drag is begin -> move* -> end/cancel. End hands the
//! piece to the snap evaluator, then the completion predicate runs; the
//! `Playing -> Complete` edge is the only place `Action::Completed` is
//! emitted, so it fires once per session.
//!
//! Geometry changes that arrive mid-drag are parked and applied when the drag
//! ends, so the grab offset stays valid for the whole gesture.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::fmt;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::{self, PuzzleEntry};
use crate::config::PuzzleConfig;
use crate::geometry::{BoardGeometry, Point, Size};
use crate::input::{InputState, PointerId};
use crate::piece::{GridShape, Piece, PieceId, PieceSet};
use crate::scatter::{self, ScatterBand};
use crate::snap::{self, SnapOutcome};

// =============================================================================
// TYPES
// =============================================================================

/// Coarse session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Showing the whole picture and the "Go" affordance.
    #[default]
    Start,
    /// Pieces are dealt and can be dragged.
    Playing,
    /// Every piece is placed.
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::Playing => "playing",
            Self::Complete => "complete",
        };
        f.write_str(name)
    }
}

/// Inbound events from the presentation layer.
///
/// Pointer positions are board-local pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Choose which built-in image the next session uses.
    SelectPuzzle { id: String },
    /// "Go": deal a fresh piece set for `grid` laid out on `geometry`.
    Start { grid: GridShape, geometry: BoardGeometry },
    /// Pointer or touch pressed on a piece.
    PointerDown { piece: PieceId, at: Point, pointer: PointerId },
    /// Pointer or touch moved.
    PointerMove { at: Point, pointer: PointerId },
    /// Pointer or touch released.
    PointerUp { pointer: PointerId },
    /// Pointer or touch cancelled by the platform; handled as a release.
    PointerCancel { pointer: PointerId },
    /// The host recomputed the board geometry.
    Resize { geometry: BoardGeometry },
    /// "Play again": discard the finished session.
    Reset,
}

/// Outbound actions for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    PuzzleSelected { id: &'static str },
    PhaseChanged(Phase),
    PiecesDealt { count: usize },
    PiecesCleared,
    DragStarted { id: PieceId },
    PieceMoved { id: PieceId, position: Point },
    PiecePlaced { id: PieceId },
    PieceDropped { id: PieceId, position: Point },
    /// Geometry changed; every piece must be redrawn.
    Relayout,
    /// One-shot completion signal for the celebration collaborator.
    Completed,
}

/// Why an event was ignored.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Rejected {
    #[error("{event} is not valid in phase {phase}")]
    WrongPhase { event: &'static str, phase: Phase },
    #[error("unknown puzzle: {0}")]
    UnknownPuzzle(String),
    #[error("unknown piece: {0}")]
    UnknownPiece(PieceId),
    #[error("piece {0} is already placed")]
    PieceLocked(PieceId),
    #[error("piece {active} is already being dragged")]
    DragActive { active: PieceId },
    #[error("no drag in progress")]
    NoDrag,
    #[error("pointer {0:?} does not own the active drag")]
    ForeignPointer(PointerId),
    #[error("grid has no cells")]
    EmptyGrid,
    #[error("board geometry is not renderable")]
    DegenerateGeometry,
}

// =============================================================================
// ENGINE
// =============================================================================

/// All session state and the logic that mutates it.
pub struct GameCore<R: Rng = StdRng> {
    config: PuzzleConfig,
    puzzle: &'static PuzzleEntry,
    phase: Phase,
    grid: GridShape,
    pieces: PieceSet,
    input: InputState,
    /// Geometry the pieces' coordinates are expressed against.
    geometry: BoardGeometry,
    /// Newer geometry not applied yet (mid-drag, or not renderable).
    pending: Option<BoardGeometry>,
    rng: R,
}

impl GameCore<StdRng> {
    /// Create an engine seeded from the operating system.
    #[must_use]
    pub fn new(config: PuzzleConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }
}

impl Default for GameCore<StdRng> {
    fn default() -> Self {
        Self::new(PuzzleConfig::default())
    }
}

impl<R: Rng> GameCore<R> {
    /// Create an engine drawing scatter and shuffle from `rng`.
    #[must_use]
    pub fn with_rng(config: PuzzleConfig, rng: R) -> Self {
        Self {
            grid: config.grid(),
            config,
            puzzle: catalog::default_puzzle(),
            phase: Phase::Start,
            pieces: PieceSet::new(),
            input: InputState::Idle,
            geometry: BoardGeometry::default(),
            pending: None,
            rng,
        }
    }

    // --- Event dispatch ---

    /// Apply one inbound event. Ignored events return no actions.
    pub fn handle(&mut self, event: Event) -> Vec<Action> {
        match self.try_handle(event) {
            Ok(actions) => actions,
            Err(reason) => {
                debug!(%reason, phase = %self.phase, "input ignored");
                Vec::new()
            }
        }
    }

    /// Apply one inbound event, reporting why it was ignored.
    ///
    /// # Errors
    ///
    /// Returns the [`Rejected`] reason when the event is not valid in the
    /// current state. The session is left untouched in that case.
    pub fn try_handle(&mut self, event: Event) -> Result<Vec<Action>, Rejected> {
        match event {
            Event::SelectPuzzle { id } => self.on_select_puzzle(&id),
            Event::Start { grid, geometry } => self.on_start(grid, geometry),
            Event::PointerDown { piece, at, pointer } => self.on_pointer_down(piece, at, pointer),
            Event::PointerMove { at, pointer } => self.on_pointer_move(at, pointer),
            Event::PointerUp { pointer } | Event::PointerCancel { pointer } => self.on_pointer_up(pointer),
            Event::Resize { geometry } => Ok(self.on_resize(geometry)),
            Event::Reset => self.on_reset(),
        }
    }

    // --- Inbound convenience API ---

    /// Choose the image for the next session.
    pub fn select_puzzle(&mut self, id: &str) -> Vec<Action> {
        self.handle(Event::SelectPuzzle { id: id.to_owned() })
    }

    /// Deal a fresh session for `grid` on `geometry`.
    pub fn start_session(&mut self, grid: GridShape, geometry: BoardGeometry) -> Vec<Action> {
        self.handle(Event::Start { grid, geometry })
    }

    /// Deal a fresh session on the current grid and the latest geometry.
    pub fn go(&mut self) -> Vec<Action> {
        let geometry = self.latest_geometry();
        self.start_session(self.grid, geometry)
    }

    /// Begin dragging `piece` with the primary pointer at `at`.
    pub fn begin_drag(&mut self, piece: PieceId, at: Point) -> Vec<Action> {
        self.handle(Event::PointerDown { piece, at, pointer: PointerId::PRIMARY })
    }

    /// Move the primary pointer to `at`.
    pub fn move_drag(&mut self, at: Point) -> Vec<Action> {
        self.handle(Event::PointerMove { at, pointer: PointerId::PRIMARY })
    }

    /// Release the primary pointer.
    pub fn end_drag(&mut self) -> Vec<Action> {
        self.handle(Event::PointerUp { pointer: PointerId::PRIMARY })
    }

    /// Recompute geometry from a host viewport size and the selected image.
    pub fn set_viewport(&mut self, viewport: Size) -> Vec<Action> {
        let mut bounds = self.config;
        bounds.rows = self.grid.rows;
        bounds.columns = self.grid.columns;
        let geometry = BoardGeometry::for_viewport(viewport, self.puzzle.aspect_ratio(), &bounds);
        self.handle(Event::Resize { geometry })
    }

    /// Apply a host-computed geometry.
    pub fn resize(&mut self, geometry: BoardGeometry) -> Vec<Action> {
        self.handle(Event::Resize { geometry })
    }

    /// "Play again": discard the finished session and return to the start.
    pub fn reset_session(&mut self) -> Vec<Action> {
        self.handle(Event::Reset)
    }

    // --- Handlers ---

    fn on_select_puzzle(&mut self, id: &str) -> Result<Vec<Action>, Rejected> {
        self.require_phase("select puzzle", Phase::Start)?;
        let entry = catalog::find(id).ok_or_else(|| Rejected::UnknownPuzzle(id.to_owned()))?;
        self.puzzle = entry;
        info!(puzzle = entry.id, "puzzle selected");
        Ok(vec![Action::PuzzleSelected { id: entry.id }])
    }

    fn on_start(&mut self, grid: GridShape, geometry: BoardGeometry) -> Result<Vec<Action>, Rejected> {
        self.require_phase("start", Phase::Start)?;
        if grid.is_empty() {
            return Err(Rejected::EmptyGrid);
        }
        let geometry = BoardGeometry::new(geometry.board, grid);
        if !geometry.is_renderable() {
            return Err(Rejected::DegenerateGeometry);
        }

        let band = ScatterBand { margin: self.config.scatter_margin_px, range: self.config.scatter_range_px };
        self.grid = grid;
        self.geometry = geometry;
        self.pending = None;
        self.input = InputState::Idle;
        self.pieces = scatter::generate_pieces(&geometry, grid, band, &mut self.rng);
        self.phase = Phase::Playing;

        info!(
            puzzle = self.puzzle.id,
            rows = grid.rows,
            columns = grid.columns,
            board_width = geometry.board.width,
            board_height = geometry.board.height,
            "session started"
        );
        Ok(vec![Action::PiecesDealt { count: self.pieces.len() }, Action::PhaseChanged(Phase::Playing)])
    }

    fn on_pointer_down(&mut self, id: PieceId, at: Point, pointer: PointerId) -> Result<Vec<Action>, Rejected> {
        self.require_phase("drag", Phase::Playing)?;
        if let Some(active) = self.input.active_piece() {
            return Err(Rejected::DragActive { active });
        }
        let piece = self.pieces.get(id).ok_or(Rejected::UnknownPiece(id))?;
        if piece.is_placed {
            return Err(Rejected::PieceLocked(id));
        }

        self.input = InputState::grab(id, pointer, at, piece.current);
        debug!(piece = id, pointer = pointer.0, x = at.x, y = at.y, "drag started");
        Ok(vec![Action::DragStarted { id }])
    }

    fn on_pointer_move(&mut self, at: Point, pointer: PointerId) -> Result<Vec<Action>, Rejected> {
        let id = self.owned_drag(pointer)?;
        let position = self.input.piece_position(at).ok_or(Rejected::NoDrag)?;
        let piece = self.pieces.get_mut(id).ok_or(Rejected::UnknownPiece(id))?;
        piece.current = position;
        Ok(vec![Action::PieceMoved { id, position }])
    }

    fn on_pointer_up(&mut self, pointer: PointerId) -> Result<Vec<Action>, Rejected> {
        let id = self.owned_drag(pointer)?;
        let origin = match self.input {
            InputState::DraggingPiece { origin, .. } => origin,
            InputState::Idle => return Err(Rejected::NoDrag),
        };
        self.input = InputState::Idle;
        let threshold = self.config.snap_threshold_px;
        let piece = self.pieces.get_mut(id).ok_or(Rejected::UnknownPiece(id))?;
        let outcome = snap::evaluate(piece, threshold);
        let position = piece.current;

        let mut actions = Vec::new();
        match outcome {
            SnapOutcome::Placed => {
                info!(
                    piece = id,
                    placed = self.pieces.placed_count(),
                    total = self.pieces.len(),
                    "piece placed"
                );
                actions.push(Action::PiecePlaced { id });
                actions.extend(self.check_completion());
            }
            SnapOutcome::Dropped | SnapOutcome::AlreadyPlaced => {
                debug!(piece = id, from_x = origin.x, from_y = origin.y, x = position.x, y = position.y, "piece dropped");
                actions.push(Action::PieceDropped { id, position });
            }
        }

        if let Some(next) = self.pending {
            if next.is_renderable() {
                self.apply_geometry(next);
                actions.push(Action::Relayout);
            }
        }
        Ok(actions)
    }

    fn on_resize(&mut self, geometry: BoardGeometry) -> Vec<Action> {
        let geometry = BoardGeometry::new(geometry.board, self.grid);
        if geometry == self.geometry {
            self.pending = None;
            return Vec::new();
        }
        if self.pieces.is_empty() {
            self.geometry = geometry;
            self.pending = None;
            return vec![Action::Relayout];
        }
        if self.input.is_dragging() {
            debug!("geometry change deferred until drag ends");
            self.pending = Some(geometry);
            return Vec::new();
        }
        if !geometry.is_renderable() {
            debug!("geometry not renderable; pieces hidden");
            self.pending = Some(geometry);
            return vec![Action::Relayout];
        }
        self.apply_geometry(geometry);
        vec![Action::Relayout]
    }

    fn on_reset(&mut self) -> Result<Vec<Action>, Rejected> {
        self.require_phase("reset", Phase::Complete)?;
        self.pieces.clear();
        self.input = InputState::Idle;
        self.phase = Phase::Start;
        self.grid = self.config.grid();
        let board = self.pending.take().unwrap_or(self.geometry).board;
        self.geometry = BoardGeometry::new(board, self.grid);
        info!("session reset");
        Ok(vec![Action::PiecesCleared, Action::PhaseChanged(Phase::Start)])
    }

    // --- Helpers ---

    fn require_phase(&self, event: &'static str, expected: Phase) -> Result<(), Rejected> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(Rejected::WrongPhase { event, phase: self.phase })
        }
    }

    fn owned_drag(&self, pointer: PointerId) -> Result<PieceId, Rejected> {
        let id = self.input.active_piece().ok_or(Rejected::NoDrag)?;
        if !self.input.is_driven_by(pointer) {
            return Err(Rejected::ForeignPointer(pointer));
        }
        Ok(id)
    }

    /// Move the session to `Complete` the first time every piece is placed.
    fn check_completion(&mut self) -> Vec<Action> {
        if self.phase != Phase::Playing || !self.pieces.all_placed() {
            return Vec::new();
        }
        self.phase = Phase::Complete;
        info!(puzzle = self.puzzle.id, pieces = self.pieces.len(), "puzzle complete");
        vec![Action::PhaseChanged(Phase::Complete), Action::Completed]
    }

    /// Re-express every piece against `next`: targets are recomputed, placed
    /// pieces sit on their new target, loose pieces scale with the piece size.
    fn apply_geometry(&mut self, next: BoardGeometry) {
        let previous = self.geometry;
        for piece in self.pieces.iter_mut() {
            piece.target = next.slot_origin(piece.row, piece.col);
            piece.current = if piece.is_placed {
                piece.target
            } else {
                previous.rescale_point(piece.current, &next)
            };
        }
        self.geometry = next;
        self.pending = None;
        debug!(board_width = next.board.width, board_height = next.board.height, "geometry applied");
    }

    // --- Queries ---

    /// Current session phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Options this engine was built with.
    #[must_use]
    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    /// The selected puzzle image.
    #[must_use]
    pub fn puzzle(&self) -> &'static PuzzleEntry {
        self.puzzle
    }

    /// Grid shape of the current session, or of the next one while at the
    /// start screen. Piece sizes are always derived from it.
    #[must_use]
    pub fn grid(&self) -> GridShape {
        self.grid
    }

    /// Geometry the pieces are laid out against.
    #[must_use]
    pub fn geometry(&self) -> BoardGeometry {
        self.geometry
    }

    /// Most recent geometry reported by the host, applied or not.
    #[must_use]
    pub fn latest_geometry(&self) -> BoardGeometry {
        self.pending.unwrap_or(self.geometry)
    }

    /// Whether pieces can be drawn right now.
    #[must_use]
    pub fn is_renderable(&self) -> bool {
        self.geometry.is_renderable() && self.pending.is_none_or(|next| next.is_renderable())
    }

    /// All pieces of the current session.
    #[must_use]
    pub fn pieces(&self) -> &PieceSet {
        &self.pieces
    }

    /// Look up a piece by id.
    #[must_use]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id)
    }

    /// The piece currently being dragged, if any.
    #[must_use]
    pub fn active_piece(&self) -> Option<PieceId> {
        self.input.active_piece()
    }

    /// `(placed, total)` piece counts.
    #[must_use]
    pub fn progress(&self) -> (usize, usize) {
        (self.pieces.placed_count(), self.pieces.len())
    }
}

/// Pure transition function: consume `state`, apply `event`, and return the
/// next state with the actions it produced.
pub fn reduce<R: Rng>(mut state: GameCore<R>, event: Event) -> (GameCore<R>, Vec<Action>) {
    let actions = state.handle(event);
    (state, actions)
}
