//! Placement engine for a drag-and-drop jigsaw puzzle.
//!
//! The crate owns everything about a puzzle session that is not pixels: it
//! cuts the board into a grid of rectangular pieces, scatters and shuffles
//! them into a staging band below the board, tracks the single piece being
//! dragged, snaps released pieces onto their slot, and detects completion.
//! The host layer is responsible only for measuring the viewport, wiring
//! pointer events to [`engine::GameCore`], and drawing the
//! [`view::BoardView`] it hands back.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Session state machine, inbound [`engine::Event`]s and outbound [`engine::Action`]s |
//! | [`piece`] | Piece type, grid shape and the per-session [`piece::PieceSet`] |
//! | [`geometry`] | Points, sizes and the board geometry calculator |
//! | [`scatter`] | Staging-band scatter and the Fisher–Yates position shuffle |
//! | [`snap`] | Release-time snap evaluation |
//! | [`input`] | Pointer identity and the drag state machine |
//! | [`view`] | Render projection of the current session |
//! | [`catalog`] | Built-in puzzle images |
//! | [`celebration`] | Completion fanfare and decorative scene |
//! | [`config`] | Tunable options loaded from JSON |
//! | [`consts`] | Shared numeric constants |
//! | [`logging`] | `tracing` subscriber installation for hosts |

pub mod catalog;
pub mod celebration;
pub mod config;
pub mod consts;
pub mod engine;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod piece;
pub mod scatter;
pub mod snap;
pub mod view;
