//! Shared numeric constants for the puzzle crate.

// ── Grid ────────────────────────────────────────────────────────

/// Rows in the default puzzle grid.
pub const DEFAULT_ROWS: u32 = 2;

/// Columns in the default puzzle grid.
pub const DEFAULT_COLUMNS: u32 = 5;

// ── Placement ───────────────────────────────────────────────────

/// Per-axis distance in pixels under which a released piece snaps home.
pub const SNAP_THRESHOLD_PX: f64 = 30.0;

/// Gap in pixels between the board's bottom edge and the staging band.
pub const SCATTER_MARGIN_PX: f64 = 50.0;

/// Height in pixels of the staging band pieces are scattered into.
pub const SCATTER_RANGE_PX: f64 = 200.0;

/// Extra stage height below the board while a session is being played.
pub const STAGE_EXTRA_HEIGHT_PX: f64 = 300.0;

// ── Viewport ────────────────────────────────────────────────────

/// Horizontal padding subtracted from the viewport width.
pub const VIEWPORT_SIDE_PADDING_PX: f64 = 32.0;

/// Upper bound on the board width regardless of viewport.
pub const MAX_BOARD_WIDTH_PX: f64 = 700.0;

/// Fraction of the viewport height the board may occupy.
pub const MAX_BOARD_HEIGHT_FRACTION: f64 = 0.5;

// ── Render layers ───────────────────────────────────────────────

/// Layer of the piece currently being dragged.
pub const LAYER_ACTIVE: u32 = 100;

/// Layer of a piece waiting to be placed.
pub const LAYER_LOOSE: u32 = 10;

/// Layer of a piece locked into its slot.
pub const LAYER_PLACED: u32 = 1;

// ── Celebration ─────────────────────────────────────────────────

/// Delay hosts may apply before revealing the celebration overlay.
pub const COMPLETE_REVEAL_DELAY_MS: u64 = 300;

/// Window in which a second celebration trigger is ignored.
pub const CELEBRATION_DEBOUNCE_MS: u64 = 1000;

/// Peak gain of each fanfare note.
pub const NOTE_PEAK_GAIN: f64 = 0.3;

/// Attack time of each fanfare note, in seconds.
pub const NOTE_ATTACK_SECS: f64 = 0.05;

/// Balloons floated by the celebration scene.
pub const BALLOON_COUNT: usize = 15;

/// Stars sparkled by the celebration scene.
pub const STAR_COUNT: usize = 20;
