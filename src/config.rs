//! Tunable puzzle options.
//!
//! Every field has a default matching the constants in [`crate::consts`], so a
//! host only needs to supply the keys it wants to override:
//!
//! ```json
//! { "rows": 3, "columns": 4, "snap_threshold_px": 24 }
//! ```

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_COLUMNS, DEFAULT_ROWS, MAX_BOARD_HEIGHT_FRACTION, MAX_BOARD_WIDTH_PX, SCATTER_MARGIN_PX,
    SCATTER_RANGE_PX, SNAP_THRESHOLD_PX, VIEWPORT_SIDE_PADDING_PX,
};
use crate::piece::GridShape;

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("grid must have at least one row and one column (got {rows}x{columns})")]
    EmptyGrid { rows: u32, columns: u32 },
    #[error("snap threshold must be positive (got {0})")]
    SnapThreshold(f64),
    #[error("{field} must be a non-negative number (got {value})")]
    NegativeSpan { field: &'static str, value: f64 },
    #[error("board height fraction must be in (0, 1] (got {0})")]
    HeightFraction(f64),
}

// =============================================================================
// CONFIG
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleConfig {
    pub rows: u32,
    pub columns: u32,
    pub snap_threshold_px: f64,
    pub scatter_margin_px: f64,
    pub scatter_range_px: f64,
    pub max_board_width_px: f64,
    pub viewport_side_padding_px: f64,
    pub max_board_height_fraction: f64,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            snap_threshold_px: SNAP_THRESHOLD_PX,
            scatter_margin_px: SCATTER_MARGIN_PX,
            scatter_range_px: SCATTER_RANGE_PX,
            max_board_width_px: MAX_BOARD_WIDTH_PX,
            viewport_side_padding_px: VIEWPORT_SIDE_PADDING_PX,
            max_board_height_fraction: MAX_BOARD_HEIGHT_FRACTION,
        }
    }
}

impl PuzzleConfig {
    /// Parse a JSON object of overrides and validate the result.
    ///
    /// # Errors
    ///
    /// Returns `Parse` for malformed JSON and one of the range variants when
    /// a value cannot describe a playable puzzle.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every option is within its playable range.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range option found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(ConfigError::EmptyGrid { rows: self.rows, columns: self.columns });
        }
        if self.snap_threshold_px.is_nan() || self.snap_threshold_px <= 0.0 {
            return Err(ConfigError::SnapThreshold(self.snap_threshold_px));
        }
        for (field, value) in [
            ("scatter_margin_px", self.scatter_margin_px),
            ("scatter_range_px", self.scatter_range_px),
            ("max_board_width_px", self.max_board_width_px),
            ("viewport_side_padding_px", self.viewport_side_padding_px),
        ] {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::NegativeSpan { field, value });
            }
        }
        let fraction = self.max_board_height_fraction;
        if fraction.is_nan() || fraction <= 0.0 || fraction > 1.0 {
            return Err(ConfigError::HeightFraction(fraction));
        }
        Ok(())
    }

    /// Grid shape described by `rows` and `columns`.
    #[must_use]
    pub fn grid(&self) -> GridShape {
        GridShape::new(self.rows, self.columns)
    }
}
