//! Board geometry: points, sizes and the board-fitting calculator.
//!
//! All coordinates are board-local CSS pixels with the origin at the board's
//! top-left corner. The host translates raw pointer positions into this space
//! before handing them to the engine.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

use crate::config::PuzzleConfig;
use crate::piece::GridShape;

/// A point in board-local pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    #[must_use]
    pub fn offset_from(self, other: Point) -> Point {
        Point { x: self.x - other.x, y: self.y - other.y }
    }
}

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both dimensions are finite and strictly positive.
    #[must_use]
    pub fn is_positive(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Pixel dimensions of the target board and of one piece.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoardGeometry {
    /// Size of the target area the finished picture occupies.
    pub board: Size,
    /// Size of a single piece (`board / grid`).
    pub piece: Size,
}

impl BoardGeometry {
    /// Derive piece size by dividing `board` across `grid`.
    ///
    /// An empty grid yields zero-sized pieces rather than dividing by zero.
    #[must_use]
    pub fn new(board: Size, grid: GridShape) -> Self {
        let piece = if grid.is_empty() {
            Size::default()
        } else {
            Size::new(board.width / f64::from(grid.columns), board.height / f64::from(grid.rows))
        };
        Self { board, piece }
    }

    /// Fit an image of the given aspect ratio (`width / height`) into
    /// `available`, preserving the ratio exactly.
    ///
    /// Starts from the width bound; if the resulting height overflows the
    /// height bound, starts from the height bound instead. Degenerate inputs
    /// propagate as zero sizes.
    #[must_use]
    pub fn fit(available: Size, aspect_ratio: f64, grid: GridShape) -> Self {
        if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
            return Self::new(Size::default(), grid);
        }
        let max_width = available.width.max(0.0);
        let max_height = available.height.max(0.0);

        let mut width = max_width;
        let mut height = width / aspect_ratio;
        if height > max_height {
            height = max_height;
            width = height * aspect_ratio;
        }
        Self::new(Size::new(width, height), grid)
    }

    /// Fit the board into a host viewport using the configured bounds.
    ///
    /// Available width is `min(viewport.width - padding, max_board_width)`;
    /// available height is `viewport.height * max_board_height_fraction`.
    #[must_use]
    pub fn for_viewport(viewport: Size, aspect_ratio: f64, config: &PuzzleConfig) -> Self {
        let available = available_area(viewport, config);
        Self::fit(available, aspect_ratio, config.grid())
    }

    /// Whether pieces can be drawn against this geometry.
    #[must_use]
    pub fn is_renderable(&self) -> bool {
        self.board.is_positive() && self.piece.is_positive()
    }

    /// Top-left corner of the slot at `(row, col)`.
    #[must_use]
    pub fn slot_origin(&self, row: u32, col: u32) -> Point {
        Point::new(f64::from(col) * self.piece.width, f64::from(row) * self.piece.height)
    }

    /// Map a point expressed against `self` onto `to`, scaling each axis by
    /// the ratio of piece sizes.
    #[must_use]
    pub fn rescale_point(&self, point: Point, to: &BoardGeometry) -> Point {
        if !self.is_renderable() {
            return point;
        }
        Point::new(
            point.x * to.piece.width / self.piece.width,
            point.y * to.piece.height / self.piece.height,
        )
    }
}

/// Board-sized area the host viewport can offer.
#[must_use]
pub fn available_area(viewport: Size, config: &PuzzleConfig) -> Size {
    let width = (viewport.width - config.viewport_side_padding_px)
        .min(config.max_board_width_px)
        .max(0.0);
    let height = (viewport.height * config.max_board_height_fraction).max(0.0);
    Size::new(width, height)
}
