//! Built-in puzzle images offered by the selection screen.
//!
//! The engine only needs an image's intrinsic size (for the board aspect
//! ratio) and an identity; the asset path is passed through to the host.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use serde::Serialize;

/// One selectable puzzle image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PuzzleEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub emoji: &'static str,
    /// Host-resolvable image reference.
    pub asset: &'static str,
    /// Intrinsic pixel width of the image.
    pub width: u32,
    /// Intrinsic pixel height of the image.
    pub height: u32,
}

impl PuzzleEntry {
    /// Intrinsic `width / height` of the image.
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            return 0.0;
        }
        f64::from(self.width) / f64::from(self.height)
    }

    /// Caption shown under the thumbnail, e.g. `"🐄 Farmyard"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.emoji, self.name)
    }
}

/// Id of the puzzle a fresh engine starts with.
pub const DEFAULT_PUZZLE_ID: &str = "farmyard";

/// Every built-in puzzle, in display order.
pub static PUZZLES: [PuzzleEntry; 4] = [
    PuzzleEntry {
        id: "farmyard",
        name: "Farmyard",
        emoji: "🐄",
        asset: "assets/farmyard.jpg",
        width: 1148,
        height: 640,
    },
    PuzzleEntry {
        id: "playground",
        name: "Playground",
        emoji: "🛝",
        asset: "assets/playground.jpg",
        width: 1148,
        height: 640,
    },
    PuzzleEntry {
        id: "dinosaurs",
        name: "Dinosaurs",
        emoji: "🦕",
        asset: "assets/dinosaurs.jpg",
        width: 1148,
        height: 640,
    },
    PuzzleEntry {
        id: "harbour",
        name: "Harbour",
        emoji: "⛵",
        asset: "assets/harbour.jpg",
        width: 1148,
        height: 640,
    },
];

/// Look up a puzzle by id.
#[must_use]
pub fn find(id: &str) -> Option<&'static PuzzleEntry> {
    PUZZLES.iter().find(|entry| entry.id == id)
}

/// The puzzle a fresh engine starts with.
#[must_use]
pub fn default_puzzle() -> &'static PuzzleEntry {
    find(DEFAULT_PUZZLE_ID).unwrap_or(&PUZZLES[0])
}
