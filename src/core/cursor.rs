//! Cursor position and tab stops
//!
//! Positions are 1-based. Every movement goes through [`Cursor::move_to`],
//! which clamps both coordinates to at least 1; there is no upper bound
//! because the screen grows on demand.

use serde::{Deserialize, Serialize};

/// Distance between fixed tab stops (columns 1, 9, 17, ...)
pub const TAB_WIDTH: usize = 8;

/// Cursor position on the virtual screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    /// Row position (1-indexed)
    pub row: usize,
    /// Column position (1-indexed)
    pub col: usize,
}

impl Default for Cursor {
    fn default() -> Self {
        Self { row: 1, col: 1 }
    }
}

impl Cursor {
    /// Create a cursor at the given position, clamped to the origin
    pub fn new(row: usize, col: usize) -> Self {
        Self {
            row: row.max(1),
            col: col.max(1),
        }
    }

    /// Move to an absolute position, clamping at the origin
    pub fn move_to(&mut self, row: usize, col: usize) {
        *self = Self::new(row, col);
    }

    /// Column of the n-th tab stop after the cursor, saturating at
    /// `usize::MAX`
    pub fn next_tab_stop(&self, n: usize) -> usize {
        let n = n.max(1);
        ((self.col - 1) / TAB_WIDTH)
            .saturating_add(n)
            .saturating_mul(TAB_WIDTH)
            .saturating_add(1)
    }

    /// Column of the n-th tab stop before the cursor, never left of column 1
    pub fn prev_tab_stop(&self, n: usize) -> usize {
        let n = n.max(1);
        if self.col <= TAB_WIDTH {
            return 1;
        }

        ((self.col - 2) / TAB_WIDTH + 1)
            .checked_sub(n)
            .map_or(1, |stops| stops * TAB_WIDTH + 1)
    }
}
