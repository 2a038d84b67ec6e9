//! Column-addressed line of text
//!
//! A line is a sequence of code points, each occupying one or two display
//! columns. The screen addresses lines by 1-based display column, so every
//! mutation first translates a column into an index with [`Line::locate`].
//!
//! Only characters with a non-zero width are ever stored: zero-width input
//! is dropped before it reaches a line, which keeps the column arithmetic
//! exact.

use std::fmt;
use std::iter;

use serde::{Deserialize, Serialize};

use super::width::char_width;

/// Where a display column falls inside a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnPosition {
    /// Index of the character covering the column. Past the end of the
    /// line this keeps counting one index per missing column.
    pub index: usize,
    /// Column offset inside that character (1 for the right half of a
    /// wide character, otherwise 0)
    pub offset: usize,
}

/// A single line of the virtual screen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    chars: Vec<char>,
}

impl Line {
    /// Create an empty line
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the line holds no characters at all
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Number of stored characters
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Total display width in columns
    pub fn width(&self) -> usize {
        self.chars.iter().map(|&c| char_width(c)).sum()
    }

    /// Translate a 1-based display column into a character position
    pub fn locate(&self, col: usize) -> ColumnPosition {
        debug_assert!(col >= 1, "columns are 1-based, got {col}");
        let col = col.max(1);

        let mut start = 1;
        for (index, &c) in self.chars.iter().enumerate() {
            let w = char_width(c);
            if start <= col && col < start + w {
                return ColumnPosition {
                    index,
                    offset: col - start,
                };
            }
            start += w;
        }

        ColumnPosition {
            index: self.chars.len() + (col - start),
            offset: 0,
        }
    }

    /// The first `cols` columns of the line.
    ///
    /// A wide character crossing the cut is dropped entirely, so the result
    /// may be one column narrower than requested.
    pub fn truncated(&self, cols: usize) -> Line {
        let end = self.locate(cols.saturating_add(1)).index.min(self.chars.len());
        Line {
            chars: self.chars[..end].to_vec(),
        }
    }

    /// Everything after the first `cols` columns.
    ///
    /// When the cut splits a wide character, its remaining column becomes a
    /// space so the result still lines up with the original columns.
    pub fn skipped(&self, cols: usize) -> Line {
        let pos = self.locate(cols.saturating_add(1));
        if pos.index >= self.chars.len() {
            return Line::new();
        }

        let chars = if pos.offset > 0 {
            let overhang = char_width(self.chars[pos.index]) - pos.offset;
            iter::repeat(' ')
                .take(overhang)
                .chain(self.chars[pos.index + 1..].iter().copied())
                .collect()
        } else {
            self.chars[pos.index..].to_vec()
        };

        Line { chars }
    }

    /// Append spaces until the line is at least `cols` columns wide
    pub fn pad_right(&mut self, cols: usize) {
        let width = self.width();
        if width < cols {
            self.chars.extend(iter::repeat(' ').take(cols - width));
        }
    }

    /// Prepend spaces until the line is at least `cols` columns wide
    pub fn pad_left(&mut self, cols: usize) {
        let width = self.width();
        if width < cols {
            self.chars.splice(0..0, iter::repeat(' ').take(cols - width));
        }
    }

    /// Write `c` at column `col` and return the column after it.
    ///
    /// Content left of the cursor is padded with spaces up to the cursor;
    /// content under the new character is replaced and anything to its
    /// right keeps its original columns. Zero-width characters are ignored.
    pub fn put(&mut self, col: usize, c: char) -> usize {
        let w = char_width(c);
        if w == 0 {
            return col;
        }

        let total = self.width();
        let mut line = self.truncated(col - 1);
        line.pad_right(col - 1);
        line.chars.push(c);

        if col + w <= total {
            let mut tail = self.skipped(col + w - 1);
            tail.pad_left(total - (col + w) + 1);
            line.chars.extend(tail.chars);
        }

        *self = line;
        col + w
    }

    /// Remove all content
    pub fn clear(&mut self) {
        self.chars.clear();
    }

    /// Text content of the line
    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    /// Iterator over stored characters
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.chars.iter().copied()
    }
}

impl From<&str> for Line {
    fn from(s: &str) -> Self {
        Self {
            chars: s.chars().filter(|&c| char_width(c) > 0).collect(),
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &c in &self.chars {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}
