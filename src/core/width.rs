//! Display width of code points
//!
//! Every column computation in the screen model goes through [`char_width`].
//! Widths follow the East Asian Width property as exposed by the
//! `unicode-width` tables, with ambiguous characters treated as narrow.
//! Control characters and combining marks take no column at all.

use unicode_width::UnicodeWidthChar;

/// Number of terminal columns the character occupies (0, 1 or 2)
#[inline]
pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Total display width of a string
pub fn str_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}
