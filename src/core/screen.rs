//! Virtual screen
//!
//! An unbounded list of lines plus a cursor. Lines are appended on demand
//! when the cursor writes below the current content and are only removed by
//! erase operations, which also drop blank lines left at the bottom.
//!
//! The screen has no width or height: cursor movement is only clamped at the
//! origin, and rendering reproduces whatever content was written.

use std::fmt;

use tracing::trace;

use super::cursor::Cursor;
use super::line::Line;
use super::snapshot::Snapshot;

/// Which part of a line or of the screen an erase targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseMode {
    /// From the cursor to the end
    ToEnd,
    /// From the start to the cursor
    ToStart,
    /// Everything
    All,
}

/// A single mutation requested by a control sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenOp {
    /// CUU
    CursorUp(usize),
    /// CUD
    CursorDown(usize),
    /// CUF
    CursorForward(usize),
    /// CUB
    CursorBack(usize),
    /// CNL
    NextLine(usize),
    /// CPL
    PrevLine(usize),
    /// CHA
    ColumnAbsolute(usize),
    /// CUP
    Position { row: usize, col: usize },
    /// CHT
    ForwardTab(usize),
    /// CBT
    BackwardTab(usize),
    /// ED
    EraseDisplay(EraseMode),
    /// EL
    EraseLine(EraseMode),
}

/// The virtual screen a session is replayed onto
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Screen {
    lines: Vec<Line>,
    cursor: Cursor,
}

impl Screen {
    /// Create an empty screen with the cursor at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a screen from existing content and a cursor position
    pub fn with_content<I, S>(lines: I, row: usize, col: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            lines: lines.into_iter().map(|s| Line::from(s.as_ref())).collect(),
            cursor: Cursor::new(row, col),
        }
    }

    /// Current cursor
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Current row (1-indexed)
    pub fn row(&self) -> usize {
        self.cursor.row
    }

    /// Current column (1-indexed)
    pub fn col(&self) -> usize {
        self.cursor.col
    }

    /// Lines currently held by the screen
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Move the cursor, clamping both coordinates to at least 1
    pub fn move_cursor(&mut self, row: usize, col: usize) {
        self.cursor.move_to(row, col);
    }

    /// Column of the n-th tab stop after the cursor
    pub fn next_tab_stop(&self, n: usize) -> usize {
        self.cursor.next_tab_stop(n)
    }

    /// Column of the n-th tab stop before the cursor
    pub fn prev_tab_stop(&self, n: usize) -> usize {
        self.cursor.prev_tab_stop(n)
    }

    /// Write a character at the cursor and advance by its width
    pub fn put_char(&mut self, c: char) {
        let row = self.cursor.row;
        if self.lines.len() < row {
            self.lines.resize_with(row, Line::new);
        }

        let col = self.cursor.col;
        self.cursor.col = self.lines[row - 1].put(col, c);
    }

    /// BS: one column left
    pub fn backspace(&mut self) {
        self.move_cursor(self.row(), self.col().saturating_sub(1));
    }

    /// HT: to the next tab stop
    pub fn tab(&mut self) {
        self.move_cursor(self.row(), self.next_tab_stop(1));
    }

    /// LF: next row, first column
    pub fn linefeed(&mut self) {
        self.move_cursor(self.row().saturating_add(1), 1);
    }

    /// VT: next row, same column
    pub fn vertical_tab(&mut self) {
        self.move_cursor(self.row().saturating_add(1), self.col());
    }

    /// CR: first column
    pub fn carriage_return(&mut self) {
        self.move_cursor(self.row(), 1);
    }

    /// Apply a control-sequence operation
    pub fn apply(&mut self, op: ScreenOp) {
        trace!(?op, row = self.row(), col = self.col(), "apply");

        let (row, col) = (self.row(), self.col());
        match op {
            ScreenOp::CursorUp(n) => self.move_cursor(row.saturating_sub(n), col),
            ScreenOp::CursorDown(n) => self.move_cursor(row.saturating_add(n), col),
            ScreenOp::CursorForward(n) => self.move_cursor(row, col.saturating_add(n)),
            ScreenOp::CursorBack(n) => self.move_cursor(row, col.saturating_sub(n)),
            ScreenOp::NextLine(n) => self.move_cursor(row.saturating_add(n), 1),
            ScreenOp::PrevLine(n) => self.move_cursor(row.saturating_sub(n), 1),
            ScreenOp::ColumnAbsolute(n) => self.move_cursor(row, n),
            ScreenOp::Position { row, col } => self.move_cursor(row, col),
            ScreenOp::ForwardTab(n) => self.move_cursor(row, self.next_tab_stop(n)),
            ScreenOp::BackwardTab(n) => self.move_cursor(row, self.prev_tab_stop(n)),
            ScreenOp::EraseDisplay(EraseMode::ToEnd) => self.erase_screen_after(),
            ScreenOp::EraseDisplay(EraseMode::ToStart) => self.erase_screen_before(),
            ScreenOp::EraseDisplay(EraseMode::All) => self.erase_screen(),
            ScreenOp::EraseLine(EraseMode::ToEnd) => self.erase_line_after(),
            ScreenOp::EraseLine(EraseMode::ToStart) => self.erase_line_before(),
            ScreenOp::EraseLine(EraseMode::All) => self.erase_line(),
        }
    }

    /// The line under the cursor, if the screen reaches that far
    fn current_line_mut(&mut self) -> Option<&mut Line> {
        self.lines.get_mut(self.cursor.row - 1)
    }

    /// Drop empty lines at the bottom of the screen
    fn trim_trailing_blank_lines(&mut self) {
        let keep = self
            .lines
            .iter()
            .rposition(|line| !line.is_empty())
            .map_or(0, |last| last + 1);
        self.lines.truncate(keep);
    }

    /// EL 0: erase from the cursor to the end of the line
    pub fn erase_line_after(&mut self) {
        let col = self.cursor.col;
        if let Some(line) = self.current_line_mut() {
            if col > 1 {
                *line = line.truncated(col - 1);
            } else {
                line.clear();
            }
        }

        self.trim_trailing_blank_lines();
    }

    /// EL 1: erase from the start of the line to the cursor
    pub fn erase_line_before(&mut self) {
        let col = self.cursor.col;
        if let Some(line) = self.current_line_mut() {
            let width = line.width();
            if col < width {
                let mut rest = line.skipped(col);
                rest.pad_left(width);
                *line = rest;
            } else {
                line.clear();
            }
        }

        self.trim_trailing_blank_lines();
    }

    /// EL 2: erase the whole line
    pub fn erase_line(&mut self) {
        if let Some(line) = self.current_line_mut() {
            line.clear();
        }

        self.trim_trailing_blank_lines();
    }

    /// ED 0: erase from the cursor to the end of the screen
    pub fn erase_screen_after(&mut self) {
        self.lines.truncate(self.cursor.row);
        self.erase_line_after();
    }

    /// ED 1: erase from the start of the screen to the cursor
    pub fn erase_screen_before(&mut self) {
        let row = self.cursor.row;
        if row > self.lines.len() {
            self.erase_screen();
            return;
        }

        for line in &mut self.lines[..row - 1] {
            line.clear();
        }

        self.erase_line_before();
    }

    /// ED 2: erase everything
    pub fn erase_screen(&mut self) {
        self.lines.clear();
    }

    /// Render the final text.
    ///
    /// Lines are joined with newlines. If the cursor sits on the last line it
    /// is padded with spaces up to the cursor, and a cursor parked below the
    /// content adds one newline per row between them. An empty screen renders
    /// like a screen holding one empty line.
    pub fn render(&self) -> String {
        let mut out = String::new();

        let empty = Line::new();
        let (last, body) = self.lines.split_last().unwrap_or((&empty, &[][..]));
        let count = self.lines.len().max(1);

        for line in body {
            out.extend(line.chars());
            out.push('\n');
        }

        if self.cursor.row == count {
            let mut last = last.clone();
            last.pad_right(self.cursor.col - 1);
            out.extend(last.chars());
        } else {
            out.extend(last.chars());
        }

        for _ in count..self.cursor.row {
            out.push('\n');
        }

        out
    }

    /// Serializable view of the current state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_screen(self)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
