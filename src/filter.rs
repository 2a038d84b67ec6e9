//! Escape filter
//!
//! Ties together the parser and the screen model: reads code points from the
//! input, handles C0 controls directly, routes ESC through the escape
//! grammar and applies the resulting operations to the screen.

use std::fmt;
use std::io::BufRead;

use tracing::{debug, trace};

use crate::core::Screen;
use crate::error::Result;
use crate::interpreter::interpret;
use crate::parser::{read_escape_sequence, CharReader, CharSource, EscapeSequence};

const ESC: char = '\u{1b}';

/// Replays terminal output onto a virtual screen
#[derive(Debug, Clone, Default)]
pub struct EscapeFilter {
    /// The screen all input is applied to
    screen: Screen,
}

impl EscapeFilter {
    /// Create a filter with an empty screen
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a reference to the screen
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Get a mutable reference to the screen
    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    /// Take the screen out of the filter
    pub fn into_screen(self) -> Screen {
        self.screen
    }

    /// Process everything a reader yields.
    ///
    /// Can be called repeatedly; each input continues where the previous one
    /// left the screen. On error the screen keeps whatever was applied so far.
    pub fn load<R: BufRead>(&mut self, reader: R) -> Result<()> {
        self.process(&mut CharReader::new(reader))
    }

    /// Process a string
    pub fn load_str(&mut self, input: &str) -> Result<()> {
        self.load(input.as_bytes())
    }

    /// Process code points until the source is exhausted.
    ///
    /// Malformed escape sequences are skipped. End of input inside a CSI or
    /// OSC and I/O failures abort processing.
    pub fn process<S: CharSource>(&mut self, src: &mut S) -> Result<()> {
        while let Some(c) = src.next_char()? {
            if c == ESC {
                self.process_escape(src)?;
            } else {
                self.process_char(c);
            }
        }
        Ok(())
    }

    /// Handle everything after an ESC
    fn process_escape<S: CharSource>(&mut self, src: &mut S) -> Result<()> {
        match read_escape_sequence(src) {
            Ok(sequence) => {
                self.apply_sequence(sequence);
                Ok(())
            }
            Err(e) if e.is_recoverable() => {
                debug!(error = %e, "skipping malformed escape sequence");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Apply a parsed escape sequence to the screen
    fn apply_sequence(&mut self, sequence: EscapeSequence) {
        match sequence {
            EscapeSequence::Csi(cs) => match interpret(&cs) {
                Ok(Some(op)) => self.screen.apply(op),
                Ok(None) => {}
                Err(e) => debug!(error = %e, sequence = ?cs.to_string(), "skipping control sequence"),
            },
            EscapeSequence::Osc(osc) => {
                trace!(command = %osc.command, "ignored operating system command");
            }
            EscapeSequence::Unsupported(_) => {}
        }
    }

    /// Handle a character outside of escape sequences
    pub fn process_char(&mut self, c: char) {
        match c {
            '\u{08}' => self.screen.backspace(),
            '\u{09}' => self.screen.tab(),
            // Works as CR+LF
            '\u{0A}' => self.screen.linefeed(),
            '\u{0B}' => self.screen.vertical_tab(),
            '\u{0D}' => self.screen.carriage_return(),
            _ => self.screen.put_char(c),
        }
    }

    /// Render the screen as text
    pub fn render(&self) -> String {
        self.screen.render()
    }
}

impl fmt::Display for EscapeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.screen, f)
    }
}

/// Replay a string and return the rendered text
pub fn filter_str(input: &str) -> Result<String> {
    let mut filter = EscapeFilter::new();
    filter.load_str(input)?;
    Ok(filter.render())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Cursor;
    use crate::error::{Error, SequenceKind};

    fn filter(input: &str) -> String {
        filter_str(input).unwrap()
    }

    fn with_sample(input: &str) -> EscapeFilter {
        let mut filter = EscapeFilter::new();
        *filter.screen_mut() = Screen::with_content(["Hello World", "こんにちはABC世界"], 2, 18);
        filter.load_str(input).unwrap();
        filter
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(filter("Hello"), "Hello");
        assert_eq!(filter(""), "");
    }

    #[test]
    fn test_carriage_return_overwrite() {
        assert_eq!(filter("abc\rX"), "Xbc");
    }

    #[test]
    fn test_c0_controls() {
        assert_eq!(with_sample("\u{07}").screen().cursor(), Cursor::new(2, 18));
        assert_eq!(with_sample("\u{08}").screen().cursor(), Cursor::new(2, 17));
        assert_eq!(with_sample("\u{09}").screen().cursor(), Cursor::new(2, 25));
        assert_eq!(with_sample("\u{0A}").screen().cursor(), Cursor::new(3, 1));
        assert_eq!(with_sample("\u{0B}").screen().cursor(), Cursor::new(3, 18));
        assert_eq!(with_sample("\u{0D}").screen().cursor(), Cursor::new(2, 1));

        let filter = with_sample("あ");
        assert_eq!(filter.screen().lines()[1].text(), "こんにちはABC世界あ");
        assert_eq!(filter.screen().cursor(), Cursor::new(2, 20));
    }

    #[test]
    fn test_color_sequences_are_stripped() {
        assert_eq!(filter("\u{1b}[01;32mgreen\u{1b}[00m text"), "green text");
    }

    #[test]
    fn test_osc_is_ignored() {
        assert_eq!(filter("a\u{1b}]0;title\u{07}b"), "ab");
        assert_eq!(filter("a\u{1b}]0;x\u{1b}y\u{1b}\\b"), "ab");
    }

    #[test]
    fn test_unsupported_escape_is_consumed() {
        assert_eq!(filter("a\u{1b}Mb"), "ab");
    }

    #[test]
    fn test_invalid_escape_reprocesses_character() {
        assert_eq!(filter("a\u{1b}xb"), "axb");
        assert_eq!(filter("a\u{1b}\u{1b}[Cb"), "a b");
    }

    #[test]
    fn test_invalid_control_sequence_is_skipped() {
        // '\n' cannot end a control sequence, so it is processed normally
        assert_eq!(filter("ab\u{1b}[12\ncd"), "ab\ncd");
        // Non-numeric parameters skip the whole sequence
        assert_eq!(filter("ab\u{1b}[1;2Ccd"), "abcd");
    }

    #[test]
    fn test_invalid_osc_is_skipped() {
        assert_eq!(filter("a\u{1b}]x;b"), "ax;b");
    }

    #[test]
    fn test_truncated_escape_is_dropped() {
        assert_eq!(filter("abc\u{1b}"), "abc");
    }

    #[test]
    fn test_end_of_input_inside_sequence_is_fatal() {
        assert!(matches!(
            filter_str("abc\u{1b}[12"),
            Err(Error::UnexpectedEof {
                sequence: SequenceKind::ControlSequence
            })
        ));
        assert!(matches!(
            filter_str("abc\u{1b}]0;title"),
            Err(Error::UnexpectedEof {
                sequence: SequenceKind::OperatingSystemCommand
            })
        ));
    }

    #[test]
    fn test_partial_state_survives_failure() {
        let mut filter = EscapeFilter::new();
        assert!(filter.load_str("abc\u{1b}[").is_err());
        assert_eq!(filter.render(), "abc");
    }

    #[test]
    fn test_multiple_loads_share_screen() {
        let mut filter = EscapeFilter::new();
        filter.load_str("first\n").unwrap();
        filter.load_str("second").unwrap();
        assert_eq!(filter.to_string(), "first\nsecond");
    }

    #[test]
    fn test_double_width_overwrite() {
        // 世 covers columns 3-4; overwrite its right half
        assert_eq!(filter("ab世\u{1b}[4GX"), "ab X");
    }

    #[test]
    fn test_tab_padding() {
        assert_eq!(filter("a\tb"), "a       b");
        assert_eq!(filter("\t"), "        ");
    }
}
