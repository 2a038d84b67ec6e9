//! Escape sequence classification
//!
//! ESC is followed by a single character in 0x40-0x5F (the 7-bit form of a
//! C1 control). `[` and `]` introduce a CSI and an OSC; every other
//! character in the range is a complete, unsupported sequence.

use tracing::trace;

use super::csi::{read_control_sequence, ControlSequence};
use super::input::CharSource;
use super::osc::{read_osc, OscCommand};
use crate::error::{Error, Result};

/// What the character after ESC introduces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeKind {
    /// `ESC [`
    Csi,
    /// `ESC ]`
    Osc,
    /// Any other `ESC` 0x40-0x5F, consumed without effect
    Unsupported(char),
}

/// A complete escape sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EscapeSequence {
    /// Control sequence
    Csi(ControlSequence),
    /// Operating system command
    Osc(OscCommand),
    /// Recognized but unsupported two-character sequence
    Unsupported(char),
}

/// Classify the character following ESC.
///
/// Fails with [`Error::TruncatedEscape`] at end of input and with
/// [`Error::InvalidEscape`] when the character is out of range; in the
/// latter case the character is pushed back.
pub fn read_escape_kind<S: CharSource>(src: &mut S) -> Result<EscapeKind> {
    let c = src.next_char()?.ok_or(Error::TruncatedEscape)?;

    match c {
        '[' => Ok(EscapeKind::Csi),
        ']' => Ok(EscapeKind::Osc),
        '\u{40}'..='\u{5F}' => Ok(EscapeKind::Unsupported(c)),
        _ => {
            src.push_back(c);
            Err(Error::InvalidEscape)
        }
    }
}

/// Read a full escape sequence whose ESC has already been consumed
pub fn read_escape_sequence<S: CharSource>(src: &mut S) -> Result<EscapeSequence> {
    match read_escape_kind(src)? {
        EscapeKind::Csi => read_control_sequence(src).map(EscapeSequence::Csi),
        EscapeKind::Osc => read_osc(src).map(EscapeSequence::Osc),
        EscapeKind::Unsupported(c) => {
            trace!(final_char = ?c, "unsupported escape sequence");
            Ok(EscapeSequence::Unsupported(c))
        }
    }
}
