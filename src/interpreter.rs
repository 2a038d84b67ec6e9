//! Control sequence interpretation
//!
//! Maps a parsed [`ControlSequence`] to at most one [`ScreenOp`]. Only the
//! final character selects the command; sequences with any other final
//! (SGR colors, modes, ...) are valid but have no effect on the text.
//!
//! Numeric parameters are plain decimal. An empty parameter takes the
//! command's default; anything that is not a decimal number makes the whole
//! sequence invalid and nothing is applied.

use tracing::trace;

use crate::core::{EraseMode, ScreenOp};
use crate::error::{Error, Result};
use crate::parser::ControlSequence;

/// Parse a single numeric parameter, falling back to `default` when empty
fn param(s: &str, default: usize) -> Result<usize> {
    if s.is_empty() {
        return Ok(default);
    }
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidControlSequence);
    }
    s.parse().map_err(|_| Error::InvalidControlSequence)
}

fn erase_mode(n: usize) -> Option<EraseMode> {
    match n {
        0 => Some(EraseMode::ToEnd),
        1 => Some(EraseMode::ToStart),
        2 => Some(EraseMode::All),
        _ => None,
    }
}

/// The screen operation a control sequence stands for.
///
/// Returns `Ok(None)` for sequences that are recognized but do nothing.
pub fn interpret(cs: &ControlSequence) -> Result<Option<ScreenOp>> {
    let p = cs.params.as_str();

    let op = match cs.final_char {
        'A' => ScreenOp::CursorUp(param(p, 1)?),
        'B' => ScreenOp::CursorDown(param(p, 1)?),
        'C' => ScreenOp::CursorForward(param(p, 1)?),
        'D' => ScreenOp::CursorBack(param(p, 1)?),
        'E' => ScreenOp::NextLine(param(p, 1)?),
        'F' => ScreenOp::PrevLine(param(p, 1)?),
        'G' => ScreenOp::ColumnAbsolute(param(p, 1)?),
        'H' => {
            let Some((row, col)) = p.split_once(';') else {
                return Err(Error::InvalidControlSequence);
            };
            // Exactly two fields
            if col.contains(';') {
                return Err(Error::InvalidControlSequence);
            }
            ScreenOp::Position {
                row: param(row, 1)?,
                col: param(col, 1)?,
            }
        }
        'I' => ScreenOp::ForwardTab(param(p, 1)?),
        'J' => match erase_mode(param(p, 0)?) {
            Some(mode) => ScreenOp::EraseDisplay(mode),
            None => return Ok(None),
        },
        'K' => match erase_mode(param(p, 0)?) {
            Some(mode) => ScreenOp::EraseLine(mode),
            None => return Ok(None),
        },
        'Z' => ScreenOp::BackwardTab(param(p, 1)?),
        _ => {
            trace!(sequence = ?cs, "ignored control sequence");
            return Ok(None);
        }
    };

    Ok(Some(op))
}
