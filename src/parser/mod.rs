//! Escape sequence parser
//!
//! Pull parsers that read code points from a [`CharSource`] and recognize
//! the escape grammar: ESC classification, CSI and OSC. Each grammar is an
//! explicit state machine whose transition function decides whether a
//! character is consumed or left in the input.

mod csi;
mod escape;
mod input;
mod osc;
mod utf8;

pub use csi::{read_control_sequence, ControlSequence, CsiState, CsiTransition};
pub use escape::{read_escape_kind, read_escape_sequence, EscapeKind, EscapeSequence};
pub use input::{CharReader, CharSource};
pub use osc::{read_osc, OscCommand, OscState, OscTerminator, OscTransition};
pub use utf8::{Utf8Decoder, Utf8Result, REPLACEMENT_CHAR};
