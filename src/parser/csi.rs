//! Control Sequence (CSI) parsing
//!
//! After `ESC [` a control sequence is read in three phases that never go
//! backwards:
//!
//! ```text
//! Parameter     0x30-0x3F*   digits, ';', ':', '<', '=', '>', '?'
//! Intermediate  0x20-0x2F*   space and ! " # $ % & ' ( ) * + , - . /
//! Final         0x40-0x7E    exactly one
//! ```
//!
//! A character that does not fit the current phase is pushed back and the
//! next phase looks at it. A character that fits no remaining phase makes
//! the sequence invalid and is left in the input.

use std::fmt;

use super::input::CharSource;
use crate::error::{Error, Result, SequenceKind};

/// Phase of the CSI state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsiState {
    /// Collecting parameter characters
    Parameter,
    /// Collecting intermediate characters
    Intermediate,
    /// Waiting for the final character
    Final,
}

/// What to do with one input character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsiTransition {
    /// Consume it as a parameter character
    Parameter,
    /// Consume it as an intermediate character
    Intermediate,
    /// Push it back and continue in the given state
    Advance(CsiState),
    /// Consume it as the final character; the sequence is complete
    Final,
    /// Push it back; the sequence is invalid
    Reject,
}

impl CsiState {
    /// Transition function of the state machine
    pub fn transition(self, c: char) -> CsiTransition {
        match self {
            CsiState::Parameter => match c {
                '\u{30}'..='\u{3F}' => CsiTransition::Parameter,
                _ => CsiTransition::Advance(CsiState::Intermediate),
            },
            CsiState::Intermediate => match c {
                '\u{20}'..='\u{2F}' => CsiTransition::Intermediate,
                _ => CsiTransition::Advance(CsiState::Final),
            },
            CsiState::Final => match c {
                '\u{40}'..='\u{7E}' => CsiTransition::Final,
                _ => CsiTransition::Reject,
            },
        }
    }
}

/// A parsed control sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlSequence {
    /// Parameter characters (0x30-0x3F)
    pub params: String,
    /// Intermediate characters (0x20-0x2F)
    pub intermediates: String,
    /// Final character (0x40-0x7E), determines the command
    pub final_char: char,
}

impl ControlSequence {
    /// Create a control sequence from its parts
    pub fn new(params: &str, intermediates: &str, final_char: char) -> Self {
        Self {
            params: params.to_string(),
            intermediates: intermediates.to_string(),
            final_char,
        }
    }
}

impl fmt::Display for ControlSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\u{1b}[{}{}{}",
            self.params, self.intermediates, self.final_char
        )
    }
}

/// Read a control sequence whose `ESC [` has already been consumed
pub fn read_control_sequence<S: CharSource>(src: &mut S) -> Result<ControlSequence> {
    let mut params = String::new();
    let mut intermediates = String::new();
    let mut state = CsiState::Parameter;

    loop {
        let c = src.next_char()?.ok_or(Error::UnexpectedEof {
            sequence: SequenceKind::ControlSequence,
        })?;

        match state.transition(c) {
            CsiTransition::Parameter => params.push(c),
            CsiTransition::Intermediate => intermediates.push(c),
            CsiTransition::Advance(next) => {
                src.push_back(c);
                state = next;
            }
            CsiTransition::Final => {
                return Ok(ControlSequence {
                    params,
                    intermediates,
                    final_char: c,
                });
            }
            CsiTransition::Reject => {
                src.push_back(c);
                return Err(Error::InvalidControlSequence);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::input::CharReader;

    fn read(input: &str) -> (Result<ControlSequence>, Option<char>) {
        let mut src = CharReader::new(input.as_bytes());
        let result = read_control_sequence(&mut src);
        (result, src.next_char().unwrap())
    }

    #[test]
    fn test_transitions() {
        use CsiTransition::*;

        assert_eq!(CsiState::Parameter.transition('1'), Parameter);
        assert_eq!(CsiState::Parameter.transition(';'), Parameter);
        assert_eq!(CsiState::Parameter.transition('?'), Parameter);
        assert_eq!(
            CsiState::Parameter.transition(' '),
            Advance(CsiState::Intermediate)
        );
        assert_eq!(CsiState::Intermediate.transition('$'), Intermediate);
        assert_eq!(
            CsiState::Intermediate.transition('m'),
            Advance(CsiState::Final)
        );
        assert_eq!(CsiState::Final.transition('m'), Final);
        assert_eq!(CsiState::Final.transition('~'), Final);
        assert_eq!(CsiState::Final.transition('\u{7f}'), Reject);
        assert_eq!(CsiState::Final.transition('1'), Reject);
    }

    #[test]
    fn test_read_sgr() {
        let (cs, next) = read("01;32mcolored");
        assert_eq!(cs.unwrap(), ControlSequence::new("01;32", "", 'm'));
        assert_eq!(next, Some('c'));
    }

    #[test]
    fn test_read_without_params() {
        let (cs, next) = read("Kabc");
        assert_eq!(cs.unwrap(), ControlSequence::new("", "", 'K'));
        assert_eq!(next, Some('a'));
    }

    #[test]
    fn test_read_with_intermediates() {
        let (cs, next) = read("?1 $pxyz");
        assert_eq!(cs.unwrap(), ControlSequence::new("?1", " $", 'p'));
        assert_eq!(next, Some('x'));
    }

    #[test]
    fn test_read_at_end_of_input() {
        let (cs, next) = read("8;3H");
        assert_eq!(cs.unwrap(), ControlSequence::new("8;3", "", 'H'));
        assert_eq!(next, None);
    }

    #[test]
    fn test_invalid_final_is_pushed_back() {
        let (cs, next) = read("12\nrest");
        assert!(matches!(cs, Err(Error::InvalidControlSequence)));
        assert_eq!(next, Some('\n'));

        // A parameter character after an intermediate is not allowed
        let (cs, next) = read(" 1m");
        assert!(matches!(cs, Err(Error::InvalidControlSequence)));
        assert_eq!(next, Some('1'));
    }

    #[test]
    fn test_end_of_input_inside_sequence() {
        for input in ["", "1;2", "1 "] {
            let (cs, _) = read(input);
            assert!(
                matches!(
                    cs,
                    Err(Error::UnexpectedEof {
                        sequence: SequenceKind::ControlSequence
                    })
                ),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn test_display_reproduces_source() {
        assert_eq!(
            ControlSequence::new("01;32", "", 'm').to_string(),
            "\u{1b}[01;32m"
        );
        assert_eq!(ControlSequence::new("?1", " ", 'q').to_string(), "\u{1b}[?1 q");
    }
}
