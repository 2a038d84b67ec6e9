//! Operating System Command (OSC) parsing
//!
//! After `ESC ]` an OSC is a numeric command id, a `;`, and a free-text
//! payload ended by BEL or by ST (`ESC \`). An ESC inside the payload that
//! is not followed by `\` is ordinary payload data.
//!
//! The filter never acts on OSCs; they are parsed only so that their
//! payload does not leak into the output.

use std::fmt;

use super::input::CharSource;
use crate::error::{Error, Result, SequenceKind};

const BEL: char = '\u{07}';
const ESC: char = '\u{1b}';

/// How an OSC was terminated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OscTerminator {
    /// BEL (0x07)
    Bel,
    /// ST, `ESC \`
    St,
}

impl OscTerminator {
    fn as_str(self) -> &'static str {
        match self {
            OscTerminator::Bel => "\u{07}",
            OscTerminator::St => "\u{1b}\\",
        }
    }
}

/// State of the OSC state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OscState {
    /// Reading the command id
    Command,
    /// Reading the payload
    Parameter,
    /// Saw ESC in the payload, may be the start of ST
    MaybeSt,
}

/// What to do with one input character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OscTransition {
    /// Append it to the command id
    Command,
    /// `;` between id and payload; go to [`OscState::Parameter`]
    Separator,
    /// Append it to the payload
    Payload,
    /// Hold the ESC; go to [`OscState::MaybeSt`]
    Escape,
    /// The held ESC was data: append ESC and this character to the payload
    /// and go back to [`OscState::Parameter`]
    LiteralEscape,
    /// The command is complete
    Terminate(OscTerminator),
    /// Push it back; the command is invalid
    Reject,
}

impl OscState {
    /// Transition function of the state machine
    pub fn transition(self, c: char) -> OscTransition {
        match self {
            OscState::Command => match c {
                '0'..='9' => OscTransition::Command,
                ';' => OscTransition::Separator,
                _ => OscTransition::Reject,
            },
            OscState::Parameter => match c {
                BEL => OscTransition::Terminate(OscTerminator::Bel),
                ESC => OscTransition::Escape,
                _ => OscTransition::Payload,
            },
            OscState::MaybeSt => match c {
                '\\' => OscTransition::Terminate(OscTerminator::St),
                _ => OscTransition::LiteralEscape,
            },
        }
    }
}

/// A parsed operating system command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OscCommand {
    /// Numeric command id, as written
    pub command: String,
    /// Payload after the `;`
    pub payload: String,
    /// Terminator that ended the command
    pub terminator: OscTerminator,
}

impl fmt::Display for OscCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\u{1b}]{};{}{}",
            self.command,
            self.payload,
            self.terminator.as_str()
        )
    }
}

/// Read an operating system command whose `ESC ]` has already been consumed
pub fn read_osc<S: CharSource>(src: &mut S) -> Result<OscCommand> {
    let mut command = String::new();
    let mut payload = String::new();
    let mut state = OscState::Command;

    loop {
        let c = src.next_char()?.ok_or(Error::UnexpectedEof {
            sequence: SequenceKind::OperatingSystemCommand,
        })?;

        match state.transition(c) {
            OscTransition::Command => command.push(c),
            OscTransition::Separator => state = OscState::Parameter,
            OscTransition::Payload => payload.push(c),
            OscTransition::Escape => state = OscState::MaybeSt,
            OscTransition::LiteralEscape => {
                payload.push(ESC);
                payload.push(c);
                state = OscState::Parameter;
            }
            OscTransition::Terminate(terminator) => {
                return Ok(OscCommand {
                    command,
                    payload,
                    terminator,
                });
            }
            OscTransition::Reject => {
                src.push_back(c);
                return Err(Error::InvalidOsc);
            }
        }
    }
}
