//! Error types for filtering

use std::fmt;
use std::io;

use thiserror::Error;

/// Kind of escape sequence being parsed when input ran out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceKind {
    /// CSI (ESC [)
    ControlSequence,
    /// OSC (ESC ])
    OperatingSystemCommand,
}

impl fmt::Display for SequenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceKind::ControlSequence => f.write_str("control sequence"),
            SequenceKind::OperatingSystemCommand => f.write_str("operating system command"),
        }
    }
}

/// Filter error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error from the input source
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input ended in the middle of a CSI or OSC sequence
    #[error("unexpected end of input inside {sequence}")]
    UnexpectedEof {
        /// The sequence that was cut short
        sequence: SequenceKind,
    },

    /// ESC was the last character of the input
    #[error("truncated escape sequence")]
    TruncatedEscape,

    /// ESC followed by a character outside 0x40-0x5F
    #[error("invalid escape sequence")]
    InvalidEscape,

    /// Malformed CSI syntax or parameters
    #[error("invalid control sequence")]
    InvalidControlSequence,

    /// Malformed OSC command id
    #[error("invalid operating system command")]
    InvalidOsc,

    /// Snapshot serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether the dispatcher skips this error and keeps going
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::TruncatedEscape
                | Error::InvalidEscape
                | Error::InvalidControlSequence
                | Error::InvalidOsc
        )
    }
}

/// Result type for filtering
pub type Result<T> = std::result::Result<T, Error>;
