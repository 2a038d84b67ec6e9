//! Escape Filter Library
//!
//! Converts text interleaved with terminal control sequences into the plain
//! text a terminal would show once every sequence has been applied. This
//! crate provides:
//!
//! - `core`: Width model, lines, cursor and the growable virtual screen
//! - `parser`: Code point input and the ESC / CSI / OSC state machines
//! - `interpreter`: Mapping of control sequences to screen operations
//! - `filter`: The dispatcher that replays an input stream onto a screen
//! - `app`: Command-line options and I/O around the filter
//!
//! ```
//! let text = escape_filter::filter_str("\x1b[32mok\x1b[0m\rOK").unwrap();
//! assert_eq!(text, "OK");
//! ```

pub mod app;
pub mod core;
pub mod error;
pub mod filter;
pub mod interpreter;
pub mod parser;

pub use crate::core::Screen;
pub use error::{Error, Result};
pub use filter::{filter_str, EscapeFilter};
