//! Screen model
//!
//! Platform-independent state of the replayed session:
//! - Display width of code points
//! - Column-addressed lines
//! - Cursor and tab stops
//! - The growable virtual screen and its rendering
//! - Serializable snapshots
//!
//! The model is deterministic: the same sequence of operations always
//! produces the same screen.

mod cursor;
mod line;
mod screen;
mod snapshot;
mod width;

pub use cursor::{Cursor, TAB_WIDTH};
pub use line::{ColumnPosition, Line};
pub use screen::{EraseMode, Screen, ScreenOp};
pub use snapshot::Snapshot;
pub use width::{char_width, str_width};
