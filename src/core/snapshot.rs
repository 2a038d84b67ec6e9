//! Serializable screen state
//!
//! A snapshot captures the replayed screen in a form that can be written as
//! JSON, so the final state can be inspected or compared without rendering
//! rules getting in the way.

use serde::{Deserialize, Serialize};

use super::cursor::Cursor;
use super::screen::Screen;

/// A complete snapshot of the virtual screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Content of each line, without padding
    pub lines: Vec<String>,
    /// Cursor position at the end of the session
    pub cursor: Cursor,
    /// The rendered text
    pub text: String,
}

impl Snapshot {
    /// Capture the state of a screen
    pub fn from_screen(screen: &Screen) -> Self {
        Self {
            lines: screen.lines().iter().map(|line| line.text()).collect(),
            cursor: screen.cursor(),
            text: screen.render(),
        }
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_captures_state() {
        let screen = Screen::with_content(["ab", "c"], 3, 2);
        let snapshot = screen.snapshot();

        assert_eq!(snapshot.lines, vec!["ab", "c"]);
        assert_eq!(snapshot.cursor, Cursor::new(3, 2));
        assert_eq!(snapshot.text, "ab\nc\n");
    }

    #[test]
    fn test_snapshot_json_roundtrip() {
        let snapshot = Screen::with_content(["こんにちは"], 1, 11).snapshot();
        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"row\": 1"));

        let restored = Snapshot::from_json(&json).unwrap();
        assert_eq!(snapshot, restored);
    }
}
