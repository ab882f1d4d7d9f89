//! Pointer actions emitted by the gesture pipeline.

use serde::{Deserialize, Serialize};

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    Left,
    Right,
}

/// A single command for the pointer backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Move to absolute screen pixels, origin top-left.
    MoveCursor { x: f64, y: f64 },

    /// Press and release a button.
    Click { button: MouseButton },

    /// Wheel impulse. Negative scrolls down.
    Scroll { delta: i32 },

    /// End the session.
    Shutdown,
}

impl Action {
    pub fn is_click(&self) -> bool {
        matches!(self, Action::Click { .. })
    }

    pub fn is_scroll(&self) -> bool {
        matches!(self, Action::Scroll { .. })
    }

    pub fn is_shutdown(&self) -> bool {
        matches!(self, Action::Shutdown)
    }
}

/// An action tagged with the frame time it was emitted at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedAction {
    /// Frame time in seconds.
    pub t: f64,

    #[serde(flatten)]
    pub action: Action,
}

/// Header of an action log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionLogHeader {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// Wall-clock time at session start (ISO 8601).
    pub epoch_wall: String,

    /// Screen area the cursor is mapped onto, in pixels.
    pub screen_width: u32,
    pub screen_height: u32,

    /// Backend the actions were dispatched to.
    pub backend: String,
}

/// Parse timed actions from JSONL content, skipping `#` lines.
pub fn parse_actions(jsonl: &str) -> Result<Vec<TimedAction>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_wire_format() {
        let action = TimedAction {
            t: 1.25,
            action: Action::Click {
                button: MouseButton::Right,
            },
        };
        let json = serde_json::to_string(&action).unwrap();
        assert_eq!(json, r#"{"t":1.25,"type":"click","button":"right"}"#);

        let shutdown: TimedAction = serde_json::from_str(r#"{"t":4.0,"type":"shutdown"}"#).unwrap();
        assert!(shutdown.action.is_shutdown());
    }

    #[test]
    fn test_parse_actions() {
        let jsonl = "# {}\n{\"t\":0.0,\"type\":\"move_cursor\",\"x\":10.0,\"y\":20.0}\n{\"t\":0.1,\"type\":\"scroll\",\"delta\":-40}\n";
        let actions = parse_actions(jsonl).unwrap();
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[1].action, Action::Scroll { delta: -40 });
    }
}
