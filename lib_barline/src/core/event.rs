//! # Click Events
//!
//! Inbound events from the host. The host streams one JSON object per line,
//! usually wrapped in a never-closed array, so a raw line may carry a leading or
//! trailing comma. `ClickEvent::parse_line` strips those before decoding.

use serde::{Deserialize, Serialize};

/// The mouse button (or wheel direction) behind a click event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum MouseButton {
    /// Button 1.
    Left,
    /// Button 2.
    Middle,
    /// Button 3.
    Right,
    /// Button 4.
    ScrollUp,
    /// Button 5.
    ScrollDown,
    /// Any other code the host may send (horizontal scroll, back, forward, ...).
    Other(u8),
}

impl From<u8> for MouseButton {
    fn from(code: u8) -> Self {
        match code {
            1 => MouseButton::Left,
            2 => MouseButton::Middle,
            3 => MouseButton::Right,
            4 => MouseButton::ScrollUp,
            5 => MouseButton::ScrollDown,
            other => MouseButton::Other(other),
        }
    }
}

impl From<MouseButton> for u8 {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => 1,
            MouseButton::Middle => 2,
            MouseButton::Right => 3,
            MouseButton::ScrollUp => 4,
            MouseButton::ScrollDown => 5,
            MouseButton::Other(code) => code,
        }
    }
}

impl Default for MouseButton {
    fn default() -> Self {
        MouseButton::Other(0)
    }
}

/// # Click Event
///
/// A click or scroll on one of the blocks, as reported by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClickEvent {
    /// `name` of the clicked block.
    pub name: String,
    /// `instance` of the clicked block.
    pub instance: String,
    /// Which button was pressed.
    pub button: MouseButton,
    /// Modifier keys held during the click (`"Shift"`, `"Mod4"`, ...).
    pub modifiers: Vec<String>,
    /// Absolute X coordinate.
    pub x: i32,
    /// Absolute Y coordinate.
    pub y: i32,
    /// X coordinate relative to the block.
    pub relative_x: i32,
    /// Y coordinate relative to the block.
    pub relative_y: i32,
    /// X coordinate relative to the output.
    pub output_x: i32,
    /// Y coordinate relative to the output.
    pub output_y: i32,
    /// Width of the block in pixels.
    pub width: i32,
    /// Height of the block in pixels.
    pub height: i32,
}

impl ClickEvent {
    /// # Parse Line
    ///
    /// Decodes one line of host input. Stray whitespace and commas around the
    /// object are ignored. Anything that is not an event object (the opening
    /// `[`, blank lines, garbage) yields `None`.
    pub fn parse_line(line: &str) -> Option<Self> {
        let trimmed = line.trim().trim_matches(',').trim();
        if trimmed.is_empty() {
            return None;
        }
        serde_json::from_str(trimmed).ok()
    }

    /// Returns true if the given modifier was held.
    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers.iter().any(|m| m == modifier)
    }
}
