//! # Blocks
//!
//! A `Block` is one renderable segment of the status line, serialized exactly as
//! the i3bar protocol expects. Every field except `full_text` is omitted from the
//! wire when it is empty, zero or unset.

use serde::{Deserialize, Serialize};

use crate::core::color::Color;

/// Text alignment inside a block that is wider than its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Left-aligned.
    Left,
    /// Centered.
    Center,
    /// Right-aligned.
    Right,
}

/// How the host should interpret `full_text`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Markup {
    /// Pango markup.
    Pango,
    /// Plain text.
    None,
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// # Block
///
/// The visual and semantic unit produced by a generator. `name` and `instance`
/// are echoed back by the host in click events and are what the event
/// dispatcher uses to route a click to its generator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// The text shown when there is enough room.
    pub full_text: String,
    /// The text shown when the bar is short on space.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub short_text: String,
    /// Foreground color.
    #[serde(rename = "color", default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<Color>,
    /// Background color.
    #[serde(rename = "background", default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
    /// Border color.
    #[serde(rename = "border", default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Color>,
    /// Top border thickness in pixels.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub border_top: u32,
    /// Right border thickness in pixels.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub border_right: u32,
    /// Bottom border thickness in pixels.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub border_bottom: u32,
    /// Left border thickness in pixels.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub border_left: u32,
    /// Minimum width, given as a sample string the host measures.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub min_width: String,
    /// Alignment of the text within `min_width`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    /// Asks the host to highlight the block.
    #[serde(default, skip_serializing_if = "is_false")]
    pub urgent: bool,
    /// Generator name, used for click routing.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Generator instance, used for click routing.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub instance: String,
    /// Whether the host draws a separator after this block. Left to the host when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<bool>,
    /// Gap in pixels after this block.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub separator_block_width: u32,
    /// Markup mode for `full_text`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markup: Option<Markup>,
}

impl Block {
    /// Creates a block carrying a generator's name and its text.
    pub fn new(name: impl Into<String>, full_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            full_text: full_text.into(),
            ..Default::default()
        }
    }

    /// Sets the instance.
    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = instance.into();
        self
    }

    /// Sets the abbreviated text.
    pub fn with_short_text(mut self, short_text: impl Into<String>) -> Self {
        self.short_text = short_text.into();
        self
    }

    /// Sets (or clears) the text color.
    pub fn with_text_color(mut self, color: Option<Color>) -> Self {
        self.text_color = color;
        self
    }

    /// Sets (or clears) the background color.
    pub fn with_background_color(mut self, color: Option<Color>) -> Self {
        self.background_color = color;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_fields_are_omitted_but_full_text_is_not() {
        let value = serde_json::to_value(Block::default()).unwrap();
        assert_eq!(value, json!({ "full_text": "" }));
    }

    #[test]
    fn populated_block_uses_protocol_field_names() {
        let block = Block {
            border_top: 2,
            min_width: "100%".into(),
            align: Some(Align::Center),
            urgent: true,
            separator: Some(false),
            separator_block_width: 9,
            markup: Some(Markup::Pango),
            border_color: Some(Color::new(1, 2, 3)),
            ..Block::new("battery", "BAT 50.0%")
                .with_instance("BAT0")
                .with_short_text("50.0%")
                .with_text_color(Some(Color::new(0xff, 0, 0)))
                .with_background_color(Some(Color::new(0, 0, 0)))
        };

        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(
            value,
            json!({
                "full_text": "BAT 50.0%",
                "short_text": "50.0%",
                "color": "#ff0000",
                "background": "#000000",
                "border": "#010203",
                "border_top": 2,
                "min_width": "100%",
                "align": "center",
                "urgent": true,
                "name": "battery",
                "instance": "BAT0",
                "separator": false,
                "separator_block_width": 9,
                "markup": "pango"
            })
        );
    }
}
