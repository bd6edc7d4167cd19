//! # Colors and Palettes
//!
//! `Color` is a plain RGB triple that renders as `#rrggbb` on the wire. Hex input
//! is accepted with or without a leading `#`, in either the 3-digit (`#fa0`) or
//! 6-digit (`#ffaa00`) form; the short form is expanded by doubling each digit.
//!
//! `ColorSet` is the semantic palette handed to every generator on each
//! generation call, so that providers can theme their output without knowing
//! the concrete palette values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors raised while parsing a hex color string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// The string (after stripping `#`) was neither 3 nor 6 characters long.
    #[error("invalid color length {0}, expected 3 or 6 hex digits")]
    InvalidLength(usize),

    /// The string contained characters that are not hex digits.
    #[error("invalid hex color {0:?}")]
    InvalidHex(String),
}

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Creates a color from its three channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// # From Hex String
    ///
    /// Parses `#rgb`, `rgb`, `#rrggbb` or `rrggbb`.
    ///
    /// # Returns
    /// The parsed `Color`, or a `ColorError` describing why the input was rejected.
    pub fn from_hex(input: &str) -> Result<Self, ColorError> {
        let digits = input.strip_prefix('#').unwrap_or(input);

        let expanded: String = match digits.chars().count() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            other => return Err(ColorError::InvalidLength(other)),
        };

        let bytes =
            hex::decode(&expanded).map_err(|_| ColorError::InvalidHex(input.to_string()))?;

        Ok(Self::new(bytes[0], bytes[1], bytes[2]))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", hex::encode([self.r, self.g, self.b]))
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::from_hex(&raw).map_err(serde::de::Error::custom)
    }
}

/// # Color Set
///
/// The four semantic palette slots. Each slot is optional; an empty slot leaves
/// the host's default color in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSet {
    /// Used for healthy / positive states.
    pub good: Option<Color>,
    /// Used for failures and critical thresholds.
    pub bad: Option<Color>,
    /// Used for degraded states.
    pub warning: Option<Color>,
    /// The bar background, for providers that invert their colors.
    pub background: Option<Color>,
}

impl Default for ColorSet {
    /// A gruvbox-flavoured palette.
    fn default() -> Self {
        Self {
            good: Some(Color::new(0xb8, 0xbb, 0x26)),
            bad: Some(Color::new(0xfb, 0x49, 0x34)),
            warning: Some(Color::new(0xfa, 0xbd, 0x2f)),
            background: Some(Color::new(0x28, 0x28, 0x28)),
        }
    }
}

impl ColorSet {
    /// A palette with every slot empty.
    pub fn empty() -> Self {
        Self {
            good: None,
            bad: None,
            warning: None,
            background: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_and_long_forms_are_equal() {
        let short = Color::from_hex("#fff").unwrap();
        let long = Color::from_hex("#ffffff").unwrap();
        assert_eq!(short, long);
        assert_eq!(short.to_string(), "#ffffff");
    }

    #[test]
    fn hash_prefix_is_optional() {
        assert_eq!(
            Color::from_hex("fb4934").unwrap(),
            Color::from_hex("#fb4934").unwrap()
        );
        assert_eq!(Color::from_hex("a1b").unwrap(), Color::new(0xaa, 0x11, 0xbb));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(Color::from_hex("#ffff"), Err(ColorError::InvalidLength(4)));
        assert_eq!(Color::from_hex(""), Err(ColorError::InvalidLength(0)));
        assert!(matches!(
            Color::from_hex("#zzzzzz"),
            Err(ColorError::InvalidHex(_))
        ));
    }

    #[test]
    fn serde_uses_hex_strings() {
        let color = Color::new(0x28, 0x28, 0x28);
        assert_eq!(serde_json::to_string(&color).unwrap(), r##""#282828""##);

        let parsed: Color = serde_json::from_str(r##""#abc""##).unwrap();
        assert_eq!(parsed, Color::new(0xaa, 0xbb, 0xcc));

        assert!(serde_json::from_str::<Color>(r#""nope""#).is_err());
    }

    #[test]
    fn palette_deserializes_partial_slots() {
        let set: ColorSet =
            serde_json::from_str(r##"{"good":"#0f0","bad":null,"warning":null,"background":null}"##)
                .unwrap();
        assert_eq!(set.good, Some(Color::new(0, 0xff, 0)));
        assert_eq!(set.bad, None);
    }
}
