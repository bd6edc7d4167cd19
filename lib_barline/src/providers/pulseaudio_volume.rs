//! # PulseAudio Volume
//!
//! Volume and mute state of a sink through `pactl`. Scrolling over the block
//! nudges the volume by one percent.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::block::Block;
use crate::core::color::ColorSet;
use crate::core::event::{ClickEvent, MouseButton};
use crate::core::generator::{BlockGenerator, ClickEventConsumer, GenerationError, Identity};
use crate::providers::command::run_command;

const DEFAULT_SINK: &str = "@DEFAULT_SINK@";

static PERCENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\s*(\d{1,3})%\s*/").expect("valid regex"));

/// Channel volumes and mute flag of a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkVolume {
    /// Front-left volume in percent.
    pub left: u32,
    /// Front-right volume in percent (equal to `left` on mono sinks).
    pub right: u32,
    /// Whether the sink is muted.
    pub muted: bool,
}

/// Parses `pactl get-sink-volume` output into `(left, right)`.
pub fn parse_volume(output: &str) -> Result<(u32, u32), GenerationError> {
    let mut channels = PERCENT_RE
        .captures_iter(output)
        .filter_map(|caps| caps[1].parse::<u32>().ok());

    let left = channels
        .next()
        .ok_or_else(|| GenerationError::Parse(format!("sink volume {:?}", output)))?;
    let right = channels.next().unwrap_or(left);
    Ok((left, right))
}

/// Parses `pactl get-sink-mute` output.
pub fn parse_mute(output: &str) -> Result<bool, GenerationError> {
    let state = output
        .trim()
        .strip_prefix("Mute:")
        .map(str::trim)
        .unwrap_or_default();
    match state.to_ascii_lowercase().as_str() {
        "yes" => Ok(true),
        "no" => Ok(false),
        _ => Err(GenerationError::Parse(format!("sink mute {:?}", output))),
    }
}

/// A volume indicator and scroll control.
#[derive(Debug, Clone, Default)]
pub struct PulseaudioVolume {
    sink: String,
}

impl PulseaudioVolume {
    /// Block name.
    pub const NAME: &'static str = "pulseaudioVolume";

    /// Tracks `sink`; an empty name follows the default sink.
    pub fn new(sink: impl Into<String>) -> Self {
        Self { sink: sink.into() }
    }

    fn target(&self) -> &str {
        if self.sink.is_empty() {
            DEFAULT_SINK
        } else {
            &self.sink
        }
    }

    fn read(&self) -> Result<SinkVolume, GenerationError> {
        let (left, right) = parse_volume(&run_command("pactl", &["get-sink-volume", self.target()])?)?;
        let muted = parse_mute(&run_command("pactl", &["get-sink-mute", self.target()])?)?;
        Ok(SinkVolume { left, right, muted })
    }

    fn change_volume(&self, delta: i32) -> Result<(), GenerationError> {
        let step = format!("{:+}%", delta);
        run_command("pactl", &["set-sink-volume", self.target(), &step]).map(|_| ())
    }

    /// Builds the block for a reading.
    pub fn render(&self, volume: SinkVolume, colors: &ColorSet) -> Block {
        let block = Block::new(Self::NAME, "").with_instance(self.sink.clone());

        if volume.muted {
            return Block {
                full_text: "Vol: muted".to_string(),
                short_text: "V: mute".to_string(),
                text_color: colors.warning,
                ..block
            };
        }

        let full_text = if volume.left == volume.right {
            format!("Vol: {}%", volume.left)
        } else {
            format!("Vol: L{}% R{}%", volume.left, volume.right)
        };
        Block {
            full_text,
            short_text: format!("V: {}%", volume.left),
            ..block
        }
    }
}

impl BlockGenerator for PulseaudioVolume {
    fn identity(&self) -> Identity {
        Identity::new(Self::NAME, self.sink.clone())
    }

    fn generate(&self, colors: &ColorSet) -> Result<Option<Block>, GenerationError> {
        Ok(Some(self.render(self.read()?, colors)))
    }

    fn cadence(&self) -> Option<u32> {
        Some(2)
    }

    fn as_click_consumer(&self) -> Option<&dyn ClickEventConsumer> {
        Some(self)
    }
}

impl ClickEventConsumer for PulseaudioVolume {
    fn on_click(&self, event: &ClickEvent) -> bool {
        let delta = match event.button {
            MouseButton::ScrollUp => 1,
            MouseButton::ScrollDown => -1,
            _ => return false,
        };

        if let Err(e) = self.change_volume(delta) {
            log::error!("Failed to change volume of {}: {}", self.target(), e);
        }
        true
    }
}
