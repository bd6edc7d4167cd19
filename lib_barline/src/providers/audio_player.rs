//! # Audio Player
//!
//! Now-playing information from any MPRIS player through `playerctl`. Long
//! labels scroll like a ticker, a few characters per generation.
//!
//! ## Clicks
//! - Left: play/pause.
//! - Scroll up: next track.
//! - Scroll down: previous track.

use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use crate::core::block::Block;
use crate::core::color::ColorSet;
use crate::core::event::{ClickEvent, MouseButton};
use crate::core::generator::{BlockGenerator, ClickEventConsumer, GenerationError, Identity};
use crate::providers::command::run_command;

const PLAYERCTL: &str = "playerctl";
const MUSIC_NOTE: &str = "♪";
const PAUSED: &str = "⏸";
const NO_PLAYERS: &str = "No players found";
const TICKER_GAP: &str = "    ";

/// Playback state reported by `playerctl status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerStatus {
    /// `Playing`.
    Playing,
    /// `Paused`.
    Paused,
    /// `Stopped`.
    Stopped,
    /// No player, or anything unrecognized.
    Unknown,
}

impl PlayerStatus {
    /// Maps `playerctl status` output.
    pub fn parse(output: &str) -> Self {
        match output.trim() {
            "Playing" => PlayerStatus::Playing,
            "Paused" => PlayerStatus::Paused,
            "Stopped" => PlayerStatus::Stopped,
            _ => PlayerStatus::Unknown,
        }
    }
}

/// Track metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackInfo {
    /// `xesam:title`.
    pub title: String,
    /// `xesam:artist`.
    pub artist: String,
    /// `xesam:album`.
    pub album: String,
}

/// Parses `playerctl metadata` output (`<player> <key> <value...>` per line).
pub fn parse_metadata(output: &str) -> TrackInfo {
    let mut info = TrackInfo::default();
    for line in output.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 3 {
            continue;
        }
        let value = fields[2..].join(" ");
        match fields[1].to_ascii_lowercase().as_str() {
            "xesam:title" => info.title = value,
            "xesam:artist" => info.artist = value,
            "xesam:album" => info.album = value,
            _ => {}
        }
    }
    info
}

/// Scrolling window over a label that is too long to show whole.
#[derive(Debug, Default)]
pub struct Ticker {
    last: String,
    cursor: usize,
}

impl Ticker {
    /// Returns the visible window of `text`. A new text restarts at the
    /// beginning; the same text advances by `steps` characters, wrapping
    /// around through a short gap.
    pub fn animate(&mut self, text: &str, max_len: usize, steps: usize) -> String {
        let chars: Vec<char> = text.chars().collect();
        if chars.len() <= max_len {
            self.last = text.to_string();
            return text.to_string();
        }

        let padded: Vec<char> = chars.into_iter().chain(TICKER_GAP.chars()).collect();
        let padded_text: String = padded.iter().collect();
        let len = padded.len();

        if padded_text != self.last {
            self.cursor = 0;
            self.last = padded_text;
            return padded[..max_len].iter().collect();
        }

        self.cursor += steps;
        if self.cursor >= len {
            self.cursor -= len;
        }

        if self.cursor + max_len > len {
            let tail = len - self.cursor;
            padded[self.cursor..]
                .iter()
                .chain(&padded[..max_len - tail])
                .collect()
        } else {
            padded[self.cursor..self.cursor + max_len].iter().collect()
        }
    }
}

/// Now-playing block.
#[derive(Debug)]
pub struct AudioPlayer {
    max_label_len: usize,
    ticker_steps: usize,
    show_text_on_pause: bool,
    ticker: Mutex<Ticker>,
}

impl AudioPlayer {
    /// Block name.
    pub const NAME: &'static str = "audioPlayer";

    /// Labels longer than `max_label_len` characters scroll.
    pub fn new(max_label_len: usize) -> Self {
        Self {
            max_label_len,
            ticker_steps: 3,
            show_text_on_pause: false,
            ticker: Mutex::new(Ticker::default()),
        }
    }

    /// Keeps the track label visible while paused.
    pub fn with_text_on_pause(mut self, enabled: bool) -> Self {
        self.show_text_on_pause = enabled;
        self
    }

    /// Characters the ticker advances per generation.
    pub fn with_ticker_steps(mut self, steps: usize) -> Self {
        self.ticker_steps = steps;
        self
    }

    fn read(&self) -> Result<(PlayerStatus, TrackInfo), GenerationError> {
        let metadata = match run_command(PLAYERCTL, &["metadata"]) {
            Ok(output) => output,
            Err(GenerationError::Command { stderr, .. }) if stderr == NO_PLAYERS => {
                return Ok((PlayerStatus::Unknown, TrackInfo::default()));
            }
            Err(e) => return Err(e),
        };
        let status = PlayerStatus::parse(&run_command(PLAYERCTL, &["status"])?);
        Ok((status, parse_metadata(&metadata)))
    }

    /// Builds the block for a status and track.
    pub fn render(&self, status: PlayerStatus, track: &TrackInfo) -> Block {
        let mut text = MUSIC_NOTE.to_string();

        let visible = status == PlayerStatus::Playing
            || (status == PlayerStatus::Paused && self.show_text_on_pause);
        if visible {
            text.push(' ');
            if status == PlayerStatus::Paused {
                text.push_str(PAUSED);
                text.push(' ');
            }
            let label = format!("{} - {}", track.title, track.artist);
            let mut ticker = self.ticker.lock().unwrap_or_else(PoisonError::into_inner);
            text.push_str(&ticker.animate(&label, self.max_label_len, self.ticker_steps));
        }

        Block::new(Self::NAME, text)
    }
}

impl BlockGenerator for AudioPlayer {
    fn identity(&self) -> Identity {
        Identity::new(Self::NAME, "")
    }

    fn generate(&self, _: &ColorSet) -> Result<Option<Block>, GenerationError> {
        let (status, track) = self.read()?;
        Ok(Some(self.render(status, &track)))
    }

    fn cadence(&self) -> Option<u32> {
        Some(1)
    }

    fn as_click_consumer(&self) -> Option<&dyn ClickEventConsumer> {
        Some(self)
    }
}

impl ClickEventConsumer for AudioPlayer {
    fn on_click(&self, event: &ClickEvent) -> bool {
        let command = match event.button {
            MouseButton::Left => "play-pause",
            MouseButton::ScrollUp => "next",
            MouseButton::ScrollDown => "previous",
            _ => return false,
        };

        if let Err(e) = run_command(PLAYERCTL, &[command]) {
            log::warn!("{} {} failed: {}", PLAYERCTL, command, e);
        }
        // give the player a moment to publish the new state
        thread::sleep(Duration::from_millis(50));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_metadata_lines() {
        let output = "spotify mpris:trackid   spotify:track:1\n\
spotify xesam:album     Some Album\n\
spotify xesam:artist    The Band\n\
spotify xesam:title     A Very Long Song Title\n\
spotify short\n";
        let track = parse_metadata(output);
        assert_eq!(track.title, "A Very Long Song Title");
        assert_eq!(track.artist, "The Band");
        assert_eq!(track.album, "Some Album");
    }

    #[test]
    fn status_strings() {
        assert_eq!(PlayerStatus::parse("Playing\n"), PlayerStatus::Playing);
        assert_eq!(PlayerStatus::parse("Paused"), PlayerStatus::Paused);
        assert_eq!(PlayerStatus::parse("Stopped"), PlayerStatus::Stopped);
        assert_eq!(PlayerStatus::parse("whatever"), PlayerStatus::Unknown);
    }

    #[test]
    fn ticker_scrolls_and_wraps() {
        let mut ticker = Ticker::default();
        let frames: Vec<String> = (0..5).map(|_| ticker.animate("abcdefgh", 5, 3)).collect();
        assert_eq!(frames, ["abcde", "defgh", "gh   ", "   ab", "abcde"]);

        assert_eq!(ticker.animate("short", 5, 3), "short");
        assert_eq!(ticker.animate("abcdefgh", 5, 3), "abcde");
    }

    #[test]
    fn renders_by_status() {
        let track = TrackInfo {
            title: "Song".into(),
            artist: "Band".into(),
            ..Default::default()
        };

        let player = AudioPlayer::new(40);
        assert_eq!(player.render(PlayerStatus::Playing, &track).full_text, "♪ Song - Band");
        assert_eq!(player.render(PlayerStatus::Paused, &track).full_text, "♪");
        assert_eq!(player.render(PlayerStatus::Unknown, &track).full_text, "♪");

        let player = AudioPlayer::new(40).with_text_on_pause(true);
        assert_eq!(player.render(PlayerStatus::Paused, &track).full_text, "♪ ⏸ Song - Band");
    }

    #[test]
    fn long_labels_scroll_by_the_configured_steps() {
        let track = TrackInfo {
            title: "Song".into(),
            artist: "Band".into(),
            ..Default::default()
        };

        let player = AudioPlayer::new(5).with_ticker_steps(1);
        assert_eq!(player.render(PlayerStatus::Playing, &track).full_text, "♪ Song ");
        assert_eq!(player.render(PlayerStatus::Playing, &track).full_text, "♪ ong -");
        assert_eq!(player.render(PlayerStatus::Playing, &track).full_text, "♪ ng - ");
    }

    #[test]
    fn other_buttons_are_ignored() {
        let player = AudioPlayer::new(10);
        let event = ClickEvent {
            name: AudioPlayer::NAME.into(),
            button: MouseButton::Right,
            ..Default::default()
        };
        assert!(!player.on_click(&event));
    }
}
