//! # Stopwatch
//!
//! Left click starts the timer, then pauses and resumes it. Right click resets.
//! The running total is kept as a list of instants: even positions start a run,
//! odd positions end it.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::core::block::Block;
use crate::core::color::ColorSet;
use crate::core::event::{ClickEvent, MouseButton};
use crate::core::generator::{BlockGenerator, ClickEventConsumer, GenerationError, Identity};

const CLOCK: &str = "⏰";
const PLAY: &str = "▶";
const PAUSE: &str = "⏸";

/// A click-driven stopwatch.
#[derive(Debug, Default)]
pub struct Timer {
    short_label: bool,
    marks: Mutex<Vec<Instant>>,
}

impl Timer {
    /// Block name.
    pub const NAME: &'static str = "timer";

    /// Creates an idle timer. With `short_label` the idle block is just the clock symbol.
    pub fn new(short_label: bool) -> Self {
        Self {
            short_label,
            marks: Mutex::new(Vec::new()),
        }
    }

    fn render(&self, marks: &[Instant], now: Instant) -> Block {
        let block = Block::new(Self::NAME, "");

        if marks.is_empty() {
            return if self.short_label {
                Block {
                    full_text: CLOCK.to_string(),
                    short_text: CLOCK.to_string(),
                    ..block
                }
            } else {
                Block {
                    full_text: format!("{} Click to start", CLOCK),
                    short_text: format!("{} Click", CLOCK),
                    ..block
                }
            };
        }

        let symbol = if marks.len() % 2 == 0 { PAUSE } else { PLAY };
        Block {
            full_text: format!(
                "{} {} {}",
                CLOCK,
                symbol,
                format_duration(elapsed(marks, now))
            ),
            ..block
        }
    }
}

/// Sums the closed and (if running) open intervals, rounded to the second.
fn elapsed(marks: &[Instant], now: Instant) -> Duration {
    let total: Duration = marks
        .chunks(2)
        .map(|run| run.get(1).copied().unwrap_or(now).saturating_duration_since(run[0]))
        .sum();
    Duration::from_secs((total.as_millis() as u64 + 500) / 1000)
}

/// Formats whole seconds as `5s`, `1m5s` or `1h0m5s`.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let (h, m, s) = (secs / 3600, secs / 60 % 60, secs % 60);
    if h > 0 {
        format!("{}h{}m{}s", h, m, s)
    } else if m > 0 {
        format!("{}m{}s", m, s)
    } else {
        format!("{}s", s)
    }
}

impl BlockGenerator for Timer {
    fn identity(&self) -> Identity {
        Identity::new(Self::NAME, "")
    }

    fn generate(&self, _: &ColorSet) -> Result<Option<Block>, GenerationError> {
        let marks = self.marks.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(Some(self.render(&marks, Instant::now())))
    }

    fn cadence(&self) -> Option<u32> {
        Some(1)
    }

    fn as_click_consumer(&self) -> Option<&dyn ClickEventConsumer> {
        Some(self)
    }
}

impl ClickEventConsumer for Timer {
    fn on_click(&self, event: &ClickEvent) -> bool {
        let mut marks = self.marks.lock().unwrap_or_else(PoisonError::into_inner);

        match event.button {
            MouseButton::Left => marks.push(Instant::now()),
            MouseButton::Right if !marks.is_empty() => marks.clear(),
            _ => return false,
        }
        true
    }
}
