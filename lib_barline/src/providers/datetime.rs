//! Local date and time.

use chrono::{DateTime as ChronoDateTime, Datelike, Local, TimeZone};

use crate::core::block::Block;
use crate::core::color::ColorSet;
use crate::core::generator::{BlockGenerator, GenerationError, Identity};

/// Shows the local date and time, e.g. `Tu 2024-01-02 15:04:05`.
#[derive(Debug, Clone, Default)]
pub struct DateTime;

impl DateTime {
    /// Block name.
    pub const NAME: &'static str = "datetime";

    /// Creates the generator.
    pub fn new() -> Self {
        Self
    }
}

/// Renders the full and short labels for `now`.
pub fn format_datetime<Tz>(now: &ChronoDateTime<Tz>) -> (String, String)
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let weekday = now.weekday().to_string();
    let abbreviation: String = weekday.chars().take(2).collect();
    (
        format!("{} {}", abbreviation, now.format("%Y-%m-%d %H:%M:%S")),
        now.format("%H:%M:%S").to_string(),
    )
}

impl BlockGenerator for DateTime {
    fn identity(&self) -> Identity {
        Identity::new(Self::NAME, "")
    }

    fn generate(&self, _: &ColorSet) -> Result<Option<Block>, GenerationError> {
        let (full, short) = format_datetime(&Local::now());
        Ok(Some(Block::new(Self::NAME, full).with_short_text(short)))
    }

    fn cadence(&self) -> Option<u32> {
        Some(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn formats_weekday_date_and_time() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 15, 4, 5).unwrap();
        let (full, short) = format_datetime(&at);
        assert_eq!(full, "Tu 2024-01-02 15:04:05");
        assert_eq!(short, "15:04:05");
    }
}
