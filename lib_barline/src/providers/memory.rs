//! # Memory
//!
//! Used and total memory from `/proc/meminfo`, in GB.

use std::fs;
use std::sync::LazyLock;

use regex::Regex;

use crate::core::block::Block;
use crate::core::color::ColorSet;
use crate::core::generator::{BlockGenerator, GenerationError, Identity};

const PROC_MEMINFO: &str = "/proc/meminfo";

static TOTAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"MemTotal: +(\d+) kB").expect("valid regex"));
static AVAILABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"MemAvailable: +(\d+) kB").expect("valid regex"));

/// Memory figures in GB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemoryStats {
    /// Total installed memory.
    pub total: f32,
    /// Memory available to new processes.
    pub available: f32,
}

impl MemoryStats {
    /// Extracts `MemTotal` and `MemAvailable` from `/proc/meminfo` contents.
    pub fn parse(meminfo: &str) -> Result<Self, GenerationError> {
        Ok(Self {
            total: field_gb(&TOTAL_RE, meminfo, "MemTotal")?,
            available: field_gb(&AVAILABLE_RE, meminfo, "MemAvailable")?,
        })
    }

    /// Memory in use.
    pub fn used(&self) -> f32 {
        self.total - self.available
    }
}

fn field_gb(re: &Regex, meminfo: &str, field: &str) -> Result<f32, GenerationError> {
    let kb: u64 = re
        .captures(meminfo)
        .and_then(|caps| caps[1].parse().ok())
        .ok_or_else(|| GenerationError::Parse(format!("{} in {}", field, PROC_MEMINFO)))?;
    Ok(kb as f32 / 1_000_000.0)
}

/// A memory monitor. Thresholds apply to available memory, in GB.
#[derive(Debug, Clone)]
pub struct Memory {
    ok_threshold: f32,
    warning_threshold: f32,
}

impl Memory {
    /// Block name.
    pub const NAME: &'static str = "memory";

    /// Creates the monitor.
    pub fn new(ok_threshold: f32, warning_threshold: f32) -> Self {
        Self {
            ok_threshold,
            warning_threshold,
        }
    }

    /// Builds the block for a reading.
    pub fn render(&self, stats: MemoryStats, colors: &ColorSet) -> Block {
        let used = stats.used();
        let mut block = Block::new(Self::NAME, format!("Mem: {:.1}/{:.1}GB", used, stats.total))
            .with_short_text(format!("M: {:.1}GB", used));

        if self.warning_threshold != 0.0 && stats.available < self.warning_threshold {
            block.text_color = colors.bad;
        } else if self.ok_threshold != 0.0 && stats.available < self.ok_threshold {
            block.text_color = colors.warning;
        }
        block
    }
}

impl BlockGenerator for Memory {
    fn identity(&self) -> Identity {
        Identity::new(Self::NAME, "")
    }

    fn generate(&self, colors: &ColorSet) -> Result<Option<Block>, GenerationError> {
        let stats = MemoryStats::parse(&fs::read_to_string(PROC_MEMINFO)?)?;
        Ok(Some(self.render(stats, colors)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEMINFO: &str = "MemTotal:       16000000 kB\n\
MemFree:         1000000 kB\n\
MemAvailable:    6000000 kB\n\
Buffers:          200000 kB\n";

    #[test]
    fn parses_meminfo() {
        let stats = MemoryStats::parse(MEMINFO).unwrap();
        assert_eq!(stats.total, 16.0);
        assert_eq!(stats.available, 6.0);
        assert_eq!(stats.used(), 10.0);
    }

    #[test]
    fn missing_fields_are_parse_errors() {
        assert!(matches!(
            MemoryStats::parse("MemTotal: 1 kB\n"),
            Err(GenerationError::Parse(_))
        ));
    }

    #[test]
    fn available_memory_drives_color() {
        let memory = Memory::new(7.0, 5.0);
        let colors = ColorSet::default();

        let block = memory.render(MemoryStats { total: 16.0, available: 6.0 }, &colors);
        assert_eq!(block.full_text, "Mem: 10.0/16.0GB");
        assert_eq!(block.short_text, "M: 10.0GB");
        assert_eq!(block.text_color, colors.warning);

        let low = memory.render(MemoryStats { total: 16.0, available: 2.0 }, &colors);
        assert_eq!(low.text_color, colors.bad);

        let fine = memory.render(MemoryStats { total: 16.0, available: 9.0 }, &colors);
        assert_eq!(fine.text_color, None);
    }
}
