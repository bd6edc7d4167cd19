//! # CPU Load
//!
//! Busy percentage over the interval between two reads of `/proc/stat`.

use std::fs;
use std::sync::{Mutex, PoisonError};

use crate::core::block::Block;
use crate::core::color::ColorSet;
use crate::core::generator::{BlockGenerator, GenerationError, Identity};

const PROC_STAT: &str = "/proc/stat";

/// Aggregate tick counters from the `cpu` line of `/proc/stat`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuSample {
    /// Idle ticks (the fourth counter).
    pub idle: u64,
    /// Sum of all counters.
    pub total: u64,
}

impl CpuSample {
    /// Parses the aggregate `cpu` line out of `/proc/stat` contents.
    pub fn parse(stat: &str) -> Result<Self, GenerationError> {
        let line = stat
            .lines()
            .find(|line| line.split_whitespace().next() == Some("cpu"))
            .ok_or_else(|| GenerationError::Parse("/proc/stat: no cpu line".into()))?;

        let mut sample = CpuSample::default();
        for (i, field) in line.split_whitespace().skip(1).enumerate() {
            let value: u64 = field
                .parse()
                .map_err(|_| GenerationError::Parse(format!("/proc/stat field {:?}", field)))?;
            sample.total += value;
            if i == 3 {
                sample.idle = value;
            }
        }
        Ok(sample)
    }

    /// Busy percentage between `previous` and `self`. Zero when no time passed.
    pub fn busy_since(&self, previous: &CpuSample) -> f32 {
        let total = self.total.saturating_sub(previous.total);
        let idle = self.idle.saturating_sub(previous.idle);
        if total == 0 {
            return 0.0;
        }
        (100.0 * (total - idle.min(total)) as f64 / total as f64) as f32
    }
}

/// A CPU load monitor.
#[derive(Debug)]
pub struct Cpu {
    ok_threshold: f32,
    warning_threshold: f32,
    previous: Mutex<CpuSample>,
}

impl Cpu {
    /// Block name.
    pub const NAME: &'static str = "cpu";

    /// Creates the monitor and takes a baseline sample.
    pub fn new(ok_threshold: f32, warning_threshold: f32) -> Self {
        let baseline = sample().unwrap_or_else(|e| {
            log::warn!("Could not take a baseline CPU sample: {}", e);
            CpuSample::default()
        });
        Self {
            ok_threshold,
            warning_threshold,
            previous: Mutex::new(baseline),
        }
    }

    /// Builds the block for a busy percentage.
    pub fn render(&self, busy: f32, colors: &ColorSet) -> Block {
        let mut block = Block::new(Self::NAME, format!("CPU: {:.1}%", busy))
            .with_short_text(format!("C: {:.1}%", busy));

        if self.warning_threshold != 0.0 && busy > self.warning_threshold {
            block.text_color = colors.bad;
        } else if self.ok_threshold != 0.0 && busy > self.ok_threshold {
            block.text_color = colors.warning;
        }
        block
    }
}

fn sample() -> Result<CpuSample, GenerationError> {
    CpuSample::parse(&fs::read_to_string(PROC_STAT)?)
}

impl BlockGenerator for Cpu {
    fn identity(&self) -> Identity {
        Identity::new(Self::NAME, "")
    }

    fn generate(&self, colors: &ColorSet) -> Result<Option<Block>, GenerationError> {
        let current = sample()?;
        let mut previous = self.previous.lock().unwrap_or_else(PoisonError::into_inner);
        let busy = current.busy_since(&previous);
        *previous = current;
        Ok(Some(self.render(busy, colors)))
    }
}
