//! # Battery
//!
//! Reads charge and state from the kernel's power supply class
//! (`/sys/class/power_supply/<device>`).
//!
//! ## Coloring
//! - Below the warning threshold while discharging, the block alternates
//!   between a bad background and bad text on every generation.
//! - Below the ok threshold, the text uses the warning color.
//! - Charging above the full threshold shows good text; charging otherwise
//!   clears all colors.
//! - A full battery shows background-colored text on a warning background, and
//!   an unknown state uses warning text.
//!
//! A threshold of 0 disables its rule.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::core::block::Block;
use crate::core::color::ColorSet;
use crate::core::generator::{BlockGenerator, GenerationError, Identity};

/// Default location of power supply devices.
pub const POWER_SUPPLY_PATH: &str = "/sys/class/power_supply";

/// Charging state as reported by the `status` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryState {
    /// `Full`.
    Full,
    /// `Discharging`.
    Discharging,
    /// `Charging`.
    Charging,
    /// `Unknown`, `Not charging` or anything else.
    Unknown,
}

impl BatteryState {
    /// Maps the kernel's status string.
    pub fn parse(status: &str) -> Self {
        match status.trim() {
            "Full" => BatteryState::Full,
            "Discharging" => BatteryState::Discharging,
            "Charging" => BatteryState::Charging,
            _ => BatteryState::Unknown,
        }
    }

    /// The label shown in front of the percentage.
    pub fn label(self) -> &'static str {
        match self {
            BatteryState::Full => "FULL",
            BatteryState::Discharging => "BAT",
            BatteryState::Charging => "CHR",
            BatteryState::Unknown => "UNK",
        }
    }
}

/// Charge thresholds in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BatteryThresholds {
    /// Charging above this is shown as good.
    pub full: f32,
    /// Below this the text turns to the warning color.
    pub ok: f32,
    /// Below this the block flashes bad.
    pub warning: f32,
}

/// A battery monitor.
#[derive(Debug)]
pub struct Battery {
    device: String,
    thresholds: BatteryThresholds,
    use_design_max_energy: bool,
    base_path: PathBuf,
    flash_text: AtomicBool,
}

impl Battery {
    /// Block name.
    pub const NAME: &'static str = "battery";

    /// Monitors `device` (e.g. `BAT0`).
    pub fn new(device: impl Into<String>, thresholds: BatteryThresholds) -> Self {
        Self {
            device: device.into(),
            thresholds,
            use_design_max_energy: false,
            base_path: PathBuf::from(POWER_SUPPLY_PATH),
            flash_text: AtomicBool::new(false),
        }
    }

    /// Measures charge against the design capacity instead of the last full charge.
    pub fn with_design_max_energy(mut self, enabled: bool) -> Self {
        self.use_design_max_energy = enabled;
        self
    }

    /// Reads devices from another directory than `/sys/class/power_supply`.
    pub fn with_base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = path.into();
        self
    }

    fn device_path(&self) -> PathBuf {
        self.base_path.join(&self.device)
    }

    fn percentage(&self) -> Result<f32, GenerationError> {
        let dir = self.device_path();
        let max_file = if self.use_design_max_energy {
            "energy_full_design"
        } else {
            "energy_full"
        };

        let max = read_number(&dir.join(max_file))?;
        let now = read_number(&dir.join("energy_now"))?;
        if max == 0 {
            return Err(GenerationError::Parse(format!("{} is zero", max_file)));
        }
        Ok(now as f32 / max as f32 * 100.0)
    }

    fn state(&self) -> Result<BatteryState, GenerationError> {
        let status = fs::read_to_string(self.device_path().join("status"))?;
        Ok(BatteryState::parse(&status))
    }

    /// Builds the block for a reading. Flips the flash phase when alerting.
    pub fn render(&self, percentage: f32, state: BatteryState, colors: &ColorSet) -> Block {
        let t = self.thresholds;
        let mut block = Block::new(Self::NAME, format!("{} {:.1}%", state.label(), percentage))
            .with_instance(self.device.clone())
            .with_short_text(format!("{:.1}%", percentage));

        if t.warning != 0.0 && percentage < t.warning {
            let flash_text = self.flash_text.fetch_xor(true, Ordering::SeqCst);
            if flash_text || state == BatteryState::Charging {
                block.text_color = colors.bad;
            } else {
                block.background_color = colors.bad;
            }
        } else if t.ok != 0.0 && percentage < t.ok {
            block.text_color = colors.warning;
        }

        match state {
            BatteryState::Charging => {
                if t.full != 0.0 && percentage > t.full {
                    block.text_color = colors.good;
                } else {
                    block.text_color = None;
                    block.background_color = None;
                }
            }
            BatteryState::Full => {
                block.background_color = colors.warning;
                block.text_color = colors.background;
            }
            BatteryState::Unknown => block.text_color = colors.warning,
            BatteryState::Discharging => {}
        }

        block
    }
}

fn read_number(path: &Path) -> Result<u64, GenerationError> {
    let raw = fs::read_to_string(path)?;
    raw.trim()
        .parse()
        .map_err(|_| GenerationError::Parse(path.display().to_string()))
}

impl BlockGenerator for Battery {
    fn identity(&self) -> Identity {
        Identity::new(Self::NAME, self.device.clone())
    }

    fn generate(&self, colors: &ColorSet) -> Result<Option<Block>, GenerationError> {
        let percentage = self.percentage()?;
        let state = self.state()?;
        Ok(Some(self.render(percentage, state, colors)))
    }

    fn cadence(&self) -> Option<u32> {
        Some(5)
    }
}
