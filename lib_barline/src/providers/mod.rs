//! # Providers
//!
//! Ready-made block generators for common system facts. Each one is a plain
//! `BlockGenerator`; the engine knows nothing about them beyond that contract.
//!
//! Threshold parameters follow one convention throughout: a threshold of `0`
//! disables the coloring rule it controls.

/// Shelling out to external programs.
pub mod command;

pub mod audio_player;
pub mod battery;
pub mod cpu;
pub mod datetime;
pub mod disk;
pub mod ip_address;
pub mod launch_program;
pub mod memory;
pub mod plain_text;
pub mod pulseaudio_volume;
pub mod timer;
pub mod wifi;

pub use audio_player::AudioPlayer;
pub use battery::{Battery, BatteryState, BatteryThresholds};
pub use command::run_command;
pub use cpu::Cpu;
pub use datetime::DateTime;
pub use disk::Disk;
pub use ip_address::IpAddress;
pub use launch_program::LaunchProgram;
pub use memory::Memory;
pub use plain_text::PlainText;
pub use pulseaudio_volume::PulseaudioVolume;
pub use timer::Timer;
pub use wifi::Wifi;
