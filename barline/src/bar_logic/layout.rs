use lib_barline::BlockGenerator;
use lib_barline::providers::{
    AudioPlayer, Battery, BatteryThresholds, Cpu, DateTime, Disk, IpAddress, LaunchProgram,
    Memory, PlainText, PulseaudioVolume, Timer, Wifi,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

fn default_mount() -> String {
    "/".to_string()
}

fn default_max_label_len() -> usize {
    20
}

fn default_ticker_steps() -> usize {
    3
}

/// One entry of the `blocks` list in the config file, tagged by `type`.
/// Thresholds left out (or set to 0) disable their coloring.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum BlockConfig {
    #[serde(rename = "plaintext")]
    PlainText { text: String },

    #[serde(rename = "datetime")]
    DateTime {},

    #[serde(rename = "timer")]
    Timer {
        #[serde(default)]
        short_label: bool,
    },

    #[serde(rename = "battery")]
    Battery {
        device: String,
        #[serde(default)]
        full_threshold: f32,
        #[serde(default)]
        ok_threshold: f32,
        #[serde(default)]
        warning_threshold: f32,
        #[serde(default)]
        use_design_max_energy: bool,
    },

    #[serde(rename = "cpu")]
    Cpu {
        #[serde(default)]
        ok_threshold: f32,
        #[serde(default)]
        warning_threshold: f32,
    },

    #[serde(rename = "memory")]
    Memory {
        #[serde(default)]
        ok_threshold: f32,
        #[serde(default)]
        warning_threshold: f32,
    },

    #[serde(rename = "disk")]
    Disk {
        #[serde(default = "default_mount")]
        mount: String,
        #[serde(default)]
        ok_threshold: f32,
        #[serde(default)]
        warning_threshold: f32,
    },

    #[serde(rename = "ipAddr")]
    IpAddress { adapter: String },

    #[serde(rename = "wifi")]
    Wifi {
        adapter: String,
        #[serde(default)]
        ok_threshold: f32,
    },

    #[serde(rename = "pulseaudioVolume")]
    PulseaudioVolume {
        #[serde(default)]
        sink: String,
    },

    #[serde(rename = "launchProgram")]
    LaunchProgram { text: String, executable: String },

    #[serde(rename = "audioPlayer")]
    AudioPlayer {
        #[serde(default = "default_max_label_len")]
        max_label_len: usize,
        #[serde(default)]
        show_text_on_pause: bool,
        #[serde(default = "default_ticker_steps")]
        ticker_steps: usize,
    },
}

impl BlockConfig {
    /// Instantiates the provider this entry describes.
    pub fn build(&self) -> Arc<dyn BlockGenerator> {
        match self {
            BlockConfig::PlainText { text } => Arc::new(PlainText::new(text.clone())),
            BlockConfig::DateTime {} => Arc::new(DateTime::new()),
            BlockConfig::Timer { short_label } => Arc::new(Timer::new(*short_label)),
            BlockConfig::Battery {
                device,
                full_threshold,
                ok_threshold,
                warning_threshold,
                use_design_max_energy,
            } => Arc::new(
                Battery::new(
                    device.clone(),
                    BatteryThresholds {
                        full: *full_threshold,
                        ok: *ok_threshold,
                        warning: *warning_threshold,
                    },
                )
                .with_design_max_energy(*use_design_max_energy),
            ),
            BlockConfig::Cpu {
                ok_threshold,
                warning_threshold,
            } => Arc::new(Cpu::new(*ok_threshold, *warning_threshold)),
            BlockConfig::Memory {
                ok_threshold,
                warning_threshold,
            } => Arc::new(Memory::new(*ok_threshold, *warning_threshold)),
            BlockConfig::Disk {
                mount,
                ok_threshold,
                warning_threshold,
            } => Arc::new(Disk::new(mount.clone(), *ok_threshold, *warning_threshold)),
            BlockConfig::IpAddress { adapter } => Arc::new(IpAddress::new(adapter.clone())),
            BlockConfig::Wifi {
                adapter,
                ok_threshold,
            } => Arc::new(Wifi::new(adapter.clone(), *ok_threshold)),
            BlockConfig::PulseaudioVolume { sink } => Arc::new(PulseaudioVolume::new(sink.clone())),
            BlockConfig::LaunchProgram { text, executable } => {
                Arc::new(LaunchProgram::new(text.clone(), executable.clone()))
            }
            BlockConfig::AudioPlayer {
                max_label_len,
                show_text_on_pause,
                ticker_steps,
            } => Arc::new(
                AudioPlayer::new(*max_label_len)
                    .with_text_on_pause(*show_text_on_pause)
                    .with_ticker_steps(*ticker_steps),
            ),
        }
    }
}

/// The bar used when the config file has no `blocks`, left to right.
pub fn default_layout() -> Vec<BlockConfig> {
    let adapter = "wlp0s20f3".to_string();
    vec![
        BlockConfig::IpAddress {
            adapter: adapter.clone(),
        },
        BlockConfig::Wifi {
            adapter,
            ok_threshold: 75.0,
        },
        BlockConfig::Battery {
            device: "BAT0".to_string(),
            full_threshold: 80.0,
            ok_threshold: 30.0,
            warning_threshold: 20.0,
            use_design_max_energy: false,
        },
        BlockConfig::Disk {
            mount: default_mount(),
            ok_threshold: 30.0,
            warning_threshold: 10.0,
        },
        BlockConfig::Cpu {
            ok_threshold: 20.0,
            warning_threshold: 50.0,
        },
        BlockConfig::Memory {
            ok_threshold: 7.0,
            warning_threshold: 5.0,
        },
        BlockConfig::PulseaudioVolume {
            sink: String::new(),
        },
        BlockConfig::DateTime {},
    ]
}

/// Builds a layout as a registration batch. Registration prepends, so the
/// batch is the layout reversed and the bar ends up reading left to right.
pub fn registration_batch(layout: &[BlockConfig]) -> Vec<Arc<dyn BlockGenerator>> {
    layout.iter().rev().map(BlockConfig::build).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_barline::Registry;

    #[test]
    fn entries_deserialize_by_type() {
        let raw = r#"[
            {"type": "battery", "device": "BAT1", "warningThreshold": 15},
            {"type": "disk"},
            {"type": "plaintext", "text": "hi"},
            {"type": "audioPlayer"},
            {"type": "datetime"},
            {"type": "audioPlayer", "maxLabelLen": 12, "tickerSteps": 1}
        ]"#;
        let blocks: Vec<BlockConfig> = serde_json::from_str(raw).expect("Layout parses");

        assert_eq!(
            blocks[0],
            BlockConfig::Battery {
                device: "BAT1".into(),
                full_threshold: 0.0,
                ok_threshold: 0.0,
                warning_threshold: 15.0,
                use_design_max_energy: false,
            }
        );
        assert_eq!(
            blocks[1],
            BlockConfig::Disk {
                mount: "/".into(),
                ok_threshold: 0.0,
                warning_threshold: 0.0,
            }
        );
        assert_eq!(
            blocks[3],
            BlockConfig::AudioPlayer {
                max_label_len: 20,
                show_text_on_pause: false,
                ticker_steps: 3,
            }
        );
        assert_eq!(blocks[4], BlockConfig::DateTime {});
        assert_eq!(
            blocks[5],
            BlockConfig::AudioPlayer {
                max_label_len: 12,
                show_text_on_pause: false,
                ticker_steps: 1,
            }
        );
    }

    #[test]
    fn unknown_types_are_rejected() {
        assert!(serde_json::from_str::<BlockConfig>(r#"{"type": "gpu"}"#).is_err());
        assert!(serde_json::from_str::<BlockConfig>(r#"{"type": "wifi"}"#).is_err());
    }

    #[test]
    fn registered_layout_reads_left_to_right() {
        let layout = vec![
            BlockConfig::PlainText { text: "a".into() },
            BlockConfig::Timer { short_label: true },
            BlockConfig::Disk {
                mount: "/home".into(),
                ok_threshold: 0.0,
                warning_threshold: 0.0,
            },
        ];

        let mut registry = Registry::new();
        registry.register(registration_batch(&layout));

        let names: Vec<(String, String)> = registry
            .iter()
            .map(|r| (r.identity().name.clone(), r.identity().instance.clone()))
            .collect();
        assert_eq!(
            names,
            [
                ("plaintext".to_string(), String::new()),
                ("timer".to_string(), String::new()),
                ("disk".to_string(), "/home".to_string()),
            ]
        );
    }

    #[test]
    fn default_layout_matches_the_stock_bar() {
        let layout = default_layout();
        assert_eq!(layout.len(), 8);
        let batch = registration_batch(&layout);
        let first = batch.last().expect("Layout is not empty").identity();
        assert_eq!((first.name.as_str(), first.instance.as_str()), ("ipAddr", "wlp0s20f3"));
        assert_eq!(batch[0].identity().name, "datetime");
    }
}
