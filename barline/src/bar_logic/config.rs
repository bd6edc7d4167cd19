use crate::bar_logic::layout::{BlockConfig, default_layout};
use clap::{ArgAction, Parser};
use lib_barline::{Color, ColorSet};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Palette overrides from the config file. Slots left out keep the default color.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct PaletteConfig {
    pub good: Option<Color>,
    pub bad: Option<Color>,
    pub warning: Option<Color>,
    pub background: Option<Color>,
}

impl PaletteConfig {
    /// Applies the overrides on top of `base`.
    pub fn over(&self, base: ColorSet) -> ColorSet {
        ColorSet {
            good: self.good.or(base.good),
            bad: self.bad.or(base.bad),
            warning: self.warning.or(base.warning),
            background: self.background.or(base.background),
        }
    }
}

#[derive(Parser, Deserialize, Serialize, Debug, Clone, Default)]
#[clap(about = "i3bar-compatible status line", version)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[clap(long, env = "BARLINE_CONFIG_PATH", help = "Path to the JSON configuration file.")]
    pub config_path: Option<PathBuf>,

    #[clap(long, env = "BARLINE_INTERVAL_MS", help = "Base tick period in milliseconds.")]
    pub interval_ms: Option<u64>,

    #[clap(long, env = "BARLINE_REFRESH_SIGNAL", help = "Signal number that forces a refresh (10 is SIGUSR1).")]
    pub refresh_signal: Option<i32>,

    #[clap(long, env = "BARLINE_CLICK_EVENTS", action = ArgAction::Set, help = "Read click events from stdin (true/false).")]
    pub click_events: Option<bool>,

    #[clap(long, env = "BARLINE_LOG_DIR", help = "Directory for log files.")]
    pub log_dir: Option<PathBuf>,

    #[clap(long, env = "BARLINE_LOG_LEVEL", help = "Logging level (trace, debug, info, warn, error).")]
    pub log_level: Option<String>,

    #[clap(skip)]
    pub palette: Option<PaletteConfig>,

    #[clap(skip)]
    pub blocks: Option<Vec<BlockConfig>>,
}

impl Config {
    // Merge two Config structs, where 'other' overrides 'self' for Some values
    fn merge(self, other: Config) -> Config {
        Config {
            config_path: other.config_path.or(self.config_path),
            interval_ms: other.interval_ms.or(self.interval_ms),
            refresh_signal: other.refresh_signal.or(self.refresh_signal),
            click_events: other.click_events.or(self.click_events),
            log_dir: other.log_dir.or(self.log_dir),
            log_level: other.log_level.or(self.log_level),
            palette: other.palette.or(self.palette),
            blocks: other.blocks.or(self.blocks),
        }
    }

    /// Built-in defaults.
    pub fn defaults() -> Config {
        let base = dirs::config_dir().map(|dir| dir.join("barline"));
        Config {
            config_path: base.as_ref().map(|dir| dir.join("config.json")),
            interval_ms: Some(1000),
            refresh_signal: Some(10),
            click_events: Some(true),
            log_dir: Some(
                base.map(|dir| dir.join("logs"))
                    .unwrap_or_else(|| PathBuf::from("./logs")),
            ),
            log_level: Some("info".to_string()),
            palette: Some(PaletteConfig::default()),
            blocks: Some(default_layout()),
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.unwrap_or(1000).max(1))
    }

    pub fn palette(&self) -> ColorSet {
        self.palette
            .as_ref()
            .map_or_else(ColorSet::default, |p| p.over(ColorSet::default()))
    }

    pub fn layout(&self) -> Vec<BlockConfig> {
        self.blocks.clone().unwrap_or_else(default_layout)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| PathBuf::from("./logs"))
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }
}

/// Reads a config file. A missing file is `Ok(None)`.
fn read_config_file(path: &Path) -> Result<Option<Config>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file {}: {}", path.display(), e))?;
    serde_json::from_str::<Config>(&raw)
        .map(Some)
        .map_err(|e| format!("Failed to parse config file {}: {}", path.display(), e))
}

/// Layers defaults, then the config file, then `cli` (flags and env vars).
///
/// Runs before logging is installed, so problems with the file are reported
/// on stderr and the defaults are kept.
pub fn load_config(cli: Config) -> Config {
    // 1. Load defaults
    let mut current_config = Config::defaults();

    // 2. Load from the config file, whose path may itself come from the CLI
    let config_file_path = cli.config_path.clone().or_else(|| current_config.config_path.clone());

    if let Some(path) = &config_file_path {
        match read_config_file(path) {
            Ok(Some(file_config)) => current_config = current_config.merge(file_config),
            Ok(None) => {}
            Err(message) => eprintln!("{}. Falling back to other sources.", message),
        }
    }

    // 3. Override with environment variables and CLI arguments
    current_config.merge(cli)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("barline").chain(args.iter().copied()))
            .expect("Arguments parse")
    }

    #[test]
    fn file_then_cli_override_defaults() {
        let dir = tempfile::tempdir().expect("Failed to create temporary directory");
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r##"{
                "intervalMs": 500,
                "logLevel": "debug",
                "palette": {"good": "#0f0"},
                "blocks": [{"type": "plaintext", "text": "hello"}]
            }"##,
        )
        .expect("Failed to write config");

        let config = load_config(cli(&[
            "--config-path",
            path.to_str().expect("UTF-8 path"),
            "--interval-ms",
            "250",
            "--click-events",
            "false",
        ]));

        assert_eq!(config.interval(), Duration::from_millis(250));
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.click_events, Some(false));
        assert_eq!(config.refresh_signal, Some(10));
        assert_eq!(
            config.layout(),
            vec![BlockConfig::PlainText {
                text: "hello".into()
            }]
        );

        let palette = config.palette();
        assert_eq!(palette.good, Some(Color::new(0, 0xff, 0)));
        assert_eq!(palette.bad, ColorSet::default().bad);
    }

    #[test]
    fn missing_or_broken_file_keeps_defaults() {
        let dir = tempfile::tempdir().expect("Failed to create temporary directory");

        let missing = dir.path().join("nope.json");
        let config = load_config(cli(&["--config-path", missing.to_str().expect("UTF-8 path")]));
        assert_eq!(config.interval(), Duration::from_secs(1));
        assert_eq!(config.layout(), default_layout());
        assert_eq!(config.palette(), ColorSet::default());

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").expect("Failed to write config");
        let config = load_config(cli(&["--config-path", broken.to_str().expect("UTF-8 path")]));
        assert_eq!(config.click_events, Some(true));
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn bad_palette_colors_fail_the_file() {
        assert!(serde_json::from_str::<Config>(r##"{"palette": {"bad": "#12"}}"##).is_err());
    }
}
