//! # WiFi
//!
//! Network name, band and link quality of a wireless adapter, scraped from
//! `iwconfig`.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::block::Block;
use crate::core::color::ColorSet;
use crate::core::generator::{BlockGenerator, GenerationError, Identity};
use crate::providers::command::run_command;

static ESSID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"ESSID:(?:"(.+)"|off/any)"#).expect("valid regex"));
static FREQUENCY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Frequency:(\d(?:\.\d+)? [a-zA-Z]Hz)").expect("valid regex"));
static QUALITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Link Quality=(\d+)/(\d+)").expect("valid regex"));

/// What `iwconfig` reports for one adapter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WifiStatus {
    /// Network name, `None` when not associated.
    pub ssid: Option<String>,
    /// Band, e.g. `5.18GHz`.
    pub frequency: String,
    /// Link quality in percent.
    pub quality: f32,
}

/// Extracts the section of `iwconfig` output describing `adapter`.
pub fn parse_iwconfig(output: &str, adapter: &str) -> WifiStatus {
    let mut status = WifiStatus::default();

    for section in output.split("\n\n").filter(|s| s.starts_with(adapter)) {
        if let Some(caps) = ESSID_RE.captures(section) {
            status.ssid = caps.get(1).map(|m| m.as_str().to_string());
        }
        if let Some(caps) = FREQUENCY_RE.captures(section) {
            status.frequency = caps[1].replace(' ', "");
        }
        if let Some(caps) = QUALITY_RE.captures(section) {
            let num: f32 = caps[1].parse().unwrap_or(0.0);
            let denom: f32 = caps[2].parse().unwrap_or(0.0);
            if denom > 0.0 {
                status.quality = num * 100.0 / denom;
            }
        }
    }

    status
}

/// A wireless connection monitor.
#[derive(Debug, Clone)]
pub struct Wifi {
    adapter: String,
    ok_threshold: f32,
}

impl Wifi {
    /// Block name.
    pub const NAME: &'static str = "wifi";

    /// Watches `adapter`; link quality below `ok_threshold` percent is shown as a warning.
    pub fn new(adapter: impl Into<String>, ok_threshold: f32) -> Self {
        Self {
            adapter: adapter.into(),
            ok_threshold,
        }
    }

    /// Builds the block for a status.
    pub fn render(&self, status: &WifiStatus, colors: &ColorSet) -> Block {
        let block = Block::new(Self::NAME, "").with_instance(self.adapter.clone());

        let Some(ssid) = &status.ssid else {
            return Block {
                full_text: format!("{} not connected", self.adapter),
                short_text: "not connected".to_string(),
                text_color: colors.bad,
                ..block
            };
        };

        let weak = self.ok_threshold != 0.0 && status.quality < self.ok_threshold;
        Block {
            full_text: format!("{} ({}) {:.0}%", ssid, status.frequency, status.quality),
            text_color: if weak { colors.warning } else { colors.good },
            ..block
        }
    }
}

impl BlockGenerator for Wifi {
    fn identity(&self) -> Identity {
        Identity::new(Self::NAME, self.adapter.clone())
    }

    fn generate(&self, colors: &ColorSet) -> Result<Option<Block>, GenerationError> {
        let output = run_command("iwconfig", &[])?;
        Ok(Some(self.render(&parse_iwconfig(&output, &self.adapter), colors)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IWCONFIG: &str = r#"lo        no wireless extensions.

wlp0s20f3  IEEE 802.11  ESSID:"Home Network"
          Mode:Managed  Frequency:5.18 GHz  Access Point: 00:11:22:33:44:55
          Bit Rate=866.7 Mb/s   Tx-Power=22 dBm
          Link Quality=56/70  Signal level=-54 dBm

enp3s0    no wireless extensions."#;

    #[test]
    fn parses_connected_adapter() {
        let status = parse_iwconfig(IWCONFIG, "wlp0s20f3");
        assert_eq!(status.ssid.as_deref(), Some("Home Network"));
        assert_eq!(status.frequency, "5.18GHz");
        assert_eq!(status.quality, 80.0);
    }

    #[test]
    fn disconnected_adapter_has_no_ssid() {
        let output = "wlan0     IEEE 802.11  ESSID:off/any\n          Mode:Managed";
        assert_eq!(parse_iwconfig(output, "wlan0").ssid, None);
        assert_eq!(parse_iwconfig(IWCONFIG, "wlan9"), WifiStatus::default());
    }

    #[test]
    fn quality_below_ok_is_a_warning() {
        let wifi = Wifi::new("wlp0s20f3", 75.0);
        let colors = ColorSet::default();

        let mut status = parse_iwconfig(IWCONFIG, "wlp0s20f3");
        let strong = wifi.render(&status, &colors);
        assert_eq!(strong.full_text, "Home Network (5.18GHz) 80%");
        assert_eq!(strong.text_color, colors.good);

        status.quality = 50.0;
        assert_eq!(wifi.render(&status, &colors).text_color, colors.warning);

        let down = wifi.render(&WifiStatus::default(), &colors);
        assert_eq!(down.full_text, "wlp0s20f3 not connected");
        assert_eq!(down.text_color, colors.bad);
    }
}
