//! # Disk Space
//!
//! Available space on one mount point, from the output of `df`.

use crate::core::block::Block;
use crate::core::color::ColorSet;
use crate::core::generator::{BlockGenerator, GenerationError, Identity};
use crate::providers::command::run_command;

/// Finds the available space, in GB, of `mount` in `df` output (1K blocks).
pub fn parse_available(df: &str, mount: &str) -> Result<f32, GenerationError> {
    for line in df.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 6 || fields[5] != mount {
            continue;
        }
        let kb: f64 = fields[3]
            .parse()
            .map_err(|_| GenerationError::Parse(format!("df available {:?}", fields[3])))?;
        return Ok((kb / 1000.0 / 1000.0) as f32);
    }
    Err(GenerationError::Unavailable(format!("mount {}", mount)))
}

/// A free-space monitor. Thresholds are in GB.
#[derive(Debug, Clone)]
pub struct Disk {
    mount: String,
    ok_threshold: f32,
    warning_threshold: f32,
}

impl Disk {
    /// Block name.
    pub const NAME: &'static str = "disk";

    /// Watches `mount`; an empty string means `/`.
    pub fn new(mount: impl Into<String>, ok_threshold: f32, warning_threshold: f32) -> Self {
        let mount = mount.into();
        Self {
            mount: if mount.is_empty() { "/".to_string() } else { mount },
            ok_threshold,
            warning_threshold,
        }
    }

    /// Builds the block for an available amount.
    pub fn render(&self, available: f32, colors: &ColorSet) -> Block {
        let mut block = Block::new(Self::NAME, format!("Disk avail: {:.1}GB", available))
            .with_instance(self.mount.clone())
            .with_short_text(format!("D: {:.1}GB", available));

        if self.warning_threshold != 0.0 && available < self.warning_threshold {
            block.text_color = colors.bad;
        } else if self.ok_threshold != 0.0 && available < self.ok_threshold {
            block.text_color = colors.warning;
        }
        block
    }
}

impl BlockGenerator for Disk {
    fn identity(&self) -> Identity {
        Identity::new(Self::NAME, self.mount.clone())
    }

    fn generate(&self, colors: &ColorSet) -> Result<Option<Block>, GenerationError> {
        let df = run_command("df", &[])?;
        let available = parse_available(&df, &self.mount)?;
        Ok(Some(self.render(available, colors)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DF: &str = "\
Filesystem     1K-blocks      Used Available Use% Mounted on
tmpfs            1630000      2000   1628000   1% /run
/dev/nvme0n1p2 490000000 300000000 120300000  72% /
/dev/nvme0n1p1    523248     6220    517028   2% /boot/efi
weird line
";

    #[test]
    fn finds_the_mount() {
        assert!((parse_available(DF, "/").unwrap() - 120.3).abs() < 1e-3);
        assert!((parse_available(DF, "/boot/efi").unwrap() - 0.517).abs() < 1e-3);
    }

    #[test]
    fn unknown_mount_is_unavailable() {
        assert!(matches!(
            parse_available(DF, "/home"),
            Err(GenerationError::Unavailable(_))
        ));
    }

    #[test]
    fn thresholds_and_default_mount() {
        let disk = Disk::new("", 30.0, 10.0);
        assert_eq!(disk.identity(), Identity::new("disk", "/"));

        let colors = ColorSet::default();
        let block = disk.render(120.3, &colors);
        assert_eq!(block.full_text, "Disk avail: 120.3GB");
        assert_eq!(block.short_text, "D: 120.3GB");
        assert_eq!(block.text_color, None);
        assert_eq!(disk.render(20.0, &colors).text_color, colors.warning);
        assert_eq!(disk.render(5.0, &colors).text_color, colors.bad);
    }
}
