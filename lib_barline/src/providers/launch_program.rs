//! A static label that starts a program when left-clicked.

use std::process::{Command, Stdio};
use std::thread;

use crate::core::block::Block;
use crate::core::color::ColorSet;
use crate::core::event::{ClickEvent, MouseButton};
use crate::core::generator::{BlockGenerator, ClickEventConsumer, GenerationError, Identity};

/// Launcher block.
#[derive(Debug, Clone)]
pub struct LaunchProgram {
    text: String,
    executable: String,
}

impl LaunchProgram {
    /// Block name.
    pub const NAME: &'static str = "launchProgram";

    /// Shows `text`; a left click runs `executable`.
    pub fn new(text: impl Into<String>, executable: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            executable: executable.into(),
        }
    }

    /// Starts the program without waiting for it. Its stdout never reaches the
    /// status stream.
    pub fn launch(&self) -> std::io::Result<()> {
        let mut child = Command::new(&self.executable)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .spawn()?;

        let executable = self.executable.clone();
        thread::spawn(move || match child.wait() {
            Ok(status) => log::debug!("{} exited with {}", executable, status),
            Err(e) => log::warn!("Failed to wait for {}: {}", executable, e),
        });
        Ok(())
    }
}

impl BlockGenerator for LaunchProgram {
    fn identity(&self) -> Identity {
        Identity::new(Self::NAME, "")
    }

    fn generate(&self, _: &ColorSet) -> Result<Option<Block>, GenerationError> {
        Ok(Some(Block::new(Self::NAME, self.text.clone())))
    }

    fn cadence(&self) -> Option<u32> {
        Some(0)
    }

    fn as_click_consumer(&self) -> Option<&dyn ClickEventConsumer> {
        Some(self)
    }
}

impl ClickEventConsumer for LaunchProgram {
    fn on_click(&self, event: &ClickEvent) -> bool {
        if event.button == MouseButton::Left {
            if let Err(e) = self.launch() {
                log::error!("Could not start {}: {}", self.executable, e);
            }
        }
        false
    }
}
