//! # Generator Contract
//!
//! The boundary between the engine and the data sources it drives. A generator
//! is an opaque object that can:
//!
//! - identify itself with a `(name, instance)` pair,
//! - produce a `Block` for the current tick (or nothing, or fail),
//! - optionally declare a refresh cadence in ticks,
//! - optionally consume click events routed back from the host.
//!
//! The optional capabilities are queried once, when the generator is
//! registered, and cached on the registration. Methods take `&self`: a
//! generator that keeps state between calls owns its own interior mutability,
//! since the tick loop and the event dispatcher may reach it from different
//! tasks.

use std::num::NonZeroU32;

use thiserror::Error;

use crate::core::block::Block;
use crate::core::color::ColorSet;
use crate::core::event::ClickEvent;

/// Errors a generator may return from `generate`. The engine recovers from all
/// of them by showing an error placeholder for that tick.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// An I/O error occurred, typically while reading a file under `/sys` or `/proc`.
    #[error("I/O error occurred: {0}")]
    Io(#[from] std::io::Error),

    /// Command output was not valid UTF-8.
    #[error("UTF-8 error occurred: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// An external command exited unsuccessfully.
    #[error("command {program:?} failed with non-zero exit status ({status}): {stderr}")]
    Command {
        /// The program that was run.
        program: String,
        /// Its exit status, or -1 when killed by a signal.
        status: i32,
        /// Trimmed stderr output.
        stderr: String,
    },

    /// An external command could not be started.
    #[error("failed to execute the command: {0}")]
    Execution(String),

    /// Source data was present but malformed.
    #[error("could not parse {0}")]
    Parse(String),

    /// The requested device, mount or sink does not exist.
    #[error("{0} is unavailable")]
    Unavailable(String),
}

/// # Identity
///
/// The `(name, instance)` pair a generator stamps on its blocks and that the
/// host echoes back in click events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Identity {
    /// Generator name. An empty name matches events regardless of instance.
    pub name: String,
    /// Generator instance.
    pub instance: String,
}

impl Identity {
    /// Creates an identity.
    pub fn new(name: impl Into<String>, instance: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instance: instance.into(),
        }
    }

    /// Returns true if a click event addressed to `(name, instance)` belongs to
    /// this identity: names must be equal, and instances must be equal unless
    /// the name is empty.
    pub fn matches(&self, event: &ClickEvent) -> bool {
        event.name == self.name && (self.name.is_empty() || event.instance == self.instance)
    }
}

/// How often a registration is eligible to regenerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// Every tick.
    Always,
    /// Exactly once, on the first tick, then frozen.
    Once,
    /// Every `n` ticks of the tick counter.
    Every(NonZeroU32),
}

impl From<Option<u32>> for Cadence {
    fn from(declared: Option<u32>) -> Self {
        match declared {
            None => Cadence::Always,
            Some(n) => NonZeroU32::new(n).map_or(Cadence::Once, Cadence::Every),
        }
    }
}

/// A consumer of click events.
pub trait ClickEventConsumer: Send + Sync {
    /// Called when a click event with a matching name and instance arrives.
    /// Returning `true` requests an immediate refresh of the whole bar.
    ///
    /// The event is shared with every other matching consumer and must be
    /// treated as read-only.
    fn on_click(&self, event: &ClickEvent) -> bool;
}

/// # Block Generator
///
/// A data source that produces one block per eligible tick.
pub trait BlockGenerator: Send + Sync {
    /// The `(name, instance)` pair used to correlate click events.
    fn identity(&self) -> Identity;

    /// Produces this tick's block. `Ok(None)` means the generator has nothing to show.
    fn generate(&self, colors: &ColorSet) -> Result<Option<Block>, GenerationError>;

    /// Refresh cadence in ticks: `Some(0)` generates once, `Some(n)` every `n`
    /// ticks, `None` on every tick.
    fn cadence(&self) -> Option<u32> {
        None
    }

    /// The click capability, for generators that accept click events.
    fn as_click_consumer(&self) -> Option<&dyn ClickEventConsumer> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(name: &str, instance: &str) -> ClickEvent {
        ClickEvent {
            name: name.into(),
            instance: instance.into(),
            ..Default::default()
        }
    }

    #[test]
    fn named_identity_requires_name_and_instance() {
        let id = Identity::new("battery", "BAT0");
        assert!(id.matches(&event("battery", "BAT0")));
        assert!(!id.matches(&event("battery", "BAT1")));
        assert!(!id.matches(&event("battery", "")));
        assert!(!id.matches(&event("cpu", "BAT0")));
    }

    #[test]
    fn empty_name_is_an_instance_wildcard() {
        let id = Identity::new("", "anything");
        assert!(id.matches(&event("", "")));
        assert!(id.matches(&event("", "other")));
        assert!(!id.matches(&event("battery", "anything")));
    }

    #[test]
    fn cadence_from_declaration() {
        assert_eq!(Cadence::from(None), Cadence::Always);
        assert_eq!(Cadence::from(Some(0)), Cadence::Once);
        assert_eq!(
            Cadence::from(Some(5)),
            Cadence::Every(NonZeroU32::new(5).unwrap())
        );
    }
}
