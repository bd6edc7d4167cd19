//! # Event Dispatcher
//!
//! Reads click events from the host one line at a time and routes each one to
//! every click-capable generator whose identity matches. The dispatcher never
//! touches the block cache; its only effect on the bar is raising the refresh
//! signal, at most once per event, when a handler asks for it.
//!
//! ## Input handling
//! - Each line is trimmed of stray commas and decoded (`ClickEvent::parse_line`).
//! - Lines that do not decode are dropped without complaint.
//! - End of input, or a read error, stops the dispatcher. The tick loop is unaffected.

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::core::event::ClickEvent;
use crate::core::generator::{BlockGenerator, Identity};
use crate::core::refresh::RefreshSignal;
use crate::core::registry::Registry;

struct Target {
    identity: Identity,
    generator: Arc<dyn BlockGenerator>,
}

/// # Event Dispatcher
///
/// A read-only snapshot of the click-capable registrations, taken when the
/// engine starts running.
pub struct EventDispatcher {
    targets: Vec<Target>,
    refresh: RefreshSignal,
}

impl EventDispatcher {
    /// Collects the click-capable registrations of `registry`, in display order.
    pub fn new(registry: &Registry, refresh: RefreshSignal) -> Self {
        let targets = registry
            .iter()
            .filter(|entry| entry.accepts_clicks())
            .map(|entry| Target {
                identity: entry.identity().clone(),
                generator: Arc::clone(entry.generator()),
            })
            .collect();

        Self { targets, refresh }
    }

    /// Number of click-capable generators.
    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// # Dispatch
    ///
    /// Invokes every matching handler with the same event. If any of them asks
    /// for a refresh, the refresh signal is raised once.
    ///
    /// # Returns
    /// Whether a refresh was requested.
    pub fn dispatch(&self, event: &ClickEvent) -> bool {
        let mut refresh = false;

        for target in self.targets.iter().filter(|t| t.identity.matches(event)) {
            if let Some(consumer) = target.generator.as_click_consumer() {
                refresh |= consumer.on_click(event);
            }
        }

        if refresh {
            self.refresh.request();
        }
        refresh
    }

    /// # Run
    ///
    /// Consumes `reader` until end of input. Handlers run on the blocking pool
    /// since they commonly shell out; events are still handled one at a time,
    /// in arrival order.
    pub async fn run<R>(self, reader: R)
    where
        R: AsyncBufRead + Unpin,
    {
        let dispatcher = Arc::new(self);
        let mut lines = reader.lines();

        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => {
                    log::info!("Click event input closed");
                    break;
                }
                Err(e) => {
                    log::error!("Failed to read click event input: {}", e);
                    break;
                }
            };

            log::debug!("Click input: {}", line);
            let Some(event) = ClickEvent::parse_line(&line) else {
                continue;
            };

            let worker = Arc::clone(&dispatcher);
            if let Err(e) = tokio::task::spawn_blocking(move || worker.dispatch(&event)).await {
                log::error!("Click handler panicked: {}", e);
            }
        }
    }
}
