//! # Status Bar Engine
//!
//! Ties the scheduler, the protocol encoder and the event dispatcher together.
//! The engine is built once, generators are registered, and `run` then owns it
//! for the rest of the process lifetime.
//!
//! ## Run loop
//! - One tick runs immediately and is forced, so the bar is never blank.
//! - Afterwards a tick runs on every period of the base timer, and an extra
//!   forced tick runs whenever the refresh signal fires.
//! - A tick that changed any block emits the whole bar.
//! - Generators read files and run commands, so each tick runs on the blocking
//!   pool and never holds up the dispatcher or the timers.
//! - If an input stream is given, the dispatcher runs alongside on its own task.
//!
//! The only ways out of `run` are a failure to write to the output sink and a
//! panicking tick.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use crate::core::color::ColorSet;
use crate::core::dispatcher::EventDispatcher;
use crate::core::encoder::ProtocolEncoder;
use crate::core::generator::BlockGenerator;
use crate::core::refresh::RefreshSignal;
use crate::core::scheduler::Scheduler;

/// Fatal engine errors.
#[derive(Debug, Error)]
pub enum BarError {
    /// The output sink rejected a write or flush; the host is gone.
    #[error("failed to write to the status output: {0}")]
    Io(#[from] std::io::Error),

    /// A status line could not be serialized.
    #[error("failed to encode the status line: {0}")]
    Encode(#[from] serde_json::Error),

    /// A tick panicked or was cancelled; the block cache went with it.
    #[error("tick task failed: {0}")]
    Tick(#[from] tokio::task::JoinError),
}

/// Shortest base tick period accepted.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Engine settings fixed at construction.
#[derive(Debug, Clone)]
pub struct BarOptions {
    /// Base tick period. Anything below `MIN_INTERVAL` is raised to it.
    pub interval: Duration,
    /// Palette handed to every generator.
    pub palette: ColorSet,
}

impl Default for BarOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            palette: ColorSet::default(),
        }
    }
}

/// # Status Bar
///
/// The engine, writing to `W`.
pub struct StatusBar<W> {
    scheduler: Scheduler,
    writer: W,
    interval: Duration,
    refresh: RefreshSignal,
}

impl<W> StatusBar<W>
where
    W: AsyncWrite + Unpin,
{
    /// Creates an engine writing to `writer`. `refresh` is the override signal;
    /// clones of it may be handed to anything that wants to force a tick.
    pub fn new(writer: W, options: BarOptions, refresh: RefreshSignal) -> Self {
        Self {
            scheduler: Scheduler::new(options.palette),
            writer,
            interval: options.interval.max(MIN_INTERVAL),
            refresh,
        }
    }

    /// Registers a batch of generators. Each generator is placed in front of
    /// those already registered, so a batch is displayed in reverse.
    pub fn register<I>(&mut self, batch: I)
    where
        I: IntoIterator<Item = Arc<dyn BlockGenerator>>,
    {
        self.scheduler.register(batch);
    }

    /// The override signal this engine listens to.
    pub fn refresh_signal(&self) -> RefreshSignal {
        self.refresh.clone()
    }

    /// # Run
    ///
    /// Drives the bar until the output sink fails. When `input` is given, click
    /// events are announced in the header and read from it.
    ///
    /// # Returns
    /// Only ever returns the fatal error that stopped the loop.
    pub async fn run<R>(self, input: Option<R>) -> Result<(), BarError>
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let Self {
            mut scheduler,
            writer,
            interval,
            refresh,
        } = self;

        let mut encoder = ProtocolEncoder::new(writer, input.is_some());

        let _input_task = input.map(|reader| {
            let dispatcher = EventDispatcher::new(scheduler.registry(), refresh.clone());
            log::info!(
                "Listening for click events ({} click-capable blocks)",
                dispatcher.target_count()
            );
            tokio::spawn(dispatcher.run(reader))
        });

        log::info!(
            "Status bar running with {} blocks every {:?}",
            scheduler.registry().len(),
            interval
        );

        let mut ticker = interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut forced = true;
        loop {
            let (returned, changed) = tokio::task::spawn_blocking(move || {
                let changed = scheduler.tick(forced);
                (scheduler, changed)
            })
            .await?;
            scheduler = returned;

            if changed {
                encoder.emit(&scheduler.snapshot()).await?;
            }

            forced = tokio::select! {
                _ = ticker.tick() => false,
                _ = refresh.requested() => true,
            };
        }
    }
}
