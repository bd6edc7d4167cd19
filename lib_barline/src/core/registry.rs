//! # Registry
//!
//! The ordered table of registered generators. Each entry caches what was
//! learned about its generator at registration time (identity, cadence, click
//! capability) together with the most recent block it produced.
//!
//! Registration prepends: every generator is placed in front of those already
//! registered, so a single batch ends up in reverse order and a later batch
//! lands in front of an earlier one. Callers that want their list shown
//! left-to-right feed it in reverse.

use std::sync::Arc;

use crate::core::block::Block;
use crate::core::generator::{BlockGenerator, Cadence, Identity};

/// One registered generator and its cached state.
pub struct Registration {
    generator: Arc<dyn BlockGenerator>,
    identity: Identity,
    cadence: Cadence,
    accepts_clicks: bool,
    generated: bool,
    cached: Option<Block>,
}

impl Registration {
    /// Wraps a generator, querying its optional capabilities once.
    pub fn new(generator: Arc<dyn BlockGenerator>) -> Self {
        let identity = generator.identity();
        let cadence = Cadence::from(generator.cadence());
        let accepts_clicks = generator.as_click_consumer().is_some();

        Self {
            generator,
            identity,
            cadence,
            accepts_clicks,
            generated: false,
            cached: None,
        }
    }

    /// The generator behind this entry.
    pub fn generator(&self) -> &Arc<dyn BlockGenerator> {
        &self.generator
    }

    /// The identity reported at registration.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// The cadence declared at registration.
    pub fn cadence(&self) -> Cadence {
        self.cadence
    }

    /// Whether the generator consumes click events.
    pub fn accepts_clicks(&self) -> bool {
        self.accepts_clicks
    }

    /// The most recently stored block, if any.
    pub fn cached(&self) -> Option<&Block> {
        self.cached.as_ref()
    }

    #[cfg(test)]
    fn has_generated(&self) -> bool {
        self.generated
    }

    /// # Is Due
    ///
    /// Decides whether this entry regenerates on the given tick.
    /// - `Once` entries are due until they have generated, and never again,
    ///   regardless of `force`.
    /// - `Always` entries are always due.
    /// - `Every(n)` entries are due when forced or when `tick` is a multiple of `n`.
    pub fn is_due(&self, tick: u64, force: bool) -> bool {
        match self.cadence {
            Cadence::Once => !self.generated,
            Cadence::Always => true,
            Cadence::Every(n) => force || tick % u64::from(n.get()) == 0,
        }
    }

    /// Stores a freshly produced block. Returns true if it differs from the
    /// previously cached one.
    pub fn store(&mut self, block: Block) -> bool {
        self.generated = true;
        if self.cached.as_ref() == Some(&block) {
            return false;
        }
        self.cached = Some(block);
        true
    }
}

/// # Registry
///
/// Write-once table of registrations, in display order.
#[derive(Default)]
pub struct Registry {
    entries: Vec<Registration>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a batch of generators, prepending each in turn.
    pub fn register<I>(&mut self, batch: I)
    where
        I: IntoIterator<Item = Arc<dyn BlockGenerator>>,
    {
        for generator in batch {
            let registration = Registration::new(generator);
            log::debug!(
                "Registered generator {:?}/{:?} ({:?}, clicks: {})",
                registration.identity.name,
                registration.identity.instance,
                registration.cadence,
                registration.accepts_clicks
            );
            self.entries.insert(0, registration);
        }
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registrations in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Registration> {
        self.entries.iter()
    }

    /// Mutable registrations in display order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Registration> {
        self.entries.iter_mut()
    }

    /// Cached blocks in display order, `None` where nothing was stored yet.
    pub fn blocks(&self) -> impl Iterator<Item = Option<&Block>> {
        self.entries.iter().map(Registration::cached)
    }

    /// # Tick Modulus
    ///
    /// The least common multiple of every `Every(n)` cadence, so that wrapping
    /// the tick counter at this value keeps each recurrence exact. Falls back to
    /// `u64::MAX` if the multiple would overflow.
    pub fn tick_modulus(&self) -> u64 {
        self.entries
            .iter()
            .filter_map(|entry| match entry.cadence {
                Cadence::Every(n) => Some(u64::from(n.get())),
                _ => None,
            })
            .try_fold(1u64, |acc, n| (acc / gcd(acc, n)).checked_mul(n))
            .unwrap_or(u64::MAX)
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}
