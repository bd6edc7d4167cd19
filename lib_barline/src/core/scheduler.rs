//! # Scheduler
//!
//! Owns the registry and the tick counter. One call to `Scheduler::tick` is one
//! discrete time step: every due registration regenerates, failures and empty
//! results are replaced by placeholders, and the return value says whether
//! anything visible changed (and therefore whether the bar must be re-emitted).
//!
//! ## Eligibility
//! - The very first tick is always forced.
//! - An override forces every registration except `Once` entries that have
//!   already generated.
//! - Otherwise `Every(n)` entries are due when `tick % n == 0`, and `Always`
//!   entries on every tick.

use std::sync::Arc;

use crate::core::block::Block;
use crate::core::color::{Color, ColorSet};
use crate::core::generator::BlockGenerator;
use crate::core::registry::{Registration, Registry};

/// Text shown in place of a block whose generator failed.
pub const ERROR_TEXT: &str = "ERROR";

/// Text shown in place of a block whose generator returned nothing.
pub const MISSING_TEXT: &str = "MISSING";

/// # Scheduler
///
/// Single writer of the block cache and the tick counter.
pub struct Scheduler {
    registry: Registry,
    palette: ColorSet,
    tick: u64,
    modulus: u64,
    started: bool,
}

impl Scheduler {
    /// Creates a scheduler that hands `palette` to every generation call.
    pub fn new(palette: ColorSet) -> Self {
        Self {
            registry: Registry::new(),
            palette,
            tick: 0,
            modulus: 1,
            started: false,
        }
    }

    /// Registers a batch of generators (see `Registry::register` for ordering).
    pub fn register<I>(&mut self, batch: I)
    where
        I: IntoIterator<Item = Arc<dyn BlockGenerator>>,
    {
        self.registry.register(batch);
        self.modulus = self.registry.tick_modulus();
    }

    /// The registration table.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The palette handed to generators.
    pub fn palette(&self) -> &ColorSet {
        &self.palette
    }

    #[cfg(test)]
    fn current_tick(&self) -> u64 {
        self.tick
    }

    /// # Tick
    ///
    /// Runs one time step. `refresh` is the override request.
    ///
    /// # Returns
    /// `true` if at least one cached block changed and the bar must be emitted.
    pub fn tick(&mut self, refresh: bool) -> bool {
        let force = refresh || !self.started;
        self.started = true;

        let tick = self.tick;
        let palette = &self.palette;
        let mut changed = false;

        for entry in self.registry.iter_mut() {
            if !entry.is_due(tick, force) {
                continue;
            }
            let block = generate(entry, palette);
            changed |= entry.store(block);
        }

        // tick < modulus, so the increment cannot overflow
        self.tick = (self.tick + 1) % self.modulus;

        changed
    }

    /// The cached blocks in display order. Entries that have never produced a
    /// block are rendered as empty blocks so the array length always matches
    /// the registry.
    pub fn snapshot(&self) -> Vec<Block> {
        self.registry
            .blocks()
            .map(|block| block.cloned().unwrap_or_default())
            .collect()
    }
}

fn generate(entry: &Registration, palette: &ColorSet) -> Block {
    let identity = entry.identity();

    match entry.generator().generate(palette) {
        Ok(Some(block)) => block,
        Ok(None) => {
            log::warn!(
                "Generator {:?}/{:?} returned no block",
                identity.name,
                identity.instance
            );
            placeholder(entry, MISSING_TEXT, palette.warning)
        }
        Err(e) => {
            log::error!(
                "Generator {:?}/{:?} failed: {}",
                identity.name,
                identity.instance,
                e
            );
            placeholder(entry, ERROR_TEXT, palette.bad)
        }
    }
}

fn placeholder(entry: &Registration, text: &str, color: Option<Color>) -> Block {
    let identity = entry.identity();
    Block::new(identity.name.clone(), text)
        .with_instance(identity.instance.clone())
        .with_text_color(color)
}
