//! # Core Engine Module
//!
//! The status-line engine: it owns an ordered set of block generators, decides
//! on every tick which of them regenerate, streams the result to the host in
//! the i3bar protocol and routes click events back to their generators.
//!
//! ## Core Components:
//!
//! - **`color`** / **`block`** / **`event`**: the wire data model. Colors and
//!   palettes, the `Block` segment, and inbound `ClickEvent`s.
//!
//! - **`generator`**: the contract a data source implements. Producing a block
//!   is mandatory; declaring a cadence and consuming clicks are optional
//!   capabilities queried once at registration.
//!
//! - **`registry`**: the ordered registration table with each generator's
//!   cached block.
//!
//! - **`scheduler`**: the tick step. Eligibility by cadence and override,
//!   placeholders for failures, change detection.
//!
//! - **`encoder`**: the header line and the never-closed array of status lines.
//!
//! - **`refresh`** / **`dispatcher`**: the override signal, and the click event
//!   reader that raises it.
//!
//! - **`engine`**: `StatusBar`, which runs all of the above.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

/// RGB colors and the semantic palette.
pub mod color;
/// The renderable status segment.
pub mod block;
/// Click events read from the host.
pub mod event;
/// The contract between the engine and its data sources.
pub mod generator;
/// Ordered registration table and per-generator cache.
pub mod registry;
/// The per-tick regeneration step.
pub mod scheduler;
/// i3bar protocol output.
pub mod encoder;
/// Single-slot refresh override.
pub mod refresh;
/// Routes click events to generators.
pub mod dispatcher;
/// The run loop.
pub mod engine;

// --- Public API Re-exports ---
pub use block::{Align, Block, Markup};
pub use color::{Color, ColorError, ColorSet};
pub use dispatcher::EventDispatcher;
pub use encoder::ProtocolEncoder;
pub use engine::{BarError, BarOptions, MIN_INTERVAL, StatusBar};
pub use event::{ClickEvent, MouseButton};
pub use generator::{BlockGenerator, Cadence, ClickEventConsumer, GenerationError, Identity};
pub use refresh::RefreshSignal;
#[cfg(unix)]
pub use refresh::forward_signal;
pub use registry::{Registration, Registry};
pub use scheduler::Scheduler;
