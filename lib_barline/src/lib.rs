//! # lib_barline
//!
//! Building blocks for an i3bar / swaybar status line: the engine in [`core`]
//! and, behind the `providers` feature, a set of ready-made block generators
//! for common system facts.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod core;
#[cfg(feature = "providers")]
pub mod providers;

pub use crate::core::*;
