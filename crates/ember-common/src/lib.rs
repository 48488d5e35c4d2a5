//! # Ember Common
//!
//! Common types, utilities, and shared abstractions for the Ember character core.
//!
//! This crate provides foundational types used across all Ember crates:
//! - ID types (generation-checked handles, factions, level identifiers)
//! - Transform math (positions, rotators, yaw interpolation)
//! - Version information for persisted data
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod ids;
pub mod math;
pub mod version;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::math::*;
    pub use crate::version::*;
}

pub use prelude::*;
