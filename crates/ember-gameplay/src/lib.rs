//! # Ember Gameplay
//!
//! Character simulation core for Ember.
//!
//! This crate provides the per-frame character model and its persistence:
//! - Vital stats (health, stamina, coins) with clamped mutation
//! - Stamina and movement state machines
//! - Melee targeting, orientation and attack chaining
//! - Weapons, pickups, pause menu and input intents
//! - Save snapshots, slot stores and level transitions
//! - Event bus for the presentation layer

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod actors;
pub mod character;
pub mod combat;
pub mod config;
pub mod error;
pub mod events;
pub mod hud;
pub mod input;
pub mod movement;
pub mod pause;
pub mod persistence;
pub mod pickups;
pub mod save;
pub mod stamina;
pub mod vitals;
pub mod weapons;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::actors::*;
    pub use crate::character::*;
    pub use crate::combat::*;
    pub use crate::config::*;
    pub use crate::error::*;
    pub use crate::events::*;
    pub use crate::hud::*;
    pub use crate::input::*;
    pub use crate::movement::*;
    pub use crate::pause::*;
    pub use crate::persistence::*;
    pub use crate::pickups::*;
    pub use crate::save::*;
    pub use crate::stamina::*;
    pub use crate::vitals::*;
    pub use crate::weapons::*;
}

pub use prelude::*;
