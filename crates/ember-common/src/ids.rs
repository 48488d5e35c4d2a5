//! ID types for registry handles, factions, and levels.

use serde::{Deserialize, Serialize};

/// Non-owning, generation-checked reference into an externally owned registry.
///
/// A handle stays valid only while the slot it points at still holds the same
/// generation. Once the referenced entry is removed the slot's generation is
/// bumped and every outstanding handle to it stops resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityHandle {
    index: u32,
    generation: u32,
}

impl EntityHandle {
    /// Creates a handle from its raw parts.
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index inside the owning registry.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Generation the slot had when the handle was issued.
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl std::fmt::Display for EntityHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Allegiance tag carried by every detectable actor.
///
/// Resolved once when an actor is registered, so per-frame code never has to
/// inspect concrete actor types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Faction {
    /// Opponents the player can engage.
    Hostile,
    /// Friendly non-player actors.
    Ally,
    /// The player character.
    Player,
    /// Props and anything without allegiance.
    #[default]
    Neutral,
}

impl Faction {
    /// Whether an actor of this faction can become a combat target.
    #[must_use]
    pub const fn is_hostile(self) -> bool {
        matches!(self, Self::Hostile)
    }
}

/// Identifier of a loadable level (map name without any streaming prefix).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LevelId(String);

impl LevelId {
    /// Creates a level identifier.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty identifier never names a real level.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for LevelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LevelId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for LevelId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
