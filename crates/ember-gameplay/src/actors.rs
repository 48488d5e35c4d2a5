//! Registry of actors the character can perceive and fight.
//!
//! Actors are owned here, not by the character. The character only keeps
//! [`EntityHandle`]s, which stop resolving as soon as the actor is removed.

use ember_common::{EntityHandle, Faction, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{GameplayError, GameplayResult};

/// An actor in the level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Display name.
    pub name: String,
    /// Allegiance tag.
    pub faction: Faction,
    /// World position.
    pub position: Vec3,
    /// Whether the actor's own AI believes it has something to attack.
    pub has_valid_target: bool,
}

impl Actor {
    /// Create a hostile actor at a position.
    #[must_use]
    pub fn hostile(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            name: name.into(),
            faction: Faction::Hostile,
            position,
            has_valid_target: false,
        }
    }

    /// Create an actor with an explicit faction.
    #[must_use]
    pub fn with_faction(name: impl Into<String>, faction: Faction, position: Vec3) -> Self {
        Self {
            name: name.into(),
            faction,
            position,
            has_valid_target: false,
        }
    }
}

/// A detection result handed to target acquisition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Registry handle.
    pub handle: EntityHandle,
    /// Position at detection time.
    pub position: Vec3,
    /// Allegiance tag.
    pub faction: Faction,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    actor: Option<Actor>,
}

/// Generational arena of actors.
#[derive(Debug, Clone, Default)]
pub struct ActorRegistry {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl ActorRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an actor and return its handle.
    pub fn insert(&mut self, actor: Actor) -> EntityHandle {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.actor = Some(actor);
            return EntityHandle::new(index, slot.generation);
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            actor: Some(actor),
        });
        EntityHandle::new(index, 0)
    }

    /// Remove an actor. Every handle to it becomes invalid.
    pub fn remove(&mut self, handle: EntityHandle) -> Option<Actor> {
        let slot = self.slot_mut(handle)?;
        let actor = slot.actor.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index());
        Some(actor)
    }

    /// Resolve a handle.
    pub fn resolve(&self, handle: EntityHandle) -> GameplayResult<&Actor> {
        self.slots
            .get(handle.index() as usize)
            .filter(|slot| slot.generation == handle.generation())
            .and_then(|slot| slot.actor.as_ref())
            .ok_or(GameplayError::TargetInvalidated(handle))
    }

    /// Resolve a handle mutably.
    pub fn resolve_mut(&mut self, handle: EntityHandle) -> GameplayResult<&mut Actor> {
        self.slot_mut(handle)
            .and_then(|slot| slot.actor.as_mut())
            .ok_or(GameplayError::TargetInvalidated(handle))
    }

    /// Check if a handle still resolves.
    #[must_use]
    pub fn contains(&self, handle: EntityHandle) -> bool {
        self.resolve(handle).is_ok()
    }

    /// Number of live actors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.actor.is_some()).count()
    }

    /// Check if no actors are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tell an actor its target is gone.
    pub fn invalidate_target_of(&mut self, handle: EntityHandle) -> GameplayResult<()> {
        self.resolve_mut(handle)?.has_valid_target = false;
        Ok(())
    }

    /// Actors inside a sphere, in insertion (slot) order.
    ///
    /// Stands in for the overlap query a detection volume would run.
    #[must_use]
    pub fn overlapping(&self, center: Vec3, radius: f32) -> Vec<Candidate> {
        self.iter()
            .filter(|(_, actor)| actor.position.distance(center) <= radius)
            .map(|(handle, actor)| Candidate {
                handle,
                position: actor.position,
                faction: actor.faction,
            })
            .collect()
    }

    /// Iterate live actors with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (EntityHandle, &Actor)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.actor
                .as_ref()
                .map(|actor| (EntityHandle::new(index as u32, slot.generation), actor))
        })
    }

    fn slot_mut(&mut self, handle: EntityHandle) -> Option<&mut Slot> {
        self.slots
            .get_mut(handle.index() as usize)
            .filter(|slot| slot.generation == handle.generation())
    }
}
