//! Saving, loading, and carrying the character across level changes.
//!
//! A level transition runs in two phases. The character is saved and the
//! coordinator waits in [`TransitionPhase::AwaitingLevelChange`]; once the
//! loader has switched levels the snapshot is read back and applied without
//! touching the transform. A failed switch leaves the phase pending so the
//! transition can be resumed.

use ahash::AHashSet;
use ember_common::LevelId;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::character::{Character, DeathPhase, RestoreOutcome};
use crate::events::CharacterEvent;
use crate::save::{SaveError, SaveSnapshot, SlotStore, DEFAULT_SLOT};

// ============================================================================
// Level Loading
// ============================================================================

/// Errors reported by a level loader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    /// No level with that name.
    #[error("unknown level: {0}")]
    UnknownLevel(LevelId),

    /// The loader refused or failed the switch.
    #[error("level change failed: {0}")]
    Failed(String),
}

/// Switches the active level.
pub trait LevelLoader {
    /// Level currently loaded.
    fn current_level(&self) -> LevelId;

    /// Switch to `level`. Synchronous: on `Ok` the new level is current.
    fn request_level_change(&mut self, level: &LevelId) -> Result<(), LevelError>;
}

/// Loader over a fixed set of known levels.
#[derive(Debug, Clone)]
pub struct LevelRoster {
    current: LevelId,
    known: AHashSet<LevelId>,
}

impl LevelRoster {
    /// Start in `initial`, which is always known.
    #[must_use]
    pub fn new(initial: impl Into<LevelId>) -> Self {
        let current = initial.into();
        let mut known = AHashSet::new();
        known.insert(current.clone());
        Self { current, known }
    }

    /// Add a reachable level.
    #[must_use]
    pub fn with_level(mut self, level: impl Into<LevelId>) -> Self {
        self.known.insert(level.into());
        self
    }

    /// Check if a level is reachable.
    #[must_use]
    pub fn knows(&self, level: &LevelId) -> bool {
        self.known.contains(level)
    }
}

impl LevelLoader for LevelRoster {
    fn current_level(&self) -> LevelId {
        self.current.clone()
    }

    fn request_level_change(&mut self, level: &LevelId) -> Result<(), LevelError> {
        if !self.knows(level) {
            return Err(LevelError::UnknownLevel(level.clone()));
        }
        info!(from = %self.current, to = %level, "level changed");
        self.current = level.clone();
        Ok(())
    }
}

// ============================================================================
// Transitions
// ============================================================================

/// Errors that abort a transition step.
#[derive(Debug, Error)]
pub enum TransitionError {
    /// Saving or loading the slot failed.
    #[error("save slot error: {0}")]
    Save(#[from] SaveError),

    /// The loader could not switch levels.
    #[error("level change error: {0}")]
    LevelChange(#[from] LevelError),
}

/// Result type for transitions.
pub type TransitionResult<T> = Result<T, TransitionError>;

/// Where a level transition stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TransitionPhase {
    /// No transition in flight.
    #[default]
    Idle,
    /// Saved; waiting for the loader to switch to `target`.
    AwaitingLevelChange {
        /// Destination level
        target: LevelId,
    },
}

/// Result of a save request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Slot overwritten.
    Written,
    /// Nothing written; the character has no health left.
    Skipped,
}

/// Result of a transition request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// Nothing to do: empty target, already there, or the character is dead.
    Skipped,
    /// Level switched and the character restored.
    Completed(RestoreOutcome),
}

/// Coordinates snapshots, the slot store and the level loader.
#[derive(Debug)]
pub struct PersistenceCoordinator<S: SlotStore> {
    store: S,
    slot: String,
    phase: TransitionPhase,
}

impl<S: SlotStore> PersistenceCoordinator<S> {
    /// Coordinate over `store`, using the default slot.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            slot: DEFAULT_SLOT.to_string(),
            phase: TransitionPhase::Idle,
        }
    }

    /// Use a different slot for transitions and continue.
    #[must_use]
    pub fn with_slot(mut self, slot: impl Into<String>) -> Self {
        self.slot = slot.into();
        self
    }

    /// Slot used for transitions and continue.
    #[must_use]
    pub fn slot(&self) -> &str {
        &self.slot
    }

    /// Backing store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Backing store, mutably.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Transition phase.
    #[must_use]
    pub fn phase(&self) -> &TransitionPhase {
        &self.phase
    }

    /// Write the character to `slot`, replacing what was there.
    ///
    /// A character with no health is never saved; the slot keeps its old
    /// contents.
    pub fn save_snapshot(
        &mut self,
        character: &Character,
        level: &LevelId,
        slot: &str,
    ) -> Result<SaveOutcome, SaveError> {
        if character.vitals().health() <= 0.0 {
            debug!(slot, "not saving a character with no health");
            return Ok(SaveOutcome::Skipped);
        }

        self.store
            .save_snapshot(slot, &character.snapshot(level))?;
        info!(slot, level = %level, "snapshot saved");
        Ok(SaveOutcome::Written)
    }

    /// Read a slot.
    pub fn load_snapshot(&self, slot: &str) -> Result<SaveSnapshot, SaveError> {
        self.store.load_snapshot(slot)
    }

    /// Apply a snapshot to the character.
    ///
    /// An unknown weapon leaves the character unarmed; that is reported in the
    /// outcome and restoration still completes.
    pub fn restore_character(
        &self,
        character: &mut Character,
        snapshot: &SaveSnapshot,
        apply_transform: bool,
    ) -> RestoreOutcome {
        debug!(slot = %self.slot, apply_transform, "restoring character");
        character.restore(snapshot, apply_transform)
    }

    /// Save, switch to `target`, and restore stats in the new level.
    pub fn transition_level(
        &mut self,
        character: &mut Character,
        loader: &mut dyn LevelLoader,
        target: &LevelId,
    ) -> TransitionResult<TransitionOutcome> {
        let current = loader.current_level();
        if target.is_empty() || *target == current || character.is_dead() {
            debug!(destination = %target, current = %current, "level transition skipped");
            return Ok(TransitionOutcome::Skipped);
        }

        let slot = self.slot.clone();
        self.save_snapshot(character, &current, &slot)?;
        self.phase = TransitionPhase::AwaitingLevelChange {
            target: target.clone(),
        };
        self.finish_transition(character, loader, target)
    }

    /// Retry a transition whose level change failed, without saving again.
    pub fn resume_transition(
        &mut self,
        character: &mut Character,
        loader: &mut dyn LevelLoader,
    ) -> TransitionResult<TransitionOutcome> {
        let TransitionPhase::AwaitingLevelChange { target } = self.phase.clone() else {
            return Ok(TransitionOutcome::Skipped);
        };
        self.finish_transition(character, loader, &target)
    }

    fn finish_transition(
        &mut self,
        character: &mut Character,
        loader: &mut dyn LevelLoader,
        target: &LevelId,
    ) -> TransitionResult<TransitionOutcome> {
        if loader.current_level() != *target {
            character
                .events()
                .publish(CharacterEvent::LevelChangeRequested {
                    level: target.clone(),
                });
            if let Err(err) = loader.request_level_change(target) {
                warn!(%err, destination = %target, "level change failed, transition pending");
                return Err(err.into());
            }
        }

        let snapshot = self.store.load_snapshot(&self.slot)?;
        let outcome = self.restore_character(character, &snapshot, false);
        self.phase = TransitionPhase::Idle;
        info!(level = %target, "level transition complete");
        Ok(TransitionOutcome::Completed(outcome))
    }

    /// Restore from the default slot at startup, keeping the spawn transform.
    ///
    /// Returns `None` when nothing was ever saved.
    pub fn restore_on_startup(
        &self,
        character: &mut Character,
    ) -> Result<Option<RestoreOutcome>, SaveError> {
        match self.store.load_snapshot(&self.slot) {
            Ok(snapshot) => Ok(Some(self.restore_character(character, &snapshot, false))),
            Err(SaveError::NotFound(_)) => {
                info!(slot = %self.slot, "no save found, fresh start");
                Ok(None)
            },
            Err(err) => Err(err),
        }
    }

    /// Load the default slot, switch to its level, and restore everything
    /// including the transform.
    pub fn continue_game(
        &mut self,
        character: &mut Character,
        loader: &mut dyn LevelLoader,
    ) -> TransitionResult<RestoreOutcome> {
        if character.death_phase() == DeathPhase::Dying {
            debug!("continue deferred until the death sequence finishes");
            return Ok(RestoreOutcome::Deferred);
        }

        let snapshot = self.store.load_snapshot(&self.slot)?;
        let level = LevelId::new(snapshot.level.clone());
        if !level.is_empty() && level != loader.current_level() {
            character
                .events()
                .publish(CharacterEvent::LevelChangeRequested {
                    level: level.clone(),
                });
            loader.request_level_change(&level)?;
        }

        Ok(self.restore_character(character, &snapshot, true))
    }
}
