//! Error types for gameplay operations that can degrade.

use ember_common::EntityHandle;
use thiserror::Error;

/// Errors that can occur in the character core.
///
/// None of these abort a frame: callers fall back to being unarmed or idle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameplayError {
    /// Weapon name has no entry in the catalog.
    #[error("no weapon named '{0}' in the catalog")]
    InvalidWeaponId(String),

    /// Handle no longer resolves in the actor registry.
    #[error("actor {0} is no longer valid")]
    TargetInvalidated(EntityHandle),
}

/// Result type for gameplay operations.
pub type GameplayResult<T> = Result<T, GameplayError>;
