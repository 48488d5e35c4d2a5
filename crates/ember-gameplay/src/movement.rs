//! Locomotion mode derived from stamina and movement intent.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Locomotion mode of the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MovementStatus {
    /// Running at normal speed (or standing still).
    #[default]
    Normal,
    /// Sprinting.
    Sprinting,
    /// Dead. Terminal for per-tick updates.
    Dead,
}

impl MovementStatus {
    /// Max walk speed for this status.
    #[must_use]
    pub fn max_walk_speed(self, config: &MovementConfig) -> f32 {
        match self {
            Self::Sprinting => config.sprinting_speed,
            Self::Normal | Self::Dead => config.running_speed,
        }
    }

    /// Check if this is the dead state.
    #[must_use]
    pub const fn is_dead(self) -> bool {
        matches!(self, Self::Dead)
    }
}

/// Locomotion speeds in units per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementConfig {
    /// Speed outside of a sprint.
    pub running_speed: f32,
    /// Speed while sprinting.
    pub sprinting_speed: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            running_speed: 650.0,
            sprinting_speed: 1150.0,
        }
    }
}

/// Three-state movement machine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovementStateMachine {
    status: MovementStatus,
    config: MovementConfig,
}

impl MovementStateMachine {
    /// Create a machine in `Normal`.
    #[must_use]
    pub fn new(config: MovementConfig) -> Self {
        Self {
            status: MovementStatus::Normal,
            config,
        }
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> MovementStatus {
        self.status
    }

    /// Check if dead.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.status.is_dead()
    }

    /// Current maximum walk speed.
    #[must_use]
    pub fn max_walk_speed(&self) -> f32 {
        self.status.max_walk_speed(&self.config)
    }

    /// Re-derive the status for this tick.
    ///
    /// `sprint_capable` is the stamina machine's verdict: sprint held, moving,
    /// and stamina permits it. Returns the previous status if it changed.
    /// Ignored entirely once dead.
    pub fn update(&mut self, sprint_capable: bool) -> Option<MovementStatus> {
        if self.is_dead() {
            return None;
        }

        let next = if sprint_capable {
            MovementStatus::Sprinting
        } else {
            MovementStatus::Normal
        };

        if next == self.status {
            return None;
        }

        let previous = self.status;
        self.status = next;
        debug!(from = ?previous, to = ?next, speed = self.max_walk_speed(), "movement status changed");
        Some(previous)
    }

    /// Enter the terminal `Dead` state.
    pub fn die(&mut self) {
        if !self.is_dead() {
            info!("movement locked: character died");
        }
        self.status = MovementStatus::Dead;
    }

    /// Back to `Normal`, including out of `Dead`.
    ///
    /// Only restoring a snapshot may call this; ticks never leave `Dead`.
    pub fn reset(&mut self) {
        self.status = MovementStatus::Normal;
    }
}
