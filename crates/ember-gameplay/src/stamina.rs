//! Stamina state machine.
//!
//! Sprinting drains stamina at a fixed rate. Dropping to the sprint threshold
//! moves the character into `BelowMinimum`, draining to zero exhausts it, and
//! an exhausted character has to recover back up to the threshold before the
//! machine returns to `Normal`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::vitals::VitalStats;

/// Stamina condition of the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StaminaStatus {
    /// Above the sprint threshold.
    #[default]
    Normal,
    /// At or below the sprint threshold but not empty.
    BelowMinimum,
    /// Drained to zero while sprinting.
    Exhausted,
    /// Recovering from exhaustion; sprinting is locked out.
    ExhaustedRecovering,
}

impl StaminaStatus {
    /// Check if this status allows sprinting.
    #[must_use]
    pub const fn permits_sprint(self) -> bool {
        matches!(self, Self::Normal | Self::BelowMinimum)
    }
}

/// Tuning for stamina drain and recovery.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaminaConfig {
    /// Stamina drained (or regenerated) per second.
    pub drain_rate: f32,
    /// Threshold that separates `Normal` from `BelowMinimum`.
    pub min_sprint_stamina: f32,
}

impl Default for StaminaConfig {
    fn default() -> Self {
        Self {
            drain_rate: 25.0,
            min_sprint_stamina: 50.0,
        }
    }
}

/// Output of one stamina tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaminaTick {
    /// Status after the tick.
    pub status: StaminaStatus,
    /// Status before the tick, if it changed.
    pub previous: Option<StaminaStatus>,
    /// Sprint held, moving, and the post-tick status allows sprinting.
    pub sprint_capable: bool,
}

/// Four-state stamina machine, re-evaluated once per tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaminaStateMachine {
    status: StaminaStatus,
    config: StaminaConfig,
}

impl StaminaStateMachine {
    /// Create a machine in `Normal`.
    #[must_use]
    pub fn new(config: StaminaConfig) -> Self {
        Self {
            status: StaminaStatus::Normal,
            config,
        }
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> StaminaStatus {
        self.status
    }

    /// Active tuning.
    #[must_use]
    pub fn config(&self) -> &StaminaConfig {
        &self.config
    }

    /// Advance one tick, draining or regenerating `vitals` stamina.
    pub fn tick(
        &mut self,
        vitals: &mut VitalStats,
        sprint_held: bool,
        moving: bool,
        dt: f32,
    ) -> StaminaTick {
        let delta = self.config.drain_rate * dt;
        let min = self.config.min_sprint_stamina;
        let stamina = vitals.stamina();
        let before = self.status;

        self.status = match (self.status, sprint_held) {
            (StaminaStatus::Normal, true) => {
                vitals.drain_stamina(delta);
                if stamina - delta <= min {
                    StaminaStatus::BelowMinimum
                } else {
                    StaminaStatus::Normal
                }
            },
            (StaminaStatus::Normal, false) => {
                vitals.regen_stamina(delta);
                StaminaStatus::Normal
            },
            (StaminaStatus::BelowMinimum, true) => {
                if stamina - delta <= 0.0 {
                    vitals.deplete_stamina();
                    StaminaStatus::Exhausted
                } else {
                    vitals.drain_stamina(delta);
                    StaminaStatus::BelowMinimum
                }
            },
            (StaminaStatus::BelowMinimum, false) => {
                vitals.regen_stamina(delta);
                if stamina + delta >= min {
                    StaminaStatus::Normal
                } else {
                    StaminaStatus::BelowMinimum
                }
            },
            (StaminaStatus::Exhausted, true) => {
                vitals.deplete_stamina();
                StaminaStatus::Exhausted
            },
            (StaminaStatus::Exhausted, false) => {
                vitals.regen_stamina(delta);
                StaminaStatus::ExhaustedRecovering
            },
            (StaminaStatus::ExhaustedRecovering, _) => {
                vitals.regen_stamina(delta);
                if stamina + delta >= min {
                    StaminaStatus::Normal
                } else {
                    StaminaStatus::ExhaustedRecovering
                }
            },
        };

        let previous = (before != self.status).then_some(before);
        if let Some(from) = previous {
            debug!(?from, to = ?self.status, stamina = vitals.stamina(), "stamina status changed");
        }

        StaminaTick {
            status: self.status,
            previous,
            sprint_capable: sprint_held && moving && self.status.permits_sprint(),
        }
    }
}
