//! Collectibles and hazards the character can overlap.

use ember_common::Vec3;
use serde::{Deserialize, Serialize};

use crate::vitals::{DamageOutcome, VitalStats};

/// Damage an explosive deals unless configured otherwise.
pub const DEFAULT_EXPLOSIVE_DAMAGE: f32 = 15.0;

/// A consumable item lying in the level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Pickup {
    /// Adds coins.
    Coins {
        /// Coins granted
        amount: u32,
    },
    /// Restores health, clamped to the maximum.
    HealthPotion {
        /// Health restored
        amount: f32,
    },
}

impl Pickup {
    /// Apply the pickup to the character's stats.
    pub fn apply(self, vitals: &mut VitalStats) {
        match self {
            Self::Coins { amount } => vitals.add_coins(amount),
            Self::HealthPotion { amount } => vitals.heal(amount),
        }
    }
}

/// A hazard that damages on overlap with no attacker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Explosive {
    /// Damage dealt on overlap.
    pub damage: f32,
}

impl Default for Explosive {
    fn default() -> Self {
        Self {
            damage: DEFAULT_EXPLOSIVE_DAMAGE,
        }
    }
}

impl Explosive {
    /// Deal damage to the character's stats.
    pub fn detonate(self, vitals: &mut VitalStats) -> DamageOutcome {
        vitals.apply_damage(self.damage)
    }
}

/// Locations where coins were collected, in pickup order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PickupLog {
    locations: Vec<Vec3>,
}

impl PickupLog {
    /// Record a pickup location.
    pub fn record(&mut self, location: Vec3) {
        self.locations.push(location);
    }

    /// Recorded locations.
    #[must_use]
    pub fn locations(&self) -> &[Vec3] {
        &self.locations
    }

    /// Number of recorded pickups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Check if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}
