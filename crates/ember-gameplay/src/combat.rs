//! Melee targeting and attack sequencing.
//!
//! This module provides:
//! - Nearest-hostile target acquisition from a detection set
//! - Yaw-only orientation toward the target during an attack
//! - Attack start/end with combo chaining while the attack input is held

use std::fmt;
use std::sync::Arc;

use ember_common::{interp_angle, look_at_yaw, EntityHandle, Rotator, Vec3};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::actors::{ActorRegistry, Candidate};
use crate::hud::Hud;

// ============================================================================
// Attack Variants
// ============================================================================

/// Which attack clip section the animation layer should play.
///
/// Purely presentational: every variant deals the same damage with the same
/// timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttackVariant(u8);

impl AttackVariant {
    /// Create a variant from its zero-based index.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Zero-based index.
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Montage section name, e.g. `Attack_1` for index 0.
    #[must_use]
    pub fn section_name(self) -> String {
        format!("Attack_{}", u16::from(self.0) + 1)
    }
}

/// Outcome of an attack request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackResult {
    /// Attack started with the given variant.
    Started(AttackVariant),
    /// An attack is already in progress.
    AlreadyAttacking,
    /// Character is dead.
    CannotAttack,
    /// Attack ended with no follow-up queued.
    Finished,
}

impl AttackResult {
    /// Variant if the attack started.
    #[must_use]
    pub const fn variant(self) -> Option<AttackVariant> {
        match self {
            Self::Started(variant) => Some(variant),
            Self::AlreadyAttacking | Self::CannotAttack | Self::Finished => None,
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Melee tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombatConfig {
    /// Interpolation speed when turning to face the target.
    pub interp_speed: f32,
    /// Number of attack variants to choose from.
    pub attack_variants: u8,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            interp_speed: 15.0,
            attack_variants: 2,
        }
    }
}

// ============================================================================
// Combat Controller
// ============================================================================

/// Per-character melee state.
pub struct CombatController {
    config: CombatConfig,
    hud: Arc<dyn Hud>,
    target: Option<EntityHandle>,
    target_location: Option<Vec3>,
    attacking: bool,
    attack_held: bool,
    interp_to_enemy: bool,
    last_variant: Option<AttackVariant>,
    rng: fastrand::Rng,
}

impl fmt::Debug for CombatController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombatController")
            .field("config", &self.config)
            .field("target", &self.target)
            .field("attacking", &self.attacking)
            .field("attack_held", &self.attack_held)
            .field("interp_to_enemy", &self.interp_to_enemy)
            .finish_non_exhaustive()
    }
}

impl CombatController {
    /// Create a controller that reports target changes to `hud`.
    #[must_use]
    pub fn new(config: CombatConfig, hud: Arc<dyn Hud>) -> Self {
        Self {
            config,
            hud,
            target: None,
            target_location: None,
            attacking: false,
            attack_held: false,
            interp_to_enemy: false,
            last_variant: None,
            rng: fastrand::Rng::new(),
        }
    }

    /// Use a fixed seed for variant selection.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = fastrand::Rng::with_seed(seed);
        self
    }

    /// Current combat target.
    #[must_use]
    pub fn target(&self) -> Option<EntityHandle> {
        self.target
    }

    /// Last known location of the target.
    #[must_use]
    pub fn target_location(&self) -> Option<Vec3> {
        self.target_location
    }

    /// Check if an attack is in progress.
    #[must_use]
    pub fn is_attacking(&self) -> bool {
        self.attacking
    }

    /// Check if the attack input is held.
    #[must_use]
    pub fn attack_held(&self) -> bool {
        self.attack_held
    }

    /// Latch or release the attack input.
    pub fn set_attack_held(&mut self, held: bool) {
        self.attack_held = held;
    }

    /// Check if the character is turning toward the target.
    #[must_use]
    pub fn interp_to_enemy(&self) -> bool {
        self.interp_to_enemy
    }

    /// Variant chosen by the most recent attack.
    #[must_use]
    pub fn last_variant(&self) -> Option<AttackVariant> {
        self.last_variant
    }

    /// Pick the nearest hostile candidate as the combat target.
    ///
    /// Non-hostile candidates are ignored. Ties go to the earliest candidate.
    /// With nothing hostile in range the target is cleared and the target
    /// health bar hidden.
    pub fn acquire_target(&mut self, origin: Vec3, candidates: &[Candidate]) -> Option<EntityHandle> {
        let mut closest: Option<(&Candidate, f32)> = None;
        for candidate in candidates.iter().filter(|c| c.faction.is_hostile()) {
            let distance = candidate.position.distance(origin);
            if closest.map_or(true, |(_, best)| distance < best) {
                closest = Some((candidate, distance));
            }
        }

        match closest {
            Some((candidate, distance)) => {
                if self.target != Some(candidate.handle) {
                    debug!(handle = %candidate.handle, distance, "combat target acquired");
                }
                self.target = Some(candidate.handle);
                self.target_location = Some(candidate.position);
                self.hud.show_target_health_bar();
            },
            None => {
                if self.target.is_some() {
                    debug!("combat target cleared");
                }
                self.clear_target();
            },
        }

        self.target
    }

    /// Drop the current target and hide its health bar.
    pub fn clear_target(&mut self) {
        self.target = None;
        self.target_location = None;
        self.hud.hide_target_health_bar();
    }

    /// Follow the target and turn toward it while an attack wants that.
    ///
    /// A target that no longer resolves is treated as no target at all.
    pub fn tick(&mut self, facing: &mut Rotator, origin: Vec3, actors: &ActorRegistry, dt: f32) {
        let Some(handle) = self.target else {
            return;
        };

        let location = match actors.resolve(handle) {
            Ok(actor) => actor.position,
            Err(err) => {
                debug!(%err, "dropping combat target");
                self.clear_target();
                return;
            },
        };

        if self.interp_to_enemy {
            let yaw = look_at_yaw(origin, location);
            facing.yaw = interp_angle(facing.yaw, yaw, dt, self.config.interp_speed);
            trace!(yaw = facing.yaw, goal = yaw, "orienting toward target");
        }

        self.target_location = Some(location);
        self.hud.update_target_location(location);
    }

    /// Start an attack unless one is running or the character is dead.
    pub fn start_attack(&mut self, dead: bool) -> AttackResult {
        if dead {
            return AttackResult::CannotAttack;
        }
        if self.attacking {
            return AttackResult::AlreadyAttacking;
        }

        self.attacking = true;
        self.interp_to_enemy = true;

        let count = self.config.attack_variants.max(1);
        let variant = AttackVariant::new(self.rng.u8(0..count));
        self.last_variant = Some(variant);
        debug!(section = %variant.section_name(), "attack started");
        AttackResult::Started(variant)
    }

    /// Finish the current attack; chain straight into the next one while the
    /// attack input is still held.
    pub fn end_attack(&mut self, dead: bool) -> AttackResult {
        self.attacking = false;
        self.interp_to_enemy = false;

        if self.attack_held {
            self.start_attack(dead)
        } else {
            AttackResult::Finished
        }
    }

    /// Forget any in-flight attack and stop turning.
    pub fn reset_engagement(&mut self) {
        self.attacking = false;
        self.interp_to_enemy = false;
    }

    /// Hold the controller in the attacking state so nothing new can start.
    pub fn lock_attacks(&mut self) {
        self.attacking = true;
        self.interp_to_enemy = false;
    }
}
