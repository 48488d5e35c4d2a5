//! Vital resources: health, stamina, and coins.
//!
//! Every mutation goes through a named operation and leaves health and
//! stamina inside `[0, max]`. None of the operations can fail; passing a
//! non-negative amount is the caller's responsibility.

use serde::{Deserialize, Serialize};

/// Result of applying damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DamageOutcome {
    /// Health is still above zero.
    Survived,
    /// Health reached zero.
    Died,
}

impl DamageOutcome {
    /// Check if the damage was lethal.
    #[must_use]
    pub const fn is_lethal(self) -> bool {
        matches!(self, Self::Died)
    }
}

/// Health, stamina and currency of the character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalStats {
    health: f32,
    max_health: f32,
    stamina: f32,
    max_stamina: f32,
    coins: u32,
}

impl Default for VitalStats {
    fn default() -> Self {
        Self::new(65.0, 100.0, 120.0, 150.0)
    }
}

impl VitalStats {
    /// Smallest maximum accepted for health or stamina.
    pub const MIN_MAX: f32 = 1.0;

    /// Create stats with no coins. Current values are clamped to their maxima.
    #[must_use]
    pub fn new(health: f32, max_health: f32, stamina: f32, max_stamina: f32) -> Self {
        let mut stats = Self {
            health: 0.0,
            max_health: Self::MIN_MAX,
            stamina: 0.0,
            max_stamina: Self::MIN_MAX,
            coins: 0,
        };
        stats.restore(health, max_health, stamina, max_stamina, 0);
        stats
    }

    /// Current health.
    #[must_use]
    pub fn health(&self) -> f32 {
        self.health
    }

    /// Maximum health.
    #[must_use]
    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    /// Current stamina.
    #[must_use]
    pub fn stamina(&self) -> f32 {
        self.stamina
    }

    /// Maximum stamina.
    #[must_use]
    pub fn max_stamina(&self) -> f32 {
        self.max_stamina
    }

    /// Coins collected.
    #[must_use]
    pub fn coins(&self) -> u32 {
        self.coins
    }

    /// Check if health is above zero.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Subtract health. Lethal when the result would be at or below zero.
    pub fn apply_damage(&mut self, amount: f32) -> DamageOutcome {
        if self.health - amount <= 0.0 {
            self.health = 0.0;
            DamageOutcome::Died
        } else {
            self.health = (self.health - amount).min(self.max_health);
            DamageOutcome::Survived
        }
    }

    /// Add health, capped at max.
    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).clamp(0.0, self.max_health);
    }

    /// Remove stamina, floored at zero.
    pub fn drain_stamina(&mut self, amount: f32) {
        self.stamina = (self.stamina - amount).clamp(0.0, self.max_stamina);
    }

    /// Add stamina, capped at max.
    pub fn regen_stamina(&mut self, amount: f32) {
        self.stamina = (self.stamina + amount).clamp(0.0, self.max_stamina);
    }

    /// Force stamina to zero.
    pub fn deplete_stamina(&mut self) {
        self.stamina = 0.0;
    }

    /// Add coins. Saturates instead of wrapping.
    pub fn add_coins(&mut self, amount: u32) {
        self.coins = self.coins.saturating_add(amount);
    }

    /// Overwrite every stat at once, e.g. from a save snapshot.
    ///
    /// Maxima below one (or NaN) fall back to one; current values are clamped
    /// into the new ranges.
    pub fn restore(
        &mut self,
        health: f32,
        max_health: f32,
        stamina: f32,
        max_stamina: f32,
        coins: u32,
    ) {
        self.max_health = sanitize_max(max_health);
        self.max_stamina = sanitize_max(max_stamina);
        self.health = sanitize_current(health, self.max_health);
        self.stamina = sanitize_current(stamina, self.max_stamina);
        self.coins = coins;
    }
}

fn sanitize_max(value: f32) -> f32 {
    if value.is_nan() {
        VitalStats::MIN_MAX
    } else {
        value.max(VitalStats::MIN_MAX)
    }
}

fn sanitize_current(value: f32, max: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn in_range(stats: &VitalStats) -> bool {
        (0.0..=stats.max_health()).contains(&stats.health())
            && (0.0..=stats.max_stamina()).contains(&stats.stamina())
    }

    #[test]
    fn test_defaults_match_starting_character() {
        let stats = VitalStats::default();
        assert_eq!(stats.health(), 65.0);
        assert_eq!(stats.max_health(), 100.0);
        assert_eq!(stats.stamina(), 120.0);
        assert_eq!(stats.max_stamina(), 150.0);
        assert_eq!(stats.coins(), 0);
    }

    #[test]
    fn test_damage_non_lethal() {
        let mut stats = VitalStats::new(50.0, 100.0, 100.0, 100.0);
        assert_eq!(stats.apply_damage(20.0), DamageOutcome::Survived);
        assert_eq!(stats.health(), 30.0);
    }

    #[test]
    fn test_damage_exactly_to_zero_is_lethal() {
        let mut stats = VitalStats::new(15.0, 100.0, 100.0, 100.0);
        assert!(stats.apply_damage(15.0).is_lethal());
        assert_eq!(stats.health(), 0.0);
        assert!(!stats.is_alive());
    }

    #[test]
    fn test_overkill_clamps_to_zero() {
        let mut stats = VitalStats::new(15.0, 100.0, 100.0, 100.0);
        assert!(stats.apply_damage(500.0).is_lethal());
        assert_eq!(stats.health(), 0.0);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut stats = VitalStats::new(90.0, 100.0, 100.0, 100.0);
        stats.heal(25.0);
        assert_eq!(stats.health(), 100.0);
    }

    #[test]
    fn test_stamina_bounds() {
        let mut stats = VitalStats::new(100.0, 100.0, 10.0, 150.0);
        stats.drain_stamina(25.0);
        assert_eq!(stats.stamina(), 0.0);
        stats.regen_stamina(500.0);
        assert_eq!(stats.stamina(), 150.0);
        stats.deplete_stamina();
        assert_eq!(stats.stamina(), 0.0);
    }

    #[test]
    fn test_coins_saturate() {
        let mut stats = VitalStats::default();
        stats.add_coins(12);
        assert_eq!(stats.coins(), 12);
        stats.add_coins(u32::MAX);
        assert_eq!(stats.coins(), u32::MAX);
    }

    #[test]
    fn test_restore_sanitizes_input() {
        let mut stats = VitalStats::default();
        stats.restore(250.0, 200.0, -5.0, 0.0, 7);
        assert_eq!(stats.max_health(), 200.0);
        assert_eq!(stats.health(), 200.0);
        assert_eq!(stats.max_stamina(), 1.0);
        assert_eq!(stats.stamina(), 0.0);
        assert_eq!(stats.coins(), 7);

        stats.restore(f32::NAN, f32::NAN, 1.0, 10.0, 0);
        assert!(in_range(&stats));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Damage(f32),
        Heal(f32),
        Drain(f32),
        Regen(f32),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0.0f32..500.0).prop_map(Op::Damage),
            (0.0f32..500.0).prop_map(Op::Heal),
            (0.0f32..500.0).prop_map(Op::Drain),
            (0.0f32..500.0).prop_map(Op::Regen),
        ]
    }

    proptest! {
        #[test]
        fn prop_mutations_stay_clamped(
            health in 0.0f32..300.0,
            max_health in 1.0f32..300.0,
            stamina in 0.0f32..300.0,
            max_stamina in 1.0f32..300.0,
            ops in proptest::collection::vec(op_strategy(), 0..64),
        ) {
            let mut stats = VitalStats::new(health, max_health, stamina, max_stamina);
            prop_assert!(in_range(&stats));
            for op in ops {
                match op {
                    Op::Damage(amount) => { stats.apply_damage(amount); },
                    Op::Heal(amount) => stats.heal(amount),
                    Op::Drain(amount) => stats.drain_stamina(amount),
                    Op::Regen(amount) => stats.regen_stamina(amount),
                }
                prop_assert!(in_range(&stats));
            }
        }
    }
}
