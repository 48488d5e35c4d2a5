//! The player character: per-tick simulation and discrete gameplay events.
//!
//! A [`Character`] owns its stats and state machines. Actors it fights live
//! in an [`ActorRegistry`] passed in by the caller, and everything the
//! presentation layer needs to react to goes out through the [`EventBus`].
//!
//! Per tick the order is fixed: stamina first, then movement (which reads the
//! stamina verdict), then combat orientation and target tracking.

use std::fmt;
use std::sync::Arc;

use ember_common::{EntityHandle, LevelId, Rotator, Transform, Vec3};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::actors::{ActorRegistry, Candidate};
use crate::combat::{AttackResult, CombatController};
use crate::config::CharacterConfig;
use crate::error::{GameplayError, GameplayResult};
use crate::events::{CharacterEvent, EventBus};
use crate::hud::Hud;
use crate::input::{ButtonAction, InputEvent, IntentState, MoveAxis};
use crate::movement::{MovementStateMachine, MovementStatus};
use crate::pause::PauseMenu;
use crate::pickups::{Explosive, Pickup, PickupLog};
use crate::save::SaveSnapshot;
use crate::stamina::{StaminaStateMachine, StaminaStatus};
use crate::vitals::{DamageOutcome, VitalStats};
use crate::weapons::{Loadout, Weapon, WeaponCatalog};

// ============================================================================
// Death Phase
// ============================================================================

/// Progress of the death sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DeathPhase {
    /// Not dead.
    #[default]
    Alive,
    /// Death sequence is playing.
    Dying,
    /// Death sequence finished; the character stays down.
    Finished,
}

/// Result of restoring from a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// Nothing applied; the death sequence is still playing.
    Deferred,
    /// Everything applied.
    Restored,
    /// Stats applied, but the saved weapon could not be equipped.
    RestoredUnarmed(GameplayError),
}

// ============================================================================
// Character
// ============================================================================

/// Player character simulation state.
pub struct Character {
    vitals: VitalStats,
    stamina: StaminaStateMachine,
    movement: MovementStateMachine,
    combat: CombatController,
    transform: Transform,
    intents: IntentState,
    loadout: Loadout,
    catalog: WeaponCatalog,
    overlapping_weapon: Option<Weapon>,
    death: DeathPhase,
    pickups: PickupLog,
    pause: PauseMenu,
    explosive: Explosive,
    hud: Arc<dyn Hud>,
    events: EventBus,
}

impl fmt::Debug for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Character")
            .field("vitals", &self.vitals)
            .field("stamina", &self.stamina)
            .field("movement", &self.movement)
            .field("combat", &self.combat)
            .field("transform", &self.transform)
            .field("loadout", &self.loadout)
            .field("death", &self.death)
            .finish_non_exhaustive()
    }
}

impl Character {
    /// Create a character from configuration, reporting UI changes to `hud`.
    #[must_use]
    pub fn new(config: &CharacterConfig, hud: Arc<dyn Hud>) -> Self {
        Self {
            vitals: config.initial_vitals(),
            stamina: StaminaStateMachine::new(config.stamina_config()),
            movement: MovementStateMachine::new(config.movement_config()),
            combat: CombatController::new(config.combat_config(), Arc::clone(&hud)),
            transform: Transform::default(),
            intents: IntentState::default(),
            loadout: Loadout::unarmed(),
            catalog: WeaponCatalog::new(),
            overlapping_weapon: None,
            death: DeathPhase::Alive,
            pickups: PickupLog::default(),
            pause: PauseMenu::new(),
            explosive: Explosive {
                damage: config.explosive_damage,
            },
            hud,
            events: EventBus::new(config.event_capacity),
        }
    }

    /// Use a weapon catalog for name lookups.
    #[must_use]
    pub fn with_catalog(mut self, catalog: WeaponCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Place the character.
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Seed attack variant selection.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.combat = self.combat.with_seed(seed);
        self
    }

    // === Accessors ===

    /// Health, stamina and coins.
    #[must_use]
    pub fn vitals(&self) -> &VitalStats {
        &self.vitals
    }

    /// Stamina machine status.
    #[must_use]
    pub fn stamina_status(&self) -> StaminaStatus {
        self.stamina.status()
    }

    /// Movement machine status.
    #[must_use]
    pub fn movement_status(&self) -> MovementStatus {
        self.movement.status()
    }

    /// Current maximum walk speed.
    #[must_use]
    pub fn max_walk_speed(&self) -> f32 {
        self.movement.max_walk_speed()
    }

    /// Melee state.
    #[must_use]
    pub fn combat(&self) -> &CombatController {
        &self.combat
    }

    /// World transform.
    #[must_use]
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Move the character, e.g. after the physics step.
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    /// Held intents.
    #[must_use]
    pub fn intents(&self) -> &IntentState {
        &self.intents
    }

    /// Weapon in hand.
    #[must_use]
    pub fn loadout(&self) -> &Loadout {
        &self.loadout
    }

    /// Weapon lookup table.
    #[must_use]
    pub fn catalog(&self) -> &WeaponCatalog {
        &self.catalog
    }

    /// Death sequence progress.
    #[must_use]
    pub fn death_phase(&self) -> DeathPhase {
        self.death
    }

    /// Check if the character is dead.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.movement.is_dead()
    }

    /// Where coins were collected.
    #[must_use]
    pub fn pickup_log(&self) -> &PickupLog {
        &self.pickups
    }

    /// Check if the pause menu is up.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.pause.is_visible()
    }

    /// The hazard this character's level uses.
    #[must_use]
    pub fn explosive(&self) -> Explosive {
        self.explosive
    }

    /// Outgoing notifications.
    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    // === Input ===

    /// Apply one input event.
    ///
    /// While the pause menu is up only the pause key and button releases get
    /// through, so held latches cannot stick.
    pub fn handle_input(&mut self, event: InputEvent) {
        if self.pause.is_visible() {
            match event {
                InputEvent::Pause(ButtonAction::Pressed) => {
                    self.pause.toggle(self.hud.as_ref());
                },
                InputEvent::Sprint(ButtonAction::Released) => self.intents.sprint_held = false,
                InputEvent::Attack(ButtonAction::Released) => self.combat.set_attack_held(false),
                _ => {},
            }
            return;
        }

        match event {
            InputEvent::Sprint(action) => self.intents.sprint_held = action.is_pressed(),
            InputEvent::Attack(ButtonAction::Pressed) => self.attack_pressed(),
            InputEvent::Attack(ButtonAction::Released) => self.combat.set_attack_held(false),
            InputEvent::Pause(ButtonAction::Pressed) => {
                self.pause.toggle(self.hud.as_ref());
            },
            InputEvent::Pause(ButtonAction::Released) => {},
            InputEvent::MoveForward(value) => self.set_axis(MoveAxis::Forward, value),
            InputEvent::MoveRight(value) => self.set_axis(MoveAxis::Right, value),
        }
    }

    fn set_axis(&mut self, axis: MoveAxis, value: f32) {
        let blocked = self.combat.is_attacking() || self.is_dead();
        self.intents.set_axis(axis, value, blocked);
    }

    fn attack_pressed(&mut self) {
        self.combat.set_attack_held(true);
        if self.is_dead() {
            return;
        }

        if let Some(weapon) = self.overlapping_weapon.take() {
            self.equip_weapon(weapon);
        } else if self.loadout.is_armed() {
            self.start_attack();
        }
    }

    fn start_attack(&mut self) {
        if let AttackResult::Started(variant) = self.combat.start_attack(self.is_dead()) {
            self.events.publish(CharacterEvent::AttackStarted { variant });
        }
    }

    // === Simulation ===

    /// Advance one frame.
    ///
    /// Frozen while the pause menu is up; does nothing once dead.
    pub fn tick(&mut self, dt: f32, actors: &ActorRegistry) {
        if !self.pause.should_update_world() || self.is_dead() {
            return;
        }

        let stamina = self.stamina.tick(
            &mut self.vitals,
            self.intents.sprint_held,
            self.intents.is_moving(),
            dt,
        );
        if let Some(from) = stamina.previous {
            self.events.publish(CharacterEvent::StaminaChanged {
                from,
                to: stamina.status,
            });
        }

        if let Some(from) = self.movement.update(stamina.sprint_capable) {
            self.events.publish(CharacterEvent::MovementChanged {
                from,
                to: self.movement.status(),
                max_walk_speed: self.movement.max_walk_speed(),
            });
        }

        let before = self.combat.target();
        let origin = self.transform.position;
        self.combat
            .tick(&mut self.transform.rotation, origin, actors, dt);
        if self.combat.target() != before {
            self.events.publish(CharacterEvent::TargetChanged {
                target: self.combat.target(),
            });
        }
    }

    /// Re-pick the combat target from this frame's detection set.
    pub fn update_combat_target(&mut self, candidates: &[Candidate]) -> Option<EntityHandle> {
        let before = self.combat.target();
        let target = self.combat.acquire_target(self.transform.position, candidates);
        if target != before {
            self.events.publish(CharacterEvent::TargetChanged { target });
        }
        target
    }

    /// Attack clip finished. Chains into another attack while the attack
    /// input is still held.
    pub fn end_attack(&mut self) {
        match self.combat.end_attack(self.is_dead()) {
            AttackResult::Started(variant) => {
                self.events.publish(CharacterEvent::AttackStarted { variant });
            },
            AttackResult::Finished | AttackResult::AlreadyAttacking => {
                self.events.publish(CharacterEvent::AttackEnded);
            },
            AttackResult::CannotAttack => {
                debug!("held attack not chained, character is dead");
                self.events.publish(CharacterEvent::AttackEnded);
            },
        }
    }

    // === Damage and Death ===

    /// Take damage, optionally from an attacker.
    ///
    /// A lethal hit kills the character and tells the attacker its target
    /// is gone.
    pub fn take_damage(
        &mut self,
        amount: f32,
        source: Option<EntityHandle>,
        actors: &mut ActorRegistry,
    ) -> DamageOutcome {
        let outcome = self.absorb_damage(amount, source);
        if outcome.is_lethal() {
            if let Some(attacker) = source {
                if let Err(err) = actors.invalidate_target_of(attacker) {
                    debug!(%err, "attacker gone before its target died");
                }
            }
        }
        outcome
    }

    /// Touch an explosive hazard.
    pub fn touch_explosive(&mut self, explosive: Explosive) -> DamageOutcome {
        if self.is_dead() {
            return DamageOutcome::Died;
        }
        let outcome = explosive.detonate(&mut self.vitals);
        self.after_damage(explosive.damage, None, outcome);
        outcome
    }

    fn absorb_damage(&mut self, amount: f32, source: Option<EntityHandle>) -> DamageOutcome {
        if self.is_dead() {
            return DamageOutcome::Died;
        }
        let amount = amount.max(0.0);
        let outcome = self.vitals.apply_damage(amount);
        self.after_damage(amount, source, outcome);
        outcome
    }

    fn after_damage(&mut self, amount: f32, source: Option<EntityHandle>, outcome: DamageOutcome) {
        self.events
            .publish(CharacterEvent::Damaged { amount, source });
        if outcome.is_lethal() {
            self.die();
        }
    }

    /// Kill the character and start the death sequence.
    pub fn die(&mut self) {
        if self.is_dead() {
            return;
        }
        self.movement.die();
        self.death = DeathPhase::Dying;
        self.intents.halt();
        self.combat.reset_engagement();
        info!(health = self.vitals.health(), "character died");
        self.events.publish(CharacterEvent::DeathStarted);
    }

    /// Death sequence finished playing.
    pub fn death_sequence_finished(&mut self) {
        if self.death != DeathPhase::Dying {
            return;
        }
        self.death = DeathPhase::Finished;
        self.combat.lock_attacks();
        debug!("death sequence finished");
        self.events.publish(CharacterEvent::DeathFinished);
    }

    // === Items ===

    /// Collect a pickup at `location`. Ignored once dead.
    pub fn collect(&mut self, pickup: Pickup, location: Vec3) -> bool {
        if self.is_dead() {
            return false;
        }

        pickup.apply(&mut self.vitals);
        match pickup {
            Pickup::Coins { amount } => {
                self.pickups.record(location);
                self.events
                    .publish(CharacterEvent::CoinsPicked { amount, location });
            },
            Pickup::HealthPotion { amount } => {
                self.events.publish(CharacterEvent::Healed { amount });
            },
        }
        true
    }

    /// Set the weapon pickup the character is standing on.
    pub fn set_overlapping_weapon(&mut self, weapon: Option<Weapon>) {
        self.overlapping_weapon = weapon;
    }

    /// Weapon pickup the character is standing on.
    #[must_use]
    pub fn overlapping_weapon(&self) -> Option<&Weapon> {
        self.overlapping_weapon.as_ref()
    }

    /// Put a weapon in hand, replacing any current one.
    pub fn equip_weapon(&mut self, weapon: Weapon) {
        let name = weapon.name.clone();
        if let Some(previous) = self.loadout.equip(weapon) {
            debug!(previous = %previous.name, "replaced equipped weapon");
        }
        self.events.publish(CharacterEvent::WeaponEquipped { name });
    }

    /// Equip a weapon by catalog name.
    pub fn equip_by_name(&mut self, name: &str) -> GameplayResult<()> {
        let weapon = self.catalog.lookup(name)?.clone();
        self.equip_weapon(weapon);
        Ok(())
    }

    // === Snapshots ===

    /// Capture everything a save slot holds.
    #[must_use]
    pub fn snapshot(&self, level: &LevelId) -> SaveSnapshot {
        SaveSnapshot {
            health: self.vitals.health(),
            max_health: self.vitals.max_health(),
            stamina: self.vitals.stamina(),
            max_stamina: self.vitals.max_stamina(),
            coins: self.vitals.coins(),
            level: level.as_str().to_string(),
            weapon: self.loadout.equipped_name().to_string(),
            position: (
                self.transform.position.x,
                self.transform.position.y,
                self.transform.position.z,
            ),
            rotation: self.transform.rotation.to_tuple(),
        }
    }

    /// Apply a snapshot.
    ///
    /// Deferred while the death sequence is playing. Otherwise stats are
    /// written, the character is back on its feet, and the saved weapon is
    /// re-equipped by name; an unknown name leaves it unarmed.
    pub fn restore(&mut self, snapshot: &SaveSnapshot, apply_transform: bool) -> RestoreOutcome {
        if self.death == DeathPhase::Dying {
            debug!("restore deferred until the death sequence finishes");
            return RestoreOutcome::Deferred;
        }

        self.vitals.restore(
            snapshot.health,
            snapshot.max_health,
            snapshot.stamina,
            snapshot.max_stamina,
            snapshot.coins,
        );
        self.movement.reset();
        self.death = DeathPhase::Alive;
        self.combat.reset_engagement();

        let outcome = if snapshot.weapon.is_empty() {
            self.loadout.unequip();
            RestoreOutcome::Restored
        } else {
            match self.equip_by_name(&snapshot.weapon) {
                Ok(()) => RestoreOutcome::Restored,
                Err(err) => {
                    warn!(
                        %err,
                        weapon = %snapshot.weapon,
                        "saved weapon unavailable, restoring unarmed"
                    );
                    self.loadout.unequip();
                    RestoreOutcome::RestoredUnarmed(err)
                },
            }
        };

        if apply_transform {
            self.transform = Transform::new(
                Vec3::new(snapshot.position.0, snapshot.position.1, snapshot.position.2),
                Rotator::from_tuple(snapshot.rotation),
            );
        }

        self.hud.enter_game_input_mode();
        self.events.publish(CharacterEvent::Restored);
        info!(health = self.vitals.health(), coins = self.vitals.coins(), "character restored");
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::Actor;
    use crate::hud::{HudSignal, RecordingHud};
    use ember_common::Faction;

    fn character() -> (Character, Arc<RecordingHud>) {
        let hud = Arc::new(RecordingHud::new());
        let catalog = WeaponCatalog::new()
            .with_weapon(Weapon::new("Sword", 25.0))
            .expect("catalog should build");
        let character = Character::new(&CharacterConfig::default(), hud.clone())
            .with_catalog(catalog)
            .with_seed(11);
        (character, hud)
    }

    fn press(character: &mut Character, event: fn(ButtonAction) -> InputEvent) {
        character.handle_input(event(ButtonAction::Pressed));
    }

    #[test]
    fn test_defaults() {
        let (character, _hud) = character();
        assert_eq!(character.vitals().health(), 65.0);
        assert_eq!(character.vitals().stamina(), 120.0);
        assert_eq!(character.max_walk_speed(), 650.0);
        assert_eq!(character.death_phase(), DeathPhase::Alive);
        assert!(!character.loadout().is_armed());
    }

    #[test]
    fn test_sprint_needs_movement() {
        let (mut character, _hud) = character();
        let actors = ActorRegistry::new();
        press(&mut character, InputEvent::Sprint);

        character.tick(0.1, &actors);
        assert_eq!(character.movement_status(), MovementStatus::Normal);

        character.handle_input(InputEvent::MoveForward(1.0));
        character.tick(0.1, &actors);
        assert_eq!(character.movement_status(), MovementStatus::Sprinting);
        assert_eq!(character.max_walk_speed(), 1150.0);

        let events = character.events().drain();
        assert!(events.iter().any(|e| matches!(
            e,
            CharacterEvent::MovementChanged { to: MovementStatus::Sprinting, .. }
        )));
    }

    #[test]
    fn test_unarmed_attack_does_nothing() {
        let (mut character, _hud) = character();
        press(&mut character, InputEvent::Attack);
        assert!(!character.combat().is_attacking());
        assert!(character.combat().attack_held());
    }

    #[test]
    fn test_attack_press_picks_up_weapon_first() {
        let (mut character, _hud) = character();
        character.set_overlapping_weapon(Some(Weapon::new("Axe", 30.0)));

        press(&mut character, InputEvent::Attack);
        assert_eq!(character.loadout().equipped_name(), "Axe");
        assert!(!character.combat().is_attacking());
        assert!(character.overlapping_weapon().is_none());

        character.handle_input(InputEvent::Attack(ButtonAction::Released));
        press(&mut character, InputEvent::Attack);
        assert!(character.combat().is_attacking());
    }

    #[test]
    fn test_attack_blocks_movement_and_chains() {
        let (mut character, _hud) = character();
        character.equip_by_name("Sword").expect("sword should exist");
        press(&mut character, InputEvent::Attack);

        character.handle_input(InputEvent::MoveForward(1.0));
        assert!(!character.intents().is_moving());

        character.end_attack();
        assert!(character.combat().is_attacking());

        character.handle_input(InputEvent::Attack(ButtonAction::Released));
        character.end_attack();
        assert!(!character.combat().is_attacking());
        assert!(matches!(
            character.events().drain().last(),
            Some(CharacterEvent::AttackEnded)
        ));
    }

    #[test]
    fn test_lethal_damage_invalidates_attacker() {
        let (mut character, _hud) = character();
        let mut actors = ActorRegistry::new();
        let mut grunt = Actor::hostile("Grunt", Vec3::ZERO);
        grunt.has_valid_target = true;
        let grunt = actors.insert(grunt);

        assert_eq!(
            character.take_damage(10.0, Some(grunt), &mut actors),
            DamageOutcome::Survived
        );
        assert!(actors.resolve(grunt).expect("resolves").has_valid_target);

        assert!(character.take_damage(100.0, Some(grunt), &mut actors).is_lethal());
        assert!(character.is_dead());
        assert_eq!(character.death_phase(), DeathPhase::Dying);
        assert!(!actors.resolve(grunt).expect("resolves").has_valid_target);
    }

    #[test]
    fn test_dead_character_ignores_ticks_and_input() {
        let (mut character, _hud) = character();
        let mut actors = ActorRegistry::new();
        character.take_damage(1_000.0, None, &mut actors);
        let stamina = character.vitals().stamina();

        press(&mut character, InputEvent::Sprint);
        character.handle_input(InputEvent::MoveForward(1.0));
        for _ in 0..10 {
            character.tick(0.5, &actors);
        }
        assert_eq!(character.movement_status(), MovementStatus::Dead);
        assert_eq!(character.vitals().stamina(), stamina);
        assert!(!character.intents().is_moving());
    }

    #[test]
    fn test_death_sequence_locks_attacks() {
        let (mut character, _hud) = character();
        character.equip_by_name("Sword").expect("sword should exist");
        character.die();
        assert!(character
            .events()
            .drain()
            .contains(&CharacterEvent::DeathStarted));

        character.death_sequence_finished();
        assert_eq!(character.death_phase(), DeathPhase::Finished);
        assert!(character.combat().is_attacking());
        assert!(character
            .events()
            .drain()
            .contains(&CharacterEvent::DeathFinished));
    }

    #[test]
    fn test_pause_freezes_tick() {
        let (mut character, hud) = character();
        let actors = ActorRegistry::new();
        press(&mut character, InputEvent::Pause);
        assert!(character.is_paused());
        assert!(hud.saw(HudSignal::DisplayPauseMenu));

        let stamina = character.vitals().stamina();
        press(&mut character, InputEvent::Sprint);
        character.tick(1.0, &actors);
        assert_eq!(character.vitals().stamina(), stamina);
        assert!(!character.intents().sprint_held);

        press(&mut character, InputEvent::Pause);
        assert!(!character.is_paused());
        character.tick(1.0, &actors);
        assert_eq!(character.vitals().stamina(), 145.0);
    }

    #[test]
    fn test_pickups_and_explosive() {
        let (mut character, _hud) = character();
        let spot = Vec3::new(4.0, 5.0, 0.0);
        assert!(character.collect(Pickup::Coins { amount: 2 }, spot));
        assert!(character.collect(Pickup::HealthPotion { amount: 10.0 }, Vec3::ZERO));
        assert_eq!(character.vitals().coins(), 2);
        assert_eq!(character.vitals().health(), 75.0);
        assert_eq!(character.pickup_log().locations(), &[spot]);

        let outcome = character.touch_explosive(character.explosive());
        assert_eq!(outcome, DamageOutcome::Survived);
        assert_eq!(character.vitals().health(), 60.0);
    }

    #[test]
    fn test_target_events() {
        let (mut character, _hud) = character();
        let mut actors = ActorRegistry::new();
        let handle = actors.insert(Actor::hostile("Grunt", Vec3::new(3.0, 0.0, 0.0)));
        let candidates = [Candidate {
            handle,
            position: Vec3::new(3.0, 0.0, 0.0),
            faction: Faction::Hostile,
        }];

        assert_eq!(character.update_combat_target(&candidates), Some(handle));
        actors.remove(handle);
        character.tick(0.016, &actors);
        assert_eq!(character.combat().target(), None);

        let targets: Vec<_> = character
            .events()
            .drain()
            .into_iter()
            .filter_map(|e| match e {
                CharacterEvent::TargetChanged { target } => Some(target),
                _ => None,
            })
            .collect();
        assert_eq!(targets, vec![Some(handle), None]);
    }

    #[test]
    fn test_restore_revives_and_equips() {
        let (mut character, hud) = character();
        character.die();
        character.death_sequence_finished();

        let snapshot = SaveSnapshot {
            health: 40.0,
            max_health: 100.0,
            stamina: 80.0,
            max_stamina: 150.0,
            coins: 12,
            level: "L2".to_string(),
            weapon: "Sword".to_string(),
            position: (1.0, 2.0, 3.0),
            rotation: (0.0, 90.0, 0.0),
        };

        assert_eq!(character.restore(&snapshot, true), RestoreOutcome::Restored);
        assert!(!character.is_dead());
        assert!(!character.combat().is_attacking());
        assert_eq!(character.loadout().equipped_name(), "Sword");
        assert_eq!(character.transform().position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(character.transform().rotation, Rotator::new(0.0, 90.0, 0.0));
        assert!(hud.saw(HudSignal::GameInputMode));
    }

    #[test]
    fn test_restore_deferred_while_dying() {
        let (mut character, _hud) = character();
        character.die();
        let snapshot = character.snapshot(&LevelId::from("L1"));
        assert_eq!(character.restore(&snapshot, false), RestoreOutcome::Deferred);
        assert!(character.is_dead());
    }

    #[test]
    fn test_restore_unknown_weapon_is_unarmed() {
        let (mut character, _hud) = character();
        character.equip_by_name("Sword").expect("sword should exist");
        let mut snapshot = character.snapshot(&LevelId::from("L1"));
        snapshot.weapon = "Halberd".to_string();
        snapshot.health = 30.0;

        let outcome = character.restore(&snapshot, false);
        assert_eq!(
            outcome,
            RestoreOutcome::RestoredUnarmed(GameplayError::InvalidWeaponId("Halberd".to_string()))
        );
        assert!(!character.loadout().is_armed());
        assert_eq!(character.vitals().health(), 30.0);
    }
}
