//! Scripted play session exercising the character core end to end.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use ember_common::{LevelId, Rotator, Transform, Vec3};
use ember_gameplay::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Fixed simulation step.
const FRAME: f32 = 1.0 / 60.0;

/// Level the scenario travels to.
const DESTINATION: &str = "Dungeon";

/// Final state printed when the session ends.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    /// Level the character ended in.
    pub level: String,
    /// Remaining health.
    pub health: f32,
    /// Remaining stamina.
    pub stamina: f32,
    /// Coins carried.
    pub coins: u32,
    /// Equipped weapon, empty when unarmed.
    pub weapon: String,
    /// Final movement status.
    pub movement: String,
    /// Final stamina status.
    pub stamina_status: String,
    /// Frames simulated.
    pub frames: u32,
    /// Character events drained during the session.
    pub events: usize,
}

/// Session driver: owns the world pieces the character talks to.
pub struct Session<S: SlotStore> {
    character: Character,
    actors: ActorRegistry,
    loader: LevelRoster,
    coordinator: PersistenceCoordinator<S>,
    frames: u32,
    events: usize,
}

impl<S: SlotStore> Session<S> {
    /// Build a session in the configured starting level.
    pub fn new(config: &CharacterConfig, catalog: WeaponCatalog, store: S) -> Self {
        let hud: Arc<dyn Hud> = Arc::new(NullHud);
        let character = Character::new(config, hud)
            .with_catalog(catalog)
            .with_transform(Transform::new(Vec3::ZERO, Rotator::ZERO));

        Self {
            character,
            actors: ActorRegistry::new(),
            loader: LevelRoster::new(config.default_level.as_str()).with_level(DESTINATION),
            coordinator: PersistenceCoordinator::new(store).with_slot(config.save_slot.clone()),
            frames: 0,
            events: 0,
        }
    }

    /// Run the scripted session.
    pub fn run(mut self) -> Result<SessionReport> {
        match self.coordinator.restore_on_startup(&mut self.character) {
            Ok(Some(outcome)) => info!(?outcome, "resumed from save"),
            Ok(None) => {},
            Err(e) => warn!("ignoring unreadable save: {e}"),
        }

        self.sprint_until_winded();
        self.collect_items();
        self.fight();
        self.pause_briefly();
        self.travel()?;

        let explosive = self.character.explosive();
        self.character.touch_explosive(explosive);
        self.advance(10);

        Ok(self.report())
    }

    fn advance(&mut self, frames: u32) {
        for _ in 0..frames {
            self.character.tick(FRAME, &self.actors);
            self.frames += 1;
            for event in self.character.events().drain() {
                debug!(?event, "character event");
                self.events += 1;
            }
        }
    }

    fn sprint_until_winded(&mut self) {
        self.character.handle_input(InputEvent::Sprint(ButtonAction::Pressed));
        let mut frames = 0;
        while self.character.stamina_status() == StaminaStatus::Normal && frames < 600 {
            self.character.handle_input(InputEvent::MoveForward(1.0));
            self.advance(1);
            frames += 1;
        }
        info!(
            frames,
            stamina = self.character.vitals().stamina(),
            status = ?self.character.stamina_status(),
            "sprint ended"
        );

        self.character.handle_input(InputEvent::Sprint(ButtonAction::Released));
        self.character.handle_input(InputEvent::MoveForward(0.0));
        self.advance(120);
    }

    fn collect_items(&mut self) {
        self.character
            .collect(Pickup::Coins { amount: 5 }, Vec3::new(120.0, 40.0, 0.0));
        self.character
            .collect(Pickup::HealthPotion { amount: 20.0 }, Vec3::new(140.0, 40.0, 0.0));
        self.advance(1);
    }

    fn fight(&mut self) {
        let grunt = self
            .actors
            .insert(Actor::hostile("Grunt", Vec3::new(300.0, 300.0, 0.0)));
        self.actors
            .insert(Actor::hostile("Brute", Vec3::new(-900.0, 0.0, 0.0)));

        let candidates = self.actors.overlapping(self.character.transform().position, 1000.0);
        self.character.update_combat_target(&candidates);

        let first_weapon = self.character.catalog().iter().next().cloned();
        if let Some(weapon) = first_weapon {
            self.character.set_overlapping_weapon(Some(weapon));
        }
        self.character.handle_input(InputEvent::Attack(ButtonAction::Pressed));
        self.character.handle_input(InputEvent::Attack(ButtonAction::Released));

        // Second press swings; holding it chains once before letting go.
        self.character.handle_input(InputEvent::Attack(ButtonAction::Pressed));
        self.advance(30);
        self.character.end_attack();
        self.character.handle_input(InputEvent::Attack(ButtonAction::Released));
        self.advance(30);
        self.character.end_attack();

        self.character.take_damage(10.0, Some(grunt), &mut self.actors);
        self.actors.remove(grunt);
        self.advance(5);
        info!(
            yaw = self.character.transform().rotation.yaw,
            health = self.character.vitals().health(),
            "fight over"
        );
    }

    fn pause_briefly(&mut self) {
        self.character.handle_input(InputEvent::Pause(ButtonAction::Pressed));
        self.advance(30);
        self.character.handle_input(InputEvent::Pause(ButtonAction::Pressed));
    }

    fn travel(&mut self) -> Result<()> {
        let outcome = self
            .coordinator
            .transition_level(&mut self.character, &mut self.loader, &LevelId::from(DESTINATION))
            .context("level transition failed")?;
        info!(?outcome, level = %self.loader.current_level(), "travelled");
        self.advance(1);
        Ok(())
    }

    fn report(&self) -> SessionReport {
        let vitals = self.character.vitals();
        SessionReport {
            level: self.loader.current_level().to_string(),
            health: vitals.health(),
            stamina: vitals.stamina(),
            coins: vitals.coins(),
            weapon: self.character.loadout().equipped_name().to_string(),
            movement: format!("{:?}", self.character.movement_status()),
            stamina_status: format!("{:?}", self.character.stamina_status()),
            frames: self.frames,
            events: self.events,
        }
    }
}

/// Load the weapon catalog, falling back to the built-in set.
pub fn load_catalog(path: &Path) -> Result<WeaponCatalog> {
    match WeaponCatalog::load_from(path) {
        Ok(catalog) => Ok(catalog),
        Err(CatalogError::NotFound(_)) => {
            info!("No weapon catalog at {}, using built-in weapons", path.display());
            let catalog = WeaponCatalog::new()
                .with_weapon(Weapon::new("Sword", 25.0).with_description("A plain blade"))?;
            Ok(catalog)
        },
        Err(e) => Err(e).with_context(|| format!("failed to load {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_session_in_memory() {
        let config = CharacterConfig::default();
        let catalog = load_catalog(Path::new("/nonexistent/weapons.toml"))
            .expect("built-in catalog should load");
        let report = Session::new(&config, catalog, MemorySlotStore::new())
            .run()
            .expect("session should complete");

        assert_eq!(report.level, DESTINATION);
        assert_eq!(report.weapon, "Sword");
        assert_eq!(report.coins, 5);
        assert_eq!(report.movement, "Normal");
        assert!(report.health > 0.0);
        assert!(report.events > 0);
    }

    #[test]
    fn test_session_resumes_from_file_store() {
        let temp = TempDir::new().expect("tempdir should succeed");
        let config = CharacterConfig::default();
        let catalog = || load_catalog(Path::new("/nonexistent/weapons.toml")).expect("catalog");

        Session::new(&config, catalog(), FileSlotStore::new(temp.path()))
            .run()
            .expect("first session should complete");
        let second = Session::new(&config, catalog(), FileSlotStore::new(temp.path()))
            .run()
            .expect("second session should complete");

        // The transition save carried the first session's coins over.
        assert_eq!(second.coins, 10);
    }
}
