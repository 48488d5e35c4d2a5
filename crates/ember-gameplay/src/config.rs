//! Character tuning.
//!
//! Provides starting stats, locomotion speeds, stamina and combat tuning.
//! Configuration can be loaded from and saved to a TOML file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::combat::CombatConfig;
use crate::movement::MovementConfig;
use crate::stamina::StaminaConfig;
use crate::vitals::VitalStats;

/// Configuration file name.
pub const CONFIG_FILE: &str = "ember.toml";

/// Errors that can occur reading or writing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File not found.
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    /// I/O failure.
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse TOML.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Failed to serialize TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Character configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    // === Starting Stats ===
    /// Starting health
    pub health: f32,
    /// Maximum health
    pub max_health: f32,
    /// Starting stamina
    pub stamina: f32,
    /// Maximum stamina
    pub max_stamina: f32,

    // === Locomotion ===
    /// Speed outside of a sprint
    pub running_speed: f32,
    /// Speed while sprinting
    pub sprinting_speed: f32,

    // === Stamina ===
    /// Stamina drained or regenerated per second
    pub stamina_drain_rate: f32,
    /// Stamina needed to leave exhaustion and the sprint warning threshold
    pub min_sprint_stamina: f32,

    // === Combat ===
    /// Turn speed toward the combat target
    pub interp_speed: f32,
    /// Number of attack clip sections
    pub attack_variants: u8,
    /// Damage dealt by explosive hazards
    pub explosive_damage: f32,

    // === Persistence ===
    /// Level loaded on a fresh start
    pub default_level: String,
    /// Save slot used by continue and level transitions
    pub save_slot: String,

    // === Events ===
    /// Capacity of the character event bus
    pub event_capacity: usize,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            health: 65.0,
            max_health: 100.0,
            stamina: 120.0,
            max_stamina: 150.0,

            running_speed: 650.0,
            sprinting_speed: 1150.0,

            stamina_drain_rate: 25.0,
            min_sprint_stamina: 50.0,

            interp_speed: 15.0,
            attack_variants: 2,
            explosive_damage: 15.0,

            default_level: "SunTemple".to_string(),
            save_slot: "Default".to_string(),

            event_capacity: 256,
        }
    }
}

impl CharacterConfig {
    /// Load configuration from a path.
    /// Returns default config if the file is missing or invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::try_load_from(path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            },
            Err(ConfigError::NotFound(_)) => {
                info!("Config file not found, using defaults");
                Self::default()
            },
            Err(e) => {
                warn!("Failed to load config file: {e}");
                Self::default()
            },
        }
    }

    /// Load and validate configuration, reporting any failure.
    pub fn try_load_from<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let contents = fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&contents)?;
        config.validate();
        Ok(config)
    }

    /// Save configuration to a path, creating parent directories.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate and clamp configuration values to sensible ranges.
    pub fn validate(&mut self) {
        let defaults = Self::default();
        for (value, fallback) in [
            (&mut self.health, defaults.health),
            (&mut self.max_health, defaults.max_health),
            (&mut self.stamina, defaults.stamina),
            (&mut self.max_stamina, defaults.max_stamina),
            (&mut self.running_speed, defaults.running_speed),
            (&mut self.sprinting_speed, defaults.sprinting_speed),
            (&mut self.stamina_drain_rate, defaults.stamina_drain_rate),
            (&mut self.min_sprint_stamina, defaults.min_sprint_stamina),
            (&mut self.interp_speed, defaults.interp_speed),
            (&mut self.explosive_damage, defaults.explosive_damage),
        ] {
            if value.is_nan() {
                *value = fallback;
            }
        }

        // Stats
        self.max_health = self.max_health.clamp(VitalStats::MIN_MAX, 10_000.0);
        self.max_stamina = self.max_stamina.clamp(VitalStats::MIN_MAX, 10_000.0);
        self.health = self.health.clamp(0.0, self.max_health);
        self.stamina = self.stamina.clamp(0.0, self.max_stamina);

        // Locomotion
        self.running_speed = self.running_speed.clamp(0.0, 10_000.0);
        self.sprinting_speed = self.sprinting_speed.clamp(self.running_speed, 20_000.0);

        // Stamina
        self.stamina_drain_rate = self.stamina_drain_rate.clamp(0.0, 1_000.0);
        self.min_sprint_stamina = self.min_sprint_stamina.clamp(0.0, self.max_stamina);

        // Combat
        self.interp_speed = self.interp_speed.clamp(0.0, 100.0);
        self.attack_variants = self.attack_variants.max(1);
        self.explosive_damage = self.explosive_damage.max(0.0);

        if self.save_slot.trim().is_empty() {
            warn!("Empty save slot name, using default");
            self.save_slot = defaults.save_slot;
        }
        self.event_capacity = self.event_capacity.clamp(16, 65_536);
    }

    /// Starting vital stats.
    #[must_use]
    pub fn initial_vitals(&self) -> VitalStats {
        VitalStats::new(self.health, self.max_health, self.stamina, self.max_stamina)
    }

    /// Stamina machine tuning.
    #[must_use]
    pub fn stamina_config(&self) -> StaminaConfig {
        StaminaConfig {
            drain_rate: self.stamina_drain_rate,
            min_sprint_stamina: self.min_sprint_stamina,
        }
    }

    /// Movement machine tuning.
    #[must_use]
    pub fn movement_config(&self) -> MovementConfig {
        MovementConfig {
            running_speed: self.running_speed,
            sprinting_speed: self.sprinting_speed,
        }
    }

    /// Combat controller tuning.
    #[must_use]
    pub fn combat_config(&self) -> CombatConfig {
        CombatConfig {
            interp_speed: self.interp_speed,
            attack_variants: self.attack_variants,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = CharacterConfig::default();
        assert_eq!(config.max_health, 100.0);
        assert_eq!(config.health, 65.0);
        assert_eq!(config.max_stamina, 150.0);
        assert_eq!(config.stamina, 120.0);
        assert_eq!(config.default_level, "SunTemple");
        assert_eq!(config.save_slot, "Default");
    }

    #[test]
    fn test_config_validation() {
        let mut config = CharacterConfig::default();
        config.health = 500.0;
        config.max_stamina = 0.0;
        config.sprinting_speed = 10.0;
        config.attack_variants = 0;
        config.save_slot = "  ".to_string();
        config.interp_speed = f32::NAN;

        config.validate();

        assert_eq!(config.health, 100.0);
        assert_eq!(config.max_stamina, 1.0);
        assert_eq!(config.stamina, 1.0);
        assert_eq!(config.sprinting_speed, config.running_speed);
        assert_eq!(config.attack_variants, 1);
        assert_eq!(config.save_slot, "Default");
        assert_eq!(config.interp_speed, 15.0);
    }

    #[test]
    fn test_config_save_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("nested").join(CONFIG_FILE);

        let mut config = CharacterConfig::default();
        config.running_speed = 600.0;
        config.default_level = "Dungeon".to_string();
        config.save_to(&path).expect("save should succeed");

        let loaded = CharacterConfig::load_from(&path);
        assert_eq!(loaded.running_speed, 600.0);
        assert_eq!(loaded.default_level, "Dungeon");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&path, "stamina_drain_rate = 40.0\n").expect("write should succeed");

        let loaded = CharacterConfig::try_load_from(&path).expect("load should succeed");
        assert_eq!(loaded.stamina_drain_rate, 40.0);
        assert_eq!(loaded.max_health, 100.0);
    }

    #[test]
    fn test_config_load_fallbacks() {
        let missing = CharacterConfig::load_from("/nonexistent/path/ember.toml");
        assert_eq!(missing, CharacterConfig::default());

        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&path, "health = \"lots\"").expect("write should succeed");
        assert!(matches!(
            CharacterConfig::try_load_from(&path),
            Err(ConfigError::Parse(_))
        ));
        assert_eq!(CharacterConfig::load_from(&path), CharacterConfig::default());
    }

    #[test]
    fn test_derived_configs() {
        let config = CharacterConfig::default();
        assert_eq!(config.stamina_config(), StaminaConfig::default());
        assert_eq!(config.movement_config(), MovementConfig::default());
        assert_eq!(config.combat_config(), CombatConfig::default());
        assert_eq!(config.initial_vitals(), VitalStats::default());
    }
}
