//! Weapon catalog and the character's loadout.
//!
//! This module provides:
//! - Weapon definitions loaded from TOML
//! - A catalog keyed by weapon name, the identifier snapshots persist
//! - The loadout tracking which weapon is in hand

use std::fs;
use std::path::{Path, PathBuf};

use ahash::AHashMap;
use ember_common::SchemaVersion;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::error::{GameplayError, GameplayResult};

/// Errors that can occur while loading a weapon catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file does not exist.
    #[error("weapon catalog not found: {0}")]
    NotFound(PathBuf),

    /// Failed to read the file.
    #[error("failed to read weapon catalog: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse TOML.
    #[error("failed to parse weapon catalog: {0}")]
    Parse(#[from] toml::de::Error),

    /// A definition failed validation.
    #[error("invalid weapon definition: {0}")]
    Validation(String),

    /// Two definitions share a name.
    #[error("duplicate weapon name: {0}")]
    Duplicate(String),
}

/// Result type for catalog loading.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// A weapon definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    /// Unique name, persisted in snapshots.
    pub name: String,
    /// Damage per hit.
    pub damage: f32,
    /// Description shown on pickup.
    #[serde(default)]
    pub description: String,
}

impl Weapon {
    /// Create a weapon.
    #[must_use]
    pub fn new(name: impl Into<String>, damage: f32) -> Self {
        Self {
            name: name.into(),
            damage,
            description: String::new(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Check the definition is usable.
    pub fn validate(&self) -> CatalogResult<()> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::Validation("weapon has an empty name".to_string()));
        }
        if !self.damage.is_finite() || self.damage < 0.0 {
            return Err(CatalogError::Validation(format!(
                "weapon '{}' has invalid damage: {}",
                self.name, self.damage
            )));
        }
        Ok(())
    }
}

/// On-disk layout of a catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default = "default_version")]
    version: String,
    #[serde(default)]
    weapons: Vec<Weapon>,
}

fn default_version() -> String {
    SchemaVersion::WEAPON_CATALOG.to_string()
}

/// Name → weapon lookup.
#[derive(Debug, Clone, Default)]
pub struct WeaponCatalog {
    by_name: AHashMap<String, Weapon>,
}

impl WeaponCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from TOML text.
    pub fn from_toml_str(text: &str) -> CatalogResult<Self> {
        let file: CatalogFile = toml::from_str(text)?;
        if file.version != SchemaVersion::WEAPON_CATALOG.to_string() {
            warn!(version = %file.version, "weapon catalog version differs, loading anyway");
        }

        let mut catalog = Self::new();
        for weapon in file.weapons {
            catalog.register(weapon)?;
        }
        Ok(catalog)
    }

    /// Load a catalog from a TOML file.
    pub fn load_from(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CatalogError::NotFound(path.to_path_buf()));
        }

        let text = fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&text)?;
        info!(path = %path.display(), weapons = catalog.len(), "loaded weapon catalog");
        Ok(catalog)
    }

    /// Add a weapon definition.
    pub fn register(&mut self, weapon: Weapon) -> CatalogResult<()> {
        weapon.validate()?;
        if self.by_name.contains_key(&weapon.name) {
            return Err(CatalogError::Duplicate(weapon.name));
        }
        debug!(name = %weapon.name, damage = weapon.damage, "registered weapon");
        self.by_name.insert(weapon.name.clone(), weapon);
        Ok(())
    }

    /// Add a weapon definition, builder style.
    pub fn with_weapon(mut self, weapon: Weapon) -> CatalogResult<Self> {
        self.register(weapon)?;
        Ok(self)
    }

    /// Look up a weapon by exact name.
    pub fn lookup(&self, name: &str) -> GameplayResult<&Weapon> {
        self.by_name
            .get(name)
            .ok_or_else(|| GameplayError::InvalidWeaponId(name.to_string()))
    }

    /// Check if a name is known.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Number of weapons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Iterate over all weapons in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Weapon> {
        self.by_name.values()
    }
}

/// The weapon currently in hand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Loadout {
    equipped: Option<Weapon>,
}

impl Loadout {
    /// Empty-handed loadout.
    #[must_use]
    pub fn unarmed() -> Self {
        Self::default()
    }

    /// Put a weapon in hand, returning whatever was held before.
    pub fn equip(&mut self, weapon: Weapon) -> Option<Weapon> {
        debug!(name = %weapon.name, "weapon equipped");
        self.equipped.replace(weapon)
    }

    /// Drop the weapon in hand.
    pub fn unequip(&mut self) -> Option<Weapon> {
        self.equipped.take()
    }

    /// Weapon in hand.
    #[must_use]
    pub fn equipped(&self) -> Option<&Weapon> {
        self.equipped.as_ref()
    }

    /// Name of the weapon in hand, or an empty string when unarmed.
    #[must_use]
    pub fn equipped_name(&self) -> &str {
        self.equipped.as_ref().map_or("", |weapon| weapon.name.as_str())
    }

    /// Check if a weapon is in hand.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.equipped.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CATALOG: &str = r#"
version = "1.0.0"

[[weapons]]
name = "Sword"
damage = 25.0
description = "A plain blade"

[[weapons]]
name = "Mace"
damage = 40.0
"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = WeaponCatalog::from_toml_str(CATALOG).expect("catalog should parse");
        assert_eq!(catalog.len(), 2);
        let mace = catalog.lookup("Mace").expect("mace should exist");
        assert_eq!(mace.damage, 40.0);
        assert!(mace.description.is_empty());
    }

    #[test]
    fn test_lookup_unknown_name() {
        let catalog = WeaponCatalog::from_toml_str(CATALOG).expect("catalog should parse");
        assert_eq!(
            catalog.lookup("Halberd"),
            Err(GameplayError::InvalidWeaponId("Halberd".to_string()))
        );
        // Names are exact.
        assert!(!catalog.contains("sword"));
    }

    #[test]
    fn test_duplicate_rejected() {
        let result = WeaponCatalog::new()
            .with_weapon(Weapon::new("Sword", 10.0))
            .and_then(|c| c.with_weapon(Weapon::new("Sword", 12.0)));
        assert!(matches!(result, Err(CatalogError::Duplicate(name)) if name == "Sword"));
    }

    #[test]
    fn test_invalid_definitions() {
        assert!(Weapon::new("", 10.0).validate().is_err());
        assert!(Weapon::new("Broken", -1.0).validate().is_err());
        assert!(Weapon::new("Odd", f32::NAN).validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().expect("tempdir should succeed");
        let path = temp.path().join("weapons.toml");
        fs::write(&path, CATALOG).expect("write should succeed");

        let catalog = WeaponCatalog::load_from(&path).expect("load should succeed");
        assert!(catalog.contains("Sword"));

        let missing = WeaponCatalog::load_from(temp.path().join("none.toml"));
        assert!(matches!(missing, Err(CatalogError::NotFound(_))));
    }

    #[test]
    fn test_loadout_equip_swap() {
        let mut loadout = Loadout::unarmed();
        assert!(!loadout.is_armed());
        assert_eq!(loadout.equipped_name(), "");

        assert_eq!(loadout.equip(Weapon::new("Sword", 25.0)), None);
        let previous = loadout.equip(Weapon::new("Mace", 40.0));
        assert_eq!(previous.map(|w| w.name), Some("Sword".to_string()));
        assert_eq!(loadout.equipped_name(), "Mace");

        assert!(loadout.unequip().is_some());
        assert!(!loadout.is_armed());
    }
}
