//! Save snapshots and the slot stores they are written to.
//!
//! This module provides:
//! - The flat snapshot record persisted per slot
//! - Binary framing: magic bytes, schema version, bincode body
//! - In-memory and file-backed slot stores (atomic temp file + rename)

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use ahash::AHashMap;
use ember_common::{MagicBytes, SchemaVersion};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Slot used for continue and level transitions.
pub const DEFAULT_SLOT: &str = "Default";

/// Errors that can occur during save operations.
#[derive(Debug, Error)]
pub enum SaveError {
    /// Slot was never written.
    #[error("save slot not found: {0}")]
    NotFound(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Bytes do not start with the snapshot magic.
    #[error("invalid save format: {0}")]
    InvalidFormat(String),

    /// Written by an incompatible schema.
    #[error("save version mismatch: expected {expected}, found {found}")]
    VersionMismatch {
        /// Version this build reads.
        expected: SchemaVersion,
        /// Version found in the slot.
        found: SchemaVersion,
    },

    /// Framing is right but the body does not decode.
    #[error("corrupted save: {0}")]
    Corrupted(String),

    /// Slot name cannot be used as a file name.
    #[error("invalid slot name: {0}")]
    InvalidSlotName(String),
}

/// Result type for save operations.
pub type SaveResult<T> = Result<T, SaveError>;

// ============================================================================
// Snapshot
// ============================================================================

/// Everything a save slot holds. Written whole, read whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveSnapshot {
    /// Current health.
    pub health: f32,
    /// Maximum health.
    pub max_health: f32,
    /// Current stamina.
    pub stamina: f32,
    /// Maximum stamina.
    pub max_stamina: f32,
    /// Coins carried.
    pub coins: u32,
    /// Level the character was in.
    pub level: String,
    /// Name of the equipped weapon, empty when unarmed.
    pub weapon: String,
    /// World position.
    pub position: (f32, f32, f32),
    /// Pitch, yaw, roll in degrees.
    pub rotation: (f32, f32, f32),
}

impl SaveSnapshot {
    /// Frame and encode for storage.
    pub fn encode(&self) -> SaveResult<Vec<u8>> {
        let mut bytes = MagicBytes::SNAPSHOT.0.to_vec();
        bincode::serialize_into(&mut bytes, &SchemaVersion::SNAPSHOT)
            .map_err(|e| SaveError::Serialization(e.to_string()))?;
        bincode::serialize_into(&mut bytes, self)
            .map_err(|e| SaveError::Serialization(e.to_string()))?;
        Ok(bytes)
    }

    /// Decode framed bytes.
    pub fn decode(bytes: &[u8]) -> SaveResult<Self> {
        let magic = MagicBytes::SNAPSHOT;
        if !magic.matches(bytes) {
            return Err(SaveError::InvalidFormat("missing snapshot magic".to_string()));
        }

        let mut body = &bytes[magic.0.len()..];
        let found: SchemaVersion = bincode::deserialize_from(&mut body)
            .map_err(|e| SaveError::Corrupted(e.to_string()))?;
        if !SchemaVersion::SNAPSHOT.can_read(&found) {
            return Err(SaveError::VersionMismatch {
                expected: SchemaVersion::SNAPSHOT,
                found,
            });
        }

        bincode::deserialize_from(&mut body).map_err(|e| SaveError::Corrupted(e.to_string()))
    }
}

// ============================================================================
// Slot Stores
// ============================================================================

/// Named byte slots.
pub trait SlotStore {
    /// Replace a slot's contents.
    fn write(&mut self, slot: &str, bytes: &[u8]) -> SaveResult<()>;

    /// Read a slot. `NotFound` if it was never written.
    fn read(&self, slot: &str) -> SaveResult<Vec<u8>>;

    /// Check if a slot has been written.
    fn contains(&self, slot: &str) -> bool;

    /// Remove a slot. `NotFound` if it was never written.
    fn delete(&mut self, slot: &str) -> SaveResult<()>;

    /// Encode and write a snapshot.
    fn save_snapshot(&mut self, slot: &str, snapshot: &SaveSnapshot) -> SaveResult<()> {
        let bytes = snapshot.encode()?;
        self.write(slot, &bytes)
    }

    /// Read and decode a snapshot.
    fn load_snapshot(&self, slot: &str) -> SaveResult<SaveSnapshot> {
        SaveSnapshot::decode(&self.read(slot)?)
    }
}

/// Slots kept in memory. Lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemorySlotStore {
    slots: AHashMap<String, Vec<u8>>,
}

impl MemorySlotStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of written slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if no slot has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl SlotStore for MemorySlotStore {
    fn write(&mut self, slot: &str, bytes: &[u8]) -> SaveResult<()> {
        self.slots.insert(slot.to_string(), bytes.to_vec());
        Ok(())
    }

    fn read(&self, slot: &str) -> SaveResult<Vec<u8>> {
        self.slots
            .get(slot)
            .cloned()
            .ok_or_else(|| SaveError::NotFound(slot.to_string()))
    }

    fn contains(&self, slot: &str) -> bool {
        self.slots.contains_key(slot)
    }

    fn delete(&mut self, slot: &str) -> SaveResult<()> {
        self.slots
            .remove(slot)
            .map(|_| ())
            .ok_or_else(|| SaveError::NotFound(slot.to_string()))
    }
}

/// Slots stored as `<slot>.sav` files in a directory.
#[derive(Debug, Clone)]
pub struct FileSlotStore {
    dir: PathBuf,
}

impl FileSlotStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Directory holding the slots.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.sav"))
    }

    fn temp_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.tmp"))
    }

    fn validate_slot_name(slot: &str) -> SaveResult<()> {
        if slot.is_empty() {
            return Err(SaveError::InvalidSlotName("empty slot name".to_string()));
        }

        let invalid_chars = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];
        if let Some(c) = slot.chars().find(|c| invalid_chars.contains(c)) {
            return Err(SaveError::InvalidSlotName(format!(
                "invalid character '{c}' in slot name"
            )));
        }
        if slot.starts_with('.') {
            return Err(SaveError::InvalidSlotName(format!("hidden slot name '{slot}'")));
        }

        Ok(())
    }
}

impl SlotStore for FileSlotStore {
    fn write(&mut self, slot: &str, bytes: &[u8]) -> SaveResult<()> {
        Self::validate_slot_name(slot)?;
        fs::create_dir_all(&self.dir)?;

        let temp_path = self.temp_path(slot);
        let final_path = self.slot_path(slot);
        {
            let mut writer = BufWriter::new(File::create(&temp_path)?);
            writer.write_all(bytes)?;
            writer.flush()?;
        }

        if let Err(e) = fs::rename(&temp_path, &final_path) {
            if let Err(cleanup) = fs::remove_file(&temp_path) {
                debug!(%cleanup, "failed to remove temp save file");
            }
            return Err(SaveError::Io(e));
        }

        info!(slot, path = %final_path.display(), "saved slot");
        Ok(())
    }

    fn read(&self, slot: &str) -> SaveResult<Vec<u8>> {
        Self::validate_slot_name(slot)?;
        let path = self.slot_path(slot);
        if !path.exists() {
            return Err(SaveError::NotFound(slot.to_string()));
        }
        Ok(fs::read(path)?)
    }

    fn contains(&self, slot: &str) -> bool {
        Self::validate_slot_name(slot).is_ok() && self.slot_path(slot).exists()
    }

    fn delete(&mut self, slot: &str) -> SaveResult<()> {
        Self::validate_slot_name(slot)?;
        let path = self.slot_path(slot);
        if !path.exists() {
            return Err(SaveError::NotFound(slot.to_string()));
        }
        fs::remove_file(path)?;
        debug!(slot, "deleted slot");
        Ok(())
    }
}
