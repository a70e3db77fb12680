use crate::core::constants::{SAVE_FILE_NAME, SAVE_VERSION_MAGIC};
use crate::core::game_state::SaveState;
use crate::items::types::{ItemId, Slot};
use crate::quests::types::QuestId;
use directories::ProjectDirs;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const HEADER_LEN: usize = 8 + 4;
const CHECKSUM_LEN: usize = 32;

/// Errors that can occur while reading or writing the save file.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid save file format")]
    InvalidFormat,

    #[error("Checksum verification failed")]
    ChecksumMismatch,
}

/// Result type for save operations.
pub type SaveResult<T> = Result<T, SaveError>;

/// Save layout written by the browser build (localStorage JSON).
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct LegacySave {
    level: i64,
    exp: i64,
    gold: i64,
    hp: i64,
    max_hp: i64,
    playtime: i64,
    inventory: Vec<String>,
    equipment: LegacyEquipment,
    quests: LegacyQuests,
    last_login: i64,
    current_map: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LegacyEquipment {
    weapon: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct LegacyQuests {
    slimes_killed: i64,
    completed: Vec<String>,
}

fn non_negative(value: i64) -> u64 {
    value.max(0) as u64
}

fn non_negative_u32(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}

/// Manages the single save file with a checksummed binary envelope.
pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Creates a SaveManager in the platform config directory
    /// (via the `directories` crate), creating the directory if needed.
    pub fn new() -> io::Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "epic-rpg").ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine config directory",
            )
        })?;

        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;

        Ok(Self {
            save_path: config_dir.join(SAVE_FILE_NAME),
        })
    }

    /// Uses an explicit file path. The parent directory must exist.
    pub fn with_path(save_path: impl Into<PathBuf>) -> Self {
        Self {
            save_path: save_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.save_path
    }

    /// Checks if a save file exists
    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }

    /// Saves the state to disk.
    ///
    /// File format:
    /// - Version magic (8 bytes)
    /// - Data length (4 bytes)
    /// - Serialized state (variable length)
    /// - SHA256 checksum over everything before it (32 bytes)
    pub fn save(&self, state: &SaveState) -> SaveResult<()> {
        let bytes = encode_envelope(state)?;
        fs::write(&self.save_path, bytes)?;
        tracing::debug!(path = %self.save_path.display(), "game saved");
        Ok(())
    }

    /// Loads the state, reporting why it could not be read.
    ///
    /// Accepts the checksummed envelope and, failing that, the browser
    /// build's JSON save, which is migrated.
    pub fn try_load(&self) -> SaveResult<SaveState> {
        let bytes = fs::read(&self.save_path)?;

        let mut state = match decode_envelope(&bytes) {
            Ok(state) => state,
            Err(SaveError::InvalidFormat) => migrate_legacy(&bytes)?,
            Err(e) => return Err(e),
        };
        state.clamp_invariants();
        Ok(state)
    }

    /// Loads the state, falling back to a fresh one on any failure.
    ///
    /// Never fails: a missing file is a first run, anything else is
    /// logged and replaced by defaults.
    pub fn load(&self, now_epoch_ms: i64) -> SaveState {
        match self.try_load() {
            Ok(state) => state,
            Err(SaveError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!("no save file found, starting a new game");
                SaveState::new(now_epoch_ms)
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.save_path.display(),
                    "could not read save, starting fresh: {}",
                    e
                );
                SaveState::new(now_epoch_ms)
            }
        }
    }
}

fn checksum(header: &[u8], data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(header);
    hasher.update(data);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// Serializes a state into the on-disk envelope.
pub fn encode_envelope(state: &SaveState) -> SaveResult<Vec<u8>> {
    let data = bincode::serialize(state).map_err(|e| SaveError::Serialization(e.to_string()))?;
    let data_len =
        u32::try_from(data.len()).map_err(|e| SaveError::Serialization(e.to_string()))?;

    let mut bytes = Vec::with_capacity(HEADER_LEN + data.len() + CHECKSUM_LEN);
    bytes.extend_from_slice(&SAVE_VERSION_MAGIC.to_le_bytes());
    bytes.extend_from_slice(&data_len.to_le_bytes());
    let sum = checksum(&bytes, &data);
    bytes.extend_from_slice(&data);
    bytes.extend_from_slice(&sum);
    Ok(bytes)
}

/// Parses the on-disk envelope. `InvalidFormat` means the bytes are not an
/// envelope at all (wrong magic or too short for a header).
pub fn decode_envelope(bytes: &[u8]) -> SaveResult<SaveState> {
    if bytes.len() < HEADER_LEN {
        return Err(SaveError::InvalidFormat);
    }
    let (header, rest) = bytes.split_at(HEADER_LEN);

    let mut magic = [0u8; 8];
    magic.copy_from_slice(&header[..8]);
    if u64::from_le_bytes(magic) != SAVE_VERSION_MAGIC {
        return Err(SaveError::InvalidFormat);
    }

    let mut len = [0u8; 4];
    len.copy_from_slice(&header[8..]);
    let data_len = u32::from_le_bytes(len) as usize;
    if rest.len() != data_len + CHECKSUM_LEN {
        return Err(SaveError::ChecksumMismatch);
    }

    let (data, stored) = rest.split_at(data_len);
    if checksum(header, data).as_slice() != stored {
        return Err(SaveError::ChecksumMismatch);
    }

    bincode::deserialize(data).map_err(|e| SaveError::Serialization(e.to_string()))
}

/// Converts a browser-build JSON save into the current state.
fn migrate_legacy(bytes: &[u8]) -> SaveResult<SaveState> {
    let legacy: LegacySave =
        serde_json::from_slice(bytes).map_err(|_| SaveError::InvalidFormat)?;

    let mut state = SaveState::new(legacy.last_login);
    state.level = non_negative_u32(legacy.level).max(1);
    state.exp = non_negative(legacy.exp);
    state.gold = non_negative(legacy.gold);
    if legacy.max_hp > 0 {
        state.max_hp = non_negative_u32(legacy.max_hp);
    }
    state.hp = non_negative_u32(legacy.hp).min(state.max_hp);
    state.playtime_seconds = non_negative(legacy.playtime);
    if !legacy.current_map.is_empty() {
        state.current_map_id = legacy.current_map;
    }

    state.inventory = legacy
        .inventory
        .iter()
        .filter_map(|key| ItemId::from_key(key))
        .collect();
    state.equipment.clear();
    if let Some(weapon) = legacy.equipment.weapon.as_deref().and_then(ItemId::from_key) {
        state.equipment.insert(Slot::Weapon, weapon);
    }

    if let Some(quest) = state.quests.get_mut(&QuestId::Slimes) {
        quest.progress = non_negative_u32(legacy.quests.slimes_killed).min(quest.target);
    }
    if legacy.quests.completed.iter().any(|q| q == QuestId::Slimes.name()) {
        state.completed_quest_ids.insert(QuestId::Slimes);
    }

    tracing::info!(level = state.level, "migrated browser save");
    Ok(state)
}
