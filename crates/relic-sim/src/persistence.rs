//! Save slots on disk: one pretty-printed JSON file per slot.

use std::fs;
use std::path::{Path, PathBuf};

use relic_core::save::{SaveData, SaveMetadata};

use crate::error::PersistenceError;

fn save_path(dir: &Path, slot: &str) -> Result<PathBuf, PersistenceError> {
    validate_slot(slot)?;
    Ok(dir.join(format!("{slot}.json")))
}

/// Slot names become file names, so no separators and nothing hidden.
fn validate_slot(slot: &str) -> Result<(), PersistenceError> {
    let bad = slot.trim().is_empty()
        || slot.starts_with('.')
        || slot.contains(['/', '\\'])
        || slot.contains("..");
    if bad {
        return Err(PersistenceError::InvalidSlot(slot.to_string()));
    }
    Ok(())
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> PersistenceError + '_ {
    move |source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    }
}

pub fn save_to_file(dir: &Path, slot: &str, data: &SaveData) -> Result<(), PersistenceError> {
    let path = save_path(dir, slot)?;
    if data.player_name.trim().is_empty() {
        return Err(PersistenceError::InvalidData("player name is empty".into()));
    }
    fs::create_dir_all(dir).map_err(io_error(dir))?;
    let json = serde_json::to_string_pretty(data)?;
    fs::write(&path, json).map_err(io_error(&path))?;
    Ok(())
}

pub fn load_from_file(dir: &Path, slot: &str) -> Result<SaveData, PersistenceError> {
    let path = save_path(dir, slot)?;
    if !path.exists() {
        return Err(PersistenceError::MissingSlot(slot.to_string()));
    }
    let json = fs::read_to_string(&path).map_err(io_error(&path))?;
    let data: SaveData = serde_json::from_str(&json)?;
    if data.player_name.trim().is_empty() {
        return Err(PersistenceError::InvalidData("player name is empty".into()));
    }
    Ok(data)
}

/// Every readable save in `dir`, newest first. Unreadable files are skipped.
pub fn list_saves(dir: &Path) -> Vec<SaveMetadata> {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return Vec::new(),
    };

    let mut saves = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.extension().is_some_and(|ext| ext == "json") {
            continue;
        }
        let Ok(json) = fs::read_to_string(&path) else {
            continue;
        };
        if let Ok(data) = serde_json::from_str::<SaveData>(&json) {
            saves.push(data.metadata());
        }
    }
    saves.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    saves
}

/// Removing a slot that does not exist is not an error.
pub fn delete_save(dir: &Path, slot: &str) -> Result<(), PersistenceError> {
    let path = save_path(dir, slot)?;
    if path.exists() {
        fs::remove_file(&path).map_err(io_error(&path))?;
    }
    Ok(())
}
