//! Persisted session snapshot.
//!
//! Only what is needed to rebuild simulation state: scalars for the player,
//! level and relic, plus every unit still on the board. Pathfinder, config
//! and worker pool are rebuilt fresh on restore.

use serde::{Deserialize, Serialize};

use crate::types::Position;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    pub slot_name: String,
    /// Unix seconds at save time.
    pub timestamp: u64,
    pub player_name: String,
    pub player_level: u32,
    pub player_coins: u32,
    pub player_score: u32,
    pub player_capacity_base: u32,
    pub current_level_index: usize,
    pub relic_health: u32,
    pub units: Vec<SavedUnit>,
    /// Boosts already baked into saved health values; kept for units
    /// created after restore.
    #[serde(default)]
    pub defense_boost: f64,
    #[serde(default)]
    pub enemy_boost: f64,
    /// Absent in older saves: the current level's first wave counts as drained.
    #[serde(default)]
    pub wave: Option<SavedWave>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedUnit {
    pub template_id: String,
    pub position: Position,
    pub current_health: u32,
    pub max_health: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedWave {
    pub index: usize,
    pub spawned: u32,
    pub delay_remaining_ms: u64,
}

/// Lightweight metadata for listing saves without keeping full state around.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveMetadata {
    pub slot_name: String,
    pub player_name: String,
    pub level_index: usize,
    pub score: u32,
    pub timestamp: u64,
}

impl SaveData {
    pub fn metadata(&self) -> SaveMetadata {
        SaveMetadata {
            slot_name: self.slot_name.clone(),
            player_name: self.player_name.clone(),
            level_index: self.current_level_index,
            score: self.player_score,
            timestamp: self.timestamp,
        }
    }
}
