//! Events emitted by the simulation for the UI collaborator.

use serde::{Deserialize, Serialize};

use crate::types::{Position, UnitId};

/// Session notifications, delivered synchronously from the tick thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    SessionStarted { new_game: bool },
    LevelStarted { level_index: usize, level_number: u32 },
    /// A wave was queued; spawning begins once its delay runs out.
    WaveStarted { wave_index: usize, hostile_id: String, quantity: u32 },
    LevelCompleted { level_index: usize, score_bonus: u32 },
    SessionWon { score: u32 },
    SessionLost { level_index: usize },
    Paused,
    Resumed,
    UnitSpawned { unit_id: UnitId, template_id: String, position: Position },
    DefensePlaced { unit_id: UnitId, template_id: String, position: Position },
    DefenseRemoved { unit_id: UnitId, refund: u32 },
    /// `start_level` was asked for a level past the end of the campaign.
    MaxLevelReached,
}
