//! Session snapshot: the complete visible state handed to the UI.

use serde::{Deserialize, Serialize};

use crate::enums::{Locomotion, SessionPhase, Side};
use crate::types::{Position, SimTime, UnitId};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub time: SimTime,
    pub phase: SessionPhase,
    pub level_index: usize,
    pub level_number: u32,
    pub level_complete: bool,
    pub wave: WaveView,
    pub relic: RelicView,
    pub player: PlayerView,
    pub units: Vec<UnitView>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    pub index: usize,
    pub total_waves: usize,
    pub to_spawn: u32,
    pub spawned: u32,
    pub delay_remaining_ms: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelicView {
    pub position: Position,
    pub health: u32,
    pub max_health: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub name: String,
    pub level: u32,
    pub coins: u32,
    pub score: u32,
    pub used_space: u32,
    pub max_capacity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitView {
    pub id: UnitId,
    pub template_id: String,
    pub name: String,
    pub side: Side,
    pub locomotion: Locomotion,
    pub position: Position,
    pub health: u32,
    pub max_health: u32,
}
