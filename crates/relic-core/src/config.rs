//! Static game configuration: unit templates and level schedules.
//!
//! Read once from JSON (camelCase keys) and handed to the engine by value.
//! Nothing here is mutated during a session.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::enums::{AiBehavior, UnitCategory};
use crate::error::{ConfigError, UnknownTagError};

fn default_rate() -> f64 {
    1.0
}

fn default_max_targets() -> usize {
    1
}

/// Purchasable defensive unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefenseTemplate {
    pub id: String,
    pub name: String,
    /// Category tag; `"Aerial"` makes the unit airborne.
    #[serde(rename = "type")]
    pub category: String,
    pub base_health: u32,
    pub base_damage: u32,
    /// Attack range in cells (Euclidean).
    #[serde(default)]
    pub range: u32,
    pub cost: u32,
    /// Army capacity consumed.
    #[serde(rename = "fields", alias = "space")]
    pub space: u32,
    #[serde(default = "default_unlock_level")]
    pub unlock_level: u32,
    #[serde(default = "default_rate")]
    pub hits_per_second: f64,
    #[serde(default = "default_max_targets")]
    pub max_targets: usize,
}

/// Hostile unit spawned by waves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostileTemplate {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub category: String,
    /// AI tag: `SEEK_NEAREST`, `RANDOM` or `CRASH`.
    #[serde(rename = "aiType", default)]
    pub ai_behavior: String,
    pub base_health: u32,
    pub base_damage: u32,
    /// Cells per second.
    pub speed: f64,
    #[serde(default)]
    pub cost: u32,
    #[serde(rename = "fields", alias = "space", default = "default_space")]
    pub space: u32,
    #[serde(default = "default_unlock_level")]
    pub unlock_level: u32,
    #[serde(default = "default_rate")]
    pub hits_per_second: f64,
}

fn default_unlock_level() -> u32 {
    1
}

fn default_space() -> u32 {
    1
}

impl DefenseTemplate {
    pub fn parsed_category(&self) -> Result<UnitCategory, UnknownTagError> {
        self.category.parse()
    }
}

impl HostileTemplate {
    pub fn parsed_category(&self) -> Result<UnitCategory, UnknownTagError> {
        self.category.parse()
    }

    pub fn parsed_behavior(&self) -> Result<AiBehavior, UnknownTagError> {
        self.ai_behavior.parse()
    }
}

/// One wave of a level: `quantity` hostiles of one template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaveTemplate {
    #[serde(rename = "zombieId", alias = "hostileId")]
    pub hostile_id: String,
    pub quantity: u32,
    /// Pause before the wave starts spawning.
    #[serde(default)]
    pub delay_seconds: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelTemplate {
    pub level_number: u32,
    /// Army capacity granted at level start.
    #[serde(rename = "playerArmySize")]
    pub army_size: u32,
    pub starting_money: u32,
    #[serde(rename = "enemyWaves", default)]
    pub waves: Vec<WaveTemplate>,
    #[serde(default)]
    pub defense_boost_percent: f64,
    #[serde(default)]
    pub enemy_boost_percent: f64,
}

/// Complete game configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub defenses: Vec<DefenseTemplate>,
    #[serde(rename = "enemies", default)]
    pub hostiles: Vec<HostileTemplate>,
    #[serde(default)]
    pub levels: Vec<LevelTemplate>,
}

impl GameConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// All three template lists must be non-empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.defenses.is_empty() {
            return Err(ConfigError::NoDefenses);
        }
        if self.hostiles.is_empty() {
            return Err(ConfigError::NoHostiles);
        }
        if self.levels.is_empty() {
            return Err(ConfigError::NoLevels);
        }
        Ok(())
    }

    pub fn defense(&self, id: &str) -> Option<&DefenseTemplate> {
        self.defenses.iter().find(|d| d.id == id)
    }

    pub fn hostile(&self, id: &str) -> Option<&HostileTemplate> {
        self.hostiles.iter().find(|h| h.id == id)
    }

    pub fn level(&self, index: usize) -> Option<&LevelTemplate> {
        self.levels.get(index)
    }

    /// Defenses a player may buy once they reach `level_number`.
    pub fn defenses_unlocked_at(&self, level_number: u32) -> impl Iterator<Item = &DefenseTemplate> {
        self.defenses
            .iter()
            .filter(move |d| d.unlock_level <= level_number)
    }

    /// The built-in ten-level campaign.
    pub fn default_campaign() -> Self {
        Self {
            defenses: vec![
                defense("barbed_wire", "Barbed Wire", "Block", 300, 0, 0, 25, 1, 1),
                defense("wall", "Wall", "Block", 600, 0, 0, 40, 2, 1),
                defense("turret", "Turret", "Ranged", 200, 30, 3, 50, 1, 1),
                defense("turret_medium", "Medium Turret", "Ranged", 250, 45, 4, 75, 1, 3),
                defense("drone", "Drone", "Aerial", 100, 25, 0, 50, 1, 2),
            ],
            hostiles: vec![
                hostile("zombie_basic", "Zombie", "Contact", "SEEK_NEAREST", 120, 15, 0.5, 1),
                hostile("zombie_runner", "Runner", "Contact", "RANDOM", 80, 10, 1.2, 3),
                hostile("zombie_flyer", "Flyer", "Aerial", "CRASH", 60, 20, 1.5, 5),
            ],
            levels: (1..=10).map(campaign_level).collect(),
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn defense(
    id: &str,
    name: &str,
    category: &str,
    base_health: u32,
    base_damage: u32,
    range: u32,
    cost: u32,
    space: u32,
    unlock_level: u32,
) -> DefenseTemplate {
    DefenseTemplate {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        base_health,
        base_damage,
        range,
        cost,
        space,
        unlock_level,
        hits_per_second: default_rate(),
        max_targets: default_max_targets(),
    }
}

#[allow(clippy::too_many_arguments)]
fn hostile(
    id: &str,
    name: &str,
    category: &str,
    ai: &str,
    base_health: u32,
    base_damage: u32,
    speed: f64,
    unlock_level: u32,
) -> HostileTemplate {
    HostileTemplate {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        ai_behavior: ai.to_string(),
        base_health,
        base_damage,
        speed,
        cost: 0,
        space: 1,
        unlock_level,
        hits_per_second: default_rate(),
    }
}

fn wave(hostile_id: &str, quantity: u32, delay_seconds: u32) -> WaveTemplate {
    WaveTemplate {
        hostile_id: hostile_id.to_string(),
        quantity,
        delay_seconds,
    }
}

/// Level `n` (1-based) of the built-in campaign. Later levels layer in
/// runners, flyers and a closing basic wave.
fn campaign_level(n: u32) -> LevelTemplate {
    let mut waves = vec![wave("zombie_basic", 8 + 3 * n, 0)];
    if n >= 3 {
        waves.push(wave("zombie_runner", 4 + 2 * (n - 2), 20));
    }
    if n >= 5 {
        waves.push(wave("zombie_flyer", 2 + (n - 4), 35));
    }
    if n >= 7 {
        waves.push(wave("zombie_basic", 10 + 2 * (n - 6), 50));
    }

    LevelTemplate {
        level_number: n,
        army_size: 20 + 5 * (n - 1),
        starting_money: 500 + 150 * n,
        waves,
        defense_boost_percent: f64::from(3 * (n - 1)),
        enemy_boost_percent: f64::from(4 * (n - 1)),
    }
}
