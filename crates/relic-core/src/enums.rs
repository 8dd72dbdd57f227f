//! Enumeration types used throughout the simulation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownTagError;

/// Ground vs. airborne. Decides collision and targeting eligibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locomotion {
    #[default]
    Ground,
    Airborne,
}

impl Locomotion {
    pub fn is_airborne(self) -> bool {
        self == Locomotion::Airborne
    }
}

/// Category tag carried by every unit template (`"type"` in configuration).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitCategory {
    /// Melee unit.
    #[default]
    Contact,
    /// Shoots at range.
    Ranged,
    /// Flying unit; the only airborne category.
    Aerial,
    Impact,
    /// Display tag only; target count comes from `maxTargets`.
    Multi,
    /// Pure obstacle.
    Block,
}

impl UnitCategory {
    pub fn locomotion(self) -> Locomotion {
        match self {
            UnitCategory::Aerial => Locomotion::Airborne,
            _ => Locomotion::Ground,
        }
    }
}

impl FromStr for UnitCategory {
    type Err = UnknownTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "contact" => Ok(UnitCategory::Contact),
            "ranged" => Ok(UnitCategory::Ranged),
            "aerial" => Ok(UnitCategory::Aerial),
            "impact" => Ok(UnitCategory::Impact),
            "multi" => Ok(UnitCategory::Multi),
            "block" => Ok(UnitCategory::Block),
            _ => Err(UnknownTagError::Category(s.to_string())),
        }
    }
}

/// Hostile targeting behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiBehavior {
    /// Head for the closest live defense, else the relic.
    #[default]
    SeekNearest,
    /// Occasionally pick a random defense, mostly the relic.
    Random,
    /// Always the relic; dies on its first hit.
    SuicideRush,
}

impl FromStr for AiBehavior {
    type Err = UnknownTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SEEK_NEAREST" | "SEEKNEAREST" => Ok(AiBehavior::SeekNearest),
            "RANDOM" => Ok(AiBehavior::Random),
            "CRASH" | "SUICIDE_RUSH" | "SUICIDERUSH" => Ok(AiBehavior::SuicideRush),
            _ => Err(UnknownTagError::AiBehavior(s.to_string())),
        }
    }
}

impl fmt::Display for AiBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            AiBehavior::SeekNearest => "SEEK_NEAREST",
            AiBehavior::Random => "RANDOM",
            AiBehavior::SuicideRush => "CRASH",
        };
        f.write_str(tag)
    }
}

/// Which side a unit fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Defense,
    Hostile,
}

/// Session lifecycle.
///
/// `Idle -> Running <-> Paused -> Stopped`. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    #[default]
    Idle,
    Running,
    Paused,
    Stopped,
}

impl SessionPhase {
    /// Running or paused.
    pub fn is_live(self) -> bool {
        matches!(self, SessionPhase::Running | SessionPhase::Paused)
    }
}

/// How a session ended, if it has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionOutcome {
    Won,
    Lost,
}
