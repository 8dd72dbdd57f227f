//! Combat records produced by attacking units.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::UnitId;

/// One resolved hit. Appended to the attacker's log only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatRecord {
    pub attacker_id: UnitId,
    pub attacker_name: String,
    /// `None` when the relic was hit.
    pub defender_id: Option<UnitId>,
    pub defender_name: String,
    pub damage: u32,
    pub health_before: u32,
    pub health_after: u32,
    /// Simulation time of the hit (ms).
    pub timestamp_ms: u64,
}

impl CombatRecord {
    pub fn was_killed(&self) -> bool {
        self.health_before > 0 && self.health_after == 0
    }

    pub fn targets_relic(&self) -> bool {
        self.defender_id.is_none()
    }
}

impl fmt::Display for CombatRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:>7}ms] {} {} -> {}: {} dmg ({} -> {})",
            self.timestamp_ms,
            self.attacker_name,
            self.attacker_id,
            self.defender_name,
            self.damage,
            self.health_before,
            self.health_after,
        )?;
        if self.was_killed() {
            f.write_str(" KILLED")?;
        }
        Ok(())
    }
}
