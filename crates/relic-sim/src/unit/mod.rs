//! Units in play: shared record, side-specific state and per-tick behavior.
//!
//! A unit is a tagged variant over {defense, hostile}. Behavior runs in two
//! halves: `plan` on a worker thread against a read-only `TickContext`, then
//! `apply` on the tick thread with exclusive board access.

pub mod defense;
pub mod hostile;

#[cfg(test)]
pub(crate) mod test_support;

use rand_chacha::ChaCha8Rng;

use relic_core::combat::CombatRecord;
use relic_core::enums::{AiBehavior, Locomotion, Side, UnitCategory};
use relic_core::types::{Position, UnitId};

use crate::context::{ApplyContext, TickContext};
use crate::error::BehaviorError;

pub use defense::DefenseBehavior;
pub use hostile::HostileBehavior;

/// Movement decided during planning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickPlan {
    /// The move cadence fired; the move timestamp resets even without a step.
    pub move_due: bool,
    /// Next cell along the path.
    pub step: Option<Position>,
}

impl TickPlan {
    pub fn idle() -> Self {
        Self::default()
    }
}

/// Per-tick unit behavior.
pub trait Behavior: Sync {
    /// Decide this tick's movement. Must not mutate anything.
    fn plan(
        &self,
        unit: &Unit,
        ctx: &TickContext<'_>,
        rng: &mut ChaCha8Rng,
    ) -> Result<TickPlan, BehaviorError>;

    /// Carry out the plan and any attack against live state.
    fn apply(&self, id: UnitId, plan: TickPlan, ctx: &mut ApplyContext<'_>);
}

/// Identity, stats and runtime state common to both sides.
#[derive(Debug, Clone)]
pub struct UnitCore {
    pub id: UnitId,
    pub template_id: String,
    pub name: String,
    pub category: UnitCategory,
    pub locomotion: Locomotion,
    pub max_health: u32,
    pub health: u32,
    pub damage: u32,
    pub hits_per_second: f64,
    /// Army capacity consumed.
    pub space: u32,
    /// Boost multiplier baked into health and damage.
    pub boost: f64,
    pub position: Option<Position>,
    pub destroyed: bool,
    pub last_attack_ms: Option<u64>,
    pub combat_log: Vec<CombatRecord>,
}

#[derive(Debug, Clone)]
pub struct DefenseState {
    /// Euclidean attack range in cells.
    pub range: u32,
    pub max_targets: usize,
    pub cost: u32,
    /// Airborne defenses only.
    pub last_move_ms: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct HostileState {
    /// Cells per second.
    pub speed: f64,
    pub behavior: AiBehavior,
    pub last_move_ms: Option<u64>,
}

#[derive(Debug, Clone)]
pub enum UnitRole {
    Defense(DefenseState),
    Hostile(HostileState),
}

#[derive(Debug, Clone)]
pub struct Unit {
    pub core: UnitCore,
    pub role: UnitRole,
}

impl Unit {
    pub fn id(&self) -> UnitId {
        self.core.id
    }

    pub fn name(&self) -> &str {
        &self.core.name
    }

    pub fn template_id(&self) -> &str {
        &self.core.template_id
    }

    pub fn side(&self) -> Side {
        match self.role {
            UnitRole::Defense(_) => Side::Defense,
            UnitRole::Hostile(_) => Side::Hostile,
        }
    }

    pub fn locomotion(&self) -> Locomotion {
        self.core.locomotion
    }

    pub fn position(&self) -> Option<Position> {
        self.core.position
    }

    pub fn health(&self) -> u32 {
        self.core.health
    }

    pub fn max_health(&self) -> u32 {
        self.core.max_health
    }

    pub fn damage(&self) -> u32 {
        self.core.damage
    }

    pub fn is_destroyed(&self) -> bool {
        self.core.destroyed
    }

    pub fn combat_log(&self) -> &[CombatRecord] {
        &self.core.combat_log
    }

    pub fn as_defense(&self) -> Option<&DefenseState> {
        match &self.role {
            UnitRole::Defense(state) => Some(state),
            UnitRole::Hostile(_) => None,
        }
    }

    pub fn as_hostile(&self) -> Option<&HostileState> {
        match &self.role {
            UnitRole::Hostile(state) => Some(state),
            UnitRole::Defense(_) => None,
        }
    }

    /// Behavior implementation for this unit's side.
    pub fn behavior(&self) -> &'static dyn Behavior {
        match self.role {
            UnitRole::Defense(_) => &DefenseBehavior,
            UnitRole::Hostile(_) => &HostileBehavior,
        }
    }

    /// Lower health, flagging destruction at zero. Logs nothing; the
    /// attacker records the hit. Returns health before and after.
    pub fn receive_damage(&mut self, amount: u32) -> (u32, u32) {
        let before = self.core.health;
        self.core.health = before.saturating_sub(amount);
        if self.core.health == 0 {
            self.core.destroyed = true;
        }
        (before, self.core.health)
    }

    pub fn self_destruct(&mut self) {
        self.core.destroyed = true;
    }

    pub fn attack_ready(&self, now_ms: u64) -> bool {
        cadence_elapsed(self.core.last_attack_ms, now_ms, self.core.hits_per_second)
    }

    /// Identity used to record hits once the board is borrowed mutably.
    pub(crate) fn attacker_info(&self) -> AttackerInfo {
        AttackerInfo {
            id: self.core.id,
            name: self.core.name.clone(),
            damage: self.core.damage,
        }
    }
}

/// Attacker identity detached from the board borrow.
#[derive(Debug, Clone)]
pub(crate) struct AttackerInfo {
    pub id: UnitId,
    pub name: String,
    pub damage: u32,
}

impl AttackerInfo {
    pub fn record(
        &self,
        defender_id: Option<UnitId>,
        defender_name: &str,
        (health_before, health_after): (u32, u32),
        now_ms: u64,
    ) -> CombatRecord {
        CombatRecord {
            attacker_id: self.id,
            attacker_name: self.name.clone(),
            defender_id,
            defender_name: defender_name.to_string(),
            damage: self.damage,
            health_before,
            health_after,
            timestamp_ms: now_ms,
        }
    }
}

/// Whether `1000 / rate` ms passed since `last`. Never fires for a
/// non-positive rate; always fires before the first action.
pub fn cadence_elapsed(last: Option<u64>, now_ms: u64, rate_per_sec: f64) -> bool {
    if rate_per_sec <= 0.0 || !rate_per_sec.is_finite() {
        return false;
    }
    match last {
        None => true,
        Some(last) => now_ms.saturating_sub(last) as f64 >= 1000.0 / rate_per_sec,
    }
}

/// Fixed-interval variant of `cadence_elapsed`.
pub fn interval_elapsed(last: Option<u64>, now_ms: u64, interval_ms: u64) -> bool {
    match last {
        None => true,
        Some(last) => now_ms.saturating_sub(last) >= interval_ms,
    }
}

/// First step of a path, if it leaves the start cell.
pub(crate) fn first_step(path: Option<Vec<Position>>) -> Option<Position> {
    path.and_then(|p| p.get(1).copied())
}
