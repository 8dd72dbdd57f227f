//! Defensive unit behavior.
//!
//! Ground defenses are static turrets and obstacles. Airborne defenses
//! (drones) chase the nearest hostile once per second and strike whatever
//! shares their cell.

use rand_chacha::ChaCha8Rng;
use tracing::trace;

use relic_ai::targeting::nearest;
use relic_core::constants::AIRBORNE_DEFENSE_MOVE_INTERVAL_MS;
use relic_core::enums::{Locomotion, Side};
use relic_core::types::UnitId;

use crate::board::Board;
use crate::context::{ApplyContext, TickContext};
use crate::error::BehaviorError;

use super::{first_step, interval_elapsed, Behavior, TickPlan, Unit, UnitRole};

pub struct DefenseBehavior;

impl Behavior for DefenseBehavior {
    fn plan(
        &self,
        unit: &Unit,
        ctx: &TickContext<'_>,
        _rng: &mut ChaCha8Rng,
    ) -> Result<TickPlan, BehaviorError> {
        let Some(state) = unit.as_defense() else {
            return Ok(TickPlan::idle());
        };
        if !unit.locomotion().is_airborne()
            || !interval_elapsed(state.last_move_ms, ctx.now_ms, AIRBORNE_DEFENSE_MOVE_INTERVAL_MS)
        {
            return Ok(TickPlan::idle());
        }

        let origin = unit.position().ok_or(BehaviorError::Unplaced(unit.id()))?;
        let step = nearest(origin, &ctx.board.live_hostile_positions()).and_then(|target| {
            first_step(
                ctx.pathfinder
                    .find_path(ctx.board, origin, target, Locomotion::Airborne),
            )
        });
        Ok(TickPlan {
            move_due: true,
            step,
        })
    }

    fn apply(&self, id: UnitId, plan: TickPlan, ctx: &mut ApplyContext<'_>) {
        let now = ctx.now_ms;
        if plan.move_due {
            if let Some(step) = plan.step {
                ctx.board.move_unit(id, step);
            }
            if let Some(UnitRole::Defense(state)) = ctx.board.unit_mut(id).map(|u| &mut u.role) {
                state.last_move_ms = Some(now);
            }
        }

        let Some(unit) = ctx.board.unit(id) else {
            return;
        };
        if unit.damage() == 0 || !unit.attack_ready(now) {
            return;
        }
        let targets = select_targets(ctx.board, unit);
        if targets.is_empty() {
            return;
        }

        let attacker = unit.attacker_info();
        let mut records = Vec::with_capacity(targets.len());
        for target_id in targets {
            if let Some(target) = ctx.board.unit_mut(target_id) {
                let change = target.receive_damage(attacker.damage);
                records.push(attacker.record(Some(target_id), target.name(), change, now));
            }
        }

        if let Some(attacker) = ctx.board.unit_mut(id) {
            trace!(unit = %id, hits = records.len(), "defense attacked");
            attacker.core.last_attack_ms = Some(now);
            attacker.core.combat_log.extend(records);
        }
    }
}

/// Hostiles this defense can hit right now, up to its target limit.
///
/// Airborne defenses strike anything in their own cell. Ground defenses
/// strike ground hostiles within range, in spawn order.
pub fn select_targets(board: &Board, unit: &Unit) -> Vec<UnitId> {
    let (Some(state), Some(origin)) = (unit.as_defense(), unit.position()) else {
        return Vec::new();
    };
    let live_hostile = |u: &&Unit| u.side() == Side::Hostile && !u.is_destroyed();

    if unit.locomotion().is_airborne() {
        board
            .units_at(origin)
            .filter(live_hostile)
            .map(Unit::id)
            .take(state.max_targets)
            .collect()
    } else {
        let range = f64::from(state.range);
        board
            .hostiles()
            .filter(live_hostile)
            .filter(|u| !u.locomotion().is_airborne())
            .filter(|u| u.position().is_some_and(|p| origin.distance_to(&p) <= range))
            .map(Unit::id)
            .take(state.max_targets)
            .collect()
    }
}
