//! Hostile unit behavior.
//!
//! Move on a speed-derived cadence toward the destination picked by the AI
//! tag, then attack at most once: the relic when standing on it, otherwise
//! the first reachable defense or the relic among the orthogonal neighbors.

use rand_chacha::ChaCha8Rng;
use tracing::trace;

use relic_ai::profiles::get_profile;
use relic_ai::targeting::{choose_destination, TargetingContext};
use relic_core::constants::RELIC_NAME;
use relic_core::types::{Position, UnitId};

use crate::board::Board;
use crate::context::{ApplyContext, TickContext};
use crate::error::BehaviorError;

use super::{cadence_elapsed, first_step, Behavior, TickPlan, Unit, UnitRole};

pub struct HostileBehavior;

/// What a hostile hit this tick.
enum Strike {
    Relic,
    Defense(UnitId),
}

impl Behavior for HostileBehavior {
    fn plan(
        &self,
        unit: &Unit,
        ctx: &TickContext<'_>,
        rng: &mut ChaCha8Rng,
    ) -> Result<TickPlan, BehaviorError> {
        let Some(state) = unit.as_hostile() else {
            return Ok(TickPlan::idle());
        };
        if !cadence_elapsed(state.last_move_ms, ctx.now_ms, state.speed) {
            return Ok(TickPlan::idle());
        }

        let origin = unit.position().ok_or(BehaviorError::Unplaced(unit.id()))?;
        let relic = ctx.relic_position();
        let defenders = ctx.board.live_defense_positions();
        let destination = choose_destination(
            &TargetingContext {
                behavior: state.behavior,
                origin,
                defenders: &defenders,
                relic,
            },
            rng,
        );

        let profile = get_profile(state.behavior);
        let step = first_step(
            ctx.pathfinder
                .find_path(ctx.board, origin, destination, unit.locomotion()),
        )
        .filter(|&next| !(profile.holds_short_of_relic && next == relic));

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
            if let Some(UnitRole::Hostile(state)) = ctx.board.unit_mut(id).map(|u| &mut u.role) {
                state.last_move_ms = Some(now);
            }
        }

        let Some(unit) = ctx.board.unit(id) else {
            return;
        };
        if !unit.attack_ready(now) {
            return;
        }
        let Some(position) = unit.position() else {
            return;
        };
        let suicidal = unit
            .as_hostile()
            .is_some_and(|s| get_profile(s.behavior).self_destructs_on_hit);

        let attacker = unit.attacker_info();
        let strike = pick_strike(ctx.board, ctx.relic.position(), unit, position);
        let record = match strike {
            Some(Strike::Relic) => {
                let change = ctx.relic.damage(attacker.damage);
                Some(attacker.record(None, RELIC_NAME, change, now))
            }
            Some(Strike::Defense(target_id)) => ctx.board.unit_mut(target_id).map(|target| {
                let change = target.receive_damage(attacker.damage);
                attacker.record(Some(target_id), target.name(), change, now)
            }),
            None => None,
        };

        if let Some(attacker) = ctx.board.unit_mut(id) {
            attacker.core.last_attack_ms = Some(now);
            if let Some(record) = record {
                trace!(unit = %id, target = %record.defender_name, "hostile attacked");
                attacker.core.combat_log.push(record);
                if suicidal {
                    attacker.self_destruct();
                }
            }
        }
    }
}

fn pick_strike(board: &Board, relic: Position, unit: &Unit, position: Position) -> Option<Strike> {
    if position == relic {
        return Some(Strike::Relic);
    }
    for neighbor in board.neighbors(position) {
        if let Some(defense) = board.live_defense_at(neighbor) {
            if !unit.locomotion().is_airborne() && defense.locomotion().is_airborne() {
                continue;
            }
            return Some(Strike::Defense(defense.id()));
        }
        if neighbor == relic {
            return Some(Strike::Relic);
        }
    }
    None
}
