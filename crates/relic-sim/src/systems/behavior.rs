//! Behavior step: parallel planning, then sequential apply.
//!
//! Every live unit plans against a shared read-only `TickContext` on the
//! worker pool; `install` returns only once all plans are in, which is the
//! tick's barrier. Plans are then applied one at a time on the calling
//! thread in roster order (defenses, then hostiles), so board mutation never
//! races.

use std::panic::{self, AssertUnwindSafe};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use rayon::ThreadPool;
use tracing::warn;

use relic_core::types::UnitId;

use crate::board::Board;
use crate::context::{ApplyContext, TickContext};
use crate::pathfinding::Pathfinder;
use crate::relic::Relic;
use crate::unit::TickPlan;

/// Run one behavior step. Without a pool, planning runs sequentially.
pub fn run(
    board: &mut Board,
    relic: &Relic,
    pathfinder: &Pathfinder,
    pool: Option<&ThreadPool>,
    rng: &mut ChaCha8Rng,
    now_ms: u64,
) {
    let roster = build_roster(board, rng);
    if roster.is_empty() {
        return;
    }

    let ctx = TickContext {
        board: &*board,
        pathfinder,
        relic,
        now_ms,
    };
    let plans: Vec<(UnitId, TickPlan)> = match pool {
        Some(pool) => pool.install(|| {
            roster
                .par_iter()
                .map(|&(id, seed)| (id, plan_unit(&ctx, id, seed)))
                .collect()
        }),
        None => roster
            .iter()
            .map(|&(id, seed)| (id, plan_unit(&ctx, id, seed)))
            .collect(),
    };

    let mut ctx = ApplyContext {
        board,
        relic,
        now_ms,
    };
    for (id, plan) in plans {
        // Killed earlier in this pass.
        let behavior = match ctx.board.unit(id) {
            Some(unit) if !unit.is_destroyed() => unit.behavior(),
            _ => continue,
        };
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| behavior.apply(id, plan, &mut ctx)));
        if outcome.is_err() {
            warn!(unit = %id, "behavior apply panicked; continuing tick");
        }
    }
}

/// Live units in index order, each paired with its own RNG seed.
fn build_roster(board: &Board, rng: &mut ChaCha8Rng) -> Vec<(UnitId, u64)> {
    board
        .defense_ids()
        .iter()
        .chain(board.hostile_ids())
        .copied()
        .filter(|&id| board.unit(id).is_some_and(|u| !u.is_destroyed()))
        .map(|id| (id, rng.gen()))
        .collect()
}

fn plan_unit(ctx: &TickContext<'_>, id: UnitId, seed: u64) -> TickPlan {
    let Some(unit) = ctx.board.unit(id) else {
        return TickPlan::idle();
    };
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    match panic::catch_unwind(AssertUnwindSafe(|| unit.behavior().plan(unit, ctx, &mut rng))) {
        Ok(Ok(plan)) => plan,
        Ok(Err(err)) => {
            warn!(unit = %id, %err, "behavior plan failed; unit idles this tick");
            TickPlan::idle()
        }
        Err(_) => {
            warn!(unit = %id, "behavior plan panicked; unit idles this tick");
            TickPlan::idle()
        }
    }
}
