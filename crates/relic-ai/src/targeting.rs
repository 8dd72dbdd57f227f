//! Destination selection.
//!
//! Both hostiles and airborne defenses retarget on their move cadence; this
//! module decides where they head. Path search happens in the simulation crate.

use rand::Rng;

use relic_core::enums::AiBehavior;
use relic_core::types::Position;

use crate::profiles::get_profile;

/// Input to destination selection for a single hostile.
pub struct TargetingContext<'a> {
    pub behavior: AiBehavior,
    pub origin: Position,
    /// Positions of live defensive units, in board index order.
    pub defenders: &'a [Position],
    pub relic: Position,
}

/// Closest candidate by straight-line distance. Ties go to the earliest.
pub fn nearest(origin: Position, candidates: &[Position]) -> Option<Position> {
    let mut best: Option<(Position, f64)> = None;
    for &candidate in candidates {
        let distance = origin.distance_to(&candidate);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((candidate, distance)),
        }
    }
    best.map(|(position, _)| position)
}

/// Pick the cell a hostile heads for this tick.
pub fn choose_destination<R: Rng + ?Sized>(ctx: &TargetingContext<'_>, rng: &mut R) -> Position {
    let profile = get_profile(ctx.behavior);
    if profile.relic_only || ctx.defenders.is_empty() {
        return ctx.relic;
    }

    match ctx.behavior {
        AiBehavior::SeekNearest => nearest(ctx.origin, ctx.defenders).unwrap_or(ctx.relic),
        AiBehavior::Random => {
            if rng.gen::<f64>() < profile.defender_chance {
                ctx.defenders[rng.gen_range(0..ctx.defenders.len())]
            } else {
                ctx.relic
            }
        }
        AiBehavior::SuicideRush => ctx.relic,
    }
}
