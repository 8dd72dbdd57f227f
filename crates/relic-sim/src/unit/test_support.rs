//! Hand-built units for board and behavior tests.

use relic_core::enums::{AiBehavior, Locomotion, UnitCategory};
use relic_core::types::UnitId;

use super::{DefenseState, HostileState, Unit, UnitCore, UnitRole};

fn core(id: u64, name: &str, category: UnitCategory, health: u32, damage: u32) -> UnitCore {
    UnitCore {
        id: UnitId(id),
        template_id: name.to_lowercase(),
        name: name.to_string(),
        category,
        locomotion: category.locomotion(),
        max_health: health,
        health,
        damage,
        hits_per_second: 1.0,
        space: 1,
        boost: 0.0,
        position: None,
        destroyed: false,
        last_attack_ms: None,
        combat_log: Vec::new(),
    }
}

pub fn defense(id: u64, category: UnitCategory, health: u32, damage: u32, range: u32) -> Unit {
    Unit {
        core: core(id, "Defense", category, health, damage),
        role: UnitRole::Defense(DefenseState {
            range,
            max_targets: 1,
            cost: 50,
            last_move_ms: None,
        }),
    }
}

pub fn hostile(id: u64, category: UnitCategory, behavior: AiBehavior, damage: u32) -> Unit {
    Unit {
        core: core(id, "Hostile", category, 100, damage),
        role: UnitRole::Hostile(HostileState {
            speed: 1.0,
            behavior,
            last_move_ms: None,
        }),
    }
}

/// Ground obstacle with no attack.
pub fn ground_defense(id: u64) -> Unit {
    defense(id, UnitCategory::Block, 300, 0, 0)
}

pub fn airborne_defense(id: u64) -> Unit {
    defense(id, UnitCategory::Aerial, 100, 25, 0)
}

pub fn ground_hostile(id: u64) -> Unit {
    hostile(id, UnitCategory::Contact, AiBehavior::SeekNearest, 15)
}

pub fn airborne_hostile(id: u64) -> Unit {
    let unit = hostile(id, UnitCategory::Aerial, AiBehavior::SuicideRush, 20);
    debug_assert_eq!(unit.locomotion(), Locomotion::Airborne);
    unit
}
