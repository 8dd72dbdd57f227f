//! Snapshot system: builds the read-only view handed to the UI.

use relic_core::enums::SessionPhase;
use relic_core::state::{RelicView, SessionSnapshot, UnitView, WaveView};
use relic_core::types::SimTime;

use crate::board::Board;
use crate::ledger::Player;
use crate::relic::Relic;
use crate::unit::Unit;

/// Session scalars that live on the engine rather than the board.
pub struct SessionHeader {
    pub time: SimTime,
    pub phase: SessionPhase,
    pub level_index: usize,
    pub level_number: u32,
    pub level_complete: bool,
    pub wave: WaveView,
}

pub fn build_snapshot(
    header: SessionHeader,
    board: &Board,
    relic: &Relic,
    player: &Player,
) -> SessionSnapshot {
    SessionSnapshot {
        time: header.time,
        phase: header.phase,
        level_index: header.level_index,
        level_number: header.level_number,
        level_complete: header.level_complete,
        wave: header.wave,
        relic: RelicView {
            position: relic.position(),
            health: relic.health(),
            max_health: relic.max_health(),
        },
        player: player.view(),
        units: board.defenses().chain(board.hostiles()).filter_map(unit_view).collect(),
    }
}

fn unit_view(unit: &Unit) -> Option<UnitView> {
    Some(UnitView {
        id: unit.id(),
        template_id: unit.template_id().to_string(),
        name: unit.name().to_string(),
        side: unit.side(),
        locomotion: unit.locomotion(),
        position: unit.position()?,
        health: unit.health(),
        max_health: unit.max_health(),
    })
}
