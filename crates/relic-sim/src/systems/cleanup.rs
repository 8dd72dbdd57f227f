//! Cleanup system: removes destroyed units from the board and the army.

use relic_core::combat::CombatRecord;

use crate::board::Board;
use crate::ledger::Army;

/// Remove destroyed units, keeping their combat logs in `archive`.
/// Returns how many units left the board.
pub fn run(board: &mut Board, army: &mut Army, archive: &mut Vec<CombatRecord>) -> usize {
    let removed = board.cleanup_destroyed();
    for unit in &removed {
        archive.extend_from_slice(unit.combat_log());
    }
    // Army entries whose unit is gone from the board are dead too.
    army.cleanup_destroyed(|id| board.unit(id).map_or(true, |u| u.is_destroyed()));
    removed.len()
}
