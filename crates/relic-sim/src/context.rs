//! Per-tick views handed to unit behavior.
//!
//! `TickContext` is the read-only facade shared by every worker during the
//! planning phase. `ApplyContext` is the exclusive view used afterwards on
//! the tick thread. Neither exposes engine internals.

use relic_core::types::Position;

use crate::board::Board;
use crate::pathfinding::Pathfinder;
use crate::relic::Relic;

/// Read-only session view for the parallel planning phase.
#[derive(Clone, Copy)]
pub struct TickContext<'a> {
    pub board: &'a Board,
    pub pathfinder: &'a Pathfinder,
    pub relic: &'a Relic,
    /// Simulation clock (ms).
    pub now_ms: u64,
}

impl TickContext<'_> {
    pub fn relic_position(&self) -> Position {
        self.relic.position()
    }
}

/// Mutable session view for the sequential apply phase.
pub struct ApplyContext<'a> {
    pub board: &'a mut Board,
    pub relic: &'a Relic,
    pub now_ms: u64,
}
