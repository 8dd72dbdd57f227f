//! The grid: cell occupancy, collision rules and the unit store.
//!
//! The board owns every unit that is in play. Cells hold occupant ids, and
//! two index lists keep defenses and hostiles in placement order for bulk
//! queries. A unit is in an index list exactly when one cell lists it.

pub mod cell;

use std::collections::HashMap;

use rand::Rng;

use relic_core::constants::BOARD_SIZE;
use relic_core::enums::{Locomotion, Side};
use relic_core::types::{Position, UnitId};

use crate::error::BoardError;
use crate::unit::Unit;

pub use cell::{Cell, Occupant};

/// Orthogonal neighbor offsets, in the order hostiles scan them.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

#[derive(Debug, Clone)]
pub struct Board {
    size: i32,
    cells: Vec<Cell>,
    units: HashMap<UnitId, Unit>,
    defenses: Vec<UnitId>,
    hostiles: Vec<UnitId>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_SIZE)
    }
}

impl Board {
    pub fn new(size: i32) -> Self {
        let size = size.max(1);
        Self {
            size,
            cells: vec![Cell::default(); (size * size) as usize],
            units: HashMap::new(),
            defenses: Vec::new(),
            hostiles: Vec::new(),
        }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn center(&self) -> Position {
        Position::new(self.size / 2, self.size / 2)
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_in_bounds(&self, pos: Position) -> bool {
        (0..self.size).contains(&pos.x) && (0..self.size).contains(&pos.y)
    }

    /// Dense index of a cell, `None` when out of bounds.
    pub fn index_of(&self, pos: Position) -> Option<usize> {
        self.is_in_bounds(pos)
            .then(|| (pos.x * self.size + pos.y) as usize)
    }

    pub fn position_of(&self, index: usize) -> Position {
        let size = self.size as usize;
        Position::new((index / size) as i32, (index % size) as i32)
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.index_of(pos).map(|i| &self.cells[i])
    }

    fn cell_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        let index = self.index_of(pos)?;
        self.cells.get_mut(index)
    }

    // --- Mutation ---

    /// Put a unit into play. Only same-class collisions block.
    pub fn place(&mut self, mut unit: Unit, pos: Position) -> Result<UnitId, BoardError> {
        let id = unit.id();
        if self.units.contains_key(&id) {
            return Err(BoardError::AlreadyPlaced(id));
        }
        let locomotion = unit.locomotion();
        let cell = self.cell_mut(pos).ok_or(BoardError::OutOfBounds(pos))?;
        if !cell.insert(Occupant { id, locomotion }) {
            return Err(BoardError::Occupied(pos));
        }

        unit.core.position = Some(pos);
        match unit.side() {
            Side::Defense => self.defenses.push(id),
            Side::Hostile => self.hostiles.push(id),
        }
        self.units.insert(id, unit);
        Ok(id)
    }

    /// Relocate a unit. Fails without side effects when the destination is
    /// out of bounds or its slot for the mover's class is taken.
    pub fn move_unit(&mut self, id: UnitId, to: Position) -> bool {
        let Some(unit) = self.units.get(&id) else {
            return false;
        };
        let Some(from) = unit.position() else {
            return false;
        };
        if from == to {
            return true;
        }
        let locomotion = unit.locomotion();
        let (Some(from_idx), Some(to_idx)) = (self.index_of(from), self.index_of(to)) else {
            return false;
        };
        if !self.cells[to_idx].insert(Occupant { id, locomotion }) {
            return false;
        }
        self.cells[from_idx].remove(id);
        if let Some(unit) = self.units.get_mut(&id) {
            unit.core.position = Some(to);
        }
        true
    }

    /// Take a unit out of play unconditionally.
    pub fn remove(&mut self, id: UnitId) -> Option<Unit> {
        let mut unit = self.units.remove(&id)?;
        if let Some(pos) = unit.position() {
            if let Some(cell) = self.cell_mut(pos) {
                cell.remove(id);
            }
        }
        self.defenses.retain(|&d| d != id);
        self.hostiles.retain(|&h| h != id);
        unit.core.position = None;
        Some(unit)
    }

    /// Remove every destroyed occupant. Returns the removed units so their
    /// combat logs can be archived.
    pub fn cleanup_destroyed(&mut self) -> Vec<Unit> {
        let doomed: Vec<UnitId> = self
            .cells
            .iter()
            .flat_map(|cell| cell.occupants())
            .filter(|o| self.units.get(&o.id).is_some_and(Unit::is_destroyed))
            .map(|o| o.id)
            .collect();
        doomed.into_iter().filter_map(|id| self.remove(id)).collect()
    }

    /// Empty every cell and drop all units.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
        self.units.clear();
        self.defenses.clear();
        self.hostiles.clear();
    }

    // --- Geometry ---

    /// Up to four orthogonal in-bounds neighbors, in `NEIGHBOR_OFFSETS` order.
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        NEIGHBOR_OFFSETS
            .iter()
            .map(move |&(dx, dy)| pos.offset(dx, dy))
            .filter(move |p| self.is_in_bounds(*p))
    }

    /// Uniform border side, then uniform offset along it.
    pub fn random_edge_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        let last = self.size - 1;
        let offset = rng.gen_range(0..self.size);
        match rng.gen_range(0..4) {
            0 => Position::new(0, offset),
            1 => Position::new(last, offset),
            2 => Position::new(offset, 0),
            _ => Position::new(offset, last),
        }
    }

    // --- Queries ---

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(&id)
    }

    pub fn contains(&self, id: UnitId) -> bool {
        self.units.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// All units in a cell.
    pub fn units_at(&self, pos: Position) -> impl Iterator<Item = &Unit> + '_ {
        self.cell(pos)
            .into_iter()
            .flat_map(|cell| cell.occupants())
            .filter_map(move |o| self.units.get(&o.id))
    }

    /// Any occupant of the cell.
    pub fn unit_at(&self, pos: Position) -> Option<&Unit> {
        self.units_at(pos).next()
    }

    pub fn ground_unit_at(&self, pos: Position) -> Option<&Unit> {
        self.occupant_at(pos, Locomotion::Ground)
    }

    pub fn airborne_unit_at(&self, pos: Position) -> Option<&Unit> {
        self.occupant_at(pos, Locomotion::Airborne)
    }

    fn occupant_at(&self, pos: Position, locomotion: Locomotion) -> Option<&Unit> {
        self.cell(pos)
            .and_then(|cell| cell.occupant(locomotion))
            .and_then(|id| self.units.get(&id))
    }

    pub fn has_ground_occupant(&self, pos: Position) -> bool {
        self.cell(pos).is_some_and(Cell::has_ground)
    }

    pub fn has_airborne_occupant(&self, pos: Position) -> bool {
        self.cell(pos).is_some_and(Cell::has_airborne)
    }

    /// A live defense in the cell, ground before airborne.
    pub fn live_defense_at(&self, pos: Position) -> Option<&Unit> {
        [Locomotion::Ground, Locomotion::Airborne]
            .into_iter()
            .filter_map(|loco| self.occupant_at(pos, loco))
            .find(|u| u.side() == Side::Defense && !u.is_destroyed())
    }

    /// Defense ids in placement order.
    pub fn defense_ids(&self) -> &[UnitId] {
        &self.defenses
    }

    /// Hostile ids in spawn order.
    pub fn hostile_ids(&self) -> &[UnitId] {
        &self.hostiles
    }

    pub fn defenses(&self) -> impl Iterator<Item = &Unit> + '_ {
        self.defenses.iter().filter_map(|id| self.units.get(id))
    }

    pub fn hostiles(&self) -> impl Iterator<Item = &Unit> + '_ {
        self.hostiles.iter().filter_map(|id| self.units.get(id))
    }

    pub fn live_hostile_count(&self) -> usize {
        self.hostiles().filter(|u| !u.is_destroyed()).count()
    }

    /// Positions of live defenses, in placement order.
    pub fn live_defense_positions(&self) -> Vec<Position> {
        self.defenses()
            .filter(|u| !u.is_destroyed())
            .filter_map(Unit::position)
            .collect()
    }

    /// Positions of live hostiles, in spawn order.
    pub fn live_hostile_positions(&self) -> Vec<Position> {
        self.hostiles()
            .filter(|u| !u.is_destroyed())
            .filter_map(Unit::position)
            .collect()
    }

    /// Check that index lists and cells agree. Used by tests.
    pub fn is_consistent(&self) -> bool {
        let indexed = self.defenses.len() + self.hostiles.len();
        let occupants: usize = self.cells.iter().map(|c| c.occupants().len()).sum();
        if indexed != self.units.len() || occupants != self.units.len() {
            return false;
        }
        self.units.values().all(|unit| {
            unit.position()
                .and_then(|pos| self.cell(pos))
                .is_some_and(|cell| cell.contains(unit.id()))
        }) && self.cells.iter().all(|cell| {
            cell.occupants()
                .iter()
                .filter(|o| o.locomotion == Locomotion::Ground)
                .count()
                <= 1
                && cell
                    .occupants()
                    .iter()
                    .filter(|o| o.locomotion == Locomotion::Airborne)
                    .count()
                    <= 1
        })
    }
}
