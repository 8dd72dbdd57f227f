//! Army capacity ledger.
//!
//! Tracks the defenses the player holds and the capacity they consume. The
//! capacity invariant is enforced at `add`, the only way in.

use relic_core::types::UnitId;

use crate::unit::Unit;

/// A held defense, by id. The unit itself lives on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArmyEntry {
    pub unit_id: UnitId,
    pub template_id: String,
    pub space: u32,
    /// Purchase cost, used for refunds.
    pub cost: u32,
}

impl ArmyEntry {
    /// Entry for a defensive unit; `None` for hostiles.
    pub fn for_unit(unit: &Unit) -> Option<Self> {
        unit.as_defense().map(|state| Self {
            unit_id: unit.id(),
            template_id: unit.template_id().to_string(),
            space: unit.core.space,
            cost: state.cost,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct Army {
    max_capacity: u32,
    entries: Vec<ArmyEntry>,
}

impl Army {
    pub fn new(max_capacity: u32) -> Self {
        Self {
            max_capacity,
            entries: Vec::new(),
        }
    }

    /// Append if it fits. No mutation on failure.
    pub fn add(&mut self, entry: ArmyEntry) -> bool {
        if !self.has_capacity_for(entry.space) || self.contains(entry.unit_id) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    pub fn remove(&mut self, unit_id: UnitId) -> Option<ArmyEntry> {
        let index = self.entries.iter().position(|e| e.unit_id == unit_id)?;
        Some(self.entries.remove(index))
    }

    pub fn contains(&self, unit_id: UnitId) -> bool {
        self.entries.iter().any(|e| e.unit_id == unit_id)
    }

    pub fn get(&self, unit_id: UnitId) -> Option<&ArmyEntry> {
        self.entries.iter().find(|e| e.unit_id == unit_id)
    }

    pub fn entries(&self) -> &[ArmyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_capacity(&self) -> u32 {
        self.max_capacity
    }

    pub fn used_space(&self) -> u32 {
        self.entries
            .iter()
            .fold(0u32, |total, e| total.saturating_add(e.space))
    }

    pub fn available_space(&self) -> u32 {
        self.max_capacity.saturating_sub(self.used_space())
    }

    pub fn has_capacity_for(&self, space: u32) -> bool {
        self.used_space()
            .checked_add(space)
            .is_some_and(|total| total <= self.max_capacity)
    }

    /// Unconditional bump, used on level up.
    pub fn increase_capacity(&mut self, amount: u32) {
        self.max_capacity = self.max_capacity.saturating_add(amount);
    }

    pub fn set_max_capacity(&mut self, max_capacity: u32) {
        self.max_capacity = max_capacity;
    }

    /// Drop entries whose unit is destroyed. Returns how many went.
    pub fn cleanup_destroyed(&mut self, is_destroyed: impl Fn(UnitId) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !is_destroyed(e.unit_id));
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
