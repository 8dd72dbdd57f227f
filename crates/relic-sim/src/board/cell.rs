//! One grid square.

use relic_core::enums::Locomotion;
use relic_core::types::UnitId;

/// A unit standing in a cell, with its class cached for collision checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupant {
    pub id: UnitId,
    pub locomotion: Locomotion,
}

/// Holds at most one ground and one airborne occupant.
#[derive(Debug, Clone, Default)]
pub struct Cell {
    occupants: Vec<Occupant>,
}

impl Cell {
    pub fn occupants(&self) -> &[Occupant] {
        &self.occupants
    }

    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }

    pub fn contains(&self, id: UnitId) -> bool {
        self.occupants.iter().any(|o| o.id == id)
    }

    /// The occupant of the given class, if any.
    pub fn occupant(&self, locomotion: Locomotion) -> Option<UnitId> {
        self.occupants
            .iter()
            .find(|o| o.locomotion == locomotion)
            .map(|o| o.id)
    }

    pub fn has_ground(&self) -> bool {
        self.occupant(Locomotion::Ground).is_some()
    }

    pub fn has_airborne(&self) -> bool {
        self.occupant(Locomotion::Airborne).is_some()
    }

    /// Whether the slot for this class is free.
    pub fn accepts(&self, locomotion: Locomotion) -> bool {
        self.occupant(locomotion).is_none()
    }

    pub(crate) fn insert(&mut self, occupant: Occupant) -> bool {
        if !self.accepts(occupant.locomotion) {
            return false;
        }
        self.occupants.push(occupant);
        true
    }

    pub(crate) fn remove(&mut self, id: UnitId) -> bool {
        let before = self.occupants.len();
        self.occupants.retain(|o| o.id != id);
        self.occupants.len() != before
    }

    pub(crate) fn clear(&mut self) {
        self.occupants.clear();
    }
}
