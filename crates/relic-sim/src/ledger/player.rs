//! Player: name, progression, coins and the army.

use relic_core::constants::{
    INITIAL_PLAYER_CAPACITY, INITIAL_PLAYER_COINS, LEVEL_UP_CAPACITY_BASE,
    LEVEL_UP_CAPACITY_PER_LEVEL, REMOVAL_REFUND_PERCENT,
};
use relic_core::state::PlayerView;
use relic_core::types::UnitId;

use crate::error::PlacementError;
use crate::ledger::army::{Army, ArmyEntry};

#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    level: u32,
    coins: u32,
    score: u32,
    capacity_base: u32,
    army: Army,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: 1,
            coins: INITIAL_PLAYER_COINS,
            score: 0,
            capacity_base: INITIAL_PLAYER_CAPACITY,
            army: Army::new(INITIAL_PLAYER_CAPACITY),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn capacity_base(&self) -> u32 {
        self.capacity_base
    }

    pub fn army(&self) -> &Army {
        &self.army
    }

    pub fn army_mut(&mut self) -> &mut Army {
        &mut self.army
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        self.coins >= cost
    }

    /// Debit if the balance covers it.
    pub fn spend_coins(&mut self, amount: u32) -> bool {
        if !self.can_afford(amount) {
            return false;
        }
        self.coins -= amount;
        true
    }

    pub fn add_coins(&mut self, amount: u32) {
        self.coins = self.coins.saturating_add(amount);
    }

    pub fn set_coins(&mut self, coins: u32) {
        self.coins = coins;
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Capacity for a fresh level. Becomes the new base.
    pub fn reset_capacity(&mut self, capacity: u32) {
        self.capacity_base = capacity;
        self.army.set_max_capacity(capacity);
    }

    /// Check funds and capacity, then take the entry and charge for it.
    pub fn place_defense(&mut self, entry: ArmyEntry) -> Result<(), PlacementError> {
        self.check_purchase(entry.cost, entry.space)?;
        let (cost, space) = (entry.cost, entry.space);
        if !self.army.add(entry) {
            return Err(PlacementError::InsufficientCapacity {
                needed: space,
                available: self.army.available_space(),
            });
        }
        self.coins -= cost;
        Ok(())
    }

    /// Whether a purchase of this cost and size would go through now.
    pub fn check_purchase(&self, cost: u32, space: u32) -> Result<(), PlacementError> {
        if !self.can_afford(cost) {
            return Err(PlacementError::InsufficientFunds {
                needed: cost,
                available: self.coins,
            });
        }
        if !self.army.has_capacity_for(space) {
            return Err(PlacementError::InsufficientCapacity {
                needed: space,
                available: self.army.available_space(),
            });
        }
        Ok(())
    }

    /// Drop a held defense and credit half its cost. Returns the refund.
    pub fn remove_defense(&mut self, unit_id: UnitId) -> Option<u32> {
        let entry = self.army.remove(unit_id)?;
        let refund = refund_for(entry.cost);
        self.add_coins(refund);
        Some(refund)
    }

    /// Next level; capacity grows by `10 + 2 * new_level`. Returns the gain.
    pub fn level_up(&mut self) -> u32 {
        self.level = self.level.saturating_add(1);
        let gain = LEVEL_UP_CAPACITY_PER_LEVEL
            .saturating_mul(self.level)
            .saturating_add(LEVEL_UP_CAPACITY_BASE);
        self.army.increase_capacity(gain);
        self.capacity_base = self.capacity_base.saturating_add(gain);
        gain
    }

    /// Reinstate persisted scalars.
    pub fn restore(&mut self, level: u32, coins: u32, score: u32, capacity_base: u32) {
        self.level = level.max(1);
        self.coins = coins;
        self.score = score;
        self.reset_capacity(capacity_base);
    }

    pub fn view(&self) -> PlayerView {
        PlayerView {
            name: self.name.clone(),
            level: self.level,
            coins: self.coins,
            score: self.score,
            used_space: self.army.used_space(),
            max_capacity: self.army.max_capacity(),
        }
    }
}

/// Integer-truncated share of the purchase cost returned on removal.
pub fn refund_for(cost: u32) -> u32 {
    cost * REMOVAL_REFUND_PERCENT / 100
}
