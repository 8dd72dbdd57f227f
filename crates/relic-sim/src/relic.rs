//! The protected objective.

use std::sync::atomic::{AtomicU32, Ordering};

use relic_core::types::Position;

/// Fixed position plus a health counter that only moves through atomic
/// updates, so it stays within `[0, max_health]` from any thread.
#[derive(Debug)]
pub struct Relic {
    position: Position,
    max_health: u32,
    health: AtomicU32,
}

impl Relic {
    pub fn new(position: Position, max_health: u32) -> Self {
        Self {
            position,
            max_health,
            health: AtomicU32::new(max_health),
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn health(&self) -> u32 {
        self.health.load(Ordering::Acquire)
    }

    pub fn is_destroyed(&self) -> bool {
        self.health() == 0
    }

    /// Saturating decrement. Returns health before and after.
    pub fn damage(&self, amount: u32) -> (u32, u32) {
        let before = self
            .health
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |h| {
                Some(h.saturating_sub(amount))
            })
            .unwrap_or_else(|h| h);
        (before, before.saturating_sub(amount))
    }

    /// Back to full health.
    pub fn restore(&self) {
        self.health.store(self.max_health, Ordering::Release);
    }

    /// Set health, clamped to the maximum.
    pub fn set_health(&self, health: u32) {
        self.health.store(health.min(self.max_health), Ordering::Release);
    }
}
