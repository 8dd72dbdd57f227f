//! Simulation engine for relic-guard.
//!
//! Owns the board, the player's ledger and the relic, runs the tick
//! pipeline at a fixed rate and fans unit behavior out to a worker pool.
//! Headless: front ends drive it through `SimulationEngine`, `SessionRunner`
//! and `GameEvent` listeners.

pub mod board;
pub mod context;
pub mod engine;
pub mod error;
pub mod factory;
pub mod ledger;
pub mod listener;
pub mod pathfinding;
pub mod persistence;
pub mod relic;
pub mod runner;
pub mod systems;
pub mod unit;

pub use relic_core as core;
pub use engine::{SimConfig, SimulationEngine};
pub use runner::SessionRunner;

#[cfg(test)]
mod tests;
