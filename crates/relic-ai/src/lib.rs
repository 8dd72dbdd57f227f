//! Hostile AI for relic-guard.
//!
//! Pure decision functions: which cell a unit heads for this tick, given its
//! behavior tag and what it can see. No board or engine dependency.

pub mod profiles;
pub mod targeting;

pub use relic_core as core;
