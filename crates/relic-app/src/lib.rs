//! relic-guard command-line harness.
//!
//! Drives a headless session: loads configuration, places the requested
//! defenses, runs the engine (unthrottled or on the fixed-rate runner) and
//! prints what happened.

pub mod args;
pub mod report;
pub mod session;

pub use relic_core as core;
