//! Core types and definitions for the relic-guard simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! grid coordinates, unit classification, configuration templates,
//! combat records, events, save data and state snapshots.
//! It has no dependency on threads, RNGs or any runtime framework.

pub mod combat;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod save;
pub mod state;
pub mod types;
