//! Tick pipeline stages.
//!
//! Each system is a free function over the state it needs, run by the engine
//! in a fixed order: spawn, behavior, cleanup. Systems own no state; wave
//! progress is the one exception, held by the engine and passed in.

pub mod behavior;
pub mod cleanup;
pub mod snapshot;
pub mod wave_spawner;
