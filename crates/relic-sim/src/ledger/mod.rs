//! The player's resources: army capacity and coins.

pub mod army;
pub mod player;

pub use army::{Army, ArmyEntry};
pub use player::Player;
