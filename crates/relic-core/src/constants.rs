//! Simulation constants and tuning parameters.

// --- Clock ---

/// Simulation tick rate (Hz).
pub const TICKS_PER_SECOND: u32 = 10;

/// Milliseconds of simulated time per tick.
pub const TICK_INTERVAL_MS: u64 = 1000 / TICKS_PER_SECOND as u64;

// --- Board ---

/// Side length of the square board, in cells.
pub const BOARD_SIZE: i32 = 25;

// --- Relic ---

/// Relic health at the start of every level.
pub const RELIC_MAX_HEALTH: u32 = 1000;

/// Display name used for the relic in combat records.
pub const RELIC_NAME: &str = "Relic";

// --- Scheduling ---

/// Number of worker threads the behavior step fans out to.
pub const WORKER_POOL_SIZE: usize = 10;

/// Minimum gap between two hostile spawns of the same wave.
pub const SPAWN_INTERVAL_MS: u64 = 1000;

/// Airborne defenses reposition at most once per this interval.
pub const AIRBORNE_DEFENSE_MOVE_INTERVAL_MS: u64 = 1000;

// --- Hostile AI ---

/// Probability that a random-behavior hostile picks a defender instead of the relic.
pub const RANDOM_AI_DEFENDER_CHANCE: f64 = 0.3;

// --- Economy ---

/// Share of the purchase cost returned when a defense is removed (percent).
pub const REMOVAL_REFUND_PERCENT: u32 = 50;

/// Score awarded on level completion, multiplied by the 1-based level number.
pub const LEVEL_COMPLETE_BONUS: u32 = 100;

/// Lower bound of the random boost added at each level start.
pub const LEVEL_BOOST_BONUS_MIN: f64 = 0.05;

/// Upper bound of the random boost added at each level start.
pub const LEVEL_BOOST_BONUS_MAX: f64 = 0.20;

/// Capacity gained on level up: base plus per-level increment.
pub const LEVEL_UP_CAPACITY_BASE: u32 = 10;
pub const LEVEL_UP_CAPACITY_PER_LEVEL: u32 = 2;

// --- Player defaults ---

pub const INITIAL_PLAYER_CAPACITY: u32 = 20;
pub const INITIAL_PLAYER_COINS: u32 = 500;
pub const DEFAULT_PLAYER_NAME: &str = "Player";

// --- Pathfinding ---

/// Heuristic weight for admissible A*.
pub const DEFAULT_HEURISTIC_WEIGHT: f64 = 1.0;
