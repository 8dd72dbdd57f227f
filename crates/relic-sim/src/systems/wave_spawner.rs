//! Wave spawning: one hostile per gap, at a random board edge.

use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use relic_core::config::{LevelTemplate, WaveTemplate};
use relic_core::constants::{SPAWN_INTERVAL_MS, TICK_INTERVAL_MS};
use relic_core::events::GameEvent;
use relic_core::state::WaveView;

use crate::board::Board;
use crate::factory::UnitFactory;
use crate::unit::interval_elapsed;

/// Progress through the current wave of the current level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WaveProgress {
    pub index: usize,
    pub to_spawn: u32,
    pub spawned: u32,
    /// Counts down one tick interval per tick before spawning begins.
    pub delay_remaining_ms: u64,
    pub last_spawn_ms: Option<u64>,
}

impl WaveProgress {
    /// Fresh progress for wave `index`. A missing template yields an empty wave.
    pub fn start(index: usize, wave: Option<&WaveTemplate>) -> Self {
        Self {
            index,
            to_spawn: wave.map_or(0, |w| w.quantity),
            spawned: 0,
            delay_remaining_ms: wave.map_or(0, |w| u64::from(w.delay_seconds) * 1000),
            last_spawn_ms: None,
        }
    }

    pub fn finished_spawning(&self) -> bool {
        self.spawned >= self.to_spawn
    }

    pub fn view(&self, total_waves: usize) -> WaveView {
        WaveView {
            index: self.index,
            total_waves,
            to_spawn: self.to_spawn,
            spawned: self.spawned,
            delay_remaining_ms: self.delay_remaining_ms,
        }
    }
}

/// Run the spawn step. Returns the spawn event, if a unit entered the board.
pub fn run(
    board: &mut Board,
    factory: &mut UnitFactory,
    rng: &mut ChaCha8Rng,
    progress: &mut WaveProgress,
    level: &LevelTemplate,
    enemy_boost: f64,
    now_ms: u64,
) -> Option<GameEvent> {
    if progress.delay_remaining_ms > 0 {
        progress.delay_remaining_ms = progress.delay_remaining_ms.saturating_sub(TICK_INTERVAL_MS);
        return None;
    }
    if progress.finished_spawning() {
        return None;
    }
    if !interval_elapsed(progress.last_spawn_ms, now_ms, SPAWN_INTERVAL_MS) {
        return None;
    }
    let wave = level.waves.get(progress.index)?;

    let Some(unit) = factory.create_hostile(&wave.hostile_id, enemy_boost) else {
        warn!(
            wave = progress.index,
            hostile_id = %wave.hostile_id,
            "skipping spawn of unknown hostile"
        );
        progress.spawned += 1;
        progress.last_spawn_ms = Some(now_ms);
        return None;
    };

    let position = board.random_edge_position(rng);
    let template_id = unit.template_id().to_string();
    match board.place(unit, position) {
        Ok(unit_id) => {
            progress.spawned += 1;
            progress.last_spawn_ms = Some(now_ms);
            debug!(%unit_id, %template_id, %position, "hostile spawned");
            Some(GameEvent::UnitSpawned {
                unit_id,
                template_id,
                position,
            })
        }
        Err(err) => {
            debug!(%position, %err, "spawn cell blocked; retrying next tick");
            None
        }
    }
}
