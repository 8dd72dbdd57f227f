//! Simulation engine: the session state machine and tick pipeline.
//!
//! `SimulationEngine` owns the board, relic, player ledger and wave progress,
//! runs the systems in order every tick and reports what happened through
//! `GameEvent` listeners and `SessionSnapshot`s. Completely headless, and
//! deterministic for a given seed.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info, warn};

use relic_core::combat::CombatRecord;
use relic_core::config::{DefenseTemplate, GameConfig};
use relic_core::constants::{
    BOARD_SIZE, DEFAULT_HEURISTIC_WEIGHT, DEFAULT_PLAYER_NAME, LEVEL_BOOST_BONUS_MAX,
    LEVEL_BOOST_BONUS_MIN, LEVEL_COMPLETE_BONUS, RELIC_MAX_HEALTH, WORKER_POOL_SIZE,
};
use relic_core::enums::{SessionOutcome, SessionPhase};
use relic_core::error::ConfigError;
use relic_core::events::GameEvent;
use relic_core::save::{SaveData, SavedUnit, SavedWave};
use relic_core::state::SessionSnapshot;
use relic_core::types::{Position, SimTime, UnitId};

use crate::board::Board;
use crate::error::PlacementError;
use crate::factory::UnitFactory;
use crate::ledger::{ArmyEntry, Player};
use crate::listener::GameEventListener;
use crate::pathfinding::Pathfinder;
use crate::relic::Relic;
use crate::systems;
use crate::systems::snapshot::SessionHeader;
use crate::systems::wave_spawner::WaveProgress;
use crate::unit::Unit;

/// Configuration for starting a new session.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same session.
    pub seed: u64,
    pub player_name: String,
    /// Node-expansion cap for path searches. `None` = unbounded.
    pub path_budget: Option<usize>,
    pub heuristic_weight: f64,
    /// Behavior workers. Zero plans on the tick thread.
    pub worker_threads: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            path_budget: None,
            heuristic_weight: DEFAULT_HEURISTIC_WEIGHT,
            worker_threads: WORKER_POOL_SIZE,
        }
    }
}

/// The simulation engine. Owns all session state.
pub struct SimulationEngine {
    config: Arc<GameConfig>,
    worker_threads: usize,
    factory: UnitFactory,
    board: Board,
    relic: Relic,
    pathfinder: Pathfinder,
    player: Player,
    rng: ChaCha8Rng,
    time: SimTime,
    phase: SessionPhase,
    outcome: Option<SessionOutcome>,

    // --- Level state ---
    level_index: usize,
    level_complete: bool,
    defense_boost: f64,
    enemy_boost: f64,
    wave: WaveProgress,
    /// Combat logs of units removed since the level started.
    archive: Vec<CombatRecord>,

    pool: Option<ThreadPool>,
    listeners: Vec<Box<dyn GameEventListener>>,
}

impl SimulationEngine {
    /// Build an idle engine. Fails if the configuration is unusable.
    pub fn new(config: GameConfig, sim: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let config = Arc::new(config);
        let board = Board::new(BOARD_SIZE);
        let relic = Relic::new(board.center(), RELIC_MAX_HEALTH);
        Ok(Self {
            factory: UnitFactory::new(Arc::clone(&config)),
            config,
            worker_threads: sim.worker_threads,
            board,
            relic,
            pathfinder: Pathfinder::new(
                sim.path_budget.unwrap_or(usize::MAX),
                sim.heuristic_weight,
            ),
            player: Player::new(sim.player_name),
            rng: ChaCha8Rng::seed_from_u64(sim.seed),
            time: SimTime::default(),
            phase: SessionPhase::Idle,
            outcome: None,
            level_index: 0,
            level_complete: false,
            defense_boost: 0.0,
            enemy_boost: 0.0,
            wave: WaveProgress::default(),
            archive: Vec::new(),
            pool: None,
            listeners: Vec::new(),
        })
    }

    /// Register a listener. Events reach listeners in registration order.
    pub fn add_listener(&mut self, listener: impl GameEventListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn emit(&mut self, event: GameEvent) {
        for listener in &mut self.listeners {
            listener.on_event(&event);
        }
    }

    // --- Lifecycle ---

    /// Idle -> Running. A new game also starts level 0; otherwise the
    /// current (restored) level carries on. Returns false if not idle.
    pub fn start(&mut self, is_new_game: bool) -> bool {
        if self.phase != SessionPhase::Idle {
            warn!(phase = ?self.phase, "start ignored");
            return false;
        }
        self.pool = self.build_pool();
        self.phase = SessionPhase::Running;
        self.outcome = None;
        info!(player = self.player.name(), is_new_game, "session started");
        self.emit(GameEvent::SessionStarted {
            new_game: is_new_game,
        });
        if is_new_game {
            self.start_level(0);
        }
        true
    }

    fn build_pool(&self) -> Option<ThreadPool> {
        if self.worker_threads == 0 {
            return None;
        }
        match ThreadPoolBuilder::new()
            .num_threads(self.worker_threads)
            .thread_name(|i| format!("relic-worker-{i}"))
            .build()
        {
            Ok(pool) => Some(pool),
            Err(err) => {
                warn!(%err, "worker pool unavailable; planning on the tick thread");
                None
            }
        }
    }

    /// Terminal. Shuts the worker pool down.
    pub fn stop(&mut self) {
        if self.phase == SessionPhase::Stopped {
            return;
        }
        self.phase = SessionPhase::Stopped;
        self.pool = None;
        info!(tick = self.time.tick, outcome = ?self.outcome, "session stopped");
    }

    pub fn pause(&mut self) -> bool {
        if self.phase != SessionPhase::Running {
            return false;
        }
        self.phase = SessionPhase::Paused;
        self.emit(GameEvent::Paused);
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.phase != SessionPhase::Paused {
            return false;
        }
        self.phase = SessionPhase::Running;
        self.emit(GameEvent::Resumed);
        true
    }

    /// Advance one tick. Does nothing unless running.
    pub fn tick(&mut self) -> bool {
        if self.phase != SessionPhase::Running {
            return false;
        }
        self.run_systems();
        self.check_conditions();
        self.time.advance();
        true
    }

    fn run_systems(&mut self) {
        let now = self.time.elapsed_ms;
        let config = Arc::clone(&self.config);

        // 1. Spawning
        if let Some(level) = config.level(self.level_index) {
            let spawned = systems::wave_spawner::run(
                &mut self.board,
                &mut self.factory,
                &mut self.rng,
                &mut self.wave,
                level,
                self.enemy_boost,
                now,
            );
            if let Some(event) = spawned {
                self.emit(event);
            }
        }
        // 2. Behavior (parallel plan, sequential apply)
        systems::behavior::run(
            &mut self.board,
            &self.relic,
            &self.pathfinder,
            self.pool.as_ref(),
            &mut self.rng,
            now,
        );
        // 3. Cleanup
        systems::cleanup::run(&mut self.board, self.player.army_mut(), &mut self.archive);
    }

    /// Loss, wave advance and level completion.
    fn check_conditions(&mut self) {
        if self.relic.is_destroyed() {
            self.outcome = Some(SessionOutcome::Lost);
            info!(level = self.level_index, tick = self.time.tick, "relic destroyed");
            self.emit(GameEvent::SessionLost {
                level_index: self.level_index,
            });
            self.stop();
            return;
        }
        if self.level_complete
            || !self.wave.finished_spawning()
            || self.board.live_hostile_count() > 0
        {
            return;
        }

        let next_wave = self.wave.index + 1;
        if next_wave < self.wave_count() {
            self.start_wave(next_wave);
        } else {
            self.complete_level();
        }
    }

    fn complete_level(&mut self) {
        self.level_complete = true;
        let bonus = (self.level_index as u32 + 1) * LEVEL_COMPLETE_BONUS;
        self.player.add_score(bonus);
        info!(level = self.level_index, bonus, score = self.player.score(), "level complete");
        self.emit(GameEvent::LevelCompleted {
            level_index: self.level_index,
            score_bonus: bonus,
        });
        self.pause();
    }

    // --- Levels ---

    /// Reset the board, relic, boosts and resources for level `index` and
    /// queue its first wave. Returns false (emitting `MaxLevelReached`) if
    /// there is no such level.
    pub fn start_level(&mut self, index: usize) -> bool {
        let config = Arc::clone(&self.config);
        let Some(level) = config.level(index) else {
            info!(index, "no further levels configured");
            self.emit(GameEvent::MaxLevelReached);
            return false;
        };

        self.level_index = index;
        self.defense_boost = level.defense_boost_percent / 100.0 + self.random_boost_bonus();
        self.enemy_boost = level.enemy_boost_percent / 100.0 + self.random_boost_bonus();
        self.player.army_mut().clear();
        self.player.reset_capacity(level.army_size);
        self.player.set_coins(level.starting_money);
        self.board.clear();
        self.relic.restore();
        self.archive.clear();
        self.level_complete = false;

        info!(
            index,
            level = level.level_number,
            defense_boost = self.defense_boost,
            enemy_boost = self.enemy_boost,
            "level started"
        );
        self.emit(GameEvent::LevelStarted {
            level_index: index,
            level_number: level.level_number,
        });
        self.start_wave(0);
        true
    }

    fn random_boost_bonus(&mut self) -> f64 {
        self.rng.gen_range(LEVEL_BOOST_BONUS_MIN..=LEVEL_BOOST_BONUS_MAX)
    }

    fn start_wave(&mut self, index: usize) {
        let config = Arc::clone(&self.config);
        let wave = config
            .level(self.level_index)
            .and_then(|level| level.waves.get(index));
        self.wave = WaveProgress::start(index, wave);
        if let Some(wave) = wave {
            debug!(index, hostile_id = %wave.hostile_id, quantity = wave.quantity, "wave queued");
            self.emit(GameEvent::WaveStarted {
                wave_index: index,
                hostile_id: wave.hostile_id.clone(),
                quantity: wave.quantity,
            });
        }
    }

    fn wave_count(&self) -> usize {
        self.config
            .level(self.level_index)
            .map_or(0, |level| level.waves.len())
    }

    /// After a completed level: start the next one, level the player up and
    /// resume. With no next level the session is won and stops.
    pub fn next_level(&mut self) -> bool {
        if !self.phase.is_live() || !self.level_complete {
            warn!(phase = ?self.phase, "next_level ignored; level not complete");
            return false;
        }
        if !self.start_level(self.level_index + 1) {
            let score = self.player.score();
            self.outcome = Some(SessionOutcome::Won);
            info!(score, "campaign won");
            self.emit(GameEvent::SessionWon { score });
            self.stop();
            return false;
        }
        self.player.level_up();
        self.resume();
        true
    }

    // --- Placement ---

    /// Buy a defense and put it on the board. Funds and capacity are checked
    /// here, and coins only move once the board has taken the unit.
    pub fn place_defense(
        &mut self,
        template_id: &str,
        position: Position,
    ) -> Result<UnitId, PlacementError> {
        if !self.phase.is_live() {
            return Err(PlacementError::SessionClosed(self.phase));
        }
        let (cost, space) = self
            .config
            .defense(template_id)
            .map(|t| (t.cost, t.space))
            .ok_or_else(|| PlacementError::UnknownTemplate(template_id.to_string()))?;
        self.player.check_purchase(cost, space)?;

        let unit = self
            .factory
            .create_defense(template_id, self.defense_boost)
            .ok_or_else(|| PlacementError::UnknownTemplate(template_id.to_string()))?;
        let entry = ArmyEntry::for_unit(&unit)
            .ok_or_else(|| PlacementError::UnknownTemplate(template_id.to_string()))?;
        let unit_id = self.board.place(unit, position)?;
        if let Err(err) = self.player.place_defense(entry) {
            self.board.remove(unit_id);
            return Err(err);
        }

        debug!(%unit_id, template_id, %position, cost, "defense placed");
        self.emit(GameEvent::DefensePlaced {
            unit_id,
            template_id: template_id.to_string(),
            position,
        });
        Ok(unit_id)
    }

    /// Take a held defense off the board for half its cost.
    pub fn remove_defense(&mut self, unit_id: UnitId) -> Option<u32> {
        let refund = self.player.remove_defense(unit_id)?;
        self.board.remove(unit_id);
        debug!(%unit_id, refund, "defense removed");
        self.emit(GameEvent::DefenseRemoved { unit_id, refund });
        Some(refund)
    }

    /// Defenses unlocked at the player's level.
    pub fn available_defenses(&self) -> Vec<&DefenseTemplate> {
        self.config.defenses_unlocked_at(self.player.level()).collect()
    }

    // --- Factory ---

    /// Boosted for the current level. `None` if the template is unknown.
    pub fn create_defense_unit(&mut self, template_id: &str) -> Option<Unit> {
        self.factory.create_defense(template_id, self.defense_boost)
    }

    /// Boosted for the current level. `None` if the template is unknown.
    pub fn create_hostile_unit(&mut self, template_id: &str) -> Option<Unit> {
        self.factory.create_hostile(template_id, self.enemy_boost)
    }

    /// Put a hostile on a chosen cell outside the wave schedule.
    pub fn spawn_hostile(&mut self, template_id: &str, position: Position) -> Option<UnitId> {
        let unit = self.create_hostile_unit(template_id)?;
        match self.board.place(unit, position) {
            Ok(unit_id) => {
                self.emit(GameEvent::UnitSpawned {
                    unit_id,
                    template_id: template_id.to_string(),
                    position,
                });
                Some(unit_id)
            }
            Err(err) => {
                warn!(template_id, %err, "hostile not spawned");
                None
            }
        }
    }

    // --- Queries ---

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn is_paused(&self) -> bool {
        self.phase == SessionPhase::Paused
    }

    pub fn outcome(&self) -> Option<SessionOutcome> {
        self.outcome
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn relic(&self) -> &Relic {
        &self.relic
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn level_complete(&self) -> bool {
        self.level_complete
    }

    pub fn wave(&self) -> &WaveProgress {
        &self.wave
    }

    pub fn defense_boost(&self) -> f64 {
        self.defense_boost
    }

    pub fn enemy_boost(&self) -> f64 {
        self.enemy_boost
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        systems::snapshot::build_snapshot(
            SessionHeader {
                time: self.time,
                phase: self.phase,
                level_index: self.level_index,
                level_number: self
                    .config
                    .level(self.level_index)
                    .map_or(0, |level| level.level_number),
                level_complete: self.level_complete,
                wave: self.wave.view(self.wave_count()),
            },
            &self.board,
            &self.relic,
            &self.player,
        )
    }

    /// Every hit this level, removed units included, oldest first.
    pub fn battle_log(&self) -> Vec<CombatRecord> {
        let mut log = self.archive.clone();
        for unit in self.board.defenses().chain(self.board.hostiles()) {
            log.extend_from_slice(unit.combat_log());
        }
        log.sort_by_key(|record| record.timestamp_ms);
        log
    }

    // --- Save / restore ---

    pub fn to_save_data(&self, slot_name: &str) -> SaveData {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        let units = self
            .board
            .defenses()
            .chain(self.board.hostiles())
            .filter_map(|unit| {
                Some(SavedUnit {
                    template_id: unit.template_id().to_string(),
                    position: unit.position()?,
                    current_health: unit.health(),
                    max_health: unit.max_health(),
                })
            })
            .collect();

        SaveData {
            slot_name: slot_name.to_string(),
            timestamp,
            player_name: self.player.name().to_string(),
            player_level: self.player.level(),
            player_coins: self.player.coins(),
            player_score: self.player.score(),
            player_capacity_base: self.player.capacity_base(),
            current_level_index: self.level_index,
            relic_health: self.relic.health(),
            units,
            defense_boost: self.defense_boost,
            enemy_boost: self.enemy_boost,
            wave: Some(SavedWave {
                index: self.wave.index,
                spawned: self.wave.spawned,
                delay_remaining_ms: self.wave.delay_remaining_ms,
            }),
        }
    }

    /// Rebuild an idle engine from a save. Units come back unboosted with
    /// their saved health; unknown templates are skipped. Call
    /// `start(false)` to carry on.
    pub fn from_save_data(
        config: GameConfig,
        sim: SimConfig,
        save: &SaveData,
    ) -> Result<Self, ConfigError> {
        let sim = SimConfig {
            player_name: save.player_name.clone(),
            ..sim
        };
        let mut engine = Self::new(config, sim)?;
        engine.player.restore(
            save.player_level,
            save.player_coins,
            save.player_score,
            save.player_capacity_base,
        );

        let last_level = engine.config.levels.len().saturating_sub(1);
        if save.current_level_index > last_level {
            warn!(
                saved = save.current_level_index,
                last_level, "saved level out of range; clamping"
            );
        }
        engine.level_index = save.current_level_index.min(last_level);
        engine.relic.set_health(save.relic_health);
        engine.defense_boost = save.defense_boost;
        engine.enemy_boost = save.enemy_boost;
        engine.wave = match save.wave {
            Some(saved) => {
                let quantity = engine
                    .config
                    .level(engine.level_index)
                    .and_then(|level| level.waves.get(saved.index))
                    .map_or(0, |wave| wave.quantity);
                WaveProgress {
                    index: saved.index,
                    to_spawn: quantity,
                    spawned: saved.spawned.min(quantity),
                    delay_remaining_ms: saved.delay_remaining_ms,
                    last_spawn_ms: None,
                }
            }
            None => WaveProgress::start(0, None),
        };

        for saved in &save.units {
            engine.restore_unit(saved);
        }
        info!(
            player = engine.player.name(),
            level = engine.level_index,
            units = engine.board.len(),
            "session restored"
        );
        Ok(engine)
    }

    fn restore_unit(&mut self, saved: &SavedUnit) {
        let Some(mut unit) = self.factory.create_any(&saved.template_id) else {
            warn!(template_id = %saved.template_id, "skipping saved unit with unknown template");
            return;
        };
        unit.core.max_health = saved.max_health;
        unit.core.health = saved.current_health.min(saved.max_health);
        unit.core.destroyed = unit.core.health == 0;

        let entry = ArmyEntry::for_unit(&unit);
        let unit_id = match self.board.place(unit, saved.position) {
            Ok(unit_id) => unit_id,
            Err(err) => {
                warn!(template_id = %saved.template_id, %err, "skipping saved unit");
                return;
            }
        };
        if let Some(entry) = entry {
            if !self.player.army_mut().add(entry) {
                warn!(template_id = %saved.template_id, "army full; dropping saved defense");
                self.board.remove(unit_id);
            }
        }
    }

    // --- Test helpers ---

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}
