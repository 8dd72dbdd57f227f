//! Tests for the engine: lifecycle, tick pipeline, economy and save/restore.

use relic_core::config::{GameConfig, LevelTemplate, WaveTemplate};
use relic_core::constants::RELIC_MAX_HEALTH;
use relic_core::enums::{AiBehavior, SessionOutcome, SessionPhase, Side};
use relic_core::error::ConfigError;
use relic_core::events::GameEvent;
use relic_core::save::SavedUnit;
use relic_core::types::{Position, UnitId};

use crate::engine::{SimConfig, SimulationEngine};
use crate::error::{BoardError, PlacementError};
use crate::listener::EventRecorder;
use crate::unit::{HostileState, UnitRole};

fn wave(hostile_id: &str, quantity: u32, delay_seconds: u32) -> WaveTemplate {
    WaveTemplate {
        hostile_id: hostile_id.to_string(),
        quantity,
        delay_seconds,
    }
}

fn level(level_number: u32, army_size: u32, starting_money: u32, waves: Vec<WaveTemplate>) -> LevelTemplate {
    LevelTemplate {
        level_number,
        army_size,
        starting_money,
        waves,
        defense_boost_percent: 0.0,
        enemy_boost_percent: 0.0,
    }
}

fn config_with_levels(levels: Vec<LevelTemplate>) -> GameConfig {
    GameConfig {
        levels,
        ..GameConfig::default_campaign()
    }
}

fn engine_with(config: GameConfig) -> SimulationEngine {
    SimulationEngine::new(
        config,
        SimConfig {
            worker_threads: 2,
            ..Default::default()
        },
    )
    .unwrap()
}

fn campaign_engine() -> SimulationEngine {
    engine_with(GameConfig::default_campaign())
}

/// Engine with a recorder attached, already started on a new game.
fn started(config: GameConfig) -> (SimulationEngine, EventRecorder) {
    let mut engine = engine_with(config);
    let recorder = EventRecorder::new();
    engine.add_listener(recorder.clone());
    assert!(engine.start(true));
    (engine, recorder)
}

fn kill_hostiles(engine: &mut SimulationEngine) {
    let ids: Vec<UnitId> = engine.board().hostile_ids().to_vec();
    for id in ids {
        if let Some(unit) = engine.board_mut().unit_mut(id) {
            unit.receive_damage(u32::MAX);
        }
    }
}

fn one_wave_levels(count: u32) -> Vec<LevelTemplate> {
    (1..=count)
        .map(|n| level(n, 15 + 10 * n, 400 + 100 * n, vec![wave("zombie_basic", 1, 0)]))
        .collect()
}

// ---- Construction ----

#[test]
fn test_new_rejects_empty_config() {
    let result = SimulationEngine::new(GameConfig::default(), SimConfig::default());
    assert!(matches!(result, Err(ConfigError::NoDefenses)));

    let mut config = GameConfig::default_campaign();
    config.levels.clear();
    let result = SimulationEngine::new(config, SimConfig::default());
    assert!(matches!(result, Err(ConfigError::NoLevels)));
}

#[test]
fn test_new_engine_is_idle() {
    let mut engine = campaign_engine();
    assert_eq!(engine.phase(), SessionPhase::Idle);
    assert!(!engine.tick());
    assert_eq!(engine.time().tick, 0);
    assert_eq!(engine.relic().position(), Position::new(12, 12));
    assert_eq!(engine.relic().health(), RELIC_MAX_HEALTH);
    assert_eq!(engine.player().name(), "Player");
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let run = || {
        let (mut engine, _) = started(GameConfig::default_campaign());
        engine.place_defense("turret", Position::new(11, 12)).unwrap();
        engine.place_defense("drone", Position::new(12, 13)).unwrap();
        let mut snapshots = Vec::new();
        for _ in 0..300 {
            engine.tick();
            snapshots.push(serde_json::to_string(&engine.snapshot()).unwrap());
        }
        snapshots
    };
    assert_eq!(run(), run(), "Snapshots diverged with same seed");
}

#[test]
fn test_pooled_and_sequential_sessions_agree() {
    let run = |worker_threads: usize| {
        let mut engine = SimulationEngine::new(
            GameConfig::default_campaign(),
            SimConfig {
                seed: 5,
                worker_threads,
                ..Default::default()
            },
        )
        .unwrap();
        engine.start(true);
        engine.place_defense("turret", Position::new(12, 10)).unwrap();
        for _ in 0..200 {
            engine.tick();
        }
        serde_json::to_string(&engine.snapshot()).unwrap()
    };
    assert_eq!(run(0), run(8));
}

#[test]
fn test_determinism_different_seeds() {
    let boosts = |seed: u64| {
        let mut engine = SimulationEngine::new(
            GameConfig::default_campaign(),
            SimConfig {
                seed,
                ..Default::default()
            },
        )
        .unwrap();
        engine.start(true);
        (engine.defense_boost(), engine.enemy_boost())
    };
    assert_ne!(boosts(111), boosts(222));
}

// ---- Lifecycle ----

#[test]
fn test_start_new_game_initializes_level_zero() {
    let (engine, recorder) = started(GameConfig::default_campaign());
    assert_eq!(engine.phase(), SessionPhase::Running);
    assert_eq!(engine.level_index(), 0);
    assert_eq!(engine.player().coins(), 650);
    assert_eq!(engine.player().army().max_capacity(), 20);
    assert_eq!(
        recorder.events(),
        vec![
            GameEvent::SessionStarted { new_game: true },
            GameEvent::LevelStarted {
                level_index: 0,
                level_number: 1
            },
            GameEvent::WaveStarted {
                wave_index: 0,
                hostile_id: "zombie_basic".to_string(),
                quantity: 11
            },
        ]
    );
}

#[test]
fn test_start_twice_rejected() {
    let (mut engine, _) = started(GameConfig::default_campaign());
    assert!(!engine.start(true));
    assert_eq!(engine.phase(), SessionPhase::Running);
}

#[test]
fn test_level_boosts_within_bounds() {
    let (mut engine, _) = started(GameConfig::default_campaign());
    assert!((0.05..=0.20).contains(&engine.defense_boost()));
    assert!((0.05..=0.20).contains(&engine.enemy_boost()));

    // Level 7: 18% / 24% base.
    assert!(engine.start_level(6));
    assert!((0.23 - 1e-9..=0.38 + 1e-9).contains(&engine.defense_boost()));
    assert!((0.29 - 1e-9..=0.44 + 1e-9).contains(&engine.enemy_boost()));
}

#[test]
fn test_pause_resume() {
    let (mut engine, recorder) = started(GameConfig::default_campaign());
    engine.tick();
    let ticked = engine.time().tick;

    assert!(engine.pause());
    assert!(engine.is_paused());
    assert!(!engine.tick());
    assert_eq!(engine.time().tick, ticked);
    assert!(!engine.pause());

    assert!(engine.resume());
    assert!(engine.is_running());
    assert!(engine.tick());
    assert_eq!(engine.time().tick, ticked + 1);
    assert!(!engine.resume());

    let events = recorder.events();
    assert!(events.contains(&GameEvent::Paused));
    assert!(events.contains(&GameEvent::Resumed));
}

#[test]
fn test_stop_is_terminal() {
    let (mut engine, _) = started(GameConfig::default_campaign());
    engine.stop();
    assert_eq!(engine.phase(), SessionPhase::Stopped);
    assert!(!engine.tick());
    assert!(!engine.resume());
    assert!(!engine.start(true));
    assert_eq!(
        engine.place_defense("turret", Position::new(1, 1)),
        Err(PlacementError::SessionClosed(SessionPhase::Stopped))
    );
}

#[test]
fn test_tick_advances_clock() {
    let (mut engine, _) = started(GameConfig::default_campaign());
    for _ in 0..25 {
        engine.tick();
    }
    assert_eq!(engine.time().tick, 25);
    assert_eq!(engine.time().elapsed_ms, 2500);
}

// ---- Spawning ----

#[test]
fn test_first_spawn_then_gap() {
    let (mut engine, recorder) = started(GameConfig::default_campaign());
    engine.tick();
    assert_eq!(engine.wave().spawned, 1);
    assert_eq!(engine.board().hostile_ids().len(), 1);

    for _ in 0..9 {
        engine.tick();
    }
    assert_eq!(engine.wave().spawned, 1, "no second spawn before 1000ms");

    let spawns = recorder
        .events()
        .into_iter()
        .filter(|e| matches!(e, GameEvent::UnitSpawned { .. }))
        .count();
    assert_eq!(spawns, 1);
}

#[test]
fn test_wave_advance_honors_delay() {
    let config = config_with_levels(vec![level(
        1,
        20,
        500,
        vec![wave("zombie_basic", 1, 0), wave("zombie_runner", 1, 2)],
    )]);
    let (mut engine, recorder) = started(config);

    engine.tick();
    kill_hostiles(&mut engine);
    engine.tick();
    assert_eq!(engine.wave().index, 1);
    assert_eq!(engine.wave().delay_remaining_ms, 2000);
    assert!(recorder.events().contains(&GameEvent::WaveStarted {
        wave_index: 1,
        hostile_id: "zombie_runner".to_string(),
        quantity: 1
    }));

    let mut ticks = 0;
    while engine.board().hostile_ids().is_empty() {
        engine.tick();
        ticks += 1;
        assert!(ticks < 100, "runner never spawned");
    }
    assert_eq!(ticks, 21);
    assert!(!engine.level_complete());
}

#[test]
fn test_unknown_wave_template_skipped() {
    let config = config_with_levels(vec![level(1, 20, 500, vec![wave("ghost", 2, 0)])]);
    let (mut engine, recorder) = started(config);
    for _ in 0..30 {
        engine.tick();
    }
    assert!(engine.board().is_empty());
    assert!(engine.level_complete());
    assert!(recorder
        .events()
        .iter()
        .all(|e| !matches!(e, GameEvent::UnitSpawned { .. })));
}

#[test]
fn test_spawned_hostiles_are_boosted() {
    let (mut engine, _) = started(GameConfig::default_campaign());
    engine.tick();
    let id = engine.board().hostile_ids()[0];
    let unit = engine.board().unit(id).unwrap();
    let expected = (120.0 * (1.0 + engine.enemy_boost())) as u32;
    assert_eq!(unit.max_health(), expected);
    assert!(unit.max_health() > 120);
}

// ---- Level progression ----

#[test]
fn test_level_complete_awards_bonus_once() {
    let (mut engine, recorder) = started(config_with_levels(one_wave_levels(2)));
    engine.tick();
    kill_hostiles(&mut engine);
    engine.tick();

    assert!(engine.level_complete());
    assert_eq!(engine.phase(), SessionPhase::Paused);
    assert_eq!(engine.player().score(), 100);
    assert!(recorder.events().contains(&GameEvent::LevelCompleted {
        level_index: 0,
        score_bonus: 100
    }));

    // Resuming without advancing does not complete again.
    engine.resume();
    for _ in 0..5 {
        engine.tick();
    }
    assert_eq!(engine.player().score(), 100);
}

#[test]
fn test_next_level_levels_player_up() {
    let (mut engine, recorder) = started(config_with_levels(one_wave_levels(2)));
    engine.place_defense("wall", Position::new(3, 3)).unwrap();
    engine.tick();
    kill_hostiles(&mut engine);
    engine.tick();
    assert!(engine.level_complete());

    assert!(engine.next_level());
    assert_eq!(engine.level_index(), 1);
    assert_eq!(engine.phase(), SessionPhase::Running);
    assert!(!engine.level_complete());
    assert_eq!(engine.player().level(), 2);
    // 35 for the level plus 10 + 2*2.
    assert_eq!(engine.player().army().max_capacity(), 49);
    assert_eq!(engine.player().coins(), 600);
    assert!(engine.player().army().is_empty());
    assert!(engine.board().is_empty());
    assert!(recorder.events().contains(&GameEvent::LevelStarted {
        level_index: 1,
        level_number: 2
    }));
}

#[test]
fn test_next_level_requires_completion() {
    let (mut engine, _) = started(config_with_levels(one_wave_levels(2)));
    assert!(!engine.next_level());
    assert_eq!(engine.level_index(), 0);
}

#[test]
fn test_last_level_wins_session() {
    let (mut engine, recorder) = started(config_with_levels(one_wave_levels(1)));
    engine.tick();
    kill_hostiles(&mut engine);
    engine.tick();

    assert!(!engine.next_level());
    assert_eq!(engine.outcome(), Some(SessionOutcome::Won));
    assert_eq!(engine.phase(), SessionPhase::Stopped);
    let events = recorder.events();
    assert!(events.contains(&GameEvent::MaxLevelReached));
    assert_eq!(events.last(), Some(&GameEvent::SessionWon { score: 100 }));
}

#[test]
fn test_start_level_past_end() {
    let (mut engine, recorder) = started(config_with_levels(one_wave_levels(1)));
    assert!(!engine.start_level(5));
    assert_eq!(engine.level_index(), 0);
    assert_eq!(recorder.events().last(), Some(&GameEvent::MaxLevelReached));
}

#[test]
fn test_relic_destroyed_loses_session() {
    let (mut engine, recorder) = started(GameConfig::default_campaign());
    engine.relic().damage(RELIC_MAX_HEALTH + 50);
    assert_eq!(engine.relic().health(), 0);

    assert!(engine.tick());
    assert_eq!(engine.outcome(), Some(SessionOutcome::Lost));
    assert_eq!(engine.phase(), SessionPhase::Stopped);
    assert_eq!(
        recorder.events().last(),
        Some(&GameEvent::SessionLost { level_index: 0 })
    );
    assert!(!engine.tick());
}

#[test]
fn test_start_level_resets_board_and_relic() {
    let (mut engine, _) = started(GameConfig::default_campaign());
    engine.place_defense("turret", Position::new(10, 10)).unwrap();
    engine.place_defense("drone", Position::new(10, 10)).unwrap();
    engine.spawn_hostile("zombie_basic", Position::new(0, 0)).unwrap();
    for _ in 0..20 {
        engine.tick();
    }
    engine.relic().damage(400);

    assert!(engine.start_level(0));
    assert_eq!(engine.relic().health(), RELIC_MAX_HEALTH);
    assert!(engine.board().is_empty());
    assert!(engine.player().army().is_empty());
    assert_eq!(engine.player().coins(), 650);
    assert!(engine.battle_log().is_empty());
}

// ---- Placement ----

#[test]
fn test_place_defense_charges_and_registers() {
    let (mut engine, recorder) = started(GameConfig::default_campaign());
    let id = engine.place_defense("turret", Position::new(8, 8)).unwrap();

    assert_eq!(engine.player().coins(), 600);
    assert!(engine.player().army().contains(id));
    let unit = engine.board().unit(id).unwrap();
    assert_eq!(unit.side(), Side::Defense);
    assert_eq!(unit.position(), Some(Position::new(8, 8)));
    assert_eq!(unit.max_health(), (200.0 * (1.0 + engine.defense_boost())) as u32);
    assert_eq!(
        recorder.events().last(),
        Some(&GameEvent::DefensePlaced {
            unit_id: id,
            template_id: "turret".to_string(),
            position: Position::new(8, 8)
        })
    );
}

#[test]
fn test_place_defense_insufficient_funds() {
    let (mut engine, _) = started(GameConfig::default_campaign());
    for x in 0..13 {
        engine.place_defense("turret", Position::new(x, 0)).unwrap();
    }
    assert_eq!(engine.player().coins(), 0);

    let err = engine.place_defense("turret", Position::new(13, 0)).unwrap_err();
    assert_eq!(
        err,
        PlacementError::InsufficientFunds {
            needed: 50,
            available: 0
        }
    );
    assert_eq!(engine.player().army().len(), 13);
    assert!(engine.board().unit_at(Position::new(13, 0)).is_none());
}

#[test]
fn test_place_defense_insufficient_capacity() {
    let (mut engine, _) = started(GameConfig::default_campaign());
    for x in 0..10 {
        engine.place_defense("wall", Position::new(x, 1)).unwrap();
    }
    assert_eq!(engine.player().army().used_space(), 20);
    assert_eq!(engine.player().coins(), 250);

    let err = engine.place_defense("wall", Position::new(10, 1)).unwrap_err();
    assert!(matches!(err, PlacementError::InsufficientCapacity { needed: 2, .. }));
    assert_eq!(engine.player().coins(), 250);
    assert_eq!(engine.player().army().len(), 10);
}

#[test]
fn test_place_defense_oversized_template_rejected() {
    let mut config = GameConfig::default_campaign();
    let mut huge = config.defense("wall").unwrap().clone();
    huge.id = "huge".to_string();
    huge.cost = 0;
    huge.space = u32::MAX;
    config.defenses.push(huge);

    let (mut engine, _) = started(config);
    engine.place_defense("wall", Position::new(1, 1)).unwrap();
    let coins = engine.player().coins();

    let err = engine.place_defense("huge", Position::new(2, 2)).unwrap_err();
    assert!(matches!(err, PlacementError::InsufficientCapacity { needed: u32::MAX, .. }));
    assert_eq!(engine.player().coins(), coins);
    assert_eq!(engine.player().army().len(), 1);
    assert_eq!(engine.player().army().used_space(), 2);
    assert!(engine.board().unit_at(Position::new(2, 2)).is_none());
}

#[test]
fn test_place_defense_board_rejections_cost_nothing() {
    let (mut engine, _) = started(GameConfig::default_campaign());
    engine.place_defense("turret", Position::new(3, 3)).unwrap();
    let coins = engine.player().coins();

    assert_eq!(
        engine.place_defense("wall", Position::new(3, 3)),
        Err(PlacementError::Board(BoardError::Occupied(Position::new(3, 3))))
    );
    assert_eq!(
        engine.place_defense("wall", Position::new(25, 3)),
        Err(PlacementError::Board(BoardError::OutOfBounds(Position::new(25, 3))))
    );
    assert_eq!(
        engine.place_defense("laser", Position::new(4, 4)),
        Err(PlacementError::UnknownTemplate("laser".to_string()))
    );
    assert_eq!(engine.player().coins(), coins);
    assert_eq!(engine.player().army().len(), 1);
    assert_eq!(engine.board().len(), 1);

    // A drone shares the cell with the turret.
    engine.place_defense("drone", Position::new(3, 3)).unwrap();
    assert_eq!(engine.board().units_at(Position::new(3, 3)).count(), 2);
}

#[test]
fn test_remove_defense_refunds_half() {
    let (mut engine, recorder) = started(GameConfig::default_campaign());
    let id = engine.place_defense("turret_medium", Position::new(6, 6)).unwrap();
    assert_eq!(engine.player().coins(), 575);

    assert_eq!(engine.remove_defense(id), Some(37));
    assert_eq!(engine.player().coins(), 612);
    assert!(!engine.board().contains(id));
    assert!(engine.player().army().is_empty());
    assert_eq!(
        recorder.events().last(),
        Some(&GameEvent::DefenseRemoved {
            unit_id: id,
            refund: 37
        })
    );
    assert_eq!(engine.remove_defense(id), None);
}

#[test]
fn test_remove_hostile_is_not_a_refund() {
    let (mut engine, _) = started(GameConfig::default_campaign());
    let id = engine.spawn_hostile("zombie_basic", Position::new(0, 5)).unwrap();
    assert_eq!(engine.remove_defense(id), None);
    assert!(engine.board().contains(id));
}

#[test]
fn test_available_defenses_follow_player_level() {
    let (engine, _) = started(GameConfig::default_campaign());
    let ids: Vec<&str> = engine
        .available_defenses()
        .iter()
        .map(|d| d.id.as_str())
        .collect();
    assert_eq!(ids, vec!["barbed_wire", "wall", "turret"]);
}

// ---- Combat through the engine ----

#[test]
fn test_suicide_rush_hits_relic_once() {
    let (mut engine, _) = started(GameConfig::default_campaign());
    let flyer = engine.spawn_hostile("zombie_flyer", Position::new(12, 11)).unwrap();
    let damage = engine.board().unit(flyer).unwrap().damage();

    engine.tick();
    assert_eq!(engine.relic().health(), RELIC_MAX_HEALTH - damage);
    assert!(!engine.board().contains(flyer));

    let log = engine.battle_log();
    let hits: Vec<_> = log.iter().filter(|r| r.attacker_id == flyer).collect();
    assert_eq!(hits.len(), 1);
    assert!(hits[0].targets_relic());
    assert_eq!(hits[0].damage, damage);

    for _ in 0..20 {
        engine.tick();
    }
    assert!(engine.relic().health() >= RELIC_MAX_HEALTH - damage);
}

#[test]
fn test_turret_kills_and_cleanup_archives_log() {
    let (mut engine, _) = started(config_with_levels(vec![level(1, 20, 500, vec![])]));
    let turret = engine.place_defense("turret", Position::new(5, 5)).unwrap();
    let target = engine.spawn_hostile("zombie_basic", Position::new(5, 7)).unwrap();
    // Pin the hostile in place so only the turret acts.
    engine.board_mut().unit_mut(target).unwrap().role = UnitRole::Hostile(HostileState {
        speed: 0.0,
        behavior: AiBehavior::SeekNearest,
        last_move_ms: None,
    });

    let mut ticks = 0;
    while engine.board().contains(target) {
        engine.tick();
        ticks += 1;
        assert!(ticks < 200, "turret never killed the target");
    }
    let log = engine.battle_log();
    assert!(log.iter().all(|r| r.attacker_id == turret));
    assert!(log.last().unwrap().was_killed());
    assert!(log.windows(2).all(|w| w[0].timestamp_ms <= w[1].timestamp_ms));
}

// ---- Snapshot ----

#[test]
fn test_snapshot_reflects_session() {
    let (mut engine, _) = started(GameConfig::default_campaign());
    engine.place_defense("turret", Position::new(11, 12)).unwrap();
    engine.tick();

    let snap = engine.snapshot();
    assert_eq!(snap.phase, SessionPhase::Running);
    assert_eq!(snap.level_number, 1);
    assert_eq!(snap.wave.total_waves, 1);
    assert_eq!(snap.wave.to_spawn, 11);
    assert_eq!(snap.wave.spawned, 1);
    assert_eq!(snap.relic.position, Position::new(12, 12));
    assert_eq!(snap.relic.max_health, RELIC_MAX_HEALTH);
    assert_eq!(snap.player.coins, 600);
    assert_eq!(snap.player.used_space, 1);
    assert_eq!(snap.units.len(), 2);
    assert_eq!(snap.units[0].side, Side::Defense);
    assert_eq!(snap.units[1].side, Side::Hostile);
}

// ---- Save / restore ----

#[test]
fn test_save_restore_round_trip() {
    let (mut engine, _) = started(GameConfig::default_campaign());
    let turret = engine.place_defense("turret", Position::new(10, 12)).unwrap();
    engine.spawn_hostile("zombie_basic", Position::new(0, 0)).unwrap();
    engine.board_mut().unit_mut(turret).unwrap().receive_damage(40);
    engine.relic().damage(130);

    let save = engine.to_save_data("slot");
    assert_eq!(save.units.len(), 2);
    assert!(save.timestamp > 0);

    let mut restored =
        SimulationEngine::from_save_data(GameConfig::default_campaign(), SimConfig::default(), &save)
            .unwrap();
    assert_eq!(restored.phase(), SessionPhase::Idle);
    assert_eq!(restored.player().name(), "Player");
    assert_eq!(restored.player().coins(), 600);
    assert_eq!(restored.relic().health(), RELIC_MAX_HEALTH - 130);
    assert_eq!(restored.board().len(), 2);
    assert_eq!(restored.player().army().len(), 1);

    let defense_id = restored.board().defense_ids()[0];
    let defense = restored.board().unit(defense_id).unwrap();
    let original = engine.board().unit(turret).unwrap();
    assert_eq!(defense.health(), original.health());
    assert_eq!(defense.max_health(), original.max_health());
    assert_eq!(defense.position(), Some(Position::new(10, 12)));

    let recorder = EventRecorder::new();
    restored.add_listener(recorder.clone());
    assert!(restored.start(false));
    assert_eq!(recorder.events(), vec![GameEvent::SessionStarted { new_game: false }]);
    assert!(restored.tick());
}

#[test]
fn test_restore_skips_unknown_templates() {
    let (engine, _) = started(GameConfig::default_campaign());
    let mut save = engine.to_save_data("slot");
    save.units.push(SavedUnit {
        template_id: "laser".to_string(),
        position: Position::new(1, 1),
        current_health: 10,
        max_health: 10,
    });
    save.wave = None;

    let restored =
        SimulationEngine::from_save_data(GameConfig::default_campaign(), SimConfig::default(), &save)
            .unwrap();
    assert!(restored.board().is_empty());
    assert_eq!(restored.wave().to_spawn, 0);
}

#[test]
fn test_restore_keeps_player_progress() {
    let (mut engine, _) = started(config_with_levels(one_wave_levels(3)));
    engine.tick();
    kill_hostiles(&mut engine);
    engine.tick();
    engine.next_level();

    let save = engine.to_save_data("progress");
    let restored =
        SimulationEngine::from_save_data(config_with_levels(one_wave_levels(3)), SimConfig::default(), &save)
            .unwrap();
    assert_eq!(restored.level_index(), 1);
    assert_eq!(restored.player().level(), 2);
    assert_eq!(restored.player().score(), 100);
    assert_eq!(
        restored.player().army().max_capacity(),
        engine.player().army().max_capacity()
    );
}
