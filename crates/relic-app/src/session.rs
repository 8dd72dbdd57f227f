//! Session driver: headless or on the fixed-rate runner.

use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use tracing::{info, warn};

use relic_core::config::GameConfig;
use relic_sim::listener::EventRecorder;
use relic_sim::persistence;
use relic_sim::{SessionRunner, SimConfig, SimulationEngine};

use crate::args::{Args, DefenseSpec, DEFAULT_TICKS};
use crate::report;

/// How often the realtime driver checks on the session.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub fn run(args: Args) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    if args.dump_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    let sim = SimConfig {
        seed: args.seed,
        player_name: args.player.clone(),
        path_budget: args.path_budget,
        ..Default::default()
    };
    let (mut engine, is_new_game) = match &args.load_slot {
        Some(slot) => {
            let save = persistence::load_from_file(&args.save_dir, slot)
                .with_context(|| format!("failed to load slot `{slot}`"))?;
            info!(slot, player = %save.player_name, "resuming saved session");
            (SimulationEngine::from_save_data(config, sim, &save)?, false)
        }
        None => (SimulationEngine::new(config, sim)?, true),
    };
    let recorder = EventRecorder::new();
    engine.add_listener(recorder.clone());

    let engine = match args.realtime_secs {
        Some(secs) => run_realtime(engine, is_new_game, &args, Duration::from_secs(secs))?,
        None => run_headless(engine, is_new_game, &args)?,
    };

    println!("{}", report::summary(&engine.snapshot(), &recorder.events()));
    println!("{}", report::battle_report(&engine.battle_log()));

    if let Some(slot) = &args.save_slot {
        let save = engine.to_save_data(slot);
        persistence::save_to_file(&args.save_dir, slot, &save)
            .with_context(|| format!("failed to save slot `{slot}`"))?;
        info!(slot, dir = %args.save_dir.display(), "session saved");
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    match path {
        Some(path) => GameConfig::load_from_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(GameConfig::default_campaign()),
    }
}

/// Place each requested defense, logging the ones that do not fit.
pub fn place_defenses(engine: &mut SimulationEngine, specs: &[DefenseSpec]) -> usize {
    let mut placed = 0;
    for spec in specs {
        match engine.place_defense(&spec.template_id, spec.position) {
            Ok(_) => placed += 1,
            Err(err) => warn!(template_id = %spec.template_id, position = %spec.position, %err, "defense not placed"),
        }
    }
    placed
}

/// Advance past a completed level if asked to. Returns whether play goes on.
fn advance_if_complete(engine: &mut SimulationEngine, args: &Args) -> bool {
    if !(engine.level_complete() && engine.is_paused()) {
        return true;
    }
    if !args.auto_advance || !engine.next_level() {
        return false;
    }
    place_defenses(engine, &args.defenses);
    true
}

fn run_headless(mut engine: SimulationEngine, is_new_game: bool, args: &Args) -> Result<SimulationEngine> {
    if !engine.start(is_new_game) {
        return Err(anyhow!("engine could not start from {:?}", engine.phase()));
    }
    place_defenses(&mut engine, &args.defenses);

    let max_ticks = args.ticks.unwrap_or(DEFAULT_TICKS);
    for _ in 0..max_ticks {
        if !advance_if_complete(&mut engine, args) || !engine.tick() {
            break;
        }
    }
    engine.stop();
    Ok(engine)
}

fn run_realtime(
    engine: SimulationEngine,
    is_new_game: bool,
    args: &Args,
    duration: Duration,
) -> Result<SimulationEngine> {
    let runner = SessionRunner::start(engine, is_new_game)?;
    runner.with_engine(|engine| place_defenses(engine, &args.defenses));

    let deadline = Instant::now() + duration;
    while Instant::now() < deadline && !runner.is_finished() {
        thread::sleep(POLL_INTERVAL);
        let keep_going = runner
            .with_engine(|engine| advance_if_complete(engine, args))
            .unwrap_or(false);
        if !keep_going {
            break;
        }
    }

    let shared = runner.engine();
    runner.stop();
    let engine = std::sync::Arc::try_unwrap(shared)
        .map_err(|_| anyhow!("engine still shared after runner stopped"))?
        .into_inner()
        .map_err(|_| anyhow!("engine lock poisoned"))?;
    Ok(engine)
}
