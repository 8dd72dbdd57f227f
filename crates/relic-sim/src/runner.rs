//! Fixed-rate session runner.
//!
//! Drives `SimulationEngine::tick` at 10 Hz on a dedicated thread. The
//! engine sits behind a mutex so callers can place defenses, pause or take
//! snapshots between ticks. Commands to the loop itself travel over `mpsc`.

use std::sync::mpsc;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use relic_core::constants::TICK_INTERVAL_MS;
use relic_core::enums::SessionPhase;

use crate::engine::SimulationEngine;
use crate::error::RunnerError;

/// Wall-clock duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_millis(TICK_INTERVAL_MS);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerCommand {
    Shutdown,
}

/// Owns the tick thread for one session.
pub struct SessionRunner {
    engine: Arc<Mutex<SimulationEngine>>,
    command_tx: mpsc::Sender<RunnerCommand>,
    handle: Option<JoinHandle<()>>,
}

impl SessionRunner {
    /// Start the engine and begin ticking.
    pub fn start(mut engine: SimulationEngine, is_new_game: bool) -> Result<Self, RunnerError> {
        let phase = engine.phase();
        if !engine.start(is_new_game) {
            return Err(RunnerError::NotStartable(phase));
        }

        let engine = Arc::new(Mutex::new(engine));
        let (command_tx, command_rx) = mpsc::channel::<RunnerCommand>();
        let loop_engine = Arc::clone(&engine);
        let handle = std::thread::Builder::new()
            .name("relic-tick".into())
            .spawn(move || run_tick_loop(&loop_engine, &command_rx))
            .map_err(RunnerError::Spawn)?;

        Ok(Self {
            engine,
            command_tx,
            handle: Some(handle),
        })
    }

    /// Shared handle to the engine.
    pub fn engine(&self) -> Arc<Mutex<SimulationEngine>> {
        Arc::clone(&self.engine)
    }

    /// Run `f` against the engine between ticks. `None` if the lock is poisoned.
    pub fn with_engine<R>(&self, f: impl FnOnce(&mut SimulationEngine) -> R) -> Option<R> {
        let mut guard = self.engine.lock().ok()?;
        Some(f(&mut guard))
    }

    /// The tick thread has exited (engine stopped, or shut down).
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, |h| h.is_finished())
    }

    /// Stop ticking, join the thread and stop the engine.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        let _ = self.command_tx.send(RunnerCommand::Shutdown);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("tick thread panicked");
            }
        }
        match self.engine.lock() {
            Ok(mut engine) => engine.stop(),
            Err(poisoned) => poisoned.into_inner().stop(),
        }
    }
}

impl Drop for SessionRunner {
    fn drop(&mut self) {
        if self.handle.is_some() {
            self.shutdown();
        }
    }
}

/// The tick loop. Runs until shutdown, channel disconnect or the engine stops.
fn run_tick_loop(engine: &Mutex<SimulationEngine>, command_rx: &mpsc::Receiver<RunnerCommand>) {
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain pending commands
        loop {
            match command_rx.try_recv() {
                Ok(RunnerCommand::Shutdown) => return,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one tick (engine handles pause internally)
        match lock(engine) {
            Some(mut engine) => {
                engine.tick();
                if engine.phase() == SessionPhase::Stopped {
                    debug!(tick = engine.time().tick, "engine stopped; tick loop exiting");
                    return;
                }
            }
            None => {
                warn!("engine lock poisoned; tick loop exiting");
                return;
            }
        }

        // 3. Sleep until the next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind; reset instead of bursting to catch up.
            next_tick_time = now;
        }
    }
}

fn lock(engine: &Mutex<SimulationEngine>) -> Option<MutexGuard<'_, SimulationEngine>> {
    engine.lock().ok()
}
