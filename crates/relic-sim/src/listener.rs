//! Event delivery to the UI collaborator.

use std::sync::{Arc, Mutex};

use relic_core::events::GameEvent;

/// Receives engine events synchronously on the tick thread. Implementations
/// should return quickly.
pub trait GameEventListener: Send {
    fn on_event(&mut self, event: &GameEvent);
}

/// Buffers every event it sees. Clones share one buffer, so a test or front
/// end can keep a handle after registering a copy with the engine.
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    pub fn events(&self) -> Vec<GameEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Take everything recorded so far, leaving the buffer empty.
    pub fn drain(&self) -> Vec<GameEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl GameEventListener for EventRecorder {
    fn on_event(&mut self, event: &GameEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }
}
