use core::fmt::Debug;
use serde::{Deserialize, Serialize};

use crate::*;

/// Notification emitted by a [`Board`] after an operation changed it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardEvent {
    /// The first reveal placed the mines; status went from `Ready` to `Ongoing`.
    Started,
    /// Delivered before the terminal full reveal, so on a loss only `triggered_mine` is open at this point.
    StatusChanged {
        from: BoardStatus,
        to: BoardStatus,
        triggered_mine: Option<Coord2>,
    },
    RemainingMinesChanged(i64),
    /// Grid discarded by a restart.
    Restarted,
}

/// Receives [`BoardEvent`]s from every board it is subscribed to.
pub trait BoardObserver: Debug + Send {
    fn on_event(&mut self, event: &BoardEvent);
}

/// Observer that records events. Clones share the same log.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: std::sync::Arc<std::sync::Mutex<Vec<BoardEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains and returns the events received so far.
    pub fn take(&self) -> Vec<BoardEvent> {
        match self.events.lock() {
            Ok(mut events) => core::mem::take(&mut *events),
            Err(poisoned) => core::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl BoardObserver for EventLog {
    fn on_event(&mut self, event: &BoardEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(*event),
            Err(poisoned) => poisoned.into_inner().push(*event),
        }
    }
}
