use core::time::Duration;
use std::sync::{Arc, Mutex};
use web_time::Instant;

use crate::*;

#[derive(Copy, Clone, Debug, Default)]
struct ClockState {
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
}

/// Elapsed-time tracker driven by board events.
///
/// Starts when the board leaves `Ready`, stops when it leaves `Ongoing` and resets on restart. Clones share
/// state, so one handle can be subscribed to the board while another is polled by the display.
#[derive(Clone, Debug, Default)]
pub struct GameClock {
    state: Arc<Mutex<ClockState>>,
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut ClockState) -> T) -> T {
        match self.state.lock() {
            Ok(mut state) => f(&mut state),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }

    pub fn is_running(&self) -> bool {
        self.with_state(|state| state.started_at.is_some() && state.ended_at.is_none())
    }

    /// Time since the game started, frozen once it ended, zero before it started.
    pub fn elapsed(&self) -> Duration {
        self.with_state(|state| match (state.started_at, state.ended_at) {
            (Some(started_at), Some(ended_at)) => ended_at.saturating_duration_since(started_at),
            (Some(started_at), None) => started_at.elapsed(),
            (None, _) => Duration::ZERO,
        })
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed().as_secs()
    }
}

impl BoardObserver for GameClock {
    fn on_event(&mut self, event: &BoardEvent) {
        match *event {
            BoardEvent::Started => self.with_state(|state| {
                let now = Instant::now();
                log::debug!("Clock started");
                state.started_at = Some(now);
                state.ended_at = None;
            }),
            BoardEvent::StatusChanged {
                from: BoardStatus::Ongoing,
                ..
            } => self.with_state(|state| {
                if state.started_at.is_some() && state.ended_at.is_none() {
                    log::debug!("Clock stopped");
                    state.ended_at = Some(Instant::now());
                }
            }),
            BoardEvent::Restarted => self.with_state(|state| *state = ClockState::default()),
            _ => {}
        }
    }
}
