//! Async driver for the focus timer
//!
//! Ticks a [`FocusTimer`] on a fixed period until the cycle finishes or the
//! session is cancelled. Dropping or firing the cancel signal stops the
//! interval, so no tick outlives the session.

use crate::calendar::Clock;
use crate::engine::{FocusTimer, TimerEvent};
use crate::storage::KeyValueStore;
use crate::tracker::Tracker;
use std::time::Duration;
use tokio::sync::watch;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The timer returned to idle after its break
    CycleFinished,
    /// The cancel signal fired
    Cancelled,
}

/// Handle used to stop a running session
#[derive(Debug, Clone)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

/// Create a linked cancel handle and signal
pub fn cancel_pair() -> (CancelHandle, watch::Receiver<bool>) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, rx)
}

/// Drive `timer` until a full work/break cycle completes or `cancel` fires.
///
/// The timer is started (or resumed) before the first tick, and restarted
/// after a work period so the break runs without user input. `on_event` sees
/// every event the timer emits, in order.
pub async fn run_cycle<F>(
    timer: &mut FocusTimer,
    period: Duration,
    mut cancel: watch::Receiver<bool>,
    mut on_event: F,
) -> RunOutcome
where
    F: FnMut(TimerEvent, &FocusTimer),
{
    timer.start();
    let mut interval = tokio::time::interval(period);
    // The first tick of a tokio interval completes immediately.
    interval.tick().await;

    loop {
        tokio::select! {
            changed = cancel.changed() => {
                if changed.is_err() || *cancel.borrow() {
                    log::debug!("Focus session cancelled at {}", timer.display());
                    timer.pause();
                    return RunOutcome::Cancelled;
                }
            }
            _ = interval.tick() => {
                match timer.tick() {
                    Some(event @ TimerEvent::WorkCompleted { .. }) => {
                        on_event(event, timer);
                        timer.start();
                    }
                    Some(event @ TimerEvent::BreakCompleted) => {
                        on_event(event, timer);
                        return RunOutcome::CycleFinished;
                    }
                    None => {}
                }
            }
        }
    }
}

/// Apply a timer event to `tracker`.
///
/// A session can outlive other writes to the same store, so finished work
/// periods are added on top of freshly loaded state.
pub fn apply_event<S: KeyValueStore, C: Clock>(tracker: &mut Tracker<S, C>, event: TimerEvent) {
    match event {
        TimerEvent::WorkCompleted { minutes } => {
            tracker.reload();
            tracker.add_focus_time(minutes);
        }
        TimerEvent::BreakCompleted => {}
    }
}
