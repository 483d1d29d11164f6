//! Focus session timer
//!
//! A work/break countdown driven by one-second ticks. The timer owns no
//! thread; the caller ticks it (see [`crate::focus_runner`]).
//!
//! ```text
//! Idle --start--> Running --pause--> Paused --start--> Running
//!   ^                |
//!   +-----reset------+   (reset is accepted from every state)
//! ```
//!
//! When a work period reaches zero the timer emits
//! [`TimerEvent::WorkCompleted`] and stops at the head of a break period.
//! When a break reaches zero it returns to `Idle`.

use thiserror::Error;

/// Default work period, in minutes
pub const WORK_MINUTES: u32 = 25;
/// Default break period, in minutes
pub const BREAK_MINUTES: u32 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FocusError {
    #[error("Work period must be at least one minute")]
    EmptyWorkPeriod,
    #[error("Break period must be at least one minute")]
    EmptyBreakPeriod,
}

/// Work and break lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusDurations {
    work_minutes: u32,
    break_minutes: u32,
}

impl Default for FocusDurations {
    fn default() -> Self {
        FocusDurations {
            work_minutes: WORK_MINUTES,
            break_minutes: BREAK_MINUTES,
        }
    }
}

impl FocusDurations {
    pub fn new(work_minutes: u32, break_minutes: u32) -> Result<Self, FocusError> {
        if work_minutes == 0 {
            return Err(FocusError::EmptyWorkPeriod);
        }
        if break_minutes == 0 {
            return Err(FocusError::EmptyBreakPeriod);
        }
        Ok(FocusDurations {
            work_minutes,
            break_minutes,
        })
    }

    pub fn work_minutes(&self) -> u32 {
        self.work_minutes
    }

    pub fn break_minutes(&self) -> u32 {
        self.break_minutes
    }

    pub fn work_secs(&self) -> u32 {
        self.work_minutes.saturating_mul(60)
    }

    pub fn break_secs(&self) -> u32 {
        self.break_minutes.saturating_mul(60)
    }
}

/// Timer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running { seconds_remaining: u32, is_break: bool },
    Paused { seconds_remaining: u32, is_break: bool },
}

/// Emitted when a period runs out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// A work period finished; the minutes count towards focus time
    WorkCompleted { minutes: u32 },
    BreakCompleted,
}

/// Countdown state machine
#[derive(Debug, Clone)]
pub struct FocusTimer {
    durations: FocusDurations,
    state: TimerState,
}

impl Default for FocusTimer {
    fn default() -> Self {
        FocusTimer::new(FocusDurations::default())
    }
}

impl FocusTimer {
    pub fn new(durations: FocusDurations) -> Self {
        FocusTimer {
            durations,
            state: TimerState::Idle,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn durations(&self) -> FocusDurations {
        self.durations
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running { .. })
    }

    pub fn is_break(&self) -> bool {
        match self.state {
            TimerState::Idle => false,
            TimerState::Running { is_break, .. } | TimerState::Paused { is_break, .. } => is_break,
        }
    }

    pub fn seconds_remaining(&self) -> u32 {
        match self.state {
            TimerState::Idle => self.durations.work_secs(),
            TimerState::Running {
                seconds_remaining, ..
            }
            | TimerState::Paused {
                seconds_remaining, ..
            } => seconds_remaining,
        }
    }

    /// Remaining time as `MM:SS`
    pub fn display(&self) -> String {
        let secs = self.seconds_remaining();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start from idle or resume a paused period. No-op while running.
    pub fn start(&mut self) {
        self.state = match self.state {
            TimerState::Idle => TimerState::Running {
                seconds_remaining: self.durations.work_secs(),
                is_break: false,
            },
            TimerState::Paused {
                seconds_remaining,
                is_break,
            } => TimerState::Running {
                seconds_remaining,
                is_break,
            },
            running @ TimerState::Running { .. } => running,
        };
    }

    /// Pause a running period. No-op otherwise.
    pub fn pause(&mut self) {
        if let TimerState::Running {
            seconds_remaining,
            is_break,
        } = self.state
        {
            self.state = TimerState::Paused {
                seconds_remaining,
                is_break,
            };
        }
    }

    /// Start when stopped, pause when running
    pub fn toggle(&mut self) {
        if self.is_running() {
            self.pause();
        } else {
            self.start();
        }
    }

    pub fn reset(&mut self) {
        self.state = TimerState::Idle;
    }

    /// Advance one second. Only a running timer counts down.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        let TimerState::Running {
            seconds_remaining,
            is_break,
        } = self.state
        else {
            return None;
        };

        let remaining = seconds_remaining.saturating_sub(1);
        if remaining > 0 {
            self.state = TimerState::Running {
                seconds_remaining: remaining,
                is_break,
            };
            return None;
        }

        if is_break {
            log::debug!("Break finished");
            self.state = TimerState::Idle;
            Some(TimerEvent::BreakCompleted)
        } else {
            log::debug!("Work period finished");
            self.state = TimerState::Paused {
                seconds_remaining: self.durations.break_secs(),
                is_break: true,
            };
            Some(TimerEvent::WorkCompleted {
                minutes: self.durations.work_minutes(),
            })
        }
    }
}
