//! Tracker facade
//!
//! Owns the task list, the statistics engine and the persistence port.
//! Every mutation is written back immediately; write failures are logged
//! and otherwise ignored.

use crate::calendar::{Calendar, Clock, SystemClock};
use crate::engine::{
    AchievementState, StatisticsEngine, TaskStore, ToggleOutcome, discount_percent, evaluate,
};
use crate::models::{Stats, Task, daily_progress_pct};
use crate::storage::codec::{self, STATS_KEY, TASKS_KEY};
use crate::storage::KeyValueStore;

/// Tasks and statistics backed by a key-value store
pub struct Tracker<S, C = SystemClock> {
    store: S,
    clock: C,
    calendar: Calendar,
    tasks: TaskStore,
    engine: StatisticsEngine,
}

impl<S: KeyValueStore, C: Clock> Tracker<S, C> {
    /// Load persisted state from `store`, recovering to empty state on bad data
    pub fn open(store: S, clock: C, calendar: Calendar) -> Self {
        let mut tracker = Tracker {
            store,
            clock,
            calendar,
            tasks: TaskStore::new(),
            engine: StatisticsEngine::default(),
        };
        tracker.reload();
        tracker
    }

    /// Replace in-memory state with what the store currently holds.
    ///
    /// Long-lived handles call this before writing so changes made by
    /// other processes in the meantime are not overwritten.
    pub fn reload(&mut self) {
        let tasks = codec::load_tasks(&self.store);
        let stats = codec::load_stats(&self.store);
        log::debug!(
            "Loaded {} tasks, streak {} (longest {})",
            tasks.len(),
            stats.current_streak,
            stats.longest_streak
        );

        self.tasks = TaskStore::from_tasks(tasks);
        self.engine = StatisticsEngine::new(stats.streak_state());
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.tasks()
    }

    pub fn task_store(&self) -> &TaskStore {
        &self.tasks
    }

    /// Statistics as of the clock's current instant
    pub fn stats(&self) -> Stats {
        self.engine
            .snapshot(self.tasks.tasks(), self.clock.now(), &self.calendar)
    }

    pub fn achievements(&self) -> Vec<AchievementState> {
        evaluate(&self.stats())
    }

    pub fn discount_percent(&self) -> u8 {
        discount_percent(self.engine.state().current_streak)
    }

    pub fn daily_progress_pct(&self) -> u32 {
        daily_progress_pct(self.stats().tasks_completed_today, self.tasks.len())
    }

    /// Add a task; blank titles leave everything unchanged
    pub fn add_task(&mut self, title: &str) -> Option<Task> {
        let now = self.clock.now();
        let task = self.tasks.add(title, now)?.clone();
        log::debug!("Added task {}: {}", task.id, task.title);
        self.persist();
        Some(task)
    }

    /// Toggle a task; completing it advances the streak
    pub fn toggle_task(&mut self, id: &str) -> ToggleOutcome {
        let now = self.clock.now();
        let outcome = self.tasks.toggle(id, now);

        match outcome {
            ToggleOutcome::Completed => {
                self.engine.record_completion(now, &self.calendar);
                self.persist();
            }
            // The streak stays as it is; only the projections change.
            ToggleOutcome::Reopened => self.persist(),
            ToggleOutcome::NotFound => {}
        }

        outcome
    }

    /// Rename a task; returns false when nothing changed
    pub fn edit_task(&mut self, id: &str, title: &str) -> bool {
        let changed = self.tasks.edit(id, title);
        if changed {
            self.persist();
        }
        changed
    }

    pub fn delete_task(&mut self, id: &str) -> Option<Task> {
        let removed = self.tasks.delete(id)?;
        log::debug!("Deleted task {}", removed.id);
        self.persist();
        Some(removed)
    }

    /// Record minutes from a finished focus session
    pub fn add_focus_time(&mut self, minutes: u32) {
        self.engine.add_focus_time(minutes);
        self.persist_stats();
    }

    fn persist(&mut self) {
        self.persist_tasks();
        self.persist_stats();
    }

    fn persist_tasks(&mut self) {
        if let Err(e) = codec::write_record(&mut self.store, TASKS_KEY, self.tasks.tasks()) {
            log::warn!("Failed to save tasks: {}", e);
        }
    }

    fn persist_stats(&mut self) {
        let stats = self.stats();
        if let Err(e) = codec::write_record(&mut self.store, STATS_KEY, &stats) {
            log::warn!("Failed to save statistics: {}", e);
        }
    }
}
