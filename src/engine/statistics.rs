//! Streak, points and period counters
//!
//! Two kinds of statistics live here:
//!
//! - the [`StreakState`], which only changes on a completing toggle or a
//!   finished focus session and is persisted as-is;
//! - the [`DerivedCounts`], which are recomputed from the task list on every
//!   read, so deleting or reopening a task lowers them retroactively.
//!
//! Reopening a task leaves the streak untouched, and the focus accumulators
//! never roll over at day or week boundaries.

use crate::calendar::Calendar;
use crate::models::{DerivedCounts, Stats, StreakState, Task};
use chrono::{DateTime, Utc};

/// Statistics engine owning the event-authored state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatisticsEngine {
    state: StreakState,
}

impl StatisticsEngine {
    pub fn new(state: StreakState) -> Self {
        StatisticsEngine { state }
    }

    pub fn state(&self) -> &StreakState {
        &self.state
    }

    /// Apply the streak protocol for a completing toggle at `now`
    pub fn record_completion(&mut self, now: DateTime<Utc>, calendar: &Calendar) {
        let today = calendar.date_of(now);
        let yesterday = calendar.yesterday(now);

        let streak = match self.state.last_completion_date {
            None => 1,
            Some(last) if last == yesterday => self.state.current_streak.saturating_add(1),
            // Same day: already counted.
            Some(last) if last == today => self.state.current_streak.max(1),
            Some(_) => 1,
        };

        if streak != self.state.current_streak {
            log::debug!(
                "Streak {} -> {} (last completion {:?})",
                self.state.current_streak,
                streak,
                self.state.last_completion_date
            );
        }

        self.state.current_streak = streak;
        self.state.longest_streak = self.state.longest_streak.max(streak);
        self.state.last_completion_date = Some(today);
    }

    /// Add finished focus minutes to both accumulators
    pub fn add_focus_time(&mut self, minutes: u32) {
        self.state.focus_time_today = self.state.focus_time_today.saturating_add(minutes);
        self.state.focus_time_this_week = self.state.focus_time_this_week.saturating_add(minutes);
    }

    /// Merge the stored state with counts derived from `tasks`
    pub fn snapshot(&self, tasks: &[Task], now: DateTime<Utc>, calendar: &Calendar) -> Stats {
        Stats::from_parts(&self.state, &derive_counts(tasks, now, calendar))
    }
}

/// Recompute the task-derived counters
pub fn derive_counts(tasks: &[Task], now: DateTime<Utc>, calendar: &Calendar) -> DerivedCounts {
    let mut counts = DerivedCounts::default();

    for task in tasks.iter().filter(|t| t.completed) {
        counts.total_tasks_completed += 1;
        counts.total_points += u64::from(task.points);

        if let Some(at) = task.completed_at {
            if calendar.is_today(at, now) {
                counts.tasks_completed_today += 1;
            }
            if calendar.is_this_week(at, now) {
                counts.tasks_completed_this_week += 1;
            }
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::task_store::TaskStore;
    use chrono::{Duration, NaiveDate, TimeZone};

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn engine_with(current: u32, longest: u32, last: Option<NaiveDate>) -> StatisticsEngine {
        StatisticsEngine::new(StreakState {
            current_streak: current,
            longest_streak: longest,
            last_completion_date: last,
            ..Default::default()
        })
    }

    #[test]
    fn test_first_completion_starts_streak() {
        let cal = Calendar::utc();
        let mut engine = StatisticsEngine::default();

        engine.record_completion(at(2024, 3, 7, 9), &cal);

        assert_eq!(engine.state().current_streak, 1);
        assert_eq!(engine.state().longest_streak, 1);
        assert_eq!(engine.state().last_completion_date, Some(date(2024, 3, 7)));
    }

    #[test]
    fn test_completion_after_yesterday_increments() {
        let cal = Calendar::utc();
        let mut engine = engine_with(4, 4, Some(date(2024, 3, 6)));

        engine.record_completion(at(2024, 3, 7, 9), &cal);

        assert_eq!(engine.state().current_streak, 5);
        assert_eq!(engine.state().longest_streak, 5);
    }

    #[test]
    fn test_same_day_completion_is_idempotent() {
        let cal = Calendar::utc();
        let mut engine = engine_with(4, 6, Some(date(2024, 3, 6)));

        engine.record_completion(at(2024, 3, 7, 9), &cal);
        let after_first = engine.state().clone();

        engine.record_completion(at(2024, 3, 7, 13), &cal);
        engine.record_completion(at(2024, 3, 7, 23), &cal);

        assert_eq!(engine.state(), &after_first);
        assert_eq!(engine.state().current_streak, 5);
        assert_eq!(engine.state().longest_streak, 6);
    }

    #[test]
    fn test_gap_resets_streak() {
        let cal = Calendar::utc();
        let mut engine = engine_with(12, 12, Some(date(2024, 3, 5)));

        engine.record_completion(at(2024, 3, 7, 9), &cal);

        assert_eq!(engine.state().current_streak, 1);
        assert_eq!(engine.state().longest_streak, 12);
    }

    #[test]
    fn test_future_cursor_resets_streak() {
        let cal = Calendar::utc();
        let mut engine = engine_with(3, 3, Some(date(2024, 3, 9)));

        engine.record_completion(at(2024, 3, 7, 9), &cal);

        assert_eq!(engine.state().current_streak, 1);
        assert_eq!(engine.state().last_completion_date, Some(date(2024, 3, 7)));
    }

    #[test]
    fn test_consecutive_days_build_streak() {
        let cal = Calendar::utc();
        let mut engine = StatisticsEngine::default();
        let start = at(2024, 2, 27, 8);

        for day in 0..5 {
            engine.record_completion(start + Duration::days(day), &cal);
        }

        assert_eq!(engine.state().current_streak, 5);
        assert_eq!(engine.state().longest_streak, 5);
        assert_eq!(engine.state().last_completion_date, Some(date(2024, 3, 2)));
    }

    #[test]
    fn test_longest_never_decreases() {
        let cal = Calendar::utc();
        let mut engine = StatisticsEngine::default();
        let mut longest = 0;
        let offsets = [0, 1, 2, 5, 6, 6, 10, 11, 12, 13, 20];

        for day in offsets {
            engine.record_completion(at(2024, 1, 1, 10) + Duration::days(day), &cal);
            assert!(engine.state().longest_streak >= longest);
            assert!(engine.state().longest_streak >= engine.state().current_streak);
            longest = engine.state().longest_streak;
        }

        assert_eq!(longest, 4);
        assert_eq!(engine.state().current_streak, 1);
    }

    #[test]
    fn test_day_boundary_follows_calendar_offset() {
        use chrono::{FixedOffset, Weekday};
        let cal = Calendar::new(FixedOffset::west_opt(3 * 3600).unwrap(), Weekday::Sun);
        let mut engine = engine_with(2, 2, Some(date(2024, 3, 6)));

        // 01:00 UTC on the 8th is still the 7th at UTC-3
        engine.record_completion(at(2024, 3, 8, 1), &cal);

        assert_eq!(engine.state().current_streak, 3);
        assert_eq!(engine.state().last_completion_date, Some(date(2024, 3, 7)));
    }

    #[test]
    fn test_add_focus_time_accumulates_without_rollover() {
        let mut engine = StatisticsEngine::default();
        engine.add_focus_time(25);
        engine.add_focus_time(25);

        assert_eq!(engine.state().focus_time_today, 50);
        assert_eq!(engine.state().focus_time_this_week, 50);
    }

    #[test]
    fn test_derive_counts_projection() {
        let cal = Calendar::utc();
        let now = at(2024, 3, 7, 18);
        let mut store = TaskStore::new();
        for title in ["A", "B", "C", "D"] {
            store.add(title, at(2024, 3, 1, 8)).unwrap();
        }
        let ids: Vec<String> = store.tasks().iter().map(|t| t.id.clone()).collect();

        // Today, earlier this week, last week, never
        store.toggle(&ids[0], at(2024, 3, 7, 9));
        store.toggle(&ids[1], at(2024, 3, 4, 9));
        store.toggle(&ids[2], at(2024, 3, 1, 9));

        let counts = derive_counts(store.tasks(), now, &cal);
        assert_eq!(counts.total_tasks_completed, 3);
        assert_eq!(counts.total_points, 30);
        assert_eq!(counts.tasks_completed_today, 1);
        assert_eq!(counts.tasks_completed_this_week, 2);
    }

    #[test]
    fn test_completion_ages_out_of_today() {
        let cal = Calendar::utc();
        let completed_at = at(2024, 3, 7, 9);
        let mut store = TaskStore::new();
        let id = store.add("Walk", completed_at).unwrap().id.clone();
        store.toggle(&id, completed_at);

        let counts = derive_counts(store.tasks(), completed_at, &cal);
        assert_eq!(counts.tasks_completed_today, 1);

        let counts = derive_counts(store.tasks(), completed_at + Duration::hours(25), &cal);
        assert_eq!(counts.tasks_completed_today, 0);
        assert_eq!(counts.total_tasks_completed, 1);
    }

    #[test]
    fn test_snapshot_merges_parts() {
        let cal = Calendar::utc();
        let now = at(2024, 3, 7, 9);
        let mut store = TaskStore::new();
        let id = store.add("Meditate", now).unwrap().id.clone();
        store.toggle(&id, now);

        let mut engine = StatisticsEngine::default();
        engine.record_completion(now, &cal);
        engine.add_focus_time(25);

        let stats = engine.snapshot(store.tasks(), now, &cal);
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.longest_streak, 1);
        assert_eq!(stats.total_points, 10);
        assert_eq!(stats.tasks_completed_today, 1);
        assert_eq!(stats.focus_time_today, 25);
        assert_eq!(stats.last_completion_date, Some(date(2024, 3, 7)));
    }
}
