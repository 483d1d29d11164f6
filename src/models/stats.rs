//! Statistics records
//!
//! [`StreakState`] is the part of the statistics that is authored by events
//! (completing toggles and focus sessions) and must be persisted.
//! [`DerivedCounts`] is a pure projection of the task list. [`Stats`] is the
//! merged snapshot handed to callers and written to storage.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Tasks per week that count as a full week
pub const WEEKLY_TASK_GOAL: u32 = 35;

/// Event-authored statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreakState {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub focus_time_today: u32,
    pub focus_time_this_week: u32,
    pub last_completion_date: Option<NaiveDate>,
}

/// Statistics recomputed from the task list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedCounts {
    pub total_points: u64,
    pub total_tasks_completed: u32,
    pub tasks_completed_today: u32,
    pub tasks_completed_this_week: u32,
}

/// Statistics snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
    #[serde(default)]
    pub total_points: u64,
    #[serde(default)]
    pub total_tasks_completed: u32,
    #[serde(default)]
    pub tasks_completed_today: u32,
    #[serde(default)]
    pub tasks_completed_this_week: u32,
    #[serde(default)]
    pub focus_time_today: u32,
    #[serde(default)]
    pub focus_time_this_week: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_completion_date: Option<NaiveDate>,
}

impl Stats {
    pub fn from_parts(streak: &StreakState, derived: &DerivedCounts) -> Self {
        Stats {
            current_streak: streak.current_streak,
            longest_streak: streak.longest_streak,
            total_points: derived.total_points,
            total_tasks_completed: derived.total_tasks_completed,
            tasks_completed_today: derived.tasks_completed_today,
            tasks_completed_this_week: derived.tasks_completed_this_week,
            focus_time_today: streak.focus_time_today,
            focus_time_this_week: streak.focus_time_this_week,
            last_completion_date: streak.last_completion_date,
        }
    }

    /// The event-authored half of the snapshot
    pub fn streak_state(&self) -> StreakState {
        // A hand-edited record could break the ordering; the longest streak wins.
        StreakState {
            current_streak: self.current_streak,
            longest_streak: self.longest_streak.max(self.current_streak),
            focus_time_today: self.focus_time_today,
            focus_time_this_week: self.focus_time_this_week,
            last_completion_date: self.last_completion_date,
        }
    }

    /// Focus minutes as counted by the focus achievements
    pub fn focus_minutes(&self) -> u32 {
        self.focus_time_today.saturating_add(self.focus_time_this_week)
    }

    /// Weekly completion progress in percent, capped at 100
    pub fn weekly_progress_pct(&self) -> u32 {
        let pct = (f64::from(self.tasks_completed_this_week) / f64::from(WEEKLY_TASK_GOAL)
            * 100.0)
            .round() as u32;
        pct.min(100)
    }
}

/// Share of all tasks completed today, in percent
pub fn daily_progress_pct(completed_today: u32, total_tasks: usize) -> u32 {
    if total_tasks == 0 {
        return 0;
    }
    (f64::from(completed_today) / total_tasks as f64 * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts() {
        let streak = StreakState {
            current_streak: 3,
            longest_streak: 5,
            focus_time_today: 25,
            focus_time_this_week: 50,
            last_completion_date: NaiveDate::from_ymd_opt(2024, 3, 7),
        };
        let derived = DerivedCounts {
            total_points: 40,
            total_tasks_completed: 4,
            tasks_completed_today: 1,
            tasks_completed_this_week: 2,
        };

        let stats = Stats::from_parts(&streak, &derived);
        assert_eq!(stats.current_streak, 3);
        assert_eq!(stats.longest_streak, 5);
        assert_eq!(stats.total_points, 40);
        assert_eq!(stats.tasks_completed_this_week, 2);
        assert_eq!(stats.focus_minutes(), 75);
        assert_eq!(stats.streak_state(), streak);
    }

    #[test]
    fn test_streak_state_repairs_longest() {
        let stats = Stats {
            current_streak: 9,
            longest_streak: 4,
            ..Default::default()
        };
        assert_eq!(stats.streak_state().longest_streak, 9);
    }

    #[test]
    fn test_serialized_record() {
        let stats = Stats {
            current_streak: 2,
            last_completion_date: NaiveDate::from_ymd_opt(2024, 3, 7),
            ..Default::default()
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["currentStreak"], 2);
        assert_eq!(json["lastCompletionDate"], "2024-03-07");
        assert_eq!(json["focusTimeThisWeek"], 0);

        let empty = serde_json::to_value(Stats::default()).unwrap();
        assert!(empty.get("lastCompletionDate").is_none());
    }

    #[test]
    fn test_weekly_progress() {
        let mut stats = Stats::default();
        assert_eq!(stats.weekly_progress_pct(), 0);

        stats.tasks_completed_this_week = 7;
        assert_eq!(stats.weekly_progress_pct(), 20);

        stats.tasks_completed_this_week = 50;
        assert_eq!(stats.weekly_progress_pct(), 100);
    }

    #[test]
    fn test_daily_progress() {
        assert_eq!(daily_progress_pct(0, 0), 0);
        assert_eq!(daily_progress_pct(1, 3), 33);
        assert_eq!(daily_progress_pct(2, 3), 67);
        assert_eq!(daily_progress_pct(4, 4), 100);
    }
}
