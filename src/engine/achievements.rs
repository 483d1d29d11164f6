//! Achievement catalog and evaluation
//!
//! The catalog is a static table; [`evaluate`] runs one generic rule over it.
//! Nothing here is persisted.

use crate::models::Stats;
use serde::Serialize;
use std::fmt;

/// Achievement grouping used for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Streak,
    Tasks,
    Focus,
    Special,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Streak => write!(f, "streak"),
            Category::Tasks => write!(f, "tasks"),
            Category::Focus => write!(f, "focus"),
            Category::Special => write!(f, "special"),
        }
    }
}

/// Statistic an achievement is measured against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Metric {
    CurrentStreak,
    TasksCompleted,
    FocusMinutes,
}

impl Metric {
    pub fn value(self, stats: &Stats) -> u64 {
        match self {
            Metric::CurrentStreak => u64::from(stats.current_streak),
            Metric::TasksCompleted => u64::from(stats.total_tasks_completed),
            Metric::FocusMinutes => u64::from(stats.focus_minutes()),
        }
    }
}

/// Static catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub metric: Metric,
    pub requirement: u64,
    pub reward: &'static str,
}

const fn entry(
    id: &'static str,
    title: &'static str,
    description: &'static str,
    category: Category,
    metric: Metric,
    requirement: u64,
    reward: &'static str,
) -> Achievement {
    Achievement {
        id,
        title,
        description,
        category,
        metric,
        requirement,
        reward,
    }
}

pub const CATALOG: &[Achievement] = &[
    entry(
        "streak-7",
        "One Strong Week",
        "Complete tasks 7 days in a row",
        Category::Streak,
        Metric::CurrentStreak,
        7,
        "+50 bonus points",
    ),
    entry(
        "streak-14",
        "Two Unstoppable Weeks",
        "Complete tasks 14 days in a row",
        Category::Streak,
        Metric::CurrentStreak,
        14,
        "+100 bonus points",
    ),
    entry(
        "streak-30",
        "Consistency Master",
        "Complete tasks 30 days in a row",
        Category::Streak,
        Metric::CurrentStreak,
        30,
        "+200 points and a special badge",
    ),
    entry(
        "streak-60",
        "Two-Month Legend",
        "Complete tasks 60 days in a row",
        Category::Streak,
        Metric::CurrentStreak,
        60,
        "+500 points and 5% off Premium",
    ),
    entry(
        "streak-90",
        "Three-Month Champion",
        "Complete tasks 90 days in a row",
        Category::Streak,
        Metric::CurrentStreak,
        90,
        "+1000 points and 10% off Premium",
    ),
    entry(
        "streak-180",
        "Legendary: Six Months",
        "Complete tasks 180 days in a row",
        Category::Special,
        Metric::CurrentStreak,
        180,
        "+2000 points and a permanent 15% off Premium",
    ),
    entry(
        "tasks-10",
        "First Steps",
        "Complete 10 tasks in total",
        Category::Tasks,
        Metric::TasksCompleted,
        10,
        "+20 points",
    ),
    entry(
        "tasks-50",
        "Productive",
        "Complete 50 tasks in total",
        Category::Tasks,
        Metric::TasksCompleted,
        50,
        "+100 points",
    ),
    entry(
        "tasks-100",
        "Centurion",
        "Complete 100 tasks in total",
        Category::Tasks,
        Metric::TasksCompleted,
        100,
        "+250 points",
    ),
    entry(
        "focus-60",
        "Focus Hour",
        "Accumulate 60 minutes of focus",
        Category::Focus,
        Metric::FocusMinutes,
        60,
        "+50 points",
    ),
    entry(
        "focus-300",
        "Focus Master",
        "Accumulate 300 minutes of focus",
        Category::Focus,
        Metric::FocusMinutes,
        300,
        "+200 points",
    ),
];

/// A catalog entry evaluated against a statistics snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AchievementState {
    pub achievement: &'static Achievement,
    pub current: u64,
    /// 0.0 ..= 1.0
    pub progress: f64,
    pub unlocked: bool,
}

/// Evaluate every catalog entry against `stats`
pub fn evaluate(stats: &Stats) -> Vec<AchievementState> {
    evaluate_catalog(CATALOG, stats)
}

pub fn evaluate_catalog(catalog: &'static [Achievement], stats: &Stats) -> Vec<AchievementState> {
    catalog
        .iter()
        .map(|achievement| {
            let current = achievement.metric.value(stats);
            let progress = if achievement.requirement == 0 {
                1.0
            } else {
                (current as f64 / achievement.requirement as f64).min(1.0)
            };
            AchievementState {
                achievement,
                current,
                progress,
                unlocked: current >= achievement.requirement,
            }
        })
        .collect()
}

/// Premium discount earned by the current streak, in percent
pub fn discount_percent(current_streak: u32) -> u8 {
    match current_streak {
        180.. => 15,
        90.. => 10,
        60.. => 8,
        30.. => 5,
        _ => 0,
    }
}

/// Unlock totals across an evaluated catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementSummary {
    pub unlocked: usize,
    pub total: usize,
}

impl AchievementSummary {
    pub fn from_states(states: &[AchievementState]) -> Self {
        AchievementSummary {
            unlocked: states.iter().filter(|s| s.unlocked).count(),
            total: states.len(),
        }
    }

    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.unlocked as f64 / self.total as f64 * 100.0).round() as u32
    }
}
