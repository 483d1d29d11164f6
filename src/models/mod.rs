//! Data models for dayaction

pub mod stats;
pub mod task;

pub use stats::{DerivedCounts, Stats, StreakState, WEEKLY_TASK_GOAL, daily_progress_pct};
pub use task::{TASK_POINTS, Task};
