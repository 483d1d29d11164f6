//! Task, statistics, achievement and focus logic

pub mod achievements;
pub mod focus;
pub mod id_generator;
pub mod statistics;
pub mod task_store;

pub use achievements::{
    Achievement, AchievementState, AchievementSummary, CATALOG, Category, Metric,
    discount_percent, evaluate,
};
pub use focus::{FocusDurations, FocusError, FocusTimer, TimerEvent, TimerState};
pub use id_generator::IdGenerator;
pub use statistics::{StatisticsEngine, derive_counts};
pub use task_store::{TaskStore, ToggleOutcome};
