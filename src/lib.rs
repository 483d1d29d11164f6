//! dayaction - daily task tracker with streaks, points and focus sessions
//!
//! This library provides the task store, the streak/points statistics engine,
//! the achievement evaluator and the focus timer, persisted through a small
//! key-value storage port.

pub mod calendar;
pub mod cli;
pub mod engine;
pub mod focus_runner;
pub mod models;
pub mod storage;
pub mod tracker;

pub use calendar::{Calendar, Clock, ManualClock, SystemClock};
pub use engine::{AchievementState, FocusTimer, StatisticsEngine, TaskStore, ToggleOutcome};
pub use models::{Stats, Task};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use tracker::Tracker;
