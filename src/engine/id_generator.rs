//! Creation-time task IDs

use crate::models::Task;
use chrono::{DateTime, Utc};

/// Generates task IDs from the creation instant
pub struct IdGenerator;

impl IdGenerator {
    /// Millisecond timestamp of `now`, bumped past any existing numeric ID
    pub fn next_id(now: DateTime<Utc>, tasks: &[Task]) -> String {
        let candidate = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let max_id = Self::find_max_id(tasks);

        match max_id {
            Some(max) if candidate <= max => (max + 1).to_string(),
            _ => candidate.to_string(),
        }
    }

    /// Find the largest numeric ID among the tasks
    pub fn find_max_id(tasks: &[Task]) -> Option<u64> {
        tasks.iter().filter_map(|t| t.id.parse::<u64>().ok()).max()
    }
}
