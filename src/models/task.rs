//! Task model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Points awarded for completing a task
pub const TASK_POINTS: u32 = 10;

/// A daily task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    /// Set exactly when `completed` is true
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default = "default_points")]
    pub points: u32,
}

fn default_points() -> u32 {
    TASK_POINTS
}

impl Task {
    /// Create a pending task worth [`TASK_POINTS`]
    pub fn new(id: impl Into<String>, title: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Task {
            id: id.into(),
            title: title.into(),
            completed: false,
            created_at,
            completed_at: None,
            points: TASK_POINTS,
        }
    }

    /// Mark the task as completed at the given instant
    pub fn complete(&mut self, at: DateTime<Utc>) {
        self.completed = true;
        self.completed_at = Some(at);
    }

    /// Mark the task as pending again
    pub fn reopen(&mut self) {
        self.completed = false;
        self.completed_at = None;
    }

    /// Repair records whose completion flag and timestamp disagree
    pub(crate) fn normalize(&mut self) {
        if !self.completed {
            self.completed_at = None;
        } else if self.completed_at.is_none() {
            // No timestamp to classify by; keep it out of today/this week.
            self.completed_at = Some(self.created_at);
        }
    }
}
