//! Ordered in-memory task collection

use crate::engine::id_generator::IdGenerator;
use crate::models::Task;
use chrono::{DateTime, Utc};

/// Result of toggling a task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The task went from pending to completed
    Completed,
    /// The task went from completed to pending
    Reopened,
    /// No task with that ID
    NotFound,
}

/// Tasks in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        TaskStore::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        TaskStore { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Pending tasks in insertion order
    pub fn pending(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| !t.completed)
    }

    pub fn completed(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| t.completed)
    }

    /// Add a task; blank titles are rejected and return `None`
    pub fn add(&mut self, title: &str, now: DateTime<Utc>) -> Option<&Task> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }

        let id = IdGenerator::next_id(now, &self.tasks);
        self.tasks.push(Task::new(id, title, now));
        self.tasks.last()
    }

    /// Flip a task's completion state
    pub fn toggle(&mut self, id: &str, now: DateTime<Utc>) -> ToggleOutcome {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return ToggleOutcome::NotFound;
        };

        if task.completed {
            task.reopen();
            ToggleOutcome::Reopened
        } else {
            task.complete(now);
            ToggleOutcome::Completed
        }
    }

    /// Rename a task; returns false for blank titles and unknown IDs
    pub fn edit(&mut self, id: &str, title: &str) -> bool {
        let title = title.trim();
        if title.is_empty() {
            return false;
        }

        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.title = title.to_string();
                true
            }
            None => false,
        }
    }

    /// Remove a task; returns the removed record
    pub fn delete(&mut self, id: &str) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(index))
    }

    /// Resolve a reference given either as an ID or a 1-based position
    pub fn resolve(&self, reference: &str) -> Option<&Task> {
        if let Some(task) = self.get(reference) {
            return Some(task);
        }

        let position: usize = reference.trim_start_matches('#').parse().ok()?;
        self.display_order().nth(position.checked_sub(1)?)
    }

    /// Pending tasks first, then completed ones, each in insertion order
    pub fn display_order(&self) -> impl Iterator<Item = &Task> {
        self.pending().chain(self.completed())
    }
}
