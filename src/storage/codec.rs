//! JSON encoding of persisted records

use crate::models::{Stats, Task};
use crate::storage::kv::{KeyValueStore, StoreError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Key holding the ordered task list
pub const TASKS_KEY: &str = "dayaction-tasks";
/// Key holding the statistics record
pub const STATS_KEY: &str = "dayaction-stats";

/// Errors that can occur while encoding or decoding records
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

/// Parse a serialized task list
pub fn parse_tasks(bytes: &[u8]) -> Result<Vec<Task>, CodecError> {
    let mut tasks: Vec<Task> = serde_json::from_slice(bytes)?;
    for task in &mut tasks {
        task.normalize();
    }
    Ok(tasks)
}

pub fn parse_stats(bytes: &[u8]) -> Result<Stats, CodecError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Read and decode a record; `Ok(None)` when the key was never written
pub fn read_record<T: DeserializeOwned>(
    store: &impl KeyValueStore,
    key: &str,
) -> Result<Option<T>, CodecError> {
    match store.get(key)? {
        Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        None => Ok(None),
    }
}

pub fn write_record<T: Serialize + ?Sized>(
    store: &mut impl KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), CodecError> {
    let bytes = serde_json::to_vec(value)?;
    store.put(key, &bytes)?;
    Ok(())
}

/// Load the task list, falling back to an empty list on missing or corrupt data
pub fn load_tasks(store: &impl KeyValueStore) -> Vec<Task> {
    let bytes = match store.get(TASKS_KEY) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return Vec::new(),
        Err(e) => {
            log::warn!("Failed to read tasks, starting empty: {}", e);
            return Vec::new();
        }
    };

    parse_tasks(&bytes).unwrap_or_else(|e| {
        log::warn!("Stored tasks are unreadable, starting empty: {}", e);
        Vec::new()
    })
}

/// Load the statistics record, falling back to zeroed statistics
pub fn load_stats(store: &impl KeyValueStore) -> Stats {
    let bytes = match store.get(STATS_KEY) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return Stats::default(),
        Err(e) => {
            log::warn!("Failed to read statistics, starting from zero: {}", e);
            return Stats::default();
        }
    };

    parse_stats(&bytes).unwrap_or_else(|e| {
        log::warn!("Stored statistics are unreadable, starting from zero: {}", e);
        Stats::default()
    })
}
