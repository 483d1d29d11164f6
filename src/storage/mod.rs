//! Persistence for tasks, statistics and profile

pub mod codec;
pub mod file_store;
pub mod kv;
pub mod location;
pub mod profile;

pub use codec::{CodecError, STATS_KEY, TASKS_KEY, load_stats, load_tasks};
pub use file_store::FileStore;
pub use kv::{KeyValueStore, MemoryStore, StoreError};
pub use location::{DataLocation, LocationError};
pub use profile::Profile;
