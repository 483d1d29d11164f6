//! File-based key-value storage
//!
//! Every key is stored as `<data-dir>/<slug>.json`.

use crate::storage::kv::{KeyValueStore, StoreError};
use crate::storage::location::DataLocation;
use std::path::PathBuf;

/// On-disk key-value store
pub struct FileStore {
    location: DataLocation,
}

impl FileStore {
    pub fn new(location: DataLocation) -> Self {
        FileStore { location }
    }

    pub fn location(&self) -> &DataLocation {
        &self.location
    }

    /// Path of the file backing `key`
    pub fn key_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        let name = slug::slugify(key);
        if name.is_empty() {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.location.data_dir.join(format!("{}.json", name)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.key_path(key)?;
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let path = self.key_path(key)?;
        if !self.location.exists() {
            std::fs::create_dir_all(&self.location.data_dir)?;
        }

        // Replace via a sibling temp file.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        log::trace!("Wrote {} bytes to {:?}", value.len(), path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_store() -> (TempDir, FileStore) {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(DataLocation::new(temp.path().join("data")));
        (temp, store)
    }

    #[test]
    fn test_get_missing_key() {
        let (_temp, store) = setup_test_store();
        assert!(store.get("dayaction-tasks").unwrap().is_none());
    }

    #[test]
    fn test_put_creates_directory() {
        let (_temp, mut store) = setup_test_store();
        assert!(!store.location().exists());

        store.put("dayaction-tasks", b"[]").unwrap();

        assert!(store.location().exists());
        assert_eq!(store.get("dayaction-tasks").unwrap(), Some(b"[]".to_vec()));
    }

    #[test]
    fn test_put_overwrites() {
        let (_temp, mut store) = setup_test_store();
        store.put("userName", b"\"Ana\"").unwrap();
        store.put("userName", b"\"Bia\"").unwrap();

        assert_eq!(store.get("userName").unwrap(), Some(b"\"Bia\"".to_vec()));

        let files: Vec<_> = std::fs::read_dir(&store.location().data_dir)
            .unwrap()
            .collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_key_path_is_slugged() {
        let (_temp, store) = setup_test_store();
        let path = store.key_path("profileImage").unwrap();
        assert!(path.ends_with("profileimage.json"));
    }

    #[test]
    fn test_invalid_key() {
        let (_temp, mut store) = setup_test_store();
        assert!(matches!(
            store.put("!!!", b"x"),
            Err(StoreError::InvalidKey(_))
        ));
    }
}
