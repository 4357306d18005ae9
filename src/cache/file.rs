// Durable file-backed key-value store.
// Keeps one file per key and writes atomically via a temp file.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use crate::error::{Result, SiteError};

use super::paths;
use super::store::KeyValueStore;

/// Store that survives across sessions, used for user preferences.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Open the store in the platform preferences directory.
    pub fn open_default() -> Result<Self> {
        paths::preferences_dir()
            .map(Self::new)
            .ok_or_else(|| SiteError::Other("no home directory for preferences".to_string()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(paths::key_path(&self.dir, key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: String) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let path = paths::key_path(&self.dir, key);
        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(value.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, &path)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::cache_key;
    use tempfile::TempDir;

    #[test]
    fn test_set_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("prefs"));

        store.set("darkMode", "true".to_string()).unwrap();
        assert_eq!(store.get("darkMode").unwrap().as_deref(), Some("true"));

        store.set("darkMode", "false".to_string()).unwrap();
        assert_eq!(store.get("darkMode").unwrap().as_deref(), Some("false"));
    }

    #[test]
    fn test_distinct_keys_do_not_collide() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        store
            .set(&cache_key("a/b_c"), "first".to_string())
            .unwrap();
        assert!(store.get(&cache_key("a_b/c")).unwrap().is_none());

        store
            .set(&cache_key("a_b/c"), "second".to_string())
            .unwrap();
        assert_eq!(
            store.get(&cache_key("a/b_c")).unwrap().as_deref(),
            Some("first")
        );
        assert_eq!(
            store.get(&cache_key("a_b/c")).unwrap().as_deref(),
            Some("second")
        );
    }

    #[test]
    fn test_get_missing() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        assert!(store.get("darkMode").unwrap().is_none());
    }

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        FileStore::new(temp_dir.path())
            .set("darkMode", "true".to_string())
            .unwrap();

        let reopened = FileStore::new(temp_dir.path());
        assert_eq!(reopened.get("darkMode").unwrap().as_deref(), Some("true"));
        assert!(!temp_dir.path().join("darkMode.tmp").exists());
    }

    #[test]
    fn test_unreadable_path_is_error() {
        let temp_dir = TempDir::new().unwrap();
        // A directory where the value file should be.
        std::fs::create_dir_all(temp_dir.path().join("darkMode.value")).unwrap();

        let store = FileStore::new(temp_dir.path());
        assert!(store.get("darkMode").is_err());
    }
}
