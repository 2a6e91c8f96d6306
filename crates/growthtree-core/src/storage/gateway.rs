//! Key-value persistence for JSON snapshots.
//!
//! The engine never talks to storage directly; [`crate::session::Session`]
//! reads and writes these keys through a [`PersistenceGateway`].

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::PersistenceError;

/// Keys the session stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// Onboarding answers
    Profile,
    /// Array of habits
    Habits,
    /// Array of goals
    Goals,
    /// Categories, streak, XP and weekly challenge
    Progress,
    /// Append-only array of check-in records
    Checkins,
}

impl StorageKey {
    pub const ALL: [StorageKey; 5] = [
        StorageKey::Profile,
        StorageKey::Habits,
        StorageKey::Goals,
        StorageKey::Progress,
        StorageKey::Checkins,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Profile => "profile",
            StorageKey::Habits => "habits",
            StorageKey::Goals => "goals",
            StorageKey::Progress => "progress",
            StorageKey::Checkins => "checkins",
        }
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pluggable key-value store holding JSON values.
pub trait PersistenceGateway {
    /// Read a value. `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>, PersistenceError>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &serde_json::Value) -> Result<(), PersistenceError>;

    /// Remove a value. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), PersistenceError>;
}

/// In-memory gateway for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryGateway {
    values: HashMap<String, serde_json::Value>,
    /// When set, writes fail as if storage were full
    fail_writes: bool,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail with `QuotaExceeded`.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PersistenceGateway for MemoryGateway {
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>, PersistenceError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &serde_json::Value) -> Result<(), PersistenceError> {
        if self.fail_writes {
            return Err(PersistenceError::QuotaExceeded {
                key: key.to_string(),
            });
        }
        self.values.insert(key.to_string(), value.clone());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        self.values.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key in a directory.
#[derive(Debug, Clone)]
pub struct FileGateway {
    dir: PathBuf,
}

impl FileGateway {
    /// Use `dir`, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Use the default data directory.
    pub fn open_default() -> std::io::Result<Self> {
        Self::open(super::data_dir()?)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl PersistenceGateway for FileGateway {
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>, PersistenceError> {
        let read_failed = |message: String| PersistenceError::ReadFailed {
            key: key.to_string(),
            message,
        };
        match fs::read_to_string(self.path(key)) {
            Ok(content) => serde_json::from_str(&content).map(Some).map_err(|e| {
                PersistenceError::Malformed {
                    key: key.to_string(),
                    message: e.to_string(),
                }
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(read_failed(e.to_string())),
        }
    }

    fn set(&mut self, key: &str, value: &serde_json::Value) -> Result<(), PersistenceError> {
        let write_failed = |message: String| PersistenceError::WriteFailed {
            key: key.to_string(),
            message,
        };
        let content = serde_json::to_string_pretty(value).map_err(|e| write_failed(e.to_string()))?;

        // Write to a sibling file first so a failed write never truncates the
        // previous value.
        let path = self.path(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, content).map_err(|e| write_failed(e.to_string()))?;
        fs::rename(&tmp, &path).map_err(|e| write_failed(e.to_string()))
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PersistenceError::WriteFailed {
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn memory_gateway_round_trip() {
        let mut gateway = MemoryGateway::new();
        assert_eq!(gateway.get("habits").unwrap(), None);
        gateway.set("habits", &json!([1, 2])).unwrap();
        assert_eq!(gateway.get("habits").unwrap(), Some(json!([1, 2])));
        gateway.remove("habits").unwrap();
        gateway.remove("habits").unwrap();
        assert!(gateway.is_empty());
    }

    #[test]
    fn memory_gateway_can_simulate_full_storage() {
        let mut gateway = MemoryGateway::new();
        gateway.set_fail_writes(true);
        assert!(matches!(
            gateway.set("goals", &json!([])),
            Err(PersistenceError::QuotaExceeded { .. })
        ));
        assert_eq!(gateway.len(), 0);
    }

    #[test]
    fn file_gateway_writes_one_file_per_key() {
        let dir = TempDir::new().unwrap();
        let mut gateway = FileGateway::open(dir.path().join("nested")).unwrap();
        gateway.set("profile", &json!({"name": "Ada"})).unwrap();

        assert!(dir.path().join("nested/profile.json").exists());
        assert_eq!(gateway.get("profile").unwrap(), Some(json!({"name": "Ada"})));
        assert_eq!(gateway.get("goals").unwrap(), None);

        gateway.remove("profile").unwrap();
        assert_eq!(gateway.get("profile").unwrap(), None);
    }

    #[test]
    fn file_gateway_reports_unparseable_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("habits.json"), "{not json").unwrap();
        let gateway = FileGateway::open(dir.path()).unwrap();
        assert!(matches!(
            gateway.get("habits"),
            Err(PersistenceError::Malformed { .. })
        ));
    }

    #[test]
    fn storage_keys_are_distinct() {
        let names: std::collections::HashSet<_> =
            StorageKey::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names.len(), StorageKey::ALL.len());
    }
}
