#![forbid(unsafe_code)]

//! Persisted user preferences.
//!
//! UI components that remember a choice between visits (for example the
//! last selected invitee section) receive a [`PreferenceStore`] instead of
//! reaching for ambient browser storage. Loading and saving are explicit
//! calls so the component decides when a value is read or written.
//!
//! Two backends are provided:
//! - [`MemoryPreferences`]: a map, used in tests and short-lived sessions.
//! - [`FilePreferences`]: a versioned JSON file written atomically.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "entries": { "currentSection": "team" }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Current file format version.
const FORMAT_VERSION: u64 = 1;

/// Errors raised by preference backends.
#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse preferences: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported preferences file version: {found} (expected {expected})")]
    Version { found: u64, expected: u64 },
}

/// Key/value storage for user preferences.
pub trait PreferenceStore {
    /// Read the value stored under `key`, if any.
    fn load(&self, key: &str) -> Result<Option<String>, PreferenceError>;

    /// Store `value` under `key`, replacing any previous value.
    fn save(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), PreferenceError>;
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Box<T> {
    fn load(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        (**self).save(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), PreferenceError> {
        (**self).remove(key)
    }
}

/// In-memory preference store.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    entries: BTreeMap<String, String>,
}

impl MemoryPreferences {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn load(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PreferenceError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// On-disk representation.
#[derive(Debug, Serialize, Deserialize)]
struct PreferenceFile {
    version: u64,
    entries: BTreeMap<String, String>,
}

/// JSON-file preference store.
///
/// The file is read once in [`open`](FilePreferences::open) and rewritten on
/// every mutation using a temp-file-then-rename so a crash never leaves a
/// half-written file behind.
#[derive(Debug)]
pub struct FilePreferences {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FilePreferences {
    /// Open the store at `path`.
    ///
    /// - **Missing file** yields an empty store (not an error).
    /// - **Corrupted file** yields [`PreferenceError::Json`].
    /// - **Version mismatch** yields [`PreferenceError::Version`].
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PreferenceError> {
        let path = path.into();
        let entries = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            let file: PreferenceFile = serde_json::from_str(&contents)?;
            if file.version != FORMAT_VERSION {
                return Err(PreferenceError::Version {
                    found: file.version,
                    expected: FORMAT_VERSION,
                });
            }
            file.entries
        } else {
            BTreeMap::new()
        };
        tracing::debug!(
            message = "preferences.open",
            path = %path.display(),
            keys = entries.len()
        );
        Ok(Self { path, entries })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `entries` to disk, handing them back once the rename lands.
    fn write(
        &self,
        entries: BTreeMap<String, String>,
    ) -> Result<BTreeMap<String, String>, PreferenceError> {
        let file = PreferenceFile {
            version: FORMAT_VERSION,
            entries,
        };
        let json = serde_json::to_string_pretty(&file)?;

        let temp = self.path.with_extension("json.tmp");
        std::fs::write(&temp, json)?;
        std::fs::rename(&temp, &self.path)?;
        Ok(file.entries)
    }
}

impl PreferenceStore for FilePreferences {
    fn load(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.entries.get(key).cloned())
    }

    // Memory only changes after the file is written.
    fn save(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut next = self.entries.clone();
        next.insert(key.to_owned(), value.to_owned());
        self.entries = self.write(next)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PreferenceError> {
        if self.entries.contains_key(key) {
            let mut next = self.entries.clone();
            next.remove(key);
            self.entries = self.write(next)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let mut prefs = MemoryPreferences::new();
        assert!(prefs.is_empty());
        prefs.save("currentSection", "team").unwrap();
        assert_eq!(prefs.load("currentSection").unwrap().as_deref(), Some("team"));
        prefs.remove("currentSection").unwrap();
        assert_eq!(prefs.load("currentSection").unwrap(), None);
    }

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = FilePreferences::open(dir.path().join("prefs.json")).unwrap();
        assert_eq!(prefs.load("anything").unwrap(), None);
    }

    #[test]
    fn file_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let mut prefs = FilePreferences::open(&path).unwrap();
        prefs.save("currentSection", "connection").unwrap();
        drop(prefs);

        let reopened = FilePreferences::open(&path).unwrap();
        assert_eq!(
            reopened.load("currentSection").unwrap().as_deref(),
            Some("connection")
        );
    }

    #[test]
    fn corrupted_file_returns_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "not valid json {{{").unwrap();

        let err = FilePreferences::open(&path).unwrap_err();
        assert!(matches!(err, PreferenceError::Json(_)));
    }

    #[test]
    fn version_mismatch_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("future.json");
        let future = serde_json::json!({ "version": 999, "entries": {} });
        std::fs::write(&path, serde_json::to_string(&future).unwrap()).unwrap();

        let err = FilePreferences::open(&path).unwrap_err();
        assert!(err.to_string().contains("version"), "got: {err}");
    }

    #[test]
    fn atomic_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let mut prefs = FilePreferences::open(&path).unwrap();
        prefs.save("k", "v").unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn failed_write_keeps_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let mut prefs = FilePreferences::open(&path).unwrap();
        prefs.save("currentSection", "connection").unwrap();

        // A directory in the temp file's place makes every write fail.
        std::fs::create_dir(path.with_extension("json.tmp")).unwrap();

        assert!(prefs.save("currentSection", "team").is_err());
        assert_eq!(
            prefs.load("currentSection").unwrap().as_deref(),
            Some("connection")
        );
        assert!(prefs.save("fresh", "1").is_err());
        assert_eq!(prefs.load("fresh").unwrap(), None);
        assert!(prefs.remove("currentSection").is_err());
        assert_eq!(
            prefs.load("currentSection").unwrap().as_deref(),
            Some("connection")
        );

        let reopened = FilePreferences::open(&path).unwrap();
        assert_eq!(
            reopened.load("currentSection").unwrap().as_deref(),
            Some("connection")
        );
    }

    #[test]
    fn removing_missing_key_does_not_create_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let mut prefs = FilePreferences::open(&path).unwrap();
        prefs.remove("absent").unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn boxed_store_delegates() {
        let mut prefs: Box<dyn PreferenceStore> = Box::new(MemoryPreferences::new());
        prefs.save("a", "1").unwrap();
        assert_eq!(prefs.load("a").unwrap().as_deref(), Some("1"));
    }
}
