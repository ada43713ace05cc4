//! Persistence gateway: one named storage slot holding the whole collection.
//!
//! The slot is read once on startup and overwritten in full on every save.
//! Reading never fails from the caller's point of view; anything unusable in
//! the slot is reported and treated as an empty collection.

use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use tempfile::NamedTempFile;

use crate::error::StoreError;
use crate::model::Quiz;

/// Name of the slot the collection lives in.
pub const STORAGE_KEY: &str = "quizmaker_quizzes";

/// A single key-value slot holding the serialized collection.
pub trait StorageSlot: Send + Sync {
    /// Read the raw slot contents. `Ok(None)` means the slot was never written.
    fn read(&self) -> Result<Option<String>, StoreError>;

    /// Replace the slot contents in a single write.
    fn write(&self, contents: &str) -> Result<(), StoreError>;
}

/// A slot backed by a JSON file on disk.
///
/// Writes go to a temporary file next to the target and are renamed over it,
/// so readers only ever see a complete collection.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Slot file for `key` inside `dir` (`<dir>/<key>.json`).
    pub fn in_dir(dir: &Path, key: &str) -> Self {
        Self::new(dir.join(format!("{key}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageSlot for FileSlot {
    fn read(&self) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, contents: &str) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }
}

/// An in-process slot. Counts writes so callers can observe persistence.
#[derive(Debug, Default)]
pub struct MemorySlot {
    contents: Mutex<Option<String>>,
    writes: AtomicUsize,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot that already holds `contents`.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Mutex::new(Some(contents.into())),
            writes: AtomicUsize::new(0),
        }
    }

    /// Number of writes performed so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }

    /// Current raw contents.
    pub fn contents(&self) -> Option<String> {
        self.contents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl StorageSlot for MemorySlot {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.contents())
    }

    fn write(&self, contents: &str) -> Result<(), StoreError> {
        *self
            .contents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(contents.to_string());
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

impl<S: StorageSlot + ?Sized> StorageSlot for std::sync::Arc<S> {
    fn read(&self) -> Result<Option<String>, StoreError> {
        (**self).read()
    }

    fn write(&self, contents: &str) -> Result<(), StoreError> {
        (**self).write(contents)
    }
}

/// Loads and saves the quiz collection through a [`StorageSlot`].
pub struct QuizStore {
    slot: Box<dyn StorageSlot>,
}

impl QuizStore {
    pub fn new(slot: impl StorageSlot + 'static) -> Self {
        Self {
            slot: Box::new(slot),
        }
    }

    /// Store backed by `<dir>/<key>.json`.
    pub fn in_dir(dir: &Path, key: &str) -> Self {
        Self::new(FileSlot::in_dir(dir, key))
    }

    /// Load the collection, falling back to an empty one on any problem.
    pub fn load(&self) -> Vec<Quiz> {
        match self.try_load() {
            Ok(quizzes) => quizzes,
            Err(e) => {
                tracing::warn!("failed to load quizzes, starting empty: {e}");
                Vec::new()
            }
        }
    }

    /// Load the collection, reporting why the slot is unusable.
    ///
    /// Malformed individual records are skipped with a warning, and only the
    /// first record for any id is kept.
    pub fn try_load(&self) -> Result<Vec<Quiz>, StoreError> {
        let Some(raw) = self.slot.read()? else {
            return Ok(Vec::new());
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        let records: Vec<serde_json::Value> =
            serde_json::from_str(&raw).map_err(StoreError::Corrupt)?;

        let mut seen = HashSet::new();
        let quizzes = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match serde_json::from_value::<Quiz>(record) {
                Ok(quiz) => Some(quiz),
                Err(e) => {
                    tracing::warn!("skipping unreadable stored quiz at position {index}: {e}");
                    None
                }
            })
            .filter(|quiz| {
                if !quiz.is_well_formed() {
                    tracing::warn!("skipping malformed stored quiz {}", quiz.id);
                    return false;
                }
                if !seen.insert(quiz.id.clone()) {
                    tracing::warn!("skipping stored quiz with duplicate id {}", quiz.id);
                    return false;
                }
                true
            })
            .collect();

        Ok(quizzes)
    }

    /// Overwrite the slot with the full collection.
    pub fn save(&self, quizzes: &[Quiz]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(quizzes).map_err(StoreError::Serialize)?;
        self.slot.write(&json)
    }
}
