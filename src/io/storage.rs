use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tempfile::NamedTempFile;

/// Error type for storage slot access
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
    #[error("invalid storage key {0:?}: must be a plain file name")]
    InvalidKey(String),
}

/// A string-keyed slot store. The task collection lives in one slot.
pub trait Storage {
    /// Read a slot's raw bytes. `Ok(None)` means the slot has never been
    /// written. The bytes are not required to be valid UTF-8.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Overwrite a slot wholesale.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Keep a copy of a slot whose contents could not be parsed, before it
    /// gets overwritten. Stores without a place for such copies do nothing.
    fn preserve(&mut self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// File-backed slots
// ---------------------------------------------------------------------------

/// Slots stored as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing a slot
    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Path of the backup written by [`Storage::preserve`]
    pub fn backup_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json.bak", key))
    }
}

/// Keys name a file directly inside the data directory
fn check_key(key: &str) -> Result<(), StorageError> {
    let bad = key.is_empty()
        || key == "."
        || key == ".."
        || key.contains(['/', '\\', '\0'])
        || key.contains("..");
    if bad {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        check_key(key)?;
        let path = self.slot_path(key);
        match fs::read(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::ReadError { path, source }),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        check_key(key)?;
        let path = self.slot_path(key);
        tracing::debug!(path = %path.display(), bytes = value.len(), "writing slot");
        atomic_write(&path, value.as_bytes()).map_err(|source| StorageError::WriteError {
            path,
            source,
        })
    }

    fn preserve(&mut self, key: &str) -> Result<(), StorageError> {
        check_key(key)?;
        let path = self.slot_path(key);
        let bak = self.backup_path(key);
        fs::copy(&path, &bak).map_err(|source| StorageError::WriteError { path: bak, source })?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-memory slots
// ---------------------------------------------------------------------------

/// In-memory slots. Clones share the same underlying map, so a test can keep
/// a handle and inspect what the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Rc<RefCell<HashMap<String, String>>>,
    writes: Rc<RefCell<usize>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded with one slot
    pub fn with_slot(key: &str, value: &str) -> Self {
        let storage = Self::default();
        storage
            .slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        storage
    }

    /// Current contents of a slot
    pub fn get(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }

    /// Number of writes performed so far
    pub fn write_count(&self) -> usize {
        *self.writes.borrow()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.get(key).map(String::into_bytes))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        *self.writes.borrow_mut() += 1;
        Ok(())
    }
}
