//! Durable key-value storage behind the squad store

use super::error::SaveError;
use std::collections::HashMap;
use std::fs::{remove_file, rename, File};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

/// Storage for independently keyed records.
///
/// Opened by the caller, handed to the store for the session, closed at the
/// end. Values are opaque bytes; the store owns the encoding.
pub trait StateRepository {
    /// `Ok(None)` when nothing has been stored under `key`.
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, SaveError>;

    fn save(&mut self, key: &str, value: &[u8]) -> Result<(), SaveError>;

    fn close(&mut self) -> Result<(), SaveError> {
        Ok(())
    }
}

/// In-process storage; state lives as long as the repository value.
#[derive(Debug, Default, Clone)]
pub struct MemoryRepository {
    records: HashMap<String, Vec<u8>>,
    closed: bool,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    pub fn raw(&self, key: &str) -> Option<&[u8]> {
        self.records.get(key).map(Vec::as_slice)
    }

    /// Overwrite a record directly, bypassing the store.
    pub fn insert_raw(&mut self, key: &str, value: Vec<u8>) {
        self.records.insert(key.to_string(), value);
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl StateRepository for MemoryRepository {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, SaveError> {
        if self.closed {
            return Err(SaveError::Closed);
        }
        Ok(self.records.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &[u8]) -> Result<(), SaveError> {
        if self.closed {
            return Err(SaveError::Closed);
        }
        self.records.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn close(&mut self) -> Result<(), SaveError> {
        self.closed = true;
        Ok(())
    }
}

/// One file per key inside a directory, replaced atomically on every save.
#[derive(Debug)]
pub struct FileRepository {
    dir: PathBuf,
    closed: bool,
}

impl FileRepository {
    /// Open (and create if needed) the storage directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, SaveError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        log::debug!("Opened state repository at {:?}", dir);
        Ok(Self { dir, closed: false })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Remove a stored record; no-op if absent.
    pub fn remove(&mut self, key: &str) -> Result<(), SaveError> {
        let path = self.record_path(key)?;
        match remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn record_path(&self, key: &str) -> Result<PathBuf, SaveError> {
        Self::validate_key(key)?;
        Ok(self.dir.join(format!("{key}.dat")))
    }

    fn validate_key(key: &str) -> Result<(), SaveError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(SaveError::InvalidKey { key: key.to_string() });
        }
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), SaveError> {
        if self.closed {
            return Err(SaveError::Closed);
        }
        Ok(())
    }
}

impl StateRepository for FileRepository {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, SaveError> {
        self.ensure_open()?;
        let path = self.record_path(key)?;

        let mut file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;

        log::debug!("Loaded {} bytes from {:?}", data.len(), path);
        Ok(Some(data))
    }

    fn save(&mut self, key: &str, value: &[u8]) -> Result<(), SaveError> {
        self.ensure_open()?;
        let path = self.record_path(key)?;

        // Atomic save: write to temp file, then rename
        let temp_path = path.with_extension("tmp");
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(value)?;
            file.flush()?;
            file.sync_all()?;
        }
        rename(&temp_path, &path)?;

        log::debug!("Saved {} bytes to {:?}", value.len(), path);
        Ok(())
    }

    fn close(&mut self) -> Result<(), SaveError> {
        self.closed = true;
        Ok(())
    }
}
