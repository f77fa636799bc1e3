use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write as _};
use std::path::{Path, PathBuf};

use crate::error::CoreError;

/// String-keyed store of serialized values. Each write replaces the whole
/// value for its key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError>;
    fn remove(&mut self, key: &str) -> Result<(), CoreError>;

    /// Read-modify-write of one key. `f` receives the current value and
    /// returns its result plus the value to store, or `None` to leave the key
    /// untouched. Backends shared between processes run this atomically.
    fn update<T, F>(&mut self, key: &str, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(Option<String>) -> Result<(T, Option<String>), CoreError>,
    {
        let (value, write) = f(self.get(key)?)?;
        if let Some(raw) = write {
            self.set(key, &raw)?;
        }
        Ok(value)
    }
}

/// In-process store, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), CoreError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Directory-backed store: each key lives at `<root>/<key>.json`.
///
/// Access to a key is serialized through `<root>/<key>.lock`: shared for
/// reads, exclusive for writes and [`KeyValueStore::update`]. Values are
/// written to `<key>.json.tmp` and renamed into place, so a crash mid-write
/// leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> Result<PathBuf, CoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(CoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }

    fn lock(&self, key: &str, exclusive: bool) -> Result<fs::File, CoreError> {
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(self.root.join(format!("{key}.lock")))?;
        if exclusive {
            fs2::FileExt::lock_exclusive(&file).map_err(CoreError::Io)?;
        } else {
            fs2::FileExt::lock_shared(&file).map_err(CoreError::Io)?;
        }
        Ok(file)
    }
}

fn read_value(path: &Path) -> Result<Option<String>, CoreError> {
    match fs::read_to_string(path) {
        Ok(data) => Ok(Some(data)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn write_value(path: &Path, value: &str) -> Result<(), CoreError> {
    let tmp = path.with_extension("json.tmp");
    let mut file = fs::File::create(&tmp)?;
    file.write_all(value.as_bytes())?;
    file.sync_all()?;
    fs::rename(&tmp, path)?;
    tracing::debug!("Wrote {} bytes to {}", value.len(), path.display());
    Ok(())
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let path = self.key_path(key)?;
        let lock = self.lock(key, false)?;
        let read = read_value(&path);
        fs2::FileExt::unlock(&lock).map_err(CoreError::Io)?;
        read
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        let path = self.key_path(key)?;
        let lock = self.lock(key, true)?;
        let written = write_value(&path, value);
        fs2::FileExt::unlock(&lock).map_err(CoreError::Io)?;
        written
    }

    fn remove(&mut self, key: &str) -> Result<(), CoreError> {
        let path = self.key_path(key)?;
        let lock = self.lock(key, true)?;
        let removed = match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        };
        fs2::FileExt::unlock(&lock).map_err(CoreError::Io)?;
        removed
    }

    fn update<T, F>(&mut self, key: &str, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(Option<String>) -> Result<(T, Option<String>), CoreError>,
    {
        let path = self.key_path(key)?;
        // Re-read under the lock so concurrent writers never overwrite each other.
        let lock = self.lock(key, true)?;
        let outcome = read_value(&path).and_then(f).and_then(|(value, write)| {
            if let Some(raw) = write {
                write_value(&path, &raw)?;
            }
            Ok(value)
        });
        fs2::FileExt::unlock(&lock).map_err(CoreError::Io)?;
        outcome
    }
}
