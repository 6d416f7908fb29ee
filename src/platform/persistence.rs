//! Persistence collaborator for saved filter and favorites state

use crate::validation::error::PersistenceError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Key under which the filter blob is stored
pub const FILTER_KEY: &str = "filter";

/// Key under which the favorites blob is stored
pub const FAVORITES_KEY: &str = "favorites";

/// Storage for opaque serialized blobs (JSON in practice)
///
/// `Ok(None)` means nothing has been stored yet.
pub trait PersistenceStore {
    fn read_filter(&self) -> Result<Option<String>, PersistenceError>;

    fn write_filter(&mut self, blob: &str) -> Result<(), PersistenceError>;

    fn read_favorites(&self) -> Result<Option<String>, PersistenceError>;

    fn write_favorites(&mut self, blob: &str) -> Result<(), PersistenceError>;
}

/// One JSON file per key inside a directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Use `root` for storage, creating it if necessary
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self, PersistenceError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|e| PersistenceError::WriteFailed {
            key: root.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn read_key(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PersistenceError::ReadFailed {
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn write_key(&self, key: &str, blob: &str) -> Result<(), PersistenceError> {
        // Readers never observe a partially written blob
        let target = self.path_for(key);
        let staging = self.root.join(format!("{}.json.tmp", key));
        fs::write(&staging, blob)
            .and_then(|_| fs::rename(&staging, &target))
            .map_err(|e| {
                // Leftover staging data is never read back
                let _ = fs::remove_file(&staging);
                PersistenceError::WriteFailed {
                    key: key.to_string(),
                    message: e.to_string(),
                }
            })
    }
}

impl PersistenceStore for JsonFileStore {
    fn read_filter(&self) -> Result<Option<String>, PersistenceError> {
        self.read_key(FILTER_KEY)
    }

    fn write_filter(&mut self, blob: &str) -> Result<(), PersistenceError> {
        self.write_key(FILTER_KEY, blob)
    }

    fn read_favorites(&self) -> Result<Option<String>, PersistenceError> {
        self.read_key(FAVORITES_KEY)
    }

    fn write_favorites(&mut self, blob: &str) -> Result<(), PersistenceError> {
        self.write_key(FAVORITES_KEY, blob)
    }
}
