// src/store.rs
//! Persisted network snapshot.
//!
//! One JSON document per store (see `model` for the shape). Writes go to a
//! sibling `.tmp` file first and are renamed into place, so a reader never
//! sees a half-written snapshot.

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use crate::error::StoreError;
use crate::model::BusNetwork;

pub trait Store: Send + Sync {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<BusNetwork>, StoreError>;
    fn save(&self, network: &BusNetwork) -> Result<(), StoreError>;
}

/// Snapshot in a single JSON file.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_err(&self, source: io::Error) -> StoreError {
        StoreError::Io { path: self.path.clone(), source }
    }
}

impl Store for JsonFileStore {
    fn load(&self) -> Result<Option<BusNetwork>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_err(e)),
        };
        let network = serde_json::from_str(&text)
            .map_err(|source| StoreError::Json { path: self.path.clone(), source })?;
        Ok(Some(network))
    }

    fn save(&self, network: &BusNetwork) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
            }
        }

        let json = serde_json::to_string_pretty(network)
            .map_err(|source| StoreError::Json { path: self.path.clone(), source })?;

        let tmp = self.tmp_path();
        fs::write(&tmp, json).map_err(|source| StoreError::Io { path: tmp.clone(), source })?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(self.io_err(e));
        }

        logf!(
            "Store: saved {} routes to {}",
            network.routes().len(),
            self.path.display()
        );
        Ok(())
    }
}

/// In-process store, for tests and one-shot runs.
#[derive(Debug, Default)]
pub struct MemoryStore(Mutex<Option<BusNetwork>>);

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(network: BusNetwork) -> Self {
        Self(Mutex::new(Some(network)))
    }
}

impl Store for MemoryStore {
    fn load(&self) -> Result<Option<BusNetwork>, StoreError> {
        let guard = self.0.lock().unwrap_or_else(|p| p.into_inner());
        Ok(guard.clone())
    }

    fn save(&self, network: &BusNetwork) -> Result<(), StoreError> {
        let mut guard = self.0.lock().unwrap_or_else(|p| p.into_inner());
        *guard = Some(network.clone());
        Ok(())
    }
}
