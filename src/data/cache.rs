//! Memoizing dataset cache
//!
//! The raw load is computed at most once per distinct input file. An entry is
//! keyed by the canonical path and stays valid while the file's modification
//! time and length are unchanged.

use log::info;
use rustc_hash::FxHashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use crate::core::error::{EsgError, Result};
use crate::data::dataset::Dataset;
use crate::data::loader::load_dataset;

/// Identity of a file's content as seen through its metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFingerprint {
    pub modified: Option<SystemTime>,
    pub len: u64,
}

impl FileFingerprint {
    pub fn of(path: &Path) -> Result<Self> {
        let metadata = fs::metadata(path)?;
        Ok(Self {
            modified: metadata.modified().ok(),
            len: metadata.len(),
        })
    }
}

#[derive(Debug)]
struct CacheEntry {
    fingerprint: FileFingerprint,
    dataset: Arc<Dataset>,
}

/// Loader signature; swapped out in tests
pub type LoadFn = fn(&Path) -> Result<Dataset>;

/// Session-owned cache of loaded datasets
#[derive(Debug)]
pub struct DatasetCache {
    entries: FxHashMap<PathBuf, CacheEntry>,
    loader: LoadFn,
    hits: usize,
    misses: usize,
}

impl Default for DatasetCache {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::with_loader(|path| load_dataset(path))
    }

    pub fn with_loader(loader: LoadFn) -> Self {
        Self {
            entries: FxHashMap::default(),
            loader,
            hits: 0,
            misses: 0,
        }
    }

    /// Return the cached dataset for `path`, loading it on first access or after the file changed
    pub fn get_or_load<P: AsRef<Path>>(&mut self, path: P) -> Result<Arc<Dataset>> {
        let path = path.as_ref();
        let key = fs::canonicalize(path)
            .map_err(|_| EsgError::FileNotFound(path.display().to_string()))?;
        let fingerprint = FileFingerprint::of(&key)?;

        if let Some(entry) = self.entries.get(&key)
            && entry.fingerprint == fingerprint
        {
            self.hits += 1;
            return Ok(Arc::clone(&entry.dataset));
        }

        self.misses += 1;
        if self.entries.contains_key(&key) {
            info!("{} changed on disk, reloading", key.display());
        }

        let dataset = Arc::new((self.loader)(path)?);
        self.entries.insert(
            key,
            CacheEntry {
                fingerprint,
                dataset: Arc::clone(&dataset),
            },
        );
        Ok(dataset)
    }

    /// Drop the entry for `path`; returns whether one existed
    pub fn invalidate<P: AsRef<Path>>(&mut self, path: P) -> bool {
        match fs::canonicalize(path.as_ref()) {
            Ok(key) => self.entries.remove(&key).is_some(),
            Err(_) => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }
}
