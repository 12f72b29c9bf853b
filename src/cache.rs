//! On-disk cache of resolved windows.
//!
//! Resolving a window costs one `xprop -id` call, so resolved
//! [`WindowRecord`]s are kept in a JSON file and reused while they are
//! younger than the configured TTL.
//!
//! # File format
//!
//! ```json
//! [
//!   {"window_id": "0x3200007", "names": ["Navigator", "firefox"],
//!    "process_id": "4821", "timestamp": 1700000000}
//! ]
//! ```
//!
//! The file is always rewritten as a whole; records are never appended.
//! It is not locked, so two concurrent runs race and the last writer wins.

use crate::window::WindowRecord;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Errors from reading or writing the cache file.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cache json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// In-memory window records plus the file that backs them.
///
/// Records are keyed by window id, so the store never holds two records for
/// the same window.
#[derive(Debug)]
pub struct CacheStore {
    path: PathBuf,
    ttl: Duration,
    persist: bool,
    records: HashMap<String, WindowRecord>,
}

impl CacheStore {
    /// Create an empty store backed by `path`.
    ///
    /// Nothing is read until [`load`](Self::load) is called.
    pub fn new(path: impl AsRef<Path>, ttl: Duration) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            ttl,
            persist: true,
            records: HashMap::new(),
        }
    }

    /// Create a store that keeps records in memory only and never touches
    /// the filesystem.
    pub fn in_memory(ttl: Duration) -> Self {
        Self {
            path: PathBuf::new(),
            ttl,
            persist: false,
            records: HashMap::new(),
        }
    }

    /// The filesystem path of the cache file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Best-effort read of the cache file.
    ///
    /// Any failure leaves the store empty; a cold cache only costs a few
    /// extra `xprop` calls.
    pub fn load(&mut self) {
        if !self.persist {
            return;
        }
        match read_records(&self.path) {
            Ok(records) => {
                debug!("loaded {} cached window(s) from {}", records.len(), self.path.display());
                self.records = records
                    .into_iter()
                    .map(|r| (r.window_id.clone(), r))
                    .collect();
            }
            Err(e) => debug!("no usable cache at {} ({})", self.path.display(), e),
        }
    }

    /// Merge `records` into the store, replacing any record with the same
    /// window id, then rewrite the cache file with the full set.
    ///
    /// Stale records are dropped from the file here, and only here.
    pub fn save(&mut self, records: Vec<WindowRecord>, now: i64) -> Result<(), CacheError> {
        for record in records {
            self.records.insert(record.window_id.clone(), record);
        }
        let ttl = self.ttl;
        self.records.retain(|_, r| r.is_fresh(now, ttl));
        if !self.persist {
            return Ok(());
        }

        let mut all: Vec<&WindowRecord> = self.records.values().collect();
        all.sort_by(|a, b| a.window_id.cmp(&b.window_id));
        let json = serde_json::to_vec(&all)?;

        if let Some(dir) = self.path.parent() {
            create_private_dir(dir)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        debug!("wrote {} window(s) to {}", all.len(), self.path.display());
        Ok(())
    }

    /// Delete the cache file and forget every record.
    pub fn invalidate(&mut self) {
        self.records.clear();
        if !self.persist {
            return;
        }
        match fs::remove_file(&self.path) {
            Ok(()) => info!("removed cache {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("failed to remove cache {}: {}", self.path.display(), e),
        }
    }

    /// Return the record for `window_id` if it is still fresh at `now`.
    pub fn lookup(&self, window_id: &str, now: i64) -> Option<&WindowRecord> {
        self.records
            .get(window_id)
            .filter(|r| r.is_fresh(now, self.ttl))
    }

    /// Every record currently held, fresh or not.
    pub fn records(&self) -> impl Iterator<Item = &WindowRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn read_records(path: &Path) -> Result<Vec<WindowRecord>, CacheError> {
    let contents = fs::read(path)?;
    Ok(serde_json::from_slice(&contents)?)
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(0o700).create(dir)
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dir)
}
