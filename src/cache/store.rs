//! Disk-backed query cache
//!
//! Holds the last successful response for each [`CacheKey`] together with
//! its fetch time. Entries older than the key's stale time are refetched.
//! The file is disposable: a corrupt file is logged and replaced.
//!
//! Each file records the session that filled it (see
//! [`ApiClient::cache_owner`](crate::api::ApiClient::cache_owner)). Entries
//! written for another server or another token are never served.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use super::keys::{CacheKey, CacheScope, Mutation};
use crate::error::{TrackerError, TrackerResult};
use crate::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: CacheKey,
    pub fetched_at: DateTime<Utc>,
    pub data: Value,
}

impl CacheEntry {
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now - self.fetched_at < self.key.stale_time()
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheFile {
    #[serde(default)]
    owner: Option<String>,
    #[serde(default)]
    entries: BTreeMap<String, CacheEntry>,
}

pub struct QueryCache {
    path: Option<PathBuf>,
    owner: Option<String>,
    enabled: bool,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl QueryCache {
    /// Load the cache file at `path` for `owner`; a disabled cache never serves hits
    ///
    /// Entries stored under a different owner are dropped on load.
    pub fn open(path: PathBuf, enabled: bool, owner: impl Into<String>) -> Self {
        let owner = owner.into();
        let entries = match read_json::<CacheFile, _>(&path) {
            Ok(file) if file.owner.as_deref() == Some(owner.as_str()) => file.entries.into_iter().collect(),
            Ok(file) => {
                if !file.entries.is_empty() {
                    tracing::info!(
                        path = %path.display(),
                        discarded = file.entries.len(),
                        "cache belongs to another server or token, starting empty"
                    );
                }
                HashMap::new()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "discarding unreadable cache");
                HashMap::new()
            }
        };

        Self {
            path: Some(path),
            owner: Some(owner),
            enabled,
            entries: RwLock::new(entries),
        }
    }

    /// Delete the cache file at `path`, if any; returns whether one existed
    pub fn discard_file(path: &Path) -> TrackerResult<bool> {
        match std::fs::remove_file(path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "cache file removed");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Cache that lives only for this process
    pub fn in_memory() -> Self {
        Self {
            path: None,
            owner: None,
            enabled: true,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn lock_error(e: impl std::fmt::Display) -> TrackerError {
        TrackerError::Cache(format!("Failed to acquire cache lock: {}", e))
    }

    /// Cached value for `key` if present and fresh at `now`
    pub fn get_at<T: DeserializeOwned>(&self, key: &CacheKey, now: DateTime<Utc>) -> TrackerResult<Option<T>> {
        if !self.enabled {
            return Ok(None);
        }

        let entries = self.entries.read().map_err(Self::lock_error)?;
        let Some(entry) = entries.get(&key.storage_key()) else {
            return Ok(None);
        };
        if !entry.is_fresh(now) {
            tracing::debug!(key = %key, "cache stale");
            return Ok(None);
        }

        match serde_json::from_value(entry.data.clone()) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "cached value no longer decodes");
                Ok(None)
            }
        }
    }

    pub fn put_at<T: Serialize>(&self, key: CacheKey, value: &T, now: DateTime<Utc>) -> TrackerResult<()> {
        if !self.enabled {
            return Ok(());
        }

        let data = serde_json::to_value(value)?;
        let mut entries = self.entries.write().map_err(Self::lock_error)?;
        entries.insert(
            key.storage_key(),
            CacheEntry {
                key,
                fetched_at: now,
                data,
            },
        );
        Ok(())
    }

    /// Serve `key` from the cache, or call `fetch` and remember the result
    ///
    /// Errors from `fetch` leave the cache untouched.
    pub fn get_or_fetch<T, F>(&self, key: CacheKey, fetch: F) -> TrackerResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> TrackerResult<T>,
    {
        let now = Utc::now();
        if let Some(hit) = self.get_at(&key, now)? {
            tracing::debug!(key = %key, "cache hit");
            return Ok(hit);
        }

        tracing::debug!(key = %key, "cache miss");
        let value = fetch()?;
        self.put_at(key, &value, now)?;
        Ok(value)
    }

    /// Drop every entry in `scope`; returns how many were removed
    pub fn invalidate(&self, scope: CacheScope) -> TrackerResult<usize> {
        let mut entries = self.entries.write().map_err(Self::lock_error)?;
        let before = entries.len();
        entries.retain(|_, entry| entry.key.scope() != scope);
        Ok(before - entries.len())
    }

    /// Invalidate everything a successful mutation affects
    pub fn apply(&self, mutation: Mutation) -> TrackerResult<()> {
        let mut removed = 0;
        for scope in mutation.invalidates() {
            removed += self.invalidate(*scope)?;
        }
        tracing::debug!(?mutation, removed, "cache invalidated");
        Ok(())
    }

    pub fn clear(&self) -> TrackerResult<()> {
        self.entries.write().map_err(Self::lock_error)?.clear();
        Ok(())
    }

    /// Snapshot of entries sorted by key, for `vatu cache show`
    pub fn entries(&self) -> TrackerResult<Vec<CacheEntry>> {
        let entries = self.entries.read().map_err(Self::lock_error)?;
        let mut list: Vec<_> = entries.values().cloned().collect();
        list.sort_by_key(|e| e.key.storage_key());
        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Persist to disk; a no-op for in-memory caches
    pub fn save(&self) -> TrackerResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let entries = self.entries.read().map_err(Self::lock_error)?;
        let file = CacheFile {
            owner: self.owner.clone(),
            entries: entries
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        };
        write_json_atomic(path, &file)
    }
}
