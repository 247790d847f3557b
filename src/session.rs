//! Per-invocation session
//!
//! Bundles the API client, the query cache and the settings that every
//! service needs, the way a storage coordinator bundles repositories.

use crate::api::ApiClient;
use crate::cache::{Mutation, QueryCache};
use crate::config::{Settings, TrackerPaths};
use crate::error::TrackerResult;

pub struct Session {
    pub api: ApiClient,
    pub cache: QueryCache,
    pub settings: Settings,
}

impl Session {
    pub fn new(api: ApiClient, cache: QueryCache, settings: Settings) -> Self {
        Self {
            api,
            cache,
            settings,
        }
    }

    /// Build a session from the settings file and the on-disk cache
    ///
    /// The cache is keyed to this base URL and token; data cached for any
    /// other pair is dropped.
    pub fn open(paths: &TrackerPaths, settings: Settings, token: Option<String>) -> TrackerResult<Self> {
        paths.ensure_directories()?;

        let mut api = ApiClient::new(&settings.api_base_url)?;
        if let Some(token) = token {
            api.set_token(token);
        }
        let cache = QueryCache::open(paths.cache_file(), settings.cache_enabled, api.cache_owner());

        Ok(Self::new(api, cache, settings))
    }

    /// Record a successful write and drop the cached data it affects
    pub fn invalidate(&self, mutation: Mutation) -> TrackerResult<()> {
        self.cache.apply(mutation)
    }

    /// Persist the cache; called once at the end of an invocation
    pub fn finish(&self) -> TrackerResult<()> {
        self.cache.save()
    }

    pub fn near_limit_threshold(&self) -> f64 {
        self.settings.near_limit_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheKey;
    use chrono::Utc;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let session = Session::open(&paths, Settings::default(), Some("abc".into())).unwrap();

        assert!(paths.cache_dir().exists());
        assert!(session.api.has_token());
        assert!(session.cache.is_enabled());
    }

    #[test]
    fn test_finish_writes_cache_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let session = Session::open(&paths, Settings::default(), None).unwrap();

        session.finish().unwrap();
        assert!(paths.cache_file().exists());
    }

    #[test]
    fn test_new_token_gets_a_fresh_cache() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let first = Session::open(&paths, Settings::default(), Some("first".into())).unwrap();
        first.cache.put_at(CacheKey::Balance, &1, Utc::now()).unwrap();
        first.finish().unwrap();

        let again = Session::open(&paths, Settings::default(), Some("first".into())).unwrap();
        assert_eq!(again.cache.len(), 1);

        let second = Session::open(&paths, Settings::default(), Some("second".into())).unwrap();
        assert!(second.cache.is_empty());
    }
}
