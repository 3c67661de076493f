//! Memoized manifest load
//!
//! The first caller of [`ManifestCache::get_or_load`] fetches the manifest;
//! every later caller receives that outcome, success or failure, until
//! [`ManifestCache::invalidate`] is called. Concurrent first callers wait on
//! the same load instead of racing.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::version::error::FetchError;
use crate::version::fetcher::Fetcher;
use crate::version::types::Manifest;

pub type ManifestResult = Result<Arc<Manifest>, Arc<FetchError>>;

#[derive(Debug, Clone)]
enum CacheState {
    Unloaded,
    Loaded(ManifestResult),
}

pub struct ManifestCache {
    url: String,
    state: Mutex<CacheState>,
}

impl ManifestCache {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            state: Mutex::new(CacheState::Unloaded),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the memoized manifest, loading it on first use
    pub async fn get_or_load(&self, fetcher: &Fetcher) -> ManifestResult {
        // Held across the fetch so that concurrent first callers share one load
        let mut state = self.state.lock().await;

        if let CacheState::Loaded(result) = &*state {
            return result.clone();
        }

        debug!("Loading manifest from {}", self.url);
        let result = fetcher
            .fetch::<Manifest>(&self.url)
            .await
            .map(Arc::new)
            .map_err(Arc::new);

        match &result {
            Ok(manifest) => info!(
                "Loaded manifest with {} versions",
                manifest.versions.len()
            ),
            Err(_) => info!("Manifest load failed; failure cached until invalidated"),
        }

        *state = CacheState::Loaded(result.clone());
        result
    }

    /// Drops the memoized outcome; the next `get_or_load` fetches again
    pub async fn invalidate(&self) {
        *self.state.lock().await = CacheState::Unloaded;
        debug!("Manifest cache invalidated");
    }

    pub async fn is_loaded(&self) -> bool {
        matches!(*self.state.lock().await, CacheState::Loaded(_))
    }
}
