//! Client façade and the process-wide instance

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use tracing::debug;

use crate::config::ClientConfig;
use crate::version::bulk::resolve_all;
use crate::version::cache::ManifestCache;
use crate::version::detail::VersionDetail;
use crate::version::error::{ClientError, FetchError, ResolveError};
use crate::version::fetcher::Fetcher;
use crate::version::resolver::DetailResolver;
use crate::version::transport::{ReqwestTransport, Transport};
use crate::version::types::{Manifest, ManifestEntry, ManifestV2};

/// Resolves manifests and version details against one pair of endpoints.
///
/// Detail lookups go through a memoized manifest; `manifest` and
/// `manifest_v2` always fetch fresh.
pub struct VersionClient {
    resolver: Arc<DetailResolver>,
    cache: ManifestCache,
    manifest_v2_url: String,
    concurrency: usize,
}

impl VersionClient {
    /// Creates a client that talks HTTP through `reqwest`
    pub fn new(config: &ClientConfig) -> Result<Self, FetchError> {
        let transport = ReqwestTransport::new(Duration::from_millis(config.timeout_ms))?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Creates a client on top of a custom transport
    pub fn with_transport(config: &ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            resolver: Arc::new(DetailResolver::new(
                Fetcher::new(transport),
                config.max_idle_buffers,
            )),
            cache: ManifestCache::new(&config.manifest_url),
            manifest_v2_url: config.manifest_v2_url.clone(),
            concurrency: config.concurrency(),
        }
    }

    /// Fetches the manifest, bypassing the cache
    pub async fn manifest(&self) -> Result<Manifest, FetchError> {
        self.resolver.fetcher().fetch(self.cache.url()).await
    }

    /// Fetches the v2 manifest. Never cached.
    pub async fn manifest_v2(&self) -> Result<ManifestV2, FetchError> {
        self.resolver.fetcher().fetch(&self.manifest_v2_url).await
    }

    /// The memoized manifest. A failed load is replayed as
    /// [`ResolveError::PoisonedCache`] until [`invalidate`](Self::invalidate).
    pub async fn cached_manifest(&self) -> Result<Arc<Manifest>, ResolveError> {
        self.cache
            .get_or_load(self.resolver.fetcher())
            .await
            .map_err(ResolveError::PoisonedCache)
    }

    /// Forgets the memoized manifest, including a memoized failure
    pub async fn invalidate(&self) {
        self.cache.invalidate().await;
    }

    /// Detail of version `id`
    pub async fn version(&self, id: &str) -> Result<VersionDetail, ResolveError> {
        let manifest = self.cached_manifest().await?;
        self.resolver.resolve(&manifest, id).await
    }

    /// Detail of a specific manifest entry, without a lookup
    pub async fn entry_detail(
        &self,
        entry: &ManifestEntry,
    ) -> Result<VersionDetail, ResolveError> {
        self.resolver.resolve_entry(entry).await
    }

    pub async fn latest_release(&self) -> Result<VersionDetail, ResolveError> {
        let manifest = self.cached_manifest().await?;
        self.resolver.latest_release(&manifest).await
    }

    pub async fn latest_snapshot(&self) -> Result<VersionDetail, ResolveError> {
        let manifest = self.cached_manifest().await?;
        self.resolver.latest_snapshot(&manifest).await
    }

    /// Details of every version in the memoized manifest, in completion order
    pub async fn all_versions(&self) -> Result<Vec<VersionDetail>, ResolveError> {
        let manifest = self.cached_manifest().await?;
        resolve_all(self.resolver.clone(), manifest, self.concurrency).await
    }

    /// Details of every version in `manifest`, in completion order
    pub async fn resolve_all(
        &self,
        manifest: Arc<Manifest>,
    ) -> Result<Vec<VersionDetail>, ResolveError> {
        resolve_all(self.resolver.clone(), manifest, self.concurrency).await
    }

    /// Hands a detail the caller is done with back to the buffer pool
    pub fn recycle(&self, detail: VersionDetail) {
        self.resolver.recycle(detail);
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }
}

static GLOBAL: OnceLock<VersionClient> = OnceLock::new();

/// Installs the process-wide client. Fails if it already exists.
pub fn init_global(config: &ClientConfig) -> Result<&'static VersionClient, ClientError> {
    let client = VersionClient::new(config)?;
    GLOBAL
        .set(client)
        .map_err(|_| ClientError::AlreadyInitialized)?;
    Ok(global())
}

/// The process-wide client, created with the default config on first use
/// unless [`init_global`] ran before.
///
/// # Panics
/// If the HTTP client cannot be constructed (no TLS backend available).
pub fn global() -> &'static VersionClient {
    GLOBAL.get_or_init(|| {
        debug!("Creating process-wide client with default config");
        VersionClient::new(&ClientConfig::default()).expect("Failed to create HTTP client")
    })
}
