//! Resolve the launcher version manifest and per-version detail documents.
//!
//! The free functions below use the process-wide [`VersionClient`]; build
//! your own client with [`VersionClient::new`] to use other endpoints or to
//! keep cache state separate.

pub mod config;
pub mod version;

pub use version::client::{VersionClient, global, init_global};
pub use version::detail::VersionDetail;
pub use version::error::{ClientError, FetchError, ResolveError};
pub use version::types::{Manifest, ManifestEntry, ManifestEntryV2, ManifestV2, VersionKind};

/// Fetches the manifest, bypassing the cache
pub async fn manifest() -> Result<Manifest, FetchError> {
    global().manifest().await
}

/// Fetches the v2 manifest, bypassing the cache
pub async fn manifest_v2() -> Result<ManifestV2, FetchError> {
    global().manifest_v2().await
}

/// Detail of version `id`
pub async fn version(id: &str) -> Result<VersionDetail, ResolveError> {
    global().version(id).await
}

pub async fn latest_release() -> Result<VersionDetail, ResolveError> {
    global().latest_release().await
}

pub async fn latest_snapshot() -> Result<VersionDetail, ResolveError> {
    global().latest_snapshot().await
}

/// Details of every version, fetched concurrently
pub async fn all_versions() -> Result<Vec<VersionDetail>, ResolveError> {
    global().all_versions().await
}
