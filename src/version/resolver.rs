//! Per-version detail resolution
//!
//! Looks an identifier up in a manifest and decodes the entry's detail
//! document into a pooled [`VersionDetail`] buffer.

use tracing::debug;

use crate::version::detail::VersionDetail;
use crate::version::error::ResolveError;
use crate::version::fetcher::Fetcher;
use crate::version::pool::Pool;
use crate::version::types::{Manifest, ManifestEntry};

pub struct DetailResolver {
    fetcher: Fetcher,
    pool: Pool<VersionDetail>,
}

impl DetailResolver {
    pub fn new(fetcher: Fetcher, max_idle_buffers: usize) -> Self {
        Self {
            fetcher,
            pool: Pool::new(max_idle_buffers),
        }
    }

    pub fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }

    /// Resolves the detail of version `id`
    ///
    /// # Returns
    /// * `Ok(VersionDetail)` - The decoded detail, whose `id` equals `id`
    /// * `Err(ResolveError::NotFound)` - If no manifest entry has that id
    /// * `Err(ResolveError::IdentifierMismatch | KindMismatch)` - If the detail
    ///   disagrees with its manifest entry
    /// * `Err(ResolveError::Fetch)` - If fetching or decoding the detail fails
    pub async fn resolve(
        &self,
        manifest: &Manifest,
        id: &str,
    ) -> Result<VersionDetail, ResolveError> {
        let entry = manifest
            .entry(id)
            .ok_or_else(|| ResolveError::NotFound(id.to_string()))?;
        self.resolve_entry(entry).await
    }

    /// Resolves the detail of a specific manifest entry
    pub async fn resolve_entry(
        &self,
        entry: &ManifestEntry,
    ) -> Result<VersionDetail, ResolveError> {
        let mut buffer = self.pool.acquire();
        // On any early return the guard hands the buffer back
        self.fetcher.fetch_into(&entry.url, &mut *buffer).await?;

        if buffer.id != entry.id {
            return Err(ResolveError::IdentifierMismatch {
                expected: entry.id.clone(),
                actual: buffer.id.clone(),
            });
        }
        if buffer.kind != entry.kind {
            return Err(ResolveError::KindMismatch {
                id: entry.id.clone(),
                expected: entry.kind.clone(),
                actual: buffer.kind.clone(),
            });
        }

        debug!("Resolved {} ({})", entry.id, buffer.kind);
        Ok(buffer.take())
    }

    pub async fn latest_release(
        &self,
        manifest: &Manifest,
    ) -> Result<VersionDetail, ResolveError> {
        self.resolve(manifest, &manifest.latest.release).await
    }

    pub async fn latest_snapshot(
        &self,
        manifest: &Manifest,
    ) -> Result<VersionDetail, ResolveError> {
        self.resolve(manifest, &manifest.latest.snapshot).await
    }

    /// Hands a detail the caller no longer needs back to the buffer pool
    pub fn recycle(&self, detail: VersionDetail) {
        self.pool.release(detail);
    }

    pub fn idle_buffers(&self) -> usize {
        self.pool.idle()
    }
}
