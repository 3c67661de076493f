//! Concurrent resolution of every version in a manifest
//!
//! One task per entry, at most `limit` of them fetching at once. The first
//! task to fail records its error and cancels the rest; the caller then gets
//! that error and nothing else. Successful results arrive in completion
//! order.

use std::sync::{Arc, Mutex};

use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::version::detail::VersionDetail;
use crate::version::error::ResolveError;
use crate::version::resolver::DetailResolver;
use crate::version::types::Manifest;

/// Resolves the detail of every entry in `manifest`
///
/// # Returns
/// * `Ok(Vec<VersionDetail>)` - One detail per entry, in completion order
/// * `Err(ResolveError)` - The first error any worker hit; no partial results
pub async fn resolve_all(
    resolver: Arc<DetailResolver>,
    manifest: Arc<Manifest>,
    limit: usize,
) -> Result<Vec<VersionDetail>, ResolveError> {
    let total = manifest.versions.len();
    if total == 0 {
        return Ok(Vec::new());
    }

    let limit = limit.max(1);
    info!("Resolving {} versions (concurrency: {})", total, limit);

    let permits = Arc::new(Semaphore::new(limit));
    let cancel = CancellationToken::new();
    let first_error: Arc<Mutex<Option<ResolveError>>> = Arc::new(Mutex::new(None));
    // Room for every result, so publishing never waits on the collector
    let (tx, mut rx) = mpsc::channel(total);

    let mut workers = JoinSet::new();
    for index in 0..total {
        let resolver = resolver.clone();
        let manifest = manifest.clone();
        let permits = permits.clone();
        let cancel = cancel.clone();
        let first_error = first_error.clone();
        let tx = tx.clone();

        workers.spawn(async move {
            let permit = tokio::select! {
                biased;
                _ = cancel.cancelled() => return,
                permit = permits.acquire() => permit,
            };
            let Ok(_permit) = permit else { return };
            if cancel.is_cancelled() {
                return;
            }

            let entry = &manifest.versions[index];
            match resolver.resolve_entry(entry).await {
                Ok(detail) => {
                    if cancel.is_cancelled() {
                        resolver.recycle(detail);
                    } else if let Err(mpsc::error::SendError(detail)) = tx.send(detail).await {
                        resolver.recycle(detail);
                    }
                }
                Err(e) => {
                    debug!("Resolving {} failed, cancelling remaining workers", entry.id);
                    record_first(&first_error, e);
                    cancel.cancel();
                }
            }
        });
    }
    drop(tx);

    // Closes once every worker has returned and dropped its sender
    let mut details = Vec::with_capacity(total);
    while let Some(detail) = rx.recv().await {
        details.push(detail);
    }

    while let Some(joined) = workers.join_next().await {
        if let Err(e) = joined {
            record_first(&first_error, ResolveError::Task(e));
        }
    }

    let failure = first_error.lock().ok().and_then(|mut first| first.take());
    match failure {
        Some(e) => {
            for detail in details {
                resolver.recycle(detail);
            }
            Err(e)
        }
        None => {
            debug!("Resolved all {} versions", details.len());
            Ok(details)
        }
    }
}

fn record_first(slot: &Mutex<Option<ResolveError>>, error: ResolveError) {
    if let Ok(mut slot) = slot.lock()
        && slot.is_none()
    {
        *slot = Some(error);
    }
}
