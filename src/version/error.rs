use std::sync::Arc;

use thiserror::Error;

use crate::version::types::VersionKind;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Transport error for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("{url}: unexpected status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("{url}: unexpected content type: {content_type}")]
    UnexpectedContentType { url: String, content_type: String },

    #[error("Failed to decode {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub fn transport(
        url: &str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Transport {
            url: url.to_string(),
            source: source.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("version {0} not found")]
    NotFound(String),

    #[error("expected version {expected}, got {actual}")]
    IdentifierMismatch { expected: String, actual: String },

    #[error("version {id}: expected type {expected}, got {actual}")]
    KindMismatch {
        id: String,
        expected: VersionKind,
        actual: VersionKind,
    },

    /// The memoized manifest load failed; replayed until the cache is invalidated
    #[error("manifest unavailable: {0}")]
    PoisonedCache(#[source] Arc<FetchError>),

    #[error("Worker task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("process-wide client already initialized")]
    AlreadyInitialized,
}
