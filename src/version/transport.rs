//! HTTP transport used by the fetcher

use std::time::Duration;

#[cfg(test)]
use mockall::automock;
use tracing::debug;

use crate::version::error::FetchError;

/// A fully read HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Raw `Content-Type` header value, if any
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Performs a single GET and reads the whole body
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// # Returns
    /// * `Ok(HttpResponse)` - Any response the server produced, whatever its status
    /// * `Err(FetchError::Transport)` - If the request or the body read fails
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError>;
}

/// Transport backed by a shared `reqwest::Client`
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport whose requests fail after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("mcversion/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::transport("<client>", e))?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::transport(url, e))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());

        // Reading to the end releases the connection; a failed read is an error
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::transport(url, e))?
            .to_vec();

        Ok(HttpResponse {
            status,
            content_type,
            body,
        })
    }
}
