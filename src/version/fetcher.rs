//! JSON document fetcher
//!
//! Issues one GET per call and validates the response before decoding:
//! status below 400, `Content-Type` exactly `application/json`, body that
//! decodes into the target type. Nothing is cached and nothing is retried.

use std::sync::Arc;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::version::error::FetchError;
use crate::version::transport::{HttpResponse, Transport};

const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Clone)]
pub struct Fetcher {
    transport: Arc<dyn Transport>,
}

impl Fetcher {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Fetches `url` and decodes the body into a new value
    pub async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let response = self.get_json(url).await?;
        serde_json::from_slice(&response.body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// Fetches `url` and decodes the body into `place`, reusing its allocations.
    ///
    /// `place` is left in an unspecified (but valid) state on error.
    pub async fn fetch_into<T: DeserializeOwned>(
        &self,
        url: &str,
        place: &mut T,
    ) -> Result<(), FetchError> {
        let response = self.get_json(url).await?;
        let mut de = serde_json::Deserializer::from_slice(&response.body);
        <T as Deserialize>::deserialize_in_place(&mut de, place)
            .and_then(|()| de.end())
            .map_err(|source| FetchError::Decode {
                url: url.to_string(),
                source,
            })
    }

    async fn get_json(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let response = self.transport.get(url).await?;

        if response.status >= 400 {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: response.status,
            });
        }

        let content_type = response.content_type.as_deref().unwrap_or_default();
        if content_type != JSON_CONTENT_TYPE {
            return Err(FetchError::UnexpectedContentType {
                url: url.to_string(),
                content_type: content_type.to_string(),
            });
        }

        debug!("Fetched {} ({} bytes)", url, response.body.len());
        Ok(response)
    }
}
