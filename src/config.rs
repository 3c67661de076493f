use std::path::Path;

use serde::Deserialize;

// =============================================================================
// Endpoints
// =============================================================================

/// Default location of the version manifest
pub const DEFAULT_MANIFEST_URL: &str =
    "https://launchermeta.mojang.com/mc/game/version_manifest.json";

/// Default location of the v2 manifest (adds sha1 and compliance level per entry)
pub const DEFAULT_MANIFEST_V2_URL: &str =
    "https://launchermeta.mojang.com/mc/game/version_manifest_v2.json";

// =============================================================================
// Time and sizing constants
// =============================================================================

/// Fixed deadline for a single HTTP request in milliseconds (5 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 5_000;

/// Upper bound on idle detail buffers kept by the pool
pub const DEFAULT_MAX_IDLE_BUFFERS: usize = 64;

/// Client configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    pub manifest_url: String,
    #[serde(rename = "manifestV2Url")]
    pub manifest_v2_url: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
    /// Maximum number of detail fetches in flight during bulk resolution.
    /// Falls back to the number of processors when unset or zero.
    pub concurrency: Option<usize>,
    pub max_idle_buffers: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            manifest_url: DEFAULT_MANIFEST_URL.to_string(),
            manifest_v2_url: DEFAULT_MANIFEST_V2_URL.to_string(),
            timeout_ms: FETCH_TIMEOUT_MS,
            concurrency: None,
            max_idle_buffers: DEFAULT_MAX_IDLE_BUFFERS,
        }
    }
}

impl ClientConfig {
    /// Config pointing both manifest endpoints at `base_url`
    /// (`{base_url}/version_manifest.json` and `{base_url}/version_manifest_v2.json`).
    pub fn with_base_url(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/');
        Self {
            manifest_url: format!("{}/version_manifest.json", base_url),
            manifest_v2_url: format!("{}/version_manifest_v2.json", base_url),
            ..Self::default()
        }
    }

    /// Reads a JSON config file. Missing fields use defaults.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Effective bulk concurrency limit
    pub fn concurrency(&self) -> usize {
        match self.concurrency {
            Some(n) if n > 0 => n,
            _ => num_cpus::get(),
        }
    }
}
