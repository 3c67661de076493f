//! Version manifest and detail resolution
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Client    │────▶│    Cache    │────▶│   Fetcher   │
//! │  (façade)   │     │ (manifest)  │     │ (GET+JSON)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                                       ▲
//!        ▼                                       │
//! ┌─────────────┐     ┌─────────────┐            │
//! │    Bulk     │────▶│  Resolver   │────────────┘
//! │  (fan-out)  │     │ (+ pool)    │
//! └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`client`]: `VersionClient` façade and the process-wide instance
//! - [`cache`]: Memoized manifest load with explicit invalidation
//! - [`resolver`]: Per-version detail resolution into pooled buffers
//! - [`bulk`]: Bounded concurrent resolution with first-error cancellation
//! - [`fetcher`]: Status, content-type and JSON validation of one GET
//! - [`transport`]: HTTP transport trait and its `reqwest` implementation
//! - [`pool`]: Free-list of reusable buffers
//! - [`types`]: Manifest documents
//! - [`detail`]: Per-version detail document
//! - [`error`]: Error types for fetching and resolution

pub mod bulk;
pub mod cache;
pub mod client;
pub mod detail;
pub mod error;
pub mod fetcher;
pub mod pool;
pub mod resolver;
pub mod transport;
pub mod types;
