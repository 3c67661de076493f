//! Test utilities

pub mod meta;

pub use meta::MetaServer;
