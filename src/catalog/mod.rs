//! Movie catalog module
//!
//! Typed access to the three catalog endpoints the ingestor needs (genre
//! list, paginated discovery, per-movie detail) plus id-based
//! deduplication of discovery results.

mod client;
mod dedup;

pub use client::{CatalogClient, DiscoverQuery};
pub use dedup::MovieCollector;
