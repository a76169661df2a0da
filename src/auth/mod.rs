//! Authentication module
//!
//! Supports: API Key (query or header) and Bearer token
//!
//! The catalog accepts either a v3 API key passed as a query parameter or a
//! v4 read access token passed as a bearer token.

mod types;

pub use types::{AuthConfig, Location};

#[cfg(test)]
mod tests;
