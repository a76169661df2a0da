// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # movie-insights
//!
//! A two-stage batch pipeline over a movie catalog API.
//!
//! ## Stages
//!
//! - **Ingest**: fetch the most popular movies of a release year, enrich
//!   them with budget, revenue and production companies, flatten them to one
//!   row per genre and store the result as a CSV table
//! - **Visualize**: load that table and publish three PNG charts
//!
//! Both stages can be triggered from the command line or over HTTP, and both
//! report a `{"statusCode": .., "body": ..}` result.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use movie_insights::config::AppConfig;
//! use movie_insights::pipeline::{Ingestor, Visualizer};
//!
//! #[tokio::main]
//! async fn main() -> movie_insights::Result<()> {
//!     let config = AppConfig::load(None)?;
//!
//!     let report = Ingestor::from_config(&config)?.run(2023, None).await?;
//!     println!("wrote {} rows to {}", report.rows, report.location);
//!
//!     Visualizer::from_config(&config)?.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │             Triggers: CLI (clap) · HTTP (axum)               │
//! └───────────────┬──────────────────────────────┬───────────────┘
//!                 │                              │
//!          ┌──────┴──────┐                ┌──────┴──────┐
//!          │  Ingestor   │ ── CSV table ─►│ Visualizer  │
//!          └──────┬──────┘                └──────┬──────┘
//! ┌─────────┬─────┴─────┬──────────┐     ┌───────┴───────┬─────────┐
//! │ Catalog │   HTTP    │ Paginate │     │     Table     │ Charts  │
//! ├─────────┼───────────┼──────────┤     ├───────────────┼─────────┤
//! │ Genres  │ Rate Limit│ Page No. │     │ CSV read/write│ Plotters│
//! │ Discover│ Auth      │ Stops    │     │ Dedup         │ PNG     │
//! │ Details │           │          │     │               │         │
//! └─────────┴───────────┴──────────┘     └───────────────┴─────────┘
//!                     Output: object_store (S3, R2, GCS, Azure, local)
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for movie-insights
pub mod error;

/// Catalog records and shared enums
pub mod types;

/// Configuration file and environment overrides
pub mod config;

/// Authentication for the catalog API
pub mod auth;

/// HTTP client with rate limiting
pub mod http;

/// Pagination strategies
pub mod pagination;

/// Movie catalog client
pub mod catalog;

/// Movie table rows and CSV encoding
pub mod table;

/// Object storage destinations
pub mod output;

/// Aggregations and chart rendering
pub mod charts;

/// Ingestion and visualization stages
pub mod pipeline;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use pipeline::{Ingestor, RunOutcome, Visualizer};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
