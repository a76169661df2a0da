//! Pipeline module
//!
//! The two batch stages and the result contract shared by their triggers.
//!
//! # Overview
//!
//! ```text
//! catalog API ──► Ingestor ──► top_movies.csv ──► Visualizer ──► *.png
//! ```
//!
//! Each stage owns its collaborators (catalog client, storage destinations),
//! built once from [`AppConfig`](crate::config::AppConfig) and passed in.
//! Stages return `Result<Report>`; [`RunOutcome::from_result`] turns that into
//! the `{statusCode, body}` document both triggers emit.

mod ingest;
mod outcome;
mod visualize;

pub use ingest::{parse_min_movies, parse_year, IngestReport, IngestRequest, Ingestor};
pub use outcome::RunOutcome;
pub use visualize::{VisualizeReport, Visualizer};
