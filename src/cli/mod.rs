//! CLI module
//!
//! Command-line and HTTP triggers for the pipeline stages.
//!
//! # Commands
//!
//! - `ingest` - Fetch a year of movies into the movie table
//! - `visualize` - Render charts from the movie table
//! - `serve` - Start HTTP server mode (`POST /ingest`, `POST /visualize`)

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands};
pub use runner::Runner;
pub use server::{router, serve};
