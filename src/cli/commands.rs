//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Movie catalog ingestion and chart pipeline
#[derive(Parser, Debug)]
#[command(name = "movie-insights")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch one year of popular movies into the movie table
    Ingest {
        /// Primary release year
        #[arg(short, long)]
        year: i32,

        /// Number of unique movies to keep (defaults to the configured value)
        #[arg(long)]
        min_movies: Option<usize>,
    },

    /// Render the summary charts from the movie table
    Visualize,

    /// Start HTTP server mode
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
}
