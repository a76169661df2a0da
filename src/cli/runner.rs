//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::cli::server::serve;
use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::pipeline::{Ingestor, RunOutcome, Visualizer};
use serde_json::json;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = AppConfig::load(self.cli.config.as_deref())?;

        match &self.cli.command {
            Commands::Ingest { year, min_movies } => {
                let event = json!({ "year": year, "min_movies": min_movies });
                Self::finish(&Ingestor::trigger(&config, &event).await)
            }
            Commands::Visualize => {
                let outcome = match Visualizer::from_config(&config) {
                    Ok(visualizer) => visualizer.handle().await,
                    Err(e) => RunOutcome::failure(&e),
                };
                Self::finish(&outcome)
            }
            Commands::Serve { port } => serve(config, *port).await,
        }
    }

    /// Print the run result and turn a failed run into an error exit
    fn finish(outcome: &RunOutcome) -> Result<()> {
        println!("{}", serde_json::to_string(outcome)?);
        if outcome.is_success() {
            Ok(())
        } else {
            Err(Error::Other(format!(
                "run failed with status {}",
                outcome.status_code
            )))
        }
    }
}
