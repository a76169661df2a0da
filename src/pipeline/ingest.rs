//! Ingestion stage: catalog API to movie table

use super::RunOutcome;
use crate::catalog::{CatalogClient, DiscoverQuery};
use crate::config::{AppConfig, IngestConfig};
use crate::error::{Error, Result, ResultExt};
use crate::output::CloudDestination;
use crate::table::{flatten_movies, write_csv};
use crate::types::{GenreMap, Movie, MovieDetails};
use serde_json::Value;
use tracing::{error, info, warn};

/// Read the `year` trigger field, an integer or a numeric string
pub fn parse_year(value: Option<&Value>) -> Result<i32> {
    let year = match value {
        Some(Value::Number(n)) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        Some(Value::String(s)) => s.trim().parse::<i32>().ok(),
        _ => None,
    };
    year.filter(|y| *y > 0)
        .ok_or_else(|| Error::missing_input("Year"))
}

/// Read the optional `min_movies` trigger field
///
/// Anything that is not a positive integer (or numeric string) is ignored
/// and the configured default applies.
pub fn parse_min_movies(value: Option<&Value>) -> Option<usize> {
    let parsed = match value? {
        Value::Number(n) => n.as_u64().and_then(|v| usize::try_from(v).ok()),
        Value::String(s) => s.trim().parse::<usize>().ok(),
        Value::Null => return None,
        other => {
            warn!("Ignoring invalid min_movies value {other}");
            return None;
        }
    };
    match parsed {
        Some(n) if n > 0 => Some(n),
        _ => {
            warn!("Ignoring invalid min_movies value, using the configured default");
            None
        }
    }
}

/// Validated ingestion trigger input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestRequest {
    pub year: i32,
    pub min_movies: Option<usize>,
}

impl IngestRequest {
    /// Parse a trigger document such as `{"year": 2023, "min_movies": 30}`
    pub fn from_json(event: &Value) -> Result<Self> {
        Ok(Self {
            year: parse_year(event.get("year"))?,
            min_movies: parse_min_movies(event.get("min_movies")),
        })
    }
}

/// Summary of a successful ingestion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReport {
    pub year: i32,
    /// Unique movies written
    pub movies: usize,
    /// Table rows written (one per movie and genre)
    pub rows: usize,
    /// Movies whose release date falls outside the requested year
    pub year_mismatches: usize,
    /// Full location of the uploaded table
    pub location: String,
}

fn describe(report: &IngestReport) -> String {
    format!("CSV file created and uploaded to {}.", report.location)
}

/// Fetches one year of popular movies and stores them as a CSV table
#[derive(Debug)]
pub struct Ingestor {
    catalog: CatalogClient,
    table: CloudDestination,
    table_key: String,
    image_base_url: String,
    settings: IngestConfig,
}

impl Ingestor {
    /// Assemble an ingestor from its collaborators
    pub fn new(
        catalog: CatalogClient,
        table: CloudDestination,
        table_key: impl Into<String>,
        image_base_url: impl Into<String>,
        settings: IngestConfig,
    ) -> Self {
        Self {
            catalog,
            table,
            table_key: table_key.into(),
            image_base_url: image_base_url.into(),
            settings,
        }
    }

    /// Build the catalog client and table destination from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        config.validate_catalog()?;
        config.validate_storage()?;

        let catalog = CatalogClient::from_config(&config.catalog)?;
        let table = CloudDestination::parse(&config.storage.table_url)?;
        Ok(Self::new(
            catalog,
            table,
            &config.storage.table_key,
            &config.catalog.image_base_url,
            config.ingest.clone(),
        ))
    }

    /// Run one ingestion, `min_movies` overriding the configured default
    pub async fn run(&self, year: i32, min_movies: Option<usize>) -> Result<IngestReport> {
        let min_movies = min_movies.unwrap_or(self.settings.min_movies);
        info!("Ingesting {min_movies} movies for {year}");

        let (genres, movies) = self.fetch(year, min_movies).await;
        if genres.is_empty() || movies.is_empty() {
            return Err(Error::NoData);
        }

        self.process(year, &genres, &movies).await
    }

    /// Trigger entry point: validate input, run, and report
    pub async fn handle(&self, event: &Value) -> RunOutcome {
        let result = match IngestRequest::from_json(event) {
            Ok(request) => self.run(request.year, request.min_movies).await,
            Err(e) => Err(e),
        };
        RunOutcome::from_result(result, describe)
    }

    /// Trigger entry point from configuration
    ///
    /// The event is validated before the catalog client or storage are set
    /// up, so bad input is reported as such whatever the configuration.
    pub async fn trigger(config: &AppConfig, event: &Value) -> RunOutcome {
        let result = match IngestRequest::from_json(event) {
            Ok(request) => match Self::from_config(config) {
                Ok(ingestor) => ingestor.run(request.year, request.min_movies).await,
                Err(e) => Err(e),
            },
            Err(e) => Err(e),
        };
        RunOutcome::from_result(result, describe)
    }

    /// Fetch the taxonomy and the movie list; failures become empty results
    async fn fetch(&self, year: i32, min_movies: usize) -> (GenreMap, Vec<Movie>) {
        let genres = match self.catalog.genres().await {
            Ok(genres) => genres,
            Err(e) => {
                error!("Error fetching genres: {e}");
                return (GenreMap::new(), Vec::new());
            }
        };

        let query = DiscoverQuery {
            year,
            min_movies,
            max_pages: self.settings.max_pages,
            dedup: self.settings.dedup,
        };
        match self.catalog.discover_movies(query).await {
            Ok(movies) => (genres, movies),
            Err(e) => {
                error!("Error fetching movies: {e}");
                (genres, Vec::new())
            }
        }
    }

    async fn process(&self, year: i32, genres: &GenreMap, movies: &[Movie]) -> Result<IngestReport> {
        let mut details: Vec<MovieDetails> = Vec::with_capacity(movies.len());
        for movie in movies {
            let detail = self
                .catalog
                .movie_details(movie.id)
                .await
                .with_context(|| format!("Failed to fetch details for movie {}", movie.id))?;
            details.push(detail);
        }

        let year_mismatches = movies
            .iter()
            .filter(|m| m.release_year() != Some(year))
            .count();
        if year_mismatches > 0 {
            warn!("{year_mismatches} movies have a release date outside {year}");
        }

        let rows = flatten_movies(movies.iter().zip(&details), genres, &self.image_base_url);
        let csv = write_csv(&rows)?;
        let location = self.table.write(&self.table_key, csv).await?;
        info!(
            "Wrote {} rows for {} movies to {location}",
            rows.len(),
            movies.len()
        );

        Ok(IngestReport {
            year,
            movies: movies.len(),
            rows: rows.len(),
            year_mismatches,
            location,
        })
    }
}
