//! Movie catalog API client

use super::dedup::MovieCollector;
use crate::config::CatalogConfig;
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::pagination::{NextPage, PageInfo, PageNumberPaginator, PaginationState, StopCondition};
use crate::types::{DedupPolicy, DiscoverPage, GenreList, GenreMap, Movie, MovieDetails};
use tracing::{debug, info, warn};

/// Parameters of one discovery run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoverQuery {
    /// Primary release year to filter on
    pub year: i32,
    /// Number of unique movies wanted
    pub min_movies: usize,
    /// Hard cap on requested pages
    pub max_pages: u32,
    /// Which duplicate wins
    pub dedup: DedupPolicy,
}

/// Client for the movie catalog (TMDB v3 shaped) API
#[derive(Debug)]
pub struct CatalogClient {
    http: HttpClient,
    language: String,
}

impl CatalogClient {
    /// Wrap an existing HTTP client
    pub fn new(http: HttpClient, language: impl Into<String>) -> Self {
        Self {
            http,
            language: language.into(),
        }
    }

    /// Build a client from catalog settings
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        let http = HttpClient::with_auth(config.http_config(), config.auth_config())?;
        Ok(Self::new(http, &config.language))
    }

    fn request(&self) -> RequestConfig {
        RequestConfig::new().query("language", &self.language)
    }

    /// Fetch the full genre taxonomy
    pub async fn genres(&self) -> Result<GenreMap> {
        let list: GenreList = self
            .http
            .get_json_with_config("/genre/movie/list", self.request())
            .await?;
        debug!("Fetched {} genres", list.genres.len());
        Ok(GenreMap::from(list.genres))
    }

    /// Fetch one discovery page, most popular first
    pub async fn discover_page(&self, year: i32, params: &[(String, String)]) -> Result<DiscoverPage> {
        let mut request = self
            .request()
            .query("primary_release_year", year)
            .query("sort_by", "popularity.desc");
        for (key, value) in params {
            request = request.query(key.as_str(), value);
        }
        self.http
            .get_json_with_config("/discover/movie", request)
            .await
    }

    /// Page through discovery until enough unique movies are collected
    ///
    /// Stops when the unique count reaches `min_movies`, a page is empty,
    /// the reported page total is reached, or `max_pages` pages were read.
    /// The result holds at most `min_movies` movies in popularity order.
    pub async fn discover_movies(&self, query: DiscoverQuery) -> Result<Vec<Movie>> {
        let paginator = PageNumberPaginator::new("page", 1)
            .with_stop_condition(StopCondition::TotalPages)
            .with_stop_condition(StopCondition::MaxPages(query.max_pages));
        let mut state = PaginationState::new();
        let mut collector = MovieCollector::new(query.dedup);
        let mut params = paginator.initial_params();

        loop {
            let page = self.discover_page(query.year, &params).await?;
            let info = PageInfo {
                records: page.results.len(),
                total_pages: page.total_pages,
            };
            collector.extend(page.results);
            debug!(
                page = paginator.current_page(&state),
                records = info.records,
                unique = collector.unique_count(),
                "Fetched discovery page"
            );

            if collector.unique_count() >= query.min_movies {
                state.mark_done();
            }
            match paginator.process_page(info, &mut state) {
                NextPage::Continue { query_params } => params = query_params,
                NextPage::Done => break,
            }
        }

        if collector.duplicates() > 0 {
            debug!("Dropped {} duplicate discovery records", collector.duplicates());
        }
        if collector.unique_count() < query.min_movies {
            warn!(
                "Only {} unique movies available for {} (wanted {})",
                collector.unique_count(),
                query.year,
                query.min_movies
            );
        }

        let movies = collector.into_movies(query.min_movies);
        info!(
            "Discovered {} movies for {} over {} pages",
            movies.len(),
            query.year,
            state.pages_fetched
        );
        Ok(movies)
    }

    /// Fetch budget, revenue and production companies for one movie
    pub async fn movie_details(&self, id: i64) -> Result<MovieDetails> {
        self.http
            .get_json_with_config(&format!("/movie/{id}"), self.request())
            .await
    }
}
