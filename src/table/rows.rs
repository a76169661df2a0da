//! Flattening of movies into one row per genre

use crate::types::{GenreMap, Movie, MovieDetails};
use serde::{Deserialize, Serialize};

/// Placeholder for budget/revenue missing from the detail payload
pub const NOT_AVAILABLE: &str = "N/A";

/// Table header, in column order
pub const HEADER: [&str; 14] = [
    "Movie ID",
    "Title",
    "Release Date",
    "Genre",
    "Vote Average",
    "Vote Count",
    "Overview",
    "Language",
    "Budget",
    "Revenue",
    "Poster Path",
    "Popularity",
    "Adult",
    "Production Companies",
];

/// One (movie, genre) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRow {
    #[serde(rename = "Movie ID")]
    pub movie_id: i64,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Release Date")]
    pub release_date: String,
    #[serde(rename = "Genre")]
    pub genre: String,
    #[serde(rename = "Vote Average")]
    pub vote_average: Option<f64>,
    #[serde(rename = "Vote Count")]
    pub vote_count: Option<u64>,
    #[serde(rename = "Overview")]
    pub overview: String,
    #[serde(rename = "Language")]
    pub language: String,
    #[serde(rename = "Budget")]
    pub budget: String,
    #[serde(rename = "Revenue")]
    pub revenue: String,
    #[serde(rename = "Poster Path")]
    pub poster_path: String,
    #[serde(rename = "Popularity")]
    pub popularity: Option<f64>,
    #[serde(rename = "Adult")]
    pub adult: bool,
    #[serde(rename = "Production Companies")]
    pub production_companies: String,
}

fn amount_or_na(amount: Option<u64>) -> String {
    amount.map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string())
}

/// Expand one movie into a row per genre id
///
/// A movie without genre ids yields no rows.
pub fn flatten_movie(
    movie: &Movie,
    details: &MovieDetails,
    genres: &GenreMap,
    image_base_url: &str,
) -> Vec<MovieRow> {
    let budget = amount_or_na(details.budget);
    let revenue = amount_or_na(details.revenue);
    let companies = details.company_names();
    let poster_path = format!(
        "{image_base_url}{}",
        movie.poster_path.as_deref().unwrap_or_default()
    );

    movie
        .genre_ids
        .iter()
        .map(|&genre_id| MovieRow {
            movie_id: movie.id,
            title: movie.title.clone().unwrap_or_default(),
            release_date: movie.release_date.clone().unwrap_or_default(),
            genre: genres.name(genre_id).to_string(),
            vote_average: movie.vote_average,
            vote_count: movie.vote_count,
            overview: movie.overview.clone().unwrap_or_default(),
            language: movie.original_language.clone().unwrap_or_default(),
            budget: budget.clone(),
            revenue: revenue.clone(),
            poster_path: poster_path.clone(),
            popularity: movie.popularity,
            adult: movie.adult,
            production_companies: companies.clone(),
        })
        .collect()
}

/// Expand movies (paired with their details) in order
pub fn flatten_movies<'a, I>(movies: I, genres: &GenreMap, image_base_url: &str) -> Vec<MovieRow>
where
    I: IntoIterator<Item = (&'a Movie, &'a MovieDetails)>,
{
    movies
        .into_iter()
        .flat_map(|(movie, details)| flatten_movie(movie, details, genres, image_base_url))
        .collect()
}
