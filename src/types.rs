//! Common types used throughout movie-insights
//!
//! Typed records decoded from the movie catalog API, plus small shared
//! enums. Catalog payloads are loosely structured, so every field other than
//! the identifier decodes with a default.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Decode an explicit `null` the same way as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Genres
// ============================================================================

/// A single genre from the catalog taxonomy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// Response body of the genre list endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenreList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<Genre>,
}

/// Name shown for genre ids missing from the taxonomy
pub const UNKNOWN_GENRE: &str = "Unknown";

/// Genre id → name lookup, valid for one ingestion run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreMap(HashMap<i64, String>);

impl GenreMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a genre id, falling back to [`UNKNOWN_GENRE`]
    pub fn name(&self, id: i64) -> &str {
        self.0.get(&id).map_or(UNKNOWN_GENRE, String::as_str)
    }

    /// Number of known genres
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the taxonomy is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Genre>> for GenreMap {
    fn from(genres: Vec<Genre>) -> Self {
        Self(genres.into_iter().map(|g| (g.id, g.name)).collect())
    }
}

// ============================================================================
// Movies
// ============================================================================

/// A movie as returned by the discovery endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genre_ids: Vec<i64>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u64>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub adult: bool,
}

impl Movie {
    /// Year component of the release date, if it parses
    pub fn release_year(&self) -> Option<i32> {
        use chrono::Datelike;

        let date = self.release_date.as_deref()?;
        chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .ok()
            .map(|d| d.year())
    }
}

/// One page of the discovery endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscoverPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub page: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<Movie>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub total_results: Option<u64>,
}

/// Production company entry of the detail payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionCompany {
    pub name: String,
}

/// Per-movie detail payload (only the fields the table needs)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDetails {
    #[serde(default)]
    pub budget: Option<u64>,
    #[serde(default)]
    pub revenue: Option<u64>,
    #[serde(default)]
    pub production_companies: Option<Vec<ProductionCompany>>,
}

impl MovieDetails {
    /// Company names joined with ", ", empty when the payload had none
    pub fn company_names(&self) -> String {
        self.production_companies
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// ============================================================================
// Dedup Policy
// ============================================================================

/// Which occurrence wins when the same movie id shows up on several pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupPolicy {
    /// Keep the first record seen, ignore later duplicates
    #[default]
    FirstSeen,
    /// Keep the position of the first record but replace it with the latest one
    LastSeen,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_genre_map_fallback() {
        let map = GenreMap::from(vec![
            Genre {
                id: 28,
                name: "Action".to_string(),
            },
            Genre {
                id: 35,
                name: "Comedy".to_string(),
            },
        ]);

        assert_eq!(map.len(), 2);
        assert_eq!(map.name(28), "Action");
        assert_eq!(map.name(99), UNKNOWN_GENRE);
    }

    #[test]
    fn test_movie_decodes_sparse_payload() {
        let movie: Movie = serde_json::from_value(json!({"id": 7})).unwrap();
        assert_eq!(movie.id, 7);
        assert!(movie.title.is_none());
        assert!(movie.genre_ids.is_empty());
        assert!(!movie.adult);
    }

    #[test]
    fn test_null_fields_decode_as_defaults() {
        let movie: Movie = serde_json::from_value(json!({
            "id": 9,
            "genre_ids": null,
            "adult": null,
            "popularity": null
        }))
        .unwrap();
        assert!(movie.genre_ids.is_empty());
        assert!(!movie.adult);
        assert_eq!(movie.popularity, None);

        let page: DiscoverPage = serde_json::from_value(json!({
            "page": null,
            "results": [{"id": 1, "genre_ids": null}],
            "total_pages": null
        }))
        .unwrap();
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.page, 0);

        let list: GenreList = serde_json::from_value(json!({"genres": null})).unwrap();
        assert!(list.genres.is_empty());
    }

    #[test]
    fn test_movie_release_year() {
        let movie = Movie {
            release_date: Some("2023-07-19".to_string()),
            ..Default::default()
        };
        assert_eq!(movie.release_year(), Some(2023));

        let movie = Movie {
            release_date: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(movie.release_year(), None);
    }

    #[test]
    fn test_details_company_names() {
        let details: MovieDetails = serde_json::from_value(json!({
            "budget": 100,
            "production_companies": [{"name": "A24", "id": 1}, {"name": "Neon"}]
        }))
        .unwrap();
        assert_eq!(details.company_names(), "A24, Neon");
        assert_eq!(details.revenue, None);

        let empty = MovieDetails::default();
        assert_eq!(empty.company_names(), "");
    }

    #[test]
    fn test_dedup_policy_serde() {
        let policy: DedupPolicy = serde_json::from_value(json!("last_seen")).unwrap();
        assert_eq!(policy, DedupPolicy::LastSeen);
        assert_eq!(DedupPolicy::default(), DedupPolicy::FirstSeen);
    }
}
