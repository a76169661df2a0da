//! Deduplication of discovery results by movie id

use crate::types::{DedupPolicy, Movie};
use std::collections::HashMap;

/// Accumulates movies page by page, keeping one record per id
///
/// Records keep the position of the first occurrence of their id. Under
/// [`DedupPolicy::LastSeen`] the content of that slot is replaced by later
/// occurrences.
#[derive(Debug, Clone, Default)]
pub struct MovieCollector {
    policy: DedupPolicy,
    movies: Vec<Movie>,
    index: HashMap<i64, usize>,
    duplicates: usize,
}

impl MovieCollector {
    /// Create an empty collector
    pub fn new(policy: DedupPolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    /// Add one page of results in order
    pub fn extend(&mut self, movies: impl IntoIterator<Item = Movie>) {
        for movie in movies {
            self.push(movie);
        }
    }

    /// Add one movie
    pub fn push(&mut self, movie: Movie) {
        match self.index.get(&movie.id) {
            Some(&slot) => {
                self.duplicates += 1;
                if self.policy == DedupPolicy::LastSeen {
                    self.movies[slot] = movie;
                }
            }
            None => {
                self.index.insert(movie.id, self.movies.len());
                self.movies.push(movie);
            }
        }
    }

    /// Number of distinct ids collected so far
    pub fn unique_count(&self) -> usize {
        self.movies.len()
    }

    /// Number of records dropped or merged as duplicates
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Finish, keeping at most `limit` movies in collection order
    pub fn into_movies(mut self, limit: usize) -> Vec<Movie> {
        self.movies.truncate(limit);
        self.movies
    }
}
