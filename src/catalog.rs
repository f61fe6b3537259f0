use std::io;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::api::{ApiError, BookingApi};
use crate::model::Movie;
use crate::notice::Notice;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to fetch movies: {0}")]
    Fetch(#[from] ApiError),

    #[error("failed to write movie listing: {0}")]
    Write(#[from] csv::Error),
}

/// Movies currently on show.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    movies: Vec<Movie>,
}

impl Catalog {
    pub fn new(movies: Vec<Movie>) -> Self {
        Self { movies }
    }

    pub async fn fetch<A: BookingApi + ?Sized>(api: &A) -> Result<Self, CatalogError> {
        let movies = api.movies().await?;
        info!(count = movies.len(), "catalog loaded");
        Ok(Self::new(movies))
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Movies whose name contains `query`, ignoring case. Catalog order is kept.
    pub fn search<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a Movie> + use<'a> {
        let needle = query.to_lowercase();
        self.movies
            .iter()
            .filter(move |movie| movie.name.to_lowercase().contains(&needle))
    }
}

/// The details dialog opened from a catalog entry.
pub fn details(movie: &Movie) -> Notice {
    Notice::info(
        movie.name.clone(),
        format!(
            "Genre: {}\nCast: {}\nSummary: {}",
            movie.genre, movie.cast, movie.summary
        ),
    )
}

#[derive(Debug, Serialize)]
struct ListingRow<'a> {
    id: &'a str,
    name: &'a str,
    genre: &'a str,
    language: &'a str,
    screen: &'a str,
    timing: &'a str,
    ratings: String,
    votes: String,
}

/// Write movies as csv rows.
pub fn write_movies<'a, W: io::Write>(
    writer: W,
    movies: impl IntoIterator<Item = &'a Movie>,
) -> Result<(), CatalogError> {
    let mut writer = csv::Writer::from_writer(writer);

    for movie in movies {
        writer.serialize(ListingRow {
            id: &movie.id,
            name: &movie.name,
            genre: &movie.genre,
            language: &movie.language,
            screen: &movie.screen,
            timing: &movie.timing,
            ratings: movie.ratings.map(|r| r.to_string()).unwrap_or_default(),
            votes: movie.votes.map(|v| v.to_string()).unwrap_or_default(),
        })?;
    }

    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}
