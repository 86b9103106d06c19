use std::collections::BTreeSet;

use super::error::{DataError, Result};

// ---------------------------------------------------------------------------
// Film – one row of the source table
// ---------------------------------------------------------------------------

/// A single ranked film.
#[derive(Debug, Clone, PartialEq)]
pub struct Film {
    pub rank: u32,
    pub title: String,
    pub year: i32,
    pub rating: f64,
    pub duration_minutes: u32,
    pub director: String,
    /// Split from the comma-delimited `Genre` cell, source order kept.
    pub genres: Vec<String>,
    /// `None` when the source has no cast column at all.
    pub cast: Option<Vec<String>>,
    pub user_reviews: u64,
}

impl Film {
    /// Decade bucket, e.g. 1994 → 1990.
    pub fn decade(&self) -> i32 {
        decade_of(self.year)
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }
}

pub fn decade_of(year: i32) -> i32 {
    year.div_euclid(10) * 10
}

/// Split a `"Crime, Drama"` style cell into its trimmed, non-empty parts.
pub fn split_list(cell: &str) -> Vec<String> {
    cell.split(", ")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// FilmDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with the bounds the sidebar controls need.
#[derive(Debug, Clone)]
pub struct FilmDataset {
    /// All films, in source order.
    pub films: Vec<Film>,
    /// Sorted universe of genre names.
    pub genres: BTreeSet<String>,
    /// Observed (min, max) release year.
    pub year_bounds: (i32, i32),
    /// Observed (min, max) rating.
    pub rating_bounds: (f64, f64),
    /// Whether the source carried a cast column.
    pub has_cast: bool,
}

impl FilmDataset {
    pub fn from_films(films: Vec<Film>) -> Result<Self> {
        let first = films.first().ok_or(DataError::EmptyDataset)?;

        let mut year_bounds = (first.year, first.year);
        let mut rating_bounds = (first.rating, first.rating);
        let mut genres = BTreeSet::new();

        for film in &films {
            year_bounds.0 = year_bounds.0.min(film.year);
            year_bounds.1 = year_bounds.1.max(film.year);
            rating_bounds.0 = rating_bounds.0.min(film.rating);
            rating_bounds.1 = rating_bounds.1.max(film.rating);
            genres.extend(film.genres.iter().cloned());
        }

        let has_cast = films.iter().any(|f| f.cast.is_some());

        Ok(FilmDataset {
            films,
            genres,
            year_bounds,
            rating_bounds,
            has_cast,
        })
    }

    pub fn len(&self) -> usize {
        self.films.len()
    }

    pub fn is_empty(&self) -> bool {
        self.films.is_empty()
    }
}
