use std::collections::BTreeSet;

use super::model::{Film, FilmDataset};

// ---------------------------------------------------------------------------
// Filter predicate: genre set, year range, rating range
// ---------------------------------------------------------------------------

/// The sidebar selection.  Both ranges are closed intervals.
/// An empty genre set means "no genre restriction".
#[derive(Debug, Clone, PartialEq)]
pub struct FilterPredicate {
    pub genres: BTreeSet<String>,
    pub years: (i32, i32),
    pub ratings: (f64, f64),
}

impl FilterPredicate {
    /// No genres selected, ranges spanning the whole dataset.
    pub fn unrestricted(dataset: &FilmDataset) -> Self {
        FilterPredicate {
            genres: BTreeSet::new(),
            years: dataset.year_bounds,
            ratings: dataset.rating_bounds,
        }
    }

    /// A film passes when:
    /// * its year lies in `years` (inclusive)
    /// * its rating lies in `ratings` (inclusive)
    /// * every selected genre is one of its genres (AND, not OR)
    pub fn matches(&self, film: &Film) -> bool {
        let (y0, y1) = self.years;
        let (r0, r1) = self.ratings;

        film.year >= y0
            && film.year <= y1
            && film.rating >= r0
            && film.rating <= r1
            && self.genres.iter().all(|g| film.has_genre(g))
    }
}

/// Round a slider value onto the 0.1 rating grid, so `8.100000000000001`
/// does not drop films rated exactly 8.1.
pub fn snap_rating(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// Films matching the current predicate, in dataset order.
/// Owned independently of the dataset and rebuilt on every change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredView {
    pub films: Vec<Film>,
}

impl FilteredView {
    pub fn len(&self) -> usize {
        self.films.len()
    }

    pub fn is_empty(&self) -> bool {
        self.films.is_empty()
    }
}

/// Apply `predicate` to the full dataset.  The dataset is never mutated.
pub fn apply(dataset: &FilmDataset, predicate: &FilterPredicate) -> FilteredView {
    FilteredView {
        films: dataset
            .films
            .iter()
            .filter(|film| predicate.matches(film))
            .cloned()
            .collect(),
    }
}
