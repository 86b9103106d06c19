use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::color::ColorMap;
use crate::config::Config;
use crate::data::aggregate::{Aggregates, Metrics};
use crate::data::filter::{apply, snap_rating, FilterPredicate, FilteredView};
use crate::data::{DatasetCache, FilmDataset};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Datasets already read from disk, by path.
    pub cache: DatasetCache,

    /// Path of the dataset currently shown.
    pub data_path: PathBuf,

    /// Loaded dataset (None if loading failed).
    pub dataset: Option<Arc<FilmDataset>>,

    /// Current sidebar selection.
    pub predicate: FilterPredicate,

    /// Films passing the current predicate.
    pub view: FilteredView,

    /// Headline numbers for `view`.
    pub metrics: Metrics,

    /// Derived charts for `view`; `None` when nothing matches.
    pub aggregates: Option<Aggregates>,

    /// Colour per primary genre, for the scatter plot.
    pub genre_colors: Option<ColorMap>,

    pub top_n: usize,

    /// Whether the unfiltered table is shown below the dashboard.
    pub show_raw: bool,

    /// Set when the dataset could not be loaded; the dashboard is not drawn.
    pub load_error: Option<String>,
}

impl AppState {
    /// Build the state and load the configured dataset.
    pub fn new(config: &Config) -> Self {
        let mut state = AppState {
            cache: DatasetCache::new(),
            data_path: config.data.clone(),
            dataset: None,
            predicate: FilterPredicate {
                genres: Default::default(),
                years: (0, 0),
                ratings: (0.0, 0.0),
            },
            view: FilteredView::default(),
            metrics: Metrics::from_films(&[]),
            aggregates: None,
            genre_colors: None,
            top_n: config.top_n,
            show_raw: false,
            load_error: None,
        };
        state.load(&config.data);
        state
    }

    /// Load (or fetch from the cache) the dataset at `path`.
    pub fn load(&mut self, path: &Path) {
        self.data_path = path.to_path_buf();
        match self.cache.get_or_load(path) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.dataset = None;
                self.view = FilteredView::default();
                self.metrics = Metrics::from_films(&[]);
                self.aggregates = None;
                self.load_error = Some(e.to_string());
            }
        }
    }

    /// Ingest a dataset, reset the filters and recompute everything.
    pub fn set_dataset(&mut self, dataset: Arc<FilmDataset>) {
        self.predicate = FilterPredicate::unrestricted(&dataset);
        self.genre_colors = Some(ColorMap::new(&dataset.genres));
        self.dataset = Some(dataset);
        self.load_error = None;
        self.refilter();
    }

    /// Recompute the filtered view and all aggregates from the full dataset.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        self.view = apply(ds, &self.predicate);
        self.metrics = Metrics::from_films(&self.view.films);
        self.aggregates = Aggregates::compute(&self.view, self.top_n);
        log::debug!(
            "filter {:?} → {} of {} films",
            self.predicate,
            self.view.len(),
            ds.len()
        );
    }

    /// Toggle a single genre in the multi-select.
    pub fn toggle_genre(&mut self, genre: &str) {
        if !self.predicate.genres.remove(genre) {
            self.predicate.genres.insert(genre.to_string());
        }
        self.refilter();
    }

    pub fn clear_genres(&mut self) {
        self.predicate.genres.clear();
        self.refilter();
    }

    /// Set the year range; the bounds are reordered if crossed.
    pub fn set_year_range(&mut self, from: i32, to: i32) {
        self.predicate.years = (from.min(to), from.max(to));
        self.refilter();
    }

    /// Set the rating range, snapped to the 0.1 grid.
    pub fn set_rating_range(&mut self, from: f64, to: f64) {
        let (from, to) = (snap_rating(from), snap_rating(to));
        self.predicate.ratings = (from.min(to), from.max(to));
        self.refilter();
    }

    /// Back to "everything selected".
    pub fn reset_filters(&mut self) {
        if let Some(ds) = &self.dataset {
            self.predicate = FilterPredicate::unrestricted(ds);
            self.refilter();
        }
    }
}
