/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → FilmDataset   (memoized by cache)
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ FilmDataset  │  Vec<Film>, genre universe, slider bounds
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  genre / year / rating predicate → FilteredView
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  metrics, counts, pivots → Aggregates (or "no results")
///   └───────────┘
/// ```

pub mod aggregate;
pub mod cache;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;

pub use cache::DatasetCache;
pub use error::DataError;
pub use filter::{FilterPredicate, FilteredView};
pub use model::{Film, FilmDataset};
