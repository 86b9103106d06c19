use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::error::Result;
use super::loader::load_file;
use super::model::FilmDataset;

// ---------------------------------------------------------------------------
// DatasetCache – load once per path, read-only afterwards
// ---------------------------------------------------------------------------

/// Memoizes [`load_file`] by path for the lifetime of the cache.
///
/// A path is read from disk at most once; later calls hand out the same
/// shared dataset.  Failed loads are not stored, so a file that appears
/// later can still be picked up.  Nothing is ever invalidated.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, Arc<FilmDataset>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<FilmDataset>> {
        let key = cache_key(path);
        if let Some(ds) = self.entries.get(&key) {
            log::debug!("dataset cache hit for {}", key.display());
            return Ok(Arc::clone(ds));
        }

        let dataset = Arc::new(load_file(path)?);
        log::info!(
            "Loaded {} films ({} genres) from {}",
            dataset.len(),
            dataset.genres.len(),
            path.display()
        );
        self.entries.insert(key, Arc::clone(&dataset));
        Ok(dataset)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(&cache_key(path))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `./a.csv` and `a.csv` should share one entry.
fn cache_key(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
