use std::collections::HashMap;
use std::fs;
use std::path::Path;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::error::RepositoryError;
use super::history_store::HistoryStore;
use super::model::{MovieSearchResult, Rating};
use super::repository::MovieRepository;

const BUILTIN_CATALOG: &str = include_str!("builtin_catalog.json");

/// One movie as stored in a catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub ratings: Vec<Rating>,
    #[serde(default)]
    pub poster_url: String,
}

impl CatalogEntry {
    fn to_result(&self, searched_title: &str) -> MovieSearchResult {
        MovieSearchResult {
            id: self.id.clone(),
            title: self.title.clone(),
            searched_title: searched_title.to_string(),
            ratings: self.ratings.clone(),
            poster_url: self.poster_url.clone(),
        }
    }
}

/// Repository backed by an in-memory catalog, with a lookup cache in front
/// of it and a [`HistoryStore`] behind the history operations.
pub struct CatalogRepository {
    entries: Vec<CatalogEntry>,
    cache: Mutex<HashMap<String, usize>>,
    history: HistoryStore,
}

impl CatalogRepository {
    pub fn new(entries: Vec<CatalogEntry>, history: HistoryStore) -> Self {
        Self {
            entries,
            cache: Mutex::new(HashMap::new()),
            history,
        }
    }

    /// Catalog compiled into the binary.
    pub fn builtin(history: HistoryStore) -> Result<Self, RepositoryError> {
        let entries: Vec<CatalogEntry> =
            serde_json::from_str(BUILTIN_CATALOG).map_err(RepositoryError::BuiltinCatalog)?;
        Ok(Self::new(entries, history))
    }

    /// Catalog read from a JSON array of [`CatalogEntry`].
    pub fn from_path(path: &Path, history: HistoryStore) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path).map_err(|source| RepositoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let entries: Vec<CatalogEntry> =
            serde_json::from_str(&content).map_err(|source| RepositoryError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::info!(path = %path.display(), movies = entries.len(), "catalog loaded");
        Ok(Self::new(entries, history))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of titles currently held in the lookup cache.
    pub fn cached_lookups(&self) -> usize {
        self.cache.lock().len()
    }

    /// Exact (case-insensitive) title match first, then the first title that
    /// starts with the query.
    fn lookup(&self, key: &str) -> Option<usize> {
        if let Some(index) = self.cache.lock().get(key).copied() {
            tracing::trace!(key, "catalog cache hit");
            return Some(index);
        }

        let index = self
            .entries
            .iter()
            .position(|entry| normalize(&entry.title) == key)
            .or_else(|| {
                self.entries
                    .iter()
                    .position(|entry| normalize(&entry.title).starts_with(key))
            })?;

        self.cache.lock().insert(key.to_string(), index);
        Some(index)
    }
}

impl MovieRepository for CatalogRepository {
    fn search_movie(&self, title: &str) -> Result<MovieSearchResult, RepositoryError> {
        let searched = title.trim();
        let key = normalize(searched);
        if key.is_empty() {
            return Err(RepositoryError::NotFound {
                title: searched.to_string(),
            });
        }

        match self.lookup(&key) {
            Some(index) => Ok(self.entries[index].to_result(searched)),
            None => Err(RepositoryError::NotFound {
                title: searched.to_string(),
            }),
        }
    }

    fn history(&self) -> Result<Vec<MovieSearchResult>, RepositoryError> {
        Ok(self.history.entries())
    }

    fn add_to_history(
        &self,
        movie: MovieSearchResult,
    ) -> Result<Vec<MovieSearchResult>, RepositoryError> {
        tracing::debug!(id = %movie.id, title = %movie.title, "adding to history");
        self.history.append(movie)
    }
}

fn normalize(title: &str) -> String {
    title.trim().to_lowercase()
}
