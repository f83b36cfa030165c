//! Recent-search history persisted as a JSON array.
//!
//! Writes go to a sibling temp file which is then renamed over the target,
//! while an exclusive `fs2` lock on `<file>.lock` keeps two processes from
//! interleaving their writes.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use parking_lot::Mutex;

use super::error::RepositoryError;
use super::model::MovieSearchResult;

pub struct HistoryStore {
    path: Option<PathBuf>,
    max_entries: usize,
    entries: Mutex<Vec<MovieSearchResult>>,
}

impl HistoryStore {
    /// History that lives only as long as the process.
    pub fn in_memory(max_entries: usize) -> Self {
        Self {
            path: None,
            max_entries: max_entries.max(1),
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Open the history file at `path`. A missing file is an empty history.
    pub fn open(path: impl Into<PathBuf>, max_entries: usize) -> Result<Self, RepositoryError> {
        let path = path.into();
        let max_entries = max_entries.max(1);
        let mut entries = if path.exists() {
            read_entries(&path)?
        } else {
            Vec::new()
        };
        truncate_oldest(&mut entries, max_entries);

        tracing::debug!(
            path = %path.display(),
            entries = entries.len(),
            "history loaded"
        );

        Ok(Self {
            path: Some(path),
            max_entries,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn entries(&self) -> Vec<MovieSearchResult> {
        self.entries.lock().clone()
    }

    /// Append `movie` unless an entry with the same id exists, evicting the
    /// oldest entries past `max_entries`.
    ///
    /// The in-memory list only changes once the new list has been written.
    pub fn append(
        &self,
        movie: MovieSearchResult,
    ) -> Result<Vec<MovieSearchResult>, RepositoryError> {
        let mut entries = self.entries.lock();
        if entries.iter().any(|entry| entry.id == movie.id) {
            return Ok(entries.clone());
        }

        let mut updated = entries.clone();
        updated.push(movie);
        truncate_oldest(&mut updated, self.max_entries);

        if let Some(path) = &self.path {
            write_entries(path, &updated)?;
        }

        *entries = updated;
        Ok(entries.clone())
    }
}

fn truncate_oldest(entries: &mut Vec<MovieSearchResult>, max_entries: usize) {
    if entries.len() > max_entries {
        let excess = entries.len() - max_entries;
        entries.drain(..excess);
    }
}

fn read_entries(path: &Path) -> Result<Vec<MovieSearchResult>, RepositoryError> {
    let content = fs::read_to_string(path).map_err(|source| RepositoryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&content).map_err(|source| RepositoryError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn write_entries(path: &Path, entries: &[MovieSearchResult]) -> Result<(), RepositoryError> {
    let io_err = |source| RepositoryError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
    }

    let lock_path = sibling(path, "lock");
    let lock_file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&lock_path)
        .map_err(io_err)?;
    lock_file
        .lock_exclusive()
        .map_err(|source| RepositoryError::Lock {
            path: lock_path.clone(),
            source,
        })?;

    let json = serde_json::to_vec_pretty(entries).map_err(|source| RepositoryError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let tmp_path = sibling(path, "tmp");
    let result = (|| {
        let mut tmp = File::create(&tmp_path)?;
        tmp.write_all(&json)?;
        tmp.sync_all()?;
        fs::rename(&tmp_path, path)
    })();

    let _ = FileExt::unlock(&lock_file);
    result.map_err(io_err)
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}
