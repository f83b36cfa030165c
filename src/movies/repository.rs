use super::error::RepositoryError;
use super::model::MovieSearchResult;

/// Source of movie data and search history.
///
/// Calls may block (file I/O, lookups); the view-model runs them on the
/// blocking pool and never on the UI loop.
pub trait MovieRepository: Send + Sync + 'static {
    /// Resolve a title. Returns [`RepositoryError::NotFound`] on a miss.
    fn search_movie(&self, title: &str) -> Result<MovieSearchResult, RepositoryError>;

    /// Current history, oldest first.
    fn history(&self) -> Result<Vec<MovieSearchResult>, RepositoryError>;

    /// Append a movie to history and return the updated list.
    ///
    /// Adding a movie that is already present leaves the list unchanged.
    fn add_to_history(
        &self,
        movie: MovieSearchResult,
    ) -> Result<Vec<MovieSearchResult>, RepositoryError>;
}
