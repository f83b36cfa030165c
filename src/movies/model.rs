use serde::{Deserialize, Serialize};

/// A single rating as reported by one source (e.g. "Internet Movie Database").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub source: String,
    pub value: String,
}

/// A resolved movie.
///
/// The whole record doubles as the identity handle that travels back to the
/// view-model when the user adds the movie to history, and is what the
/// history strip stores and displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSearchResult {
    /// Stable identifier (IMDb id for the built-in catalog).
    pub id: String,
    pub title: String,
    /// The query that produced this result, restored into the search box
    /// when the entry is picked from history.
    #[serde(default)]
    pub searched_title: String,
    #[serde(default)]
    pub ratings: Vec<Rating>,
    #[serde(default)]
    pub poster_url: String,
}

impl MovieSearchResult {
    /// Text shown in the rating line: the first rating with its source.
    pub fn rating_summary(&self) -> String {
        match self.ratings.first() {
            Some(rating) => format!("{} ({})", rating.value, rating.source),
            None => "-".to_string(),
        }
    }
}
