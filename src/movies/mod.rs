//! Movie data provider.
//!
//! Resolves a title to a [`MovieSearchResult`] and keeps the recent-search
//! history. The view-model only talks to this layer through the
//! [`MovieRepository`] trait; [`CatalogRepository`] is the shipped
//! implementation backed by a JSON catalog and a JSON history file.

mod catalog;
mod error;
mod history_store;
mod model;
mod repository;

pub use catalog::{CatalogEntry, CatalogRepository};
pub use error::RepositoryError;
pub use history_store::HistoryStore;
pub use model::{MovieSearchResult, Rating};
pub use repository::MovieRepository;
