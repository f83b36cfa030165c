//! Application configuration: TOML file under the platform config dir,
//! overridable from the command line.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{CatalogConfig, Config, HistoryConfig, LoggingConfig, UiConfig};
