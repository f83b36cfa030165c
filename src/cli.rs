use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

/// Command-line flags. Anything set here wins over the config file.
#[derive(Parser, Debug, Default)]
#[command(name = "moviesearch")]
#[command(about = "Search a movie catalog and keep a strip of recent results")]
pub struct Cli {
    /// Config file (defaults to <config_dir>/moviesearch/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// JSON catalog to search instead of the built-in one
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// History file (defaults to <data_dir>/moviesearch/history.json)
    #[arg(long, value_name = "PATH")]
    pub history: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `moviesearch=trace`
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Log file (defaults to <data_dir>/moviesearch/moviesearch.log)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn apply(&self, config: &mut Config) {
        if let Some(path) = &self.catalog {
            config.catalog.path = Some(path.clone());
        }
        if let Some(path) = &self.history {
            config.history.path = Some(path.clone());
            config.history.persist = true;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(path) = &self.log_file {
            config.logging.file = Some(path.clone());
        }
    }
}
