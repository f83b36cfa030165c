use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use moviesearch::cli::Cli;
use moviesearch::config::Config;
use moviesearch::logging::init_tracing;
use moviesearch::movies::{CatalogRepository, HistoryStore, MovieRepository};
use moviesearch::ui::runtime;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    cli.apply(&mut config);
    config.validate()?;

    let log_path = config.log_path();
    init_tracing(&config.logging, &log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;
    tracing::info!(?config, "starting moviesearch");

    let history = match config.history_path() {
        Some(path) => HistoryStore::open(path, config.history.max_entries)
            .context("failed to load search history")?,
        None => HistoryStore::in_memory(config.history.max_entries),
    };
    match history.path() {
        Some(path) => tracing::info!(path = %path.display(), "history file"),
        None => tracing::info!("history kept in memory"),
    }
    let catalog = match &config.catalog.path {
        Some(path) => CatalogRepository::from_path(path, history)
            .with_context(|| format!("failed to load catalog {}", path.display()))?,
        None => CatalogRepository::builtin(history).context("failed to load built-in catalog")?,
    };
    tracing::info!(movies = catalog.len(), "catalog ready");

    let repository: Arc<dyn MovieRepository> = Arc::new(catalog);
    runtime::run(config, repository)
        .await
        .context("terminal UI failed")?;
    Ok(())
}
