pub mod cli;
pub mod config;
pub mod logging;
pub mod movies;
pub mod ui;
