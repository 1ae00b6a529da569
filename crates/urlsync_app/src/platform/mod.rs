mod app;
mod commands;
mod config;
mod logging;

pub use app::run_app;
