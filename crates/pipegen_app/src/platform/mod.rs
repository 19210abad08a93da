mod app;
mod clipboard;
mod config;
mod effects;
mod ui;

pub use app::run_app;
