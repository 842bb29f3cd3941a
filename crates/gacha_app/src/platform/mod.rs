mod app;
mod config;
mod effects;
mod logging;
mod subscriber;
mod ui;

pub use app::run_app;
