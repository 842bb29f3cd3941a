//! Platform logging initialization for gacha_app.
//!
//! The terminal belongs to the UI while the app runs, so log records go to
//! `./gacha_helper.log` in the current working directory.

use std::fs::File;
use std::path::PathBuf;

use log::LevelFilter;
use simplelog::{Config, ConfigBuilder, WriteLogger};

pub const LOG_FILENAME: &str = "gacha_helper.log";

/// Installs the file logger. Does nothing if the file cannot be created or a
/// logger is already installed.
pub fn initialize() {
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let log_path = PathBuf::from(".").join(LOG_FILENAME);

    match File::create(&log_path) {
        Ok(file) => {
            let _ = WriteLogger::init(level, build_config(), file);
        }
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", log_path, err);
        }
    }
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}
