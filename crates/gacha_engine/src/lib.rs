//! Gacha helper engine: the host side of the scan command and its log channel.
mod bridge;
mod clipboard;
mod engine;
mod game_logs;
mod registry;
mod scanner;
mod settings;
mod types;

pub use bridge::{EventHub, HubLogSink, LogSink, Subscription, LOG_CHANNEL, SCAN_COMMAND};
pub use clipboard::{ClipboardError, LinkClipboard, SystemClipboard};
pub use engine::EngineHandle;
pub use game_logs::{find_latest_link, GameLogScanner, LinkCandidate};
pub use registry::{
    discover_install_dirs, firewall_rule_game_dir, game_dir_from_exe, mui_cache_game_dir,
    uninstall_game_dir,
};
pub use scanner::UrlScanner;
pub use settings::ScanSettings;
pub use types::{EngineEvent, ScanError, ScanId, ScanResponse};
