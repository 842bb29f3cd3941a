use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ScanError;

const CLIENT_LOG: &str = "Client/Saved/Logs/Client.log";
const WEBVIEW_DEBUG_LOG: &str =
    "Client/Binaries/Win64/ThirdParty/KrPcSdk_Global/KRSDKRes/KRSDKWebView/debug.log";

/// Install locations relative to a drive or search root, covering the
/// launcher, Epic and WeGame layouts.
const INSTALL_SUBPATHS: &[&str] = &[
    "Wuthering Waves Game",
    "Wuthering Waves/Wuthering Waves Game",
    "Games/Wuthering Waves Game",
    "Games/Wuthering Waves/Wuthering Waves Game",
    "Program Files/Epic Games/WutheringWavesj3oFh",
    "Program Files/Epic Games/WutheringWavesj3oFh/Wuthering Waves Game",
    "Games/WeGameApps/rail_apps/Wuthering Waves(2002137)",
    "WeGameApps/rail_apps/Wuthering Waves(2002137)",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    /// Game directories checked before anything else.
    pub install_dirs: Vec<PathBuf>,
    /// Look up install directories recorded in the Windows registry.
    pub scan_registry: bool,
    /// Roots joined with every entry of `install_subpaths`.
    pub search_roots: Vec<PathBuf>,
    /// Also use every existing drive root `A:/`..`Z:/` as a search root.
    pub scan_drive_roots: bool,
    pub install_subpaths: Vec<PathBuf>,
    /// Log files relative to a game directory.
    pub log_files: Vec<PathBuf>,
    /// Directories whose path contains one of these (case-insensitive) are skipped.
    pub excluded_markers: Vec<String>,
    /// Links older than this are still returned, with a warning.
    pub expiry_minutes: u32,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            install_dirs: Vec::new(),
            scan_registry: cfg!(windows),
            search_roots: Vec::new(),
            scan_drive_roots: cfg!(windows),
            install_subpaths: INSTALL_SUBPATHS.iter().map(PathBuf::from).collect(),
            log_files: vec![PathBuf::from(CLIENT_LOG), PathBuf::from(WEBVIEW_DEBUG_LOG)],
            excluded_markers: vec!["onedrive".to_string()],
            expiry_minutes: 30,
        }
    }
}

impl ScanSettings {
    pub fn validate(&self) -> Result<(), ScanError> {
        if self.expiry_minutes == 0 {
            return Err(ScanError::InvalidSettings(
                "expiry_minutes must be greater than zero".into(),
            ));
        }
        if self.log_files.is_empty() {
            return Err(ScanError::InvalidSettings("no log files configured".into()));
        }
        Ok(())
    }
}
