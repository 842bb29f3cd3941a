//! Install directories recorded by Windows: the shell's MuiCache, firewall
//! rules for the game client, and uninstall entries.
//!
//! The parsing helpers are platform independent; only
//! [`discover_install_dirs`] touches the registry.

use std::path::PathBuf;

use once_cell::sync::Lazy;
use regex::Regex;

const GAME_MARKER: &str = "wuthering";
const CLIENT_EXE: &str = "client-win64-shipping";

static CLIENT_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[\\/]client[\\/]").expect("client segment pattern compiles"));

/// Cuts a client executable path at its `Client` directory, leaving the game
/// directory.
pub fn game_dir_from_exe(exe_path: &str) -> Option<PathBuf> {
    let mut parts = CLIENT_SEGMENT.splitn(exe_path, 2);
    let game_dir = parts.next()?;
    parts.next()?;
    (!game_dir.is_empty()).then(|| PathBuf::from(game_dir))
}

/// MuiCache stores the executable path as the value name and its friendly
/// name as the data.
pub fn mui_cache_game_dir(name: &str, data: &str) -> Option<PathBuf> {
    if !data.to_lowercase().contains(GAME_MARKER)
        || !name.to_lowercase().contains(&format!("{CLIENT_EXE}.exe"))
    {
        return None;
    }
    game_dir_from_exe(name)
}

/// Firewall rules are `|`-separated `key=value` fields; the `app=` field holds
/// the executable path.
pub fn firewall_rule_game_dir(rule: &str) -> Option<PathBuf> {
    let rule = rule.to_lowercase();
    if !rule.contains(GAME_MARKER) || !rule.contains(CLIENT_EXE) {
        return None;
    }
    let app = rule.split('|').find_map(|field| field.strip_prefix("app="))?;
    game_dir_from_exe(app)
}

pub fn uninstall_game_dir(display_name: &str, install_path: &str) -> Option<PathBuf> {
    if !display_name.to_lowercase().contains(GAME_MARKER) || install_path.trim().is_empty() {
        return None;
    }
    Some(PathBuf::from(install_path.trim()))
}

/// Game directories found in the registry, in lookup order, duplicates kept.
#[cfg(windows)]
pub fn discover_install_dirs() -> Vec<PathBuf> {
    let mut dirs = windows::mui_cache();
    dirs.extend(windows::firewall_rules());
    dirs.extend(windows::uninstall_entries());
    dirs
}

/// There is no registry off Windows.
#[cfg(not(windows))]
pub fn discover_install_dirs() -> Vec<PathBuf> {
    Vec::new()
}

#[cfg(windows)]
mod windows {
    use std::path::PathBuf;

    use scan_logging::scan_debug;
    use winreg::enums::{HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE};
    use winreg::RegKey;

    use super::{firewall_rule_game_dir, mui_cache_game_dir, uninstall_game_dir};

    const MUI_CACHE: &str =
        r"Software\Classes\Local Settings\Software\Microsoft\Windows\Shell\MuiCache";
    const FIREWALL_RULES: &str =
        r"SYSTEM\CurrentControlSet\Services\SharedAccess\Parameters\FirewallPolicy\FirewallRules";
    const UNINSTALL_KEYS: &[&str] = &[
        r"SOFTWARE\Microsoft\Windows\CurrentVersion\Uninstall",
        r"SOFTWARE\WOW6432Node\Microsoft\Windows\CurrentVersion\Uninstall",
    ];

    fn open(root: RegKey, path: &str) -> Option<RegKey> {
        match root.open_subkey(path) {
            Ok(key) => Some(key),
            Err(err) => {
                scan_debug!("Registry key {} unavailable: {}", path, err);
                None
            }
        }
    }

    pub(super) fn mui_cache() -> Vec<PathBuf> {
        let Some(key) = open(RegKey::predef(HKEY_CURRENT_USER), MUI_CACHE) else {
            return Vec::new();
        };
        key.enum_values()
            .filter_map(Result::ok)
            .filter_map(|(name, value)| mui_cache_game_dir(&name, &value.to_string()))
            .collect()
    }

    pub(super) fn firewall_rules() -> Vec<PathBuf> {
        let Some(key) = open(RegKey::predef(HKEY_LOCAL_MACHINE), FIREWALL_RULES) else {
            return Vec::new();
        };
        key.enum_values()
            .filter_map(Result::ok)
            .filter_map(|(_, value)| firewall_rule_game_dir(&value.to_string()))
            .collect()
    }

    pub(super) fn uninstall_entries() -> Vec<PathBuf> {
        let mut dirs = Vec::new();
        for path in UNINSTALL_KEYS {
            let Some(key) = open(RegKey::predef(HKEY_LOCAL_MACHINE), path) else {
                continue;
            };
            for name in key.enum_keys().filter_map(Result::ok) {
                let Ok(entry) = key.open_subkey(&name) else {
                    continue;
                };
                let display_name: String = entry.get_value("DisplayName").unwrap_or_default();
                let install_path: String = entry.get_value("InstallPath").unwrap_or_default();
                dirs.extend(uninstall_game_dir(&display_name, &install_path));
            }
        }
        dirs
    }
}
