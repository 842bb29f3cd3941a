use std::fs;
use std::path::Path;

use gacha_engine::ScanSettings;
use scan_logging::{scan_info, scan_warn};

pub(crate) const CONFIG_FILENAME: &str = "gacha_helper.ron";

/// Loads scan settings from `{dir}/gacha_helper.ron`.
///
/// A missing file means defaults. A file that cannot be read, parsed or
/// validated is reported and also falls back to defaults.
pub(crate) fn load_settings(dir: &Path) -> ScanSettings {
    let path = dir.join(CONFIG_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return ScanSettings::default();
        }
        Err(err) => {
            scan_warn!("Failed to read settings from {:?}: {}", path, err);
            return ScanSettings::default();
        }
    };

    let settings: ScanSettings = match ron::from_str(&content) {
        Ok(settings) => settings,
        Err(err) => {
            scan_warn!("Failed to parse settings from {:?}: {}", path, err);
            return ScanSettings::default();
        }
    };

    if let Err(err) = settings.validate() {
        scan_warn!("Ignoring settings from {:?}: {}", path, err);
        return ScanSettings::default();
    }

    scan_info!("Loaded settings from {:?}", path);
    settings
}
