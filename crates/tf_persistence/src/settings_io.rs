use std::fs;
use std::path::{Path, PathBuf};

use tf_building::{BuildingSettings, SettingsError};
use thiserror::Error;

/// Default directory for saved building settings.
pub const SETTINGS_DIR: &str = "assets/buildings";

/// Error type for settings I/O operations.
#[derive(Debug, Error)]
pub enum SettingsIoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RON serialization error: {0}")]
    Ron(#[from] ron::Error),

    #[error("RON parse error: {0}")]
    RonSpanned(#[from] ron::error::SpannedError),

    #[error("invalid building settings: {0}")]
    Invalid(#[from] SettingsError),
}

/// Save building settings to a RON file.
///
/// # Arguments
/// * `path` - File path to save to
/// * `settings` - Settings to save
pub fn save_settings(path: &Path, settings: &BuildingSettings) -> Result<(), SettingsIoError> {
    let pretty_config = ron::ser::PrettyConfig::new()
        .depth_limit(3)
        .separate_tuple_members(true);

    let ron_string = ron::ser::to_string_pretty(settings, pretty_config)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, ron_string)?;
    Ok(())
}

/// Load building settings from a RON file.
///
/// Missing fields take their defaults; the result is validated before it
/// is returned.
pub fn load_settings(path: &Path) -> Result<BuildingSettings, SettingsIoError> {
    let contents = fs::read_to_string(path)?;
    let settings: BuildingSettings = ron::from_str(&contents)?;
    settings.validate()?;
    Ok(settings)
}

/// List all settings files in `dir`, sorted by path.
pub fn list_settings(dir: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|s| s.to_str()) == Some("ron") {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Generate a filename from a building name.
pub fn settings_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("{}.ron", sanitized.to_lowercase())
}

/// Get the full path for a settings file.
pub fn settings_path(name: &str) -> PathBuf {
    Path::new(SETTINGS_DIR).join(settings_filename(name))
}
