use std::fs;
use std::path::Path;

use nb_core::Configuration;

pub fn read_config(path: &Path) -> Result<Configuration, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;
    Configuration::from_json(&text)
        .map_err(|e| format!("Failed to load '{}': {}", path.display(), e))
}

/// Read a configuration for editing; a missing file starts empty.
pub fn read_config_or_default(path: &Path) -> Result<Configuration, String> {
    if !path.exists() {
        log::debug!("'{}' does not exist, starting from an empty configuration", path.display());
        return Ok(Configuration::default());
    }
    read_config(path)
}

pub fn write_config(path: &Path, config: &Configuration) -> Result<(), String> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create '{}': {}", parent.display(), e))?;
    }
    let json = config
        .to_json_pretty()
        .map_err(|e| format!("Failed to serialize configuration: {}", e))?;
    fs::write(path, json + "\n")
        .map_err(|e| format!("Failed to write '{}': {}", path.display(), e))?;
    Ok(())
}

pub fn read_list(path: &Path) -> Result<String, String> {
    fs::read_to_string(path)
        .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))
}
