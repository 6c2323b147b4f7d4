//! Storage Configuration
//!
//! Fixed folder and file names used by the data store, stored in TOML format.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Storage settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Name of the folder below the base directory that holds the data files
    pub data_folder: String,
    /// Product folder name used in installed mode when the executable name is unusable
    pub fallback_product_name: String,
    /// Write indented JSON instead of compact output
    pub pretty_json: bool,
    /// Names of the logical data files
    pub files: DataFileNames,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_folder: "data".to_string(),
            fallback_product_name: "AppDataStore".to_string(),
            pretty_json: false,
            files: DataFileNames::default(),
        }
    }
}

/// File names of the data files living in the data folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataFileNames {
    /// Values catalog
    pub values: String,
    /// Server multiplier table
    pub server_multipliers: String,
    /// Taming food table
    pub taming_food: String,
    /// Manifest file, one per mod folder
    pub mod_manifest: String,
    /// Kibble table
    pub kibble: String,
    /// Alias table
    pub aliases: String,
    /// Structured data table
    pub structured_data: String,
    /// Species exclusion list
    pub ignored_species: String,
    /// Custom replacement rules
    pub custom_replacements: String,
}

impl Default for DataFileNames {
    fn default() -> Self {
        Self {
            values: "values.json".to_string(),
            server_multipliers: "serverMultipliers.json".to_string(),
            taming_food: "tamingFoodData.json".to_string(),
            mod_manifest: "_manifest.json".to_string(),
            kibble: "kibbles.json".to_string(),
            aliases: "aliases.json".to_string(),
            structured_data: "structuredData.json".to_string(),
            ignored_species: "ignoreSpecies.json".to_string(),
            custom_replacements: "customReplacings.json".to_string(),
        }
    }
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<StorageConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {:?}", path))?;
    let config: StorageConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {:?}", path))?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &StorageConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file {:?}", path))?;
    Ok(())
}

/// Load configuration from file, or fall back to the defaults
pub fn load_or_default(path: &Path) -> StorageConfig {
    if !path.exists() {
        info!("No config at {:?}, using defaults", path);
        return StorageConfig::default();
    }
    match load_config(path) {
        Ok(config) => {
            info!("Loaded configuration from {:?}", path);
            config
        }
        Err(e) => {
            warn!("Ignoring config {:?}: {:#}", path, e);
            StorageConfig::default()
        }
    }
}
