//! Storage Layer
//!
//! Resolves where data files live and reads/writes them as JSON without
//! letting filesystem or decode faults escape.

pub mod error;
pub mod fs;
pub mod json;
pub mod paths;
pub mod sniff;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::{DataFileNames, StorageConfig};
use error::{Outcome, StorageError};
use json::{JsonCodec, SerdeJsonCodec};
use paths::{InstallMode, PathResolver};

/// Logical data files kept in the data folder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataFile {
    /// Values catalog
    Values,
    /// Server multiplier table
    ServerMultipliers,
    /// Taming food table
    TamingFood,
    /// Manifest listing the available mod value files
    ModManifest,
    /// Kibble table
    Kibble,
    /// Alias table
    Aliases,
    /// Structured data table
    StructuredData,
    /// Species exclusion list
    IgnoredSpecies,
    /// Custom replacement rules
    CustomReplacements,
}

impl DataFile {
    /// Every logical data file
    pub const ALL: [DataFile; 9] = [
        DataFile::Values,
        DataFile::ServerMultipliers,
        DataFile::TamingFood,
        DataFile::ModManifest,
        DataFile::Kibble,
        DataFile::Aliases,
        DataFile::StructuredData,
        DataFile::IgnoredSpecies,
        DataFile::CustomReplacements,
    ];

    /// Configured file name
    pub fn file_name<'a>(&self, names: &'a DataFileNames) -> &'a str {
        match self {
            DataFile::Values => &names.values,
            DataFile::ServerMultipliers => &names.server_multipliers,
            DataFile::TamingFood => &names.taming_food,
            DataFile::ModManifest => &names.mod_manifest,
            DataFile::Kibble => &names.kibble,
            DataFile::Aliases => &names.aliases,
            DataFile::StructuredData => &names.structured_data,
            DataFile::IgnoredSpecies => &names.ignored_species,
            DataFile::CustomReplacements => &names.custom_replacements,
        }
    }

    /// Display name for listings
    pub fn display_name(&self) -> &'static str {
        match self {
            DataFile::Values => "Values",
            DataFile::ServerMultipliers => "Server Multipliers",
            DataFile::TamingFood => "Taming Food",
            DataFile::ModManifest => "Mod Manifest",
            DataFile::Kibble => "Kibble",
            DataFile::Aliases => "Aliases",
            DataFile::StructuredData => "Structured Data",
            DataFile::IgnoredSpecies => "Ignored Species",
            DataFile::CustomReplacements => "Custom Replacements",
        }
    }
}

/// Composition root tying configuration, path resolution and the JSON codec together
#[derive(Debug, Clone)]
pub struct DataStore<C: JsonCodec = SerdeJsonCodec> {
    config: StorageConfig,
    resolver: PathResolver,
    codec: C,
}

impl DataStore {
    /// Create a store using serde_json, honoring `config.pretty_json`
    pub fn new(config: StorageConfig, resolver: PathResolver) -> Self {
        let codec = SerdeJsonCodec {
            pretty: config.pretty_json,
        };
        Self::with_codec(config, resolver, codec)
    }

    /// Create a store for the running executable
    pub fn detect(config: StorageConfig, mode: InstallMode) -> Self {
        let resolver = PathResolver::detect(&config, mode);
        Self::new(config, resolver)
    }
}

impl<C: JsonCodec> DataStore<C> {
    /// Create a store with a custom codec
    pub fn with_codec(config: StorageConfig, resolver: PathResolver, codec: C) -> Self {
        Self {
            config,
            resolver,
            codec,
        }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Base storage directory
    pub fn base_dir(&self) -> &Path {
        self.resolver.base_dir()
    }

    /// Data folder
    pub fn data_dir(&self) -> PathBuf {
        self.resolver.data_dir()
    }

    /// Path of a logical data file
    pub fn path(&self, file: DataFile) -> PathBuf {
        self.resolver
            .data_path(Some(file.file_name(&self.config.files)), None)
    }

    /// Path of the manifest inside a mod folder
    pub fn mod_manifest_path(&self, mod_folder: &str) -> PathBuf {
        self.resolver
            .data_path(Some(mod_folder), Some(&self.config.files.mod_manifest))
    }

    /// Load a logical data file
    pub fn load<T: DeserializeOwned>(&self, file: DataFile) -> Result<T, StorageError> {
        self.load_path(&self.path(file))
    }

    /// Save a logical data file. The data folder must already exist.
    pub fn save<T: Serialize + ?Sized>(&self, file: DataFile, value: &T) -> Outcome {
        self.save_path(&self.path(file), value)
    }

    /// Load any JSON file with this store's codec
    pub fn load_path<T: DeserializeOwned>(&self, path: &Path) -> Result<T, StorageError> {
        json::load_json_with(&self.codec, path)
    }

    /// Save any JSON file with this store's codec
    pub fn save_path<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> Outcome {
        json::save_json_with(&self.codec, path, value)
    }

    /// Create the data folder if needed
    pub fn ensure_data_dir(&self) -> Outcome {
        fs::ensure_directory(&self.data_dir())
    }

    /// Whether writing to the base directory needs elevated privileges
    pub fn needs_elevation(&self) -> bool {
        fs::probe_write_privilege(self.base_dir())
    }
}
