//! Base directory resolution for installed and portable deployments

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::StorageConfig;

/// How the application is deployed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallMode {
    /// Per-user data lives in the OS local application data directory
    Installed,
    /// Data lives next to the executable
    Portable,
}

impl From<bool> for InstallMode {
    fn from(installed: bool) -> Self {
        if installed {
            InstallMode::Installed
        } else {
            InstallMode::Portable
        }
    }
}

/// Compute the base storage directory.
///
/// Installed mode joins `local_data_root` with the executable's base name
/// (or `fallback_name` when that is empty). Portable mode returns the
/// directory containing the executable. Never touches the filesystem.
pub fn resolve_base_dir(
    mode: InstallMode,
    exe_path: &Path,
    local_data_root: &Path,
    fallback_name: &str,
) -> PathBuf {
    match mode {
        InstallMode::Installed => {
            let product = exe_path
                .file_stem()
                .and_then(|s| s.to_str())
                .filter(|s| !s.is_empty())
                .unwrap_or(fallback_name);
            local_data_root.join(product)
        }
        InstallMode::Portable => portable_dir(exe_path),
    }
}

fn portable_dir(exe_path: &Path) -> PathBuf {
    match exe_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Join `base`, the data folder and the optional segments, skipping empty ones
pub fn resolve_data_path(
    base: &Path,
    data_folder: &str,
    file_name: Option<&str>,
    sub_segment: Option<&str>,
) -> PathBuf {
    [Some(data_folder), file_name, sub_segment]
        .into_iter()
        .flatten()
        .filter(|segment| !segment.is_empty())
        .fold(base.to_path_buf(), |path, segment| path.join(segment))
}

/// Resolves paths below a fixed base directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    base_dir: PathBuf,
    data_folder: String,
}

impl PathResolver {
    /// Create a resolver from explicit inputs
    pub fn new(
        config: &StorageConfig,
        mode: InstallMode,
        exe_path: &Path,
        local_data_root: &Path,
    ) -> Self {
        let base_dir = resolve_base_dir(
            mode,
            exe_path,
            local_data_root,
            &config.fallback_product_name,
        );
        Self::with_base_dir(config, base_dir)
    }

    /// Create a resolver rooted at an already known base directory
    pub fn with_base_dir(config: &StorageConfig, base_dir: PathBuf) -> Self {
        Self {
            base_dir,
            data_folder: config.data_folder.clone(),
        }
    }

    /// Create a resolver for the running executable
    pub fn detect(config: &StorageConfig, mode: InstallMode) -> Self {
        let exe_path = current_exe_path(&config.fallback_product_name);
        Self::detect_for(config, mode, &exe_path)
    }

    /// Create a resolver for the given executable path, looking up the OS
    /// local data directory when needed
    pub fn detect_for(config: &StorageConfig, mode: InstallMode, exe_path: &Path) -> Self {
        let resolver = match mode {
            InstallMode::Installed => {
                let root = installed_root(local_data_root());
                Self::new(config, mode, exe_path, &root)
            }
            InstallMode::Portable => Self::with_base_dir(config, portable_dir(exe_path)),
        };
        debug!("Resolved {:?} base directory: {:?}", mode, resolver.base_dir);
        resolver
    }

    /// Base storage directory
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Data folder below the base directory
    pub fn data_dir(&self) -> PathBuf {
        resolve_data_path(&self.base_dir, &self.data_folder, None, None)
    }

    /// Path of a file (and optional sub-segment) inside the data folder
    pub fn data_path(&self, file_name: Option<&str>, sub_segment: Option<&str>) -> PathBuf {
        resolve_data_path(&self.base_dir, &self.data_folder, file_name, sub_segment)
    }
}

/// OS per-user local application data directory
pub fn local_data_root() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.data_local_dir().to_path_buf())
}

/// Root for installed mode; the current directory stands in when the OS
/// local data directory is unknown
fn installed_root(local_root: Option<PathBuf>) -> PathBuf {
    local_root.unwrap_or_else(|| {
        warn!("Could not determine local data directory, using current directory");
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    })
}

fn current_exe_path(fallback_name: &str) -> PathBuf {
    match std::env::current_exe() {
        Ok(path) => path,
        Err(e) => {
            warn!("Could not determine executable path: {}", e);
            std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(fallback_name)
        }
    }
}
