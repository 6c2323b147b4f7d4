//! app-data-store - inspect and prepare an application's data directory
//!
//! Prints resolved data paths, checks data files, and probes write access
//! for installed or portable deployments.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use app_data_store::config;
use app_data_store::{
    looks_like_json_object, DataFile, DataStore, InstallMode, PathResolver, StorageConfig,
};

/// app-data-store - data directory inspector
#[derive(Parser, Debug)]
#[command(name = "app-data-store")]
#[command(about = "Resolve, check and prepare application data files")]
struct Args {
    /// Resolve paths for an installed deployment (per-user local data directory)
    #[arg(long)]
    installed: bool,

    /// Storage configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Executable to resolve paths for (defaults to this binary)
    #[arg(long)]
    exe: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the base directory and every data file path
    Paths,
    /// Check that a file holds readable JSON
    Check {
        /// File to check
        file: PathBuf,
    },
    /// Report whether writing to a directory needs elevated privileges
    Probe {
        /// Directory to probe (defaults to the base directory)
        dir: Option<PathBuf>,
    },
    /// Create the data directory
    Init,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if args.verbose { "debug" } else { "info" })
    });
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match &args.config {
        Some(path) => config::load_or_default(path),
        None => StorageConfig::default(),
    };
    let store = build_store(config, InstallMode::from(args.installed), args.exe.as_deref());

    match args.command {
        Command::Paths => print_paths(&store),
        Command::Check { file } => check_file(&store, file)?,
        Command::Probe { dir } => {
            let dir = dir.unwrap_or_else(|| store.base_dir().to_path_buf());
            let elevated = app_data_store::probe_write_privilege(&dir);
            println!(
                "{}: {}",
                dir.display(),
                if elevated { "needs elevation" } else { "writable or not a permission issue" }
            );
        }
        Command::Init => {
            if let Err(e) = store.ensure_data_dir() {
                bail!("{}", e);
            }
            info!("Data directory ready at {:?}", store.data_dir());
        }
    }

    Ok(())
}

fn build_store(
    config: StorageConfig,
    mode: InstallMode,
    exe: Option<&Path>,
) -> DataStore {
    let resolver = match exe {
        Some(exe) => PathResolver::detect_for(&config, mode, exe),
        None => PathResolver::detect(&config, mode),
    };
    DataStore::new(config, resolver)
}

fn print_paths(store: &DataStore) {
    println!("Base directory: {}", store.base_dir().display());
    println!("Data directory: {}", store.data_dir().display());
    for file in DataFile::ALL {
        let path = store.path(file);
        println!(
            "  {:<20} {}{}",
            file.display_name(),
            path.display(),
            if path.exists() { "" } else { " (missing)" }
        );
    }
}

/// Check a data file; relative paths are taken from the data directory
fn check_file(store: &DataStore, file: PathBuf) -> Result<()> {
    let path = if file.is_relative() && !file.exists() {
        store.data_dir().join(file)
    } else {
        file
    };

    if !looks_like_json_object(&path) {
        info!("{:?} does not look like a JSON object", path);
    }

    match store.load_path::<serde_json::Value>(&path) {
        Ok(_) => println!("{}: ok", path.display()),
        Err(e) => match e.user_message() {
            None => println!("{}: not found", path.display()),
            Some(message) => bail!(message),
        },
    }
    Ok(())
}
