//! Filesystem primitives that never fail loudly
//!
//! The `try_*` functions report a plain `bool` and swallow the cause. Use the
//! [`Outcome`]-returning siblings when the reason matters.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::Path;
use tracing::debug;

use super::error::{Outcome, StorageError};

/// Name of the file created by [`probe_write_privilege`]
pub const WRITE_PROBE_FILE: &str = ".write_probe";

/// Drop a leading UTF-8 byte-order mark, as text readers do
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

/// Make sure a directory (and its ancestors) exists
pub fn ensure_directory(path: &Path) -> Outcome {
    if path.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(path).map_err(|e| StorageError::io(path, e))?;
    debug!("Created directory {:?}", path);
    Ok(())
}

/// Delete a file, reporting why it failed
pub fn delete_file(path: &Path) -> Outcome {
    if !path.is_file() {
        return Err(StorageError::not_found(path));
    }
    fs::remove_file(path).map_err(|e| StorageError::io(path, e))
}

/// Delete a file. Returns false if it does not exist or could not be removed.
pub fn try_delete(path: &Path) -> bool {
    match delete_file(path) {
        Ok(()) => true,
        Err(e) => {
            debug!("Delete skipped: {}", e);
            false
        }
    }
}

/// Move or rename a file, reporting why it failed
pub fn move_file(from: &Path, to: &Path) -> Outcome {
    if !from.exists() {
        return Err(StorageError::not_found(from));
    }
    fs::rename(from, to).map_err(|e| StorageError::io(from, e))
}

/// Move or rename a file. Returns false if the source is missing or the move failed.
///
/// Whether an existing destination is replaced is up to the host filesystem.
pub fn try_move(from: &Path, to: &Path) -> bool {
    match move_file(from, to) {
        Ok(()) => true,
        Err(e) => {
            debug!("Move to {:?} skipped: {}", to, e);
            false
        }
    }
}

/// Check whether writing into `dir` needs elevated privileges.
///
/// Creates and removes a small probe file. Only an access-denied error on
/// creation counts as "needs elevation"; every other result returns false.
pub fn probe_write_privilege(dir: &Path) -> bool {
    let probe = dir.join(WRITE_PROBE_FILE);
    match File::create(&probe) {
        Ok(file) => {
            drop(file);
            if let Err(e) = fs::remove_file(&probe) {
                debug!("Could not remove write probe {:?}: {}", probe, e);
            }
            false
        }
        Err(e) if is_access_denied(&e) => {
            debug!("Write probe denied in {:?}", dir);
            true
        }
        Err(e) => {
            debug!("Write probe in {:?} failed: {}", dir, e);
            false
        }
    }
}

/// Whether a failed create means the caller lacks write access
fn is_access_denied(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::PermissionDenied
}

/// Open a file for buffered text reading
pub fn open_text_reader(path: &Path) -> Result<BufReader<File>, StorageError> {
    match File::open(path) {
        Ok(file) => Ok(BufReader::new(file)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StorageError::not_found(path)),
        Err(e) => Err(StorageError::io(path, e)),
    }
}

/// Create or truncate a file for buffered text writing. Parent directories are not created.
pub fn open_text_writer(path: &Path) -> Result<BufWriter<File>, StorageError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| StorageError::io(path, e))
}
