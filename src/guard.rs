use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::{DirectoryOptions, FileOptions};
use crate::error::{EntryKind, Error, Result};

/// Validate or prepare a directory at `path`.
///
/// The steps run in order: the `exists` check, then `reset`, then `touch`.
/// A failed reset is logged and does not fail the call; use
/// [`reset_directory`] to observe that failure.
pub fn ensure_directory(path: impl AsRef<Path>, options: &DirectoryOptions) -> Result<PathBuf> {
    let path = path.as_ref();

    if options.exists {
        if !path.exists() {
            return Err(Error::NotFound {
                path: path.to_path_buf(),
            });
        }
        if !path.is_dir() {
            return Err(Error::wrong_kind(path, EntryKind::Directory));
        }
    }

    if options.reset {
        if let Err(e) = reset_directory(path) {
            warn!(path = %path.display(), error = %e, "cannot reset directory");
        }
    }

    if options.touch {
        fs::create_dir_all(path).map_err(|source| Error::io("creating directory", path, source))?;
    }

    Ok(path.to_path_buf())
}

/// Remove whatever is at `path` and leave an empty directory in its place.
pub fn reset_directory(path: &Path) -> Result<()> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => {
            debug!(path = %path.display(), "removing directory tree");
            fs::remove_dir_all(path)
                .map_err(|source| Error::io("removing directory", path, source))?;
        }
        Ok(_) => {
            debug!(path = %path.display(), "removing file in place of directory");
            fs::remove_file(path).map_err(|source| Error::io("removing file", path, source))?;
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(source) => return Err(Error::io("inspecting", path, source)),
    }

    fs::create_dir_all(path).map_err(|source| Error::io("creating directory", path, source))
}

/// Validate a file path. Never creates anything.
pub fn ensure_file(path: impl AsRef<Path>, options: &FileOptions) -> Result<PathBuf> {
    let path = path.as_ref();

    if options.exists {
        if !path.exists() {
            return Err(Error::NotFound {
                path: path.to_path_buf(),
            });
        }
        if !path.is_file() {
            return Err(Error::wrong_kind(path, EntryKind::File));
        }
    }

    Ok(path.to_path_buf())
}
