use std::path::Path;

use crate::config::{ConfigError, Preload};
use crate::errors::CoreError;

/// Loads preload files during the bootstrap sequence
///
/// The kernel resolves and gates preload entries; what loading a file means
/// (running a script, opening a plugin, reading a fragment) belongs to the
/// launcher. A handler signals an absent file with
/// [`ConfigError::PreloadNotFound`] so the sequencer can honor the entry's
/// `optional` flag.
pub trait PreloadHandler: Send + Sync {
    /// Load a single preload file. `path` is absolute, already joined with
    /// the project root.
    fn load(&self, path: &Path, preload: &Preload) -> Result<(), CoreError>;
}

/// Default handler: verifies the file exists and nothing more
#[derive(Debug, Default)]
pub struct FsPreloadHandler;

impl PreloadHandler for FsPreloadHandler {
    fn load(&self, path: &Path, _preload: &Preload) -> Result<(), CoreError> {
        if !path.is_file() {
            return Err(ConfigError::PreloadNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fs_handler_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kernel.lua");
        std::fs::write(&path, "-- startup").unwrap();

        let preload = Preload::new("kernel.lua");
        assert!(FsPreloadHandler.load(&path, &preload).is_ok());
    }

    #[test]
    fn test_fs_handler_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.lua");

        let preload = Preload::new("missing.lua");
        let err = FsPreloadHandler.load(&path, &preload).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Config(ConfigError::PreloadNotFound { .. })
        ));
    }
}
