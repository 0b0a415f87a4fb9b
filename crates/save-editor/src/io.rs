//! The file-picker and file-reading collaborators of [`crate::app::App`].

use std::path::{Path, PathBuf};

use common::SaveError;
use tracing::{info, warn};

/// Extension the file picker filters on.
pub const SAVE_EXTENSION: &str = "es3";

/// Asks the user which save file to open.
#[cfg_attr(test, mockall::automock)]
pub trait FileDialog {
    /// Returns `Ok(None)` when the user cancels.
    fn pick_save_file(&self) -> Result<Option<PathBuf>, SaveError>;
}

/// Reads the raw bytes of a chosen save file.
#[cfg_attr(test, mockall::automock)]
pub trait FileReader {
    fn read(&self, path: &Path) -> Result<Vec<u8>, SaveError>;
}

/// A [`FileDialog`] whose answer was decided up front, e.g. from `SAVE_PATH`.
#[derive(Debug, Clone, Default)]
pub struct PresetDialog {
    path: Option<PathBuf>,
}

impl PresetDialog {
    /// An empty path counts as a cancelled selection.
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path: path.filter(|p| !p.as_os_str().is_empty()),
        }
    }
}

impl FileDialog for PresetDialog {
    fn pick_save_file(&self) -> Result<Option<PathBuf>, SaveError> {
        let Some(path) = &self.path else {
            info!("no save file selected");
            return Ok(None);
        };
        if !has_save_extension(path) {
            warn!(
                path = %path.display(),
                "selected file does not have the .{SAVE_EXTENSION} extension"
            );
        }
        Ok(Some(path.clone()))
    }
}

fn has_save_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SAVE_EXTENSION))
}

/// Reads save files from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsReader;

impl FileReader for FsReader {
    fn read(&self, path: &Path) -> Result<Vec<u8>, SaveError> {
        std::fs::read(path).map_err(|source| SaveError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}
