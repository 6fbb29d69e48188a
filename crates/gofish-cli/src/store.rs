use gofish_core::GameError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// The save file on disk. The core only ever sees its text.
#[derive(Debug, Clone)]
pub struct SaveStore {
    path: PathBuf,
}

impl SaveStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<String, GameError> {
        fs::read_to_string(&self.path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => GameError::SaveNotFound {
                path: self.path.clone(),
            },
            _ => GameError::Io(err),
        })
    }

    /// Writes next to the target first so an interrupted write never leaves a
    /// truncated save behind.
    pub fn write(&self, text: &str) -> Result<(), GameError> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let staging = self.path.with_extension("tmp");
        fs::write(&staging, text)?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }
}
