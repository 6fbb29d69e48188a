use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures raised inside the engine. None of them escape the command surface:
/// `GameEngine` recovers each one locally and logs it.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("deck exhausted: all 52 cards have been dealt")]
    DeckExhausted,
    #[error("malformed save at line {line}: {reason}")]
    MalformedSave { line: usize, reason: String },
    #[error("no saved game at {}", path.display())]
    SaveNotFound { path: PathBuf },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl GameError {
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        GameError::MalformedSave {
            line,
            reason: reason.into(),
        }
    }
}
