//! Error types for scene export and import.

use crate::scene::SceneError;
use thiserror::Error;

pub use crate::constants::MAX_SCENE_IMPORT_SIZE_MB;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Temp file could not replace the destination
    #[error("Failed to replace scene file: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("File too large: {size_mb}MB (max {max_mb}MB)")]
    TooLarge { size_mb: u64, max_mb: u64 },

    #[error("Missing header row")]
    EmptyFile,

    /// A row could not be interpreted; `line` is 1-based
    #[error("Line {line}: {message}")]
    InvalidRow { line: usize, message: String },

    #[error("Scene rejected object: {0}")]
    Scene(#[from] SceneError),
}

/// Result type alias for export operations
pub type ExportResult<T> = Result<T, ExportError>;
