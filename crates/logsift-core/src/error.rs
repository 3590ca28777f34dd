//! Error types.
//!
//! Only two things can fail: opening or reading a source file, and writing an
//! export. Malformed lines are never errors; the classifier always degrades to
//! a best-effort entry.

use std::path::PathBuf;

/// A log source could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("log file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("permission denied reading file: {}", path.display())]
    PermissionDenied { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    /// Classify an I/O error raised while opening or reading `path`.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::Io { path, source },
        }
    }
}

/// Writing an export failed. Partial output may remain on disk.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("export I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),
}
