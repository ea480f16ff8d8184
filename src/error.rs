//! @ai:module:intent Define error types for dataset analysis
//! @ai:module:layer domain
//! @ai:module:public_api Error, ErrorKind, Result
//! @ai:module:stateless true

use std::path::PathBuf;
use thiserror::Error;

/// @ai:intent Unified error type for all analysis operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read file {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {path}:{line}: {message}")]
    Parse {
        path: PathBuf,
        line: u64,
        message: String,
    },

    #[error("Table '{table}' has no column '{column}'")]
    MissingColumn { table: String, column: String },

    #[error("Category '{label}' is absent from the distribution")]
    MissingKey { label: String },

    #[error("Output directory does not exist: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("Failed to render {}", failures.join("; "))]
    Render { failures: Vec<String> },

    #[error("Invalid configuration {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// @ai:intent Coarse classification of an error, reported by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    FileAccess,
    Parse,
    MissingColumn,
    MissingKey,
    DirectoryNotFound,
    Render,
    Config,
    Io,
}

impl Error {
    /// @ai:intent Classify this error
    /// @ai:effects pure
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::FileAccess { .. } => ErrorKind::FileAccess,
            Error::Parse { .. } => ErrorKind::Parse,
            Error::MissingColumn { .. } => ErrorKind::MissingColumn,
            Error::MissingKey { .. } => ErrorKind::MissingKey,
            Error::DirectoryNotFound(_) => ErrorKind::DirectoryNotFound,
            Error::Render { .. } => ErrorKind::Render,
            Error::Config { .. } => ErrorKind::Config,
            Error::Io(_) | Error::Json(_) => ErrorKind::Io,
        }
    }
}

impl ErrorKind {
    /// @ai:intent Stable name for logs and console output
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::FileAccess => "file_access",
            ErrorKind::Parse => "parse",
            ErrorKind::MissingColumn => "missing_column",
            ErrorKind::MissingKey => "missing_key",
            ErrorKind::DirectoryNotFound => "directory_not_found",
            ErrorKind::Render => "render",
            ErrorKind::Config => "config",
            ErrorKind::Io => "io",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_lists_failures() {
        let err = Error::Render {
            failures: vec![
                "intent_analysis.png: font missing".to_string(),
                "dataset_overview.png: disk full".to_string(),
            ],
        };
        assert_eq!(
            err.to_string(),
            "Failed to render intent_analysis.png: font missing; dataset_overview.png: disk full"
        );
        assert_eq!(err.kind(), ErrorKind::Render);
    }

    #[test]
    fn test_json_errors_classify_as_io() {
        let source = serde_json::from_str::<u32>("nope").unwrap_err();
        assert_eq!(Error::from(source).kind(), ErrorKind::Io);
    }
}
