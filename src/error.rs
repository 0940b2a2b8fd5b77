//! Error types for the meeting summarizer.
//!
//! The summarizing pipeline itself cannot fail. Everything here is raised
//! while loading a transcript or a configuration, or while validating the
//! heading handed to [`crate::Summarizer::new`].

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummarizerError {
    #[error("Transcript file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Transcript is not valid UTF-8: {path}")]
    InvalidUtf8 { path: PathBuf },

    #[error("Unable to read PDF {path}: {message}")]
    Pdf { path: PathBuf, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid heading date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Unable to compile matcher for theme {theme:?}: {source}")]
    Pattern {
        theme: String,
        #[source]
        source: regex::Error,
    },

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SummarizerError>;

impl SummarizerError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            std::io::ErrorKind::InvalidData => Self::InvalidUtf8 { path },
            _ => Self::Io { path, source },
        }
    }

    pub fn pdf(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::Pdf {
            path: path.into(),
            message: err.to_string(),
        }
    }
}
