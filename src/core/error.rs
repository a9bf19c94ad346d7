//! Error handling for the stagehand scaffolding library.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. Every variant can be classified
//! with [`Error::kind`] so callers can tell a missing template apart from a
//! filesystem problem or a failed install command.
//!
//! # Examples
//!
//! ```
//! use stagehand::core::error::{Error, ErrorKind, Result};
//!
//! fn lookup(name: &str) -> Result<()> {
//!     Err(Error::template_not_found(name))
//! }
//!
//! let err = lookup("blog").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::TemplateNotFound);
//! ```

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for stagehand operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for stagehand operations
#[derive(Debug, Error)]
pub enum Error {
    /// No generator registered under the requested name
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// A template file is absent from every source path
    #[error("Template file not found: {path} (searched: {})", searched.join(", "))]
    TemplateFileNotFound { path: String, searched: Vec<String> },

    /// Filesystem failure on a specific path
    #[error("Filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Destination exists with different content
    #[error("Conflict: {} already exists with different content (use --force to overwrite)", path.display())]
    Conflict { path: PathBuf },

    /// External command exited unsuccessfully
    #[error("Command '{command}' failed with exit code {exit_code}: {stderr}")]
    Subprocess {
        command: String,
        exit_code: i32,
        stderr: String,
    },

    /// Template engine error
    #[error("Failed to render template '{template}': {source}")]
    Render {
        template: String,
        #[source]
        source: tera::Error,
    },

    /// Local template manifest could not be read
    #[error("Invalid template manifest {}: {message}", path.display())]
    Manifest { path: PathBuf, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    TemplateNotFound,
    Filesystem,
    Subprocess,
    Render,
    Config,
}

impl Error {
    /// Create a new registry lookup error
    pub fn template_not_found<S: Into<String>>(name: S) -> Self {
        Self::TemplateNotFound(name.into())
    }

    /// Wrap an I/O error with the path it occurred on
    pub fn filesystem(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Filesystem {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TemplateNotFound(_) | Self::TemplateFileNotFound { .. } => {
                ErrorKind::TemplateNotFound
            }
            Self::Filesystem { .. } | Self::Conflict { .. } | Self::Manifest { .. } => {
                ErrorKind::Filesystem
            }
            Self::Subprocess { .. } => ErrorKind::Subprocess,
            Self::Render { .. } => ErrorKind::Render,
            Self::Config(_) => ErrorKind::Config,
        }
    }
}
