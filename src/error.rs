//! Top-level error types.
//!
//! The CLI layer wraps everything in [`BundlerError`]; the build pipeline
//! has its own taxonomy in [`crate::bundler::error`].

use thiserror::Error;

/// Result type alias for CLI-level operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for the CLI layer
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument and resolution errors
    #[error("{0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON errors from settings and config files
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Build pipeline errors
    #[error("{0}")]
    Build(#[from] crate::bundler::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Missing required argument
    #[error("Missing required argument: {argument}")]
    MissingArgument {
        /// Argument name
        argument: String,
    },

    /// No saved project matched the selector
    #[error("Project not found in settings: {selector}")]
    ProjectNotFound {
        /// The id or name that was looked up
        selector: String,
    },

    /// A config file could not be read
    #[error("Cannot read {path}: {reason}")]
    ConfigRead {
        /// Config file path
        path: String,
        /// Reason for the error
        reason: String,
    },
}
