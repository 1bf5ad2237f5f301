//! Error types for the build pipeline.
//!
//! Every failure is raised at the point of detection and propagates to the
//! orchestrator, which folds it into a [`BuildResult`](crate::bundler::BuildResult)
//! exit code: folder access problems map to 2, everything else to 1.

use std::path::PathBuf;
use thiserror::Error;

use crate::bundler::target::Target;

/// Result type alias for build pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failures raised by the build pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// A mandatory build parameter was not provided.
    #[error("missing required parameter: {name}")]
    MissingParameter {
        /// Parameter name
        name: &'static str,
    },

    /// The resource folder does not exist or cannot be listed.
    #[error("{} is not a readable folder", .path.display())]
    UnreadableFolder {
        /// Offending path
        path: PathBuf,
    },

    /// The output folder cannot be created or written to.
    #[error("{} is not a writeable folder", .path.display())]
    UnwriteableFolder {
        /// Offending path
        path: PathBuf,
    },

    /// A target name outside the supported set.
    #[error("unknown target: {0}")]
    UnknownTarget(String),

    /// An external tool is not installed in any of its known locations.
    #[error("no {tool} executable found for this platform")]
    ToolNotFound {
        /// Tool name
        tool: &'static str,
    },

    /// No scapp assembler binary exists for the requested target.
    #[error("no scapp assembler found for target {target}")]
    AssemblerNotFound {
        /// Target being built
        target: Target,
    },

    /// packfolder exited with a non-zero status.
    #[error("packfolder: failed to produce {}, status={status}", .datfile.display())]
    PackFailed {
        /// Archive that was being produced
        datfile: PathBuf,
        /// Raw exit status
        status: i32,
    },

    /// ImageMagick failed to produce the `.ico` file.
    #[error("failed to produce .ico file, magick exited with status {status}")]
    IcoFailed {
        /// Raw exit status
        status: i32,
    },

    /// The iconset-to-icns conversion chain failed.
    #[error("failed to produce icon.icns, tool exited with status {status}")]
    IcnsFailed {
        /// Raw exit status
        status: i32,
    },

    /// The rasterized logo could not be loaded back for downscaling.
    #[error("cannot load rasterized logo {}: {source}", .path.display())]
    IconMaster {
        /// Master PNG path
        path: PathBuf,
        /// Decoder error
        source: image::ImageError,
    },

    /// The assembler reported a negative status for a target.
    #[error("{target}: assemble failed ({status})")]
    Assembly {
        /// Target being built
        target: Target,
        /// Signed assembler status
        status: i32,
    },

    /// An empty argument vector was handed to the process runner.
    #[error("cannot run an empty command line")]
    EmptyCommand,

    /// A child process could not be started.
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        /// Program that failed to start
        program: String,
        /// Underlying OS error
        source: std::io::Error,
    },

    /// A directory in the output layout could not be created.
    #[error("cannot create directory {}: {source}", .path.display())]
    CreateDir {
        /// Directory that failed
        path: PathBuf,
        /// Underlying OS error
        source: std::io::Error,
    },

    /// Manifest template rendering errors
    #[error("template error: {0}")]
    Template(#[from] handlebars::RenderError),

    /// Icon encoding/decoding errors
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
