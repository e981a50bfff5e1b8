//! Pipeline error taxonomy.
//!
//! The categories below are distinguished in the type even though every
//! failure is fatal today and maps to the same exit code. This keeps room
//! for differentiated handling later without changing observable behavior.

use std::path::PathBuf;

use thiserror::Error;

/// Uniform process exit code for any fatal condition.
pub const FATAL_EXIT_CODE: i32 = 2;

/// Any error a pipeline stage can surface. All variants abort the run.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Required tool missing, below minimum version, or unsupported host.
    #[error("{0}")]
    Environment(String),

    /// Downloaded archive does not match its published checksum.
    #[error(
        "downloaded {archive} does not match the expected SHA1 \
         (expected {expected}, got {actual}); please retry"
    )]
    Verification {
        /// Archive file name as downloaded.
        archive: String,
        /// Checksum published in the sidecar file.
        expected: String,
        /// Checksum computed over the downloaded bytes.
        actual: String,
    },

    /// External configure or build subprocess returned non-zero.
    #[error("{0}")]
    Build(String),

    /// Delivery path exists and is neither a symlink nor a removable
    /// directory.
    #[error("please remove {} manually and re-run cefup", .0.display())]
    Filesystem(PathBuf),

    /// IO error from any stage.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error while talking to the CDN.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl PipelineError {
    /// All failure classes collapse to the same fatal exit code.
    pub fn exit_code(&self) -> i32 {
        FATAL_EXIT_CODE
    }
}
