//! Reporter trait for dependency injection.
//!
//! Lets the pipeline stages report progress and status without being
//! coupled to a specific console implementation.

use std::path::Path;

/// Progress and status sink implemented by the CLI console.
pub trait Reporter: Send + Sync {
    /// Log an informational stage message.
    fn info(&self, msg: &str);

    /// Log the final success message.
    fn success(&self, msg: &str);

    /// Updates the progress of a file download.
    fn downloading(&self, file: &str, current: u64, total: Option<u64>);

    /// A file was copied into the delivery directory.
    fn copied(&self, src: &Path, dest: &Path);
}

/// A no-op reporter for silent operations and tests.
#[derive(Debug, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn info(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn downloading(&self, _: &str, _: u64, _: Option<u64>) {}
    fn copied(&self, _: &Path, _: &Path) {}
}
