//! cefup-core - ExaequOS CEF bootstrap pipeline
//!
//! Fetches a prebuilt Chromium Embedded Framework distribution for the host
//! platform, verifies it against its published SHA-1, unpacks it with the
//! version-qualified root folder flattened away, rebrands the bundled
//! `cefsimple` example, compiles it through CMake, and copies the resulting
//! artifacts into a delivery directory.
//!
//! # Architecture
//!
//! - **Immutable configuration**: a [`ReleaseConfig`] and a [`Workspace`] are
//!   built once and passed by reference to every stage.
//! - **Single platform resolution**: [`Platform::current()`] is detected once
//!   and consumed uniformly by the fetch, patch, build, and install stages.
//! - **Uniform failure**: every stage returns [`PipelineError`]; the error
//!   categories are distinguished in the type but all collapse to the same
//!   fatal exit code.
//!
//! # Directory layout (rooted at the invocation directory)
//!
//! ```text
//! ./
//! ├── cef_binary/   # extracted CEF distribution (build/ appears inside)
//! ├── patches/      # out-of-tree patch files (Windows CMakeLists override)
//! └── ExaequOS/     # delivery directory, wiped and recreated each run
//! ```

pub mod build;
pub mod config;
pub mod error;
pub mod fetch;
pub mod install;
pub mod io;
pub mod patch;
pub mod pipeline;
pub mod platform;
pub mod preflight;
pub mod reporter;

pub use config::{BuildProfile, ReleaseConfig, Workspace};
pub use error::{PipelineError, FATAL_EXIT_CODE};
pub use platform::{Arch, Os, Platform};
pub use reporter::{NullReporter, Reporter};

/// User agent string for CDN requests.
pub const USER_AGENT: &str = concat!("cefup/", env!("CARGO_PKG_VERSION"));
