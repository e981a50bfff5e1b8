//! CMake configure and native build driver invocation.
//!
//! Prefers the Ninja generator when `ninja` is on the PATH, falling back to
//! Unix Makefiles. On Windows CEF is configured in-tree with the dynamic
//! runtime and driven through `cmake --build`.

use std::fs;
use std::path::Path;
use std::process::Command;

use crate::config::{ReleaseConfig, Workspace};
use crate::error::PipelineError;
use crate::platform::{Os, Platform};
use crate::reporter::Reporter;

/// Run a subprocess and turn any non-zero exit into a build error.
fn run_checked(cmd: &mut Command, what: &str) -> Result<(), PipelineError> {
    tracing::debug!(?cmd, "running");
    let status = cmd.status()?;
    if !status.success() {
        return Err(PipelineError::Build(format!("{what} exited with {status}")));
    }
    Ok(())
}

/// Compile the patched cefsimple example with the configured profile.
///
/// # Errors
///
/// Any non-zero exit from configuration or the build driver aborts the
/// pipeline; there is no partial-success handling.
pub fn compile_cef<R: Reporter + ?Sized>(
    config: &ReleaseConfig,
    workspace: &Workspace,
    platform: Platform,
    reporter: &R,
) -> Result<(), PipelineError> {
    let cef_dir = workspace.cef_dir();
    if !cef_dir.is_dir() {
        return Ok(());
    }

    reporter.info(&format!(
        "Compiling Chromium Embedded Framework in {} mode (inside {}) ...",
        config.profile,
        cef_dir.display()
    ));

    let build_type = format!("-DCMAKE_BUILD_TYPE={}", config.profile);
    let jobs_flag = format!("-j{}", config.jobs);

    if platform.os == Os::Windows {
        // CEF defaults to the static runtime; the wrapper needs /MD.
        run_checked(
            Command::new("cmake")
                .args(["-DCEF_RUNTIME_LIBRARY_FLAG=/MD", &build_type, "."])
                .current_dir(cef_dir),
            "cmake configure",
        )?;
        run_checked(
            Command::new("cmake")
                .args(["--build", ".", "--config", config.profile.as_str()])
                .current_dir(cef_dir),
            "cmake --build",
        )?;
    } else {
        let build_dir = cef_dir.join("build");
        fs::create_dir_all(&build_dir)?;

        if which::which("ninja").is_ok() {
            configure(&build_dir, "Ninja", &build_type)?;
            run_checked(
                Command::new("ninja")
                    .args(["-v", &jobs_flag, &config.app_name])
                    .current_dir(&build_dir),
                "ninja",
            )?;
        } else {
            configure(&build_dir, "Unix Makefiles", &build_type)?;
            run_checked(
                Command::new("make")
                    .args([&config.app_name, &jobs_flag])
                    .current_dir(&build_dir),
                "make",
            )?;
        }
    }

    Ok(())
}

fn configure(build_dir: &Path, generator: &str, build_type: &str) -> Result<(), PipelineError> {
    run_checked(
        Command::new("cmake")
            .args(["-G", generator, build_type, ".."])
            .current_dir(build_dir),
        "cmake configure",
    )
}
