//! Environment and path checks that run before any download.

use std::fs;
use std::path::Path;
use std::process::Command;

use semver::Version;

use crate::config::{ReleaseConfig, Workspace};
use crate::error::PipelineError;
use crate::platform::{Os, Platform};
use crate::reporter::Reporter;

/// Remediation pointer shown when CMake is missing or too old.
const CMAKE_DOC_URL: &str =
    "https://github.com/stigmee/doc-internal/blob/master/doc/install_latest_cmake.sh";

/// MSVC remediation hint for every compiler smoke-test failure.
const MSVC_REMEDY: &str = "Install https://visualstudio.microsoft.com and open an \
     x64 Native Tools Command Prompt for VS 2022, with Administrator privilege";

/// Clear the delivery path so a stale build never ships.
///
/// Symlinks and directories are removed; anything else existing there is a
/// filesystem conflict the operator must resolve by hand.
pub fn check_delivery_path(delivery: &Path) -> Result<(), PipelineError> {
    let Ok(meta) = fs::symlink_metadata(delivery) else {
        return Ok(());
    };

    if meta.file_type().is_symlink() {
        fs::remove_file(delivery)?;
    } else if meta.is_dir() {
        fs::remove_dir_all(delivery)?;
    } else {
        return Err(PipelineError::Filesystem(delivery.to_path_buf()));
    }
    Ok(())
}

/// Check that CMake is on the PATH and at least the configured minimum
/// version.
pub fn check_cmake<R: Reporter + ?Sized>(
    config: &ReleaseConfig,
    reporter: &R,
) -> Result<(), PipelineError> {
    reporter.info("Checking cmake version ...");

    if which::which("cmake").is_err() {
        return Err(PipelineError::Environment(format!(
            "cmake is not installed. For Linux see {CMAKE_DOC_URL} to install it \
             before re-running cefup. For Windows install the latest exe."
        )));
    }

    let output = Command::new("cmake").arg("--version").output()?;
    let text = String::from_utf8_lossy(&output.stdout);
    let current = parse_cmake_version(&text).ok_or_else(|| {
        PipelineError::Environment(format!(
            "could not parse the version out of `cmake --version` output: {text:?}"
        ))
    })?;
    let minimum = lenient_version(&config.cmake_min_version).ok_or_else(|| {
        PipelineError::Environment(format!(
            "invalid minimum cmake version configured: {}",
            config.cmake_min_version
        ))
    })?;

    if current < minimum {
        return Err(PipelineError::Environment(format!(
            "your cmake version is {current} but shall be >= {minimum}; \
             see {CMAKE_DOC_URL} to update it before re-running cefup"
        )));
    }
    Ok(())
}

/// Extract the version from `cmake --version` output, whose first line
/// reads `cmake version X.Y.Z`.
fn parse_cmake_version(output: &str) -> Option<Version> {
    let first = output.lines().next()?;
    let token = first.split_whitespace().nth(2)?;
    lenient_version(token)
}

/// Parse a possibly partial version token. CMake minimums are often
/// two-segment ("3.19") and distro builds append suffixes ("3.28.1-dirty"),
/// so only the leading numeric segments are considered.
fn lenient_version(token: &str) -> Option<Version> {
    let core: String = token
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let mut parts = core.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    let patch = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    Some(Version::new(major, minor, patch))
}

/// Compile-and-run smoke test of the MSVC toolchain. No-op elsewhere.
///
/// Writes a scratch `win.cc` under the workspace root, compiles it with
/// `cl.exe`, and runs the produced binary. Scratch files are removed on
/// every path, success or failure.
pub fn check_compiler<R: Reporter + ?Sized>(
    workspace: &Workspace,
    platform: Platform,
    reporter: &R,
) -> Result<(), PipelineError> {
    if platform.os != Os::Windows {
        return Ok(());
    }

    let src = workspace.root().join("win.cc");
    let bin = workspace.root().join("win.exe");
    let obj = workspace.root().join("win.obj");

    fs::write(
        &src,
        "#include <windows.h>\nint main(int argc, char **argv) { return 0; }\n",
    )?;

    let compiled = Command::new("cl.exe")
        .arg(format!("/Fe:{}", bin.display()))
        .arg(&src)
        .status();
    if !matches!(&compiled, Ok(status) if status.success()) {
        fs::remove_file(&src).ok();
        return Err(PipelineError::Environment(format!(
            "MS C++ compiler is not found. {MSVC_REMEDY}"
        )));
    }

    if !bin.is_file() {
        fs::remove_file(&src).ok();
        return Err(PipelineError::Environment(format!(
            "MS C++ compiler is not working. {MSVC_REMEDY}"
        )));
    }

    let ran = Command::new(&bin).status();
    if !matches!(&ran, Ok(status) if status.success()) {
        fs::remove_file(&src).ok();
        return Err(PipelineError::Environment(format!(
            "MS C++ compiler could not compile a test program. {MSVC_REMEDY}"
        )));
    }

    reporter.info("MS C++ Compiler OK");
    fs::remove_file(&src).ok();
    fs::remove_file(&bin).ok();
    fs::remove_file(&obj).ok();
    Ok(())
}
