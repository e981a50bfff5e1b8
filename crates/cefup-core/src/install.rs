//! Copies compiled artifacts into the delivery directory.
//!
//! Each platform branch is a fixed, hand-enumerated list of explicit file
//! names and glob patterns; additions to upstream's output set require
//! updating this list.

use std::fs;
use std::io;
use std::path::Path;

use crate::config::{ReleaseConfig, Workspace};
use crate::error::PipelineError;
use crate::io::fsops::copy_into;
use crate::platform::{Os, Platform};
use crate::reporter::Reporter;

/// Copy one named file into `dest`, reporting the copy.
fn copy_file<R: Reporter + ?Sized>(
    src: &Path,
    dest: &Path,
    reporter: &R,
) -> Result<(), PipelineError> {
    let copied = copy_into(src, dest)?;
    reporter.copied(src, &copied);
    Ok(())
}

/// Copy every file matching `pattern` inside `src_dir` into `dest`.
fn copy_matching<R: Reporter + ?Sized>(
    src_dir: &Path,
    pattern: &str,
    dest: &Path,
    reporter: &R,
) -> Result<(), PipelineError> {
    let full_pattern = src_dir.join(pattern).to_string_lossy().into_owned();
    let paths = glob::glob(&full_pattern)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    for entry in paths {
        let path = entry.map_err(glob::GlobError::into_error)?;
        copy_file(&path, dest, reporter)?;
    }
    Ok(())
}

/// Copy the build outputs needed at runtime into the delivery directory,
/// preserving permission bits.
pub fn install_artifacts<R: Reporter + ?Sized>(
    config: &ReleaseConfig,
    workspace: &Workspace,
    platform: Platform,
    reporter: &R,
) -> Result<(), PipelineError> {
    let delivery = workspace.delivery_dir();
    let locales = delivery.join("locales");
    fs::create_dir_all(&locales)?;

    reporter.info(&format!(
        "Installing Chromium Embedded Framework to {} ...",
        delivery.display()
    ));

    match platform.os {
        Os::Linux | Os::MacOs => {
            let out = workspace
                .cef_dir()
                .join("build")
                .join("tests")
                .join("cefsimple")
                .join(config.profile.as_str());

            copy_file(&out.join("v8_context_snapshot.bin"), delivery, reporter)?;
            copy_file(&out.join("icudtl.dat"), delivery, reporter)?;
            copy_file(&out.join(&config.app_name), delivery, reporter)?;
            copy_matching(&out, "*.pak", delivery, reporter)?;
            copy_matching(&out.join("locales"), "*", &locales, reporter)?;
            copy_matching(&out, "*.so", delivery, reporter)?;
            copy_matching(&out, "*.so.*", delivery, reporter)?;
        }
        Os::Windows => {
            let out = workspace.cef_dir().join(config.profile.as_str());
            copy_file(&out.join("v8_context_snapshot.bin"), delivery, reporter)?;
            copy_file(
                &out.join(format!("{}.exe", config.app_name)),
                delivery,
                reporter,
            )?;
            copy_matching(&out, "*.dll", delivery, reporter)?;

            let resources = workspace.cef_dir().join("Resources");
            copy_file(&resources.join("icudtl.dat"), delivery, reporter)?;
            copy_matching(&resources, "*.pak", delivery, reporter)?;
            copy_matching(&resources.join("locales"), "*", &locales, reporter)?;
        }
    }

    Ok(())
}
