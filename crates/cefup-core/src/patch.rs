//! Literal-substring rebranding patches for the cefsimple sources.
//!
//! Replaces the hardcoded default URL, the `--url` switch handling, and the
//! `cefsimple` product name with the configured values. Matches are exact,
//! case-sensitive substrings; a file that no longer contains a needle is
//! silently left as-is (upstream version bumps must be monitored by hand).

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::{ReleaseConfig, Workspace};
use crate::error::PipelineError;
use crate::platform::{Os, Platform};
use crate::reporter::Reporter;

/// A single (file, needle, replacement) rewrite. The file path is relative
/// to the extracted CEF tree.
#[derive(Debug, Clone)]
pub struct Patch {
    /// Target file, relative to `cef_binary/`.
    pub file: PathBuf,
    /// Exact substring to replace.
    pub needle: String,
    /// Replacement text.
    pub replacement: String,
}

impl Patch {
    fn new(file: &str, needle: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            file: PathBuf::from(file),
            needle: needle.into(),
            replacement: replacement.into(),
        }
    }
}

/// The fixed patch list for a release configuration: rebrand
/// `simple_app.cc` and the cefsimple `CMakeLists.txt`.
pub fn patch_set(config: &ReleaseConfig) -> Vec<Patch> {
    let url = &config.default_url;
    let app = &config.app_name;
    vec![
        Patch::new(
            "tests/cefsimple/simple_app.cc",
            "url = command_line->GetSwitchValue(\"url\");",
            format!("url = \"{url}\";"),
        ),
        Patch::new("tests/cefsimple/simple_app.cc", "http://www.google.com", url),
        Patch::new(
            "tests/cefsimple/simple_app.cc",
            "\"cefsimple\"",
            format!("\"{app}\""),
        ),
        Patch::new(
            "tests/cefsimple/CMakeLists.txt",
            "\"cefsimple",
            format!("\"{app}"),
        ),
    ]
}

/// Rewrite `path` line by line, replacing every occurrence of `needle` with
/// `replacement` through a temp-file swap that preserves the original
/// permissions. A file without the needle stays byte-identical.
pub fn replace_in_file(path: &Path, needle: &str, replacement: &str) -> io::Result<()> {
    let contents = fs::read_to_string(path)?;
    let perms = fs::metadata(path)?.permissions();

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    for line in contents.split_inclusive('\n') {
        tmp.write_all(line.replace(needle, replacement).as_bytes())?;
    }
    tmp.flush()?;

    // Same directory, so persist is an atomic rename.
    tmp.persist(path).map_err(|e| e.error)?;
    fs::set_permissions(path, perms)?;
    Ok(())
}

/// Apply the rebranding patches to the extracted tree, if present.
///
/// On Windows the top-level `CMakeLists.txt` is first replaced wholesale by
/// the wrapper build file shipped under `patches/`.
pub fn apply<R: Reporter + ?Sized>(
    config: &ReleaseConfig,
    workspace: &Workspace,
    platform: Platform,
    reporter: &R,
) -> Result<(), PipelineError> {
    let cef_dir = workspace.cef_dir();
    if !cef_dir.is_dir() {
        return Ok(());
    }

    reporter.info("Patching Chromium Embedded Framework");

    if platform.os == Os::Windows {
        let wrapper = workspace
            .patches_dir()
            .join("CEF")
            .join("win")
            .join("libcef_dll_wrapper_cmake");
        fs::copy(&wrapper, cef_dir.join("CMakeLists.txt"))?;
    }

    for patch in patch_set(config) {
        let target = cef_dir.join(&patch.file);
        tracing::debug!(file = %target.display(), needle = %patch.needle, "patching");
        replace_in_file(&target, &patch.needle, &patch.replacement)?;
    }

    Ok(())
}
