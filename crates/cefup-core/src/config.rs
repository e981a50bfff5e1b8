//! Run configuration: the release descriptor and the workspace layout.
//!
//! Both are constructed once at startup and stay immutable for the whole
//! run; every pipeline stage receives them by reference.

use std::path::{Path, PathBuf};
use std::str::FromStr;

/// CMake build type for the CEF example target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildProfile {
    /// Optimized build (upstream default).
    #[default]
    Release,
    /// Debug build.
    Debug,
}

impl BuildProfile {
    /// The exact string CMake expects for `CMAKE_BUILD_TYPE` and the
    /// multi-config `--config` flag. Also names the output directory.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Release => "Release",
            Self::Debug => "Debug",
        }
    }
}

impl std::fmt::Display for BuildProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BuildProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "release" => Ok(Self::Release),
            "debug" => Ok(Self::Debug),
            _ => Err(format!("unknown build profile: {s} (expected Release or Debug)")),
        }
    }
}

/// Which upstream CEF build to fetch and how to rebrand it.
#[derive(Debug, Clone)]
pub struct ReleaseConfig {
    /// Full CEF version string, as listed on the Spotify CDN index.
    pub cef_version: String,
    /// Build type passed to CMake.
    pub profile: BuildProfile,
    /// Minimum CMake version CEF can be compiled with.
    pub cmake_min_version: String,
    /// URL the patched application opens by default.
    pub default_url: String,
    /// Product name replacing `cefsimple` in sources and build files.
    pub app_name: String,
    /// Base URL of the CEF binary CDN.
    pub cdn_base: String,
    /// Job count handed to the native build driver.
    pub jobs: usize,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            cef_version: "120.1.8+ge6b45b0+chromium-120.0.6099.109".to_string(),
            profile: BuildProfile::Release,
            cmake_min_version: "3.19".to_string(),
            default_url: "https://www.exaequos.com".to_string(),
            app_name: "ExaequOS".to_string(),
            cdn_base: "https://cef-builds.spotifycdn.com".to_string(),
            jobs: num_cpus::get(),
        }
    }
}

impl ReleaseConfig {
    /// Version string with `+` percent-encoded the way the CDN expects.
    pub fn url_version(&self) -> String {
        self.cef_version.replace('+', "%2B")
    }

    /// Archive file name for a platform suffix, e.g.
    /// `cef_binary_120.1.8%2Bge6b45b0%2Bchromium-120.0.6099.109_linux64.tar.bz2`.
    pub fn tarball_name(&self, suffix: &str) -> String {
        format!("cef_binary_{}_{}.tar.bz2", self.url_version(), suffix)
    }

    /// Full CDN URL of the archive for a platform suffix.
    pub fn tarball_url(&self, suffix: &str) -> String {
        format!("{}/{}", self.cdn_base, self.tarball_name(suffix))
    }
}

/// Fixed directory layout rooted at the invocation directory.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    cef_dir: PathBuf,
    patches_dir: PathBuf,
    delivery_dir: PathBuf,
}

impl Workspace {
    /// Build the layout under `root`. The delivery directory is named after
    /// the configured application.
    pub fn new(root: impl Into<PathBuf>, app_name: &str) -> Self {
        let root = root.into();
        Self {
            cef_dir: root.join("cef_binary"),
            patches_dir: root.join("patches"),
            delivery_dir: root.join(app_name),
            root,
        }
    }

    /// Invocation directory everything is rooted at.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the CEF distribution is extracted (`cef_binary/`).
    pub fn cef_dir(&self) -> &Path {
        &self.cef_dir
    }

    /// Out-of-tree patch files (`patches/`).
    pub fn patches_dir(&self) -> &Path {
        &self.patches_dir
    }

    /// Final output folder consumed by the downstream application.
    pub fn delivery_dir(&self) -> &Path {
        &self.delivery_dir
    }

    /// The CEF README inside the extracted tree, doubling as the installed
    /// version marker.
    pub fn version_marker(&self) -> PathBuf {
        self.cef_dir.join("README.txt")
    }
}
