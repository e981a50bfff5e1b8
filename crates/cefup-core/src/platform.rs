//! Host platform detection.
//!
//! The platform is resolved once at startup and consumed uniformly by the
//! fetch, patch, build, and install stages.

use crate::error::PipelineError;

/// Operating system family CEF ships binaries for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
    /// Linux distributions.
    Linux,
    /// macOS.
    MacOs,
    /// Windows.
    Windows,
}

impl Os {
    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linux => "Linux",
            Self::MacOs => "Darwin",
            Self::Windows => "Windows",
        }
    }
}

impl std::fmt::Display for Os {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// CPU architecture of the host.
///
/// CEF only publishes x86-64 and ARM builds, so everything that is not
/// x86-64 selects the ARM artifact for its OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    /// `x86_64` / AMD64.
    X86_64,
    /// ARM (aarch64 and 32-bit arm alike).
    Arm,
}

/// Detected OS and architecture combination, used to select the download
/// suffix and the artifact copy layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform {
    /// Operating system family.
    pub os: Os,
    /// CPU architecture.
    pub arch: Arch,
}

impl Platform {
    /// Detect the host platform.
    ///
    /// # Errors
    ///
    /// Hosts CEF does not publish binaries for are an environment error.
    pub fn current() -> Result<Self, PipelineError> {
        let os = match std::env::consts::OS {
            "linux" => Os::Linux,
            "macos" => Os::MacOs,
            "windows" => Os::Windows,
            other => {
                return Err(PipelineError::Environment(format!(
                    "unknown OS {other}: cannot download Chromium Embedded Framework"
                )));
            }
        };
        let arch = match std::env::consts::ARCH {
            "x86_64" => Arch::X86_64,
            _ => Arch::Arm,
        };
        Ok(Self { os, arch })
    }

    /// CDN artifact suffix for this platform, e.g. `linux64` or
    /// `macosarm64`.
    pub fn cef_suffix(&self) -> &'static str {
        match (self.os, self.arch) {
            (Os::Linux, Arch::X86_64) => "linux64",
            (Os::Linux, Arch::Arm) => "linuxarm",
            (Os::MacOs, Arch::X86_64) => "macosx64",
            (Os::MacOs, Arch::Arm) => "macosarm64",
            (Os::Windows, Arch::X86_64) => "windows64",
            (Os::Windows, Arch::Arm) => "windowsarm64",
        }
    }
}
