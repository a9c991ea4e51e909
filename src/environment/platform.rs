//! Host platform detection.
//!
//! The OS family decides which install directories we search and which
//! instructions we show. The compile-time OS is not always the right
//! answer: a Linux container on a Mac, or WSL on Windows, should see the
//! host's instructions. A `uname -a` probe catches those cases.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::ReadinessError;
use crate::shell::{CommandRunner, SystemRunner};

/// Platform for search paths and instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Windows,
    #[serde(rename = "macOS")]
    MacOS,
    Linux,
}

impl Platform {
    /// All platforms, in display order.
    pub const ALL: [Platform; 3] = [Platform::Windows, Platform::MacOS, Platform::Linux];

    /// Human-readable label ("Windows", "macOS", "Linux").
    pub fn label(&self) -> &'static str {
        match self {
            Platform::Windows => "Windows",
            Platform::MacOS => "macOS",
            Platform::Linux => "Linux",
        }
    }

    /// The OS family this binary was built for, without the `uname` remap.
    ///
    /// Search directories have to exist on the machine running the probe,
    /// so they follow this rather than the platform used for instructions.
    pub fn host() -> Platform {
        match std::env::consts::OS {
            "windows" => Platform::Windows,
            "macos" => Platform::MacOS,
            _ => Platform::Linux,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Platform {
    type Err = ReadinessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "windows" | "win" => Ok(Platform::Windows),
            "macos" | "mac" | "darwin" | "osx" => Ok(Platform::MacOS),
            "linux" => Ok(Platform::Linux),
            _ => Err(ReadinessError::InvalidPlatform {
                value: s.to_string(),
            }),
        }
    }
}

/// Why detection moved away from the compile-time OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HostHint {
    /// Linux kernel reporting a Darwin host (container on a Mac).
    DarwinHost,
    /// Linux running under Windows (WSL).
    WindowsSubsystem,
}

/// Result of platform detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlatformDetection {
    /// The platform to use.
    pub platform: Platform,
    /// Set when the platform was remapped from Linux by the `uname` probe.
    pub host_hint: Option<HostHint>,
}

static DETECTED: OnceLock<PlatformDetection> = OnceLock::new();

/// Detect the host platform, once per process.
pub fn detect() -> PlatformDetection {
    *DETECTED.get_or_init(|| detect_with(std::env::consts::OS, &SystemRunner::default()))
}

/// Detect the platform from an OS identifier and a runner for `uname`.
///
/// A failing `uname` is not an error; detection falls through to Linux.
pub fn detect_with(os_identifier: &str, runner: &dyn CommandRunner) -> PlatformDetection {
    let os = os_identifier.to_lowercase();

    if os.starts_with("win") {
        return PlatformDetection {
            platform: Platform::Windows,
            host_hint: None,
        };
    }
    if os.contains("darwin") || os.contains("macos") {
        return PlatformDetection {
            platform: Platform::MacOS,
            host_hint: None,
        };
    }

    let uname = runner
        .run(Path::new("uname"), &["-a"], None)
        .filter(|out| out.success)
        .map(|out| out.combined().to_lowercase())
        .unwrap_or_default();

    if uname.contains("darwin") {
        PlatformDetection {
            platform: Platform::MacOS,
            host_hint: Some(HostHint::DarwinHost),
        }
    } else if uname.contains("microsoft") || uname.contains("wsl") {
        PlatformDetection {
            platform: Platform::Windows,
            host_hint: Some(HostHint::WindowsSubsystem),
        }
    } else {
        PlatformDetection {
            platform: Platform::Linux,
            host_hint: None,
        }
    }
}

/// Use the caller's platform when given, otherwise the detected one.
///
/// The explicit value only applies to the call it is passed to; nothing
/// is remembered.
pub fn resolve_platform(explicit: Option<Platform>) -> Platform {
    explicit.unwrap_or_else(|| detect().platform)
}
