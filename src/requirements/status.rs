//! Requirement check results.
//!
//! A check either finds the requirement or it doesn't. Failure to run a
//! tool, a timeout and an unreadable file all land on `Unavailable`; there
//! is no error path.

use std::path::PathBuf;

use serde::Serialize;

use super::registry::RequirementKey;

/// The result of checking a single requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProbeResult {
    /// Not found, not runnable, or timed out.
    Unavailable,

    /// Found. An override produces this variant with every field empty.
    Available {
        /// Human-readable description, e.g. "Git 2.43.0".
        detail: Option<String>,
        /// Extracted `major.minor.patch` version.
        version: Option<String>,
        /// Real path of the executable that answered.
        path: Option<PathBuf>,
    },
}

impl ProbeResult {
    /// An available result with only a detail string.
    pub fn available(detail: impl Into<String>) -> Self {
        ProbeResult::Available {
            detail: Some(detail.into()),
            version: None,
            path: None,
        }
    }

    /// The result an override forces: available, nothing measured.
    pub fn forced() -> Self {
        ProbeResult::Available {
            detail: None,
            version: None,
            path: None,
        }
    }

    /// Whether the requirement is available.
    pub fn is_available(&self) -> bool {
        matches!(self, ProbeResult::Available { .. })
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            ProbeResult::Available { detail, .. } => detail.as_deref(),
            ProbeResult::Unavailable => None,
        }
    }

    pub fn version(&self) -> Option<&str> {
        match self {
            ProbeResult::Available { version, .. } => version.as_deref(),
            ProbeResult::Unavailable => None,
        }
    }

    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            ProbeResult::Available { path, .. } => path.as_ref(),
            ProbeResult::Unavailable => None,
        }
    }
}

/// One row of the readiness checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequirementReport {
    pub key: RequirementKey,
    /// Display name, e.g. "Node.js".
    pub name: String,
    pub status: ProbeResult,
    pub version: Option<String>,
    /// How to satisfy the requirement on the active platform.
    pub instructions: String,
    /// Why contributors need it.
    pub rationale: String,
    /// Whether an override decided the status instead of a probe.
    pub overridden: bool,
}

impl RequirementReport {
    pub fn is_available(&self) -> bool {
        self.status.is_available()
    }
}
