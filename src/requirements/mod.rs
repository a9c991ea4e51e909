//! Requirement detection.
//!
//! This module decides whether each prerequisite for contributing to
//! WordPress (tools, repositories, plugins, an account) is present on
//! this machine.
//!
//! # Modules
//!
//! - [`registry`] - The fixed requirement table and typed probe kinds
//! - [`paths`] - Candidate directories for tool executables
//! - [`probe`] - Tool probe with version extraction
//! - [`context`] - Request-scoped inputs for probing
//! - [`checker`] - Override-aware, cached requirement checks
//! - [`overrides`] - Parsing and toggling per-evaluation overrides
//! - [`status`] - Probe results and checklist rows
//! - [`instructions`] - Platform-specific setup instructions

pub mod checker;
pub mod context;
pub mod instructions;
pub mod overrides;
pub mod paths;
pub mod probe;
pub mod registry;
pub mod status;

pub use checker::RequirementChecker;
pub use context::ProbeContext;
pub use overrides::{overrides_from_json, parse_override, parse_overrides, toggle, Overrides};
pub use probe::{extract_version, probe_tool, ToolReport};
pub use registry::{
    ProbeKind, Requirement, RequirementKey, RequirementRegistry, SearchHint, ToolSpec,
};
pub use status::{ProbeResult, RequirementReport};
