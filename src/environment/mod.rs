//! Host environment detection.
//!
//! This module provides:
//! - [`Platform`] - the OS family used for search paths and instructions
//! - [`detect`] - cached auto-detection with the virtualization heuristic
//! - [`resolve_platform`] - per-call explicit override over detection

pub mod platform;

pub use platform::{detect, detect_with, resolve_platform, HostHint, Platform, PlatformDetection};
