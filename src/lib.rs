//! wpready - WordPress contribution readiness checks.
//!
//! wpready looks at a developer's machine and a local WordPress
//! installation and reports which kinds of contribution are possible
//! right now: which tools are installed, whether the site is a core
//! development checkout, whether Gutenberg is active and which plugins
//! and themes are git checkouts.
//!
//! # Modules
//!
//! - [`account`] - WordPress.org account verification
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - `wpready.yml` loading
//! - [`environment`] - Platform detection
//! - [`error`] - Error types and result aliases
//! - [`install`] - WordPress installation layout and file inspection
//! - [`readiness`] - The entry point for running checks
//! - [`requirements`] - Requirement registry, probes and overrides
//! - [`shell`] - Subprocess execution and shell config scanning
//! - [`stages`] - Contribution stages and their evaluation
//! - [`state`] - Saved user settings
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use wpready::requirements::{parse_overrides, RequirementKey};
//!
//! let overrides = parse_overrides(["git=true,npm=false"]).unwrap();
//! assert_eq!(overrides.get(&RequirementKey::Npm), Some(&false));
//! ```
//!
//! For probing a real installation, see [`readiness::Readiness`].

pub mod account;
pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod install;
pub mod readiness;
pub mod requirements;
pub mod shell;
pub mod stages;
pub mod state;
pub mod ui;

pub use error::{ReadinessError, Result};
