//! Configuration loading and parsing.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use wpready::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join("wpready.yml"), "active_theme: twentytwentyfour").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.active_theme.as_deref(), Some("twentytwentyfour"));
//! ```
//!
//! # Configuration File Locations
//!
//! Looked up under the installation root, first match wins:
//! 1. `wpready.yml`
//! 2. `.wpready/config.yml`

pub mod loader;
pub mod schema;

pub use loader::{discover_config, load_config, load_config_file, parse_config, CONFIG_CANDIDATES};
pub use schema::ReadinessConfig;
