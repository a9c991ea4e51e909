//! WordPress installation inspection.
//!
//! Reads the installation on disk: whether it is a development checkout,
//! which plugins and themes are under version control, and what their
//! headers say. Nothing here writes to the installation.

pub mod checkout;
pub mod extensions;
pub mod headers;
pub mod layout;

pub use checkout::{
    find_git_repository, git_remote_origin, is_development_checkout, is_wordpress_develop_remote,
};
pub use extensions::{
    active_plugin, enumerate_git_tracked_extensions, find_plugin_file, plugin_info,
    ExtensionKind, GitRepoEntry, PluginInfo,
};
pub use layout::Installation;
