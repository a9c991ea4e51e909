//! Requirement registry and definitions.
//!
//! Every requirement the readiness checks know about lives in one fixed
//! table. Each entry names its probe as a [`ProbeKind`] variant, so
//! dispatch is a `match` rather than a lookup by name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::environment::Platform;
use crate::error::ReadinessError;

use super::instructions;

/// Identifier of a requirement.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RequirementKey {
    Git,
    Node,
    Npm,
    Composer,
    #[serde(rename = "repo")]
    GitRepository,
    WpRepo,
    Gutenberg,
    GitExtensions,
    WporgAccount,
}

impl RequirementKey {
    /// All keys, in checklist order.
    pub const ALL: [RequirementKey; 9] = [
        RequirementKey::Git,
        RequirementKey::Node,
        RequirementKey::Npm,
        RequirementKey::Composer,
        RequirementKey::GitRepository,
        RequirementKey::WpRepo,
        RequirementKey::Gutenberg,
        RequirementKey::GitExtensions,
        RequirementKey::WporgAccount,
    ];

    /// The external key string.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequirementKey::Git => "git",
            RequirementKey::Node => "node",
            RequirementKey::Npm => "npm",
            RequirementKey::Composer => "composer",
            RequirementKey::GitRepository => "repo",
            RequirementKey::WpRepo => "wp_repo",
            RequirementKey::Gutenberg => "gutenberg",
            RequirementKey::GitExtensions => "git_extensions",
            RequirementKey::WporgAccount => "wporg_account",
        }
    }
}

impl fmt::Display for RequirementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequirementKey {
    type Err = ReadinessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        RequirementKey::ALL
            .into_iter()
            .find(|k| k.as_str() == wanted)
            .ok_or_else(|| ReadinessError::UnknownRequirement {
                key: s.to_string(),
            })
    }
}

/// Search directories a tool needs beyond the common set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchHint {
    Standard,
    /// Also search nvm-managed Node versions.
    NodeVersionManager,
    /// Also search Composer's global `vendor/bin`.
    ComposerGlobal,
}

/// An external command-line tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSpec {
    /// Binary name, e.g. "git".
    pub command: &'static str,
    /// Arguments that print the version.
    pub version_args: &'static [&'static str],
    pub search: SearchHint,
}

/// How a requirement is checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeKind {
    /// Run a tool and read its version.
    Tool(ToolSpec),
    /// A `.git` entry at the installation root or above.
    GitRepository,
    /// An unbuilt WordPress development checkout.
    DevelopmentCheckout,
    /// A plugin present on disk and enabled, as `folder/file.php`.
    ActivePlugin { file: &'static str },
    /// At least one plugin or theme under version control.
    GitTrackedExtensions,
    /// A WordPress.org username has been saved.
    Account,
}

/// A requirement definition.
pub struct Requirement {
    pub key: RequirementKey,
    /// Display name (e.g., "Node.js")
    pub display_name: &'static str,
    pub description: &'static str,
    /// Documentation link, when one exists.
    pub reference: Option<&'static str>,
    pub probe: ProbeKind,
    /// Platform-specific install or setup instructions.
    pub instructions: fn(Platform) -> String,
    /// Why contributors need this.
    pub rationale: &'static str,
}

impl fmt::Debug for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Requirement")
            .field("key", &self.key)
            .field("display_name", &self.display_name)
            .field("probe", &self.probe)
            .finish_non_exhaustive()
    }
}

/// Registry of all known requirements.
#[derive(Debug)]
pub struct RequirementRegistry {
    requirements: Vec<Requirement>,
}

impl RequirementRegistry {
    /// Create the registry with every built-in requirement.
    pub fn new() -> Self {
        let requirements = vec![
            Requirement {
                key: RequirementKey::Git,
                display_name: "Git",
                description: "Version control used to fetch and track WordPress source code.",
                reference: Some("https://git-scm.com/"),
                probe: ProbeKind::Tool(ToolSpec {
                    command: "git",
                    version_args: &["--version"],
                    search: SearchHint::Standard,
                }),
                instructions: instructions::git,
                rationale: "Core and Gutenberg are developed in Git repositories; patches and pull requests start from a clone.",
            },
            Requirement {
                key: RequirementKey::Node,
                display_name: "Node.js",
                description: "JavaScript runtime used by the build tooling.",
                reference: Some("https://nodejs.org/"),
                probe: ProbeKind::Tool(ToolSpec {
                    command: "node",
                    version_args: &["--version"],
                    search: SearchHint::NodeVersionManager,
                }),
                instructions: instructions::node,
                rationale: "Core assets and the block editor are built with Node.js scripts.",
            },
            Requirement {
                key: RequirementKey::Npm,
                display_name: "npm",
                description: "Package manager that installs build dependencies.",
                reference: Some("https://docs.npmjs.com/"),
                probe: ProbeKind::Tool(ToolSpec {
                    command: "npm",
                    version_args: &["--version"],
                    search: SearchHint::NodeVersionManager,
                }),
                instructions: instructions::npm,
                rationale: "npm installs the JavaScript packages and runs the build and test scripts.",
            },
            Requirement {
                key: RequirementKey::Composer,
                display_name: "Composer",
                description: "PHP dependency manager.",
                reference: Some("https://getcomposer.org/"),
                probe: ProbeKind::Tool(ToolSpec {
                    command: "composer",
                    version_args: &["--version"],
                    search: SearchHint::ComposerGlobal,
                }),
                instructions: instructions::composer,
                rationale: "Composer installs PHPUnit and the coding-standards tools used to test and lint PHP changes.",
            },
            Requirement {
                key: RequirementKey::GitRepository,
                display_name: "Git Repository",
                description: "This site lives inside a Git repository.",
                reference: None,
                probe: ProbeKind::GitRepository,
                instructions: instructions::git_repository,
                rationale: "Working from a repository makes it easy to create branches and share changes.",
            },
            Requirement {
                key: RequirementKey::WpRepo,
                display_name: "WordPress Core GitHub Repository",
                description: "This site runs from a wordpress-develop checkout.",
                reference: Some("https://github.com/WordPress/wordpress-develop"),
                probe: ProbeKind::DevelopmentCheckout,
                instructions: instructions::wp_repo,
                rationale: "Core patches are made against the development repository, not a release build.",
            },
            Requirement {
                key: RequirementKey::Gutenberg,
                display_name: "Gutenberg Plugin",
                description: "The Gutenberg plugin is installed and active.",
                reference: Some("https://github.com/WordPress/gutenberg"),
                probe: ProbeKind::ActivePlugin {
                    file: "gutenberg/gutenberg.php",
                },
                instructions: instructions::gutenberg,
                rationale: "Block editor work happens in the Gutenberg plugin before it is merged into core.",
            },
            Requirement {
                key: RequirementKey::GitExtensions,
                display_name: "Git-tracked Plugins or Themes",
                description: "At least one plugin or theme is a Git clone.",
                reference: None,
                probe: ProbeKind::GitTrackedExtensions,
                instructions: instructions::git_extensions,
                rationale: "Contributing to a plugin or theme starts from a clone of its repository.",
            },
            Requirement {
                key: RequirementKey::WporgAccount,
                display_name: "WordPress.org Account",
                description: "A verified WordPress.org username has been saved.",
                reference: Some("https://login.wordpress.org/register"),
                probe: ProbeKind::Account,
                instructions: instructions::wporg_account,
                rationale: "Tickets, Slack, props and forum participation all use a WordPress.org account.",
            },
        ];

        Self { requirements }
    }

    /// Look up a requirement by its external key string.
    pub fn lookup(&self, key: &str) -> crate::error::Result<&Requirement> {
        let key: RequirementKey = key.parse()?;
        Ok(self.get(key))
    }

    /// Get a requirement by key.
    pub fn get(&self, key: RequirementKey) -> &Requirement {
        // Every key has an entry; the table is built from the full enum
        self.requirements
            .iter()
            .find(|r| r.key == key)
            .unwrap_or_else(|| unreachable!("requirement {} missing from registry", key))
    }

    /// All requirements, in checklist order.
    pub fn iter(&self) -> impl Iterator<Item = &Requirement> {
        self.requirements.iter()
    }

    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}

impl Default for RequirementRegistry {
    fn default() -> Self {
        Self::new()
    }
}
