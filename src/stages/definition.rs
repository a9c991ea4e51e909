//! The fixed contribution stages.

use serde::Serialize;

use crate::error::{ReadinessError, Result};
use crate::requirements::RequirementKey;

use RequirementKey::*;

/// A contribution stage and the requirements that gate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stage {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// All of these must be met for the stage to be ready.
    pub required: &'static [RequirementKey],
    /// Reported when missing; never affect readiness.
    pub optional: &'static [RequirementKey],
}

/// Every stage, in the order they are presented.
pub const STAGES: &[Stage] = &[
    Stage {
        key: "web",
        title: "GitHub Web Interface Contributions",
        description: "Edit files directly on GitHub without a local development setup.",
        required: &[],
        optional: &[WporgAccount],
    },
    Stage {
        key: "php",
        title: "PHP Core Development",
        description: "Contribute to WordPress core PHP code and backend functionality.",
        required: &[Git, WpRepo],
        optional: &[GitRepository, Composer],
    },
    Stage {
        key: "assets",
        title: "Building Core Assets",
        description: "Build and test core JavaScript and CSS from the development repository.",
        required: &[Git, WpRepo, Node, Npm],
        optional: &[Composer],
    },
    Stage {
        key: "blocks",
        title: "Block Development",
        description: "Contribute to Gutenberg blocks and modern WordPress JavaScript development.",
        required: &[Git, Node, Npm, Gutenberg],
        optional: &[WpRepo],
    },
    Stage {
        key: "extensions",
        title: "Plugin & Theme Development",
        description: "Work on plugins and themes you have cloned into this site.",
        required: &[Git, GitExtensions],
        optional: &[Node, Npm, Composer],
    },
    Stage {
        key: "community",
        title: "Community Contribution",
        description: "Take part in Trac tickets, Slack discussions and contributor days.",
        required: &[WporgAccount],
        optional: &[Git, WpRepo],
    },
];

/// Look up a stage by key.
pub fn find_stage(key: &str) -> Result<&'static Stage> {
    STAGES
        .iter()
        .find(|s| s.key == key)
        .ok_or_else(|| ReadinessError::UnknownStage {
            key: key.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_are_in_fixed_order() {
        let keys: Vec<_> = STAGES.iter().map(|s| s.key).collect();
        assert_eq!(
            keys,
            vec!["web", "php", "assets", "blocks", "extensions", "community"]
        );
    }

    #[test]
    fn web_stage_has_no_required_keys() {
        assert!(find_stage("web").unwrap().required.is_empty());
    }

    #[test]
    fn required_and_optional_do_not_overlap() {
        for stage in STAGES {
            for key in stage.optional {
                assert!(
                    !stage.required.contains(key),
                    "{} lists {} as both required and optional",
                    stage.key,
                    key
                );
            }
        }
    }

    #[test]
    fn unknown_stage_is_error() {
        let err = find_stage("expert").unwrap_err();
        assert!(matches!(err, ReadinessError::UnknownStage { key } if key == "expert"));
    }
}
