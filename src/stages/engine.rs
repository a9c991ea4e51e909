//! Stage evaluation.
//!
//! A stage is ready when every required key checks as met. Optional keys
//! are reported when missing but never change readiness.

use std::fmt;

use serde::Serialize;

use crate::requirements::{Overrides, RequirementChecker};

use super::definition::{Stage, STAGES};

/// Readiness of a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageState {
    /// Not evaluated yet. Evaluation never returns this.
    Undetermined,
    Ready,
    NotReady,
}

impl fmt::Display for StageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageState::Undetermined => write!(f, "undetermined"),
            StageState::Ready => write!(f, "ready"),
            StageState::NotReady => write!(f, "not ready"),
        }
    }
}

/// Outcome of evaluating one stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageEvaluation {
    pub stage_key: String,
    pub title: String,
    pub ready: bool,
    /// Display names of unmet required keys, in declaration order.
    pub missing_required: Vec<String>,
    /// Display names of unmet optional keys, in declaration order.
    pub missing_optional: Vec<String>,
}

impl StageEvaluation {
    pub fn state(&self) -> StageState {
        if self.ready {
            StageState::Ready
        } else {
            StageState::NotReady
        }
    }
}

/// Evaluate one stage.
pub fn evaluate(
    stage: &Stage,
    checker: &mut RequirementChecker<'_>,
    overrides: &Overrides,
) -> StageEvaluation {
    let registry = checker.registry();

    let mut missing_required = Vec::new();
    for &key in stage.required {
        if !checker.is_met(key, overrides) {
            missing_required.push(registry.get(key).display_name.to_string());
        }
    }

    let mut missing_optional = Vec::new();
    for &key in stage.optional {
        if !checker.is_met(key, overrides) {
            missing_optional.push(registry.get(key).display_name.to_string());
        }
    }

    StageEvaluation {
        stage_key: stage.key.to_string(),
        title: stage.title.to_string(),
        ready: missing_required.is_empty(),
        missing_required,
        missing_optional,
    }
}

/// Evaluate every stage in order.
pub fn evaluate_all(
    checker: &mut RequirementChecker<'_>,
    overrides: &Overrides,
) -> Vec<StageEvaluation> {
    STAGES
        .iter()
        .map(|stage| evaluate(stage, checker, overrides))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Platform;
    use crate::install::Installation;
    use crate::requirements::{ProbeContext, RequirementKey, RequirementRegistry};
    use crate::shell::ScriptedRunner;
    use crate::stages::find_stage;
    use tempfile::TempDir;

    fn with_checker<T>(
        runner: &ScriptedRunner,
        f: impl FnOnce(&mut RequirementChecker<'_>) -> T,
    ) -> T {
        let temp = TempDir::new().unwrap();
        let inst = Installation::new(temp.path());
        let ctx = ProbeContext::new(Platform::Linux, &inst, runner)
            .with_home(Some(temp.path().to_path_buf()))
            .with_common_paths(Vec::new())
            .with_inherited_path(Vec::new());
        let registry = RequirementRegistry::new();
        let mut checker = RequirementChecker::new(&registry, &ctx);
        f(&mut checker)
    }

    fn overrides(pairs: &[(RequirementKey, bool)]) -> Overrides {
        pairs.iter().copied().collect()
    }

    #[test]
    fn missing_required_lists_display_names() {
        let runner = ScriptedRunner::new();
        let eval = with_checker(&runner, |checker| {
            let o = overrides(&[(RequirementKey::Git, true), (RequirementKey::WpRepo, false)]);
            evaluate(find_stage("php").unwrap(), checker, &o)
        });
        assert!(!eval.ready);
        assert_eq!(eval.missing_required, vec!["WordPress Core GitHub Repository"]);
        assert_eq!(eval.state(), StageState::NotReady);
    }

    #[test]
    fn web_stage_is_always_ready() {
        let runner = ScriptedRunner::new();
        let eval = with_checker(&runner, |checker| {
            evaluate(find_stage("web").unwrap(), checker, &Overrides::new())
        });
        assert!(eval.ready);
        assert_eq!(eval.missing_optional, vec!["WordPress.org Account"]);
    }

    #[test]
    fn optional_keys_never_change_readiness() {
        let runner = ScriptedRunner::new();
        let stage = find_stage("extensions").unwrap();
        let required = overrides(&[
            (RequirementKey::Git, true),
            (RequirementKey::GitExtensions, true),
        ]);
        let (with_none, with_all) = with_checker(&runner, |checker| {
            let mut all = required.clone();
            for &key in stage.optional {
                all.insert(key, true);
            }
            (
                evaluate(stage, checker, &required),
                evaluate(stage, checker, &all),
            )
        });
        assert!(with_none.ready);
        assert!(with_all.ready);
        assert_eq!(with_none.missing_optional, vec!["Node.js", "npm", "Composer"]);
        assert!(with_all.missing_optional.is_empty());
    }

    #[test]
    fn evaluate_all_keeps_stage_order() {
        let runner = ScriptedRunner::new();
        let evals = with_checker(&runner, |checker| evaluate_all(checker, &Overrides::new()));
        let keys: Vec<_> = evals.iter().map(|e| e.stage_key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["web", "php", "assets", "blocks", "extensions", "community"]
        );
    }

    #[test]
    fn evaluation_is_idempotent() {
        let runner = ScriptedRunner::new().respond("git --version", "git version 2.43.0");
        let (first, second) = with_checker(&runner, |checker| {
            (
                evaluate_all(checker, &Overrides::new()),
                evaluate_all(checker, &Overrides::new()),
            )
        });
        assert_eq!(first, second);
    }

    #[test]
    fn missing_keys_keep_declaration_order() {
        let runner = ScriptedRunner::new();
        let eval = with_checker(&runner, |checker| {
            evaluate(find_stage("assets").unwrap(), checker, &Overrides::new())
        });
        assert_eq!(
            eval.missing_required,
            vec!["Git", "WordPress Core GitHub Repository", "Node.js", "npm"]
        );
    }

    #[test]
    fn all_required_overrides_make_every_stage_ready() {
        let runner = ScriptedRunner::new();
        let all: Overrides = RequirementKey::ALL.iter().map(|&k| (k, true)).collect();
        let evals = with_checker(&runner, |checker| evaluate_all(checker, &all));
        assert!(evals.iter().all(|e| e.ready && e.missing_optional.is_empty()));
    }
}
