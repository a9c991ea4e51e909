//! Requirement checker.
//!
//! The `RequirementChecker` answers "is this requirement met?" for one
//! evaluation pass. Overrides win without probing; real probes are cached
//! so that stages sharing a requirement only run its probe once.

use std::collections::HashMap;

use crate::install::{
    active_plugin, enumerate_git_tracked_extensions, find_git_repository, git_remote_origin,
    is_wordpress_develop_remote,
};

use super::context::ProbeContext;
use super::overrides::Overrides;
use super::probe::probe_tool;
use super::registry::{ProbeKind, RequirementKey, RequirementRegistry};
use super::status::{ProbeResult, RequirementReport};

/// Checks whether requirements are satisfied.
pub struct RequirementChecker<'a> {
    registry: &'a RequirementRegistry,
    ctx: &'a ProbeContext<'a>,
    cache: HashMap<RequirementKey, ProbeResult>,
}

impl<'a> RequirementChecker<'a> {
    pub fn new(registry: &'a RequirementRegistry, ctx: &'a ProbeContext<'a>) -> Self {
        Self {
            registry,
            ctx,
            cache: HashMap::new(),
        }
    }

    pub fn registry(&self) -> &'a RequirementRegistry {
        self.registry
    }

    pub fn context(&self) -> &'a ProbeContext<'a> {
        self.ctx
    }

    /// Check a requirement, honoring `overrides`.
    ///
    /// An override of `true` yields an available result with no details;
    /// `false` yields `Unavailable`. Neither runs the probe.
    pub fn check(&mut self, key: RequirementKey, overrides: &Overrides) -> ProbeResult {
        match overrides.get(&key) {
            Some(true) => ProbeResult::forced(),
            Some(false) => ProbeResult::Unavailable,
            None => self.probe(key),
        }
    }

    /// Whether a requirement is met, honoring `overrides`.
    pub fn is_met(&mut self, key: RequirementKey, overrides: &Overrides) -> bool {
        self.check(key, overrides).is_available()
    }

    /// The real probe result, ignoring overrides. Cached per checker.
    pub fn probe(&mut self, key: RequirementKey) -> ProbeResult {
        if let Some(cached) = self.cache.get(&key) {
            return cached.clone();
        }

        let result = self.evaluate(key);
        tracing::debug!(
            "{}: {}",
            key,
            if result.is_available() { "available" } else { "unavailable" }
        );
        self.cache.insert(key, result.clone());
        result
    }

    /// A full checklist row for `key`.
    pub fn report(&mut self, key: RequirementKey, overrides: &Overrides) -> RequirementReport {
        let status = self.check(key, overrides);
        let requirement = self.registry.get(key);
        RequirementReport {
            key,
            name: requirement.display_name.to_string(),
            version: status.version().map(str::to_string),
            instructions: (requirement.instructions)(self.ctx.platform),
            rationale: requirement.rationale.to_string(),
            overridden: overrides.contains_key(&key),
            status,
        }
    }

    fn evaluate(&self, key: RequirementKey) -> ProbeResult {
        let requirement = self.registry.get(key);
        let installation = self.ctx.installation;

        match &requirement.probe {
            ProbeKind::Tool(spec) => {
                let report = probe_tool(self.ctx, spec);
                if !report.found {
                    return ProbeResult::Unavailable;
                }
                let detail = match &report.version {
                    Some(version) => format!("{} {}", requirement.display_name, version),
                    None => requirement.display_name.to_string(),
                };
                ProbeResult::Available {
                    detail: Some(detail),
                    version: report.version,
                    path: report.resolved_path,
                }
            }
            ProbeKind::GitRepository => match find_git_repository(&installation.root) {
                Some(dir) => ProbeResult::available(format!("Git repository at {}", dir.display())),
                None => ProbeResult::Unavailable,
            },
            ProbeKind::DevelopmentCheckout => match installation.checkout_root() {
                Some(root) => {
                    let mut detail = format!("Development checkout at {}", root.display());
                    if let Some(origin) = git_remote_origin(&root, self.ctx.runner) {
                        let kind = if is_wordpress_develop_remote(&origin) {
                            "official"
                        } else {
                            "fork"
                        };
                        detail.push_str(&format!(" ({} origin {})", kind, origin));
                    }
                    ProbeResult::available(detail)
                }
                None => ProbeResult::Unavailable,
            },
            ProbeKind::ActivePlugin { file } => match active_plugin(installation, file) {
                Some(info) => ProbeResult::Available {
                    detail: Some(match &info.version {
                        Some(version) => format!("{} {}", info.name, version),
                        None => info.name.clone(),
                    }),
                    version: info.version,
                    path: Some(installation.plugins_dir.join(file)),
                },
                None => ProbeResult::Unavailable,
            },
            ProbeKind::GitTrackedExtensions => {
                let entries = enumerate_git_tracked_extensions(installation);
                if entries.is_empty() {
                    ProbeResult::Unavailable
                } else {
                    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
                    ProbeResult::available(names.join(", "))
                }
            }
            ProbeKind::Account => match &self.ctx.username {
                Some(username) => ProbeResult::available(format!("Connected as {}", username)),
                None => ProbeResult::Unavailable,
            },
        }
    }
}
