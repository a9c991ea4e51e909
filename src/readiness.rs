//! Readiness checks for one WordPress installation.
//!
//! [`Readiness`] is the entry point a front end talks to. Every call
//! builds a fresh probe context, so results always reflect the machine as
//! it is now; within one call a requirement is probed at most once.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use wpready::config::ReadinessConfig;
//! use wpready::readiness::Readiness;
//! use wpready::requirements::Overrides;
//!
//! let readiness = Readiness::from_config(Path::new("/srv/wordpress"), &ReadinessConfig::default(), None);
//! for stage in readiness.evaluate_all_stages(&Overrides::new()) {
//!     println!("{}: {}", stage.title, if stage.ready { "ready" } else { "not ready" });
//! }
//! ```

use std::path::{Path, PathBuf};

use crate::config::ReadinessConfig;
use crate::environment::{resolve_platform, Platform};
use crate::error::Result;
use crate::install::{enumerate_git_tracked_extensions, GitRepoEntry, Installation};
use crate::requirements::{
    toggle, Overrides, ProbeContext, ProbeResult, RequirementChecker, RequirementKey,
    RequirementRegistry, RequirementReport,
};
use crate::shell::{CommandRunner, SystemRunner};
use crate::stages::{self, find_stage, StageEvaluation};

/// Readiness checks bound to one installation and platform.
pub struct Readiness {
    registry: RequirementRegistry,
    installation: Installation,
    platform: Platform,
    username: Option<String>,
    extra_paths: Vec<PathBuf>,
    runner: Box<dyn CommandRunner>,
    home: Option<Option<PathBuf>>,
    common_paths: Option<Vec<PathBuf>>,
    inherited_path: Option<Vec<PathBuf>>,
}

impl Readiness {
    /// Checks for `installation` on `platform` using real subprocesses.
    pub fn new(installation: Installation, platform: Platform) -> Self {
        Self {
            registry: RequirementRegistry::new(),
            installation,
            platform,
            username: None,
            extra_paths: Vec::new(),
            runner: Box::new(SystemRunner::default()),
            home: None,
            common_paths: None,
            inherited_path: None,
        }
    }

    /// Checks for the installation at `root` as described by `config`.
    ///
    /// `platform` overrides detection for this instance only.
    pub fn from_config(root: &Path, config: &ReadinessConfig, platform: Option<Platform>) -> Self {
        let mut readiness = Self::new(config.installation(root), resolve_platform(platform))
            .with_runner(SystemRunner::new(config.probe_timeout()));
        readiness.extra_paths = config.resolved_extra_paths(root);
        readiness
    }

    /// The saved WordPress.org username.
    pub fn with_username(mut self, username: Option<String>) -> Self {
        self.username = username;
        self
    }

    pub fn with_runner(mut self, runner: impl CommandRunner + 'static) -> Self {
        self.runner = Box::new(runner);
        self
    }

    pub fn with_extra_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.extra_paths = paths;
        self
    }

    /// Use `home` instead of the current user's home directory.
    pub fn with_home(mut self, home: Option<PathBuf>) -> Self {
        self.home = Some(home);
        self
    }

    /// Replace the platform's well-known tool directories.
    pub fn with_common_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.common_paths = Some(paths);
        self
    }

    /// Replace the inherited `PATH`.
    pub fn with_inherited_path(mut self, paths: Vec<PathBuf>) -> Self {
        self.inherited_path = Some(paths);
        self
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn installation(&self) -> &Installation {
        &self.installation
    }

    pub fn registry(&self) -> &RequirementRegistry {
        &self.registry
    }

    fn context(&self) -> ProbeContext<'_> {
        let mut ctx = ProbeContext::new(self.platform, &self.installation, self.runner.as_ref())
            .with_username(self.username.clone())
            .with_extra_paths(self.extra_paths.clone());
        if let Some(home) = &self.home {
            ctx = ctx.with_home(home.clone());
        }
        if let Some(paths) = &self.common_paths {
            ctx = ctx.with_common_paths(paths.clone());
        }
        if let Some(paths) = &self.inherited_path {
            ctx = ctx.with_inherited_path(paths.clone());
        }
        ctx
    }

    /// Whether one requirement is met, as a probe result.
    pub fn check_requirement(&self, key: &str, overrides: &Overrides) -> Result<ProbeResult> {
        let key: RequirementKey = key.parse()?;
        let ctx = self.context();
        let mut checker = RequirementChecker::new(&self.registry, &ctx);
        Ok(checker.check(key, overrides))
    }

    /// One checklist row, with instructions for the active platform.
    pub fn check_single_requirement(
        &self,
        key: &str,
        overrides: &Overrides,
    ) -> Result<RequirementReport> {
        let key: RequirementKey = key.parse()?;
        let ctx = self.context();
        let mut checker = RequirementChecker::new(&self.registry, &ctx);
        Ok(checker.report(key, overrides))
    }

    /// Every checklist row, in registry order.
    pub fn checklist(&self, overrides: &Overrides) -> Vec<RequirementReport> {
        let ctx = self.context();
        let mut checker = RequirementChecker::new(&self.registry, &ctx);
        self.registry
            .iter()
            .map(|req| checker.report(req.key, overrides))
            .collect()
    }

    /// Every stage, in order.
    pub fn evaluate_all_stages(&self, overrides: &Overrides) -> Vec<StageEvaluation> {
        let ctx = self.context();
        let mut checker = RequirementChecker::new(&self.registry, &ctx);
        stages::evaluate_all(&mut checker, overrides)
    }

    /// One stage by key.
    pub fn evaluate_stage(&self, stage_key: &str, overrides: &Overrides) -> Result<StageEvaluation> {
        let stage = find_stage(stage_key)?;
        let ctx = self.context();
        let mut checker = RequirementChecker::new(&self.registry, &ctx);
        Ok(stages::evaluate(stage, &mut checker, overrides))
    }

    /// Flip the debug override for `key` against its real state.
    pub fn toggle_override(&self, key: &str, overrides: &Overrides) -> Result<Overrides> {
        let key: RequirementKey = key.parse()?;
        if overrides.contains_key(&key) {
            // Resetting needs no probe
            return Ok(toggle(overrides, key, false));
        }
        let ctx = self.context();
        let mut checker = RequirementChecker::new(&self.registry, &ctx);
        let really_available = checker.probe(key).is_available();
        Ok(toggle(overrides, key, really_available))
    }

    /// Plugins and themes under version control.
    pub fn git_tracked_extensions(&self) -> Vec<GitRepoEntry> {
        enumerate_git_tracked_extensions(&self.installation)
    }
}
