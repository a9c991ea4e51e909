//! Contribution readiness stages.
//!
//! Stages group requirements into kinds of contribution, from editing on
//! GitHub with no local setup up to full core asset builds.

pub mod definition;
pub mod engine;

pub use definition::{find_stage, Stage, STAGES};
pub use engine::{evaluate, evaluate_all, StageEvaluation, StageState};
