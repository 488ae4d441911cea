//! Engine run metrics.
//!
//! Collected only by `Substituter::run_with_metrics`; the plain `run` path
//! skips the traces.

use crate::{Range, ValueSource};
use std::time::Duration;

#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    /// Total elapsed time for [`Substituter::run_with_metrics`](super::Substituter::run_with_metrics).
    pub total: Duration,
    /// Time spent scanning the template and building rules.
    pub extract: Duration,
    /// Time spent resolving values and rewriting the text.
    pub substitute: Duration,
}

/// What happened to a single placeholder.
#[derive(Debug, Clone)]
pub struct RuleTrace {
    pub span: String,
    pub range: Range,
    pub key: String,
    pub source: ValueSource,
    pub replacement: String,
    /// Modifier names that did not resolve to a registered modifier.
    pub unknown_modifiers: Vec<String>,
    /// Whether a modifier failed and the pipeline fell back to its input.
    pub modifier_failed: bool,
}

/// Output bundled with per-rule traces and timings.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub output: String,
    pub traces: Vec<RuleTrace>,
    pub metrics: RunMetrics,
}
