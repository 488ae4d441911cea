//! Extraction and substitution engine.
//!
//! This module is the working core behind [`Interpolator`](crate::Interpolator).
//! The public facade in `api.rs` owns the configuration and registries; the
//! engine borrows them for the duration of one parse call.
//!
//! ## How the parts work together
//!
//! ```text
//! Options.delimiter ──> Delimiters::new          (delimiters.rs)
//!                              │
//! template ── find_spans ──────┤
//!                              v
//!                     extract_rules (extract.rs)
//!                       - split key / alternative / modifiers
//!                       - look modifiers up in the registry
//!                              │
//!                              v
//!                     Substituter::run (substitute.rs)
//!                       - alias -> path / direct lookup (resolve.rs)
//!                       - fallback: value, alternative, key, removal
//!                       - modifier pipeline
//!                       - replace first occurrence of the span
//!                              │
//!                              v
//!                         output String
//! ```
//!
//! Every stage is total: a bad path, a missing key, an unknown modifier or a
//! failing modifier degrade to a fallback instead of an error.
//!
//! ## Responsibilities by module
//!
//! - `delimiters.rs`: compiled marker pair and the placeholder span scanner.
//! - `extract.rs`: turns spans into `Rule`s.
//! - `resolve.rs`: dotted/bracketed path walking, truthiness and rendering.
//! - `substitute.rs`: the per-rule fallback chain and text rewriting.
//! - `metrics.rs`: timings and per-rule traces for verbose runs.
//!
//! ## Debugging
//!
//! The engine emits `tracing` events (`trace` per placeholder, `debug` for
//! modifier failures). The `interpolator` binary shows them when
//! `INTERPOLATOR_LOG=trace` is set.

#[path = "engine/delimiters.rs"]
mod delimiters;
#[path = "engine/extract.rs"]
mod extract;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/resolve.rs"]
mod resolve;
#[path = "engine/substitute.rs"]
mod substitute;

pub use delimiters::Delimiters;
pub use metrics::RuleTrace;
pub use resolve::{render_value, resolve_path};
pub use substitute::Substituter;
