//! Substitution: the per-placeholder fallback chain.
//!
//! For every rule, in scan order, over the progressively rewritten text:
//!
//! ```text
//! alias (truthy?) ──no──> path / direct lookup (truthy?) ──no──> alternative text?
//!      │yes                       │yes                               │no
//!      v                          v                                  v
//!   render + modifiers      render + modifiers             key through modifiers
//!                                                          unchanged -> "" (removed)
//! ```
//!
//! The chosen text replaces the *first* occurrence of the rule's span in the
//! working string. Identical spans are therefore consumed one per rule, left
//! to right.

use super::delimiters::Delimiters;
use super::extract::extract_rules;
use super::metrics::{RuleTrace, RunMetrics, RunResult};
use super::resolve::{is_truthy, lookup_key, render_value, resolve_path};
use crate::aliases::AliasTable;
use crate::modifiers::ModifierRegistry;
use crate::{ModifierSlot, Rule, RuleFlags, ValueSource};
use serde_json::Value;
use std::borrow::Cow;
use std::time::Instant;

/// Borrowed view over an engine's configuration and registries.
#[derive(Debug, Clone, Copy)]
pub struct Substituter<'a> {
    delimiters: &'a Delimiters,
    modifiers: &'a ModifierRegistry,
    aliases: &'a AliasTable,
}

/// Result of one modifier pipeline run.
struct Piped {
    text: String,
    failed: bool,
}

impl<'a> Substituter<'a> {
    pub fn new(delimiters: &'a Delimiters, modifiers: &'a ModifierRegistry, aliases: &'a AliasTable) -> Self {
        Self { delimiters, modifiers, aliases }
    }

    /// Substitute every placeholder of `template`.
    ///
    /// Convenience wrapper that discards traces and timings.
    pub fn run(&self, template: &str, data: &Value) -> String {
        self.run_with_metrics(template, data).output
    }

    /// Substitute every placeholder of `template`, returning per-rule traces
    /// and stage timings alongside the output.
    pub fn run_with_metrics(&self, template: &str, data: &Value) -> RunResult {
        let total_start = Instant::now();

        let extract_start = Instant::now();
        let rules = extract_rules(template, self.delimiters, self.modifiers);
        let extract = extract_start.elapsed();

        let substitute_start = Instant::now();
        let mut working = template.to_string();
        let mut traces = Vec::with_capacity(rules.len());
        for rule in &rules {
            let (replacement, trace) = self.replacement(rule, data);
            replace_first(&mut working, &rule.span, &replacement);
            traces.push(trace);
        }
        let substitute = substitute_start.elapsed();

        RunResult { output: working, traces, metrics: RunMetrics { total: total_start.elapsed(), extract, substitute } }
    }

    /// Resolve the rule's value: alias first, then path or direct lookup.
    /// Only truthy values count.
    fn resolve_value<'d>(&self, rule: &Rule, data: &'d Value) -> Option<(Cow<'d, Value>, ValueSource)> {
        if let Some(target) = self.aliases.get(&rule.key) {
            if let Some(value) = target.resolve(data).filter(|v| is_truthy(v)) {
                return Some((value, ValueSource::Alias));
            }
        }

        let raw = if rule.flags.contains(RuleFlags::PATH) {
            resolve_path(&rule.key, data)
        } else {
            lookup_key(&rule.key, data)
        };
        raw.filter(|v| is_truthy(v)).map(|v| (Cow::Borrowed(v), ValueSource::Data))
    }

    /// Compute the replacement text for `rule` and a trace of how it was chosen.
    fn replacement(&self, rule: &Rule, data: &Value) -> (String, RuleTrace) {
        let (piped, source) = if let Some((value, source)) = self.resolve_value(rule, data) {
            (pipe(rule, render_value(&value), data), source)
        } else if rule.flags.contains(RuleFlags::ALTERNATIVE) {
            (pipe(rule, rule.alternative.clone(), data), ValueSource::Alternative)
        } else {
            let piped = pipe(rule, rule.key.clone(), data);
            if piped.text == rule.key {
                (Piped { text: String::new(), failed: piped.failed }, ValueSource::Removed)
            } else {
                (piped, ValueSource::Key)
            }
        };

        tracing::trace!(
            key = %rule.key,
            span = %rule.span,
            source = ?source,
            replacement = %piped.text,
            "substituted placeholder"
        );

        let trace = RuleTrace {
            span: rule.span.clone(),
            range: rule.range,
            key: rule.key.clone(),
            source,
            replacement: piped.text.clone(),
            unknown_modifiers: rule.unknown_modifiers(),
            modifier_failed: piped.failed,
        };
        (piped.text, trace)
    }
}

fn pipe(rule: &Rule, input: String, data: &Value) -> Piped {
    if !rule.flags.contains(RuleFlags::MODIFIERS) {
        return Piped { text: input, failed: false };
    }
    apply_modifiers(&rule.modifiers, input, data)
}

/// Run the known modifiers left to right. Unknown slots are skipped; the
/// first failure abandons the pipeline and returns `input` untouched.
fn apply_modifiers(slots: &[ModifierSlot], input: String, data: &Value) -> Piped {
    let mut current: Option<String> = None;
    for slot in slots {
        let Some(modifier) = slot.modifier else {
            continue;
        };
        let text = current.as_deref().unwrap_or(&input);
        match modifier.apply(text, data) {
            Ok(next) => current = Some(next),
            Err(err) => {
                tracing::debug!(modifier = %slot.name, error = %err, "modifier failed; keeping untransformed value");
                return Piped { text: input, failed: true };
            }
        }
    }
    Piped { text: current.unwrap_or(input), failed: false }
}

fn replace_first(working: &mut String, span: &str, replacement: &str) {
    if let Some(start) = working.find(span) {
        working.replace_range(start..start + span.len(), replacement);
    }
}
