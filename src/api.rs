use crate::aliases::{AliasRef, AliasTable};
use crate::engine::{self, Delimiters, RuleTrace};
use crate::error::{ConfigError, ModifierError, RegistrationError};
use crate::modifiers::ModifierRegistry;
use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

static DEFAULT_ENGINE: Lazy<Interpolator> = Lazy::new(Interpolator::new);

/// Engine configuration.
///
/// Deserializes from `{"delimiter": ["[[", "]]"]}`; missing fields take their
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Open and close markers of a placeholder.
    pub delimiter: (String, String),
}

impl Default for Options {
    fn default() -> Self {
        Self { delimiter: ("{".to_string(), "}".to_string()) }
    }
}

impl Options {
    pub fn with_delimiter(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self { delimiter: (open.into(), close.into()) }
    }
}

/// Which stage of the fallback chain produced a placeholder's replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueSource {
    /// The alias table resolved the key.
    Alias,
    /// The key (or path) resolved in the data object.
    Data,
    /// No value; the alternative text was used.
    Alternative,
    /// No value and no alternative; a modifier transformed the bare key.
    Key,
    /// Nothing usable; the placeholder was removed.
    Removed,
}

/// A placeholder and what replaced it.
///
/// `start`/`end` are byte offsets into the original template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    /// Matched text, markers included.
    pub span: String,
    pub start: usize,
    pub end: usize,
    pub key: String,
    pub source: ValueSource,
    pub replacement: String,
    /// Modifier names with no registered modifier.
    pub unknown_modifiers: Vec<String>,
    /// A modifier failed and the untransformed value was used.
    pub modifier_failed: bool,
}

/// Additional details returned by [`Interpolator::parse_verbose`].
#[derive(Debug, Clone)]
pub struct ParseDetails {
    /// Total elapsed time.
    pub total: Duration,
    /// Time spent scanning placeholders.
    pub extract: Duration,
    /// Time spent resolving and rewriting.
    pub substitute: Duration,
    /// One entry per placeholder, in scan order.
    pub substitutions: Vec<Substitution>,
}

/// Result from [`Interpolator::parse_verbose`].
#[derive(Debug, Clone)]
pub struct ParseResultVerbose {
    /// The input template.
    pub text: String,
    /// Same string [`Interpolator::parse`] returns.
    pub output: String,
    pub details: ParseDetails,
}

/// Placeholder interpolation engine.
///
/// Owns its [`Options`], a [`ModifierRegistry`] seeded with the built-in
/// modifiers, and an [`AliasTable`]. Parsing borrows the engine immutably;
/// registering modifiers and aliases needs `&mut self`.
///
/// # Example
/// ```
/// use interpolator::Interpolator;
/// use serde_json::json;
///
/// let mut engine = Interpolator::new();
/// engine.add_alias("city", "locations[0]");
/// assert_eq!(engine.parse("{city|uppercase}", &json!({ "locations": ["ny"] })), "NY");
/// ```
#[derive(Debug)]
pub struct Interpolator {
    options: Options,
    delimiters: Delimiters,
    modifiers: ModifierRegistry,
    aliases: AliasTable,
}

impl Default for Interpolator {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpolator {
    /// Engine with `{` / `}` markers and the built-in modifiers.
    pub fn new() -> Self {
        Self {
            options: Options::default(),
            delimiters: Delimiters::default(),
            modifiers: ModifierRegistry::with_builtins(),
            aliases: AliasTable::new(),
        }
    }

    /// Engine with custom options. Empty markers are rejected.
    pub fn with_options(options: Options) -> Result<Self, ConfigError> {
        let (open, close) = &options.delimiter;
        let delimiters = Delimiters::new(open, close)?;
        Ok(Self { options, delimiters, modifiers: ModifierRegistry::with_builtins(), aliases: AliasTable::new() })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The configured `(open, close)` markers.
    pub fn delimiter(&self) -> (&str, &str) {
        (self.delimiters.open(), self.delimiters.close())
    }

    pub fn modifiers(&self) -> &ModifierRegistry {
        &self.modifiers
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Register a modifier usable as `{key|name}`.
    ///
    /// Registration is append-only: when `name` is already taken (built-ins
    /// included) the earlier modifier keeps answering lookups.
    pub fn register_modifier<F>(&mut self, name: &str, transform: F) -> Result<&mut Self, RegistrationError>
    where
        F: Fn(&str, &Value) -> Result<String, ModifierError> + Send + Sync + 'static,
    {
        self.modifiers.register(name, transform)?;
        Ok(self)
    }

    /// Map `key` to a resolver path (`&str`/`String`) or an [`AliasRef::producer`].
    pub fn add_alias(&mut self, key: &str, target: impl Into<AliasRef>) -> &mut Self {
        self.aliases.add(key, target);
        self
    }

    pub fn remove_alias(&mut self, key: &str) -> &mut Self {
        self.aliases.remove(key);
        self
    }

    /// Substitute every placeholder of `template` using `data`.
    ///
    /// Never fails: unresolvable placeholders fall back to their alternative
    /// text or are removed.
    pub fn parse(&self, template: &str, data: &Value) -> String {
        self.substituter().run(template, data)
    }

    /// Like [`parse`](Self::parse), plus a per-placeholder trace and timings.
    pub fn parse_verbose(&self, template: &str, data: &Value) -> ParseResultVerbose {
        let run = self.substituter().run_with_metrics(template, data);

        let details = ParseDetails {
            total: run.metrics.total,
            extract: run.metrics.extract,
            substitute: run.metrics.substitute,
            substitutions: run.traces.into_iter().map(trace_to_substitution).collect(),
        };

        ParseResultVerbose { text: template.to_string(), output: run.output, details }
    }

    fn substituter(&self) -> engine::Substituter<'_> {
        engine::Substituter::new(&self.delimiters, &self.modifiers, &self.aliases)
    }
}

/// Parse `template` with a shared default engine (`{`/`}` markers, built-in
/// modifiers, no aliases).
///
/// # Example
/// ```
/// use interpolator::parse;
/// use serde_json::json;
///
/// assert_eq!(parse("Hi {name}", &json!({ "name": "dan" })), "Hi dan");
/// ```
pub fn parse(template: &str, data: &Value) -> String {
    DEFAULT_ENGINE.parse(template, data)
}

fn trace_to_substitution(trace: RuleTrace) -> Substitution {
    Substitution {
        span: trace.span,
        start: trace.range.start,
        end: trace.range.end,
        key: trace.key,
        source: trace.source,
        replacement: trace.replacement,
        unknown_modifiers: trace.unknown_modifiers,
        modifier_failed: trace.modifier_failed,
    }
}
