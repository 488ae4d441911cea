//! Placeholder interpolation engine.
//!
//! Templates contain placeholders of the form `{key[:alternative][|mod1,mod2]}`.
//! Each placeholder is resolved against a `serde_json::Value`, transformed by
//! the named modifiers, and written back into the text. Missing data falls
//! back to the alternative text, then to removal.
//!
//! ```
//! use interpolator::Interpolator;
//! use serde_json::json;
//!
//! let engine = Interpolator::new();
//! let out = engine.parse("Hi {name|uppercase}, from {city:somewhere}", &json!({ "name": "dan" }));
//! assert_eq!(out, "Hi DAN, from somewhere");
//! ```

#[macro_use]
mod macros;
mod aliases;
mod api;
mod engine;
mod error;
mod modifiers;

pub use aliases::{AliasRef, AliasTable, Producer};
pub use api::{Interpolator, Options, ParseDetails, ParseResultVerbose, Substitution, ValueSource, parse};
pub use engine::{render_value, resolve_path};
pub use error::{ConfigError, ModifierError, RegistrationError};
pub use modifiers::{Modifier, ModifierRegistry, Transform};

// --- Internal types ---------------------------------------------------------

bitflags::bitflags! {
    /// Shape of a placeholder, computed once by the extractor.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub(crate) struct RuleFlags: u8 {
        /// Non-empty alternative text after `:`.
        const ALTERNATIVE = 1 << 0;
        /// At least one modifier name after `|`.
        const MODIFIERS   = 1 << 1;
        /// Key contains `.` or `[` and goes through the path resolver.
        const PATH        = 1 << 2;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Range {
    /// Start byte index (inclusive).
    pub start: usize,
    /// End byte index (exclusive).
    pub end: usize,
}

/// A modifier name from a placeholder and the registry entry it resolved to.
#[derive(Debug, Clone)]
pub(crate) struct ModifierSlot<'r> {
    pub name: String,
    pub modifier: Option<&'r Modifier>,
}

/// One placeholder found in a template.
///
/// Rules only live for a single parse call; `span` is the verbatim matched text
/// (markers included) and is what the engine replaces.
#[derive(Debug, Clone)]
pub(crate) struct Rule<'r> {
    pub key: String,
    pub span: String,
    pub range: Range,
    pub alternative: String,
    pub modifiers: Vec<ModifierSlot<'r>>,
    pub flags: RuleFlags,
}

impl Rule<'_> {
    pub fn unknown_modifiers(&self) -> Vec<String> {
        self.modifiers.iter().filter(|slot| slot.modifier.is_none()).map(|slot| slot.name.clone()).collect()
    }
}
