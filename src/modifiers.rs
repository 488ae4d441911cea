//! Modifier registry.
//!
//! Modifiers are named transforms applied to a placeholder's value, in the
//! order they are listed after `|`. The registry is append-only: registering a
//! name twice keeps both entries and [`ModifierRegistry::lookup`] returns the
//! first one, so the built-ins registered at construction cannot be shadowed.

use crate::error::{ModifierError, RegistrationError};
use serde_json::Value;

/// Transform signature: current text plus the raw data object of the parse call.
pub type Transform = Box<dyn Fn(&str, &Value) -> Result<String, ModifierError> + Send + Sync>;

/// Characters that split a placeholder's modifier chain.
const RESERVED: &[char] = &[',', '|'];

/// A named transform owned by a [`ModifierRegistry`].
pub struct Modifier {
    name: String,
    transform: Transform,
}

impl Modifier {
    /// Lower-cased registration name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn apply(&self, input: &str, data: &Value) -> Result<String, ModifierError> {
        (self.transform)(input, data)
    }
}

impl std::fmt::Debug for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Modifier").field("name", &self.name).field("transform", &"<function>").finish()
    }
}

/// Ordered collection of modifiers keyed by case-insensitive name.
#[derive(Debug, Default)]
pub struct ModifierRegistry {
    entries: Vec<Modifier>,
}

impl ModifierRegistry {
    /// A registry with no modifiers at all.
    pub fn empty() -> Self {
        Self { entries: Vec::new() }
    }

    /// A registry holding `uppercase`, `lowercase` and `title`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        for (name, transform) in builtins() {
            registry.entries.push(Modifier { name: name.to_string(), transform });
        }
        registry
    }

    /// Append a modifier.
    ///
    /// Names are trimmed and lower-cased. Blank names and names containing `,`
    /// or `|` are rejected.
    pub fn register<F>(&mut self, name: &str, transform: F) -> Result<&mut Self, RegistrationError>
    where
        F: Fn(&str, &Value) -> Result<String, ModifierError> + Send + Sync + 'static,
    {
        let name = name.trim();
        if name.is_empty() {
            return Err(RegistrationError::MissingName);
        }
        if let Some(reserved) = name.chars().find(|c| RESERVED.contains(c)) {
            return Err(RegistrationError::ReservedCharacter { name: name.to_string(), reserved });
        }

        let name = name.to_lowercase();
        if self.lookup(&name).is_some() {
            tracing::debug!(name = %name, "modifier name already registered; earlier entry keeps precedence");
        }
        tracing::debug!(name = %name, "registered modifier");
        self.entries.push(Modifier { name, transform: Box::new(transform) });
        Ok(self)
    }

    /// First modifier registered under `name`, compared case-insensitively.
    pub fn lookup(&self, name: &str) -> Option<&Modifier> {
        let name = name.trim().to_lowercase();
        self.entries.iter().find(|m| m.name == name)
    }

    /// Registered names in registration order (duplicates included).
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|m| m.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// --- Built-ins ---------------------------------------------------------------

fn builtins() -> Vec<(&'static str, Transform)> {
    vec![builtin("uppercase", str::to_uppercase), builtin("lowercase", str::to_lowercase), builtin("title", title_case)]
}

fn builtin(name: &'static str, f: fn(&str) -> String) -> (&'static str, Transform) {
    let transform: Transform = Box::new(move |s: &str, _: &Value| -> Result<String, ModifierError> { Ok(f(s)) });
    (name, transform)
}

/// Upper-case the first letter of each whitespace-separated word and
/// lower-case the rest. Whitespace is kept as is.
fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_word_start = true;
    for c in input.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            at_word_start = false;
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builtins_transform_text() {
        let registry = ModifierRegistry::with_builtins();
        let data = json!({});
        assert_eq!(registry.lookup("uppercase").unwrap().apply("dan", &data).unwrap(), "DAN");
        assert_eq!(registry.lookup("lowercase").unwrap().apply("DaN", &data).unwrap(), "dan");
        assert_eq!(registry.lookup("title").unwrap().apply("hELLO  big world", &data).unwrap(), "Hello  Big World");
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let registry = ModifierRegistry::with_builtins();
        assert_eq!(registry.lookup("UpperCase").map(Modifier::name), Some("uppercase"));
        assert!(registry.lookup("nope").is_none());
    }

    #[test]
    fn register_rejects_missing_and_reserved_names() {
        let mut registry = ModifierRegistry::empty();
        let err = registry.register("  ", |s, _| Ok(s.to_string())).unwrap_err();
        assert_eq!(err, RegistrationError::MissingName);

        let err = registry.register("a|b", |s, _| Ok(s.to_string())).unwrap_err();
        assert_eq!(err, RegistrationError::ReservedCharacter { name: "a|b".to_string(), reserved: '|' });
        assert!(registry.is_empty());
    }

    #[test]
    fn first_registration_wins_for_duplicate_names() {
        let mut registry = ModifierRegistry::with_builtins();
        registry.register("UPPERCASE", |_, _| Ok("shadowed".to_string())).unwrap();

        assert_eq!(registry.len(), 4);
        let found = registry.lookup("uppercase").unwrap();
        assert_eq!(found.apply("x", &json!(null)).unwrap(), "X");
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["uppercase", "lowercase", "title", "uppercase"]);
    }

    #[test]
    fn transforms_receive_raw_data() {
        let mut registry = ModifierRegistry::empty();
        registry
            .register("suffix", |s, data| {
                let suffix = data.get("suffix").and_then(Value::as_str).unwrap_or_default();
                Ok(format!("{s}{suffix}"))
            })
            .unwrap();
        let out = registry.lookup("suffix").unwrap().apply("dan", &json!({ "suffix": "!" })).unwrap();
        assert_eq!(out, "dan!");
    }
}
