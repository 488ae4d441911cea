//! Alias table: short keys that stand for a resolver path or a value producer.
//!
//! Keys are case-insensitive for every operation (add, lookup and removal all
//! normalize to lower case).

use crate::engine::resolve_path;
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashMap;

/// Zero-argument value producer used by [`AliasRef::Producer`].
pub type Producer = Box<dyn Fn() -> Value + Send + Sync>;

/// What an alias points at.
pub enum AliasRef {
    /// A resolver path such as `locations[0].city`, walked against the data.
    Path(String),
    /// A function whose return value is used directly.
    Producer(Producer),
}

impl AliasRef {
    pub fn producer<F>(produce: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        AliasRef::Producer(Box::new(produce))
    }

    /// Resolve the target against `data`. `None` means no value.
    pub(crate) fn resolve<'d>(&self, data: &'d Value) -> Option<Cow<'d, Value>> {
        match self {
            AliasRef::Path(path) => resolve_path(path, data).map(Cow::Borrowed),
            AliasRef::Producer(produce) => Some(Cow::Owned(produce())),
        }
    }
}

impl From<&str> for AliasRef {
    fn from(path: &str) -> Self {
        AliasRef::Path(path.to_string())
    }
}

impl From<String> for AliasRef {
    fn from(path: String) -> Self {
        AliasRef::Path(path)
    }
}

impl std::fmt::Debug for AliasRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AliasRef::Path(path) => f.debug_tuple("Path").field(path).finish(),
            AliasRef::Producer(_) => f.write_str("Producer(<function>)"),
        }
    }
}

#[derive(Debug, Default)]
pub struct AliasTable {
    entries: HashMap<String, AliasRef>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the alias stored under `key`.
    pub fn add(&mut self, key: &str, target: impl Into<AliasRef>) -> &mut Self {
        let target = target.into();
        tracing::debug!(key, target = ?target, "added alias");
        self.entries.insert(normalize(key), target);
        self
    }

    pub fn remove(&mut self, key: &str) -> &mut Self {
        if self.entries.remove(&normalize(key)).is_some() {
            tracing::debug!(key, "removed alias");
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&AliasRef> {
        if self.entries.is_empty() {
            return None;
        }
        self.entries.get(&normalize(key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize(key: &str) -> String {
    key.to_lowercase()
}
