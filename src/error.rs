use std::borrow::Cow;
use thiserror::Error;

/// Errors raised while building an [`Interpolator`](crate::Interpolator) from [`Options`](crate::Options).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("delimiter markers must not be empty (got open={open:?}, close={close:?})")]
    EmptyDelimiter { open: String, close: String },

    /// The marker could not be turned into a search pattern.
    #[error("invalid delimiter pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Errors returned by [`Interpolator::register_modifier`](crate::Interpolator::register_modifier).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("modifiers must have a name")]
    MissingName,

    /// A name containing a chain separator can never be referenced from a placeholder.
    #[error("modifier name {name:?} contains reserved character {reserved:?}")]
    ReservedCharacter { name: String, reserved: char },
}

/// Failure reported by a modifier transform.
///
/// The engine never surfaces this to `parse` callers: a failing pipeline falls
/// back to the untransformed value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("modifier failed: {message}")]
pub struct ModifierError {
    message: Cow<'static, str>,
}

impl ModifierError {
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self { message: message.into() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
