//! Crate error type.

use thiserror::Error;

/// Errors raised while building or loading a form.
///
/// Submit handler failures are a separate channel, see
/// [`SubmitError`](crate::form::SubmitError).
#[derive(Debug, Error)]
pub enum Error {
    /// Two fields in one form share a name.
    #[error("duplicate field name `{0}`")]
    DuplicateField(String),

    /// A JSON form configuration could not be parsed.
    #[error("invalid form configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A validation pattern is not a valid regular expression.
    #[error("invalid validation pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
