/// Convenience result type used across tokenpaint.
pub type TokenResult<T> = Result<T, TokenError>;

/// Top-level error taxonomy used by the loader, rewriters and collaborator runners.
#[derive(thiserror::Error, Debug)]
pub enum TokenError {
    /// The uploaded document could not be parsed (malformed JSON, non UTF-8 bytes).
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid user-provided data: file type, binding names, settings, config.
    #[error("validation error: {0}")]
    Validation(String),

    /// Rewrite was requested while some discovered colors still have no name.
    #[error("unbound colors: {}", .keys.join(", "))]
    Unbound {
        /// Canonical keys of the colors that still need a name.
        keys: Vec<String>,
    },

    /// An external tool (ffmpeg) failed or could not be started.
    #[error("collaborator error: {0}")]
    Collaborator(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TokenError {
    /// Build a [`TokenError::Parse`] value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`TokenError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TokenError::Collaborator`] value.
    pub fn collaborator(msg: impl Into<String>) -> Self {
        Self::Collaborator(msg.into())
    }

    /// Build a [`TokenError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
