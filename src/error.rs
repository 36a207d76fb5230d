//! Error types for codelight

use thiserror::Error;

/// Result type alias for codelight operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building grammars or loading configuration.
///
/// Tokenizing a line never fails; everything here happens before the
/// first line is highlighted.
#[derive(Error, Debug)]
pub enum Error {
    /// A grammar (or one of its patterns) cannot be used
    #[error("invalid grammar: {0}")]
    InvalidGrammar(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Message(String),
}

impl Error {
    pub(crate) fn grammar(msg: impl Into<String>) -> Self {
        Error::InvalidGrammar(msg.into())
    }
}
