//! Error types for autohighlight

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for highlighting operations
pub type Result<T> = std::result::Result<T, HighlightError>;

/// Highlighter error types
///
/// Low-confidence detection is not an error: it is reported as an
/// empty language id on the result.
#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Grammar already registered: {0}")]
    DuplicateGrammar(String),

    #[error("No such grammar: {0}")]
    NotFound(String),

    #[error("Malformed grammar {grammar}: {reason}")]
    MalformedGrammar { grammar: String, reason: String },

    #[error("Invalid grammar file {}: {message}", path.display())]
    GrammarFile { path: PathBuf, message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl HighlightError {
    pub(crate) fn malformed(grammar: &str, reason: impl Into<String>) -> Self {
        HighlightError::MalformedGrammar {
            grammar: grammar.to_string(),
            reason: reason.into(),
        }
    }
}
