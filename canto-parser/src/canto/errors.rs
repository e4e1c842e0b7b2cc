//! Error types for the pipeline stages.
//!
//!     Two taxonomies exist side by side. Syntax errors are fatal lexical or
//!     semantic conditions that abort the whole pass. Verification errors
//!     are lightweight values a recognizer returns instead of committing to
//!     `create`; the orchestrating loop treats the first one as fatal too,
//!     but they stay ordinary values all the way up so callers can match on
//!     them. Nothing in this crate panics on user input.

use thiserror::Error;

/// A fatal lexical or semantic condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("syntax error: {message}")]
pub struct SyntaxError {
    pub message: String,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>) -> Self {
        SyntaxError {
            message: message.into(),
        }
    }
}

/// A recognizer verification failure.
///
/// Returned from `verify`, never thrown. An inner recognizer's error can be
/// wrapped with the outer recognizer's context prefix so messages compose,
/// as in `"Expression: Import: closing bracket is missing."`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct VerifyError {
    pub message: String,
}

impl VerifyError {
    pub fn new(message: impl Into<String>) -> Self {
        VerifyError {
            message: message.into(),
        }
    }

    /// Prefix this error with an outer recognizer's context.
    pub fn context(self, prefix: &str) -> Self {
        VerifyError {
            message: format!("{}: {}", prefix, self.message),
        }
    }
}

/// A statement-processor or expression-construction failure at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        ParseError {
            message: message.into(),
        }
    }
}

/// The single error type of the pipeline facade.
///
/// Wraps the stage errors with a stage prefix. First error wins; no stage
/// ever returns a partial result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("lexer error: {0}")]
    Lex(#[from] SyntaxError),
    #[error("preprocessor error: {0}")]
    Preprocess(#[from] VerifyError),
    #[error("parser error: {0}")]
    Parse(#[from] ParseError),
}
