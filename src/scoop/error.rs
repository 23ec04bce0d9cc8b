//! Error types
//!
//! Two unrelated families live here:
//!
//! - [`LexError`]: the character stream cannot be tokenized. These are fatal; a parse that hits
//!   one unwinds immediately and produces no tree.
//! - [`GrammarError`]: a grammar was assembled or rewritten incorrectly. These surface while
//!   building grammars, never while parsing.
//!
//! Missing or unexpected syntax is neither. It is reported as a
//! [`Diagnostic`](crate::scoop::diagnostics::Diagnostic) attached to the tree.

use crate::scoop::location::Location;
use thiserror::Error;

/// Fatal tokenizing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("{location}: unterminated string literal")]
    UnterminatedString { location: Location },

    #[error("{location}: unterminated character literal")]
    UnterminatedCharacter { location: Location },

    #[error("{location}: unterminated c# code block")]
    UnterminatedRawCode { location: Location },

    #[error("{location}: unterminated block comment")]
    UnterminatedComment { location: Location },

    #[error("{location}: unrecognized escape sequence '\\{sequence}'")]
    InvalidEscape { sequence: String, location: Location },

    #[error("{location}: unexpected end of input {context}")]
    UnexpectedEnd {
        context: &'static str,
        location: Location,
    },
}

impl LexError {
    pub fn location(&self) -> &Location {
        match self {
            LexError::UnterminatedString { location }
            | LexError::UnterminatedCharacter { location }
            | LexError::UnterminatedRawCode { location }
            | LexError::UnterminatedComment { location }
            | LexError::InvalidEscape { location, .. }
            | LexError::UnexpectedEnd { location, .. } => location,
        }
    }
}

/// Errors raised while assembling or rewriting a grammar
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("replaceable parser '{name}' is already bound")]
    AlreadyBound { name: String },

    #[error("cannot substitute a parser producing {found} where {expected} is expected")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("no parser named '{0}' exists in this grammar")]
    NotFound(String),
}

/// Result alias used by every parse entry point: only fatal errors travel in the `Err` arm
pub type LexResult<T> = Result<T, LexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_error_display_includes_location() {
        let error = LexError::UnterminatedString {
            location: Location::new("a.scoop", 2, 5),
        };
        assert_eq!(error.to_string(), "a.scoop:2:5: unterminated string literal");
        assert_eq!(error.location().line, 2);
    }

    #[test]
    fn test_invalid_escape_display() {
        let error = LexError::InvalidEscape {
            sequence: "q".to_string(),
            location: Location::new("a.scoop", 1, 3),
        };
        assert_eq!(
            error.to_string(),
            "a.scoop:1:3: unrecognized escape sequence '\\q'"
        );
    }
}
