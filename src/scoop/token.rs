//! Token types produced by the lexer
//!
//!     A token is an immutable record of one lexical unit: its text, its [`TokenType`], the
//!     location of its first character, any comments skipped right before it (its frontmatter)
//!     and any recoverable diagnostics found while scanning it.
//!
//! Token values
//!
//!     Most tokens store their source text verbatim. The exceptions:
//!     - numeric literals store the digits without their type suffix (`123L` stores `123`,
//!       the suffix is encoded in the token type);
//!     - c# code blocks store only the code between the braces.
//!
//!     String and character literals keep their quotes and sigils so that they can be emitted
//!     unchanged.
//!
//! Keywords
//!
//!     Words are classified with the logos-generated table in [keywords]. An `@`-escaped word
//!     is always an identifier.

pub mod keywords;
pub mod numeric;

pub use keywords::Keyword;
pub use numeric::NumericLiteral;

use crate::scoop::diagnostics::{Diagnostic, SyntaxElement};
use crate::scoop::location::Location;
use crate::scoop::parsing::Recover;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenType {
    Unknown,
    EndOfInput,
    Identifier,
    Keyword,
    Operator,
    Integer,
    UInteger,
    Long,
    ULong,
    Float,
    Double,
    Decimal,
    String,
    Character,
    RawCode,
    /// Placeholder synthesized by error recovery; never produced by the lexer
    Missing,
}

impl TokenType {
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            TokenType::Integer
                | TokenType::UInteger
                | TokenType::Long
                | TokenType::ULong
                | TokenType::Float
                | TokenType::Double
                | TokenType::Decimal
        )
    }

    /// Token types that stand for a literal value in expressions
    pub fn is_literal(self) -> bool {
        self.is_numeric() || matches!(self, TokenType::String | TokenType::Character)
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub value: String,
    pub token_type: TokenType,
    pub location: Location,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub frontmatter: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl Token {
    pub fn new(value: impl Into<String>, token_type: TokenType, location: Location) -> Self {
        Self {
            value: value.into(),
            token_type,
            location,
            frontmatter: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn end_of_input(location: Location) -> Self {
        Self::new("", TokenType::EndOfInput, location)
    }

    pub fn with_frontmatter(mut self, frontmatter: Vec<String>) -> Self {
        self.frontmatter = frontmatter;
        self
    }

    pub fn with_diagnostic(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostics.push(diagnostic);
        self
    }

    pub fn is_type(&self, token_type: TokenType) -> bool {
        self.token_type == token_type
    }

    /// True for an operator token with exactly this text
    pub fn is_operator(&self, op: &str) -> bool {
        self.token_type == TokenType::Operator && self.value == op
    }

    /// True for a keyword token with exactly this text
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.token_type == TokenType::Keyword && self.value == keyword
    }

    pub fn is_end(&self) -> bool {
        self.token_type == TokenType::EndOfInput
    }

    /// Decoded value of a numeric literal token
    pub fn numeric_value(&self) -> Option<NumericLiteral> {
        NumericLiteral::decode(&self.value, self.token_type)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.token_type {
            TokenType::EndOfInput => write!(f, "end of input"),
            _ => write!(f, "{}", self.value),
        }
    }
}

impl SyntaxElement for Token {
    fn location(&self) -> Option<&Location> {
        Some(&self.location)
    }

    fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl Recover for Token {
    fn recover(diagnostic: Diagnostic) -> Self {
        let location = diagnostic.location.clone().unwrap_or_default();
        Token::new("", TokenType::Missing, location).with_diagnostic(diagnostic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recovered_token_is_missing_placeholder() {
        let diagnostic = Diagnostic::new("Missing ';'", Location::new("t", 2, 4));
        let token = Token::recover(diagnostic.clone());
        assert_eq!(token.token_type, TokenType::Missing);
        assert_eq!(token.location, Location::new("t", 2, 4));
        assert_eq!(token.diagnostics, vec![diagnostic]);
    }

    #[test]
    fn test_predicates() {
        let plus = Token::new("+", TokenType::Operator, Location::default());
        assert!(plus.is_operator("+"));
        assert!(!plus.is_operator("-"));
        assert!(!plus.is_keyword("+"));

        let eoi = Token::end_of_input(Location::default());
        assert!(eoi.is_end());
        assert_eq!(eoi.to_string(), "end of input");
    }

    #[test]
    fn test_literal_types() {
        assert!(TokenType::Decimal.is_literal());
        assert!(TokenType::Character.is_literal());
        assert!(!TokenType::Identifier.is_literal());
        assert!(!TokenType::String.is_numeric());
    }
}
