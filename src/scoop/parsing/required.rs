//! Error recovery
//!
//! A required production never fails. When its parser does not match, it succeeds anyway
//! with a placeholder value carrying a diagnostic, located where the production was expected,
//! and consumes nothing. Parsing then carries on from the same position.

use super::node::{substitute, AnyParser};
use super::{PResult, ParseResult, Parser, ParserImpl};
use crate::scoop::diagnostics::Diagnostic;
use crate::scoop::error::GrammarError;
use crate::scoop::sequence::Sequence;
use std::sync::Arc;
use tracing::debug;

/// Types that can stand in for a production that was not found
pub trait Recover {
    /// A placeholder value carrying `diagnostic`
    fn recover(diagnostic: Diagnostic) -> Self;
}

type RecoverFn<O> = Arc<dyn Fn(Diagnostic) -> O + Send + Sync>;

struct Required<I, O> {
    inner: Parser<I, O>,
    message: Arc<str>,
    recover: RecoverFn<O>,
}

impl<I: 'static, O: 'static> ParserImpl<I, O> for Required<I, O> {
    fn parse(&self, input: &mut dyn Sequence<I>) -> PResult<O> {
        if let ParseResult::Success(value) = self.inner.parse(input)? {
            return Ok(ParseResult::Success(value));
        }
        let location = input.location()?;
        debug!(%location, message = %self.message, "recovering from missing production");
        let diagnostic = Diagnostic::new(self.message.as_ref(), location);
        Ok(ParseResult::Success((self.recover)(diagnostic)))
    }

    fn kind(&self) -> &'static str {
        "required"
    }

    fn children(&self) -> Vec<AnyParser> {
        vec![self.inner.erase()]
    }

    fn replace_child(
        &self,
        find: &AnyParser,
        replacement: &AnyParser,
    ) -> Result<Option<Parser<I, O>>, GrammarError> {
        Ok(substitute(&self.inner, find, replacement)?.map(|inner| {
            Parser::new(Required {
                inner,
                message: Arc::clone(&self.message),
                recover: Arc::clone(&self.recover),
            })
        }))
    }
}

/// `inner`, or a recovered placeholder carrying `message`
pub fn required<I: 'static, O: Recover + 'static>(
    inner: Parser<I, O>,
    message: &str,
) -> Parser<I, O> {
    required_with(inner, message, O::recover)
}

/// Like [`required`], building the placeholder with `recover`
pub fn required_with<I: 'static, O: 'static>(
    inner: Parser<I, O>,
    message: &str,
    recover: impl Fn(Diagnostic) -> O + Send + Sync + 'static,
) -> Parser<I, O> {
    Parser::new(Required {
        inner,
        message: Arc::from(message),
        recover: Arc::new(recover),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoop::location::Location;
    use crate::scoop::parsing::matching;
    use crate::scoop::error::LexError;
    use crate::scoop::token::Token;
    use crate::scoop::sequence::CharacterSequence;

    #[test]
    fn test_missing_production_is_located_and_consumes_nothing() {
        let semicolon = required_with(
            matching(|c: &char| *c == ';').map(String::from),
            "Missing ';'",
            |diagnostic| diagnostic.to_string(),
        );
        let mut chars = CharacterSequence::named("t.scoop", "x");
        assert_eq!(
            semicolon.parse(&mut chars).unwrap(),
            ParseResult::Success("t.scoop:1:1: Missing ';'".to_string())
        );
        assert_eq!(chars.consumed(), 0);
    }

    #[test]
    fn test_recover_trait() {
        #[derive(Debug, PartialEq)]
        struct Hole(Diagnostic);
        impl Recover for Hole {
            fn recover(diagnostic: Diagnostic) -> Self {
                Hole(diagnostic)
            }
        }
        let p = required(
            matching(|c: &char| *c == 'x').map(|_| Hole(Diagnostic::unlocated("-"))),
            "Expected x",
        );
        assert_eq!(
            p.parse_chars("y").unwrap(),
            ParseResult::Success(Hole(Diagnostic::new(
                "Expected x",
                Location::new("<input>", 1, 1)
            )))
        );
    }

    #[test]
    fn test_fatal_errors_are_not_recovered() {
        let semicolon = required(
            matching(|token: &Token| token.is_operator(";")),
            "Expected ';'",
        );
        assert!(matches!(
            semicolon.parse_str("\"open"),
            Err(LexError::UnterminatedString { .. })
        ));
    }
}
