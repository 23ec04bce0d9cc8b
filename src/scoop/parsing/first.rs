//! Ordered alternation

use super::node::{substitute_or_keep, AnyParser};
use super::{PResult, ParseResult, Parser, ParserImpl};
use crate::scoop::error::GrammarError;
use crate::scoop::sequence::Sequence;

struct First<I, O> {
    alternatives: Vec<Parser<I, O>>,
}

impl<I: 'static, O: 'static> ParserImpl<I, O> for First<I, O> {
    fn parse(&self, input: &mut dyn Sequence<I>) -> PResult<O> {
        for alternative in &self.alternatives {
            if let ParseResult::Success(value) = alternative.parse(input)? {
                return Ok(ParseResult::Success(value));
            }
        }
        Ok(ParseResult::Failure)
    }

    fn kind(&self) -> &'static str {
        "first"
    }

    fn children(&self) -> Vec<AnyParser> {
        self.alternatives.iter().map(Parser::erase).collect()
    }

    fn replace_child(
        &self,
        find: &AnyParser,
        replacement: &AnyParser,
    ) -> Result<Option<Parser<I, O>>, GrammarError> {
        let mut changed = false;
        let mut alternatives = Vec::with_capacity(self.alternatives.len());
        for alternative in &self.alternatives {
            let (parser, replaced) = substitute_or_keep(alternative, find, replacement)?;
            changed |= replaced;
            alternatives.push(parser);
        }
        Ok(changed.then(|| Parser::new(First { alternatives })))
    }
}

/// Tries each alternative in order and returns the first success
///
/// Alternatives rely on each other being atomic: a failed alternative leaves the input
/// untouched for the next one.
pub fn first<I: 'static, O: 'static>(alternatives: Vec<Parser<I, O>>) -> Parser<I, O> {
    Parser::new(First { alternatives })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoop::parsing::{matching, rule};
    use crate::scoop::error::LexError;
    use crate::scoop::token::Token;

    #[test]
    fn test_first_success_wins() {
        let ab = rule(
            (
                matching(|c: &char| *c == 'a'),
                matching(|c: &char| *c == 'b'),
            ),
            |_| "ab",
        );
        let a = matching(|c: &char| *c == 'a').map(|_| "a");
        let p = first(vec![ab, a]);
        assert_eq!(p.parse_chars("ab").unwrap(), ParseResult::Success("ab"));
        assert_eq!(p.parse_chars("ac").unwrap(), ParseResult::Success("a"));
        assert_eq!(p.parse_chars("c").unwrap(), ParseResult::Failure);
    }

    #[test]
    fn test_empty_first_fails() {
        let p: Parser<char, char> = first(Vec::new());
        assert_eq!(p.parse_chars("a").unwrap(), ParseResult::Failure);
    }

    #[test]
    fn test_fatal_error_stops_alternation() {
        let either = first(vec![
            matching(|token: &Token| token.is_operator(";")),
            matching(|token: &Token| !token.is_end()),
        ]);
        assert!(matches!(
            either.parse_str("\"open"),
            Err(LexError::UnterminatedString { .. })
        ));
    }
}
