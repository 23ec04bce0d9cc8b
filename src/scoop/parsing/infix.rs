//! Left-associative binary operator chains
//!
//!     operand (operator operand)*
//!
//! Once an operator has been consumed the chain is committed: a missing right operand is
//! replaced by a recovered placeholder instead of failing, so `1 +` still yields a binary
//! node with a diagnostic mentioning the `+`.

use super::node::{substitute_or_keep, AnyParser};
use super::{PResult, ParseResult, Parser, ParserImpl, Recover};
use crate::scoop::diagnostics::Diagnostic;
use crate::scoop::error::GrammarError;
use crate::scoop::location::Location;
use crate::scoop::sequence::Sequence;
use std::fmt::Display;
use std::sync::Arc;
use tracing::debug;

type Reduce<O, Op> = Arc<dyn Fn(O, Op, O) -> O + Send + Sync>;
type Missing<O, Op> = Arc<dyn Fn(&Op, Location) -> O + Send + Sync>;

struct Infix<I, O, Op> {
    left: Parser<I, O>,
    operator: Parser<I, Op>,
    right: Parser<I, O>,
    reduce: Reduce<O, Op>,
    missing: Missing<O, Op>,
}

impl<I: 'static, O: 'static, Op: 'static> ParserImpl<I, O> for Infix<I, O, Op> {
    fn parse(&self, input: &mut dyn Sequence<I>) -> PResult<O> {
        let ParseResult::Success(mut accumulated) = self.left.parse(input)? else {
            return Ok(ParseResult::Failure);
        };
        while let ParseResult::Success(operator) = self.operator.parse(input)? {
            let right = match self.right.parse(input)? {
                ParseResult::Success(right) => right,
                ParseResult::Failure => {
                    let location = input.location()?;
                    debug!(%location, "missing right operand");
                    (self.missing)(&operator, location)
                }
            };
            accumulated = (self.reduce)(accumulated, operator, right);
        }
        Ok(ParseResult::Success(accumulated))
    }

    fn kind(&self) -> &'static str {
        "infix"
    }

    fn children(&self) -> Vec<AnyParser> {
        vec![self.left.erase(), self.operator.erase(), self.right.erase()]
    }

    fn replace_child(
        &self,
        find: &AnyParser,
        replacement: &AnyParser,
    ) -> Result<Option<Parser<I, O>>, GrammarError> {
        let (left, l) = substitute_or_keep(&self.left, find, replacement)?;
        let (operator, o) = substitute_or_keep(&self.operator, find, replacement)?;
        let (right, r) = substitute_or_keep(&self.right, find, replacement)?;
        Ok((l || o || r).then(|| {
            Parser::new(Infix {
                left,
                operator,
                right,
                reduce: Arc::clone(&self.reduce),
                missing: Arc::clone(&self.missing),
            })
        }))
    }
}

/// Left-associative chain of `operand`s joined by `operator`, folded with `reduce`
pub fn infix<I: 'static, O: Recover + 'static, Op: Display + 'static>(
    operand: Parser<I, O>,
    operator: Parser<I, Op>,
    reduce: impl Fn(O, Op, O) -> O + Send + Sync + 'static,
) -> Parser<I, O> {
    infix_with(operand.clone(), operator, operand, reduce, |operator, location| {
        O::recover(Diagnostic::new(
            format!("Expected expression after operator '{operator}'"),
            location,
        ))
    })
}

/// Fully general form of [`infix`] with distinct operands and a custom placeholder
pub fn infix_with<I: 'static, O: 'static, Op: 'static>(
    left: Parser<I, O>,
    operator: Parser<I, Op>,
    right: Parser<I, O>,
    reduce: impl Fn(O, Op, O) -> O + Send + Sync + 'static,
    missing: impl Fn(&Op, Location) -> O + Send + Sync + 'static,
) -> Parser<I, O> {
    Parser::new(Infix {
        left,
        operator,
        right,
        reduce: Arc::new(reduce),
        missing: Arc::new(missing),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoop::parsing::matching;

    #[derive(Debug, Clone, PartialEq)]
    enum Calc {
        Num(i64),
        Missing(String),
    }

    impl Recover for Calc {
        fn recover(diagnostic: Diagnostic) -> Self {
            Calc::Missing(diagnostic.message)
        }
    }

    fn sum() -> Parser<char, Calc> {
        let digit = matching(|c: &char| c.is_ascii_digit())
            .map(|c| Calc::Num(c.to_digit(10).map(i64::from).unwrap_or(0)));
        infix(digit, matching(|c: &char| *c == '-'), |l, _, r| match (l, r) {
            (Calc::Num(l), Calc::Num(r)) => Calc::Num(l - r),
            (_, missing @ Calc::Missing(_)) | (missing @ Calc::Missing(_), _) => missing,
        })
    }

    #[test]
    fn test_left_associative() {
        assert_eq!(
            sum().parse_chars("9-3-2").unwrap(),
            ParseResult::Success(Calc::Num(4))
        );
    }

    #[test]
    fn test_missing_right_operand_recovers() {
        assert_eq!(
            sum().parse_chars("9-").unwrap(),
            ParseResult::Success(Calc::Missing(
                "Expected expression after operator '-'".to_string()
            ))
        );
        assert_eq!(sum().parse_chars("-").unwrap(), ParseResult::Failure);
    }
}
