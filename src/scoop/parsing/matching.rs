//! Single-item parsers

use super::{PResult, ParseResult, Parser, ParserImpl};
use crate::scoop::sequence::Sequence;
use std::sync::Arc;

type Predicate<I> = Arc<dyn Fn(&I) -> bool + Send + Sync>;

struct Match<I> {
    predicate: Predicate<I>,
    allow_end: bool,
}

impl<I: Clone + 'static> ParserImpl<I, I> for Match<I> {
    fn parse(&self, input: &mut dyn Sequence<I>) -> PResult<I> {
        if !self.allow_end && input.is_at_end()? {
            return Ok(ParseResult::Failure);
        }
        let next = input.peek()?;
        if !(self.predicate)(&next) {
            return Ok(ParseResult::Failure);
        }
        Ok(ParseResult::Success(input.get_next()?))
    }

    fn kind(&self) -> &'static str {
        "match"
    }
}

struct End;

impl<I: 'static> ParserImpl<I, ()> for End {
    fn parse(&self, input: &mut dyn Sequence<I>) -> PResult<()> {
        Ok(if input.is_at_end()? {
            ParseResult::Success(())
        } else {
            ParseResult::Failure
        })
    }

    fn kind(&self) -> &'static str {
        "end"
    }
}

/// Consumes one item when `predicate` accepts it
///
/// The end-of-input sentinel is offered to the predicate like any other item; it is never
/// consumed past, so matching it leaves the input at the end.
pub fn matching<I: Clone + 'static>(
    predicate: impl Fn(&I) -> bool + Send + Sync + 'static,
) -> Parser<I, I> {
    Parser::new(Match {
        predicate: Arc::new(predicate),
        allow_end: true,
    })
}

/// Consumes any one item; fails at end of input
pub fn any<I: Clone + 'static>() -> Parser<I, I> {
    Parser::new(Match {
        predicate: Arc::new(|_: &I| true),
        allow_end: false,
    })
}

/// Succeeds without consuming when the input is exhausted
pub fn end<I: 'static>() -> Parser<I, ()> {
    Parser::new(End)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoop::sequence::{CharacterSequence, Sequence};

    #[test]
    fn test_match_consumes_one() {
        let a = matching(|c: &char| *c == 'a');
        let mut chars = CharacterSequence::new("ab");
        assert_eq!(a.parse(&mut chars).unwrap(), ParseResult::Success('a'));
        assert_eq!(a.parse(&mut chars).unwrap(), ParseResult::Failure);
        assert_eq!(chars.peek().unwrap(), 'b');
    }

    #[test]
    fn test_any_and_end() {
        let mut chars = CharacterSequence::new("x");
        assert_eq!(end::<char>().parse(&mut chars).unwrap(), ParseResult::Failure);
        assert_eq!(any::<char>().parse(&mut chars).unwrap(), ParseResult::Success('x'));
        assert_eq!(any::<char>().parse(&mut chars).unwrap(), ParseResult::Failure);
        assert_eq!(end::<char>().parse(&mut chars).unwrap(), ParseResult::Success(()));
    }
}
