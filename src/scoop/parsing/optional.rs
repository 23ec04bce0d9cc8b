//! Optional productions

use super::node::{substitute, AnyParser};
use super::{PResult, ParseResult, Parser, ParserImpl};
use crate::scoop::error::GrammarError;
use crate::scoop::sequence::Sequence;
use std::sync::Arc;

struct Optional<I, O> {
    inner: Parser<I, O>,
    default: Arc<dyn Fn() -> O + Send + Sync>,
}

impl<I: 'static, O: 'static> ParserImpl<I, O> for Optional<I, O> {
    fn parse(&self, input: &mut dyn Sequence<I>) -> PResult<O> {
        let start = input.mark();
        // fatal lexing errors are never swallowed here
        match self.inner.parse(input)? {
            ParseResult::Success(value) => Ok(ParseResult::Success(value)),
            ParseResult::Failure => {
                input.rewind(start);
                Ok(ParseResult::Success((self.default)()))
            }
        }
    }

    fn kind(&self) -> &'static str {
        "optional"
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
            Parser::new(Optional {
                inner,
                default: Arc::clone(&self.default),
            })
        }))
    }
}

/// Always succeeds: with the value of `inner`, or with `default()` without consuming
pub fn optional<I: 'static, O: 'static>(
    inner: Parser<I, O>,
    default: impl Fn() -> O + Send + Sync + 'static,
) -> Parser<I, O> {
    Parser::new(Optional {
        inner,
        default: Arc::new(default),
    })
}
