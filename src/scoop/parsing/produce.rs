//! Zero-width parsers

use super::{PResult, ParseResult, Parser, ParserImpl};
use crate::scoop::sequence::Sequence;
use std::sync::Arc;

struct Produce<O> {
    value: Arc<dyn Fn() -> O + Send + Sync>,
}

impl<I: 'static, O: 'static> ParserImpl<I, O> for Produce<O> {
    fn parse(&self, _input: &mut dyn Sequence<I>) -> PResult<O> {
        Ok(ParseResult::Success((self.value)()))
    }

    fn kind(&self) -> &'static str {
        "produce"
    }
}

struct Fail;

impl<I: 'static, O: 'static> ParserImpl<I, O> for Fail {
    fn parse(&self, _input: &mut dyn Sequence<I>) -> PResult<O> {
        Ok(ParseResult::Failure)
    }

    fn kind(&self) -> &'static str {
        "fail"
    }
}

/// Always succeeds with a fresh value, consuming nothing
pub fn produce<I: 'static, O: 'static>(
    value: impl Fn() -> O + Send + Sync + 'static,
) -> Parser<I, O> {
    Parser::new(Produce {
        value: Arc::new(value),
    })
}

/// Always fails
pub fn fail<I: 'static, O: 'static>() -> Parser<I, O> {
    Parser::new(Fail)
}
