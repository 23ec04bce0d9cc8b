//! Late-bound parsers for recursive grammars
//!
//! A deferred parser holds a factory instead of a parser. The factory is called every time
//! the parser runs, so it may refer to productions that did not exist yet when the deferred
//! node was built. Factories must keep returning the same node: rewriting relies on it.

use super::node::{substitute, AnyParser};
use super::{PResult, Parser, ParserImpl};
use crate::scoop::error::GrammarError;
use crate::scoop::sequence::Sequence;
use std::sync::Arc;

type Factory<I, O> = Arc<dyn Fn() -> Parser<I, O> + Send + Sync>;

struct Deferred<I, O> {
    factory: Factory<I, O>,
}

impl<I: 'static, O: 'static> ParserImpl<I, O> for Deferred<I, O> {
    fn parse(&self, input: &mut dyn Sequence<I>) -> PResult<O> {
        (self.factory)().parse(input)
    }

    fn kind(&self) -> &'static str {
        "deferred"
    }

    fn children(&self) -> Vec<AnyParser> {
        vec![(self.factory)().erase()]
    }

    fn replace_child(
        &self,
        find: &AnyParser,
        replacement: &AnyParser,
    ) -> Result<Option<Parser<I, O>>, GrammarError> {
        let target = (self.factory)();
        Ok(substitute(&target, find, replacement)?.map(|target| deferred(move || target.clone())))
    }
}

/// A parser resolved by calling `factory` at parse time
pub fn deferred<I: 'static, O: 'static>(
    factory: impl Fn() -> Parser<I, O> + Send + Sync + 'static,
) -> Parser<I, O> {
    Parser::new(Deferred {
        factory: Arc::new(factory),
    })
}
