//! Named grammar nodes
//!
//! Names exist for lookup during rewriting and for debug output; they do not change what
//! a parser accepts.

use super::node::{substitute, AnyParser};
use super::{PResult, Parser, ParserImpl};
use crate::scoop::error::GrammarError;
use crate::scoop::sequence::Sequence;
use std::sync::Arc;

struct Named<I, O> {
    name: Arc<str>,
    inner: Parser<I, O>,
}

impl<I: 'static, O: 'static> ParserImpl<I, O> for Named<I, O> {
    fn parse(&self, input: &mut dyn Sequence<I>) -> PResult<O> {
        self.inner.parse(input)
    }

    fn kind(&self) -> &'static str {
        "named"
    }

    fn name(&self) -> Option<&str> {
        Some(&*self.name)
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
            Parser::new(Named {
                name: Arc::clone(&self.name),
                inner,
            })
        }))
    }
}

pub fn named<I: 'static, O: 'static>(name: &str, inner: Parser<I, O>) -> Parser<I, O> {
    Parser::new(Named {
        name: Arc::from(name),
        inner,
    })
}
