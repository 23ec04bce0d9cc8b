//! Mapping successful values

use super::node::{substitute, AnyParser};
use super::{PResult, Parser, ParserImpl};
use crate::scoop::error::GrammarError;
use crate::scoop::sequence::Sequence;
use std::sync::Arc;

type MapFn<X, O> = Arc<dyn Fn(X) -> O + Send + Sync>;

struct Transform<I, X, O> {
    inner: Parser<I, X>,
    f: MapFn<X, O>,
}

impl<I: 'static, X: 'static, O: 'static> ParserImpl<I, O> for Transform<I, X, O> {
    fn parse(&self, input: &mut dyn Sequence<I>) -> PResult<O> {
        Ok(self.inner.parse(input)?.map(|value| (self.f)(value)))
    }

    fn kind(&self) -> &'static str {
        "transform"
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
            Parser::new(Transform {
                inner,
                f: Arc::clone(&self.f),
            })
        }))
    }
}

/// Applies `f` to the value of `inner` when it succeeds
pub fn transform<I: 'static, X: 'static, O: 'static>(
    inner: Parser<I, X>,
    f: impl Fn(X) -> O + Send + Sync + 'static,
) -> Parser<I, O> {
    Parser::new(Transform {
        inner,
        f: Arc::new(f),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoop::parsing::{matching, ParseResult};

    #[test]
    fn test_maps_success_only() {
        let digit = transform(matching(|c: &char| c.is_ascii_digit()), |c| {
            c.to_digit(10).unwrap_or(0)
        });
        assert_eq!(digit.parse_chars("7").unwrap(), ParseResult::Success(7));
        assert_eq!(digit.parse_chars("x").unwrap(), ParseResult::Failure);
    }
}
