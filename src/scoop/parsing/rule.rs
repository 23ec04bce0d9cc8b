//! All-or-nothing sequences
//!
//! A rule runs its parsers in order and succeeds only when every one of them does. On any
//! failure the input is rewound to where the rule started, so a rule never consumes on
//! failure even when its first few parts matched.
//!
//!     rule((keyword("return"), expression(), operator(";")), |(kw, value, semi)| ...)
//!
//! Rules over tuples of two to eight parsers are supported; [`sequence_of`] covers any
//! number of parsers sharing one output type.

use super::node::{substitute_or_keep, AnyParser};
use super::{PResult, ParseResult, Parser, ParserImpl};
use crate::scoop::error::GrammarError;
use crate::scoop::sequence::Sequence;
use std::marker::PhantomData;
use std::sync::Arc;

/// A fixed group of parsers run in order by [`rule`]
pub trait RuleParsers<I>: Send + Sync + Sized + 'static {
    type Output;

    /// Runs every parser in order, stopping at the first failure
    fn parse_all(&self, input: &mut dyn Sequence<I>) -> PResult<Self::Output>;

    fn erase_all(&self) -> Vec<AnyParser>;

    fn substitute_all(
        &self,
        find: &AnyParser,
        replacement: &AnyParser,
    ) -> Result<Option<Self>, GrammarError>;
}

macro_rules! rule_parsers {
    ($($part:ident $index:tt),+) => {
        impl<I: 'static, $($part: 'static),+> RuleParsers<I> for ($(Parser<I, $part>,)+) {
            type Output = ($($part,)+);

            fn parse_all(&self, input: &mut dyn Sequence<I>) -> PResult<Self::Output> {
                Ok(ParseResult::Success(($(
                    match self.$index.parse(input)? {
                        ParseResult::Success(value) => value,
                        ParseResult::Failure => return Ok(ParseResult::Failure),
                    },
                )+)))
            }

            fn erase_all(&self) -> Vec<AnyParser> {
                vec![$(self.$index.erase()),+]
            }

            fn substitute_all(
                &self,
                find: &AnyParser,
                replacement: &AnyParser,
            ) -> Result<Option<Self>, GrammarError> {
                let mut changed = false;
                let parsers = ($(
                    {
                        let (parser, replaced) =
                            substitute_or_keep(&self.$index, find, replacement)?;
                        changed |= replaced;
                        parser
                    },
                )+);
                Ok(changed.then_some(parsers))
            }
        }
    };
}

rule_parsers!(A 0, B 1);
rule_parsers!(A 0, B 1, C 2);
rule_parsers!(A 0, B 1, C 2, D 3);
rule_parsers!(A 0, B 1, C 2, D 3, E 4);
rule_parsers!(A 0, B 1, C 2, D 3, E 4, F 5);
rule_parsers!(A 0, B 1, C 2, D 3, E 4, F 5, G 6);
rule_parsers!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);

type Reducer<T, O> = Arc<dyn Fn(T) -> O + Send + Sync>;

struct Rule<I, P: RuleParsers<I>, O> {
    parsers: P,
    reduce: Reducer<P::Output, O>,
    items: PhantomData<fn() -> I>,
}

impl<I: 'static, P: RuleParsers<I>, O: 'static> ParserImpl<I, O> for Rule<I, P, O> {
    fn parse(&self, input: &mut dyn Sequence<I>) -> PResult<O> {
        let start = input.mark();
        match self.parsers.parse_all(input)? {
            ParseResult::Success(values) => Ok(ParseResult::Success((self.reduce)(values))),
            ParseResult::Failure => {
                input.rewind(start);
                Ok(ParseResult::Failure)
            }
        }
    }

    fn kind(&self) -> &'static str {
        "rule"
    }

    fn children(&self) -> Vec<AnyParser> {
        self.parsers.erase_all()
    }

    fn replace_child(
        &self,
        find: &AnyParser,
        replacement: &AnyParser,
    ) -> Result<Option<Parser<I, O>>, GrammarError> {
        Ok(self
            .parsers
            .substitute_all(find, replacement)?
            .map(|parsers| {
                Parser::new(Rule {
                    parsers,
                    reduce: Arc::clone(&self.reduce),
                    items: PhantomData,
                })
            }))
    }
}

/// Runs a tuple of parsers in order and reduces their values with `reduce`
pub fn rule<I: 'static, P: RuleParsers<I>, O: 'static>(
    parsers: P,
    reduce: impl Fn(P::Output) -> O + Send + Sync + 'static,
) -> Parser<I, O> {
    Parser::new(Rule {
        parsers,
        reduce: Arc::new(reduce),
        items: PhantomData,
    })
}

struct SequenceOf<I, O> {
    parsers: Vec<Parser<I, O>>,
}

impl<I: 'static, O: 'static> ParserImpl<I, Vec<O>> for SequenceOf<I, O> {
    fn parse(&self, input: &mut dyn Sequence<I>) -> PResult<Vec<O>> {
        let start = input.mark();
        let mut values = Vec::with_capacity(self.parsers.len());
        for parser in &self.parsers {
            match parser.parse(input)? {
                ParseResult::Success(value) => values.push(value),
                ParseResult::Failure => {
                    input.rewind(start);
                    return Ok(ParseResult::Failure);
                }
            }
        }
        Ok(ParseResult::Success(values))
    }

    fn kind(&self) -> &'static str {
        "sequence"
    }

    fn children(&self) -> Vec<AnyParser> {
        self.parsers.iter().map(Parser::erase).collect()
    }

    fn replace_child(
        &self,
        find: &AnyParser,
        replacement: &AnyParser,
    ) -> Result<Option<Parser<I, Vec<O>>>, GrammarError> {
        let mut changed = false;
        let mut parsers = Vec::with_capacity(self.parsers.len());
        for parser in &self.parsers {
            let (parser, replaced) = substitute_or_keep(parser, find, replacement)?;
            changed |= replaced;
            parsers.push(parser);
        }
        Ok(changed.then(|| Parser::new(SequenceOf { parsers })))
    }
}

/// Runs `parsers` in order, collecting their values; all-or-nothing like [`rule`]
pub fn sequence_of<I: 'static, O: 'static>(parsers: Vec<Parser<I, O>>) -> Parser<I, Vec<O>> {
    Parser::new(SequenceOf { parsers })
}
