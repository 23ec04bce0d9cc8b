//! Parser combinator engine
//!
//! A grammar is a graph of immutable parser nodes. Each node reads from a
//! [`Sequence`](crate::scoop::sequence::Sequence) of input items (characters or tokens) and
//! either succeeds with a value or fails without consuming anything. Grammars are assembled
//! once and then reused for any number of parses; nodes never hold per-parse state.
//!
//! ## Results
//!
//! Every parse returns `Result<ParseResult<T>, LexError>`:
//!
//! - `Ok(ParseResult::Success(value))`: the production matched.
//! - `Ok(ParseResult::Failure)`: it did not. This is ordinary control flow consumed by
//!   alternation and optionality, never an error.
//! - `Err(LexError)`: the input could not be tokenized. Fatal; unwinds the whole parse.
//!
//! Syntax errors are a fourth, separate path: [`required`] turns a failure into a successful
//! placeholder value that carries a [`Diagnostic`](crate::scoop::diagnostics::Diagnostic).
//!
//! ## Combinators
//!
//!     transform / map    map a successful value
//!     matching / any     one item satisfying a predicate
//!     end                zero-width end of input
//!     rule / sequence_of all-or-nothing sequences, rewound on failure
//!     first              ordered alternation
//!     optional           success with a default instead of failure
//!     list               zero-or-more / one-or-more
//!     separated_list     item (separator item)*
//!     required           failure becomes a placeholder plus diagnostic
//!     infix              left-associative operator chains that degrade gracefully
//!     apply_postfix      iterative postfix chains without left recursion
//!     deferred           parser resolved at parse time, for recursive grammars
//!     Replaceable        single-assignment slot, bound once during assembly
//!     produce / fail     zero-width building blocks
//!
//! ## Rewriting
//!
//! Every node exposes its children and can rebuild itself with one child substituted. The
//! [rewriting] module uses this to derive a new grammar from an existing one (see
//! [`Parser::replace_named`]) without touching the original.

pub mod deferred;
pub mod first;
pub mod infix;
pub mod list;
pub mod matching;
pub mod named;
pub mod node;
pub mod optional;
pub mod postfix;
pub mod produce;
pub mod replaceable;
pub mod required;
pub mod rewriting;
pub mod rule;
pub mod transform;

pub use deferred::deferred;
pub use first::first;
pub use infix::{infix, infix_with};
pub use list::{list, separated_list};
pub use matching::{any, end, matching};
pub use named::named;
pub use node::{AnyParser, GrammarNode, Resolver};
pub use optional::optional;
pub use postfix::apply_postfix;
pub use produce::{fail, produce};
pub use replaceable::Replaceable;
pub use required::{required, required_with, Recover};
pub use rule::{rule, sequence_of, RuleParsers};
pub use transform::transform;

use crate::scoop::error::{GrammarError, LexResult};
use crate::scoop::sequence::{CharacterSequence, Sequence, TokenSequence};
use crate::scoop::token::Token;
use std::fmt;
use std::sync::Arc;

/// Outcome of one parse attempt. There is no partial success.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseResult<T> {
    Success(T),
    Failure,
}

impl<T> ParseResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ParseResult::Success(_))
    }

    pub fn value(self) -> Option<T> {
        match self {
            ParseResult::Success(value) => Some(value),
            ParseResult::Failure => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ParseResult<U> {
        match self {
            ParseResult::Success(value) => ParseResult::Success(f(value)),
            ParseResult::Failure => ParseResult::Failure,
        }
    }
}

/// What every parse entry point returns
pub type PResult<T> = LexResult<ParseResult<T>>;

/// The behavior behind a [`Parser`] handle
///
/// Implementations must be atomic: when `parse` returns `Failure`, the input is where it was
/// before the call.
pub trait ParserImpl<I, O>: Send + Sync {
    fn parse(&self, input: &mut dyn Sequence<I>) -> PResult<O>;

    /// Short description of the combinator, used in debug output
    fn kind(&self) -> &'static str;

    fn name(&self) -> Option<&str> {
        None
    }

    fn children(&self) -> Vec<AnyParser> {
        Vec::new()
    }

    /// A copy of this node with every occurrence of `find` among its direct children
    /// replaced by `replacement`, or `None` when `find` is not a direct child
    fn replace_child(
        &self,
        _find: &AnyParser,
        _replacement: &AnyParser,
    ) -> Result<Option<Parser<I, O>>, GrammarError> {
        Ok(None)
    }
}

/// A shared handle to a parser node
pub struct Parser<I, O> {
    inner: Arc<dyn ParserImpl<I, O>>,
}

impl<I, O> Clone for Parser<I, O> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<I: 'static, O: 'static> Parser<I, O> {
    pub fn new(node: impl ParserImpl<I, O> + 'static) -> Self {
        Self {
            inner: Arc::new(node),
        }
    }

    pub(crate) fn from_arc(inner: Arc<dyn ParserImpl<I, O>>) -> Self {
        Self { inner }
    }

    pub fn parse(&self, input: &mut dyn Sequence<I>) -> PResult<O> {
        self.inner.parse(input)
    }

    /// Identity of the underlying node; clones of a handle share it
    pub fn id(&self) -> usize {
        Arc::as_ptr(&self.inner) as *const () as usize
    }

    pub fn kind(&self) -> &'static str {
        self.inner.kind()
    }

    pub fn name(&self) -> Option<&str> {
        self.inner.name()
    }

    pub fn children(&self) -> Vec<AnyParser> {
        self.inner.children()
    }

    /// Type-erased view of this parser, for traversal and rewriting
    pub fn erase(&self) -> AnyParser {
        AnyParser::new(self.clone())
    }

    pub fn map<U: 'static>(self, f: impl Fn(O) -> U + Send + Sync + 'static) -> Parser<I, U> {
        transform(self, f)
    }

    pub fn named(self, name: &str) -> Parser<I, O> {
        named(name, self)
    }

    pub fn optional(self, default: impl Fn() -> O + Send + Sync + 'static) -> Parser<I, O> {
        optional(self, default)
    }

    pub fn list(self, at_least_one: bool) -> Parser<I, Vec<O>> {
        list(self, at_least_one)
    }

    /// Every node reachable from this one, each once, in pre-order
    pub fn descendants(&self) -> Vec<AnyParser> {
        rewriting::descendants(&self.erase())
    }

    /// The first node named `name`, erased
    pub fn find_named(&self, name: &str) -> Option<AnyParser> {
        rewriting::find_named(&self.erase(), name)
    }

    /// The first node named `name`, if it produces `X`
    pub fn find_parser<X: 'static>(&self, name: &str) -> Option<Parser<I, X>> {
        self.find_named(name)?.downcast::<I, X>()
    }

    /// A new grammar in which every node matching `predicate` is `replacement`
    ///
    /// The original grammar is left untouched and stays usable.
    pub fn replace_where(
        &self,
        predicate: impl Fn(&AnyParser) -> bool,
        replacement: &AnyParser,
    ) -> Result<Parser<I, O>, GrammarError> {
        let root = rewriting::replace(&self.erase(), predicate, replacement)?;
        root.downcast::<I, O>()
            .ok_or_else(|| GrammarError::TypeMismatch {
                expected: std::any::type_name::<O>(),
                found: root.output_type(),
            })
    }

    /// A new grammar in which the node named `name` is `replacement`
    pub fn replace_named<X: 'static>(
        &self,
        name: &str,
        replacement: Parser<I, X>,
    ) -> Result<Parser<I, O>, GrammarError> {
        if self.find_named(name).is_none() {
            return Err(GrammarError::NotFound(name.to_string()));
        }
        self.replace_where(|node| node.name() == Some(name), &replacement.erase())
    }
}

impl<I: 'static, O: 'static> Parser<I, O>
where
    O: Recover,
{
    pub fn required(self, message: &str) -> Parser<I, O> {
        required(self, message)
    }
}

impl<O: 'static> Parser<Token, O> {
    /// Tokenizes `text` and parses the tokens
    pub fn parse_str(&self, text: &str) -> PResult<O> {
        let mut tokens = TokenSequence::from_source(text);
        self.parse(&mut tokens)
    }
}

impl<O: 'static> Parser<char, O> {
    /// Parses the characters of `text` directly
    pub fn parse_chars(&self, text: &str) -> PResult<O> {
        let mut chars = CharacterSequence::new(text);
        self.parse(&mut chars)
    }
}

impl<I, O> fmt::Debug for Parser<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.name() {
            Some(name) => write!(f, "Parser({} '{}')", self.inner.kind(), name),
            None => write!(f, "Parser({})", self.inner.kind()),
        }
    }
}
