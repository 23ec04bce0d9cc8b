//! Postfix chains without left recursion
//!
//! `a.b(c)[d]` is parsed as: an initial value `a`, then postfix productions applied one at a
//! time, each seeing the value built so far. The postfix grammar is written against a
//! placeholder parser standing for "the value so far":
//!
//!     apply_postfix(primary, |left| first(vec![
//!         rule((left.clone(), operator("."), identifier()), member_access),
//!         rule((left, operator("("), arguments(), operator(")")), invoke),
//!     ]))
//!
//! The placeholder consumes nothing and yields the current value. Values are kept on a
//! per-thread stack so one grammar can be shared by concurrent and nested parses.

use super::node::{substitute_or_keep, AnyParser};
use super::{PResult, ParseResult, Parser, ParserImpl};
use crate::scoop::error::GrammarError;
use crate::scoop::sequence::Sequence;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};

struct LeftValue<O> {
    stacks: Mutex<HashMap<ThreadId, Vec<O>>>,
}

impl<O> LeftValue<O> {
    fn new() -> Self {
        Self {
            stacks: Mutex::new(HashMap::new()),
        }
    }

    fn stacks(&self) -> MutexGuard<'_, HashMap<ThreadId, Vec<O>>> {
        self.stacks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, value: O) {
        self.stacks()
            .entry(thread::current().id())
            .or_default()
            .push(value);
    }

    fn pop(&self) {
        let mut stacks = self.stacks();
        let id = thread::current().id();
        if let Some(stack) = stacks.get_mut(&id) {
            stack.pop();
            if stack.is_empty() {
                stacks.remove(&id);
            }
        }
    }
}

impl<O: Clone + Send> LeftValue<O> {
    fn current(&self) -> Option<O> {
        self.stacks()
            .get(&thread::current().id())
            .and_then(|stack| stack.last().cloned())
    }
}

impl<I: 'static, O: Clone + Send + 'static> ParserImpl<I, O> for LeftValue<O> {
    fn parse(&self, _input: &mut dyn Sequence<I>) -> PResult<O> {
        Ok(match self.current() {
            Some(value) => ParseResult::Success(value),
            None => ParseResult::Failure,
        })
    }

    fn kind(&self) -> &'static str {
        "left value"
    }
}

struct ApplyPostfix<I, O> {
    initial: Parser<I, O>,
    postfix: Parser<I, O>,
    left: Arc<LeftValue<O>>,
}

impl<I: 'static, O: Clone + Send + 'static> ParserImpl<I, O> for ApplyPostfix<I, O> {
    fn parse(&self, input: &mut dyn Sequence<I>) -> PResult<O> {
        let ParseResult::Success(mut current) = self.initial.parse(input)? else {
            return Ok(ParseResult::Failure);
        };
        loop {
            let before = input.consumed();
            self.left.push(current.clone());
            let applied = self.postfix.parse(input);
            self.left.pop();
            match applied? {
                ParseResult::Success(next) => current = next,
                ParseResult::Failure => break,
            }
            if input.consumed() == before {
                break;
            }
        }
        Ok(ParseResult::Success(current))
    }

    fn kind(&self) -> &'static str {
        "postfix"
    }

    fn children(&self) -> Vec<AnyParser> {
        vec![self.initial.erase(), self.postfix.erase()]
    }

    fn replace_child(
        &self,
        find: &AnyParser,
        replacement: &AnyParser,
    ) -> Result<Option<Parser<I, O>>, GrammarError> {
        let (initial, i) = substitute_or_keep(&self.initial, find, replacement)?;
        let (postfix, p) = substitute_or_keep(&self.postfix, find, replacement)?;
        Ok((i || p).then(|| {
            Parser::new(ApplyPostfix {
                initial,
                postfix,
                left: Arc::clone(&self.left),
            })
        }))
    }
}

/// Parses `initial`, then applies the postfix grammar built by `postfix` until it stops
/// matching
///
/// `postfix` receives the placeholder parser for the value built so far.
pub fn apply_postfix<I: 'static, O: Clone + Send + 'static>(
    initial: Parser<I, O>,
    postfix: impl FnOnce(Parser<I, O>) -> Parser<I, O>,
) -> Parser<I, O> {
    let left = Arc::new(LeftValue::new());
    let placeholder = Parser::from_arc(Arc::clone(&left) as Arc<dyn ParserImpl<I, O>>);
    Parser::new(ApplyPostfix {
        initial,
        postfix: postfix(placeholder),
        left,
    })
}
