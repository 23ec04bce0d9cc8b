//! Single-assignment parser slots
//!
//! A [`Replaceable`] is a named hole in a grammar. It parses with its default until it is
//! bound, and can be bound exactly once. Grammar layers use it to refer to a production of
//! the grammar they are being spliced into, which only exists after the splice.

use super::node::{substitute, AnyParser};
use super::{PResult, Parser, ParserImpl};
use crate::scoop::error::GrammarError;
use crate::scoop::sequence::Sequence;
use std::sync::{Arc, OnceLock};
use tracing::debug;

struct Slot<I, O> {
    name: Arc<str>,
    default: Parser<I, O>,
    target: OnceLock<Parser<I, O>>,
}

impl<I: 'static, O: 'static> Slot<I, O> {
    fn current(&self) -> &Parser<I, O> {
        self.target.get().unwrap_or(&self.default)
    }

    fn bound_to(&self, target: Parser<I, O>) -> Parser<I, O> {
        Parser::new(Slot {
            name: Arc::clone(&self.name),
            default: self.default.clone(),
            target: OnceLock::from(target),
        })
    }
}

impl<I: 'static, O: 'static> ParserImpl<I, O> for Slot<I, O> {
    fn parse(&self, input: &mut dyn Sequence<I>) -> PResult<O> {
        self.current().parse(input)
    }

    fn kind(&self) -> &'static str {
        "replaceable"
    }

    fn name(&self) -> Option<&str> {
        Some(&*self.name)
    }

    fn children(&self) -> Vec<AnyParser> {
        vec![self.current().erase()]
    }

    fn replace_child(
        &self,
        find: &AnyParser,
        replacement: &AnyParser,
    ) -> Result<Option<Parser<I, O>>, GrammarError> {
        Ok(substitute(self.current(), find, replacement)?.map(|target| self.bound_to(target)))
    }
}

/// Handle to a single-assignment slot
///
/// [`parser`](Self::parser) is what goes into the grammar; [`bind`](Self::bind) fills the
/// slot later.
pub struct Replaceable<I, O> {
    slot: Arc<Slot<I, O>>,
}

impl<I: 'static, O: 'static> Replaceable<I, O> {
    pub fn new(name: &str, default: Parser<I, O>) -> Self {
        Self {
            slot: Arc::new(Slot {
                name: Arc::from(name),
                default,
                target: OnceLock::new(),
            }),
        }
    }

    pub fn parser(&self) -> Parser<I, O> {
        Parser::from_arc(Arc::clone(&self.slot) as Arc<dyn ParserImpl<I, O>>)
    }

    pub fn is_bound(&self) -> bool {
        self.slot.target.get().is_some()
    }

    /// Points the slot at `target`; a slot can only be bound once
    pub fn bind(&self, target: Parser<I, O>) -> Result<(), GrammarError> {
        self.slot
            .target
            .set(target)
            .map_err(|_| GrammarError::AlreadyBound {
                name: self.slot.name.to_string(),
            })?;
        debug!(name = %self.slot.name, "bound replaceable parser");
        Ok(())
    }
}
