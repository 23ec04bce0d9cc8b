//! Sequences: peekable, rewindable cursors
//!
//! Every parser in the engine reads from a [`Sequence`]. A sequence hands out one item at a
//! time, lets callers look ahead with [`Sequence::peek`], push items back, and take a
//! [`Checkpoint`] that can later be restored with [`Sequence::rewind`]. Checkpoints nest freely;
//! dropping one commits everything read since it was taken.
//!
//! Backtracking contract
//!
//!     Any parser that partially consumes input and then fails must rewind to the checkpoint it
//!     took before reading. Alternation relies on this: each alternative starts from the same
//!     position because the previous one restored it.
//!
//! Implementations
//!
//!     - [`VecSequence`]: any pre-built list of items, followed by an end sentinel.
//!     - [`CharacterSequence`](chars::CharacterSequence): source text with line/column tracking.
//!     - [`TokenSequence`](tokens::TokenSequence): tokens scanned lazily from a character
//!       sequence. This is the only implementation whose reads can fail.
//!
//! Reading past the end is not an error: every sequence keeps returning its end sentinel
//! (`'\0'` for characters, an end-of-input token for tokens).

pub mod chars;
pub mod tokens;

pub use chars::CharacterSequence;
pub use tokens::TokenSequence;

use crate::scoop::error::LexResult;
use crate::scoop::location::{Location, DEFAULT_SOURCE_NAME};
use std::sync::Arc;

/// A cursor over items of type `T`
pub trait Sequence<T> {
    /// The next item, without consuming it
    fn peek(&mut self) -> LexResult<T>;

    /// Consumes and returns the next item
    fn get_next(&mut self) -> LexResult<T>;

    /// Pushes an item back so that it is the next one read. Any depth is supported.
    fn put_back(&mut self, item: T);

    fn is_at_end(&mut self) -> LexResult<bool>;

    /// Location of the next item
    fn location(&mut self) -> LexResult<Location>;

    /// Snapshot of the current read position
    fn mark(&self) -> Checkpoint<T>;

    /// Restores a snapshot taken with [`Sequence::mark`], discarding everything read since
    fn rewind(&mut self, checkpoint: Checkpoint<T>);

    /// Net number of items consumed so far (reads minus push-backs)
    fn consumed(&self) -> usize;
}

/// A saved read position
///
/// Holds the underlying position and a copy of the push-back stack at the time it was taken.
#[derive(Debug, Clone, PartialEq)]
pub struct Checkpoint<T> {
    pub(crate) position: usize,
    pub(crate) pushback: Vec<T>,
}

impl<T> Checkpoint<T> {
    pub(crate) fn new(position: usize, pushback: Vec<T>) -> Self {
        Self { position, pushback }
    }

    /// Net items consumed at the time the checkpoint was taken
    pub fn consumed(&self) -> usize {
        self.position.saturating_sub(self.pushback.len())
    }
}

/// A sequence over an in-memory list of items
///
/// Useful for running parsers directly over characters, tokens produced elsewhere, or any
/// other item type in tests.
#[derive(Debug, Clone)]
pub struct VecSequence<T> {
    items: Vec<T>,
    end: T,
    position: usize,
    pushback: Vec<T>,
    source: Arc<str>,
}

impl<T: Clone> VecSequence<T> {
    /// Creates a sequence over `items`; `end` is returned once the items are exhausted
    pub fn new(items: Vec<T>, end: T) -> Self {
        Self {
            items,
            end,
            position: 0,
            pushback: Vec::new(),
            source: Arc::from(DEFAULT_SOURCE_NAME),
        }
    }

    /// Items not consumed yet, push-backs first
    pub fn remaining(&self) -> Vec<T> {
        let mut rest: Vec<T> = self.pushback.iter().rev().cloned().collect();
        rest.extend(self.items.iter().skip(self.position).cloned());
        rest
    }
}

impl<T: Clone> Sequence<T> for VecSequence<T> {
    fn peek(&mut self) -> LexResult<T> {
        if let Some(item) = self.pushback.last() {
            return Ok(item.clone());
        }
        Ok(self
            .items
            .get(self.position)
            .cloned()
            .unwrap_or_else(|| self.end.clone()))
    }

    fn get_next(&mut self) -> LexResult<T> {
        if let Some(item) = self.pushback.pop() {
            return Ok(item);
        }
        match self.items.get(self.position) {
            Some(item) => {
                self.position += 1;
                Ok(item.clone())
            }
            None => Ok(self.end.clone()),
        }
    }

    fn put_back(&mut self, item: T) {
        self.pushback.push(item);
    }

    fn is_at_end(&mut self) -> LexResult<bool> {
        Ok(self.pushback.is_empty() && self.position >= self.items.len())
    }

    fn location(&mut self) -> LexResult<Location> {
        let column = self.consumed() + 1;
        Ok(Location::new(Arc::clone(&self.source), 1, column))
    }

    fn mark(&self) -> Checkpoint<T> {
        Checkpoint::new(self.position, self.pushback.clone())
    }

    fn rewind(&mut self, checkpoint: Checkpoint<T>) {
        self.position = checkpoint.position;
        self.pushback = checkpoint.pushback;
    }

    fn consumed(&self) -> usize {
        self.position.saturating_sub(self.pushback.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers() -> VecSequence<i32> {
        VecSequence::new(vec![1, 2, 3], 0)
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut seq = numbers();
        assert_eq!(seq.peek().unwrap(), 1);
        assert_eq!(seq.peek().unwrap(), 1);
        assert_eq!(seq.get_next().unwrap(), 1);
        assert_eq!(seq.peek().unwrap(), 2);
    }

    #[test]
    fn test_end_sentinel_repeats() {
        let mut seq = numbers();
        for _ in 0..3 {
            seq.get_next().unwrap();
        }
        assert!(seq.is_at_end().unwrap());
        assert_eq!(seq.get_next().unwrap(), 0);
        assert_eq!(seq.get_next().unwrap(), 0);
        assert_eq!(seq.consumed(), 3);
    }

    #[test]
    fn test_put_back_any_depth() {
        let mut seq = numbers();
        let a = seq.get_next().unwrap();
        let b = seq.get_next().unwrap();
        seq.put_back(b);
        seq.put_back(a);
        seq.put_back(42);
        assert_eq!(seq.remaining(), vec![42, 1, 2, 3]);
        assert_eq!(seq.get_next().unwrap(), 42);
        assert_eq!(seq.get_next().unwrap(), 1);
    }

    #[test]
    fn test_nested_rewind() {
        let mut seq = numbers();
        let outer = seq.mark();
        seq.get_next().unwrap();
        let inner = seq.mark();
        seq.get_next().unwrap();
        seq.get_next().unwrap();
        seq.rewind(inner);
        assert_eq!(seq.peek().unwrap(), 2);
        seq.rewind(outer);
        assert_eq!(seq.peek().unwrap(), 1);
        assert_eq!(seq.consumed(), 0);
    }

    #[test]
    fn test_rewind_restores_pushback() {
        let mut seq = numbers();
        seq.put_back(9);
        let checkpoint = seq.mark();
        assert_eq!(seq.get_next().unwrap(), 9);
        seq.rewind(checkpoint);
        assert_eq!(seq.get_next().unwrap(), 9);
        assert_eq!(seq.get_next().unwrap(), 1);
    }
}
