//! Character sequences over source text
//!
//! Line starts are computed once up front so that the location of any position is a binary
//! search away; rewinding across newlines therefore needs no bookkeeping.

use super::{Checkpoint, Sequence};
use crate::scoop::error::LexResult;
use crate::scoop::location::{Location, DEFAULT_SOURCE_NAME};
use std::sync::Arc;

/// The sentinel returned once the text is exhausted
pub const END_OF_TEXT: char = '\0';

#[derive(Debug, Clone)]
pub struct CharacterSequence {
    chars: Vec<char>,
    line_starts: Vec<usize>,
    position: usize,
    pushback: Vec<char>,
    source: Arc<str>,
}

impl CharacterSequence {
    pub fn new(text: &str) -> Self {
        Self::named(DEFAULT_SOURCE_NAME, text)
    }

    /// A sequence whose locations report `source` as their file name
    pub fn named(source: impl Into<Arc<str>>, text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let mut line_starts = vec![0];
        line_starts.extend(
            chars
                .iter()
                .enumerate()
                .filter(|(_, c)| **c == '\n')
                .map(|(i, _)| i + 1),
        );
        Self {
            chars,
            line_starts,
            position: 0,
            pushback: Vec::new(),
            source: source.into(),
        }
    }

    /// Location of the character at `index`
    pub fn location_at(&self, index: usize) -> Location {
        let line = self.line_starts.partition_point(|start| *start <= index);
        let line_start = self.line_starts[line.saturating_sub(1)];
        Location::new(Arc::clone(&self.source), line, index - line_start + 1)
    }

    /// Infallible peek, for scanners that work on characters directly
    pub fn peek_char(&self) -> char {
        match self.pushback.last() {
            Some(c) => *c,
            None => self.chars.get(self.position).copied().unwrap_or(END_OF_TEXT),
        }
    }

    /// Infallible read
    pub fn next_char(&mut self) -> char {
        if let Some(c) = self.pushback.pop() {
            return c;
        }
        match self.chars.get(self.position) {
            Some(c) => {
                self.position += 1;
                *c
            }
            None => END_OF_TEXT,
        }
    }

    pub fn at_end(&self) -> bool {
        self.pushback.is_empty() && self.position >= self.chars.len()
    }

    pub fn current_location(&self) -> Location {
        self.location_at(self.position)
    }

    fn unread(&mut self, c: char) {
        if self.pushback.is_empty() && self.position > 0 && self.chars[self.position - 1] == c {
            self.position -= 1;
        } else {
            self.pushback.push(c);
        }
    }
}

impl Sequence<char> for CharacterSequence {
    fn peek(&mut self) -> LexResult<char> {
        Ok(self.peek_char())
    }

    fn get_next(&mut self) -> LexResult<char> {
        Ok(self.next_char())
    }

    fn put_back(&mut self, item: char) {
        self.unread(item);
    }

    fn is_at_end(&mut self) -> LexResult<bool> {
        Ok(self.at_end())
    }

    fn location(&mut self) -> LexResult<Location> {
        Ok(self.current_location())
    }

    fn mark(&self) -> Checkpoint<char> {
        Checkpoint::new(self.position, self.pushback.clone())
    }

    fn rewind(&mut self, checkpoint: Checkpoint<char>) {
        self.position = checkpoint.position;
        self.pushback = checkpoint.pushback;
    }

    fn consumed(&self) -> usize {
        self.position.saturating_sub(self.pushback.len())
    }
}
