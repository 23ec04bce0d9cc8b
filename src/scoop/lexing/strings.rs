//! String literals
//!
//! Four string forms are recognized, selected by the opening sigil:
//!
//!     "…"      String                    backslash escapes
//!     @"…"     BlockString               `""` is a literal quote, no backslash escapes
//!     $"…"     InterpolatedString        backslash escapes, `{…}` holes
//!     $@"…"    InterpolatedBlockString   `""` quotes, `{…}` holes (`@$"` is accepted too)
//!
//! State machine
//!
//!     Scanning is driven by an explicit stack of [`StringState`]s rather than recursion. The
//!     opening sigil pushes the entry state; the closing quote of a string pops it. Inside an
//!     interpolated string, `{` pushes `Brackets` and the matching `}` pops it (`{{` and `}}`
//!     are literal braces). A `Brackets` region holds ordinary code, so it can open any of the
//!     four string forms again, nested braces, or character literals, each pushed on the same
//!     stack. Scanning ends when the outermost string closes and the stack is empty.
//!
//!     The whole literal, sigils and nested strings included, becomes a single `String` token.
//!
//! Errors
//!
//!     Reaching the end of input with a non-empty stack is a fatal
//!     [`LexError::UnterminatedString`]; so is a malformed backslash escape.

use super::{escapes, next_is, peek_n};
use crate::scoop::error::{LexError, LexResult};
use crate::scoop::location::Location;
use crate::scoop::sequence::Sequence;
use crate::scoop::token::{Token, TokenType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringState {
    String,
    BlockString,
    InterpolatedString,
    InterpolatedBlockString,
    Brackets,
}

impl StringState {
    fn is_verbatim(self) -> bool {
        matches!(
            self,
            StringState::BlockString | StringState::InterpolatedBlockString
        )
    }

    fn is_interpolated(self) -> bool {
        matches!(
            self,
            StringState::InterpolatedString | StringState::InterpolatedBlockString
        )
    }
}

/// Identifies the string form starting at the head of `chars`, with its sigil length
fn opening(chars: &mut dyn Sequence<char>) -> LexResult<Option<(StringState, usize)>> {
    let head = peek_n(chars, 3)?;
    Ok(match head.as_slice() {
        ['"', ..] => Some((StringState::String, 1)),
        ['@', '"', ..] => Some((StringState::BlockString, 2)),
        ['$', '"', ..] => Some((StringState::InterpolatedString, 2)),
        ['$', '@', '"'] | ['@', '$', '"'] => Some((StringState::InterpolatedBlockString, 3)),
        _ => None,
    })
}

pub fn scan(chars: &mut dyn Sequence<char>) -> LexResult<Option<Token>> {
    if chars.is_at_end()? {
        return Ok(None);
    }
    let location = chars.location()?;
    let Some((entry, sigil_length)) = opening(chars)? else {
        return Ok(None);
    };

    let mut text = String::new();
    for _ in 0..sigil_length {
        text.push(chars.get_next()?);
    }

    let mut machine = StringMachine {
        stack: vec![entry],
        text,
        location,
    };
    machine.run(chars)?;
    Ok(Some(Token::new(
        machine.text,
        TokenType::String,
        machine.location,
    )))
}

struct StringMachine {
    stack: Vec<StringState>,
    text: String,
    location: Location,
}

impl StringMachine {
    fn run(&mut self, chars: &mut dyn Sequence<char>) -> LexResult<()> {
        while let Some(state) = self.stack.last().copied() {
            if chars.is_at_end()? {
                return Err(self.unterminated());
            }
            let c = chars.get_next()?;
            self.text.push(c);
            match state {
                StringState::Brackets => self.step_brackets(c, chars)?,
                _ => self.step_string(state, c, chars)?,
            }
        }
        Ok(())
    }

    fn step_string(
        &mut self,
        state: StringState,
        c: char,
        chars: &mut dyn Sequence<char>,
    ) -> LexResult<()> {
        match c {
            '\\' if !state.is_verbatim() => {
                let escape = escapes::scan(chars, &self.location).map_err(|error| match error {
                    LexError::UnexpectedEnd { .. } => self.unterminated(),
                    other => other,
                })?;
                self.text.push_str(&escape);
            }
            '"' if state.is_verbatim() && next_is(chars, '"')? => self.text.push('"'),
            '"' => {
                self.stack.pop();
            }
            '{' if state.is_interpolated() => {
                if next_is(chars, '{')? {
                    self.text.push('{');
                } else {
                    self.stack.push(StringState::Brackets);
                }
            }
            '}' if state.is_interpolated() && next_is(chars, '}')? => self.text.push('}'),
            _ => {}
        }
        Ok(())
    }

    fn step_brackets(&mut self, c: char, chars: &mut dyn Sequence<char>) -> LexResult<()> {
        match c {
            '}' => {
                self.stack.pop();
            }
            '{' => self.stack.push(StringState::Brackets),
            '"' => self.stack.push(StringState::String),
            '\'' => self.skip_character(chars)?,
            '@' | '$' => {
                // The first sigil character is already in the text; look for the rest.
                chars.put_back(c);
                self.text.pop();
                match opening(chars)? {
                    Some((state, length)) => {
                        for _ in 0..length {
                            self.text.push(chars.get_next()?);
                        }
                        self.stack.push(state);
                    }
                    None => self.text.push(chars.get_next()?),
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Copies a character literal inside a `Brackets` region so its quote or brace is inert
    fn skip_character(&mut self, chars: &mut dyn Sequence<char>) -> LexResult<()> {
        loop {
            if chars.is_at_end()? {
                return Err(self.unterminated());
            }
            let c = chars.get_next()?;
            self.text.push(c);
            match c {
                '\\' => {
                    if chars.is_at_end()? {
                        return Err(self.unterminated());
                    }
                    self.text.push(chars.get_next()?);
                }
                '\'' => return Ok(()),
                _ => {}
            }
        }
    }

    fn unterminated(&self) -> LexError {
        LexError::UnterminatedString {
            location: self.location.clone(),
        }
    }
}
