//! Lexer
//!
//! Converts a character [`Sequence`] into tokens. The lexer is stateless apart from its
//! options: every call to [`Lexer::next_token`] reads exactly one token (plus the whitespace
//! and comments before it) from the character sequence it is given.
//!
//! Dispatch
//!
//!     At each position the recognizers are tried in a fixed order; the first that matches
//!     produces the token:
//!
//!     1. end of input
//!     2. whitespace (skipped)
//!     3. line and block comments (skipped, kept as the next token's frontmatter)
//!     4. c# code blocks, `c# { ... }` ([raw_code])
//!     5. words: identifiers and keywords, with an optional `@` escape ([words])
//!     6. operators, longest match first ([operators])
//!     7. numbers ([numbers])
//!     8. strings in all four forms ([strings])
//!     9. character literals ([characters])
//!     10. anything else becomes a single-character `Unknown` token
//!
//!     A recognizer that does not match leaves the sequence exactly where it found it, putting
//!     back any lookahead it consumed.
//!
//! Errors
//!
//!     Malformed input that cannot be tokenized at all (unterminated strings, comments and
//!     code blocks, bad escapes) is a fatal [`LexError`]. Problems that still allow a sensible
//!     token, like an empty character literal, are attached to that token as diagnostics.

pub mod characters;
pub mod comments;
pub mod escapes;
pub mod numbers;
pub mod operators;
pub mod raw_code;
pub mod strings;
pub mod words;

use crate::scoop::config::LexerConfig;
use crate::scoop::error::{LexError, LexResult};
use crate::scoop::sequence::Sequence;
use crate::scoop::token::{Token, TokenType};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Lexer {
    capture_frontmatter: bool,
}

impl Lexer {
    pub fn new() -> Self {
        Self {
            capture_frontmatter: true,
        }
    }

    pub fn with_config(config: &LexerConfig) -> Self {
        Self {
            capture_frontmatter: config.capture_frontmatter,
        }
    }

    /// Reads the next token. Past the end, keeps returning end-of-input tokens.
    pub fn next_token(&self, chars: &mut dyn Sequence<char>) -> LexResult<Token> {
        self.scan_token(chars)
            .inspect_err(|error| debug!(%error, "fatal tokenizing error"))
    }

    /// Reads every token up to and including the end-of-input token
    pub fn tokenize(&self, chars: &mut dyn Sequence<char>) -> LexResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token(chars)?;
            let done = token.is_end();
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn scan_token(&self, chars: &mut dyn Sequence<char>) -> LexResult<Token> {
        let mut frontmatter = Vec::new();
        loop {
            skip_whitespace(chars)?;
            match comments::scan(chars)? {
                Some(comment) => {
                    if self.capture_frontmatter {
                        frontmatter.push(comment);
                    }
                }
                None => break,
            }
        }

        let location = chars.location()?;
        if chars.is_at_end()? {
            return Ok(Token::end_of_input(location).with_frontmatter(frontmatter));
        }

        let token = match self.recognize(chars)? {
            Some(token) => token,
            None => {
                let c = chars.get_next()?;
                Token::new(c.to_string(), TokenType::Unknown, location)
            }
        };
        Ok(token.with_frontmatter(frontmatter))
    }

    fn recognize(&self, chars: &mut dyn Sequence<char>) -> LexResult<Option<Token>> {
        if let Some(token) = raw_code::scan(chars)? {
            return Ok(Some(token));
        }
        if let Some(token) = words::scan(chars)? {
            return Ok(Some(token));
        }
        if let Some(token) = operators::scan(chars)? {
            return Ok(Some(token));
        }
        if let Some(token) = numbers::scan(chars)? {
            return Ok(Some(token));
        }
        if let Some(token) = strings::scan(chars)? {
            return Ok(Some(token));
        }
        characters::scan(chars)
    }
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn skip_whitespace(chars: &mut dyn Sequence<char>) -> LexResult<()> {
    while !chars.is_at_end()? && chars.peek()?.is_whitespace() {
        chars.get_next()?;
    }
    Ok(())
}

/// Reads up to `n` characters and puts them back, stopping early at the end of input
pub(crate) fn peek_n(chars: &mut dyn Sequence<char>, n: usize) -> LexResult<Vec<char>> {
    let mut seen = Vec::with_capacity(n);
    while seen.len() < n && !chars.is_at_end()? {
        seen.push(chars.get_next()?);
    }
    for c in seen.iter().rev() {
        chars.put_back(*c);
    }
    Ok(seen)
}

/// Consumes the next character only if it is `expected`
pub(crate) fn next_is(chars: &mut dyn Sequence<char>, expected: char) -> LexResult<bool> {
    if !chars.is_at_end()? && chars.peek()? == expected {
        chars.get_next()?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Consumes one character, failing with `on_end` at the end of input
pub(crate) fn require_next(
    chars: &mut dyn Sequence<char>,
    on_end: impl FnOnce() -> LexError,
) -> LexResult<char> {
    if chars.is_at_end()? {
        return Err(on_end());
    }
    chars.get_next()
}
