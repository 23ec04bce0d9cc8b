//! Token sequences
//!
//! Tokens are scanned lazily, one lexer call per new token, and kept in a buffer so that
//! rewinding never re-scans. The end-of-input token is buffered once and returned for every
//! read past it.

use super::{CharacterSequence, Checkpoint, Sequence};
use crate::scoop::error::LexResult;
use crate::scoop::lexing::Lexer;
use crate::scoop::location::Location;
use crate::scoop::token::Token;

pub struct TokenSequence<S = CharacterSequence> {
    chars: S,
    lexer: Lexer,
    buffer: Vec<Token>,
    position: usize,
    pushback: Vec<Token>,
}

impl TokenSequence<CharacterSequence> {
    /// Tokens of `text`, reported under the default source name
    pub fn from_source(text: &str) -> Self {
        Self::new(CharacterSequence::new(text), Lexer::new())
    }

    /// Tokens of `text`, with locations naming `source`
    pub fn named(source: &str, text: &str) -> Self {
        Self::new(CharacterSequence::named(source, text), Lexer::new())
    }
}

impl<S: Sequence<char>> TokenSequence<S> {
    pub fn new(chars: S, lexer: Lexer) -> Self {
        Self {
            chars,
            lexer,
            buffer: Vec::new(),
            position: 0,
            pushback: Vec::new(),
        }
    }

    /// Makes sure the token at `position` has been scanned; returns its buffer index
    fn fill(&mut self) -> LexResult<usize> {
        while self.buffer.len() <= self.position {
            if self.buffer.last().is_some_and(Token::is_end) {
                return Ok(self.buffer.len() - 1);
            }
            let token = self.lexer.next_token(&mut self.chars)?;
            self.buffer.push(token);
        }
        Ok(self.position)
    }
}

impl<S: Sequence<char>> Sequence<Token> for TokenSequence<S> {
    fn peek(&mut self) -> LexResult<Token> {
        if let Some(token) = self.pushback.last() {
            return Ok(token.clone());
        }
        let index = self.fill()?;
        Ok(self.buffer[index].clone())
    }

    fn get_next(&mut self) -> LexResult<Token> {
        if let Some(token) = self.pushback.pop() {
            return Ok(token);
        }
        let index = self.fill()?;
        let token = self.buffer[index].clone();
        if !token.is_end() {
            self.position += 1;
        }
        Ok(token)
    }

    fn put_back(&mut self, item: Token) {
        self.pushback.push(item);
    }

    fn is_at_end(&mut self) -> LexResult<bool> {
        Ok(self.peek()?.is_end())
    }

    fn location(&mut self) -> LexResult<Location> {
        Ok(self.peek()?.location)
    }

    fn mark(&self) -> Checkpoint<Token> {
        Checkpoint::new(self.position, self.pushback.clone())
    }

    fn rewind(&mut self, checkpoint: Checkpoint<Token>) {
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
    use crate::scoop::error::LexError;
    use crate::scoop::token::TokenType;

    #[test]
    fn test_lazy_reads_and_rewind() {
        let mut tokens = TokenSequence::from_source("a + b");
        let start = tokens.mark();
        assert_eq!(tokens.get_next().unwrap().value, "a");
        assert_eq!(tokens.get_next().unwrap().value, "+");
        tokens.rewind(start);
        assert_eq!(tokens.peek().unwrap().value, "a");
        assert_eq!(tokens.consumed(), 0);
    }

    #[test]
    fn test_end_repeats() {
        let mut tokens = TokenSequence::from_source("x");
        tokens.get_next().unwrap();
        assert!(tokens.is_at_end().unwrap());
        assert_eq!(tokens.get_next().unwrap().token_type, TokenType::EndOfInput);
        assert_eq!(tokens.get_next().unwrap().token_type, TokenType::EndOfInput);
        assert_eq!(tokens.consumed(), 1);
    }

    #[test]
    fn test_put_back_multi_token_lookahead() {
        let mut tokens = TokenSequence::from_source("a b c");
        let a = tokens.get_next().unwrap();
        let b = tokens.get_next().unwrap();
        tokens.put_back(b);
        tokens.put_back(a);
        assert_eq!(tokens.get_next().unwrap().value, "a");
        assert_eq!(tokens.get_next().unwrap().value, "b");
        assert_eq!(tokens.get_next().unwrap().value, "c");
    }

    #[test]
    fn test_fatal_error_surfaces_on_read() {
        let mut tokens = TokenSequence::from_source("x \"open");
        assert_eq!(tokens.get_next().unwrap().value, "x");
        assert!(matches!(
            tokens.peek(),
            Err(LexError::UnterminatedString { .. })
        ));
    }
}
