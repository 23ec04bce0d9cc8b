//! Identifiers and keywords
//!
//! A word starts with a letter or `_` and continues with letters, digits and `_`. A leading
//! `@` escapes the word: `@class` is an identifier, not a keyword. `@` followed by anything
//! other than a word start (notably `"`) is left for the string recognizer.

use crate::scoop::error::LexResult;
use crate::scoop::sequence::Sequence;
use crate::scoop::token::{Keyword, Token, TokenType};

pub fn is_word_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

pub fn is_word_part(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

pub fn scan(chars: &mut dyn Sequence<char>) -> LexResult<Option<Token>> {
    if chars.is_at_end()? {
        return Ok(None);
    }
    let location = chars.location()?;
    let mut word = String::new();

    let escaped = chars.peek()? == '@';
    if escaped {
        let at = chars.get_next()?;
        if chars.is_at_end()? || !is_word_start(chars.peek()?) {
            chars.put_back(at);
            return Ok(None);
        }
        word.push(at);
    } else if !is_word_start(chars.peek()?) {
        return Ok(None);
    }

    while !chars.is_at_end()? && is_word_part(chars.peek()?) {
        word.push(chars.get_next()?);
    }

    let token_type = if !escaped && Keyword::classify(&word).is_some() {
        TokenType::Keyword
    } else {
        TokenType::Identifier
    };
    Ok(Some(Token::new(word, token_type, location)))
}
