//! Embedded c# code blocks
//!
//! `c# { … }` embeds code that is passed through untranslated. After the `c#` marker and the
//! opening brace, the body is copied verbatim up to the matching closing brace. A depth counter
//! tracks nested braces. Comments, character literals and string literals inside the body are
//! scanned with their own recognizers so that braces and quotes inside them do not move the
//! counter.
//!
//! The token value is the body only, without the marker and the outer braces.

use super::{characters, comments, peek_n, strings};
use crate::scoop::error::{LexError, LexResult};
use crate::scoop::sequence::Sequence;
use crate::scoop::token::{Token, TokenType};

pub fn scan(chars: &mut dyn Sequence<char>) -> LexResult<Option<Token>> {
    if !matches!(peek_n(chars, 2)?.as_slice(), ['c', '#']) {
        return Ok(None);
    }
    let location = chars.location()?;

    let mut marker = vec![chars.get_next()?, chars.get_next()?];
    while !chars.is_at_end()? && chars.peek()?.is_whitespace() {
        marker.push(chars.get_next()?);
    }
    if chars.is_at_end()? || chars.peek()? != '{' {
        for c in marker.into_iter().rev() {
            chars.put_back(c);
        }
        return Ok(None);
    }
    chars.get_next()?;

    let mut body = String::new();
    let mut depth = 1usize;
    loop {
        if chars.is_at_end()? {
            return Err(LexError::UnterminatedRawCode { location });
        }
        if let Some(comment) = comments::scan(chars)? {
            body.push_str(&comment);
            continue;
        }
        if let Some(literal) = quoted_span(chars)? {
            body.push_str(&literal);
            continue;
        }
        let c = chars.get_next()?;
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(Some(Token::new(body, TokenType::RawCode, location)));
                }
            }
            _ => {}
        }
        body.push(c);
    }
}

/// Reads a character or string literal starting at the head of `chars`, if there is one
fn quoted_span(chars: &mut dyn Sequence<char>) -> LexResult<Option<String>> {
    if let Some(token) = strings::scan(chars)? {
        return Ok(Some(token.value));
    }
    Ok(characters::scan(chars)?.map(|token| token.value))
}
