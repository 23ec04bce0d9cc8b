//! Line and block comments
//!
//! A `/` is only a comment start when followed by `/` or `*`; otherwise it is put back for the
//! operator recognizer, which is what keeps `1/2` a division.

use super::peek_n;
use crate::scoop::error::{LexError, LexResult};
use crate::scoop::sequence::Sequence;

/// Scans one comment, returning its full text including the delimiters
pub fn scan(chars: &mut dyn Sequence<char>) -> LexResult<Option<String>> {
    match peek_n(chars, 2)?.as_slice() {
        ['/', '/'] => scan_line(chars).map(Some),
        ['/', '*'] => scan_block(chars).map(Some),
        _ => Ok(None),
    }
}

fn scan_line(chars: &mut dyn Sequence<char>) -> LexResult<String> {
    let mut text = String::new();
    while !chars.is_at_end()? && chars.peek()? != '\n' {
        text.push(chars.get_next()?);
    }
    Ok(text.trim_end_matches('\r').to_string())
}

fn scan_block(chars: &mut dyn Sequence<char>) -> LexResult<String> {
    let location = chars.location()?;
    let mut text = String::new();
    text.push(chars.get_next()?);
    text.push(chars.get_next()?);
    loop {
        if chars.is_at_end()? {
            return Err(LexError::UnterminatedComment { location });
        }
        let c = chars.get_next()?;
        text.push(c);
        if c == '*' && !chars.is_at_end()? && chars.peek()? == '/' {
            text.push(chars.get_next()?);
            return Ok(text);
        }
    }
}
