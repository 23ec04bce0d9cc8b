//! Character literals
//!
//! `'` then one of: a hex escape (`\x41`), a unicode escape (`\u0041`), a named escape (`\n`)
//! or a single literal character, then `'`.
//!
//! An empty literal (`''`) and a missing closing quote are recoverable: the token is produced
//! with a diagnostic attached so that parsing can continue. Running out of input before the
//! literal has any content is fatal.

use super::{escapes, require_next};
use crate::scoop::diagnostics::Diagnostic;
use crate::scoop::error::{LexError, LexResult};
use crate::scoop::sequence::Sequence;
use crate::scoop::token::{Token, TokenType};

pub fn scan(chars: &mut dyn Sequence<char>) -> LexResult<Option<Token>> {
    if chars.is_at_end()? || chars.peek()? != '\'' {
        return Ok(None);
    }
    let location = chars.location()?;
    let mut text = String::from(chars.get_next()?);

    let unterminated = || LexError::UnterminatedCharacter {
        location: location.clone(),
    };
    let c = require_next(chars, unterminated)?;
    text.push(c);

    if c == '\'' {
        let diagnostic = Diagnostic::new("Empty character literal", location.clone());
        return Ok(Some(
            Token::new(text, TokenType::Character, location).with_diagnostic(diagnostic),
        ));
    }
    if c == '\\' {
        text.push_str(&escapes::scan(chars, &location)?);
    }

    let token = if !chars.is_at_end()? && chars.peek()? == '\'' {
        text.push(chars.get_next()?);
        Token::new(text, TokenType::Character, location)
    } else {
        let diagnostic = Diagnostic::new(
            "Missing closing quote on character literal",
            chars.location()?,
        );
        Token::new(text, TokenType::Character, location).with_diagnostic(diagnostic)
    };
    Ok(Some(token))
}
