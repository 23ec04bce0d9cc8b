//! Backslash escape sequences shared by character and non-verbatim string literals

use super::require_next;
use crate::scoop::error::{LexError, LexResult};
use crate::scoop::location::Location;
use crate::scoop::sequence::Sequence;

const SIMPLE_ESCAPES: &[char] = &['\'', '"', '\\', '0', 'a', 'b', 'f', 'n', 'r', 't', 'v'];

/// Scans an escape whose backslash was already consumed; returns the text after the backslash
///
/// `location` is where the enclosing literal started and is used for errors.
pub fn scan(chars: &mut dyn Sequence<char>, location: &Location) -> LexResult<String> {
    let c = require_next(chars, || LexError::UnexpectedEnd {
        context: "in escape sequence",
        location: location.clone(),
    })?;

    match c {
        c if SIMPLE_ESCAPES.contains(&c) => Ok(c.to_string()),
        'x' => scan_hex(chars, 'x', 1, 4, location),
        'u' => scan_hex(chars, 'u', 4, 4, location),
        'U' => scan_hex(chars, 'U', 8, 8, location),
        other => Err(LexError::InvalidEscape {
            sequence: other.to_string(),
            location: location.clone(),
        }),
    }
}

fn scan_hex(
    chars: &mut dyn Sequence<char>,
    kind: char,
    min: usize,
    max: usize,
    location: &Location,
) -> LexResult<String> {
    let mut text = kind.to_string();
    while text.len() <= max && !chars.is_at_end()? && chars.peek()?.is_ascii_hexdigit() {
        text.push(chars.get_next()?);
    }
    if text.len() - 1 < min {
        return Err(LexError::InvalidEscape {
            sequence: text,
            location: location.clone(),
        });
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoop::sequence::CharacterSequence;

    fn scan_str(source: &str) -> LexResult<String> {
        let mut chars = CharacterSequence::new(source);
        scan(&mut chars, &Location::default())
    }

    #[test]
    fn test_simple_escapes() {
        assert_eq!(scan_str("n").unwrap(), "n");
        assert_eq!(scan_str("\"").unwrap(), "\"");
        assert_eq!(scan_str("0").unwrap(), "0");
    }

    #[test]
    fn test_hex_escapes() {
        assert_eq!(scan_str("x41'").unwrap(), "x41");
        assert_eq!(scan_str("x12345").unwrap(), "x1234");
        assert_eq!(scan_str("u00e9").unwrap(), "u00e9");
        assert_eq!(scan_str("U0001F600").unwrap(), "U0001F600");
    }

    #[test]
    fn test_malformed_escapes() {
        assert!(matches!(
            scan_str("q"),
            Err(LexError::InvalidEscape { ref sequence, .. }) if sequence == "q"
        ));
        assert!(matches!(
            scan_str("u12'"),
            Err(LexError::InvalidEscape { ref sequence, .. }) if sequence == "u12"
        ));
        assert!(matches!(scan_str("x"), Err(LexError::InvalidEscape { .. })));
        assert!(matches!(scan_str(""), Err(LexError::UnexpectedEnd { .. })));
    }
}
