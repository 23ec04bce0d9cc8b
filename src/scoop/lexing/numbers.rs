//! Numeric literals
//!
//! Decimal literals are a digit run, optionally followed by `.` and a fraction. The `.` is only
//! part of the number when a digit follows it; otherwise it is put back as a member-access
//! operator (`1.ToString()`).
//!
//! A suffix selects the type:
//!
//!     F          Float
//!     M          Decimal
//!     D          Double
//!     L          Long       (integers only)
//!     U          UInteger   (integers only)
//!     UL, LU     ULong      (integers only)
//!     (none)     Integer, or Double when a fraction was read
//!
//! Suffixes are case-insensitive. Hex literals (`0x1F`) accept only the integer suffixes, since
//! `F`, `D` and friends are hex digits there. The stored token value never includes the suffix.

use super::peek_n;
use crate::scoop::error::LexResult;
use crate::scoop::sequence::Sequence;
use crate::scoop::token::{Token, TokenType};

pub fn scan(chars: &mut dyn Sequence<char>) -> LexResult<Option<Token>> {
    if chars.is_at_end()? || !chars.peek()?.is_ascii_digit() {
        return Ok(None);
    }
    let location = chars.location()?;

    if let ['0', 'x' | 'X', h] = peek_n(chars, 3)?.as_slice() {
        if h.is_ascii_hexdigit() {
            let (digits, token_type) = scan_hex(chars)?;
            return Ok(Some(Token::new(digits, token_type, location)));
        }
    }

    let mut digits = read_digits(chars)?;
    let mut has_fraction = false;
    if let ['.', d] = peek_n(chars, 2)?.as_slice() {
        if d.is_ascii_digit() {
            digits.push(chars.get_next()?);
            digits.push_str(&read_digits(chars)?);
            has_fraction = true;
        }
    }

    let token_type = match read_real_suffix(chars)? {
        Some(token_type) => token_type,
        None if has_fraction => TokenType::Double,
        None => read_integer_suffix(chars)?,
    };
    Ok(Some(Token::new(digits, token_type, location)))
}

fn scan_hex(chars: &mut dyn Sequence<char>) -> LexResult<(String, TokenType)> {
    let mut digits = String::new();
    digits.push(chars.get_next()?);
    digits.push(chars.get_next()?);
    while !chars.is_at_end()? && chars.peek()?.is_ascii_hexdigit() {
        digits.push(chars.get_next()?);
    }
    Ok((digits, read_integer_suffix(chars)?))
}

fn read_digits(chars: &mut dyn Sequence<char>) -> LexResult<String> {
    let mut digits = String::new();
    while !chars.is_at_end()? && chars.peek()?.is_ascii_digit() {
        digits.push(chars.get_next()?);
    }
    Ok(digits)
}

fn read_real_suffix(chars: &mut dyn Sequence<char>) -> LexResult<Option<TokenType>> {
    if chars.is_at_end()? {
        return Ok(None);
    }
    let token_type = match chars.peek()?.to_ascii_uppercase() {
        'F' => TokenType::Float,
        'M' => TokenType::Decimal,
        'D' => TokenType::Double,
        _ => return Ok(None),
    };
    chars.get_next()?;
    Ok(Some(token_type))
}

fn read_integer_suffix(chars: &mut dyn Sequence<char>) -> LexResult<TokenType> {
    let upper: Vec<char> = peek_n(chars, 2)?
        .iter()
        .map(|c| c.to_ascii_uppercase())
        .collect();
    let (token_type, length) = match upper.as_slice() {
        ['U', 'L', ..] | ['L', 'U', ..] => (TokenType::ULong, 2),
        ['U', ..] => (TokenType::UInteger, 1),
        ['L', ..] => (TokenType::Long, 1),
        _ => (TokenType::Integer, 0),
    };
    for _ in 0..length {
        chars.get_next()?;
    }
    Ok(token_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoop::sequence::CharacterSequence;

    fn scan_str(source: &str) -> (TokenType, String, char) {
        let mut chars = CharacterSequence::new(source);
        let token = scan(&mut chars).unwrap().unwrap();
        (token.token_type, token.value, chars.peek_char())
    }

    #[test]
    fn test_suffix_dispatch() {
        assert_eq!(scan_str("123.45F").0, TokenType::Float);
        assert_eq!(scan_str("123.45f").0, TokenType::Float);
        assert_eq!(scan_str("123L").0, TokenType::Long);
        assert_eq!(scan_str("123U").0, TokenType::UInteger);
        assert_eq!(scan_str("123ul").0, TokenType::ULong);
        assert_eq!(scan_str("123LU").0, TokenType::ULong);
        assert_eq!(scan_str("123.45").0, TokenType::Double);
        assert_eq!(scan_str("123.45M").0, TokenType::Decimal);
        assert_eq!(scan_str("5D").0, TokenType::Double);
        assert_eq!(scan_str("123").0, TokenType::Integer);
    }

    #[test]
    fn test_value_excludes_suffix() {
        assert_eq!(scan_str("123.45F").1, "123.45");
        assert_eq!(scan_str("7UL").1, "7");
    }

    #[test]
    fn test_dot_without_digit_is_put_back() {
        let (token_type, value, next) = scan_str("1.ToString()");
        assert_eq!(token_type, TokenType::Integer);
        assert_eq!(value, "1");
        assert_eq!(next, '.');
    }

    #[test]
    fn test_long_suffix_not_taken_after_fraction() {
        let (token_type, value, next) = scan_str("1.5L");
        assert_eq!(token_type, TokenType::Double);
        assert_eq!(value, "1.5");
        assert_eq!(next, 'L');
    }

    #[test]
    fn test_hex() {
        assert_eq!(
            scan_str("0x1F;"),
            (TokenType::Integer, "0x1F".to_string(), ';')
        );
        assert_eq!(scan_str("0xFFUL").0, TokenType::ULong);
        assert_eq!(scan_str("0xABL").0, TokenType::Long);
    }

    #[test]
    fn test_bare_zero_x_is_not_hex() {
        assert_eq!(scan_str("0xg"), (TokenType::Integer, "0".to_string(), 'x'));
    }

    #[test]
    fn test_not_a_number() {
        let mut chars = CharacterSequence::new("x1");
        assert!(scan(&mut chars).unwrap().is_none());
    }
}
