//! Decoded numeric literal values

use super::TokenType;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum NumericLiteral {
    Integer(i32),
    UInteger(u32),
    Long(i64),
    ULong(u64),
    Float(f32),
    Double(f64),
    /// Kept as text: decimals have more precision than any primitive float
    Decimal(String),
}

impl NumericLiteral {
    /// Decodes the stored digits of a numeric token; `None` when out of range or not numeric
    pub fn decode(digits: &str, token_type: TokenType) -> Option<NumericLiteral> {
        let hex = digits
            .strip_prefix("0x")
            .or_else(|| digits.strip_prefix("0X"));

        match token_type {
            TokenType::Integer => match hex {
                Some(h) => u32::from_str_radix(h, 16)
                    .ok()
                    .map(|v| NumericLiteral::Integer(v as i32)),
                None => digits.parse().ok().map(NumericLiteral::Integer),
            },
            TokenType::UInteger => parse_unsigned(digits, hex)
                .and_then(|v| u32::try_from(v).ok())
                .map(NumericLiteral::UInteger),
            TokenType::Long => match hex {
                Some(h) => u64::from_str_radix(h, 16)
                    .ok()
                    .map(|v| NumericLiteral::Long(v as i64)),
                None => digits.parse().ok().map(NumericLiteral::Long),
            },
            TokenType::ULong => parse_unsigned(digits, hex).map(NumericLiteral::ULong),
            TokenType::Float => digits.parse().ok().map(NumericLiteral::Float),
            TokenType::Double => digits.parse().ok().map(NumericLiteral::Double),
            TokenType::Decimal => Some(NumericLiteral::Decimal(digits.to_string())),
            _ => None,
        }
    }
}

fn parse_unsigned(digits: &str, hex: Option<&str>) -> Option<u64> {
    match hex {
        Some(h) => u64::from_str_radix(h, 16).ok(),
        None => digits.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_digits() {
        assert_eq!(
            NumericLiteral::decode("123", TokenType::Integer),
            Some(NumericLiteral::Integer(123))
        );
        assert_eq!(
            NumericLiteral::decode("123", TokenType::Long),
            Some(NumericLiteral::Long(123))
        );
        assert_eq!(
            NumericLiteral::decode("123.45", TokenType::Double),
            Some(NumericLiteral::Double(123.45))
        );
        assert_eq!(
            NumericLiteral::decode("123.45", TokenType::Decimal),
            Some(NumericLiteral::Decimal("123.45".to_string()))
        );
    }

    #[test]
    fn test_hex_digits() {
        assert_eq!(
            NumericLiteral::decode("0xFF", TokenType::Integer),
            Some(NumericLiteral::Integer(255))
        );
        assert_eq!(
            NumericLiteral::decode("0x10", TokenType::ULong),
            Some(NumericLiteral::ULong(16))
        );
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            NumericLiteral::decode("99999999999", TokenType::Integer),
            None
        );
        assert_eq!(NumericLiteral::decode("abc", TokenType::Identifier), None);
    }
}
