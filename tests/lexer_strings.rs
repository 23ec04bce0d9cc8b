//! String and character literals

use rstest::rstest;
use scoop::scoop::api::tokenize;
use scoop::scoop::error::LexError;
use scoop::scoop::token::TokenType;

#[rstest]
#[case(r#""plain""#)]
#[case(r#""esc\"aped\n""#)]
#[case(r#"@"C:\path\""quoted""""#)]
#[case(r#"$"{"test"}""#)]
#[case(r#"$"{$@"x"}""#)]
#[case(r#"$"a {b} c {d(e, "f")} g""#)]
#[case(r#"$@"{{literal}} {x}""#)]
#[case(r#"$"{ new[] { 1, 2 } }""#)]
#[case(r#"$"{ c == '}' }""#)]
#[case(r#"$"outer {$"inner {$"innermost {x}"}"} done""#)]
fn test_single_string_token(#[case] literal: &str) {
    let tokens = tokenize(literal).expect("literal to tokenize");
    assert_eq!(tokens.len(), 2, "{:?}", tokens);
    assert_eq!(tokens[0].token_type, TokenType::String);
    assert_eq!(tokens[0].value, literal);
    assert!(tokens[1].is_end());
}

#[test]
fn test_string_followed_by_code() {
    let tokens = tokenize(r#"f("a", "b");"#).expect("input to tokenize");
    let values: Vec<_> = tokens.iter().map(|t| t.value.as_str()).collect();
    assert_eq!(values, vec!["f", "(", r#""a""#, ",", r#""b""#, ")", ";", ""]);
}

#[rstest]
#[case(r#""never closed"#)]
#[case(r#"$"{ "inner" "#)]
#[case(r#"@"verbatim"#)]
#[case(r#"$"{"#)]
fn test_unterminated_string_is_fatal(#[case] text: &str) {
    assert!(matches!(
        tokenize(text),
        Err(LexError::UnterminatedString { .. })
    ));
}

#[test]
fn test_invalid_escape_is_fatal() {
    assert!(matches!(
        tokenize(r#""bad \q escape""#),
        Err(LexError::InvalidEscape { .. })
    ));
}

#[rstest]
#[case("'a'")]
#[case(r"'\n'")]
#[case(r"'\''")]
#[case(r"'\x41'")]
#[case(r"'\u0041'")]
fn test_character_literals(#[case] literal: &str) {
    let tokens = tokenize(literal).expect("literal to tokenize");
    assert_eq!(tokens[0].token_type, TokenType::Character);
    assert_eq!(tokens[0].value, literal);
    assert!(tokens[0].diagnostics.is_empty());
}

#[test]
fn test_empty_character_literal_is_recoverable() {
    let tokens = tokenize("''").expect("literal to tokenize");
    assert_eq!(tokens[0].token_type, TokenType::Character);
    assert_eq!(tokens[0].diagnostics.len(), 1);
    assert_eq!(tokens[0].diagnostics[0].message, "Empty character literal");
}

#[test]
fn test_missing_closing_quote_is_recoverable() {
    let tokens = tokenize("'ab").expect("literal to tokenize");
    assert_eq!(tokens[0].token_type, TokenType::Character);
    assert_eq!(
        tokens[0].diagnostics[0].message,
        "Missing closing quote on character literal"
    );
}

#[test]
fn test_end_of_input_after_quote_is_fatal() {
    assert!(matches!(
        tokenize("'"),
        Err(LexError::UnterminatedCharacter { .. })
    ));
}
