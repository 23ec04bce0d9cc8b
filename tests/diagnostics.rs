//! Recoverable diagnostics versus fatal tokenizing errors

use scoop::scoop::api::{parse, parse_source};
use scoop::scoop::diagnostics::validate;
use scoop::scoop::error::LexError;
use scoop::scoop::grammar::base_grammar;
use scoop::scoop::lexing::Lexer;

fn render(source: &str) -> String {
    let grammar = base_grammar().unwrap();
    let output = parse_source(&grammar, "demo.scoop", source, Lexer::new()).unwrap();
    output
        .diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_missing_semicolon_yields_one_diagnostic() {
    let grammar = base_grammar().unwrap();
    let output = parse(&grammar, "a.b(1)\nreturn a;").unwrap();
    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(output.unit.statements.len(), 2);
    insta::assert_snapshot!(output.diagnostics[0].to_string(), @"<input>:2:1: Expected ';'");
}

#[test]
fn test_many_problems_in_one_pass() {
    insta::assert_snapshot!(render("f(1)\nreturn 2 +;\n{ x.;"), @r###"
    demo.scoop:2:1: Expected ';'
    demo.scoop:2:11: Expected expression after operator '+'
    demo.scoop:3:5: Expected member name
    demo.scoop:3:6: Expected '}'
    "###);
}

#[test]
fn test_lexer_diagnostics_surface_through_the_tree() {
    insta::assert_snapshot!(render("x = '';"), @r###"
    demo.scoop:1:3: Expected ';'
    demo.scoop:1:3: Unexpected '='
    demo.scoop:1:5: Empty character literal
    "###);
}

#[test]
fn test_well_formed_source() {
    let grammar = base_grammar().unwrap();
    let output = parse(&grammar, "{ a(b, c[0]); return -d ?? e; }\nc# { raw(); }").unwrap();
    assert!(output.is_well_formed());
    assert!(validate(&output.unit).is_empty());
}

#[test]
fn test_unterminated_string_aborts_parse() {
    let grammar = base_grammar().unwrap();
    let result = parse(&grammar, "f(1);\ng(\"oops);");
    let Err(error) = result else {
        panic!("expected a fatal error");
    };
    assert!(matches!(error, LexError::UnterminatedString { .. }));
    assert_eq!(error.to_string(), "<input>:2:3: unterminated string literal");
}

#[test]
fn test_unterminated_raw_code_aborts_parse() {
    let grammar = base_grammar().unwrap();
    assert!(matches!(
        parse(&grammar, "c# { never closed"),
        Err(LexError::UnterminatedRawCode { .. })
    ));
}

#[test]
fn test_diagnostics_serialize_with_locations() {
    let grammar = base_grammar().unwrap();
    let output = parse(&grammar, "x").unwrap();
    let json = serde_json::to_value(&output.diagnostics).unwrap();
    assert_eq!(json[0]["message"], "Expected ';'");
    assert_eq!(json[0]["location"]["line"], 1);
    assert_eq!(json[0]["location"]["column"], 2);
    assert_eq!(json[0]["location"]["source"], "<input>");
}
