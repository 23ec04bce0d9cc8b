//! Statements and the compilation unit

use super::{keyword, operator, token_type, Forward};
use crate::scoop::ast::{CompilationUnit, Expression, Statement};
use crate::scoop::error::GrammarError;
use crate::scoop::parsing::{first, list, matching, optional, required, rule, Parser};
use crate::scoop::token::{Token, TokenType};

/// Name of the statement production
pub const STATEMENT: &str = "Statement";

fn semicolon() -> Parser<Token, Token> {
    required(operator(";"), "Expected ';'")
}

/// Builds the statement grammar over `expression`
pub fn statement(
    expression: Parser<Token, Expression>,
) -> Result<Parser<Token, Statement>, GrammarError> {
    let nested = Forward::new(STATEMENT);

    let block = rule(
        (
            operator("{"),
            list(nested.parser(), false),
            required(operator("}"), "Expected '}'"),
        ),
        |(open, statements, close)| Statement::block(open, statements, close),
    );
    let return_statement = rule(
        (
            keyword("return"),
            optional(expression.clone().map(Some), || None),
            semicolon(),
        ),
        |(keyword, value, semicolon)| Statement::return_value(keyword, value, semicolon),
    );
    let raw_code = token_type(TokenType::RawCode).map(Statement::raw_code);
    let empty = operator(";").map(Statement::empty);
    let expression_statement = rule((expression, semicolon()), |(expression, semicolon)| {
        Statement::expression(expression, semicolon)
    });
    // anything else is skipped one token at a time; '}' is left for the enclosing block
    let unexpected = matching(|token: &Token| !token.is_end() && !token.is_operator("}"))
        .map(Statement::unexpected);

    let statement = first(vec![
        block,
        return_statement,
        raw_code,
        empty,
        expression_statement,
        unexpected,
    ])
    .named(STATEMENT);
    nested.define(statement.clone())?;
    Ok(statement)
}

/// `statement* end`
///
/// Never fails: stray closing braces become unexpected-token statements, and the end of
/// input is required.
pub fn compilation_unit(statement: Parser<Token, Statement>) -> Parser<Token, CompilationUnit> {
    let stray = matching(|token: &Token| !token.is_end()).map(Statement::unexpected);
    rule(
        (
            list(first(vec![statement, stray]), false),
            required(matching(Token::is_end), "Expected end of input"),
        ),
        |(statements, end)| CompilationUnit::new(statements, end),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoop::diagnostics::validate;
    use crate::scoop::grammar::base_grammar;

    fn parse(text: &str) -> CompilationUnit {
        base_grammar()
            .unwrap()
            .parse_str(text)
            .unwrap()
            .value()
            .unwrap()
    }

    #[test]
    fn test_statement_kinds() {
        let unit = parse("f(x); return; { return a + 1; ; } c# { int x = 1; }");
        assert_eq!(
            unit.to_string(),
            "f(x);\nreturn;\n{ return (a + 1); ; }\nc# { int x = 1; }"
        );
        assert!(validate(&unit).is_empty());
    }

    #[test]
    fn test_missing_semicolon_is_one_diagnostic() {
        let unit = parse("f(1)\nreturn 2;");
        let diagnostics = validate(&unit);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].to_string(), "<input>:2:1: Expected ';'");
        assert_eq!(unit.statements.len(), 2);
    }

    #[test]
    fn test_unclosed_block() {
        let unit = parse("{ x;");
        let diagnostics = validate(&unit);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "Expected '}'");
    }

    #[test]
    fn test_stray_tokens_are_skipped() {
        let unit = parse("} x; )");
        let messages: Vec<_> = validate(&unit).into_iter().map(|d| d.message).collect();
        assert_eq!(messages, vec!["Unexpected '}'", "Unexpected ')'"]);
        assert_eq!(unit.statements.len(), 3);
    }

    #[test]
    fn test_empty_input() {
        let unit = parse("   // just a comment\n");
        assert!(unit.statements.is_empty());
        assert!(validate(&unit).is_empty());
    }
}
