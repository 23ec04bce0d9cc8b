//! Expressions

use super::{identifier, operator, operators, Forward};
use crate::scoop::ast::{Argument, Expression};
use crate::scoop::error::GrammarError;
use crate::scoop::parsing::{
    apply_postfix, first, infix, matching, required, rule, separated_list, Parser,
};
use crate::scoop::token::{Token, TokenType};

/// Name of the complete expression production
pub const EXPRESSION: &str = "Expression";
/// Name of the argument list inside an invocation
pub const ARGUMENTS: &str = "Arguments";

/// Binary operators from tightest to loosest binding
const BINARY_LEVELS: [&[&str]; 7] = [
    &["*", "/", "%"],
    &["+", "-"],
    &["<", ">", "<=", ">="],
    &["==", "!="],
    &["&&"],
    &["||"],
    &["??"],
];

const PREFIX_OPERATORS: &[&str] = &["-", "!", "~"];

const LITERAL_KEYWORDS: &[&str] = &["true", "false", "null", "this", "base"];

/// Builds the expression grammar
pub fn expression() -> Result<Parser<Token, Expression>, GrammarError> {
    let whole = Forward::new(EXPRESSION);
    let unary = Forward::new("Unary");

    let prefixed = rule(
        (operators(PREFIX_OPERATORS), unary.parser()),
        |(operator, operand)| Expression::prefix(operator, operand),
    );
    let operand = first(vec![prefixed, postfix(primary(whole.parser()), whole.parser())]);
    unary.define(operand.clone())?;

    let mut chain = operand;
    for level in BINARY_LEVELS {
        chain = infix(chain, operators(level), Expression::binary);
    }
    let expression = chain.named(EXPRESSION);
    whole.define(expression.clone())?;
    Ok(expression)
}

fn literal() -> Parser<Token, Token> {
    matching(|token: &Token| {
        token.token_type.is_literal()
            || (token.token_type == TokenType::Keyword
                && LITERAL_KEYWORDS.contains(&token.value.as_str()))
    })
}

fn primary(expression: Parser<Token, Expression>) -> Parser<Token, Expression> {
    first(vec![
        identifier().map(Expression::identifier),
        literal().map(Expression::literal),
        rule(
            (
                operator("("),
                required(expression, "Expected expression"),
                required(operator(")"), "Expected ')'"),
            ),
            |(open, inner, close)| Expression::parenthesized(open, inner, close),
        ),
    ])
}

fn postfix(
    primary: Parser<Token, Expression>,
    expression: Parser<Token, Expression>,
) -> Parser<Token, Expression> {
    let arguments =
        separated_list(expression.clone().map(Argument::positional), operator(","), false)
            .named(ARGUMENTS);
    let indices = separated_list(expression, operator(","), true);

    apply_postfix(primary, move |left| {
        first(vec![
            rule(
                (
                    left.clone(),
                    operators(&[".", "?."]),
                    required(identifier(), "Expected member name"),
                ),
                |(target, operator, member)| Expression::member_access(target, operator, member),
            ),
            rule(
                (
                    left.clone(),
                    operator("("),
                    arguments,
                    required(operator(")"), "Expected ')'"),
                ),
                |(target, open, arguments, close)| {
                    Expression::invoke(target, open, arguments, close)
                },
            ),
            rule(
                (
                    left,
                    operator("["),
                    indices,
                    required(operator("]"), "Expected ']'"),
                ),
                |(target, open, indices, close)| Expression::index(target, open, indices, close),
            ),
        ])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoop::diagnostics::validate;
    use crate::scoop::parsing::ParseResult;
    use crate::scoop::sequence::{Sequence, TokenSequence};
    use rstest::rstest;

    fn parse(text: &str) -> Expression {
        expression()
            .unwrap()
            .parse_str(text)
            .unwrap()
            .value()
            .unwrap()
    }

    #[rstest]
    #[case("1 + 2 * 3", "(1 + (2 * 3))")]
    #[case("1 - 2 - 3", "((1 - 2) - 3)")]
    #[case("a < b == c > d", "((a < b) == (c > d))")]
    #[case("a || b && c", "(a || (b && c))")]
    #[case("a ?? b || c", "(a ?? (b || c))")]
    #[case("-x * !y", "((-x) * (!y))")]
    #[case("- -x", "(-(-x))")]
    #[case("!!done", "(!(!done))")]
    #[case("(1 + 2) * 3", "(((1 + 2)) * 3)")]
    #[case("a.b?.c", "a.b?.c")]
    #[case("f(1, g(2))[0]", "f(1, g(2))[0]")]
    #[case("x.y(z)[1, 2].w", "x.y(z)[1, 2].w")]
    #[case("this.count != null", "(this.count != null)")]
    #[case("\"s\" + 'c' + 1.5F", "((\"s\" + 'c') + 1.5)")]
    fn test_expression_shapes(#[case] text: &str, #[case] expected: &str) {
        let expression = parse(text);
        assert_eq!(expression.to_string(), expected);
        assert!(validate(&expression).is_empty());
    }

    #[test]
    fn test_missing_right_operand() {
        let expression = parse("1 +");
        assert_eq!(expression.to_string(), "(1 + <missing>)");
        let diagnostics = validate(&expression);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].to_string(),
            "<input>:1:4: Expected expression after operator '+'"
        );
    }

    #[test]
    fn test_missing_member_name() {
        let expression = parse("a.;");
        assert_eq!(expression.to_string(), "a.");
        assert_eq!(validate(&expression)[0].message, "Expected member name");
    }

    #[test]
    fn test_unclosed_invocation() {
        let expression = parse("f(1");
        assert_eq!(expression.to_string(), "f(1)");
        assert_eq!(validate(&expression)[0].message, "Expected ')'");
    }

    #[test]
    fn test_non_expression_fails_without_consuming() {
        let grammar = expression().unwrap();
        let mut tokens = TokenSequence::from_source("; x");
        assert_eq!(grammar.parse(&mut tokens).unwrap(), ParseResult::Failure);
        assert_eq!(tokens.consumed(), 0);
    }
}
