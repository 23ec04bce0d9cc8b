//! Expression nodes

use super::NodeInfo;
use crate::scoop::diagnostics::{Diagnostic, SyntaxElement};
use crate::scoop::location::Location;
use crate::scoop::parsing::Recover;
use crate::scoop::token::Token;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub info: NodeInfo,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionKind {
    Identifier(Token),
    /// Numbers, strings, characters and the literal keywords (`true`, `null`, ...)
    Literal(Token),
    Prefix {
        operator: Token,
        operand: Box<Expression>,
    },
    Binary {
        left: Box<Expression>,
        operator: Token,
        right: Box<Expression>,
    },
    MemberAccess {
        target: Box<Expression>,
        operator: Token,
        member: Token,
    },
    Invoke {
        target: Box<Expression>,
        arguments: Vec<Argument>,
    },
    Index {
        target: Box<Expression>,
        arguments: Vec<Expression>,
    },
    Parenthesized(Box<Expression>),
    /// Placeholder for an expression that was required but not found
    Missing,
}

impl Expression {
    fn new(kind: ExpressionKind, location: Option<Location>) -> Self {
        Self {
            kind,
            info: NodeInfo::at(location),
        }
    }

    pub fn identifier(name: Token) -> Self {
        let location = Some(name.location.clone());
        Self::new(ExpressionKind::Identifier(name), location)
    }

    pub fn literal(value: Token) -> Self {
        let location = Some(value.location.clone());
        Self::new(ExpressionKind::Literal(value), location)
    }

    pub fn prefix(operator: Token, operand: Expression) -> Self {
        let location = Some(operator.location.clone());
        Self::new(
            ExpressionKind::Prefix {
                operator,
                operand: Box::new(operand),
            },
            location,
        )
    }

    pub fn binary(left: Expression, operator: Token, right: Expression) -> Self {
        let location = left.location().cloned();
        Self::new(
            ExpressionKind::Binary {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            },
            location,
        )
    }

    pub fn member_access(target: Expression, operator: Token, member: Token) -> Self {
        let location = target.location().cloned();
        Self::new(
            ExpressionKind::MemberAccess {
                target: Box::new(target),
                operator,
                member,
            },
            location,
        )
    }

    /// `target(arguments)`; the parentheses are kept as satellites
    pub fn invoke(target: Expression, open: Token, arguments: Vec<Argument>, close: Token) -> Self {
        let location = target.location().cloned();
        let mut invoke = Self::new(
            ExpressionKind::Invoke {
                target: Box::new(target),
                arguments,
            },
            location,
        );
        invoke.info.unused.extend([open, close]);
        invoke
    }

    pub fn index(
        target: Expression,
        open: Token,
        arguments: Vec<Expression>,
        close: Token,
    ) -> Self {
        let location = target.location().cloned();
        let mut index = Self::new(
            ExpressionKind::Index {
                target: Box::new(target),
                arguments,
            },
            location,
        );
        index.info.unused.extend([open, close]);
        index
    }

    pub fn parenthesized(open: Token, inner: Expression, close: Token) -> Self {
        let location = Some(open.location.clone());
        let mut parenthesized =
            Self::new(ExpressionKind::Parenthesized(Box::new(inner)), location);
        parenthesized.info.unused.extend([open, close]);
        parenthesized
    }

    pub fn is_missing(&self) -> bool {
        matches!(self.kind, ExpressionKind::Missing)
    }
}

impl Recover for Expression {
    fn recover(diagnostic: Diagnostic) -> Self {
        Self {
            kind: ExpressionKind::Missing,
            info: NodeInfo::recovered(diagnostic),
        }
    }
}

impl SyntaxElement for Expression {
    fn location(&self) -> Option<&Location> {
        self.info.location.as_ref()
    }

    fn diagnostics(&self) -> &[Diagnostic] {
        &self.info.diagnostics
    }

    fn unused(&self) -> Vec<&dyn SyntaxElement> {
        self.info.unused_elements()
    }

    fn children(&self) -> Vec<&dyn SyntaxElement> {
        match &self.kind {
            ExpressionKind::Identifier(token) | ExpressionKind::Literal(token) => {
                vec![token as &dyn SyntaxElement]
            }
            ExpressionKind::Prefix { operator, operand } => {
                vec![operator as &dyn SyntaxElement, operand.as_ref()]
            }
            ExpressionKind::Binary {
                left,
                operator,
                right,
            } => vec![left.as_ref() as &dyn SyntaxElement, operator, right.as_ref()],
            ExpressionKind::MemberAccess {
                target,
                operator,
                member,
            } => vec![target.as_ref() as &dyn SyntaxElement, operator, member],
            ExpressionKind::Invoke { target, arguments } => {
                let mut children = vec![target.as_ref() as &dyn SyntaxElement];
                children.extend(arguments.iter().map(|a| a as &dyn SyntaxElement));
                children
            }
            ExpressionKind::Index { target, arguments } => {
                let mut children = vec![target.as_ref() as &dyn SyntaxElement];
                children.extend(arguments.iter().map(|a| a as &dyn SyntaxElement));
                children
            }
            ExpressionKind::Parenthesized(inner) => vec![inner.as_ref() as &dyn SyntaxElement],
            ExpressionKind::Missing => Vec::new(),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExpressionKind::Identifier(token) | ExpressionKind::Literal(token) => {
                write!(f, "{}", token.value)
            }
            ExpressionKind::Prefix { operator, operand } => {
                write!(f, "({}{})", operator.value, operand)
            }
            ExpressionKind::Binary {
                left,
                operator,
                right,
            } => write!(f, "({} {} {})", left, operator.value, right),
            ExpressionKind::MemberAccess {
                target,
                operator,
                member,
            } => write!(f, "{}{}{}", target, operator.value, member.value),
            ExpressionKind::Invoke { target, arguments } => {
                write!(f, "{}(", target)?;
                write_list(f, arguments)?;
                write!(f, ")")
            }
            ExpressionKind::Index { target, arguments } => {
                write!(f, "{}[", target)?;
                write_list(f, arguments)?;
                write!(f, "]")
            }
            ExpressionKind::Parenthesized(inner) => write!(f, "({})", inner),
            ExpressionKind::Missing => write!(f, "<missing>"),
        }
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

/// One argument of an invocation, optionally named (`name: value`)
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: Option<Token>,
    pub value: Expression,
    pub info: NodeInfo,
}

impl Argument {
    pub fn positional(value: Expression) -> Self {
        let location = value.location().cloned();
        Self {
            name: None,
            value,
            info: NodeInfo::at(location),
        }
    }

    /// `name: value`; the colon is kept as a satellite
    pub fn named(name: Token, colon: Token, value: Expression) -> Self {
        let location = Some(name.location.clone());
        Self {
            name: Some(name),
            value,
            info: NodeInfo::at(location).with_unused([colon]),
        }
    }
}

impl SyntaxElement for Argument {
    fn location(&self) -> Option<&Location> {
        self.info.location.as_ref()
    }

    fn diagnostics(&self) -> &[Diagnostic] {
        &self.info.diagnostics
    }

    fn unused(&self) -> Vec<&dyn SyntaxElement> {
        self.info.unused_elements()
    }

    fn children(&self) -> Vec<&dyn SyntaxElement> {
        let mut children: Vec<&dyn SyntaxElement> = Vec::new();
        if let Some(name) = &self.name {
            children.push(name);
        }
        children.push(&self.value);
        children
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}: {}", name.value, self.value),
            None => write!(f, "{}", self.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoop::diagnostics::validate;
    use crate::scoop::token::TokenType;

    fn token(value: &str, token_type: TokenType, column: usize) -> Token {
        Token::new(value, token_type, Location::new("t", 1, column))
    }

    #[test]
    fn test_display_is_fully_parenthesized() {
        let one = Expression::literal(token("1", TokenType::Integer, 1));
        let two = Expression::literal(token("2", TokenType::Integer, 5));
        let sum = Expression::binary(one, token("+", TokenType::Operator, 3), two);
        let negated = Expression::prefix(token("-", TokenType::Operator, 1), sum);
        assert_eq!(negated.to_string(), "(-(1 + 2))");
    }

    #[test]
    fn test_missing_operand_reports_once() {
        let one = Expression::literal(token("1", TokenType::Integer, 1));
        let missing = Expression::recover(Diagnostic::new(
            "Expected expression after operator '+'",
            Location::new("t", 1, 4),
        ));
        let sum = Expression::binary(one, token("+", TokenType::Operator, 3), missing);
        assert_eq!(sum.to_string(), "(1 + <missing>)");
        let diagnostics = validate(&sum);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains('+'));
    }

    #[test]
    fn test_named_argument() {
        let value = Expression::literal(token("1", TokenType::Integer, 4));
        let argument = Argument::named(
            token("a", TokenType::Identifier, 1),
            token(":", TokenType::Operator, 2),
            value,
        );
        assert_eq!(argument.to_string(), "a: 1");
        assert_eq!(argument.location(), Some(&Location::new("t", 1, 1)));
    }
}
