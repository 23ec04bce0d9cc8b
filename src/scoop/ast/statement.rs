//! Statement nodes and the compilation unit

use super::{Expression, NodeInfo};
use crate::scoop::diagnostics::{Diagnostic, SyntaxElement};
use crate::scoop::location::Location;
use crate::scoop::parsing::Recover;
use crate::scoop::token::Token;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub kind: StatementKind,
    pub info: NodeInfo,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    Expression(Expression),
    Return(Option<Expression>),
    Block(Vec<Statement>),
    /// An embedded `c# { ... }` block, passed through untranslated
    RawCode(Token),
    /// A lone `;`, or a placeholder for a statement that could not be parsed
    Empty,
}

impl Statement {
    /// `expression;`
    pub fn expression(expression: Expression, semicolon: Token) -> Self {
        let location = expression.location().cloned();
        Self {
            kind: StatementKind::Expression(expression),
            info: NodeInfo::at(location).with_unused([semicolon]),
        }
    }

    /// `return value;`
    pub fn return_value(keyword: Token, value: Option<Expression>, semicolon: Token) -> Self {
        Self {
            kind: StatementKind::Return(value),
            info: NodeInfo::at(Some(keyword.location.clone())).with_unused([keyword, semicolon]),
        }
    }

    pub fn block(open: Token, statements: Vec<Statement>, close: Token) -> Self {
        Self {
            kind: StatementKind::Block(statements),
            info: NodeInfo::at(Some(open.location.clone())).with_unused([open, close]),
        }
    }

    pub fn raw_code(code: Token) -> Self {
        Self {
            info: NodeInfo::at(Some(code.location.clone())),
            kind: StatementKind::RawCode(code),
        }
    }

    pub fn empty(semicolon: Token) -> Self {
        Self {
            kind: StatementKind::Empty,
            info: NodeInfo::at(Some(semicolon.location.clone())).with_unused([semicolon]),
        }
    }

    /// A token that cannot start a statement, skipped with a diagnostic
    pub fn unexpected(token: Token) -> Self {
        let diagnostic = Diagnostic::new(format!("Unexpected '{}'", token), token.location.clone());
        Self {
            kind: StatementKind::Empty,
            info: NodeInfo::at(Some(token.location.clone()))
                .with_diagnostic(diagnostic)
                .with_unused([token]),
        }
    }
}

impl Recover for Statement {
    fn recover(diagnostic: Diagnostic) -> Self {
        Self {
            kind: StatementKind::Empty,
            info: NodeInfo::recovered(diagnostic),
        }
    }
}

impl SyntaxElement for Statement {
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
            StatementKind::Expression(expression) => vec![expression as &dyn SyntaxElement],
            StatementKind::Return(value) => value
                .iter()
                .map(|value| value as &dyn SyntaxElement)
                .collect(),
            StatementKind::Block(statements) => statements
                .iter()
                .map(|statement| statement as &dyn SyntaxElement)
                .collect(),
            StatementKind::RawCode(code) => vec![code as &dyn SyntaxElement],
            StatementKind::Empty => Vec::new(),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            StatementKind::Expression(expression) => write!(f, "{};", expression),
            StatementKind::Return(Some(value)) => write!(f, "return {};", value),
            StatementKind::Return(None) => write!(f, "return;"),
            StatementKind::Block(statements) => {
                write!(f, "{{")?;
                for statement in statements {
                    write!(f, " {}", statement)?;
                }
                write!(f, " }}")
            }
            StatementKind::RawCode(code) => write!(f, "c# {{{}}}", code.value),
            StatementKind::Empty => write!(f, ";"),
        }
    }
}

/// Root of a parsed source file
#[derive(Debug, Clone, PartialEq)]
pub struct CompilationUnit {
    pub statements: Vec<Statement>,
    pub info: NodeInfo,
}

impl CompilationUnit {
    /// `end` is the end-of-input token, or a placeholder when input was left over
    pub fn new(statements: Vec<Statement>, end: Token) -> Self {
        let location = statements
            .first()
            .and_then(|statement| statement.location().cloned())
            .or_else(|| Some(end.location.clone()));
        Self {
            statements,
            info: NodeInfo::at(location).with_unused([end]),
        }
    }
}

impl SyntaxElement for CompilationUnit {
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
        self.statements
            .iter()
            .map(|statement| statement as &dyn SyntaxElement)
            .collect()
    }
}

impl fmt::Display for CompilationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, statement) in self.statements.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", statement)?;
        }
        Ok(())
    }
}
