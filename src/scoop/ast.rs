//! Syntax tree
//!
//!     The tree is a closed set of sum types: [`Expression`], [`Statement`] and the
//!     [`CompilationUnit`] at the root. Traversal is an exhaustive `match` over the node kind,
//!     so adding a kind is a compile error everywhere it is not handled.
//!
//!     Every node carries a [`NodeInfo`]: where it starts, the diagnostics attached directly to
//!     it, and its unused satellites. Satellites are tokens consumed while parsing the node
//!     (a statement's `;`, the parentheses around an argument list) that have no place in the
//!     logical tree. A satellite may be a recovered placeholder, in which case it carries the
//!     diagnostic explaining what was missing.
//!
//!     Display renders a compact, fully parenthesized form used in tests and debug output:
//!
//!         a.b(1 + 2 * 3)      =>   a.b((1 + (2 * 3)))

pub mod expression;
pub mod statement;

pub use expression::{Argument, Expression, ExpressionKind};
pub use statement::{CompilationUnit, Statement, StatementKind};

use crate::scoop::diagnostics::{Diagnostic, SyntaxElement};
use crate::scoop::location::Location;
use crate::scoop::token::Token;

/// Bookkeeping shared by every node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeInfo {
    pub location: Option<Location>,
    pub diagnostics: Vec<Diagnostic>,
    pub unused: Vec<Token>,
}

impl NodeInfo {
    pub fn at(location: Option<Location>) -> Self {
        Self {
            location,
            ..Self::default()
        }
    }

    /// Info for a placeholder standing in for a missing production
    pub fn recovered(diagnostic: Diagnostic) -> Self {
        Self {
            location: diagnostic.location.clone(),
            diagnostics: vec![diagnostic],
            unused: Vec::new(),
        }
    }

    pub fn with_unused(mut self, tokens: impl IntoIterator<Item = Token>) -> Self {
        self.unused.extend(tokens);
        self
    }

    pub fn with_diagnostic(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostics.push(diagnostic);
        self
    }

    pub(crate) fn unused_elements(&self) -> Vec<&dyn SyntaxElement> {
        self.unused
            .iter()
            .map(|token| token as &dyn SyntaxElement)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoop::diagnostics::validate;
    use crate::scoop::parsing::Recover;
    use crate::scoop::token::TokenType;

    fn at(column: usize) -> Location {
        Location::new("t.scoop", 1, column)
    }

    #[test]
    fn test_recovered_info_keeps_location() {
        let info = NodeInfo::recovered(Diagnostic::new("Expected ')'", at(4)));
        assert_eq!(info.location, Some(at(4)));
        assert_eq!(info.diagnostics.len(), 1);
    }

    #[test]
    fn test_satellite_diagnostics_surface() {
        let name = Token::new("x", TokenType::Identifier, at(1));
        let semicolon = Token::recover(Diagnostic::unlocated("Expected ';'"));
        let statement = Statement::expression(Expression::identifier(name), semicolon);
        let diagnostics = validate(&statement);
        assert_eq!(diagnostics.len(), 1);
        // the placeholder had no location; it inherits the statement's
        assert_eq!(diagnostics[0].to_string(), "t.scoop:1:1: Expected ';'");
    }
}
