//! The Scoop grammar
//!
//! Built entirely from the combinators in [parsing](crate::scoop::parsing), over tokens:
//!
//!     unit        := statement* end
//!     statement   := block | return | raw-code | ';' | expression ';' | <unexpected token>
//!     expression  := seven left-associative binary levels over unary
//!     unary       := ('-' | '!' | '~') unary | postfix
//!     postfix     := primary ( '.' name | '?.' name | '(' arguments ')' | '[' expression, ... ']' )*
//!     primary     := identifier | literal | '(' expression ')'
//!
//! Grammar layers
//!
//!     A [`GrammarContext`] holds every grammar layer, assembled once up front and then passed
//!     to whatever needs to parse. The base layer is the grammar above. The named-arguments
//!     layer is derived from it by rewriting: its `Arguments` production is replaced by one
//!     that also accepts `name: value`. The base layer is not modified by the derivation.

pub mod expressions;
pub mod statements;

pub use expressions::{expression, ARGUMENTS, EXPRESSION};
pub use statements::{compilation_unit, statement, STATEMENT};

use crate::scoop::ast::{Argument, CompilationUnit, Expression};
use crate::scoop::error::GrammarError;
use crate::scoop::parsing::{
    deferred, fail, first, matching, rule, separated_list, PResult, Parser, Replaceable,
};
use crate::scoop::token::{Token, TokenType};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// A complete grammar: tokens in, compilation unit out
pub type Grammar = Parser<Token, CompilationUnit>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GrammarLayer {
    Base,
    NamedArguments,
}

impl GrammarLayer {
    pub const ALL: [GrammarLayer; 2] = [GrammarLayer::Base, GrammarLayer::NamedArguments];

    pub fn as_str(self) -> &'static str {
        match self {
            GrammarLayer::Base => "base",
            GrammarLayer::NamedArguments => "named-arguments",
        }
    }
}

impl fmt::Display for GrammarLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GrammarLayer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GrammarLayer::ALL
            .into_iter()
            .find(|layer| layer.as_str() == s)
            .ok_or_else(|| format!("unknown grammar layer '{s}'"))
    }
}

/// Every grammar layer, assembled once
#[derive(Debug, Clone)]
pub struct GrammarContext {
    base: Grammar,
    named_arguments: Grammar,
}

impl GrammarContext {
    pub fn new() -> Result<Self, GrammarError> {
        let base = base_grammar()?;
        let named_arguments = named_arguments_layer(&base)?;
        debug!("assembled grammar layers");
        Ok(Self {
            base,
            named_arguments,
        })
    }

    pub fn grammar(&self, layer: GrammarLayer) -> &Grammar {
        match layer {
            GrammarLayer::Base => &self.base,
            GrammarLayer::NamedArguments => &self.named_arguments,
        }
    }

    pub fn parse_str(&self, layer: GrammarLayer, text: &str) -> PResult<CompilationUnit> {
        self.grammar(layer).parse_str(text)
    }
}

/// The base grammar, standalone
pub fn base_grammar() -> Result<Grammar, GrammarError> {
    let expression = expression()?;
    let statement = statement(expression)?;
    Ok(compilation_unit(statement))
}

/// Derives the layer accepting `name: value` arguments from `base`
///
/// The new `Arguments` production needs the derived grammar's own expression parser, which
/// only exists once the rewrite is done, so it refers to it through a slot bound afterwards.
pub fn named_arguments_layer(base: &Grammar) -> Result<Grammar, GrammarError> {
    let value: Replaceable<Token, Expression> = Replaceable::new("ArgumentValue", fail());
    let argument = first(vec![
        rule(
            (identifier(), operator(":"), value.parser()),
            |(name, colon, value)| Argument::named(name, colon, value),
        ),
        value.parser().map(Argument::positional),
    ]);
    let arguments = separated_list(argument, operator(","), false).named(ARGUMENTS);

    let layer = base.replace_named(ARGUMENTS, arguments)?;
    let expression = layer
        .find_parser::<Expression>(EXPRESSION)
        .ok_or_else(|| GrammarError::NotFound(EXPRESSION.to_string()))?;
    value.bind(expression)?;
    Ok(layer)
}

/// An operator token with exactly this text
pub fn operator(text: &'static str) -> Parser<Token, Token> {
    matching(move |token: &Token| token.is_operator(text))
}

/// An operator token with any of these texts
pub fn operators(texts: &'static [&'static str]) -> Parser<Token, Token> {
    matching(move |token: &Token| {
        token.is_type(TokenType::Operator) && texts.contains(&token.value.as_str())
    })
}

pub fn keyword(text: &'static str) -> Parser<Token, Token> {
    matching(move |token: &Token| token.is_keyword(text))
}

pub fn token_type(token_type: TokenType) -> Parser<Token, Token> {
    matching(move |token: &Token| token.is_type(token_type))
}

pub fn identifier() -> Parser<Token, Token> {
    token_type(TokenType::Identifier)
}

/// Forward reference to a production defined later in the same grammar
pub(crate) struct Forward<O> {
    name: &'static str,
    cell: Arc<OnceLock<Parser<Token, O>>>,
}

impl<O: 'static> Forward<O> {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            cell: Arc::new(OnceLock::new()),
        }
    }

    pub(crate) fn parser(&self) -> Parser<Token, O> {
        let cell = Arc::clone(&self.cell);
        let unset = fail();
        deferred(move || cell.get().unwrap_or(&unset).clone())
    }

    pub(crate) fn define(&self, parser: Parser<Token, O>) -> Result<(), GrammarError> {
        self.cell
            .set(parser)
            .map_err(|_| GrammarError::AlreadyBound {
                name: self.name.to_string(),
            })
    }
}
