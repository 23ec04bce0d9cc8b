//! Entry points
//!
//! Thin wrappers wiring source text through the lexer and a grammar, for callers that do
//! not need to drive [`Sequence`](crate::scoop::sequence::Sequence)s themselves.
//!
//!     let context = GrammarContext::new()?;
//!     let output = parse(context.grammar(GrammarLayer::Base), "f(1);")?;
//!     for diagnostic in &output.diagnostics { ... }
//!
//! A fatal tokenizing error comes back as `Err` and no tree is produced. Otherwise the tree
//! is always complete, and `diagnostics` lists every syntax problem in source order.

use crate::scoop::ast::CompilationUnit;
use crate::scoop::diagnostics::{validate, Diagnostic};
use crate::scoop::error::LexResult;
use crate::scoop::grammar::Grammar;
use crate::scoop::lexing::Lexer;
use crate::scoop::location::{Location, DEFAULT_SOURCE_NAME};
use crate::scoop::parsing::{ParseResult, Recover};
use crate::scoop::sequence::{CharacterSequence, TokenSequence};
use crate::scoop::token::Token;

/// A parsed tree together with everything [`validate`] found in it
#[derive(Debug, Clone)]
pub struct ParseOutput {
    pub unit: CompilationUnit,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutput {
    pub fn is_well_formed(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Every token of `text`, ending with the end-of-input token
pub fn tokenize(text: &str) -> LexResult<Vec<Token>> {
    tokenize_source(DEFAULT_SOURCE_NAME, text, &Lexer::new())
}

pub fn tokenize_source(source: &str, text: &str, lexer: &Lexer) -> LexResult<Vec<Token>> {
    let mut chars = CharacterSequence::named(source, text);
    lexer.tokenize(&mut chars)
}

pub fn parse(grammar: &Grammar, text: &str) -> LexResult<ParseOutput> {
    parse_source(grammar, DEFAULT_SOURCE_NAME, text, Lexer::new())
}

/// Parses `text` with locations naming `source`, then validates the tree
pub fn parse_source(
    grammar: &Grammar,
    source: &str,
    text: &str,
    lexer: Lexer,
) -> LexResult<ParseOutput> {
    let mut tokens = TokenSequence::new(CharacterSequence::named(source, text), lexer);
    let unit = match grammar.parse(&mut tokens)? {
        ParseResult::Success(unit) => unit,
        ParseResult::Failure => {
            let diagnostic =
                Diagnostic::new("Input could not be parsed", Location::start_of(source));
            CompilationUnit::new(Vec::new(), Token::recover(diagnostic))
        }
    };
    let diagnostics = validate(&unit);
    Ok(ParseOutput { unit, diagnostics })
}
