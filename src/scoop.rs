//! Main module for scoop library functionality
//!
//!     text -> CharacterSequence -> Lexer -> TokenSequence -> grammar -> tree -> validate
//!
//! [sequence] holds the backtracking cursors, [lexing] the scanner, [parsing] the combinator
//! engine and grammar rewriting, [grammar] the Scoop grammar built on it and [ast] the tree it
//! produces. [api] wires them together.

pub mod api;
pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod grammar;
pub mod lexing;
pub mod location;
pub mod parsing;
pub mod sequence;
pub mod token;

pub use api::{parse, parse_source, tokenize, ParseOutput};
pub use ast::CompilationUnit;
pub use diagnostics::{validate, Diagnostic, SyntaxElement};
pub use error::{GrammarError, LexError};
pub use grammar::{GrammarContext, GrammarLayer};
pub use location::Location;
pub use parsing::{ParseResult, Parser};
pub use sequence::Sequence;
pub use token::{Token, TokenType};
