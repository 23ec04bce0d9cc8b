//! # scoop
//!
//! Lexer and parser-combinator engine for the Scoop language.
//!
//! File Layout
//!
//! The crate is split the same way the data flows through it:
//! src/scoop
//!   ├── location / diagnostics / error   Value types shared by every stage
//!   ├── sequence                         Peekable, rewindable cursors (chars, tokens, items)
//!   ├── lexing                           Character sequence -> token sequence
//!   ├── parsing                          The combinator engine and grammar-tree rewriting
//!   ├── ast                              Syntax tree produced by the bundled grammar
//!   └── grammar                          Expression/statement grammar and its layers
//!
//! Recoverable syntax errors never abort a parse; they are attached to the produced tree as
//! [diagnostics](scoop::diagnostics) and collected afterwards with
//! [validate](scoop::diagnostics::validate). Only fatal tokenizing errors
//! ([LexError](scoop::error::LexError)) unwind a parse.

#![allow(rustdoc::invalid_html_tags)]

pub mod scoop;
