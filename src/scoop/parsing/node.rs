//! Type-erased parser nodes
//!
//! Rewriting walks a grammar whose nodes produce many different output types. [`AnyParser`]
//! hides the input and output types behind [`GrammarNode`] so traversal code can be written
//! once; a node is turned back into a typed [`Parser`] with [`AnyParser::downcast`].

use super::{deferred, Parser};
use crate::scoop::error::GrammarError;
use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

/// Lazy lookup of a rewritten node, used to close cycles
pub type Resolver = Arc<dyn Fn() -> Option<AnyParser> + Send + Sync>;

/// Object-safe view of a [`Parser`] regardless of its item and output types
pub trait GrammarNode: Send + Sync {
    fn id(&self) -> usize;
    fn kind(&self) -> &'static str;
    fn name(&self) -> Option<&str>;
    fn output_type(&self) -> &'static str;
    fn children(&self) -> Vec<AnyParser>;
    fn replace_child(
        &self,
        find: &AnyParser,
        replacement: &AnyParser,
    ) -> Result<Option<AnyParser>, GrammarError>;
    /// A stand-in of the same type that parses with whatever `resolve` returns, or with this
    /// node when it returns nothing
    fn lazy(&self, resolve: Resolver) -> AnyParser;
    fn as_any(&self) -> &dyn Any;
}

impl<I: 'static, O: 'static> GrammarNode for Parser<I, O> {
    fn id(&self) -> usize {
        Parser::id(self)
    }

    fn kind(&self) -> &'static str {
        Parser::kind(self)
    }

    fn name(&self) -> Option<&str> {
        Parser::name(self)
    }

    fn output_type(&self) -> &'static str {
        type_name::<O>()
    }

    fn children(&self) -> Vec<AnyParser> {
        Parser::children(self)
    }

    fn replace_child(
        &self,
        find: &AnyParser,
        replacement: &AnyParser,
    ) -> Result<Option<AnyParser>, GrammarError> {
        Ok(self
            .inner
            .replace_child(find, replacement)?
            .map(|parser| parser.erase()))
    }

    fn lazy(&self, resolve: Resolver) -> AnyParser {
        let original = self.clone();
        deferred(move || resolve_or(&resolve, &original)).erase()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Clone)]
pub struct AnyParser(Arc<dyn GrammarNode>);

impl AnyParser {
    pub fn new<I: 'static, O: 'static>(parser: Parser<I, O>) -> Self {
        Self(Arc::new(parser))
    }

    pub fn id(&self) -> usize {
        self.0.id()
    }

    pub fn kind(&self) -> &'static str {
        self.0.kind()
    }

    pub fn name(&self) -> Option<&str> {
        self.0.name()
    }

    pub fn output_type(&self) -> &'static str {
        self.0.output_type()
    }

    pub fn children(&self) -> Vec<AnyParser> {
        self.0.children()
    }

    pub fn replace_child(
        &self,
        find: &AnyParser,
        replacement: &AnyParser,
    ) -> Result<Option<AnyParser>, GrammarError> {
        self.0.replace_child(find, replacement)
    }

    pub fn lazy(&self, resolve: Resolver) -> AnyParser {
        self.0.lazy(resolve)
    }

    pub fn downcast<I: 'static, O: 'static>(&self) -> Option<Parser<I, O>> {
        self.0.as_any().downcast_ref::<Parser<I, O>>().cloned()
    }
}

impl fmt::Debug for AnyParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyParser")
            .field("kind", &self.kind())
            .field("name", &self.name())
            .field("output", &self.output_type())
            .finish()
    }
}

/// `replacement` as a `Parser<I, O>` when `child` is the node being replaced
pub(crate) fn substitute<I: 'static, O: 'static>(
    child: &Parser<I, O>,
    find: &AnyParser,
    replacement: &AnyParser,
) -> Result<Option<Parser<I, O>>, GrammarError> {
    if child.id() != find.id() {
        return Ok(None);
    }
    replacement
        .downcast::<I, O>()
        .map(Some)
        .ok_or_else(|| GrammarError::TypeMismatch {
            expected: type_name::<O>(),
            found: replacement.output_type(),
        })
}

/// Like [`substitute`], but always yields a parser plus whether it changed
pub(crate) fn substitute_or_keep<I: 'static, O: 'static>(
    child: &Parser<I, O>,
    find: &AnyParser,
    replacement: &AnyParser,
) -> Result<(Parser<I, O>, bool), GrammarError> {
    Ok(match substitute(child, find, replacement)? {
        Some(parser) => (parser, true),
        None => (child.clone(), false),
    })
}

/// Typed lookup through a [`Resolver`], falling back to `original`
pub(crate) fn resolve_or<I: 'static, O: 'static>(
    resolve: &Resolver,
    original: &Parser<I, O>,
) -> Parser<I, O> {
    resolve()
        .and_then(|node| node.downcast::<I, O>())
        .unwrap_or_else(|| original.clone())
}
