//! Diagnostics and the validation walk
//!
//! A [`Diagnostic`] is a located error message attached to a produced node instead of being
//! thrown. Diagnostics are created by the parser wherever a production marked required did not
//! match, and by the lexer for recoverable literal problems.
//!
//! ## Ownership
//!
//! Every node in a finished tree implements [`SyntaxElement`]: it exposes its location, the
//! diagnostics attached directly to it, its logical children and its "unused" satellites
//! (tokens such as `;`, or error placeholders, consumed while parsing but not part of the
//! logical tree). A diagnostic may be created without a location when the position is only
//! known later; [`validate`] back-fills it from the owning node.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let unit = grammar.parse_str(source)?.value().expect("unit always parses");
//! for diagnostic in validate(&unit) {
//!     eprintln!("{}", diagnostic);
//! }
//! ```
//!
//! A tree with zero diagnostics is well-formed: every placeholder substituted during recovery
//! carries at least one diagnostic.

use crate::scoop::location::Location;
use serde::Serialize;
use std::fmt;

/// A located error message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub message: String,
    pub location: Option<Location>,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, location: Location) -> Self {
        Self {
            message: message.into(),
            location: Some(location),
        }
    }

    /// A diagnostic whose position is filled in later by [`validate`]
    pub fn unlocated(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
        }
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Returns a copy located at `fallback` when this diagnostic has no location yet
    pub fn located_or(&self, fallback: Option<&Location>) -> Self {
        match (&self.location, fallback) {
            (None, Some(location)) => self.clone().with_location(location.clone()),
            _ => self.clone(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{}: {}", location, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// The contract every produced node satisfies
pub trait SyntaxElement {
    fn location(&self) -> Option<&Location>;

    /// Diagnostics attached directly to this element
    fn diagnostics(&self) -> &[Diagnostic];

    /// Fragments consumed while parsing that are not part of the logical tree
    fn unused(&self) -> Vec<&dyn SyntaxElement> {
        Vec::new()
    }

    /// Logical children, in source order
    fn children(&self) -> Vec<&dyn SyntaxElement> {
        Vec::new()
    }
}

/// Collects every diagnostic in a finished tree
///
/// The walk is pre-order: a node's own diagnostics, then those of its unused satellites, then
/// its children. Diagnostics without a location inherit the location of the element that owns
/// them, or of the nearest located ancestor.
///
/// The result is in source order. Diagnostics at the same position keep walk order.
pub fn validate(root: &dyn SyntaxElement) -> Vec<Diagnostic> {
    let mut collector = DiagnosticCollector::default();
    collector.visit(root, None);
    let mut diagnostics = collector.diagnostics;
    diagnostics.sort_by_key(|diagnostic| {
        diagnostic
            .location
            .as_ref()
            .map_or((1, 0, 0), |location| (0, location.line, location.column))
    });
    diagnostics
}

/// True when the tree carries no diagnostics anywhere
pub fn is_well_formed(root: &dyn SyntaxElement) -> bool {
    validate(root).is_empty()
}

#[derive(Default)]
struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    fn visit(&mut self, element: &dyn SyntaxElement, inherited: Option<&Location>) {
        let owner = element.location().or(inherited);

        for diagnostic in element.diagnostics() {
            self.diagnostics.push(diagnostic.located_or(owner));
        }
        for satellite in element.unused() {
            self.visit(satellite, owner);
        }
        for child in element.children() {
            self.visit(child, owner);
        }
    }
}
