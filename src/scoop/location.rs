//! Source positions
//!
//! A [`Location`] names the source (usually a file path, `<input>` for ad-hoc strings) and a
//! line/column pair. Lines and columns are 1-based, matching what editors and compilers print.
//! Locations are cheap to clone: the source name is shared behind an `Arc`.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Source name used when a string is parsed without a file behind it
pub const DEFAULT_SOURCE_NAME: &str = "<input>";

/// A position in a named source
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    pub source: Arc<str>,
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(source: impl Into<Arc<str>>, line: usize, column: usize) -> Self {
        Self {
            source: source.into(),
            line,
            column,
        }
    }

    /// The first position of a source
    pub fn start_of(source: impl Into<Arc<str>>) -> Self {
        Self::new(source, 1, 1)
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::start_of(DEFAULT_SOURCE_NAME)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.source, self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Location::new("a.scoop", 3, 7).to_string(), "a.scoop:3:7");
    }
}
