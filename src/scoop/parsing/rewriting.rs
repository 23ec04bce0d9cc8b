//! Grammar traversal and rewriting
//!
//! Rewriting builds a new grammar and leaves the original untouched. Nodes are rebuilt
//! bottom-up: a node whose children did not change is reused as-is, so unaffected parts of
//! the grammar stay shared between the two versions.
//!
//! Recursive grammars contain cycles through [`deferred`](super::deferred) and
//! [`Replaceable`](super::Replaceable) nodes. When the walk reaches a node that is still
//! being rewritten further up, whatever the parent is, that edge is replaced by a lazy
//! stand-in of the same type which looks the rewritten node up at parse time, once the walk
//! has finished.

use super::node::{AnyParser, Resolver};
use crate::scoop::error::GrammarError;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::trace;

/// Every node reachable from `root`, each once, in pre-order
pub fn descendants(root: &AnyParser) -> Vec<AnyParser> {
    let mut seen = HashSet::new();
    let mut order = Vec::new();
    let mut stack = vec![root.clone()];
    while let Some(node) = stack.pop() {
        if !seen.insert(node.id()) {
            continue;
        }
        let mut children = node.children();
        children.reverse();
        stack.extend(children);
        order.push(node);
    }
    order
}

pub fn find(root: &AnyParser, predicate: impl Fn(&AnyParser) -> bool) -> Option<AnyParser> {
    descendants(root).into_iter().find(|node| predicate(node))
}

pub fn find_named(root: &AnyParser, name: &str) -> Option<AnyParser> {
    find(root, |node| node.name() == Some(name))
}

/// A copy of `root` in which every node matching `predicate` is `replacement`
///
/// Matching nodes are not descended into. Returns the rewritten root, which is `root` itself
/// when nothing matched.
pub fn replace(
    root: &AnyParser,
    predicate: impl Fn(&AnyParser) -> bool,
    replacement: &AnyParser,
) -> Result<AnyParser, GrammarError> {
    let mut rewriter = Rewriter {
        predicate,
        replacement,
        finished: Arc::new(Mutex::new(HashMap::new())),
        in_progress: HashSet::new(),
    };
    rewriter.visit(root)
}

type Table = Arc<Mutex<HashMap<usize, AnyParser>>>;

struct Rewriter<'a, P> {
    predicate: P,
    replacement: &'a AnyParser,
    /// Rewritten nodes by the id of the node they replace
    finished: Table,
    in_progress: HashSet<usize>,
}

impl<P: Fn(&AnyParser) -> bool> Rewriter<'_, P> {
    fn lookup(&self, id: usize) -> Option<AnyParser> {
        self.finished
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    fn finish(&self, id: usize, node: AnyParser) {
        self.finished
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, node);
    }

    fn visit(&mut self, node: &AnyParser) -> Result<AnyParser, GrammarError> {
        let id = node.id();
        if let Some(done) = self.lookup(id) {
            return Ok(done);
        }
        if (self.predicate)(node) {
            trace!(
                kind = node.kind(),
                name = node.name().unwrap_or(""),
                "replacing grammar node"
            );
            let replacement = self.replacement.clone();
            self.finish(id, replacement.clone());
            return Ok(replacement);
        }

        self.in_progress.insert(id);
        let mut current = node.clone();
        for child in node.children() {
            let child_id = child.id();
            if self.in_progress.contains(&child_id) {
                let table = Arc::clone(&self.finished);
                let resolve: Resolver = Arc::new(move || {
                    table
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .get(&child_id)
                        .cloned()
                });
                let stand_in = child.lazy(resolve);
                if let Some(updated) = current.replace_child(&child, &stand_in)? {
                    current = updated;
                }
                continue;
            }
            let rewritten = self.visit(&child)?;
            if rewritten.id() != child_id {
                if let Some(updated) = current.replace_child(&child, &rewritten)? {
                    current = updated;
                }
            }
        }
        self.in_progress.remove(&id);
        self.finish(id, current.clone());
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoop::parsing::{deferred, first, matching, rule, ParseResult, Parser};
    use std::sync::OnceLock;

    fn letter(expected: char) -> Parser<char, char> {
        matching(move |c: &char| *c == expected)
    }

    #[test]
    fn test_descendants_visit_shared_nodes_once() {
        let a = letter('a').named("A");
        let p = first(vec![a.clone(), rule((a.clone(), a), |(x, _)| x)]);
        let names: Vec<_> = p
            .descendants()
            .iter()
            .filter_map(|node| node.name().map(String::from))
            .collect();
        assert_eq!(names, vec!["A".to_string()]);
    }

    #[test]
    fn test_replace_leaves_original_untouched() {
        let p = rule((letter('a').named("Head"), letter('b')), |(h, t)| format!("{h}{t}"));
        let q = p.replace_named("Head", letter('x')).unwrap();
        assert_eq!(p.parse_chars("ab").unwrap(), ParseResult::Success("ab".into()));
        assert_eq!(p.parse_chars("xb").unwrap(), ParseResult::Failure);
        assert_eq!(q.parse_chars("xb").unwrap(), ParseResult::Success("xb".into()));
        assert_eq!(q.parse_chars("ab").unwrap(), ParseResult::Failure);
    }

    #[test]
    fn test_unchanged_grammar_is_reused() {
        let p = rule((letter('a'), letter('b')), |_| ());
        let q = p.replace_where(|_| false, &letter('z').erase()).unwrap();
        assert_eq!(p.id(), q.id());
    }

    #[test]
    fn test_replace_through_cycle() {
        // list := 'a' list | 'b'
        let cell: Arc<OnceLock<Parser<char, String>>> = Arc::new(OnceLock::new());
        let tail = {
            let cell = Arc::clone(&cell);
            deferred(move || cell.get().cloned().unwrap_or_else(crate::scoop::parsing::fail))
        };
        let grammar = first(vec![
            rule((letter('a'), tail), |(a, rest)| format!("{a}{rest}")),
            letter('b').map(String::from).named("End"),
        ]);
        assert!(cell.set(grammar.clone()).is_ok());

        let rewritten = grammar
            .replace_named("End", letter('c').map(String::from))
            .unwrap();
        assert_eq!(
            rewritten.parse_chars("aac").unwrap(),
            ParseResult::Success("aac".into())
        );
        assert_eq!(rewritten.parse_chars("aab").unwrap(), ParseResult::Failure);
        assert_eq!(
            grammar.parse_chars("aab").unwrap(),
            ParseResult::Success("aab".into())
        );
    }

    #[test]
    fn test_replace_through_cycle_entered_by_deferred() {
        // inner := 'a' d | 'b', d := deferred(inner), root := 'x' d
        let cell: Arc<OnceLock<Parser<char, String>>> = Arc::new(OnceLock::new());
        let d = {
            let cell = Arc::clone(&cell);
            deferred(move || cell.get().cloned().unwrap_or_else(crate::scoop::parsing::fail))
        };
        let inner = first(vec![
            rule((letter('a'), d.clone()), |(a, rest)| format!("{a}{rest}")),
            letter('b').map(String::from).named("End"),
        ]);
        assert!(cell.set(inner).is_ok());
        let root = rule((letter('x'), d), |(x, rest)| format!("{x}{rest}"));

        let derived = root
            .replace_named("End", letter('c').map(String::from))
            .unwrap();
        assert_eq!(
            derived.parse_chars("xc").unwrap(),
            ParseResult::Success("xc".into())
        );
        assert_eq!(
            derived.parse_chars("xaac").unwrap(),
            ParseResult::Success("xaac".into())
        );
        assert_eq!(derived.parse_chars("xaab").unwrap(), ParseResult::Failure);
        assert_eq!(
            root.parse_chars("xaab").unwrap(),
            ParseResult::Success("xaab".into())
        );
        assert_eq!(root.parse_chars("xaac").unwrap(), ParseResult::Failure);
    }

    #[test]
    fn test_replace_type_mismatch() {
        let p = rule((letter('a').named("Head"), letter('b')), |_| ());
        let result = p.replace_named("Head", letter('x').map(|_| 1u8));
        assert!(matches!(result, Err(GrammarError::TypeMismatch { .. })));
    }

    #[test]
    fn test_replace_missing_name() {
        let p = letter('a');
        assert_eq!(
            p.replace_named("Nope", letter('b')).unwrap_err(),
            GrammarError::NotFound("Nope".to_string())
        );
    }
}
