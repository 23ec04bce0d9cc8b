//! Operators and punctuation
//!
//! Operators are matched greedily against a trie of every known operator: the recognizer walks
//! the trie as far as the input allows and then puts back whatever it read past the last
//! complete operator. `?.` therefore beats `?`, `<=` beats `<`, and `??=` beats `??`.
//!
//! `>>` and `>>=` are deliberately absent: closing nested generic argument lists (`A<B<C>>`)
//! must produce two `>` tokens.

use crate::scoop::error::LexResult;
use crate::scoop::sequence::Sequence;
use crate::scoop::token::{Token, TokenType};
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const OPERATORS: &[&str] = &[
    "+", "-", "*", "/", "%", "=", "==", "!=", "<", ">", "<=", ">=", "&&", "||", "!", "&", "|",
    "^", "~", "<<", "<<=", "++", "--", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "??",
    "??=", "?.", "?", ":", "::", "=>", ".", ",", ";", "(", ")", "[", "]", "{", "}",
];

static TRIE: Lazy<OperatorTrie> = Lazy::new(|| OperatorTrie::from_operators(OPERATORS));

/// True if `text` is exactly one known operator
pub fn is_operator(text: &str) -> bool {
    TRIE.contains(text)
}

#[derive(Debug, Default)]
pub struct OperatorTrie {
    root: TrieNode,
}

#[derive(Debug, Default)]
struct TrieNode {
    children: HashMap<char, TrieNode>,
    terminal: bool,
}

impl OperatorTrie {
    pub fn from_operators(operators: &[&str]) -> Self {
        let mut trie = Self::default();
        for op in operators {
            trie.insert(op);
        }
        trie
    }

    pub fn insert(&mut self, op: &str) {
        let mut node = &mut self.root;
        for c in op.chars() {
            node = node.children.entry(c).or_default();
        }
        node.terminal = true;
    }

    pub fn contains(&self, text: &str) -> bool {
        let mut node = &self.root;
        for c in text.chars() {
            match node.children.get(&c) {
                Some(next) => node = next,
                None => return false,
            }
        }
        node.terminal && !text.is_empty()
    }

    /// Reads the longest operator at the head of `chars`
    pub fn longest_match(&self, chars: &mut dyn Sequence<char>) -> LexResult<Option<String>> {
        let mut node = &self.root;
        let mut read = Vec::new();
        let mut matched = 0;

        while !chars.is_at_end()? {
            let c = chars.peek()?;
            let Some(next) = node.children.get(&c) else {
                break;
            };
            read.push(chars.get_next()?);
            node = next;
            if node.terminal {
                matched = read.len();
            }
        }

        for c in read.drain(matched..).rev() {
            chars.put_back(c);
        }
        Ok((matched > 0).then(|| read.into_iter().collect()))
    }
}

pub fn scan(chars: &mut dyn Sequence<char>) -> LexResult<Option<Token>> {
    let location = chars.location()?;
    Ok(TRIE
        .longest_match(chars)?
        .map(|op| Token::new(op, TokenType::Operator, location)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoop::sequence::CharacterSequence;

    fn scan_all(source: &str) -> Vec<String> {
        let mut chars = CharacterSequence::new(source);
        let mut ops = Vec::new();
        while let Some(token) = scan(&mut chars).unwrap() {
            ops.push(token.value);
        }
        ops
    }

    #[test]
    fn test_longest_match() {
        assert_eq!(scan_all("?."), vec!["?."]);
        assert_eq!(scan_all("<="), vec!["<="]);
        assert_eq!(scan_all("??="), vec!["??="]);
        assert_eq!(scan_all("?.?"), vec!["?.", "?"]);
    }

    #[test]
    fn test_generic_close_stays_split() {
        assert_eq!(scan_all(">>"), vec![">", ">"]);
    }

    #[test]
    fn test_partial_walk_is_put_back() {
        let trie = OperatorTrie::from_operators(&["+", "+=+"]);
        let mut chars = CharacterSequence::new("+=x");
        assert_eq!(trie.longest_match(&mut chars).unwrap(), Some("+".to_string()));
        assert_eq!(chars.peek_char(), '=');
    }

    #[test]
    fn test_no_operator() {
        let mut chars = CharacterSequence::new("abc");
        assert_eq!(scan(&mut chars).unwrap(), None);
        assert_eq!(chars.consumed(), 0);
    }

    #[test]
    fn test_is_operator() {
        assert!(is_operator("=>"));
        assert!(!is_operator(">>"));
        assert!(!is_operator(""));
    }
}
