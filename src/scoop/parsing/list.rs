//! Repetition

use super::node::{substitute, substitute_or_keep, AnyParser};
use super::{PResult, ParseResult, Parser, ParserImpl};
use crate::scoop::error::GrammarError;
use crate::scoop::sequence::Sequence;

struct List<I, O> {
    item: Parser<I, O>,
    at_least_one: bool,
}

impl<I: 'static, O: 'static> ParserImpl<I, Vec<O>> for List<I, O> {
    fn parse(&self, input: &mut dyn Sequence<I>) -> PResult<Vec<O>> {
        let mut items = Vec::new();
        loop {
            let before = input.consumed();
            match self.item.parse(input)? {
                ParseResult::Success(item) => items.push(item),
                ParseResult::Failure => break,
            }
            // an item that matched nothing would match forever
            if input.consumed() == before {
                break;
            }
        }
        if self.at_least_one && items.is_empty() {
            return Ok(ParseResult::Failure);
        }
        Ok(ParseResult::Success(items))
    }

    fn kind(&self) -> &'static str {
        "list"
    }

    fn children(&self) -> Vec<AnyParser> {
        vec![self.item.erase()]
    }

    fn replace_child(
        &self,
        find: &AnyParser,
        replacement: &AnyParser,
    ) -> Result<Option<Parser<I, Vec<O>>>, GrammarError> {
        Ok(substitute(&self.item, find, replacement)?.map(|item| {
            Parser::new(List {
                item,
                at_least_one: self.at_least_one,
            })
        }))
    }
}

/// Zero or more `item`s, or one or more when `at_least_one` is set
///
/// Stops after an iteration that succeeded without consuming input.
pub fn list<I: 'static, O: 'static>(item: Parser<I, O>, at_least_one: bool) -> Parser<I, Vec<O>> {
    Parser::new(List { item, at_least_one })
}

struct SeparatedList<I, O, S> {
    item: Parser<I, O>,
    separator: Parser<I, S>,
    at_least_one: bool,
}

impl<I: 'static, O: 'static, S: 'static> ParserImpl<I, Vec<O>> for SeparatedList<I, O, S> {
    fn parse(&self, input: &mut dyn Sequence<I>) -> PResult<Vec<O>> {
        let start = input.mark();
        let mut items = match self.item.parse(input)? {
            ParseResult::Success(item) => vec![item],
            ParseResult::Failure if self.at_least_one => return Ok(ParseResult::Failure),
            ParseResult::Failure => return Ok(ParseResult::Success(Vec::new())),
        };
        while self.separator.parse(input)?.is_success() {
            match self.item.parse(input)? {
                ParseResult::Success(item) => items.push(item),
                ParseResult::Failure => {
                    // a dangling separator fails the whole list
                    input.rewind(start);
                    return Ok(ParseResult::Failure);
                }
            }
        }
        Ok(ParseResult::Success(items))
    }

    fn kind(&self) -> &'static str {
        "separated list"
    }

    fn children(&self) -> Vec<AnyParser> {
        vec![self.item.erase(), self.separator.erase()]
    }

    fn replace_child(
        &self,
        find: &AnyParser,
        replacement: &AnyParser,
    ) -> Result<Option<Parser<I, Vec<O>>>, GrammarError> {
        let (item, item_changed) = substitute_or_keep(&self.item, find, replacement)?;
        let (separator, separator_changed) =
            substitute_or_keep(&self.separator, find, replacement)?;
        Ok((item_changed || separator_changed).then(|| {
            Parser::new(SeparatedList {
                item,
                separator,
                at_least_one: self.at_least_one,
            })
        }))
    }
}

/// `item (separator item)*`; separator values are discarded
///
/// A separator that is not followed by an item makes the whole list fail and rewind.
pub fn separated_list<I: 'static, O: 'static, S: 'static>(
    item: Parser<I, O>,
    separator: Parser<I, S>,
    at_least_one: bool,
) -> Parser<I, Vec<O>> {
    Parser::new(SeparatedList {
        item,
        separator,
        at_least_one,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoop::parsing::{matching, produce};
    use crate::scoop::sequence::{CharacterSequence, Sequence};

    fn digit() -> Parser<char, char> {
        matching(|c: &char| c.is_ascii_digit())
    }

    fn comma() -> Parser<char, char> {
        matching(|c: &char| *c == ',')
    }

    #[test]
    fn test_list_counts() {
        assert_eq!(
            list(digit(), false).parse_chars("x").unwrap(),
            ParseResult::Success(vec![])
        );
        assert_eq!(
            list(digit(), true).parse_chars("x").unwrap(),
            ParseResult::Failure
        );
        assert_eq!(
            list(digit(), true).parse_chars("12x").unwrap(),
            ParseResult::Success(vec!['1', '2'])
        );
    }

    #[test]
    fn test_list_stops_on_zero_width_success() {
        let forever = list(produce::<char, u8>(|| 0), false);
        assert_eq!(
            forever.parse_chars("abc").unwrap(),
            ParseResult::Success(vec![0])
        );
    }

    #[test]
    fn test_separated_list() {
        let p = separated_list(digit(), comma(), false);
        assert_eq!(
            p.parse_chars("1,2,3;").unwrap(),
            ParseResult::Success(vec!['1', '2', '3'])
        );
        assert_eq!(p.parse_chars(";").unwrap(), ParseResult::Success(vec![]));
        let p = separated_list(digit(), comma(), true);
        assert_eq!(p.parse_chars(";").unwrap(), ParseResult::Failure);
    }

    #[test]
    fn test_dangling_separator_fails_and_rewinds() {
        let p = separated_list(digit(), comma(), false);
        let mut chars = CharacterSequence::new("1,2,x");
        assert_eq!(p.parse(&mut chars).unwrap(), ParseResult::Failure);
        assert_eq!(chars.consumed(), 0);
    }
}
