use std::borrow::Cow;

use crate::cursor::Cursor;
use crate::error::{Failure, SyntaxError};
use crate::parser::{Parser, Step};
use crate::state::RunState;

/// Parser that matches an exact string character by character.
///
/// A mismatch after at least one matched character fails with
/// `consumed = true`: the parser has committed to this literal. Wrap in
/// [`atomic`](crate::atomic::atomic) to make the whole literal
/// all-or-nothing.
pub struct StringParser {
    expected: Cow<'static, str>,
}

impl StringParser {
    pub fn new(expected: impl Into<Cow<'static, str>>) -> Self {
        StringParser {
            expected: expected.into(),
        }
    }
}

impl<'src> Parser<'src> for StringParser {
    type Output = &'src str;

    fn parse(&self, _state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let start = cursor;
        let mut current = cursor;

        for expected_char in self.expected.chars() {
            match current.peek() {
                Some(ch) if ch == expected_char => current = current.advance(),
                found => {
                    let found = match found {
                        Some(ch) => format!("'{ch}'"),
                        None => "end of input".to_string(),
                    };
                    return Err(Failure::syntax(
                        SyntaxError::expecting(current.pos(), format!("\"{}\"", self.expected))
                            .with_unexpected(found),
                        current.offset() > start.offset(),
                    ));
                }
            }
        }

        Ok((start.slice_to(&current), current))
    }
}

/// Convenience function to create a StringParser
pub fn string(expected: impl Into<Cow<'static, str>>) -> StringParser {
    StringParser::new(expected)
}
