use std::borrow::Cow;

use crate::cursor::Cursor;
use crate::error::{Failure, SyntaxError};
use crate::parser::{Parser, Step};
use crate::state::RunState;

/// Parser that reads one character if it passes a predicate.
///
/// Fails without consuming at end of input or when the predicate rejects
/// the next character, so `satisfy` is always safe on the left of `or`.
pub struct Satisfy<F> {
    predicate: F,
    label: Option<Cow<'static, str>>,
}

impl<F> Satisfy<F> {
    pub fn new(predicate: F, label: Option<Cow<'static, str>>) -> Self {
        Satisfy { predicate, label }
    }
}

impl<'src, F> Parser<'src> for Satisfy<F>
where
    F: Fn(char) -> bool,
{
    type Output = char;

    fn parse(&self, _state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let found = match cursor.peek() {
            Some(ch) if (self.predicate)(ch) => return Ok((ch, cursor.advance())),
            Some(ch) => format!("'{ch}'"),
            None => "end of input".to_string(),
        };
        let error = match &self.label {
            Some(label) => SyntaxError::expecting(cursor.pos(), label.clone()),
            None => SyntaxError::bare(cursor.pos()),
        };
        Err(Failure::syntax(error.with_unexpected(found), false))
    }
}

/// Parser for one specific character.
pub struct IsChar {
    expected: char,
}

impl IsChar {
    pub fn new(expected: char) -> Self {
        IsChar { expected }
    }
}

impl<'src> Parser<'src> for IsChar {
    type Output = char;

    fn parse(&self, _state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let found = match cursor.peek() {
            Some(ch) if ch == self.expected => return Ok((ch, cursor.advance())),
            Some(ch) => format!("'{ch}'"),
            None => "end of input".to_string(),
        };
        Err(Failure::syntax(
            SyntaxError::expecting(cursor.pos(), format!("'{}'", self.expected))
                .with_unexpected(found),
            false,
        ))
    }
}

/// Convenience function to create an unlabelled Satisfy parser
pub fn satisfy<F>(predicate: F) -> Satisfy<F>
where
    F: Fn(char) -> bool,
{
    Satisfy::new(predicate, None)
}

/// Convenience function to create a labelled Satisfy parser
pub fn satisfy_as<F>(predicate: F, label: impl Into<Cow<'static, str>>) -> Satisfy<F>
where
    F: Fn(char) -> bool,
{
    Satisfy::new(predicate, Some(label.into()))
}

/// Convenience function to create an IsChar parser
pub fn is_char(expected: char) -> IsChar {
    IsChar::new(expected)
}
