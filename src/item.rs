use crate::cursor::Cursor;
use crate::error::{Failure, SyntaxError};
use crate::parser::{Parser, Step};
use crate::state::RunState;

/// Parser that reads any single character and advances past it.
///
/// Fails without consuming only at end of input.
pub struct Item;

impl Item {
    pub fn new() -> Self {
        Item
    }
}

impl Default for Item {
    fn default() -> Self {
        Item::new()
    }
}

impl<'src> Parser<'src> for Item {
    type Output = char;

    fn parse(&self, _state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        match cursor.peek() {
            Some(ch) => Ok((ch, cursor.advance())),
            None => Err(Failure::syntax(
                SyntaxError::expecting(cursor.pos(), "any character")
                    .with_unexpected("end of input"),
                false,
            )),
        }
    }
}

/// Convenience function to create an Item parser
pub fn item() -> Item {
    Item::new()
}
