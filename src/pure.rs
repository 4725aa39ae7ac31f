use crate::cursor::Cursor;
use crate::parser::{Parser, Step};
use crate::state::RunState;

/// Parser that always succeeds with a fixed value without consuming input.
pub struct Pure<T> {
    value: T,
}

impl<T> Pure<T> {
    pub fn new(value: T) -> Self {
        Pure { value }
    }
}

impl<'src, T: Clone> Parser<'src> for Pure<T> {
    type Output = T;

    fn parse(&self, _state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        Ok((self.value.clone(), cursor))
    }
}

/// Convenience function to create a Pure parser
pub fn pure<T: Clone>(value: T) -> Pure<T> {
    Pure::new(value)
}

/// The trivially succeeding parser, yielding unit.
pub fn unit() -> Pure<()> {
    Pure::new(())
}
