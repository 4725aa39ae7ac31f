use crate::cursor::Cursor;
use crate::error::{Failure, FailureKind, SyntaxError};
use crate::parser::{Parser, Step};
use crate::state::RunState;

/// Ordered choice over any number of alternatives.
///
/// Boxed trait objects keep the type flat no matter how many branches the
/// grammar has; deep `.or()` chains nest their types instead. The LL(1)
/// discipline is that of [`or`](crate::or::or): a branch that fails having
/// consumed input commits the whole choice. An empty list behaves like
/// [`empty`](crate::fail::empty).
pub struct Choice<'src, T> {
    parsers: Vec<Box<dyn Parser<'src, Output = T> + 'src>>,
}

impl<'src, T> Choice<'src, T> {
    pub fn new(parsers: Vec<Box<dyn Parser<'src, Output = T> + 'src>>) -> Self {
        Choice { parsers }
    }
}

impl<'src, T> Parser<'src> for Choice<'src, T> {
    type Output = T;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let mut accumulated: Option<SyntaxError> = None;
        for parser in &self.parsers {
            match parser.parse(state, cursor) {
                Ok(success) => return Ok(success),
                Err(failure) if failure.consumed || failure.is_fault() => {
                    return Err(match accumulated {
                        Some(seen) => failure.map_syntax(|error| seen.merge(error)),
                        None => failure,
                    });
                }
                Err(failure) => {
                    if let FailureKind::Syntax(error) = failure.kind {
                        accumulated = Some(match accumulated.take() {
                            Some(seen) => seen.merge(error),
                            None => error,
                        });
                    }
                }
            }
        }
        let error = accumulated.unwrap_or_else(|| SyntaxError::bare(cursor.pos()));
        Err(Failure::syntax(error, false))
    }
}

/// Choice where every branch but the last is attempted atomically.
///
/// A non-final branch that fails after consuming input backtracks instead
/// of committing; only the last branch keeps its raw consumption behavior.
pub struct AtomicChoice<'src, T> {
    parsers: Vec<Box<dyn Parser<'src, Output = T> + 'src>>,
}

impl<'src, T> AtomicChoice<'src, T> {
    pub fn new(parsers: Vec<Box<dyn Parser<'src, Output = T> + 'src>>) -> Self {
        AtomicChoice { parsers }
    }
}

impl<'src, T> Parser<'src> for AtomicChoice<'src, T> {
    type Output = T;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let entry = cursor.pos();
        let mut accumulated: Option<SyntaxError> = None;
        let last = self.parsers.len().checked_sub(1);
        for (index, parser) in self.parsers.iter().enumerate() {
            let failure = match parser.parse(state, cursor) {
                Ok(success) => return Ok(success),
                Err(failure) => failure,
            };
            if failure.is_fault() {
                return Err(failure);
            }
            if Some(index) == last {
                let failure = if failure.consumed {
                    failure
                } else {
                    match accumulated {
                        Some(seen) => failure.map_syntax(|error| seen.merge(error)),
                        None => failure,
                    }
                };
                return Err(failure);
            }
            // Attempted branch: rewind like `atomic` would.
            let softened = failure.map_syntax(|error| error.relocate(entry));
            if let FailureKind::Syntax(error) = softened.kind {
                accumulated = Some(match accumulated {
                    Some(seen) => seen.merge(error),
                    None => error,
                });
            }
        }
        let error = accumulated.unwrap_or_else(|| SyntaxError::bare(cursor.pos()));
        Err(Failure::syntax(error, false))
    }
}

/// Convenience function to create a Choice parser
pub fn choice<'src, T>(parsers: Vec<Box<dyn Parser<'src, Output = T> + 'src>>) -> Choice<'src, T> {
    Choice::new(parsers)
}

/// Convenience function to create an AtomicChoice parser
pub fn atomic_choice<'src, T>(
    parsers: Vec<Box<dyn Parser<'src, Output = T> + 'src>>,
) -> AtomicChoice<'src, T> {
    AtomicChoice::new(parsers)
}
