use std::borrow::Cow;
use std::marker::PhantomData;

use crate::cursor::Cursor;
use crate::error::{Failure, SyntaxError};
use crate::parser::{Parser, Step};
use crate::state::RunState;

/// Parser that fails with no information and consumes nothing.
///
/// This is the identity of ordered choice: `empty().or(p)` behaves as `p`.
pub struct Empty<T> {
    _phantom: PhantomData<fn() -> T>,
}

impl<T> Empty<T> {
    pub fn new() -> Self {
        Empty {
            _phantom: PhantomData,
        }
    }
}

impl<T> Default for Empty<T> {
    fn default() -> Self {
        Empty::new()
    }
}

impl<'src, T> Parser<'src> for Empty<T> {
    type Output = T;

    fn parse(&self, _state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        Err(Failure::syntax(SyntaxError::bare(cursor.pos()), false))
    }
}

/// Parser that fails with a user-supplied reason and consumes nothing.
pub struct Fail<T> {
    reason: Cow<'static, str>,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> Fail<T> {
    pub fn new(reason: impl Into<Cow<'static, str>>) -> Self {
        Fail {
            reason: reason.into(),
            _phantom: PhantomData,
        }
    }
}

impl<'src, T> Parser<'src> for Fail<T> {
    type Output = T;

    fn parse(&self, _state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        Err(Failure::syntax(
            SyntaxError::because(cursor.pos(), self.reason.clone()),
            false,
        ))
    }
}

/// Convenience function to create an Empty parser
pub fn empty<T>() -> Empty<T> {
    Empty::new()
}

/// Convenience function to create a Fail parser
pub fn fail<T>(reason: impl Into<Cow<'static, str>>) -> Fail<T> {
    Fail::new(reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;

    #[test]
    fn test_empty_fails_without_consuming() {
        let mut state = RunState::new();
        let failure = empty::<char>()
            .parse(&mut state, Cursor::new("abc"))
            .unwrap_err();
        assert!(!failure.consumed);
        match failure.kind {
            FailureKind::Syntax(error) => {
                assert!(error.expected.is_empty());
                assert!(error.reasons.is_empty());
                assert_eq!(error.pos.offset, 0);
            }
            FailureKind::Fault(fault) => panic!("unexpected fault: {fault}"),
        }
    }

    #[test]
    fn test_fail_carries_reason() {
        let mut state = RunState::new();
        let parser: Fail<char> = fail("bad input");
        let failure = parser.parse(&mut state, Cursor::new("abc")).unwrap_err();
        assert!(!failure.consumed);
        match failure.kind {
            FailureKind::Syntax(error) => assert_eq!(error.reasons, vec!["bad input"]),
            FailureKind::Fault(fault) => panic!("unexpected fault: {fault}"),
        }
    }

    #[test]
    fn test_fail_reports_current_position() {
        let mut state = RunState::new();
        let cursor = Cursor::new("abc").advance();
        let parser: Fail<char> = fail("nope");
        let failure = parser.parse(&mut state, cursor).unwrap_err();
        match failure.kind {
            FailureKind::Syntax(error) => assert_eq!(error.pos.offset, 1),
            FailureKind::Fault(fault) => panic!("unexpected fault: {fault}"),
        }
    }
}
