use crate::cursor::Cursor;
use crate::error::{Failure, SyntaxError};
use crate::parser::{Parser, Step};
use crate::state::RunState;

/// Parser that succeeds with unit exactly at end of input.
pub struct Eof;

impl Eof {
    pub fn new() -> Self {
        Eof
    }
}

impl Default for Eof {
    fn default() -> Self {
        Eof::new()
    }
}

impl<'src> Parser<'src> for Eof {
    type Output = ();

    fn parse(&self, _state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        match cursor.peek() {
            None => Ok(((), cursor)),
            Some(ch) => Err(Failure::syntax(
                SyntaxError::expecting(cursor.pos(), "end of input")
                    .with_unexpected(format!("'{ch}'")),
                false,
            )),
        }
    }
}

/// Convenience function to create an Eof parser
pub fn eof() -> Eof {
    Eof::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;

    #[test]
    fn test_eof_succeeds_at_end() {
        let mut state = RunState::new();
        let ((), cursor) = eof().parse(&mut state, Cursor::new("")).unwrap();
        assert!(cursor.at_end());
    }

    #[test]
    fn test_eof_fails_without_consuming() {
        let mut state = RunState::new();
        let failure = eof().parse(&mut state, Cursor::new("x")).unwrap_err();
        assert!(!failure.consumed);
        match failure.kind {
            FailureKind::Syntax(error) => {
                assert!(error.expected.contains("end of input"));
                assert_eq!(error.unexpected.as_deref(), Some("'x'"));
            }
            FailureKind::Fault(fault) => panic!("unexpected fault: {fault}"),
        }
    }

    #[test]
    fn test_eof_after_consuming_input() {
        let mut state = RunState::new();
        let cursor = Cursor::new("a").advance();
        assert!(eof().parse(&mut state, cursor).is_ok());
    }
}
