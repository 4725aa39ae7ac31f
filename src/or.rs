use crate::cursor::Cursor;
use crate::error::FailureKind;
use crate::parser::{Parser, Step};
use crate::state::RunState;

/// Ordered choice with the LL(1) commit discipline.
///
/// Runs the first parser; on success, done. If it failed WITHOUT consuming
/// input, the second parser runs from the same position and the two
/// expected sets are merged. If it failed HAVING consumed input, the choice
/// is committed and the failure propagates untouched — wrap the first
/// branch in [`atomic`](crate::atomic::atomic) to opt into backtracking.
pub struct Or<P1, P2> {
    parser1: P1,
    parser2: P2,
}

impl<P1, P2> Or<P1, P2> {
    pub fn new(parser1: P1, parser2: P2) -> Self {
        Or { parser1, parser2 }
    }
}

impl<'src, P1, P2> Parser<'src> for Or<P1, P2>
where
    P1: Parser<'src>,
    P2: Parser<'src, Output = P1::Output>,
{
    type Output = P1::Output;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let first_failure = match self.parser1.parse(state, cursor) {
            Ok(success) => return Ok(success),
            Err(failure) => failure,
        };
        if first_failure.consumed || first_failure.is_fault() {
            return Err(first_failure);
        }
        self.parser2.parse(state, cursor).map_err(|second_failure| {
            match first_failure.kind {
                FailureKind::Syntax(first) => {
                    second_failure.map_syntax(|second| first.merge(second))
                }
                FailureKind::Fault(_) => second_failure,
            }
        })
    }
}

/// Convenience function to create an Or parser
pub fn or<'src, P1, P2>(parser1: P1, parser2: P2) -> Or<P1, P2>
where
    P1: Parser<'src>,
    P2: Parser<'src, Output = P1::Output>,
{
    Or::new(parser1, parser2)
}

/// Extension trait to add .or() method support for parsers
pub trait OrExt<'src>: Parser<'src> + Sized {
    fn or<P>(self, other: P) -> Or<Self, P>
    where
        P: Parser<'src, Output = Self::Output>,
    {
        Or::new(self, other)
    }
}

impl<'src, P> OrExt<'src> for P where P: Parser<'src> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atomic::AtomicExt;
    use crate::error::FailureKind;
    use crate::satisfy::is_char;
    use crate::string::string;

    #[test]
    fn test_or_first_succeeds() {
        let mut state = RunState::new();
        let parser = is_char('a').or(is_char('b'));
        let (ch, _) = parser.parse(&mut state, Cursor::new("abc")).unwrap();
        assert_eq!(ch, 'a');
    }

    #[test]
    fn test_or_second_succeeds() {
        let mut state = RunState::new();
        let parser = is_char('a').or(is_char('b'));
        let (ch, _) = parser.parse(&mut state, Cursor::new("bcd")).unwrap();
        assert_eq!(ch, 'b');
    }

    #[test]
    fn test_or_merges_expected_sets() {
        let mut state = RunState::new();
        let parser = is_char('a').or(is_char('b'));
        let failure = parser.parse(&mut state, Cursor::new("xyz")).unwrap_err();
        assert!(!failure.consumed);
        match failure.kind {
            FailureKind::Syntax(error) => {
                assert!(error.expected.contains("'a'"));
                assert!(error.expected.contains("'b'"));
            }
            FailureKind::Fault(fault) => panic!("unexpected fault: {fault}"),
        }
    }

    #[test]
    fn test_or_commits_after_consumption() {
        let mut state = RunState::new();
        // "ab" matches two characters of "abc" and then fails, so the
        // "abd" branch must not be tried.
        let parser = string("abc").or(string("abd"));
        let failure = parser.parse(&mut state, Cursor::new("abd")).unwrap_err();
        assert!(failure.consumed);
        match failure.kind {
            FailureKind::Syntax(error) => {
                assert!(error.expected.contains("\"abc\""));
                assert!(!error.expected.contains("\"abd\""));
            }
            FailureKind::Fault(fault) => panic!("unexpected fault: {fault}"),
        }
    }

    #[test]
    fn test_or_backtracks_with_atomic() {
        let mut state = RunState::new();
        let parser = string("abc").atomic().or(string("abd"));
        let (matched, _) = parser.parse(&mut state, Cursor::new("abd")).unwrap();
        assert_eq!(matched, "abd");
    }

    #[test]
    fn test_or_method_chain() {
        let mut state = RunState::new();
        let parser = is_char('a').or(is_char('b')).or(is_char('c'));
        let (ch, _) = parser.parse(&mut state, Cursor::new("c")).unwrap();
        assert_eq!(ch, 'c');
    }

    #[test]
    fn test_or_later_error_position_dominates() {
        let mut state = RunState::new();
        // Both branches fail non-consumingly via atomic; the one that got
        // further should win the report.
        let parser = string("ax").atomic().or(string("abcx").atomic());
        let failure = parser.parse(&mut state, Cursor::new("abcd")).unwrap_err();
        match failure.kind {
            FailureKind::Syntax(error) => {
                // atomic rewinds both to the entry position, so the merge
                // keeps both labels.
                assert_eq!(error.pos.offset, 0);
                assert!(error.expected.contains("\"ax\""));
                assert!(error.expected.contains("\"abcx\""));
            }
            FailureKind::Fault(fault) => panic!("unexpected fault: {fault}"),
        }
    }

    #[test]
    fn test_function_syntax() {
        let mut state = RunState::new();
        let parser = or(is_char('x'), is_char('y'));
        let (ch, _) = parser.parse(&mut state, Cursor::new("y")).unwrap();
        assert_eq!(ch, 'y');
    }
}
