use crate::cursor::Cursor;
use crate::parser::{Parser, Step};
use crate::state::RunState;

/// Explicit backtracking wrapper ("attempt").
///
/// Runs the inner parser; any failure is rewritten as non-consuming, with
/// the reported position rewound to the entry point. Ordered choice then
/// treats the whole wrapped parser as all-or-nothing. Faults are not
/// softened: a programmer error aborts regardless.
pub struct Atomic<P> {
    parser: P,
}

impl<P> Atomic<P> {
    pub fn new(parser: P) -> Self {
        Atomic { parser }
    }
}

impl<'src, P> Parser<'src> for Atomic<P>
where
    P: Parser<'src>,
{
    type Output = P::Output;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let entry = cursor.pos();
        self.parser.parse(state, cursor).map_err(|failure| {
            let mut failure = failure.map_syntax(|error| error.relocate(entry));
            if !failure.is_fault() {
                failure.consumed = false;
            }
            failure
        })
    }
}

/// Convenience function to create an Atomic parser
pub fn atomic<'src, P>(parser: P) -> Atomic<P>
where
    P: Parser<'src>,
{
    Atomic::new(parser)
}

/// Extension trait to add .atomic() method support for parsers
pub trait AtomicExt<'src>: Parser<'src> + Sized {
    fn atomic(self) -> Atomic<Self> {
        Atomic::new(self)
    }
}

impl<'src, P> AtomicExt<'src> for P where P: Parser<'src> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::string::string;

    #[test]
    fn test_atomic_success_passes_through() {
        let mut state = RunState::new();
        let parser = atomic(string("abc"));
        let (matched, cursor) = parser.parse(&mut state, Cursor::new("abcdef")).unwrap();
        assert_eq!(matched, "abc");
        assert_eq!(cursor.offset(), 3);
    }

    #[test]
    fn test_atomic_failure_is_non_consuming() {
        let mut state = RunState::new();
        let parser = atomic(string("abc"));
        let failure = parser.parse(&mut state, Cursor::new("ab")).unwrap_err();
        assert!(!failure.consumed);
    }

    #[test]
    fn test_atomic_rewinds_error_position() {
        let mut state = RunState::new();
        let parser = atomic(string("abc"));
        let failure = parser.parse(&mut state, Cursor::new("ab")).unwrap_err();
        match failure.kind {
            FailureKind::Syntax(error) => {
                assert_eq!(error.pos.offset, 0);
                assert_eq!(error.pos.column, 1);
                // Content survives the rewind.
                assert!(error.expected.contains("\"abc\""));
            }
            FailureKind::Fault(fault) => panic!("unexpected fault: {fault}"),
        }
    }

    #[test]
    fn test_atomic_is_idempotent() {
        let mut state = RunState::new();
        let once = atomic(string("abc"));
        let twice = atomic(atomic(string("abc")));
        let first = once.parse(&mut state, Cursor::new("ab")).unwrap_err();
        let second = twice.parse(&mut state, Cursor::new("ab")).unwrap_err();
        assert_eq!(first, second);
    }

    #[test]
    fn test_atomic_keeps_fault_aborting() {
        use crate::error::Fault;
        use crate::register::Reg;

        let mut state = RunState::new();
        let reg: Reg<i32> = Reg::new();
        let parser = atomic(reg.get());
        let failure = parser.parse(&mut state, Cursor::new("x")).unwrap_err();
        match failure.kind {
            FailureKind::Fault(Fault::UnfilledRegister { .. }) => {}
            other => panic!("expected unfilled-register fault, got {other:?}"),
        }
    }
}
