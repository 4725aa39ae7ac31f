use crate::cursor::Cursor;
use crate::error::{Failure, Fault};
use crate::parser::{Parser, Step};
use crate::state::RunState;

/// Parser combinator that matches zero or more occurrences of the given
/// parser.
///
/// Iteration stops at the first non-consuming failure; a consuming failure
/// fails the whole loop (the repetition has committed to another element).
/// The repeated parser must consume input on success: a non-consuming
/// success would loop forever and is rejected as a fault.
pub struct Many<P> {
    parser: P,
}

impl<P> Many<P> {
    pub fn new(parser: P) -> Self {
        Many { parser }
    }
}

/// Run one round of a `many`-style loop. `Ok(Some(..))` is a successful
/// iteration, `Ok(None)` means the loop should stop at `current`.
fn iteration<'src, P>(
    parser: &P,
    state: &mut RunState,
    current: Cursor<'src>,
) -> Result<Option<(P::Output, Cursor<'src>)>, Failure>
where
    P: Parser<'src>,
{
    match parser.parse(state, current) {
        Ok((_, next)) if next.offset() == current.offset() => Err(Failure::fault(
            Fault::NonConsumptiveIteration { pos: current.pos() },
        )),
        Ok(success) => Ok(Some(success)),
        Err(failure) if failure.consumed || failure.is_fault() => Err(failure),
        Err(_) => Ok(None),
    }
}

impl<'src, P> Parser<'src> for Many<P>
where
    P: Parser<'src>,
{
    type Output = Vec<P::Output>;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let mut results = Vec::new();
        let mut current = cursor;
        while let Some((value, next)) = iteration(&self.parser, state, current)? {
            results.push(value);
            current = next;
        }
        Ok((results, current))
    }
}

/// As [`Many`], but discarding the results.
pub struct SkipMany<P> {
    parser: P,
}

impl<P> SkipMany<P> {
    pub fn new(parser: P) -> Self {
        SkipMany { parser }
    }
}

impl<'src, P> Parser<'src> for SkipMany<P>
where
    P: Parser<'src>,
{
    type Output = ();

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let mut current = cursor;
        while let Some((_, next)) = iteration(&self.parser, state, current)? {
            current = next;
        }
        Ok(((), current))
    }
}

/// `n` required occurrences followed by zero or more further ones.
pub struct ManyN<P> {
    required: usize,
    parser: P,
}

impl<P> ManyN<P> {
    pub fn new(required: usize, parser: P) -> Self {
        ManyN { required, parser }
    }
}

impl<'src, P> Parser<'src> for ManyN<P>
where
    P: Parser<'src>,
{
    type Output = Vec<P::Output>;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let mut results = Vec::new();
        let mut current = cursor;
        for _ in 0..self.required {
            let progressed = current.offset() > cursor.offset();
            let (value, next) = self
                .parser
                .parse(state, current)
                .map_err(|failure| failure.after_consuming(progressed))?;
            results.push(value);
            current = next;
        }
        while let Some((value, next)) = iteration(&self.parser, state, current)? {
            results.push(value);
            current = next;
        }
        Ok((results, current))
    }
}

/// As [`ManyN`], but discarding the results.
pub struct SkipManyN<P> {
    required: usize,
    parser: P,
}

impl<P> SkipManyN<P> {
    pub fn new(required: usize, parser: P) -> Self {
        SkipManyN { required, parser }
    }
}

impl<'src, P> Parser<'src> for SkipManyN<P>
where
    P: Parser<'src>,
{
    type Output = ();

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let mut current = cursor;
        for _ in 0..self.required {
            let progressed = current.offset() > cursor.offset();
            let (_, next) = self
                .parser
                .parse(state, current)
                .map_err(|failure| failure.after_consuming(progressed))?;
            current = next;
        }
        while let Some((_, next)) = iteration(&self.parser, state, current)? {
            current = next;
        }
        Ok(((), current))
    }
}

/// Convenience function to create a Many parser
pub fn many<'src, P>(parser: P) -> Many<P>
where
    P: Parser<'src>,
{
    Many::new(parser)
}

/// Convenience function to create a SkipMany parser
pub fn skip_many<'src, P>(parser: P) -> SkipMany<P>
where
    P: Parser<'src>,
{
    SkipMany::new(parser)
}

/// Convenience function to create a ManyN parser
pub fn many_n<'src, P>(required: usize, parser: P) -> ManyN<P>
where
    P: Parser<'src>,
{
    ManyN::new(required, parser)
}

/// Convenience function to create a SkipManyN parser
pub fn skip_many_n<'src, P>(required: usize, parser: P) -> SkipManyN<P>
where
    P: Parser<'src>,
{
    SkipManyN::new(required, parser)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::pure::pure;
    use crate::satisfy::{is_char, satisfy_as};
    use crate::string::string;

    #[test]
    fn test_many_zero_matches() {
        let mut state = RunState::new();
        let parser = many(is_char('a'));
        let (results, cursor) = parser.parse(&mut state, Cursor::new("xyz")).unwrap();
        assert_eq!(results, vec![]);
        assert_eq!(cursor.offset(), 0);
    }

    #[test]
    fn test_many_multiple_matches() {
        let mut state = RunState::new();
        let parser = many(is_char('a'));
        let (results, cursor) = parser.parse(&mut state, Cursor::new("aaab")).unwrap();
        assert_eq!(results, vec!['a', 'a', 'a']);
        assert_eq!(cursor.peek(), Some('b'));
    }

    #[test]
    fn test_many_digits_scenario() {
        let mut state = RunState::new();
        let parser = many(satisfy_as(|c| c.is_ascii_digit(), "digit"));
        let (results, cursor) = parser.parse(&mut state, Cursor::new("123")).unwrap();
        assert_eq!(results, vec!['1', '2', '3']);
        assert_eq!(cursor.offset(), 3);
    }

    #[test]
    fn test_many_consuming_failure_propagates() {
        let mut state = RunState::new();
        // Second element commits on 'a' and then fails.
        let parser = many(string("ab"));
        let failure = parser.parse(&mut state, Cursor::new("abax")).unwrap_err();
        assert!(failure.consumed);
    }

    #[test]
    fn test_many_rejects_non_consumptive_iteration() {
        let mut state = RunState::new();
        let parser = many(pure('a'));
        let failure = parser.parse(&mut state, Cursor::new("zzz")).unwrap_err();
        match failure.kind {
            FailureKind::Fault(Fault::NonConsumptiveIteration { pos }) => {
                assert_eq!(pos.offset, 0);
            }
            other => panic!("expected iteration fault, got {other:?}"),
        }
    }

    #[test]
    fn test_skip_many_discards_results() {
        let mut state = RunState::new();
        let parser = skip_many(is_char(' '));
        let ((), cursor) = parser.parse(&mut state, Cursor::new("   x")).unwrap();
        assert_eq!(cursor.peek(), Some('x'));
    }

    #[test]
    fn test_many_n_requires_prefix() {
        let mut state = RunState::new();
        let parser = many_n(2, is_char('a'));
        let (results, _) = parser.parse(&mut state, Cursor::new("aaa")).unwrap();
        assert_eq!(results.len(), 3);

        let failure = parser.parse(&mut state, Cursor::new("a")).unwrap_err();
        assert!(failure.consumed);
    }

    #[test]
    fn test_many_n_zero_behaves_like_many() {
        let mut state = RunState::new();
        let parser = many_n(0, is_char('a'));
        let (results, _) = parser.parse(&mut state, Cursor::new("b")).unwrap();
        assert_eq!(results, vec![]);
    }

    #[test]
    fn test_skip_many_n() {
        let mut state = RunState::new();
        let parser = skip_many_n(1, is_char('x'));
        let ((), cursor) = parser.parse(&mut state, Cursor::new("xxy")).unwrap();
        assert_eq!(cursor.peek(), Some('y'));
        assert!(parser.parse(&mut state, Cursor::new("y")).is_err());
    }
}
