use crate::cursor::Cursor;
use crate::parser::{Parser, Step};
use crate::state::RunState;

/// Parser combinator that sequences two parsers and returns both results
/// as a tuple.
///
/// If the first parser consumed input, a failure of the second is reported
/// as consuming: the sequence has committed.
///
/// Note: chaining `.and()` produces nested tuples like `((a, b), c)`;
/// [`lift2`](crate::lift::lift2) and friends flatten small arities.
pub struct And<P1, P2> {
    parser1: P1,
    parser2: P2,
}

impl<P1, P2> And<P1, P2> {
    pub fn new(parser1: P1, parser2: P2) -> Self {
        And { parser1, parser2 }
    }
}

impl<'src, P1, P2> Parser<'src> for And<P1, P2>
where
    P1: Parser<'src>,
    P2: Parser<'src>,
{
    type Output = (P1::Output, P2::Output);

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let entry = cursor;
        let (first, cursor) = self.parser1.parse(state, cursor)?;
        let advanced = cursor.offset() > entry.offset();
        let (second, cursor) = self
            .parser2
            .parse(state, cursor)
            .map_err(|failure| failure.after_consuming(advanced))?;
        Ok(((first, second), cursor))
    }
}

/// Convenience function to create an And parser
pub fn and<'src, P1, P2>(parser1: P1, parser2: P2) -> And<P1, P2>
where
    P1: Parser<'src>,
    P2: Parser<'src>,
{
    And::new(parser1, parser2)
}

/// Extension trait to add .and() method support for parsers
pub trait AndExt<'src>: Parser<'src> + Sized {
    fn and<P>(self, other: P) -> And<Self, P>
    where
        P: Parser<'src>,
    {
        And::new(self, other)
    }
}

impl<'src, P> AndExt<'src> for P where P: Parser<'src> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::satisfy::is_char;

    #[test]
    fn test_and_both_succeed() {
        let mut state = RunState::new();
        let parser = is_char('a').and(is_char('b'));
        let ((a, b), cursor) = parser.parse(&mut state, Cursor::new("abc")).unwrap();
        assert_eq!((a, b), ('a', 'b'));
        assert_eq!(cursor.peek(), Some('c'));
    }

    #[test]
    fn test_and_first_fails_without_consuming() {
        let mut state = RunState::new();
        let parser = is_char('a').and(is_char('b'));
        let failure = parser.parse(&mut state, Cursor::new("xb")).unwrap_err();
        assert!(!failure.consumed);
    }

    #[test]
    fn test_and_second_failure_is_consuming() {
        let mut state = RunState::new();
        let parser = is_char('a').and(is_char('b'));
        let failure = parser.parse(&mut state, Cursor::new("ax")).unwrap_err();
        assert!(failure.consumed);
    }

    #[test]
    fn test_and_after_non_consuming_left_stays_non_consuming() {
        use crate::pure::pure;
        let mut state = RunState::new();
        let parser = pure('p').and(is_char('b'));
        let failure = parser.parse(&mut state, Cursor::new("x")).unwrap_err();
        assert!(!failure.consumed);
    }

    #[test]
    fn test_and_chain() {
        let mut state = RunState::new();
        let parser = is_char('a').and(is_char('b')).and(is_char('c'));
        let (((a, b), c), cursor) = parser.parse(&mut state, Cursor::new("abc")).unwrap();
        assert_eq!((a, b, c), ('a', 'b', 'c'));
        assert!(cursor.at_end());
    }

    #[test]
    fn test_and_function_syntax() {
        let mut state = RunState::new();
        let parser = and(is_char('x'), is_char('y'));
        let ((x, y), _) = parser.parse(&mut state, Cursor::new("xy")).unwrap();
        assert_eq!((x, y), ('x', 'y'));
    }
}
