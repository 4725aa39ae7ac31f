use crate::cursor::Cursor;
use crate::parser::{Parser, Step};
use crate::state::RunState;

/// Parser combinator that matches a fixed number of occurrences, no more.
///
/// `exactly(0, p)` succeeds with an empty list without touching the input.
pub struct Exactly<P> {
    count: usize,
    parser: P,
}

impl<P> Exactly<P> {
    pub fn new(count: usize, parser: P) -> Self {
        Exactly { count, parser }
    }
}

impl<'src, P> Parser<'src> for Exactly<P>
where
    P: Parser<'src>,
{
    type Output = Vec<P::Output>;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let mut results = Vec::with_capacity(self.count);
        let mut current = cursor;
        for _ in 0..self.count {
            let progressed = current.offset() > cursor.offset();
            let (value, next) = self
                .parser
                .parse(state, current)
                .map_err(|failure| failure.after_consuming(progressed))?;
            results.push(value);
            current = next;
        }
        Ok((results, current))
    }
}

/// Convenience function to create an Exactly parser
pub fn exactly<'src, P>(count: usize, parser: P) -> Exactly<P>
where
    P: Parser<'src>,
{
    Exactly::new(count, parser)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::satisfy::satisfy_as;

    fn digit() -> crate::satisfy::Satisfy<impl Fn(char) -> bool> {
        satisfy_as(|c| c.is_ascii_digit(), "digit")
    }

    #[test]
    fn test_exactly_stops_at_count() {
        let mut state = RunState::new();
        let parser = exactly(3, digit());
        let (items, cursor) = parser.parse(&mut state, Cursor::new("12345")).unwrap();
        assert_eq!(items, vec!['1', '2', '3']);
        assert_eq!(cursor.peek(), Some('4'));
    }

    #[test]
    fn test_exactly_too_few_fails_consuming() {
        let mut state = RunState::new();
        let parser = exactly(3, digit());
        let failure = parser.parse(&mut state, Cursor::new("12")).unwrap_err();
        assert!(failure.consumed);
    }

    #[test]
    fn test_exactly_zero_is_pure_empty() {
        let mut state = RunState::new();
        let parser = exactly(0, digit());
        let (items, cursor) = parser.parse(&mut state, Cursor::new("xyz")).unwrap();
        assert_eq!(items, vec![]);
        assert_eq!(cursor.offset(), 0);
    }

    #[test]
    fn test_exactly_first_failure_not_consuming() {
        let mut state = RunState::new();
        let parser = exactly(2, digit());
        let failure = parser.parse(&mut state, Cursor::new("xy")).unwrap_err();
        assert!(!failure.consumed);
    }
}
