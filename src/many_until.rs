use crate::cursor::Cursor;
use crate::error::{Failure, FailureKind, Fault};
use crate::not_followed_by::NotFollowedBy;
use crate::parser::{Parser, Step};
use crate::state::RunState;

/// Parser combinator that collects items until a terminator matches.
///
/// Each round first tries `end`; when it succeeds the loop stops with the
/// collected items, having consumed the terminator. Otherwise one more item
/// is required. A consuming failure of either parser fails the whole
/// combinator.
pub struct ManyUntil<P, E> {
    parser: P,
    end: E,
}

impl<P, E> ManyUntil<P, E> {
    pub fn new(parser: P, end: E) -> Self {
        ManyUntil { parser, end }
    }
}

impl<'src, P, E> Parser<'src> for ManyUntil<P, E>
where
    P: Parser<'src>,
    E: Parser<'src>,
{
    type Output = Vec<P::Output>;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let mut results = Vec::new();
        let mut current = cursor;
        loop {
            let progressed = current.offset() > cursor.offset();
            let end_failure = match self.end.parse(state, current) {
                Ok((_, next)) => return Ok((results, next)),
                Err(failure) if failure.consumed || failure.is_fault() => {
                    return Err(failure.after_consuming(progressed));
                }
                Err(failure) => failure,
            };
            match self.parser.parse(state, current) {
                Ok((_, next)) if next.offset() == current.offset() => {
                    return Err(Failure::fault(Fault::NonConsumptiveIteration {
                        pos: current.pos(),
                    }));
                }
                Ok((value, next)) => {
                    results.push(value);
                    current = next;
                }
                Err(failure) if failure.is_fault() => return Err(failure),
                Err(failure) => {
                    // Neither the terminator nor an item: report both.
                    let failure = match end_failure.kind {
                        FailureKind::Syntax(end_error) => {
                            failure.map_syntax(|item_error| end_error.merge(item_error))
                        }
                        FailureKind::Fault(_) => failure,
                    };
                    return Err(failure.after_consuming(progressed));
                }
            }
        }
    }
}

/// One-or-more variant of [`ManyUntil`]: asserts the terminator is absent,
/// then requires a first item before entering the loop.
pub struct SomeUntil<P, E> {
    parser: P,
    end: E,
}

impl<P, E> SomeUntil<P, E> {
    pub fn new(parser: P, end: E) -> Self {
        SomeUntil { parser, end }
    }
}

impl<'src, P, E> Parser<'src> for SomeUntil<P, E>
where
    P: Parser<'src>,
    E: Parser<'src>,
{
    type Output = Vec<P::Output>;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let ((), current) = NotFollowedBy::new(&self.end).parse(state, cursor)?;
        let (first, current) = self.parser.parse(state, current)?;
        let advanced = current.offset() > cursor.offset();
        let (mut rest, current) = ManyUntil::new(&self.parser, &self.end)
            .parse(state, current)
            .map_err(|failure| failure.after_consuming(advanced))?;
        rest.insert(0, first);
        Ok((rest, current))
    }
}

/// Convenience function to create a ManyUntil parser
pub fn many_until<'src, P, E>(parser: P, end: E) -> ManyUntil<P, E>
where
    P: Parser<'src>,
    E: Parser<'src>,
{
    ManyUntil::new(parser, end)
}

/// Convenience function to create a SomeUntil parser
pub fn some_until<'src, P, E>(parser: P, end: E) -> SomeUntil<P, E>
where
    P: Parser<'src>,
    E: Parser<'src>,
{
    SomeUntil::new(parser, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::item;
    use crate::string::string;

    #[test]
    fn test_many_until_comment_body() {
        let mut state = RunState::new();
        let parser = many_until(item(), string("*/"));
        let (chars, cursor) = parser.parse(&mut state, Cursor::new("hello*/")).unwrap();
        assert_eq!(chars, vec!['h', 'e', 'l', 'l', 'o']);
        assert!(cursor.at_end()); // terminator consumed
    }

    #[test]
    fn test_many_until_empty_body() {
        let mut state = RunState::new();
        let parser = many_until(item(), string("*/"));
        let (chars, cursor) = parser.parse(&mut state, Cursor::new("*/x")).unwrap();
        assert_eq!(chars, vec![]);
        assert_eq!(cursor.peek(), Some('x'));
    }

    #[test]
    fn test_many_until_unterminated_fails() {
        let mut state = RunState::new();
        let parser = many_until(item(), string("*/"));
        let failure = parser.parse(&mut state, Cursor::new("hello")).unwrap_err();
        assert!(failure.consumed);
    }

    #[test]
    fn test_some_until_requires_one_item() {
        let mut state = RunState::new();
        let parser = some_until(item(), string("*/"));
        let failure = parser.parse(&mut state, Cursor::new("*/")).unwrap_err();
        assert!(!failure.consumed);

        let (chars, _) = parser.parse(&mut state, Cursor::new("a*/")).unwrap();
        assert_eq!(chars, vec!['a']);
    }
}
