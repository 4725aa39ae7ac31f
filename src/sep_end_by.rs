use crate::cursor::Cursor;
use crate::error::{Failure, Fault};
use crate::parser::{Parser, Step};
use crate::state::RunState;

/// One or more items separated by a separator, with an optional trailing
/// separator.
///
/// After each item the separator is tried: if absent the list ends; if
/// present the next item is tried, and a non-consuming item failure ends
/// the list with the trailing separator consumed.
pub struct SepEndBy1<P, S> {
    parser: P,
    separator: S,
}

impl<P, S> SepEndBy1<P, S> {
    pub fn new(parser: P, separator: S) -> Self {
        SepEndBy1 { parser, separator }
    }
}

fn sep_end_tail<'src, P, S>(
    parser: &P,
    separator: &S,
    state: &mut RunState,
    mut current: Cursor<'src>,
    results: &mut Vec<P::Output>,
) -> Result<Cursor<'src>, Failure>
where
    P: Parser<'src>,
    S: Parser<'src>,
{
    loop {
        let after_sep = match separator.parse(state, current) {
            Ok((_, next)) => next,
            Err(failure) if failure.consumed || failure.is_fault() => return Err(failure),
            Err(_) => return Ok(current),
        };
        match parser.parse(state, after_sep) {
            Ok((_, next)) if next.offset() == current.offset() => {
                return Err(Failure::fault(Fault::NonConsumptiveIteration {
                    pos: current.pos(),
                }));
            }
            Ok((value, next)) => {
                results.push(value);
                current = next;
            }
            Err(failure) if failure.consumed || failure.is_fault() => return Err(failure),
            Err(_) => return Ok(after_sep), // trailing separator
        }
    }
}

impl<'src, P, S> Parser<'src> for SepEndBy1<P, S>
where
    P: Parser<'src>,
    S: Parser<'src>,
{
    type Output = Vec<P::Output>;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let (first, current) = self.parser.parse(state, cursor)?;
        let mut results = vec![first];
        let current = sep_end_tail(&self.parser, &self.separator, state, current, &mut results)?;
        Ok((results, current))
    }
}

/// Zero or more items with optional trailing separator.
pub struct SepEndBy<P, S> {
    parser: P,
    separator: S,
}

impl<P, S> SepEndBy<P, S> {
    pub fn new(parser: P, separator: S) -> Self {
        SepEndBy { parser, separator }
    }
}

impl<'src, P, S> Parser<'src> for SepEndBy<P, S>
where
    P: Parser<'src>,
    S: Parser<'src>,
{
    type Output = Vec<P::Output>;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let (first, current) = match self.parser.parse(state, cursor) {
            Ok(success) => success,
            Err(failure) if failure.consumed || failure.is_fault() => return Err(failure),
            Err(_) => return Ok((Vec::new(), cursor)),
        };
        let mut results = vec![first];
        let current = sep_end_tail(&self.parser, &self.separator, state, current, &mut results)?;
        Ok((results, current))
    }
}

/// Convenience function to create a SepEndBy1 parser
pub fn sep_end_by1<'src, P, S>(parser: P, separator: S) -> SepEndBy1<P, S>
where
    P: Parser<'src>,
    S: Parser<'src>,
{
    SepEndBy1::new(parser, separator)
}

/// Convenience function to create a SepEndBy parser
pub fn sep_end_by<'src, P, S>(parser: P, separator: S) -> SepEndBy<P, S>
where
    P: Parser<'src>,
    S: Parser<'src>,
{
    SepEndBy::new(parser, separator)
}
