use crate::cursor::Cursor;
use crate::error::{Failure, Fault};
use crate::parser::{Parser, Step};
use crate::state::RunState;

/// One or more items separated by a separator, keeping the items.
///
/// After each item the separator is tried; a non-consuming separator
/// failure ends the list. Once a separator has been consumed the next item
/// is committed: its failure fails the whole list (so `"1, 2, "` is
/// rejected rather than parsed as `[1, 2]` with a dangling separator).
pub struct SepBy1<P, S> {
    parser: P,
    separator: S,
}

impl<P, S> SepBy1<P, S> {
    pub fn new(parser: P, separator: S) -> Self {
        SepBy1 { parser, separator }
    }
}

/// Continue an already-started separated list. Shared by the one-or-more
/// and zero-or-more front ends.
fn sep_tail<'src, P, S>(
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
        let sep_consumed = after_sep.offset() > current.offset();
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
            Err(failure) if failure.is_fault() => return Err(failure),
            Err(failure) => {
                let failure = failure.after_consuming(sep_consumed);
                if failure.consumed {
                    return Err(failure);
                }
                // Neither separator nor item consumed: the list ends
                // before the separator.
                return Ok(current);
            }
        }
    }
}

impl<'src, P, S> Parser<'src> for SepBy1<P, S>
where
    P: Parser<'src>,
    S: Parser<'src>,
{
    type Output = Vec<P::Output>;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let (first, current) = self.parser.parse(state, cursor)?;
        let mut results = vec![first];
        let current = sep_tail(&self.parser, &self.separator, state, current, &mut results)?;
        Ok((results, current))
    }
}

/// Zero or more items separated by a separator.
pub struct SepBy<P, S> {
    parser: P,
    separator: S,
}

impl<P, S> SepBy<P, S> {
    pub fn new(parser: P, separator: S) -> Self {
        SepBy { parser, separator }
    }
}

impl<'src, P, S> Parser<'src> for SepBy<P, S>
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
        let current = sep_tail(&self.parser, &self.separator, state, current, &mut results)?;
        Ok((results, current))
    }
}

/// Convenience function to create a SepBy1 parser
pub fn sep_by1<'src, P, S>(parser: P, separator: S) -> SepBy1<P, S>
where
    P: Parser<'src>,
    S: Parser<'src>,
{
    SepBy1::new(parser, separator)
}

/// Convenience function to create a SepBy parser
pub fn sep_by<'src, P, S>(parser: P, separator: S) -> SepBy<P, S>
where
    P: Parser<'src>,
    S: Parser<'src>,
{
    SepBy::new(parser, separator)
}
