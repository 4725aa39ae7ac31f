use std::borrow::Cow;

use crate::cursor::Cursor;
use crate::error::{Failure, SyntaxError};
use crate::parser::{Parser, Step};
use crate::state::RunState;

/// Parser that applies a predicate to the output of another parser.
///
/// A value that fails the predicate turns the parse into a failure at the
/// entry position. The failure inherits the inner parser's consumption, so
/// it lands inside the committed region; wrap in
/// [`atomic`](crate::atomic::atomic) to make the check backtrackable.
pub struct Filter<P, F> {
    parser: P,
    predicate: F,
    reason: Cow<'static, str>,
}

impl<P, F> Filter<P, F> {
    pub fn new(parser: P, predicate: F, reason: impl Into<Cow<'static, str>>) -> Self {
        Filter {
            parser,
            predicate,
            reason: reason.into(),
        }
    }
}

impl<'src, P, F> Parser<'src> for Filter<P, F>
where
    P: Parser<'src>,
    F: Fn(&P::Output) -> bool,
{
    type Output = P::Output;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let (value, after) = self.parser.parse(state, cursor)?;
        if (self.predicate)(&value) {
            Ok((value, after))
        } else {
            Err(Failure::syntax(
                SyntaxError::because(cursor.pos(), self.reason.clone()),
                after.offset() > cursor.offset(),
            ))
        }
    }
}

/// Parser that rejects outputs for which a partial function produces a
/// reason.
///
/// Where [`Filter`] carries one fixed message, `FilterOut` computes the
/// reason from the offending value.
pub struct FilterOut<P, F> {
    parser: P,
    reject: F,
}

impl<P, F> FilterOut<P, F> {
    pub fn new(parser: P, reject: F) -> Self {
        FilterOut { parser, reject }
    }
}

impl<'src, P, F> Parser<'src> for FilterOut<P, F>
where
    P: Parser<'src>,
    F: Fn(&P::Output) -> Option<String>,
{
    type Output = P::Output;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let (value, after) = self.parser.parse(state, cursor)?;
        match (self.reject)(&value) {
            None => Ok((value, after)),
            Some(reason) => Err(Failure::syntax(
                SyntaxError::because(cursor.pos(), reason),
                after.offset() > cursor.offset(),
            )),
        }
    }
}

/// Convenience function to create a Filter parser
pub fn filter<'src, P, F>(
    parser: P,
    predicate: F,
    reason: impl Into<Cow<'static, str>>,
) -> Filter<P, F>
where
    P: Parser<'src>,
    F: Fn(&P::Output) -> bool,
{
    Filter::new(parser, predicate, reason)
}

/// Convenience function to create a FilterOut parser
pub fn filter_out<'src, P, F>(parser: P, reject: F) -> FilterOut<P, F>
where
    P: Parser<'src>,
    F: Fn(&P::Output) -> Option<String>,
{
    FilterOut::new(parser, reject)
}

/// Extension trait to add filter methods to all parsers
pub trait FilterExt<'src>: Parser<'src> + Sized {
    fn filter<F>(self, predicate: F, reason: impl Into<Cow<'static, str>>) -> Filter<Self, F>
    where
        F: Fn(&Self::Output) -> bool,
    {
        Filter::new(self, predicate, reason)
    }

    fn filter_out<F>(self, reject: F) -> FilterOut<Self, F>
    where
        F: Fn(&Self::Output) -> Option<String>,
    {
        FilterOut::new(self, reject)
    }
}

impl<'src, P: Parser<'src>> FilterExt<'src> for P {}
