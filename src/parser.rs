use std::rc::Rc;
use std::sync::Arc;

use crate::cursor::Cursor;
use crate::error::Failure;
use crate::state::RunState;

/// Result of one parse step: the value plus the advanced cursor, or a
/// failure carrying the consumed bit.
pub type Step<'src, T> = Result<(T, Cursor<'src>), Failure>;

/// Core trait for parser combinators.
///
/// A parser is an immutable composed value; evaluating it never mutates the
/// parser itself, only the per-run `RunState` (the register table). The
/// cursor travels by value: success hands back the advanced cursor, failure
/// hands back none, so the caller's copy is the backtrack point.
pub trait Parser<'src> {
    type Output;

    /// Attempt to parse at `cursor`, using `state` for register storage.
    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output>;
}

impl<'src, P: Parser<'src> + ?Sized> Parser<'src> for &P {
    type Output = P::Output;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        (**self).parse(state, cursor)
    }
}

impl<'src, P: Parser<'src> + ?Sized> Parser<'src> for Box<P> {
    type Output = P::Output;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        (**self).parse(state, cursor)
    }
}

impl<'src, P: Parser<'src> + ?Sized> Parser<'src> for Rc<P> {
    type Output = P::Output;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        (**self).parse(state, cursor)
    }
}

impl<'src, P: Parser<'src> + ?Sized> Parser<'src> for Arc<P> {
    type Output = P::Output;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        (**self).parse(state, cursor)
    }
}
