//! Scoped register combinators: temporary values, rollback, and
//! run-scoped allocation.

use crate::cursor::Cursor;
use crate::error::Failure;
use crate::parser::{Parser, Step};
use crate::register::{Get, Reg};
use crate::state::RunState;

/// Run a body with a register temporarily holding a given value.
///
/// The prior contents come back on SUCCESS only; a failing body leaves the
/// register as the body left it. Wrap in [`Rollback`] when failure should
/// also restore.
pub struct LocalValue<T, P> {
    reg: Reg<T>,
    value: T,
    body: P,
}

impl<T, P> LocalValue<T, P> {
    pub fn new(reg: Reg<T>, value: T, body: P) -> Self {
        LocalValue { reg, value, body }
    }
}

impl<'src, T, P> Parser<'src> for LocalValue<T, P>
where
    T: Clone + 'static,
    P: Parser<'src>,
{
    type Output = P::Output;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let saved = state
            .snapshot::<T>(self.reg.shared())
            .map_err(Failure::fault)?;
        state
            .write(self.reg.shared(), self.value.clone())
            .map_err(Failure::fault)?;
        let (value, cursor) = self.body.parse(state, cursor)?;
        state
            .restore(self.reg.shared(), saved)
            .map_err(Failure::fault)?;
        Ok((value, cursor))
    }
}

/// As [`LocalValue`], deriving the temporary value from the current one.
pub struct LocalWith<T, F, P> {
    reg: Reg<T>,
    f: F,
    body: P,
}

impl<T, F, P> LocalWith<T, F, P> {
    pub fn new(reg: Reg<T>, f: F, body: P) -> Self {
        LocalWith { reg, f, body }
    }
}

impl<'src, T, F, P> Parser<'src> for LocalWith<T, F, P>
where
    T: Clone + 'static,
    F: Fn(T) -> T,
    P: Parser<'src>,
{
    type Output = P::Output;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let current = state
            .read::<T>(self.reg.shared(), cursor.pos())
            .map_err(Failure::fault)?;
        state
            .write(self.reg.shared(), (self.f)(current.clone()))
            .map_err(Failure::fault)?;
        let (value, cursor) = self.body.parse(state, cursor)?;
        state
            .restore(self.reg.shared(), Some(current))
            .map_err(Failure::fault)?;
        Ok((value, cursor))
    }
}

/// As [`LocalValue`], parsing the temporary value first.
pub struct LocalFrom<T, Q, P> {
    reg: Reg<T>,
    source: Q,
    body: P,
}

impl<T, Q, P> LocalFrom<T, Q, P> {
    pub fn new(reg: Reg<T>, source: Q, body: P) -> Self {
        LocalFrom { reg, source, body }
    }
}

impl<'src, T, Q, P> Parser<'src> for LocalFrom<T, Q, P>
where
    T: Clone + 'static,
    Q: Parser<'src, Output = T>,
    P: Parser<'src>,
{
    type Output = P::Output;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let entry = cursor;
        let (new_value, cursor) = self.source.parse(state, cursor)?;
        let advanced = cursor.offset() > entry.offset();
        let saved = state
            .snapshot::<T>(self.reg.shared())
            .map_err(Failure::fault)?;
        state
            .write(self.reg.shared(), new_value)
            .map_err(Failure::fault)?;
        let (value, cursor) = self
            .body
            .parse(state, cursor)
            .map_err(|failure| failure.after_consuming(advanced))?;
        state
            .restore(self.reg.shared(), saved)
            .map_err(Failure::fault)?;
        Ok((value, cursor))
    }
}

/// Restore a register when the wrapped parser fails without consuming.
///
/// A consuming failure passes through untouched, keeping the register
/// state the body produced; success passes through as well.
pub struct Rollback<T, P> {
    reg: Reg<T>,
    parser: P,
}

impl<T, P> Rollback<T, P> {
    pub fn new(reg: Reg<T>, parser: P) -> Self {
        Rollback { reg, parser }
    }
}

impl<'src, T, P> Parser<'src> for Rollback<T, P>
where
    T: Clone + 'static,
    P: Parser<'src>,
{
    type Output = P::Output;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let saved = state
            .snapshot::<T>(self.reg.shared())
            .map_err(Failure::fault)?;
        match self.parser.parse(state, cursor) {
            Ok(success) => Ok(success),
            Err(failure) if failure.consumed || failure.is_fault() => Err(failure),
            Err(failure) => {
                state
                    .restore(self.reg.shared(), saved)
                    .map_err(Failure::fault)?;
                Err(failure)
            }
        }
    }
}

/// Allocate a register for the duration of a body.
///
/// The register is created fresh on every run invocation, initialized with
/// the source parser's result, and deallocated on every exit path, so the
/// handle passed to the body never leaks usable state.
pub struct FillReg<P, F> {
    source: P,
    body: F,
}

impl<P, F> FillReg<P, F> {
    pub fn new(source: P, body: F) -> Self {
        FillReg { source, body }
    }
}

impl<'src, P, F, Q> Parser<'src> for FillReg<P, F>
where
    P: Parser<'src>,
    P::Output: Clone + 'static,
    F: Fn(Reg<P::Output>) -> Q,
    Q: Parser<'src>,
{
    type Output = Q::Output;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let entry = cursor;
        let (value, cursor) = self.source.parse(state, cursor)?;
        let advanced = cursor.offset() > entry.offset();
        let reg: Reg<P::Output> = Reg::new();
        let result = match state.write(reg.shared(), value) {
            Ok(()) => (self.body)(reg.clone())
                .parse(state, cursor)
                .map_err(|failure| failure.after_consuming(advanced)),
            Err(fault) => Err(Failure::fault(fault)),
        };
        state.release(reg.shared());
        result
    }
}

/// Parse once, then let the body reuse the result any number of times.
pub struct Persist<P, F> {
    source: P,
    body: F,
}

impl<P, F> Persist<P, F> {
    pub fn new(source: P, body: F) -> Self {
        Persist { source, body }
    }
}

impl<'src, P, F, Q> Parser<'src> for Persist<P, F>
where
    P: Parser<'src>,
    P::Output: Clone + 'static,
    F: Fn(Get<P::Output>) -> Q,
    Q: Parser<'src>,
{
    type Output = Q::Output;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        FillReg::new(&self.source, |reg: Reg<P::Output>| (self.body)(reg.get()))
            .parse(state, cursor)
    }
}

/// Convenience function to create a FillReg parser
pub fn fill_reg<'src, P, F, Q>(source: P, body: F) -> FillReg<P, F>
where
    P: Parser<'src>,
    P::Output: Clone + 'static,
    F: Fn(Reg<P::Output>) -> Q,
    Q: Parser<'src>,
{
    FillReg::new(source, body)
}

/// Convenience function to create a Persist parser
pub fn persist<'src, P, F, Q>(source: P, body: F) -> Persist<P, F>
where
    P: Parser<'src>,
    P::Output: Clone + 'static,
    F: Fn(Get<P::Output>) -> Q,
    Q: Parser<'src>,
{
    Persist::new(source, body)
}
