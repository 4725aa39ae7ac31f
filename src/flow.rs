//! Control-flow combinators over parsed values: branching and
//! register-style loops.

use crate::cursor::Cursor;
use crate::parser::{Parser, Step};
use crate::state::RunState;

/// Branch on a parsed boolean.
pub struct IfElse<C, P, Q> {
    cond: C,
    on_true: P,
    on_false: Q,
}

impl<C, P, Q> IfElse<C, P, Q> {
    pub fn new(cond: C, on_true: P, on_false: Q) -> Self {
        IfElse {
            cond,
            on_true,
            on_false,
        }
    }
}

impl<'src, C, P, Q> Parser<'src> for IfElse<C, P, Q>
where
    C: Parser<'src, Output = bool>,
    P: Parser<'src>,
    Q: Parser<'src, Output = P::Output>,
{
    type Output = P::Output;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let entry = cursor;
        let (taken, cursor) = self.cond.parse(state, cursor)?;
        let advanced = cursor.offset() > entry.offset();
        let branch = if taken {
            self.on_true.parse(state, cursor)
        } else {
            self.on_false.parse(state, cursor)
        };
        branch.map_err(|failure| failure.after_consuming(advanced))
    }
}

/// Run a body only when a parsed condition holds.
pub struct When<C, P> {
    cond: C,
    body: P,
}

impl<C, P> When<C, P> {
    pub fn new(cond: C, body: P) -> Self {
        When { cond, body }
    }
}

impl<'src, C, P> Parser<'src> for When<C, P>
where
    C: Parser<'src, Output = bool>,
    P: Parser<'src, Output = ()>,
{
    type Output = ();

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let entry = cursor;
        let (taken, cursor) = self.cond.parse(state, cursor)?;
        if !taken {
            return Ok(((), cursor));
        }
        let advanced = cursor.offset() > entry.offset();
        self.body
            .parse(state, cursor)
            .map_err(|failure| failure.after_consuming(advanced))
    }
}

/// Repeat a boolean body while it yields true.
///
/// Unlike [`many`](crate::many::many) there is no consumption guard here:
/// the body typically drives itself through register state, which changes
/// legitimately between non-consuming iterations.
pub struct WhileTrue<P> {
    body: P,
}

impl<P> WhileTrue<P> {
    pub fn new(body: P) -> Self {
        WhileTrue { body }
    }
}

impl<'src, P> Parser<'src> for WhileTrue<P>
where
    P: Parser<'src, Output = bool>,
{
    type Output = ();

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let mut current = cursor;
        loop {
            let progressed = current.offset() > cursor.offset();
            let (keep_going, next) = self
                .body
                .parse(state, current)
                .map_err(|failure| failure.after_consuming(progressed))?;
            current = next;
            if !keep_going {
                return Ok(((), current));
            }
        }
    }
}

/// A `for`-style loop: initialize, test, run a body, step, repeat.
///
/// The loop variable lives in a cell private to one evaluation, matching a
/// fresh register scoped to the loop; the condition and step parsers run
/// on every round and may themselves consume input or touch registers.
pub struct ForLoop<I, C, S, B> {
    init: I,
    cond: C,
    step: S,
    body: B,
}

impl<I, C, S, B> ForLoop<I, C, S, B> {
    pub fn new(init: I, cond: C, step: S, body: B) -> Self {
        ForLoop {
            init,
            cond,
            step,
            body,
        }
    }
}

impl<'src, I, C, S, B, T, FC, FS, Q> Parser<'src> for ForLoop<I, C, S, B>
where
    I: Parser<'src, Output = T>,
    C: Parser<'src, Output = FC>,
    S: Parser<'src, Output = FS>,
    FC: Fn(&T) -> bool,
    FS: Fn(T) -> T,
    B: Fn(&T) -> Q,
    Q: Parser<'src>,
{
    type Output = ();

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let (mut value, mut current) = self.init.parse(state, cursor)?;
        loop {
            let progressed = current.offset() > cursor.offset();
            let (test, next) = self
                .cond
                .parse(state, current)
                .map_err(|failure| failure.after_consuming(progressed))?;
            current = next;
            if !test(&value) {
                return Ok(((), current));
            }
            let progressed = current.offset() > cursor.offset();
            let (_, next) = (self.body)(&value)
                .parse(state, current)
                .map_err(|failure| failure.after_consuming(progressed))?;
            current = next;
            let progressed = current.offset() > cursor.offset();
            let (step, next) = self
                .step
                .parse(state, current)
                .map_err(|failure| failure.after_consuming(progressed))?;
            current = next;
            value = step(value);
        }
    }
}

/// As [`ForLoop`], collecting every body result.
pub struct ForYield<I, C, S, B> {
    init: I,
    cond: C,
    step: S,
    body: B,
}

impl<I, C, S, B> ForYield<I, C, S, B> {
    pub fn new(init: I, cond: C, step: S, body: B) -> Self {
        ForYield {
            init,
            cond,
            step,
            body,
        }
    }
}

impl<'src, I, C, S, B, T, FC, FS, Q> Parser<'src> for ForYield<I, C, S, B>
where
    I: Parser<'src, Output = T>,
    C: Parser<'src, Output = FC>,
    S: Parser<'src, Output = FS>,
    FC: Fn(&T) -> bool,
    FS: Fn(T) -> T,
    B: Fn(&T) -> Q,
    Q: Parser<'src>,
{
    type Output = Vec<Q::Output>;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let mut results = Vec::new();
        let (mut value, mut current) = self.init.parse(state, cursor)?;
        loop {
            let progressed = current.offset() > cursor.offset();
            let (test, next) = self
                .cond
                .parse(state, current)
                .map_err(|failure| failure.after_consuming(progressed))?;
            current = next;
            if !test(&value) {
                return Ok((results, current));
            }
            let progressed = current.offset() > cursor.offset();
            let (item, next) = (self.body)(&value)
                .parse(state, current)
                .map_err(|failure| failure.after_consuming(progressed))?;
            results.push(item);
            current = next;
            let progressed = current.offset() > cursor.offset();
            let (step, next) = self
                .step
                .parse(state, current)
                .map_err(|failure| failure.after_consuming(progressed))?;
            current = next;
            value = step(value);
        }
    }
}

/// Convenience function to create an IfElse parser
pub fn if_else<'src, C, P, Q>(cond: C, on_true: P, on_false: Q) -> IfElse<C, P, Q>
where
    C: Parser<'src, Output = bool>,
    P: Parser<'src>,
    Q: Parser<'src, Output = P::Output>,
{
    IfElse::new(cond, on_true, on_false)
}

/// Convenience function to create a When parser
pub fn when<'src, C, P>(cond: C, body: P) -> When<C, P>
where
    C: Parser<'src, Output = bool>,
    P: Parser<'src, Output = ()>,
{
    When::new(cond, body)
}

/// Convenience function to create a WhileTrue parser
pub fn while_true<'src, P>(body: P) -> WhileTrue<P>
where
    P: Parser<'src, Output = bool>,
{
    WhileTrue::new(body)
}

/// Convenience function to create a ForLoop parser
pub fn for_loop<'src, I, C, S, B, T, FC, FS, Q>(
    init: I,
    cond: C,
    step: S,
    body: B,
) -> ForLoop<I, C, S, B>
where
    I: Parser<'src, Output = T>,
    C: Parser<'src, Output = FC>,
    S: Parser<'src, Output = FS>,
    FC: Fn(&T) -> bool,
    FS: Fn(T) -> T,
    B: Fn(&T) -> Q,
    Q: Parser<'src>,
{
    ForLoop::new(init, cond, step, body)
}

/// Convenience function to create a ForYield parser
pub fn for_yield<'src, I, C, S, B, T, FC, FS, Q>(
    init: I,
    cond: C,
    step: S,
    body: B,
) -> ForYield<I, C, S, B>
where
    I: Parser<'src, Output = T>,
    C: Parser<'src, Output = FC>,
    S: Parser<'src, Output = FS>,
    FC: Fn(&T) -> bool,
    FS: Fn(T) -> T,
    B: Fn(&T) -> Q,
    Q: Parser<'src>,
{
    ForYield::new(init, cond, step, body)
}
