use crate::cursor::Cursor;
use crate::parser::{Parser, Step};
use crate::state::RunState;

/// Parser combinator that runs two parsers left to right and combines
/// their results with a pure function.
///
/// `lift2(f, p, q)` is `p.and(q).map(|(a, b)| f(a, b))` without the tuple
/// plumbing; the same sequencing and consumption rules apply.
pub struct Lift2<F, P1, P2> {
    combiner: F,
    parser1: P1,
    parser2: P2,
}

impl<F, P1, P2> Lift2<F, P1, P2> {
    pub fn new(combiner: F, parser1: P1, parser2: P2) -> Self {
        Lift2 {
            combiner,
            parser1,
            parser2,
        }
    }
}

impl<'src, F, P1, P2, U> Parser<'src> for Lift2<F, P1, P2>
where
    P1: Parser<'src>,
    P2: Parser<'src>,
    F: Fn(P1::Output, P2::Output) -> U,
{
    type Output = U;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let entry = cursor;
        let (first, cursor) = self.parser1.parse(state, cursor)?;
        let (second, cursor) = self
            .parser2
            .parse(state, cursor)
            .map_err(|failure| failure.after_consuming(cursor.offset() > entry.offset()))?;
        Ok(((self.combiner)(first, second), cursor))
    }
}

/// Three-parser variant of [`Lift2`].
pub struct Lift3<F, P1, P2, P3> {
    combiner: F,
    parser1: P1,
    parser2: P2,
    parser3: P3,
}

impl<F, P1, P2, P3> Lift3<F, P1, P2, P3> {
    pub fn new(combiner: F, parser1: P1, parser2: P2, parser3: P3) -> Self {
        Lift3 {
            combiner,
            parser1,
            parser2,
            parser3,
        }
    }
}

impl<'src, F, P1, P2, P3, U> Parser<'src> for Lift3<F, P1, P2, P3>
where
    P1: Parser<'src>,
    P2: Parser<'src>,
    P3: Parser<'src>,
    F: Fn(P1::Output, P2::Output, P3::Output) -> U,
{
    type Output = U;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let entry = cursor;
        let (first, cursor) = self.parser1.parse(state, cursor)?;
        let (second, cursor) = self
            .parser2
            .parse(state, cursor)
            .map_err(|failure| failure.after_consuming(cursor.offset() > entry.offset()))?;
        let (third, cursor) = self
            .parser3
            .parse(state, cursor)
            .map_err(|failure| failure.after_consuming(cursor.offset() > entry.offset()))?;
        Ok(((self.combiner)(first, second, third), cursor))
    }
}

/// Four-parser variant of [`Lift2`].
pub struct Lift4<F, P1, P2, P3, P4> {
    combiner: F,
    parser1: P1,
    parser2: P2,
    parser3: P3,
    parser4: P4,
}

impl<F, P1, P2, P3, P4> Lift4<F, P1, P2, P3, P4> {
    pub fn new(combiner: F, parser1: P1, parser2: P2, parser3: P3, parser4: P4) -> Self {
        Lift4 {
            combiner,
            parser1,
            parser2,
            parser3,
            parser4,
        }
    }
}

impl<'src, F, P1, P2, P3, P4, U> Parser<'src> for Lift4<F, P1, P2, P3, P4>
where
    P1: Parser<'src>,
    P2: Parser<'src>,
    P3: Parser<'src>,
    P4: Parser<'src>,
    F: Fn(P1::Output, P2::Output, P3::Output, P4::Output) -> U,
{
    type Output = U;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let entry = cursor;
        let (first, cursor) = self.parser1.parse(state, cursor)?;
        let (second, cursor) = self
            .parser2
            .parse(state, cursor)
            .map_err(|failure| failure.after_consuming(cursor.offset() > entry.offset()))?;
        let (third, cursor) = self
            .parser3
            .parse(state, cursor)
            .map_err(|failure| failure.after_consuming(cursor.offset() > entry.offset()))?;
        let (fourth, cursor) = self
            .parser4
            .parse(state, cursor)
            .map_err(|failure| failure.after_consuming(cursor.offset() > entry.offset()))?;
        Ok(((self.combiner)(first, second, third, fourth), cursor))
    }
}

/// Applicative application: run a parser yielding a function, then a
/// parser yielding its argument, and apply.
pub struct Ap<PF, PX> {
    function: PF,
    argument: PX,
}

impl<PF, PX> Ap<PF, PX> {
    pub fn new(function: PF, argument: PX) -> Self {
        Ap { function, argument }
    }
}

impl<'src, PF, PX, F, U> Parser<'src> for Ap<PF, PX>
where
    PF: Parser<'src, Output = F>,
    PX: Parser<'src>,
    F: Fn(PX::Output) -> U,
{
    type Output = U;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let entry = cursor;
        let (function, cursor) = self.function.parse(state, cursor)?;
        let (argument, cursor) = self
            .argument
            .parse(state, cursor)
            .map_err(|failure| failure.after_consuming(cursor.offset() > entry.offset()))?;
        Ok((function(argument), cursor))
    }
}

/// Convenience function to create a Lift2 parser
pub fn lift2<'src, F, P1, P2, U>(combiner: F, parser1: P1, parser2: P2) -> Lift2<F, P1, P2>
where
    P1: Parser<'src>,
    P2: Parser<'src>,
    F: Fn(P1::Output, P2::Output) -> U,
{
    Lift2::new(combiner, parser1, parser2)
}

/// Convenience function to create a Lift3 parser
pub fn lift3<'src, F, P1, P2, P3, U>(
    combiner: F,
    parser1: P1,
    parser2: P2,
    parser3: P3,
) -> Lift3<F, P1, P2, P3>
where
    P1: Parser<'src>,
    P2: Parser<'src>,
    P3: Parser<'src>,
    F: Fn(P1::Output, P2::Output, P3::Output) -> U,
{
    Lift3::new(combiner, parser1, parser2, parser3)
}

/// Convenience function to create a Lift4 parser
pub fn lift4<'src, F, P1, P2, P3, P4, U>(
    combiner: F,
    parser1: P1,
    parser2: P2,
    parser3: P3,
    parser4: P4,
) -> Lift4<F, P1, P2, P3, P4>
where
    P1: Parser<'src>,
    P2: Parser<'src>,
    P3: Parser<'src>,
    P4: Parser<'src>,
    F: Fn(P1::Output, P2::Output, P3::Output, P4::Output) -> U,
{
    Lift4::new(combiner, parser1, parser2, parser3, parser4)
}

/// Convenience function to create an Ap parser
pub fn ap<'src, PF, PX, F, U>(function: PF, argument: PX) -> Ap<PF, PX>
where
    PF: Parser<'src, Output = F>,
    PX: Parser<'src>,
    F: Fn(PX::Output) -> U,
{
    Ap::new(function, argument)
}
