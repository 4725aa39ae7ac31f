use crate::cursor::Cursor;
use crate::parser::{Parser, Step};
use crate::state::RunState;

/// Parser combinator that sequences two parsers and keeps only the right
/// result.
pub struct Then<P1, P2> {
    parser1: P1,
    parser2: P2,
}

impl<P1, P2> Then<P1, P2> {
    pub fn new(parser1: P1, parser2: P2) -> Self {
        Then { parser1, parser2 }
    }
}

impl<'src, P1, P2> Parser<'src> for Then<P1, P2>
where
    P1: Parser<'src>,
    P2: Parser<'src>,
{
    type Output = P2::Output;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let entry = cursor;
        let (_, cursor) = self.parser1.parse(state, cursor)?;
        let advanced = cursor.offset() > entry.offset();
        self.parser2
            .parse(state, cursor)
            .map_err(|failure| failure.after_consuming(advanced))
    }
}

/// Parser combinator that sequences two parsers and keeps only the left
/// result.
pub struct Before<P1, P2> {
    parser1: P1,
    parser2: P2,
}

impl<P1, P2> Before<P1, P2> {
    pub fn new(parser1: P1, parser2: P2) -> Self {
        Before { parser1, parser2 }
    }
}

impl<'src, P1, P2> Parser<'src> for Before<P1, P2>
where
    P1: Parser<'src>,
    P2: Parser<'src>,
{
    type Output = P1::Output;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let entry = cursor;
        let (value, cursor) = self.parser1.parse(state, cursor)?;
        let advanced = cursor.offset() > entry.offset();
        let (_, cursor) = self
            .parser2
            .parse(state, cursor)
            .map_err(|failure| failure.after_consuming(advanced))?;
        Ok((value, cursor))
    }
}

/// Convenience function to create a Then parser
pub fn then<'src, P1, P2>(parser1: P1, parser2: P2) -> Then<P1, P2>
where
    P1: Parser<'src>,
    P2: Parser<'src>,
{
    Then::new(parser1, parser2)
}

/// Convenience function to create a Before parser
pub fn before<'src, P1, P2>(parser1: P1, parser2: P2) -> Before<P1, P2>
where
    P1: Parser<'src>,
    P2: Parser<'src>,
{
    Before::new(parser1, parser2)
}

/// Extension trait to add .then() method support for parsers
pub trait ThenExt<'src>: Parser<'src> + Sized {
    /// Sequence, keeping the right result.
    fn then<P>(self, other: P) -> Then<Self, P>
    where
        P: Parser<'src>,
    {
        Then::new(self, other)
    }
}

impl<'src, P> ThenExt<'src> for P where P: Parser<'src> {}

/// Extension trait to add .before() method support for parsers
pub trait BeforeExt<'src>: Parser<'src> + Sized {
    /// Sequence, keeping the left result.
    fn before<P>(self, other: P) -> Before<Self, P>
    where
        P: Parser<'src>,
    {
        Before::new(self, other)
    }
}

impl<'src, P> BeforeExt<'src> for P where P: Parser<'src> {}
