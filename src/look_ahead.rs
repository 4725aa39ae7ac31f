use crate::cursor::Cursor;
use crate::parser::{Parser, Step};
use crate::state::RunState;

/// Positive lookahead: run a parser, keep its value, restore the cursor.
///
/// On failure the inner failure propagates unchanged, consumption bit
/// included.
pub struct LookAhead<P> {
    parser: P,
}

impl<P> LookAhead<P> {
    pub fn new(parser: P) -> Self {
        LookAhead { parser }
    }
}

impl<'src, P> Parser<'src> for LookAhead<P>
where
    P: Parser<'src>,
{
    type Output = P::Output;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let (value, _) = self.parser.parse(state, cursor)?;
        Ok((value, cursor))
    }
}

/// Convenience function to create a LookAhead parser
pub fn look_ahead<'src, P>(parser: P) -> LookAhead<P>
where
    P: Parser<'src>,
{
    LookAhead::new(parser)
}
