use crate::cursor::Cursor;
use crate::many::{many, skip_many};
use crate::parser::{Parser, Step};
use crate::state::RunState;

/// Parser combinator that matches one or more occurrences of the given
/// parser.
pub struct SomeParser<P> {
    parser: P,
}

impl<P> SomeParser<P> {
    pub fn new(parser: P) -> Self {
        SomeParser { parser }
    }
}

impl<'src, P> Parser<'src> for SomeParser<P>
where
    P: Parser<'src>,
{
    type Output = Vec<P::Output>;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let (first, current) = self.parser.parse(state, cursor)?;
        let advanced = current.offset() > cursor.offset();
        let (mut rest, current) = many(&self.parser)
            .parse(state, current)
            .map_err(|failure| failure.after_consuming(advanced))?;
        rest.insert(0, first);
        Ok((rest, current))
    }
}

/// As [`SomeParser`], but discarding the results.
pub struct SkipSome<P> {
    parser: P,
}

impl<P> SkipSome<P> {
    pub fn new(parser: P) -> Self {
        SkipSome { parser }
    }
}

impl<'src, P> Parser<'src> for SkipSome<P>
where
    P: Parser<'src>,
{
    type Output = ();

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let (_, current) = self.parser.parse(state, cursor)?;
        let advanced = current.offset() > cursor.offset();
        skip_many(&self.parser)
            .parse(state, current)
            .map_err(|failure| failure.after_consuming(advanced))
    }
}

/// Convenience function to create a SomeParser
pub fn some<'src, P>(parser: P) -> SomeParser<P>
where
    P: Parser<'src>,
{
    SomeParser::new(parser)
}

/// Convenience function to create a SkipSome parser
pub fn skip_some<'src, P>(parser: P) -> SkipSome<P>
where
    P: Parser<'src>,
{
    SkipSome::new(parser)
}
