use std::borrow::Cow;

use crate::cursor::Cursor;
use crate::parser::{Parser, Step};
use crate::state::RunState;

/// Parser combinator that appends a user reason to any failure of the
/// inner parser.
pub struct Explain<P> {
    parser: P,
    reason: Cow<'static, str>,
}

impl<P> Explain<P> {
    pub fn new(parser: P, reason: impl Into<Cow<'static, str>>) -> Self {
        Explain {
            parser,
            reason: reason.into(),
        }
    }
}

impl<'src, P> Parser<'src> for Explain<P>
where
    P: Parser<'src>,
{
    type Output = P::Output;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        self.parser.parse(state, cursor).map_err(|failure| {
            let reason = self.reason.clone();
            failure.map_syntax(|error| error.with_reason(reason))
        })
    }
}

/// Convenience function to create an Explain parser
pub fn explain<'src, P>(parser: P, reason: impl Into<Cow<'static, str>>) -> Explain<P>
where
    P: Parser<'src>,
{
    Explain::new(parser, reason)
}

/// Extension trait to add .explain() method support for parsers
pub trait ExplainExt<'src>: Parser<'src> + Sized {
    fn explain(self, reason: impl Into<Cow<'static, str>>) -> Explain<Self> {
        Explain::new(self, reason)
    }
}

impl<'src, P> ExplainExt<'src> for P where P: Parser<'src> {}
