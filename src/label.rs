use std::borrow::Cow;

use crate::cursor::Cursor;
use crate::parser::{Parser, Step};
use crate::state::RunState;

/// Parser combinator that renames what a parser "expects".
///
/// On a non-consuming failure the inner expected set is replaced with the
/// single given label; a consuming failure already points inside the
/// construct, so it is reported untouched.
pub struct Label<P> {
    parser: P,
    label: Cow<'static, str>,
}

impl<P> Label<P> {
    pub fn new(parser: P, label: impl Into<Cow<'static, str>>) -> Self {
        Label {
            parser,
            label: label.into(),
        }
    }
}

impl<'src, P> Parser<'src> for Label<P>
where
    P: Parser<'src>,
{
    type Output = P::Output;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        self.parser.parse(state, cursor).map_err(|failure| {
            if failure.consumed {
                failure
            } else {
                let label = self.label.clone();
                failure.map_syntax(|error| error.relabel(label))
            }
        })
    }
}

/// Parser combinator that removes a parser's expected set entirely.
///
/// The usual client is whitespace skipping, where "expected space" noise
/// would drown the real report.
pub struct Hide<P> {
    parser: P,
}

impl<P> Hide<P> {
    pub fn new(parser: P) -> Self {
        Hide { parser }
    }
}

impl<'src, P> Parser<'src> for Hide<P>
where
    P: Parser<'src>,
{
    type Output = P::Output;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        self.parser.parse(state, cursor).map_err(|failure| {
            if failure.consumed {
                failure
            } else {
                failure.map_syntax(|error| error.hide_expected())
            }
        })
    }
}

/// Convenience function to create a Label parser
pub fn label<'src, P>(parser: P, name: impl Into<Cow<'static, str>>) -> Label<P>
where
    P: Parser<'src>,
{
    Label::new(parser, name)
}

/// Convenience function to create a Hide parser
pub fn hide<'src, P>(parser: P) -> Hide<P>
where
    P: Parser<'src>,
{
    Hide::new(parser)
}

/// Extension trait to add .label() and .hide() method support for parsers
pub trait LabelExt<'src>: Parser<'src> + Sized {
    fn label(self, name: impl Into<Cow<'static, str>>) -> Label<Self> {
        Label::new(self, name)
    }

    fn hide(self) -> Hide<Self> {
        Hide::new(self)
    }
}

impl<'src, P> LabelExt<'src> for P where P: Parser<'src> {}
