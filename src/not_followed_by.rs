use crate::cursor::Cursor;
use crate::error::{Failure, SyntaxError};
use crate::parser::{Parser, Step};
use crate::state::RunState;

/// Negative lookahead.
///
/// Succeeds with unit when the inner parser fails; fails non-consumingly,
/// reporting the matched slice as unexpected, when it succeeds. The cursor
/// is restored in every outcome. Faults from the inner parser still abort.
pub struct NotFollowedBy<P> {
    parser: P,
}

impl<P> NotFollowedBy<P> {
    pub fn new(parser: P) -> Self {
        NotFollowedBy { parser }
    }
}

impl<'src, P> Parser<'src> for NotFollowedBy<P>
where
    P: Parser<'src>,
{
    type Output = ();

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        match self.parser.parse(state, cursor) {
            Ok((_, after)) => {
                let matched = cursor.slice_to(&after);
                let found = if matched.is_empty() {
                    "successful parse".to_string()
                } else {
                    format!("\"{matched}\"")
                };
                Err(Failure::syntax(
                    SyntaxError::bare(cursor.pos()).with_unexpected(found),
                    false,
                ))
            }
            Err(failure) if failure.is_fault() => Err(failure),
            Err(_) => Ok(((), cursor)),
        }
    }
}

/// Convenience function to create a NotFollowedBy parser
pub fn not_followed_by<'src, P>(parser: P) -> NotFollowedBy<P>
where
    P: Parser<'src>,
{
    NotFollowedBy::new(parser)
}
