use crate::cursor::Cursor;
use crate::parser::{Parser, Step};
use crate::state::RunState;

/// Two-way sum used by [`select`] to encode conditional continuations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Either<L, R> {
    Left(L),
    Right(R),
}

/// Parser combinator for conditional continuation.
///
/// Runs the scrutinee; a `Right` value is returned as-is, while a `Left`
/// value is fed to the function produced by the second parser. The second
/// parser only runs (and only consumes) on the `Left` path.
pub struct Select<PE, PF> {
    scrutinee: PE,
    on_left: PF,
}

impl<PE, PF> Select<PE, PF> {
    pub fn new(scrutinee: PE, on_left: PF) -> Self {
        Select { scrutinee, on_left }
    }
}

impl<'src, PE, PF, L, R, F> Parser<'src> for Select<PE, PF>
where
    PE: Parser<'src, Output = Either<L, R>>,
    PF: Parser<'src, Output = F>,
    F: Fn(L) -> R,
{
    type Output = R;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let entry = cursor;
        let (scrutinee, cursor) = self.scrutinee.parse(state, cursor)?;
        match scrutinee {
            Either::Right(value) => Ok((value, cursor)),
            Either::Left(left) => {
                let (function, cursor) = self
                    .on_left
                    .parse(state, cursor)
                    .map_err(|failure| failure.after_consuming(cursor.offset() > entry.offset()))?;
                Ok((function(left), cursor))
            }
        }
    }
}

/// Convenience function to create a Select parser
pub fn select<'src, PE, PF, L, R, F>(scrutinee: PE, on_left: PF) -> Select<PE, PF>
where
    PE: Parser<'src, Output = Either<L, R>>,
    PF: Parser<'src, Output = F>,
    F: Fn(L) -> R,
{
    Select::new(scrutinee, on_left)
}
