use crate::cursor::Cursor;
use crate::parser::{Parser, Step};
use crate::state::RunState;

/// Parser combinator that transforms the output of a parser using a
/// mapping function.
///
/// The mapper runs exactly once per successful production and never on a
/// failing attempt, so it is safe to give it observable effects.
pub struct Map<P, F> {
    parser: P,
    mapper: F,
}

impl<P, F> Map<P, F> {
    pub fn new(parser: P, mapper: F) -> Self {
        Map { parser, mapper }
    }
}

impl<'src, P, F, U> Parser<'src> for Map<P, F>
where
    P: Parser<'src>,
    F: Fn(P::Output) -> U,
{
    type Output = U;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let (value, cursor) = self.parser.parse(state, cursor)?;
        Ok(((self.mapper)(value), cursor))
    }
}

/// Parser combinator that replaces the output of a parser with a fixed
/// value.
pub struct To<P, U> {
    parser: P,
    value: U,
}

impl<P, U> To<P, U> {
    pub fn new(parser: P, value: U) -> Self {
        To { parser, value }
    }
}

impl<'src, P, U> Parser<'src> for To<P, U>
where
    P: Parser<'src>,
    U: Clone,
{
    type Output = U;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let (_, cursor) = self.parser.parse(state, cursor)?;
        Ok((self.value.clone(), cursor))
    }
}

/// Convenience function to create a Map parser
pub fn map<'src, P, F, U>(parser: P, mapper: F) -> Map<P, F>
where
    P: Parser<'src>,
    F: Fn(P::Output) -> U,
{
    Map::new(parser, mapper)
}

/// Extension trait to add .map() and friends to all parsers
pub trait MapExt<'src>: Parser<'src> + Sized {
    fn map<F, U>(self, mapper: F) -> Map<Self, F>
    where
        F: Fn(Self::Output) -> U,
    {
        Map::new(self, mapper)
    }

    /// Replace the result with a fixed value.
    fn to<U: Clone>(self, value: U) -> To<Self, U> {
        To::new(self, value)
    }

    /// Discard the result.
    fn void(self) -> To<Self, ()> {
        To::new(self, ())
    }
}

impl<'src, P> MapExt<'src> for P where P: Parser<'src> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::satisfy::{is_char, satisfy_as};

    #[test]
    fn test_map_transforms_value() {
        let mut state = RunState::new();
        let parser = satisfy_as(|c| c.is_ascii_digit(), "digit")
            .map(|c| c.to_digit(10).unwrap_or(0) as i64);
        let (value, cursor) = parser.parse(&mut state, Cursor::new("7")).unwrap();
        assert_eq!(value, 7);
        assert!(cursor.at_end());
    }

    #[test]
    fn test_map_chaining() {
        let mut state = RunState::new();
        let parser = is_char('5')
            .map(|c| c.to_digit(10).unwrap_or(0))
            .map(|d| format!("digit: {d}"));
        let (value, _) = parser.parse(&mut state, Cursor::new("5")).unwrap();
        assert_eq!(value, "digit: 5");
    }

    #[test]
    fn test_map_preserves_failure() {
        let mut state = RunState::new();
        let parser = is_char('a').map(|c| c as u32);
        let failure = parser.parse(&mut state, Cursor::new("b")).unwrap_err();
        assert!(!failure.consumed);
    }

    #[test]
    fn test_to_replaces_value() {
        let mut state = RunState::new();
        let parser = is_char('+').to(1i32);
        let (value, _) = parser.parse(&mut state, Cursor::new("+")).unwrap();
        assert_eq!(value, 1);
    }

    #[test]
    fn test_void_discards_value() {
        let mut state = RunState::new();
        let parser = is_char('x').void();
        let ((), cursor) = parser.parse(&mut state, Cursor::new("xy")).unwrap();
        assert_eq!(cursor.offset(), 1);
    }

    #[test]
    fn test_function_syntax() {
        let mut state = RunState::new();
        let parser = map(is_char('9'), |c| c.to_string());
        let (value, _) = parser.parse(&mut state, Cursor::new("9")).unwrap();
        assert_eq!(value, "9");
    }
}
