use std::marker::PhantomData;

use crate::cursor::Cursor;
use crate::parser::{Parser, Step};
use crate::state::RunState;

/// A lazy parser that defers construction of the actual parser until parse
/// time. This is what breaks mutual recursion between parser definitions:
/// the factory is only invoked once evaluation reaches this point, so
/// self-referential grammars terminate at construction time.
pub struct Lazy<F, P> {
    factory: F,
    _phantom: PhantomData<fn() -> P>,
}

impl<F, P> Lazy<F, P> {
    pub fn new(factory: F) -> Self {
        Lazy {
            factory,
            _phantom: PhantomData,
        }
    }
}

impl<'src, F, P> Parser<'src> for Lazy<F, P>
where
    F: Fn() -> P,
    P: Parser<'src>,
{
    type Output = P::Output;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        (self.factory)().parse(state, cursor)
    }
}

/// Create a lazy parser from a factory function
pub fn lazy<'src, F, P>(factory: F) -> Lazy<F, P>
where
    F: Fn() -> P,
    P: Parser<'src>,
{
    Lazy::new(factory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::MapExt;
    use crate::or::OrExt;
    use crate::satisfy::is_char;
    use crate::then::{BeforeExt, ThenExt};

    #[test]
    fn test_lazy_defers_construction() {
        let mut state = RunState::new();
        let parser = lazy(|| is_char('x'));
        let (ch, _) = parser.parse(&mut state, Cursor::new("xyz")).unwrap();
        assert_eq!(ch, 'x');
    }

    // Depth of nested parentheses around a single 'x': x, (x), ((x)), ...
    fn nesting<'src>() -> Box<dyn Parser<'src, Output = usize> + 'src> {
        Box::new(
            is_char('(')
                .then(lazy(nesting))
                .before(is_char(')'))
                .map(|depth| depth + 1)
                .or(is_char('x').to(0usize)),
        )
    }

    #[test]
    fn test_lazy_enables_recursive_grammar() {
        let mut state = RunState::new();
        let (depth, cursor) = nesting().parse(&mut state, Cursor::new("((x))")).unwrap();
        assert_eq!(depth, 2);
        assert!(cursor.at_end());
    }

    #[test]
    fn test_recursive_grammar_rejects_imbalance() {
        let mut state = RunState::new();
        assert!(nesting().parse(&mut state, Cursor::new("((x)")).is_err());
    }
}
