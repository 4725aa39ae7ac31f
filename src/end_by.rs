use crate::cursor::Cursor;
use crate::error::{Failure, Fault};
use crate::parser::{Parser, Step};
use crate::state::RunState;

/// One or more items, each terminated by a separator.
///
/// Every item must be followed by the separator; `"1;2"` without the final
/// `;` fails, since the second iteration commits after parsing `2`.
pub struct EndBy1<P, S> {
    parser: P,
    separator: S,
}

impl<P, S> EndBy1<P, S> {
    pub fn new(parser: P, separator: S) -> Self {
        EndBy1 { parser, separator }
    }
}

/// Loop of `item separator` pairs. `require_one` distinguishes the
/// one-or-more and zero-or-more variants.
fn end_by_loop<'src, P, S>(
    parser: &P,
    separator: &S,
    state: &mut RunState,
    cursor: Cursor<'src>,
    require_one: bool,
) -> Step<'src, Vec<P::Output>>
where
    P: Parser<'src>,
    S: Parser<'src>,
{
    let mut results = Vec::new();
    let mut current = cursor;
    loop {
        let (value, after_item) = match parser.parse(state, current) {
            Ok(success) => success,
            Err(failure) if failure.is_fault() => return Err(failure),
            Err(failure) => {
                if failure.consumed || (require_one && results.is_empty()) {
                    return Err(failure);
                }
                return Ok((results, current));
            }
        };
        let item_consumed = after_item.offset() > current.offset();
        let after_sep = match separator.parse(state, after_item) {
            Ok((_, next)) => next,
            Err(failure) if failure.is_fault() => return Err(failure),
            Err(failure) => {
                let failure = failure.after_consuming(item_consumed);
                if failure.consumed || (require_one && results.is_empty()) {
                    return Err(failure);
                }
                return Ok((results, current));
            }
        };
        if after_sep.offset() == current.offset() {
            return Err(Failure::fault(Fault::NonConsumptiveIteration {
                pos: current.pos(),
            }));
        }
        results.push(value);
        current = after_sep;
    }
}

impl<'src, P, S> Parser<'src> for EndBy1<P, S>
where
    P: Parser<'src>,
    S: Parser<'src>,
{
    type Output = Vec<P::Output>;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        end_by_loop(&self.parser, &self.separator, state, cursor, true)
    }
}

/// Zero or more items, each terminated by a separator.
pub struct EndBy<P, S> {
    parser: P,
    separator: S,
}

impl<P, S> EndBy<P, S> {
    pub fn new(parser: P, separator: S) -> Self {
        EndBy { parser, separator }
    }
}

impl<'src, P, S> Parser<'src> for EndBy<P, S>
where
    P: Parser<'src>,
    S: Parser<'src>,
{
    type Output = Vec<P::Output>;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        end_by_loop(&self.parser, &self.separator, state, cursor, false)
    }
}

/// Convenience function to create an EndBy1 parser
pub fn end_by1<'src, P, S>(parser: P, separator: S) -> EndBy1<P, S>
where
    P: Parser<'src>,
    S: Parser<'src>,
{
    EndBy1::new(parser, separator)
}

/// Convenience function to create an EndBy parser
pub fn end_by<'src, P, S>(parser: P, separator: S) -> EndBy<P, S>
where
    P: Parser<'src>,
    S: Parser<'src>,
{
    EndBy::new(parser, separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::satisfy::{is_char, satisfy_as};

    fn digit() -> crate::satisfy::Satisfy<impl Fn(char) -> bool> {
        satisfy_as(|c| c.is_ascii_digit(), "digit")
    }

    #[test]
    fn test_end_by_every_item_terminated() {
        let mut state = RunState::new();
        let parser = end_by(digit(), is_char(';'));
        let (items, cursor) = parser.parse(&mut state, Cursor::new("1;2;3;")).unwrap();
        assert_eq!(items, vec!['1', '2', '3']);
        assert!(cursor.at_end());
    }

    #[test]
    fn test_end_by_missing_final_separator_fails() {
        let mut state = RunState::new();
        let parser = end_by(digit(), is_char(';'));
        let failure = parser.parse(&mut state, Cursor::new("1;2")).unwrap_err();
        assert!(failure.consumed);
    }

    #[test]
    fn test_end_by_empty_list() {
        let mut state = RunState::new();
        let parser = end_by(digit(), is_char(';'));
        let (items, cursor) = parser.parse(&mut state, Cursor::new("x")).unwrap();
        assert_eq!(items, vec![]);
        assert_eq!(cursor.offset(), 0);
    }

    #[test]
    fn test_end_by1_requires_one_pair() {
        let mut state = RunState::new();
        let parser = end_by1(digit(), is_char(';'));
        assert!(parser.parse(&mut state, Cursor::new("x")).is_err());
        let (items, _) = parser.parse(&mut state, Cursor::new("9;")).unwrap();
        assert_eq!(items, vec!['9']);
    }
}
