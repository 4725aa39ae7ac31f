use crate::cursor::Cursor;
use crate::eof::eof;
use crate::error::ParseError;
use crate::parser::Parser;
use crate::state::RunState;
use crate::then::BeforeExt;

/// Run a parser against an input string.
///
/// Each call is an independent top-level run with its own register state.
/// Trailing input is allowed; use [`parse_fully`] to demand end of input.
pub fn parse<'src, P>(parser: &P, input: &'src str) -> Result<P::Output, ParseError>
where
    P: Parser<'src>,
{
    let mut state = RunState::new();
    match parser.parse(&mut state, Cursor::new(input)) {
        Ok((value, _)) => Ok(value),
        Err(failure) => Err(failure.into()),
    }
}

/// Run a parser and require it to consume the whole input.
pub fn parse_fully<'src, P>(parser: &P, input: &'src str) -> Result<P::Output, ParseError>
where
    P: Parser<'src>,
{
    parse(&parser.before(eof()), input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::many::many;
    use crate::satisfy::{is_char, satisfy_as};

    #[test]
    fn test_parse_allows_trailing_input() {
        let parser = is_char('a');
        assert_eq!(parse(&parser, "abc"), Ok('a'));
    }

    #[test]
    fn test_parse_fully_rejects_trailing_input() {
        let parser = is_char('a');
        assert!(parse_fully(&parser, "abc").is_err());
        assert_eq!(parse_fully(&parser, "a"), Ok('a'));
    }

    #[test]
    fn test_parse_reports_structured_error() {
        let parser = satisfy_as(|c| c.is_ascii_digit(), "digit");
        let error = parse(&parser, "x").unwrap_err();
        match error {
            ParseError::Syntax(error) => {
                assert_eq!(error.pos.offset, 0);
                assert!(error.expected.contains("digit"));
                assert_eq!(error.unexpected.as_deref(), Some("'x'"));
            }
            ParseError::Fault(fault) => panic!("unexpected fault: {fault}"),
        }
    }

    #[test]
    fn test_runs_are_independent() {
        let parser = many(is_char('a'));
        assert_eq!(parse(&parser, "aa"), Ok(vec!['a', 'a']));
        assert_eq!(parse(&parser, "b"), Ok(vec![]));
    }
}
