use crate::error::Pos;

/// Immutable position over an in-memory character sequence.
///
/// A cursor is a cheap `Copy` value: parsers receive one by value and hand
/// back an advanced copy on success. Because a failed parse never returns a
/// cursor, the caller's saved cursor is always a valid restore point.
///
/// `offset` is a UTF-8 byte offset into the input (exact slicing);
/// `line`/`column` are 1-based, with one column per Unicode scalar value.
/// `\n` starts a new line, `\r\n` counts as a single newline, and a lone
/// `\r` is an ordinary character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor<'src> {
    input: &'src str,
    offset: usize,
    line: u32,
    column: u32,
}

impl<'src> Cursor<'src> {
    /// Create a cursor at the start of `input` (line 1, column 1).
    pub fn new(input: &'src str) -> Self {
        Cursor {
            input,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Get the character at the current position, if any.
    pub fn peek(&self) -> Option<char> {
        self.input[self.offset..].chars().next()
    }

    /// Advance past one character, returning the new cursor.
    ///
    /// At end of input this is the identity.
    pub fn advance(self) -> Self {
        let Some(ch) = self.peek() else {
            return self;
        };
        let offset = self.offset + ch.len_utf8();
        let (line, column) = match ch {
            '\n' => (self.line + 1, 1),
            // A '\r' directly before '\n' contributes nothing on its own;
            // the following '\n' performs the single line increment.
            '\r' if self.input[offset..].starts_with('\n') => (self.line, self.column),
            _ => (self.line, self.column + 1),
        };
        Cursor {
            input: self.input,
            offset,
            line,
            column,
        }
    }

    /// Byte offset of the cursor within the input.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// 1-based line number.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// 1-based column number, counting one per Unicode scalar value.
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Check whether the cursor is at the end of the input.
    pub fn at_end(&self) -> bool {
        self.offset >= self.input.len()
    }

    /// The full source text this cursor ranges over.
    pub fn input(&self) -> &'src str {
        self.input
    }

    /// Slice of the input between this cursor and a later one.
    pub fn slice_to(&self, end: &Cursor<'src>) -> &'src str {
        &self.input[self.offset..end.offset]
    }

    /// Snapshot of offset/line/column for error reporting.
    pub fn pos(&self) -> Pos {
        Pos {
            offset: self.offset,
            line: self.line,
            column: self.column,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cursor_at_origin() {
        let cursor = Cursor::new("abc");
        assert_eq!(cursor.offset(), 0);
        assert_eq!(cursor.line(), 1);
        assert_eq!(cursor.column(), 1);
        assert!(!cursor.at_end());
    }

    #[test]
    fn test_peek_does_not_advance() {
        let cursor = Cursor::new("xy");
        assert_eq!(cursor.peek(), Some('x'));
        assert_eq!(cursor.peek(), Some('x'));
        assert_eq!(cursor.offset(), 0);
    }

    #[test]
    fn test_advance_tracks_column() {
        let cursor = Cursor::new("abc").advance().advance();
        assert_eq!(cursor.offset(), 2);
        assert_eq!(cursor.line(), 1);
        assert_eq!(cursor.column(), 3);
        assert_eq!(cursor.peek(), Some('c'));
    }

    #[test]
    fn test_newline_resets_column() {
        let mut cursor = Cursor::new("a\nb");
        cursor = cursor.advance(); // 'a'
        cursor = cursor.advance(); // '\n'
        assert_eq!(cursor.line(), 2);
        assert_eq!(cursor.column(), 1);
        assert_eq!(cursor.peek(), Some('b'));
    }

    #[test]
    fn test_crlf_is_one_newline() {
        let mut cursor = Cursor::new("a\r\nb");
        for _ in 0..3 {
            cursor = cursor.advance();
        }
        assert_eq!(cursor.line(), 2);
        assert_eq!(cursor.column(), 1);
        assert_eq!(cursor.peek(), Some('b'));
    }

    #[test]
    fn test_lone_cr_is_ordinary() {
        let cursor = Cursor::new("a\rb").advance().advance();
        assert_eq!(cursor.line(), 1);
        assert_eq!(cursor.column(), 3);
    }

    #[test]
    fn test_multibyte_counts_one_column() {
        let cursor = Cursor::new("日本").advance();
        assert_eq!(cursor.offset(), 3); // UTF-8 bytes
        assert_eq!(cursor.column(), 2); // one logical character
        assert_eq!(cursor.peek(), Some('本'));
    }

    #[test]
    fn test_advance_at_end_is_identity() {
        let cursor = Cursor::new("").advance();
        assert!(cursor.at_end());
        assert_eq!(cursor.offset(), 0);
        assert_eq!(cursor.peek(), None);
    }

    #[test]
    fn test_slice_to() {
        let start = Cursor::new("hello world");
        let mut end = start;
        for _ in 0..5 {
            end = end.advance();
        }
        assert_eq!(start.slice_to(&end), "hello");
    }
}
