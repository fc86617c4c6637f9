use std::fmt;

use serde::Serialize;

/// Half-open `[start, end)` byte range into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    /// First byte covered by the span
    pub start: usize,
    /// One past the last byte covered by the span
    pub end: usize,
}

impl Span {
    /// Creates a span covering `[start, end)`.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the smallest span covering both `self` and `other`.
    #[must_use]
    pub fn cover(self, other: Span) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Number of bytes covered by the span.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if the span covers no bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Where something sits in the source text: byte span plus 1-based line and column.
///
/// Columns count codepoints, with tabulators advancing by the configured tab width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Location {
    /// Byte range of the located text
    pub span: Span,
    /// 1-based line of the first codepoint
    pub line: u32,
    /// 1-based column of the first codepoint
    pub column: u32,
}

impl Location {
    /// Creates a new location.
    #[must_use]
    pub const fn new(span: Span, line: u32, column: u32) -> Self {
        Self { span, line, column }
    }

    /// Returns a location starting at `self` and extending to the end of `other`.
    #[must_use]
    pub fn to(self, other: Location) -> Self {
        Self {
            span: self.span.cover(other.span),
            line: self.line,
            column: self.column,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The kind of a lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A run of codepoints that are neither whitespace nor block delimiters
    Text,
    /// `{`
    BlockOpen,
    /// `}`
    BlockClose,
    /// A `//` line comment or a `/* */` block comment, delimiters included
    Comment,
}

/// A position-tagged slice of the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    /// What kind of token this is
    pub kind: TokenKind,
    /// The covered source text
    pub text: &'src str,
    /// Byte range of `text` within the source
    pub span: Span,
    /// 1-based line of the first codepoint
    pub line: u32,
    /// 1-based column of the first codepoint
    pub column: u32,
}

impl<'src> Token<'src> {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, text: &'src str, span: Span, line: u32, column: u32) -> Self {
        Self {
            kind,
            text,
            span,
            line,
            column,
        }
    }

    /// Location of this token, without the text.
    #[must_use]
    pub const fn location(&self) -> Location {
        Location::new(self.span, self.line, self.column)
    }

    /// Returns true if this is a text token.
    #[must_use]
    pub fn is_text(&self) -> bool {
        self.kind == TokenKind::Text
    }

    /// Returns true if this is a comment token.
    #[must_use]
    pub fn is_comment(&self) -> bool {
        self.kind == TokenKind::Comment
    }

    /// Returns true if this is a text token equal to `keyword`, ignoring ASCII case.
    #[must_use]
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.is_text() && self.text.eq_ignore_ascii_case(keyword)
    }

    /// Carves the byte range `[from, to)` of this token's text out as a token of its own.
    ///
    /// Both bounds are byte offsets relative to the start of the token and must lie on
    /// character boundaries. Text tokens never span lines, so the line is kept and the column
    /// is advanced by the number of codepoints skipped.
    #[must_use]
    pub fn slice(&self, from: usize, to: usize) -> Token<'src> {
        let column = self.column + self.text[..from].chars().count() as u32;
        Token {
            kind: self.kind,
            text: &self.text[from..to],
            span: Span::new(self.span.start + from, self.span.start + to),
            line: self.line,
            column,
        }
    }

    /// Returns the part of this token's text starting at byte `from`.
    #[must_use]
    pub fn slice_from(&self, from: usize) -> Token<'src> {
        self.slice(from, self.text.len())
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' at {}:{}", self.text, self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_adjusts_span_and_column() {
        let token = Token::new(TokenKind::Text, "a/b.c()V", Span::new(10, 18), 3, 8);
        let name = token.slice(4, 5);
        assert_eq!(name.text, "c");
        assert_eq!(name.span, Span::new(14, 15));
        assert_eq!(name.line, 3);
        assert_eq!(name.column, 12);

        let desc = token.slice_from(5);
        assert_eq!(desc.text, "()V");
        assert_eq!(desc.span, Span::new(15, 18));
    }

    #[test]
    fn slice_counts_codepoints_for_columns() {
        let token = Token::new(TokenKind::Text, "äö.x", Span::new(0, 6), 1, 1);
        let tail = token.slice_from(5);
        assert_eq!(tail.text, "x");
        assert_eq!(tail.column, 4);
    }

    #[test]
    fn keyword_matching_ignores_case() {
        let token = Token::new(TokenKind::Text, "Method", Span::new(0, 6), 1, 1);
        assert!(token.is_keyword("method"));
        assert!(!token.is_keyword("softmap"));

        let open = Token::new(TokenKind::BlockOpen, "{", Span::new(0, 1), 1, 1);
        assert!(!open.is_keyword("{"));
    }

    #[test]
    fn location_to_covers_both() {
        let a = Location::new(Span::new(4, 6), 2, 3);
        let b = Location::new(Span::new(9, 12), 2, 8);
        let joined = a.to(b);
        assert_eq!(joined.span, Span::new(4, 12));
        assert_eq!(joined.column, 3);
        assert_eq!(joined.to_string(), "2:3");
    }
}
