//! Splitting softmap text into position-tagged tokens.
//!
//! The lexer never fails. Whitespace separates tokens, `{` and `}` are always tokens of their
//! own, comments are reported as [`TokenKind::Comment`] and every other run of codepoints is a
//! single [`TokenKind::Text`] token. Everything that looks wrong is left for the parser to
//! diagnose.
//!
//! Comments are only recognized where whitespace could appear, so `RETURN//x` is a single text
//! token while `RETURN //x` is a text token followed by a comment.

use crate::source::{
    options::ParseOptions,
    token::{Span, Token, TokenKind},
};

/// Iterator over the tokens of a window of softmap text.
///
/// # Example
///
/// ```rust
/// use softmap::source::{Lexer, ParseOptions, TokenKind};
///
/// let tokens: Vec<_> = Lexer::new("method a.b()V { // body\n}", &ParseOptions::default()).collect();
/// let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(
///     kinds,
///     [TokenKind::Text, TokenKind::Text, TokenKind::BlockOpen, TokenKind::Comment, TokenKind::BlockClose]
/// );
/// assert_eq!(tokens[4].line, 2);
/// ```
pub struct Lexer<'src> {
    source: &'src str,
    position: usize,
    end: usize,
    line: u32,
    column: u32,
    tab_width: u32,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer over the window of `source` selected by `options`.
    #[must_use]
    pub fn new(source: &'src str, options: &ParseOptions) -> Self {
        let (start, end) = options.byte_range(source);
        Self {
            source,
            position: start,
            end,
            line: options.start_line,
            column: options.start_column,
            tab_width: options.tab_width,
        }
    }

    /// Lexes the whole window, comments included.
    #[must_use]
    pub fn tokenize(self) -> Vec<Token<'src>> {
        self.collect()
    }

    /// Returns true once the whole window was consumed.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.end
    }

    fn peek(&self) -> Option<char> {
        self.source[self.position..self.end].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.source[self.position..self.end].chars();
        chars.next();
        chars.next()
    }

    /// Consumes one codepoint, tracking line and column.
    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += c.len_utf8();
        match c {
            '\n' => {
                self.line += 1;
                self.column = 1;
            }
            '\r' => {}
            '\t' => self.column += self.tab_width,
            _ => self.column += 1,
        }
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.bump();
        }
    }

    fn token(&self, kind: TokenKind, start: usize, line: u32, column: u32) -> Token<'src> {
        Token::new(
            kind,
            &self.source[start..self.position],
            Span::new(start, self.position),
            line,
            column,
        )
    }

    fn line_comment(&mut self) -> Token<'src> {
        let (start, line, column) = (self.position, self.line, self.column);
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.bump();
        }
        self.token(TokenKind::Comment, start, line, column)
    }

    /// An unterminated block comment extends to the end of the window.
    fn block_comment(&mut self) -> Token<'src> {
        let (start, line, column) = (self.position, self.line, self.column);
        self.bump();
        self.bump();
        while let Some(c) = self.bump() {
            if c == '*' && self.peek() == Some('/') {
                self.bump();
                break;
            }
        }
        self.token(TokenKind::Comment, start, line, column)
    }

    fn text(&mut self) -> Token<'src> {
        let (start, line, column) = (self.position, self.line, self.column);
        while let Some(c) = self.peek() {
            if c.is_whitespace() || c == '{' || c == '}' {
                break;
            }
            self.bump();
        }
        self.token(TokenKind::Text, start, line, column)
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_whitespace();

        let (start, line, column) = (self.position, self.line, self.column);
        let token = match (self.peek()?, self.peek_second()) {
            ('{', _) => {
                self.bump();
                self.token(TokenKind::BlockOpen, start, line, column)
            }
            ('}', _) => {
                self.bump();
                self.token(TokenKind::BlockClose, start, line, column)
            }
            ('/', Some('/')) => self.line_comment(),
            ('/', Some('*')) => self.block_comment(),
            _ => self.text(),
        };
        Some(token)
    }
}
