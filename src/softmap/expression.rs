use std::fmt;

use crate::{
    diagnostics::{DiagnosticCategory, Diagnostics},
    pattern::{DescriptorPattern, InsnPattern, NamePattern},
    softmap::{body::parse_body, header::split_target, version::Version},
    source::{Location, Token, TokenKind},
};

/// One `method <owner>.<name><descriptor> { ... }` declaration.
///
/// Every part of the target is optional. An absent owner, name or descriptor does not constrain
/// which methods are considered, which is also how malformed parts behave after they were
/// reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodExpression {
    /// Language version the expression was parsed with
    pub version: Version,
    /// Location of the `method` keyword
    pub keyword: Location,
    /// Location of the `<owner>.<name><descriptor>` token
    pub target: Option<Location>,
    /// Owner class of the matched method
    pub owner: Option<NamePattern>,
    /// Name of the matched method
    pub name: Option<NamePattern>,
    /// Descriptor of the matched method
    pub descriptor: Option<DescriptorPattern>,
    /// Location of the opening `{`
    pub body_open: Option<Location>,
    /// Location of the closing `}`
    pub body_close: Option<Location>,
    /// The instruction patterns of the body, in order
    pub instructions: Vec<InsnPattern>,
}

impl MethodExpression {
    fn new(version: Version, keyword: Location) -> Self {
        Self {
            version,
            keyword,
            target: None,
            owner: None,
            name: None,
            descriptor: None,
            body_open: None,
            body_close: None,
            instructions: Vec::new(),
        }
    }

    /// Where diagnostics about the expression as a whole are reported: the target if present,
    /// the keyword otherwise.
    #[must_use]
    pub fn location(&self) -> Location {
        self.target.unwrap_or(self.keyword)
    }

    /// Returns true if the body is properly enclosed in braces.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.body_open.is_some() && self.body_close.is_some()
    }
}

impl fmt::Display for MethodExpression {
    /// Renders the target with `*` for absent parts, e.g. `a/b.c?(I)V` or `*.x*`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.owner {
            Some(owner) => write!(f, "{owner}")?,
            None => f.write_str("*")?,
        }
        match &self.name {
            Some(name) => write!(f, ".{name}")?,
            None => f.write_str(".*")?,
        }
        match &self.descriptor {
            Some(descriptor) => write!(f, "{descriptor}"),
            None => f.write_str("*"),
        }
    }
}

fn skip_comments(tokens: &[Token<'_>], mut index: usize) -> usize {
    while tokens.get(index).is_some_and(Token::is_comment) {
        index += 1;
    }
    index
}

/// Parses the `method` expression whose keyword sits at `tokens[start]`, appending it to
/// `expressions` unless it is unusable. Returns the index of the first token after it.
pub(crate) fn parse_method(
    tokens: &[Token<'_>],
    start: usize,
    version: Version,
    expressions: &mut Vec<MethodExpression>,
    diagnostics: &mut Diagnostics,
) -> usize {
    let category = DiagnosticCategory::Expression;
    let keyword = &tokens[start];
    let mut expression = MethodExpression::new(version, keyword.location());

    let mut index = skip_comments(tokens, start + 1);
    let Some(target) = tokens.get(index) else {
        diagnostics.error_at(
            category,
            keyword,
            "Premature end of token stream. Expected 'method <class>.<method><descriptor> { ... }'",
        );
        return index;
    };

    if target.is_text() {
        let header = split_target(target, diagnostics);
        expression.target = Some(target.location());
        expression.owner = header.owner;
        expression.name = header.name;
        expression.descriptor = header.descriptor;
        index = skip_comments(tokens, index + 1);
    } else {
        diagnostics.error_at(
            category,
            target,
            format!(
                "Unexpected token '{}' when attempting to extract '<class>.<method><descriptor>'",
                target.text
            ),
        );
    }

    let Some(open) = tokens.get(index) else {
        diagnostics.error(
            category,
            expression.location(),
            "Premature end of token stream. Expected character at this position is '{'",
        );
        expressions.push(expression);
        return index;
    };

    match open.kind {
        TokenKind::BlockOpen => {
            expression.body_open = Some(open.location());
            index += 1;
        }
        TokenKind::BlockClose => {
            diagnostics.error_at(
                category,
                open,
                "Unexpected end of block. Expected character at this position is '{'",
            );
            return index + 1;
        }
        TokenKind::Text if open.is_keyword("method") || open.is_keyword("softmap") => {
            diagnostics.error_at(
                category,
                open,
                "Missing method body. Expected character at this position is '{'",
            );
            expressions.push(expression);
            return index;
        }
        TokenKind::Text | TokenKind::Comment => {
            diagnostics.error_at(
                category,
                open,
                format!(
                    "Unexpected string token '{}'. Expected character at this position is '{{'",
                    open.text
                ),
            );
            index += 1;
        }
    }

    let body_start = index;
    let mut body = Vec::new();
    while let Some(token) = tokens.get(index) {
        match token.kind {
            TokenKind::BlockClose => {
                expression.body_close = Some(token.location());
                break;
            }
            TokenKind::BlockOpen => diagnostics.error_at(
                DiagnosticCategory::Body,
                token,
                "Unexpected start of block. Was a '}' omitted in previous lines?",
            ),
            TokenKind::Text | TokenKind::Comment => body.push(*token),
        }
        index += 1;
    }

    if expression.body_close.is_none() {
        let end = tokens[body_start.min(tokens.len())..]
            .last()
            .map_or(expression.location(), Token::location);
        diagnostics.error(
            category,
            end,
            "Premature end of token stream. Expected character at this position is '}'",
        );
    } else {
        index += 1;
    }

    expression.instructions = parse_body(&body, diagnostics);
    expressions.push(expression);
    index
}
