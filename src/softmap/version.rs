use std::fmt;

use serde::Serialize;

use crate::{
    diagnostics::{DiagnosticCategory, Diagnostics},
    source::{Token, TokenKind},
};

/// Versions of the softmap pattern language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Version {
    /// The first and only version
    V1,
}

impl Version {
    /// The version assumed for `method` expressions without a preceding `softmap` header.
    pub const FALLBACK: Version = Version::V1;

    /// Looks up a version by number.
    #[must_use]
    pub fn from_number(number: u32) -> Option<Self> {
        match number {
            1 => Some(Version::V1),
            _ => None,
        }
    }

    /// The version number.
    #[must_use]
    pub fn number(self) -> u32 {
        match self {
            Version::V1 => 1,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.number())
    }
}

/// Parses the `softmap <version>` directive whose keyword sits at `tokens[start]`.
///
/// On success `version` is updated; otherwise the directive is reported and `version` is left
/// unchanged. Returns the index of the first token after the directive.
pub(crate) fn parse_directive(
    tokens: &[Token<'_>],
    start: usize,
    version: &mut Option<Version>,
    diagnostics: &mut Diagnostics,
) -> usize {
    let category = DiagnosticCategory::Header;
    let keyword = &tokens[start];

    let mut index = start + 1;
    let value = loop {
        let Some(token) = tokens.get(index) else {
            break None;
        };
        match token.kind {
            TokenKind::Text => break Some(token),
            TokenKind::Comment => {}
            TokenKind::BlockOpen | TokenKind::BlockClose => diagnostics.error_at(
                category,
                token,
                format!("Unexpected '{}', expected expression 'softmap <version>'", token.text),
            ),
        }
        index += 1;
    };

    let Some(value) = value else {
        diagnostics.error_at(
            category,
            keyword,
            "Expected expression 'softmap <version>'; failed to resolve '<version>': premature end of file",
        );
        return index;
    };

    if value.is_keyword("method") || value.is_keyword("softmap") {
        diagnostics.error_at(
            category,
            keyword,
            "Expected expression 'softmap <version>'; the version is missing",
        );
        return index;
    }

    let digits = value
        .text
        .strip_prefix(['v', 'V'])
        .unwrap_or(value.text);
    match digits.parse::<u32>() {
        Err(_) => diagnostics.error_at(
            category,
            value,
            "Incorrect expression 'softmap <version>'; invalid format for '<version>': expected any of '<number>', 'v<number>'",
        ),
        Ok(number) => match Version::from_number(number) {
            Some(parsed) => *version = Some(parsed),
            None => diagnostics.error_at(
                category,
                value,
                format!("Incorrect expression 'softmap <version>'; unknown version {number}, only version 1 is supported"),
            ),
        },
    }

    index + 1
}
