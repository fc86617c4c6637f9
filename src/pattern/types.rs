//! Name and type patterns, parsed once from softmap text.
//!
//! A trailing `?` marks a name as inferable. Inside descriptors the marker follows the `;` of an
//! object type and applies to that type only: `(La/b;?I[Lc/d;)V` infers the class behind `a/b`
//! and requires `c/d` to be the current name of the class in the third argument.

use std::fmt;

use crate::{
    diagnostics::{DiagnosticCategory, Diagnostics},
    source::{Location, Token},
};

const PRIMITIVES: &str = "BCDFIJSZV";

/// A class, method or field name that is either fixed or inferable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePattern {
    /// The name, without the inference marker
    pub name: String,
    /// Whether the name is discovered during matching
    pub infer: bool,
    /// Where the name was written
    pub location: Location,
}

impl NamePattern {
    /// Reads a name pattern from the whole text of `token`.
    #[must_use]
    pub fn from_token(token: &Token<'_>) -> Self {
        let (name, infer) = match token.text.strip_suffix('?') {
            Some(name) => (name, true),
            None => (token.text, false),
        };
        Self {
            name: name.to_string(),
            infer,
            location: token.location(),
        }
    }

    /// Returns true if the name must match as written.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        !self.infer
    }
}

impl fmt::Display for NamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.infer {
            write!(f, "{}?", self.name)
        } else {
            f.write_str(&self.name)
        }
    }
}

/// The element type of a [`TypePattern`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementPattern {
    /// A primitive or `V`, by its descriptor character
    Primitive(char),
    /// An object type with its class name
    Object(NamePattern),
}

/// One field type of a descriptor pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypePattern {
    /// Number of leading `[`
    pub array_depth: usize,
    /// The element type
    pub element: ElementPattern,
    /// Where the type was written, inference marker included
    pub location: Location,
}

impl TypePattern {
    /// Returns true if the class name of this type is inferable.
    #[must_use]
    pub fn is_inferable(&self) -> bool {
        matches!(&self.element, ElementPattern::Object(name) if name.infer)
    }

    /// Parses the single field type that makes up all of `token`.
    ///
    /// Malformed descriptors are reported and yield `None`; a stray `.` in a class name and an
    /// inference marker on a primitive are reported but the type is kept.
    pub fn parse_field(
        token: &Token<'_>,
        category: DiagnosticCategory,
        diagnostics: &mut Diagnostics,
    ) -> Option<Self> {
        if token.text.ends_with('[') {
            diagnostics.error_at(
                category,
                token,
                "Malformed descriptor: a descriptor may not end with '['",
            );
            return None;
        }

        let (ty, end) = scan_type(token, 0, category, diagnostics)?;
        if end == token.text.len() {
            return Some(ty);
        }

        match ty.element {
            ElementPattern::Object(_) => {
                let message = if token.text.ends_with('?') {
                    "Malformed descriptor: ';' must be the last character before '?'"
                } else {
                    "Malformed descriptor: ';' must be the last character of an L-type reference"
                };
                diagnostics.error_at(category, token, message);
            }
            ElementPattern::Primitive(_) => {
                let rest = token.slice_from(end);
                diagnostics.error_at(
                    category,
                    &rest,
                    format!(
                        "Malformed descriptor: unexpected character after primitive at column {}",
                        rest.column
                    ),
                );
            }
        }
        None
    }
}

impl fmt::Display for TypePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.array_depth {
            f.write_str("[")?;
        }
        match &self.element {
            ElementPattern::Primitive(c) => write!(f, "{c}"),
            ElementPattern::Object(name) if name.infer => write!(f, "L{};?", name.name),
            ElementPattern::Object(name) => write!(f, "L{};", name.name),
        }
    }
}

/// A method descriptor pattern such as `(La/b;?I)V`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorPattern {
    /// Parameter types in order
    pub args: Vec<TypePattern>,
    /// The return type
    pub ret: TypePattern,
    /// Where the descriptor was written
    pub location: Location,
}

impl DescriptorPattern {
    /// Parses the method descriptor making up all of `token`, which starts with `(`.
    pub fn parse(
        token: &Token<'_>,
        category: DiagnosticCategory,
        diagnostics: &mut Diagnostics,
    ) -> Option<Self> {
        let text = token.text;
        if !text.starts_with('(') {
            diagnostics.error_at(category, token, "Method descriptor must start with '('");
            return None;
        }

        let mut args = Vec::new();
        let mut position = 1;
        loop {
            match text[position..].chars().next() {
                None => {
                    diagnostics.error_at(category, token, "Method descriptor is missing ')'");
                    return None;
                }
                Some(')') => break,
                Some(_) => {
                    let (ty, end) = scan_type(token, position, category, diagnostics)?;
                    args.push(ty);
                    position = end;
                }
            }
        }

        position += 1;
        if position >= text.len() {
            diagnostics.error_at(category, token, "Method descriptor is missing its return type");
            return None;
        }

        let (ret, end) = scan_type(token, position, category, diagnostics)?;
        if end != text.len() {
            diagnostics.error_at(
                category,
                &token.slice_from(end),
                "Unexpected characters after the return type of the method descriptor",
            );
            return None;
        }

        Some(Self {
            args,
            ret,
            location: token.location(),
        })
    }

    /// Returns true if any type of the descriptor is inferable.
    #[must_use]
    pub fn is_inferable(&self) -> bool {
        self.args.iter().any(TypePattern::is_inferable) || self.ret.is_inferable()
    }
}

impl fmt::Display for DescriptorPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for arg in &self.args {
            write!(f, "{arg}")?;
        }
        write!(f, "){}", self.ret)
    }
}

/// Scans one field type starting at byte `from` of `token`. Returns the type and the byte
/// offset just past it, inference marker included.
fn scan_type(
    token: &Token<'_>,
    from: usize,
    category: DiagnosticCategory,
    diagnostics: &mut Diagnostics,
) -> Option<(TypePattern, usize)> {
    let text = token.text;
    let array_depth = text[from..].bytes().take_while(|&b| b == b'[').count();
    let at = from + array_depth;

    let element = match text[at..].chars().next() {
        None | Some(')') => {
            diagnostics.error_at(
                category,
                &token.slice_from(from),
                "Malformed descriptor: array type without element type",
            );
            return None;
        }
        Some(c) => c,
    };

    let (element, end) = if element == 'L' {
        let Some(semicolon) = text[at..].find(';').map(|i| at + i) else {
            diagnostics.error_at(
                category,
                &token.slice_from(at),
                "Malformed descriptor: an L-type reference must be closed with ';'",
            );
            return None;
        };

        let name_token = token.slice(at + 1, semicolon);
        if name_token.text.contains('.') {
            diagnostics.error_at(
                category,
                &name_token,
                "Malformed descriptor: illegal codepoint '.', use forward slashes ('/') to separate packages",
            );
        }

        let infer = text[semicolon + 1..].starts_with('?');
        let end = if infer { semicolon + 2 } else { semicolon + 1 };
        let name = NamePattern {
            name: name_token.text.to_string(),
            infer,
            location: name_token.location(),
        };
        (ElementPattern::Object(name), end)
    } else if PRIMITIVES.contains(element) {
        let mut end = at + 1;
        if text[end..].starts_with('?') {
            diagnostics.error_at(
                category,
                &token.slice(from, end + 1),
                "Malformed descriptor: illegal attempt at mapping a primitive",
            );
            end += 1;
        }
        (ElementPattern::Primitive(element), end)
    } else {
        diagnostics.error_at(
            category,
            &token.slice(at, at + element.len_utf8()),
            format!("Malformed descriptor: unknown type '{element}'"),
        );
        return None;
    };

    let ty = TypePattern {
        array_depth,
        element,
        location: token.slice(from, end).location(),
    };
    Some((ty, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Span, TokenKind};

    fn token(text: &str) -> Token<'_> {
        Token::new(TokenKind::Text, text, Span::new(0, text.len()), 1, 1)
    }

    fn field(text: &str) -> (Option<TypePattern>, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let ty = TypePattern::parse_field(&token(text), DiagnosticCategory::Instruction, &mut diagnostics);
        (ty, diagnostics)
    }

    fn method(text: &str) -> (Option<DescriptorPattern>, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let desc = DescriptorPattern::parse(&token(text), DiagnosticCategory::Instruction, &mut diagnostics);
        (desc, diagnostics)
    }

    #[test]
    fn name_patterns() {
        let fixed = NamePattern::from_token(&token("a/b"));
        assert!(fixed.is_fixed());
        assert_eq!(fixed.name, "a/b");

        let inferred = NamePattern::from_token(&token("c?"));
        assert!(inferred.infer);
        assert_eq!(inferred.name, "c");
        assert_eq!(inferred.to_string(), "c?");
    }

    #[test]
    fn field_types() {
        let (ty, diagnostics) = field("[[La/b;?");
        let ty = ty.unwrap();
        assert!(diagnostics.is_empty());
        assert_eq!(ty.array_depth, 2);
        assert!(ty.is_inferable());
        match &ty.element {
            ElementPattern::Object(name) => {
                assert_eq!(name.name, "a/b");
                assert_eq!(name.location.column, 4);
            }
            other => panic!("unexpected element {other:?}"),
        }

        let (ty, diagnostics) = field("I");
        assert_eq!(ty.unwrap().element, ElementPattern::Primitive('I'));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn malformed_field_types() {
        let (ty, diagnostics) = field("[I[");
        assert!(ty.is_none());
        assert_eq!(diagnostics.error_count(), 1);

        let (ty, diagnostics) = field("La/b");
        assert!(ty.is_none());
        assert!(diagnostics.iter().next().unwrap().message.contains("closed with ';'"));

        let (ty, diagnostics) = field("La;b");
        assert!(ty.is_none());
        assert!(diagnostics.iter().next().unwrap().message.contains("last character"));

        let (ty, diagnostics) = field("IJ");
        assert!(ty.is_none());
        assert!(diagnostics.iter().next().unwrap().message.contains("column 2"));
    }

    #[test]
    fn recoverable_field_types() {
        let (ty, diagnostics) = field("I?");
        assert_eq!(ty.unwrap().element, ElementPattern::Primitive('I'));
        assert_eq!(diagnostics.error_count(), 1);

        let (ty, diagnostics) = field("La.b;");
        assert!(ty.is_some());
        assert_eq!(diagnostics.error_count(), 1);
    }

    #[test]
    fn method_descriptors() {
        let (desc, diagnostics) = method("(La/b;?I[[J)Lc/d;");
        let desc = desc.unwrap();
        assert!(diagnostics.is_empty());
        assert_eq!(desc.args.len(), 3);
        assert!(desc.args[0].is_inferable());
        assert_eq!(desc.args[2].array_depth, 2);
        assert!(!desc.ret.is_inferable());
        assert!(desc.is_inferable());
        assert_eq!(desc.to_string(), "(La/b;?I[[J)Lc/d;");

        let (desc, _) = method("()V");
        let desc = desc.unwrap();
        assert!(desc.args.is_empty());
        assert!(!desc.is_inferable());
    }

    #[test]
    fn primitive_marker_is_dropped_from_rendering() {
        let (desc, diagnostics) = method("(I?)V");
        assert_eq!(desc.unwrap().to_string(), "(I)V");
        assert_eq!(diagnostics.error_count(), 1);
    }

    #[test]
    fn malformed_method_descriptors() {
        for text in ["(I", "(I)", "(I)VV", "(Q)V", "([)V", "(La)V"] {
            let (desc, diagnostics) = method(text);
            assert!(desc.is_none(), "{text} parsed");
            assert_eq!(diagnostics.error_count(), 1, "{text}");
        }
    }
}
