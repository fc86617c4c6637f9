use crate::{
    diagnostics::{DiagnosticCategory, Diagnostics},
    pattern::{DescriptorPattern, NamePattern},
    source::Token,
};

const FORMAT: &str = "Expected '<class>.<method><descriptor>', e.g. 'java/lang/Object.toString()Ljava/lang/String;'";

/// The target of a `method` expression, split into its parts.
///
/// Parts that are absent or malformed are `None` and leave the candidate set unconstrained.
#[derive(Debug, Default)]
pub(crate) struct Header {
    pub(crate) owner: Option<NamePattern>,
    pub(crate) name: Option<NamePattern>,
    pub(crate) descriptor: Option<DescriptorPattern>,
}

/// Splits `<owner>.<name><descriptor>` at the first `.` before the descriptor and at its
/// parentheses.
pub(crate) fn split_target(target: &Token<'_>, diagnostics: &mut Diagnostics) -> Header {
    let category = DiagnosticCategory::Expression;
    let text = target.text;

    let open = text.find('(');
    let close = text.find(')');
    let head_end = open.unwrap_or(text.len());
    let dot = text[..head_end].find('.');

    let mut parens_valid = false;
    let mut dot_in_descriptor = false;
    if dot.is_none() {
        let misplaced = open.and_then(|open| text[open..].find('.').map(|i| open + i));
        dot_in_descriptor = misplaced.is_some();
        match misplaced {
            Some(position) => diagnostics.error_at(
                category,
                &target.slice(position, position + 1),
                format!("Codepoint '.' is located inside the descriptor, owner and name are not separated. {FORMAT}"),
            ),
            None => diagnostics.error_at(
                category,
                target,
                format!("Missing codepoint '.' separating owner and name. {FORMAT}"),
            ),
        }
    }

    match (open, close) {
        (None, _) => diagnostics.error_at(
            category,
            target,
            format!("Missing codepoint '(' starting the descriptor. {FORMAT}"),
        ),
        (Some(open), None) => diagnostics.error_at(
            category,
            &target.slice_from(open),
            format!("Missing codepoint ')' closing the argument list of the descriptor. {FORMAT}"),
        ),
        (Some(open), Some(close)) if close < open => diagnostics.error_at(
            category,
            &target.slice(close, open + 1),
            format!("Codepoint ')' precedes codepoint '('. {FORMAT}"),
        ),
        (Some(open), Some(close)) => {
            if let Some(second) = text[open + 1..].find('(') {
                let position = open + 1 + second;
                diagnostics.error_at(
                    category,
                    &target.slice(position, position + 1),
                    "Duplicate codepoint '(' in the descriptor",
                );
            } else if let Some(second) = text[close + 1..].find(')') {
                let position = close + 1 + second;
                diagnostics.error_at(
                    category,
                    &target.slice(position, position + 1),
                    "Duplicate codepoint ')' in the descriptor",
                );
            } else {
                parens_valid = true;
            }
        }
    }

    let mut header = Header::default();

    if let Some(dot) = dot {
        let owner = target.slice(0, dot);
        if owner.text.is_empty() {
            diagnostics.error_at(
                category,
                target,
                format!("Empty owner name before '.'. {FORMAT}"),
            );
        } else {
            header.owner = named(&owner, "owner", diagnostics);
        }
    }

    let name_start = dot.map_or(0, |dot| dot + 1);
    if name_start < head_end {
        header.name = named(&target.slice(name_start, head_end), "method name", diagnostics);
    }

    if parens_valid && !dot_in_descriptor {
        if let Some(open) = open {
            header.descriptor = DescriptorPattern::parse(&target.slice_from(open), category, diagnostics);
        }
    }

    header
}

fn named(token: &Token<'_>, what: &str, diagnostics: &mut Diagnostics) -> Option<NamePattern> {
    let pattern = NamePattern::from_token(token);
    if pattern.name.is_empty() {
        diagnostics.error_at(
            DiagnosticCategory::Expression,
            token,
            format!("The inference marker '?' requires a {what} in front of it"),
        );
        return None;
    }
    Some(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Span, TokenKind};

    fn split(text: &str) -> (Header, Diagnostics) {
        let token = Token::new(TokenKind::Text, text, Span::new(7, 7 + text.len()), 1, 8);
        let mut diagnostics = Diagnostics::new();
        (split_target(&token, &mut diagnostics), diagnostics)
    }

    fn only_error(text: &str) -> String {
        let (_, diagnostics) = split(text);
        assert_eq!(diagnostics.count(), 1, "{text}: {diagnostics}");
        diagnostics.iter().next().unwrap().message.clone()
    }

    #[test]
    fn full_target() {
        let (header, diagnostics) = split("a/b?.c?(La/d;?I)V");
        assert!(diagnostics.is_empty());
        let owner = header.owner.unwrap();
        assert_eq!((owner.name.as_str(), owner.infer), ("a/b", true));
        let name = header.name.unwrap();
        assert_eq!((name.name.as_str(), name.infer), ("c", true));
        assert_eq!(name.location.column, 13);
        let descriptor = header.descriptor.unwrap();
        assert!(descriptor.is_inferable());
        assert_eq!(descriptor.to_string(), "(La/d;?I)V");
    }

    #[test]
    fn dotted_descriptor_types_keep_the_owner_split() {
        let (header, _) = split("a/b.c(Ljava.lang.Object;)V");
        assert_eq!(header.owner.unwrap().name, "a/b");
        assert_eq!(header.name.unwrap().name, "c");
    }

    #[test]
    fn distinct_split_failures() {
        assert!(only_error("abc()V").contains("Missing codepoint '.'"));
        assert!(only_error("a/b.c").contains("Missing codepoint '('"));
        assert!(only_error("a/b.c(IV").contains("Missing codepoint ')'"));
        assert!(only_error("a/b.c)I(V").contains("precedes"));
        assert!(only_error("a/b.c((I)V").contains("Duplicate codepoint '('"));
        assert!(only_error("a/b.c(I))V").contains("Duplicate codepoint ')'"));
        assert!(only_error("c(a.b)V").contains("inside the descriptor"));
    }

    #[test]
    fn partial_data_survives() {
        let (header, _) = split("a/b.c");
        assert_eq!(header.owner.unwrap().name, "a/b");
        assert_eq!(header.name.unwrap().name, "c");
        assert!(header.descriptor.is_none());

        let (header, _) = split("c()V");
        assert!(header.owner.is_none());
        assert_eq!(header.name.unwrap().name, "c");
        assert!(header.descriptor.is_some());

        let (header, diagnostics) = split(".c()V");
        assert_eq!(diagnostics.count(), 1);
        assert!(header.owner.is_none());
        assert!(header.name.is_some());

        let (header, diagnostics) = split("a/b.()V");
        assert!(diagnostics.is_empty());
        assert!(header.name.is_none());
    }

    #[test]
    fn bare_marker_is_rejected() {
        let (header, diagnostics) = split("?.?()V");
        assert_eq!(diagnostics.count(), 2);
        assert!(header.owner.is_none());
        assert!(header.name.is_none());
    }
}
