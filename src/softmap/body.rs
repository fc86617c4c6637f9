use crate::{
    diagnostics::Diagnostics,
    pattern::InsnPattern,
    source::Token,
};

/// Parses the tokens between the braces of a `method` expression, one instruction pattern per
/// source line.
///
/// Comments are dropped before grouping, so a line holding only comments yields nothing. Block
/// tokens are expected to be filtered out by the caller.
pub(crate) fn parse_body(tokens: &[Token<'_>], diagnostics: &mut Diagnostics) -> Vec<InsnPattern> {
    let mut patterns = Vec::new();
    let mut line: Vec<Token<'_>> = Vec::new();

    for token in tokens.iter().filter(|token| token.is_text()) {
        if line.first().is_some_and(|first| first.line != token.line) {
            patterns.extend(InsnPattern::parse_line(&line, diagnostics));
            line.clear();
        }
        line.push(*token);
    }
    if !line.is_empty() {
        patterns.extend(InsnPattern::parse_line(&line, diagnostics));
    }

    patterns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::Opcode,
        source::{Lexer, ParseOptions},
    };

    fn body(source: &str) -> (Vec<InsnPattern>, Diagnostics) {
        let tokens = Lexer::new(source, &ParseOptions::default()).tokenize();
        let mut diagnostics = Diagnostics::new();
        (parse_body(&tokens, &mut diagnostics), diagnostics)
    }

    #[test]
    fn one_pattern_per_line() {
        let (patterns, diagnostics) = body("ALOAD this\n  // comment only\n\n* /* a */\nRETURN");
        assert!(diagnostics.is_empty());
        assert_eq!(patterns.len(), 3);
        assert_eq!(patterns[0].opcode(), Some(Opcode::Aload));
        assert!(patterns[1].is_wildcard());
        assert_eq!(patterns[2].opcode(), Some(Opcode::Return));
        assert_eq!(patterns[2].location().line, 5);
    }

    #[test]
    fn comments_split_nothing() {
        let (patterns, diagnostics) = body("GETFIELD /* owner */ a/b.c /* type */ I");
        assert!(diagnostics.is_empty());
        assert_eq!(patterns.len(), 1);
    }

    #[test]
    fn unknown_lines_are_skipped() {
        let (patterns, diagnostics) = body("NOP\nFROBNICATE 1\nRETURN");
        assert_eq!(patterns.len(), 2);
        assert_eq!(diagnostics.error_count(), 1);
    }
}
