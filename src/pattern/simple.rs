use crate::{
    diagnostics::{DiagnosticCategory, Diagnostics},
    model::{Instruction, Opcode},
    pattern::MatchOutcome,
    source::{Location, Token},
};

/// Matches an instruction by opcode alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimplePattern {
    /// The expected opcode
    pub opcode: Opcode,
    /// Location of the mnemonic
    pub location: Location,
}

impl SimplePattern {
    pub(crate) fn parse(opcode: Opcode, line: &[Token<'_>], diagnostics: &mut Diagnostics) -> Self {
        report_arguments(line, "Unexpected arguments for expression", diagnostics);
        Self {
            opcode,
            location: line[0].location(),
        }
    }

    /// Matches if the opcodes agree.
    #[must_use]
    pub fn matches(&self, insn: &Instruction) -> MatchOutcome {
        if insn.opcode == self.opcode {
            MatchOutcome::Break
        } else {
            MatchOutcome::no_match(
                format!("Opcode mismatch (got {})", insn.opcode),
                self.location,
            )
        }
    }
}

/// Reports everything after the mnemonic of `line` as one diagnostic spanning the arguments.
pub(crate) fn report_arguments(line: &[Token<'_>], message: &str, diagnostics: &mut Diagnostics) {
    if let (Some(first), Some(last)) = (line.get(1), line.last()) {
        diagnostics.error(
            DiagnosticCategory::Instruction,
            first.location().to(last.location()),
            message,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Span, TokenKind};

    fn line(texts: &[&'static str]) -> Vec<Token<'static>> {
        let mut offset = 0;
        texts
            .iter()
            .map(|text| {
                let token = Token::new(
                    TokenKind::Text,
                    text,
                    Span::new(offset, offset + text.len()),
                    1,
                    offset as u32 + 1,
                );
                offset += text.len() + 1;
                token
            })
            .collect()
    }

    #[test]
    fn matches_by_opcode() {
        let mut diagnostics = Diagnostics::new();
        let pattern = SimplePattern::parse(Opcode::Return, &line(&["RETURN"]), &mut diagnostics);
        assert!(diagnostics.is_empty());
        assert_eq!(pattern.matches(&Instruction::simple(Opcode::Return)), MatchOutcome::Break);
        assert!(!pattern.matches(&Instruction::simple(Opcode::Areturn)).is_match());
    }

    #[test]
    fn arguments_are_reported_as_one_span() {
        let mut diagnostics = Diagnostics::new();
        SimplePattern::parse(Opcode::Pop, &line(&["POP", "x", "yz"]), &mut diagnostics);
        let entry = diagnostics.iter().next().unwrap();
        assert_eq!(diagnostics.count(), 1);
        assert_eq!(entry.location.span, Span::new(4, 8));
        assert_eq!(entry.location.column, 5);
    }
}
