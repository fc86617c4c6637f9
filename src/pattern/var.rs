use crate::{
    diagnostics::{DiagnosticCategory, Diagnostics},
    model::{Instruction, Opcode},
    pattern::MatchOutcome,
    source::{Location, Token},
};

/// Matches a local variable load or store, optionally by slot.
///
/// Written `ALOAD 1` or `ALOAD this`, `this` standing for slot 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarPattern {
    /// The expected opcode
    pub opcode: Opcode,
    /// The expected slot; `None` accepts any slot
    pub slot: Option<u16>,
    /// Location of the mnemonic
    pub location: Location,
    /// Location of the slot argument
    pub slot_location: Option<Location>,
}

impl VarPattern {
    pub(crate) fn parse(opcode: Opcode, line: &[Token<'_>], diagnostics: &mut Diagnostics) -> Self {
        let mnemonic = &line[0];
        let argument = match line {
            [_] => {
                diagnostics.error_at(
                    DiagnosticCategory::Instruction,
                    mnemonic,
                    "Var insn has too few arguments, expected var index. Expression format: '<opcode> <index>'",
                );
                None
            }
            [_, argument] => Some(argument),
            [_, argument, extra, ..] => {
                diagnostics.error_at(
                    DiagnosticCategory::Instruction,
                    extra,
                    "Var insn has too many arguments. Expression format: '<opcode> <index>'",
                );
                Some(argument)
            }
            [] => None,
        };

        let slot = argument.and_then(|token| {
            if token.text.eq_ignore_ascii_case("this") {
                return Some(0);
            }
            let slot = token.text.parse::<u16>().ok();
            if slot.is_none() {
                diagnostics.error_at(
                    DiagnosticCategory::Instruction,
                    token,
                    "Unattainable var index: index not a valid integer (named indices are not supported)",
                );
            }
            slot
        });

        Self {
            opcode,
            slot,
            location: mnemonic.location(),
            slot_location: slot.and(argument.map(Token::location)),
        }
    }

    /// Matches if the opcodes agree and, when a slot is given, the slots agree.
    #[must_use]
    pub fn matches(&self, insn: &Instruction) -> MatchOutcome {
        if insn.opcode != self.opcode {
            return MatchOutcome::no_match(
                format!("Instruction opcode mismatch (got {})", insn.opcode),
                self.location,
            );
        }

        match (self.slot, insn.var_slot()) {
            (None, _) => MatchOutcome::Break,
            (Some(expected), Some(actual)) if expected == actual => MatchOutcome::Break,
            (Some(_), actual) => MatchOutcome::no_match(
                match actual {
                    Some(actual) => format!("Var index mismatch (got {actual})"),
                    None => "Var index mismatch (instruction carries no var index)".to_string(),
                },
                self.slot_location.unwrap_or(self.location),
            ),
        }
    }
}
