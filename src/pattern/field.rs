use crate::{
    diagnostics::{DiagnosticCategory, Diagnostics},
    mapping::FrameStack,
    model::{Instruction, Opcode},
    pattern::{
        bind::{bind_class, bind_field, bind_type},
        outcome::require_match,
        types::{NamePattern, TypePattern},
        MatchOutcome,
    },
    source::{Location, Token},
    Result,
};

const FORMAT: &str = "Expression expected '<opcode> <owner>.<name> <desc>'";

/// Matches a field access: `GETFIELD <owner>.<name> <desc>`.
///
/// Each of owner, name and descriptor is optional and independently fixed or inferable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPattern {
    /// The expected opcode
    pub opcode: Opcode,
    /// Location of the mnemonic
    pub location: Location,
    /// Owner class of the field
    pub owner: Option<NamePattern>,
    /// Field name
    pub name: Option<NamePattern>,
    /// Field type
    pub desc: Option<TypePattern>,
}

impl FieldPattern {
    pub(crate) fn parse(opcode: Opcode, line: &[Token<'_>], diagnostics: &mut Diagnostics) -> Self {
        let category = DiagnosticCategory::Instruction;
        if line.len() < 3 {
            if let Some(last) = line.last() {
                diagnostics.error_at(
                    category,
                    last,
                    format!("Too few arguments to field instruction. {FORMAT}"),
                );
            }
        } else if line.len() > 3 {
            diagnostics.error_at(
                category,
                &line[3],
                format!("Too many arguments to field instruction. {FORMAT}"),
            );
        }

        let mut owner = None;
        let mut name = None;
        let mut desc = None;

        if let Some(target) = line.get(1) {
            match target.text.find('.') {
                Some(dot) => {
                    owner = Some(target.slice(0, dot));
                    name = Some(target.slice_from(dot + 1));
                    desc = line.get(2).copied();
                }
                None if line.len() == 2 => name = Some(*target),
                None => {
                    owner = Some(*target);
                    name = Some(line[2]);
                    desc = line.get(3).copied();
                    if desc.is_none() {
                        diagnostics.error_at(
                            category,
                            target,
                            format!("Malformed field instruction: missing codepoint '.'. {FORMAT}"),
                        );
                    }
                }
            }
        }

        Self {
            opcode,
            location: line[0].location(),
            owner: owner.as_ref().map(NamePattern::from_token),
            name: name.as_ref().map(NamePattern::from_token),
            desc: desc.and_then(|token| TypePattern::parse_field(&token, category, diagnostics)),
        }
    }

    /// Matches opcode, owner, name and descriptor in that order, recording inferred names.
    ///
    /// # Errors
    ///
    /// Propagates mapping store failures.
    pub fn matches(&self, insn: &Instruction, stack: &mut FrameStack<'_>) -> Result<MatchOutcome> {
        if insn.opcode != self.opcode {
            return Ok(MatchOutcome::no_match(
                format!("Instruction opcode mismatch (got {})", insn.opcode),
                self.location,
            ));
        }

        let Some(field) = insn.field_ref() else {
            return Ok(MatchOutcome::no_match(
                "Instruction carries no field reference",
                self.location,
            ));
        };

        if let Some(owner) = &self.owner {
            require_match!(bind_class(stack, owner, &field.owner, "Field owner")?);
        }
        if let Some(name) = &self.name {
            require_match!(bind_field(stack, name, &field.owner, &field.name, &field.desc)?);
        }
        if let Some(desc) = &self.desc {
            require_match!(bind_type(stack, desc, &field.desc, "Field descriptor")?);
        }

        Ok(MatchOutcome::Break)
    }
}
