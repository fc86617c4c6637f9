//! Instruction patterns and the matchers deciding whether an instruction satisfies them.
//!
//! One line of a softmap method body is one [`InsnPattern`]. The mnemonic selects the variant
//! through the [`crate::model::OperandShape`] of its opcode:
//!
//! | Line                          | Variant                  |
//! |-------------------------------|--------------------------|
//! | `*`                           | [`InsnPattern::Wildcard`] |
//! | `RETURN`, `IADD`, `ICONST_1`  | [`InsnPattern::Simple`]  |
//! | `ALOAD this`, `ISTORE 2`      | [`InsnPattern::Var`]     |
//! | `GETFIELD a/b.c I`            | [`InsnPattern::Field`]   |
//! | `INVOKESTATIC a/b.c(I)V`      | [`InsnPattern::Invoke`]  |
//!
//! Matching never changes a pattern. Names marked inferable are written into the innermost frame
//! of the [`FrameStack`] as a side effect of a successful match; the caller decides whether that
//! frame is kept.

mod bind;
mod field;
mod invoke;
mod outcome;
mod simple;
mod types;
mod var;

use std::str::FromStr;

pub use field::FieldPattern;
pub use invoke::InvokePattern;
pub(crate) use bind::{bind_class, bind_method};
pub(crate) use invoke::match_descriptor;
pub(crate) use outcome::require_match;
pub use outcome::{MatchFailure, MatchOutcome};
pub use simple::SimplePattern;
pub use types::{DescriptorPattern, ElementPattern, NamePattern, TypePattern};
pub use var::VarPattern;

use crate::{
    diagnostics::{DiagnosticCategory, Diagnostics},
    mapping::FrameStack,
    model::{Instruction, Opcode, OperandShape},
    source::{Location, Token},
    Result,
};

/// A pattern for one instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsnPattern {
    /// `*`: any run of instructions, including none
    Wildcard {
        /// Location of the `*`
        location: Location,
    },
    /// An opcode without operands
    Simple(SimplePattern),
    /// A local variable load or store
    Var(VarPattern),
    /// A field access
    Field(FieldPattern),
    /// A method invocation
    Invoke(InvokePattern),
}

impl InsnPattern {
    /// Parses one body line. `line` holds the text tokens of the line, at least one.
    ///
    /// Returns `None` if the mnemonic is unknown or not supported in patterns; both cases are
    /// reported. Malformed operands are reported but still yield a pattern with the operand left
    /// unconstrained.
    pub fn parse_line(line: &[Token<'_>], diagnostics: &mut Diagnostics) -> Option<Self> {
        let mnemonic = line.first()?;

        if mnemonic.text == "*" {
            simple::report_arguments(
                line,
                "Unexpected arguments for wildcard expression",
                diagnostics,
            );
            return Some(InsnPattern::Wildcard {
                location: mnemonic.location(),
            });
        }

        let Ok(opcode) = Opcode::from_str(mnemonic.text) else {
            diagnostics.error_at(
                DiagnosticCategory::Body,
                mnemonic,
                format!("Unsupported opcode '{}'", mnemonic.text),
            );
            return None;
        };

        let pattern = match opcode.shape() {
            OperandShape::None => InsnPattern::Simple(SimplePattern::parse(opcode, line, diagnostics)),
            OperandShape::Var if opcode.is_load_or_store() => {
                InsnPattern::Var(VarPattern::parse(opcode, line, diagnostics))
            }
            OperandShape::Field => InsnPattern::Field(FieldPattern::parse(opcode, line, diagnostics)),
            OperandShape::Method => {
                InsnPattern::Invoke(InvokePattern::parse(opcode, line, diagnostics))
            }
            _ => {
                diagnostics.error_at(
                    DiagnosticCategory::Body,
                    mnemonic,
                    format!("Opcode '{opcode}' is not supported in instruction patterns"),
                );
                return None;
            }
        };
        Some(pattern)
    }

    /// Matches the pattern against one instruction, recording inferred names into the innermost
    /// frame of `stack`.
    ///
    /// # Errors
    ///
    /// Propagates mapping store failures, which indicate an engine defect.
    pub fn matches(&self, insn: &Instruction, stack: &mut FrameStack<'_>) -> Result<MatchOutcome> {
        match self {
            InsnPattern::Wildcard { .. } => Ok(MatchOutcome::Greedy),
            InsnPattern::Simple(pattern) => Ok(pattern.matches(insn)),
            InsnPattern::Var(pattern) => Ok(pattern.matches(insn)),
            InsnPattern::Field(pattern) => pattern.matches(insn, stack),
            InsnPattern::Invoke(pattern) => pattern.matches(insn, stack),
        }
    }

    /// Returns true for [`InsnPattern::Wildcard`].
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        matches!(self, InsnPattern::Wildcard { .. })
    }

    /// The opcode a non-wildcard pattern expects.
    #[must_use]
    pub fn opcode(&self) -> Option<Opcode> {
        match self {
            InsnPattern::Wildcard { .. } => None,
            InsnPattern::Simple(pattern) => Some(pattern.opcode),
            InsnPattern::Var(pattern) => Some(pattern.opcode),
            InsnPattern::Field(pattern) => Some(pattern.opcode),
            InsnPattern::Invoke(pattern) => Some(pattern.opcode),
        }
    }

    /// Location of the mnemonic.
    #[must_use]
    pub fn location(&self) -> Location {
        match self {
            InsnPattern::Wildcard { location } => *location,
            InsnPattern::Simple(pattern) => pattern.location,
            InsnPattern::Var(pattern) => pattern.location,
            InsnPattern::Field(pattern) => pattern.location,
            InsnPattern::Invoke(pattern) => pattern.location,
        }
    }
}
