//! Instructions of a method body.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{member::MemberLocation, opcode::Opcode};

/// The operand of an [`Instruction`].
///
/// Only local variable slots and field/method references take part in matching; the remaining
/// variants carry enough information to round-trip a program model and to print it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Operand {
    /// No operand
    #[default]
    None,
    /// A local variable slot
    Var {
        /// Slot index; slot 0 holds `this` in instance methods
        slot: u16,
    },
    /// A field reference
    Field(MemberLocation),
    /// A method reference
    Method(MemberLocation),
    /// An immediate integer
    Int {
        /// The immediate value
        value: i32,
    },
    /// A constant pool constant, rendered as text
    Constant {
        /// Textual form of the constant
        value: String,
    },
    /// A branch target
    Jump {
        /// Index of the target instruction
        target: usize,
    },
    /// A class or array type
    Type {
        /// Internal name or array descriptor
        desc: String,
    },
    /// Any operand the matching engine does not look into
    Other,
}

/// A single instruction: an opcode and its operand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// The normalized opcode
    pub opcode: Opcode,
    /// The operand, if the opcode carries one
    #[serde(default)]
    pub operand: Operand,
}

impl Instruction {
    /// Creates an instruction without an operand.
    #[must_use]
    pub fn simple(opcode: Opcode) -> Self {
        Self {
            opcode,
            operand: Operand::None,
        }
    }

    /// Creates a local variable instruction.
    #[must_use]
    pub fn var(opcode: Opcode, slot: u16) -> Self {
        Self {
            opcode,
            operand: Operand::Var { slot },
        }
    }

    /// Creates a field instruction.
    pub fn field(opcode: Opcode, owner: &str, name: &str, desc: &str) -> Self {
        Self {
            opcode,
            operand: Operand::Field(MemberLocation::new(owner, name, desc)),
        }
    }

    /// Creates a method invocation.
    pub fn method(opcode: Opcode, owner: &str, name: &str, desc: &str) -> Self {
        Self {
            opcode,
            operand: Operand::Method(MemberLocation::new(owner, name, desc)),
        }
    }

    /// The local variable slot, for var instructions.
    #[must_use]
    pub fn var_slot(&self) -> Option<u16> {
        match self.operand {
            Operand::Var { slot } => Some(slot),
            _ => None,
        }
    }

    /// The referenced field, for field instructions.
    #[must_use]
    pub fn field_ref(&self) -> Option<&MemberLocation> {
        match &self.operand {
            Operand::Field(member) => Some(member),
            _ => None,
        }
    }

    /// The referenced method, for invocations.
    #[must_use]
    pub fn method_ref(&self) -> Option<&MemberLocation> {
        match &self.operand {
            Operand::Method(member) => Some(member),
            _ => None,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.opcode)?;
        match &self.operand {
            Operand::None | Operand::Other => Ok(()),
            Operand::Var { slot } => write!(f, " {slot}"),
            Operand::Field(member) => write!(f, " {}.{} {}", member.owner, member.name, member.desc),
            Operand::Method(member) => write!(f, " {}", member.to_compact()),
            Operand::Int { value } => write!(f, " {value}"),
            Operand::Constant { value } => write!(f, " {value}"),
            Operand::Jump { target } => write!(f, " -> {target}"),
            Operand::Type { desc } => write!(f, " {desc}"),
        }
    }
}
