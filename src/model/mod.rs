//! The program model softmap documents are applied to.
//!
//! A [`ProgramModel`] is an ordered list of [`ClassNode`]s. Each class names its supertypes and
//! declares [`MethodNode`]s; each method carries its access flags and its instruction list. This
//! is the surface a bytecode reading library provides. Reading class files is out of scope: models
//! are built in code or deserialized from JSON.
//!
//! # Key Components
//!
//! - [`Opcode`] - normalized JVM opcodes, parsed case-insensitively from mnemonics
//! - [`Instruction`] / [`Operand`] - one instruction of a method body
//! - [`AccessFlags`] - method access flags and their [`Visibility`]
//! - [`MemberLocation`] - the owner/name/descriptor triple naming fields and methods
//! - [`DescriptorCursor`] - tolerant iteration over method descriptor parameters

mod access;
mod class;
mod descriptor;
mod insn;
mod member;
mod opcode;

pub use access::{AccessFlags, Visibility};
pub use class::{package_of, ClassNode, MethodNode, ProgramModel};
pub use descriptor::{object_name, return_type, split_array, DescriptorCursor};
pub use insn::{Instruction, Operand};
pub use member::MemberLocation;
pub use opcode::{Opcode, OperandShape};
