//! # softmap Prelude
//!
//! The types needed to parse a softmap document, describe a program model and apply the one to
//! the other.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The error type for violated engine invariants
pub use crate::Error;

/// The result type used throughout softmap
pub use crate::Result;

// ================================================================================================
// Documents and Application
// ================================================================================================

/// A parsed softmap document
pub use crate::softmap::{Document, MethodExpression, Version};

/// Application results and configuration
pub use crate::apply::{ApplicationResult, ApplyOptions};

/// Parse configuration
pub use crate::source::ParseOptions;

/// Diagnostics of both channels
pub use crate::diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticSeverity, Diagnostics};

// ================================================================================================
// Program Model
// ================================================================================================

/// Classes, methods and their instructions
pub use crate::model::{
    AccessFlags, ClassNode, Instruction, MemberLocation, MethodNode, Opcode, Operand, ProgramModel,
};

// ================================================================================================
// Output
// ================================================================================================

/// The renaming table
pub use crate::mapping::{MappingRow, MappingTable};

/// Method realms
pub use crate::dispatch::{MethodRealm, RealmTable};
