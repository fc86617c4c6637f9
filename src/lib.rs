// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

//! # softmap
//!
//! A pattern language for recovering the names of obfuscated JVM classes, methods and fields.
//!
//! A softmap document describes methods by the shape of their bytecode. Names that are not known
//! in advance are marked with a trailing `?` and discovered while the patterns are matched
//! against a program model. The result is a tab-separated renaming table:
//!
//! ```text
//! CLASS   <src>   <dst>
//! FIELD   <owner> <descriptor>    <name>  <dst>
//! METHOD  <owner> <descriptor>    <name>  <dst>
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use softmap::prelude::*;
//!
//! let document = Document::parse(
//!     "softmap v1
//!      method a/b.getCount?()I {
//!          ALOAD this
//!          GETFIELD a/b.count? I
//!          IRETURN
//!      }",
//! );
//! assert!(document.diagnostics().is_empty());
//!
//! let model = ProgramModel::new(vec![ClassNode::new("a/b").with_method(
//!     MethodNode::new("q", "()I", AccessFlags::PUBLIC).with_instructions(vec![
//!         Instruction::var(Opcode::Aload, 0),
//!         Instruction::field(Opcode::Getfield, "a/b", "r", "I"),
//!         Instruction::simple(Opcode::Ireturn),
//!     ]),
//! )]);
//!
//! let result = document.apply(&model)?;
//! assert_eq!(
//!     result.table().to_string(),
//!     "FIELD\ta/b\tI\tr\tcount\nMETHOD\ta/b\t()I\tq\tgetCount\n"
//! );
//! # Ok::<(), softmap::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`source`] - Lexing softmap text into position-tagged tokens
//! - [`softmap`] - Documents and `method` expressions
//! - [`pattern`] - Instruction patterns and their matchers
//! - [`model`] - The program model patterns are matched against
//! - [`dispatch`] - Method realms: methods sharing one name through overriding
//! - [`mapping`] - Speculative mapping frames and the renaming table
//! - [`apply`] - The application driver
//! - [`diagnostics`] - Problems found while parsing or applying a document
//!
//! ## Error Handling
//!
//! Malformed text and patterns that do not bind are reported as diagnostics and never abort
//! processing. [`Error`] is reserved for violated engine invariants.

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types.
///
/// # Example
///
/// ```rust
/// use softmap::prelude::*;
///
/// let document = Document::parse("softmap 1");
/// assert!(document.expressions().is_empty());
/// ```
pub mod prelude;

pub mod apply;
pub mod diagnostics;
pub mod dispatch;
pub mod mapping;
pub mod model;
pub mod pattern;
pub mod softmap;
pub mod source;

/// `softmap` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `softmap` Error type
///
/// Raised only for violated engine invariants.
pub use error::Error;

/// Main entry point: a parsed softmap document.
///
/// # Example
///
/// ```rust
/// use softmap::Document;
///
/// let document = Document::parse("softmap 1\nmethod a/b.c?()V { RETURN }");
/// assert_eq!(document.expressions().len(), 1);
/// ```
pub use softmap::Document;

/// The renaming table and diagnostics of one application, and its configuration.
pub use apply::{ApplicationResult, ApplyOptions};
