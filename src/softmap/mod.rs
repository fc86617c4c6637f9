//! The softmap pattern language: documents, `method` expressions and their parser.
//!
//! A document is a sequence of directives:
//!
//! ```text
//! softmap v1
//!
//! // infer the name of the method and of the field it reads
//! method a/b.c?()I {
//!     ALOAD this
//!     GETFIELD a/b.count? I
//!     IRETURN
//! }
//! ```
//!
//! Parsing never fails. Problems are recorded as [`crate::diagnostics::Diagnostic`]s and the
//! affected part is dropped or left unconstrained, so one broken expression does not hide the
//! others.

mod body;
mod document;
mod expression;
mod header;
mod version;

#[cfg(test)]
pub(crate) use body::parse_body;
pub use document::Document;
pub use expression::MethodExpression;
pub use version::Version;
