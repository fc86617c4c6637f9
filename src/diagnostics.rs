//! Diagnostics collection for parsing and applying softmap documents.
//!
//! Neither parsing nor application stops at the first problem. Malformed text and patterns
//! that fail to bind are recorded as [`Diagnostic`] entries and the work continues with
//! whatever could be salvaged. Two disjoint channels exist:
//!
//! - **Parse diagnostics** ([`crate::Document::diagnostics`]): the text is malformed, e.g.
//!   missing separators, unbalanced blocks, unknown opcodes or an unsupported version.
//! - **Application diagnostics** ([`crate::ApplicationResult::diagnostics`]): a well-formed
//!   expression did not bind to exactly one method.
//!
//! # Key Components
//!
//! - [`Diagnostics`] - Ordered container for diagnostic entries
//! - [`Diagnostic`] - Individual entry with severity, category and source location
//! - [`DiagnosticSeverity`] - Severity level (Warning, Error)
//! - [`DiagnosticCategory`] - Which stage produced the diagnostic
//!
//! # Usage Examples
//!
//! ```rust
//! use softmap::diagnostics::DiagnosticCategory;
//! use softmap::Document;
//!
//! let document = Document::parse("method a/b.c()V { FROBNICATE }");
//!
//! // One warning for the missing header, one error for the unknown opcode
//! assert_eq!(document.diagnostics().warning_count(), 1);
//! assert_eq!(document.diagnostics().error_count(), 1);
//!
//! for entry in document.diagnostics().by_category(DiagnosticCategory::Body) {
//!     println!("{entry}");
//! }
//! ```

use std::fmt::{self, Write};

use serde::Serialize;

use crate::source::{Location, Token};

/// Severity level of a diagnostic entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    /// Something was wrong but a well-defined fallback was used.
    ///
    /// The only warning is a `method` expression without a preceding `softmap` header,
    /// which is parsed as version 1.
    Warning,

    /// The affected construct is missing, partial or failed to apply.
    Error,
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Warning => write!(f, "WARN"),
            DiagnosticSeverity::Error => write!(f, "ERROR"),
        }
    }
}

/// Category indicating which construct a diagnostic is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticCategory {
    /// The `softmap <version>` directive.
    Header,

    /// The shape of a `method <owner>.<name><descriptor> { ... }` expression.
    ///
    /// Examples: missing `.`, unbalanced parentheses, missing `{`.
    Expression,

    /// Lines of a method body.
    ///
    /// Examples: unknown opcode, nested `{`.
    Body,

    /// Operands of a single instruction pattern.
    ///
    /// Examples: missing var index, malformed field descriptor.
    Instruction,

    /// Selecting candidate classes for an expression.
    Binding,

    /// More than one method matched an expression.
    Ambiguity,

    /// No candidate method matched an expression.
    Match,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Header => write!(f, "Header"),
            DiagnosticCategory::Expression => write!(f, "Expression"),
            DiagnosticCategory::Body => write!(f, "Body"),
            DiagnosticCategory::Instruction => write!(f, "Instruction"),
            DiagnosticCategory::Binding => write!(f, "Binding"),
            DiagnosticCategory::Ambiguity => write!(f, "Ambiguity"),
            DiagnosticCategory::Match => write!(f, "Match"),
        }
    }
}

/// A single diagnostic entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Severity level of this diagnostic.
    pub severity: DiagnosticSeverity,

    /// Category of the construct this diagnostic is about.
    pub category: DiagnosticCategory,

    /// Human-readable description of the issue.
    pub message: String,

    /// Where in the softmap text the issue was found.
    pub location: Location,
}

impl Diagnostic {
    /// Creates a new diagnostic entry.
    ///
    /// # Arguments
    ///
    /// * `severity` - Severity level of the diagnostic
    /// * `category` - Category of the diagnostic
    /// * `message` - Human-readable description
    /// * `location` - Position in the softmap text
    pub fn new(
        severity: DiagnosticSeverity,
        category: DiagnosticCategory,
        message: impl Into<String>,
        location: Location,
    ) -> Self {
        Self {
            severity,
            category,
            message: message.into(),
            location,
        }
    }

    /// Replaces the location of the diagnostic.
    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Returns true if this is an error-level diagnostic.
    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {}: {}",
            self.severity, self.category, self.location, self.message
        )
    }
}

/// Ordered container for diagnostic entries.
///
/// Entries keep the order in which they were reported, which follows the order of the
/// softmap text for parse diagnostics and the order of expressions for application
/// diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates a new empty diagnostics container.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds a warning diagnostic.
    pub fn warning(
        &mut self,
        category: DiagnosticCategory,
        location: Location,
        message: impl Into<String>,
    ) {
        self.push(Diagnostic::new(
            DiagnosticSeverity::Warning,
            category,
            message,
            location,
        ));
    }

    /// Adds an error diagnostic.
    ///
    /// # Arguments
    ///
    /// * `category` - Category of the diagnostic
    /// * `location` - Position in the softmap text
    /// * `message` - Description of the error
    pub fn error(
        &mut self,
        category: DiagnosticCategory,
        location: Location,
        message: impl Into<String>,
    ) {
        self.push(Diagnostic::new(
            DiagnosticSeverity::Error,
            category,
            message,
            location,
        ));
    }

    /// Adds an error diagnostic located at `token`.
    pub fn error_at(&mut self, category: DiagnosticCategory, token: &Token<'_>, message: impl Into<String>) {
        self.error(category, token.location(), message);
    }

    /// Adds a diagnostic entry directly.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    /// Appends all entries of `other`.
    pub fn extend(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    /// Returns true if no diagnostics have been collected.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if any error-level diagnostics have been collected.
    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(Diagnostic::is_error)
    }

    /// Returns the total number of diagnostics.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Returns the number of error-level diagnostics.
    pub fn error_count(&self) -> usize {
        self.entries.iter().filter(|d| d.is_error()).count()
    }

    /// Returns the number of warning-level diagnostics.
    pub fn warning_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|d| d.severity == DiagnosticSeverity::Warning)
            .count()
    }

    /// Returns an iterator over all diagnostics, in reporting order.
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    /// Returns diagnostics filtered by category.
    pub fn by_category(&self, category: DiagnosticCategory) -> Vec<&Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.category == category)
            .collect()
    }

    /// Formats a summary of all diagnostics for display.
    pub fn summary(&self) -> String {
        let mut output = String::new();

        let _ = writeln!(
            output,
            "Diagnostics: {} error(s), {} warning(s)",
            self.error_count(),
            self.warning_count()
        );

        for diag in &self.entries {
            let _ = writeln!(output, "  {diag}");
        }

        output
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Span;

    fn at(line: u32, column: u32) -> Location {
        Location::new(Span::new(0, 1), line, column)
    }

    #[test]
    fn test_diagnostic_creation() {
        let diag = Diagnostic::new(
            DiagnosticSeverity::Warning,
            DiagnosticCategory::Header,
            "Test message",
            at(1, 1),
        );

        assert_eq!(diag.severity, DiagnosticSeverity::Warning);
        assert_eq!(diag.category, DiagnosticCategory::Header);
        assert_eq!(diag.message, "Test message");
        assert!(!diag.is_error());
    }

    #[test]
    fn test_diagnostics_container() {
        let mut diagnostics = Diagnostics::new();
        assert!(diagnostics.is_empty());

        diagnostics.warning(DiagnosticCategory::Header, at(1, 1), "Warning message");
        diagnostics.error(DiagnosticCategory::Body, at(2, 3), "Error message");
        diagnostics.error(DiagnosticCategory::Body, at(3, 3), "Another error");

        assert_eq!(diagnostics.count(), 3);
        assert_eq!(diagnostics.error_count(), 2);
        assert_eq!(diagnostics.warning_count(), 1);
        assert!(diagnostics.has_errors());
        assert!(!diagnostics.is_empty());
        assert_eq!(diagnostics.by_category(DiagnosticCategory::Body).len(), 2);
        assert!(diagnostics
            .by_category(DiagnosticCategory::Ambiguity)
            .is_empty());
    }

    #[test]
    fn test_warnings_are_not_errors() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.warning(DiagnosticCategory::Header, at(1, 1), "fallback");
        assert!(!diagnostics.has_errors());
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::new(
            DiagnosticSeverity::Error,
            DiagnosticCategory::Instruction,
            "Var insn has too few arguments",
            at(4, 9),
        );
        assert_eq!(
            diag.to_string(),
            "[ERROR] Instruction 4:9: Var insn has too few arguments"
        );
    }

    #[test]
    fn test_summary() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.error(DiagnosticCategory::Match, at(2, 1), "No methods match");
        let summary = diagnostics.summary();
        assert!(summary.starts_with("Diagnostics: 1 error(s), 0 warning(s)"));
        assert!(summary.contains("[ERROR] Match 2:1: No methods match"));
        assert_eq!(summary, diagnostics.to_string());
    }

    #[test]
    fn test_order_is_preserved() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.error(DiagnosticCategory::Body, at(5, 1), "second");
        diagnostics.error(DiagnosticCategory::Body, at(1, 1), "first");
        let messages: Vec<_> = diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, ["second", "first"]);
    }
}
