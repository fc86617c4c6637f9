use log::{debug, warn};
use rayon::prelude::*;

use crate::{
    apply::{self, ApplicationResult, ApplyOptions},
    diagnostics::{DiagnosticCategory, Diagnostics},
    model::ProgramModel,
    softmap::{
        expression::{parse_method, MethodExpression},
        version::{parse_directive, Version},
    },
    source::{Lexer, ParseOptions, TokenKind},
    Result,
};

const DIRECTIVES: &str = "'softmap <version>', 'method <class>.<method><descriptor> { ... }'";

/// A parsed softmap document.
///
/// Parsing always succeeds; problems with the text are available through
/// [`Document::diagnostics`]. A document can be applied to any number of program models.
///
/// # Example
///
/// ```rust
/// use softmap::Document;
/// use softmap::model::{AccessFlags, ClassNode, Instruction, MethodNode, Opcode, ProgramModel};
///
/// let document = Document::parse("softmap 1\nmethod a/b.c?()V { ALOAD 0\nRETURN }");
/// assert!(document.diagnostics().is_empty());
///
/// let model = ProgramModel::new(vec![ClassNode::new("a/b").with_method(
///     MethodNode::new("x", "()V", AccessFlags::PUBLIC).with_instructions(vec![
///         Instruction::var(Opcode::Aload, 0),
///         Instruction::simple(Opcode::Return),
///     ]),
/// )]);
///
/// let result = document.apply(&model)?;
/// assert_eq!(result.table().to_string(), "METHOD\ta/b\t()V\tx\tc\n");
/// # Ok::<(), softmap::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    expressions: Vec<MethodExpression>,
    diagnostics: Diagnostics,
    version: Option<Version>,
}

impl Document {
    /// Parses the whole of `source`.
    #[must_use]
    pub fn parse(source: &str) -> Self {
        Self::parse_with(source, &ParseOptions::default())
    }

    /// Parses the part of `source` selected by `options`.
    #[must_use]
    pub fn parse_with(source: &str, options: &ParseOptions) -> Self {
        let tokens = Lexer::new(source, options).tokenize();
        let mut expressions = Vec::new();
        let mut diagnostics = Diagnostics::new();
        let mut version = None;

        let mut index = 0;
        while let Some(token) = tokens.get(index) {
            match token.kind {
                TokenKind::Comment => index += 1,
                TokenKind::Text if token.is_keyword("method") => {
                    let active = version.unwrap_or_else(|| {
                        diagnostics.warning(
                            DiagnosticCategory::Header,
                            token.location(),
                            format!(
                                "Start of 'method' expression without declaring the format version. \
                                 Expected 'softmap {}', assuming it",
                                Version::FALLBACK
                            ),
                        );
                        Version::FALLBACK
                    });
                    index = parse_method(&tokens, index, active, &mut expressions, &mut diagnostics);
                }
                TokenKind::Text if token.is_keyword("softmap") => {
                    index = parse_directive(&tokens, index, &mut version, &mut diagnostics);
                }
                TokenKind::Text | TokenKind::BlockOpen | TokenKind::BlockClose => {
                    diagnostics.error_at(
                        DiagnosticCategory::Expression,
                        token,
                        format!("Unknown token '{}', expected any of {DIRECTIVES}", token.text),
                    );
                    index += 1;
                }
            }
        }

        debug!(
            "parsed {} expression(s) with {} diagnostic(s)",
            expressions.len(),
            diagnostics.count()
        );
        Self {
            expressions,
            diagnostics,
            version,
        }
    }

    /// The parsed `method` expressions in document order.
    #[must_use]
    pub fn expressions(&self) -> &[MethodExpression] {
        &self.expressions
    }

    /// Parse diagnostics.
    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// The last version declared with a `softmap` directive.
    #[must_use]
    pub fn version(&self) -> Option<Version> {
        self.version
    }

    /// Applies the document to `model` with default options.
    ///
    /// # Errors
    ///
    /// Returns an [`crate::Error`] if an engine invariant is violated. Expressions that do not
    /// bind are reported through [`ApplicationResult::diagnostics`] instead.
    pub fn apply(&self, model: &ProgramModel) -> Result<ApplicationResult> {
        self.apply_with(model, &ApplyOptions::default())
    }

    /// Applies the document to `model`.
    ///
    /// # Errors
    ///
    /// Returns an [`crate::Error`] if an engine invariant is violated.
    pub fn apply_with(&self, model: &ProgramModel, options: &ApplyOptions) -> Result<ApplicationResult> {
        if self.diagnostics.has_errors() {
            warn!(
                "applying a softmap document with {} parse error(s)",
                self.diagnostics.error_count()
            );
        }
        apply::apply(&self.expressions, model, options)
    }

    /// Applies the document to each of `models` independently and in parallel.
    ///
    /// The results are in the order of `models`.
    #[must_use]
    pub fn apply_all(&self, models: &[ProgramModel], options: &ApplyOptions) -> Vec<Result<ApplicationResult>> {
        models
            .par_iter()
            .map(|model| self.apply_with(model, options))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{diagnostics::DiagnosticSeverity, test::single_method_model};

    #[test]
    fn headed_document() {
        let document = Document::parse("softmap v1\n// c\nmethod a/b.c?()V {}\nmethod d.e()V { RETURN }");
        assert!(document.diagnostics().is_empty());
        assert_eq!(document.version(), Some(Version::V1));
        assert_eq!(document.expressions().len(), 2);
        assert_eq!(document.expressions()[1].instructions.len(), 1);
    }

    #[test]
    fn missing_header_warns_per_expression() {
        let document = Document::parse("method a.b()V {}\nmethod c.d()V {}");
        assert_eq!(document.diagnostics().warning_count(), 2);
        assert!(!document.diagnostics().has_errors());
        assert_eq!(document.expressions()[0].version, Version::V1);
    }

    #[test]
    fn unknown_top_level_tokens() {
        let document = Document::parse("softmap 1\nfield a.b I\n}\nmethod a.b()V {}");
        let errors: Vec<_> = document
            .diagnostics()
            .iter()
            .filter(|d| d.severity == DiagnosticSeverity::Error)
            .collect();
        assert_eq!(errors.len(), 4);
        assert!(errors[0].message.starts_with("Unknown token 'field'"));
        assert_eq!(document.expressions().len(), 1);
    }

    #[test]
    fn one_broken_expression_keeps_the_rest() {
        let document = Document::parse(
            "softmap 1\nmethod a/b.c { FROBNICATE }\nmethod a/b.d()V {\nRETURN\n}",
        );
        assert_eq!(document.expressions().len(), 2);
        assert_eq!(document.expressions()[1].instructions.len(), 1);
        assert_eq!(document.diagnostics().error_count(), 2);
    }

    #[test]
    fn window_and_start_position() {
        let source = "garbage softmap 1 method a.b()V { NOP } trailing";
        let options = ParseOptions::new().with_window(8, 39).with_start(10, 5);
        let document = Document::parse_with(source, &options);
        assert!(document.diagnostics().is_empty(), "{}", document.diagnostics());
        let expression = &document.expressions()[0];
        assert_eq!(expression.keyword.line, 10);
        assert_eq!(expression.keyword.column, 15);
    }

    #[test]
    fn apply_all_keeps_model_order() {
        let document = Document::parse("softmap 1\nmethod a/b.c?()V { ALOAD 0\nRETURN }");
        let models = vec![single_method_model(), ProgramModel::default(), single_method_model()];
        let results = document.apply_all(&models, &ApplyOptions::default());
        assert_eq!(results.len(), 3);
        let rows: Vec<usize> = results
            .iter()
            .map(|result| result.as_ref().map(|r| r.table().len()).unwrap_or(usize::MAX))
            .collect();
        assert_eq!(rows, [1, 0, 1]);
    }
}
