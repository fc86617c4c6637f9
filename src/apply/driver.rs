use log::{debug, trace};
use serde::Serialize;

use crate::{
    apply::{
        options::ApplyOptions,
        walker::{walk, WalkResult},
    },
    diagnostics::{DiagnosticCategory, Diagnostics},
    dispatch::RealmTable,
    mapping::{FrameStack, MappingFrame, MappingTable},
    model::{ClassNode, MemberLocation, MethodNode, ProgramModel},
    pattern::{bind_class, bind_method, match_descriptor, require_match, MatchFailure, MatchOutcome},
    softmap::MethodExpression,
    Error, Result,
};

/// Frame depth between expressions: the base frame only.
const BASE_DEPTH: usize = 1;
/// Frame depth while a candidate method is bound and walked.
const CANDIDATE_DEPTH: usize = 2;

/// The outcome of applying a softmap document to a program model.
///
/// Holds the renaming table of every committed expression and the diagnostics of every
/// expression that could not be committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationResult {
    table: MappingTable,
    diagnostics: Diagnostics,
}

impl ApplicationResult {
    /// The renaming table.
    #[must_use]
    pub fn table(&self) -> &MappingTable {
        &self.table
    }

    /// Diagnostics raised while applying the document.
    ///
    /// Parse diagnostics are not repeated here; see [`crate::Document::diagnostics`].
    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Splits the result into the renaming table and the diagnostics.
    #[must_use]
    pub fn into_parts(self) -> (MappingTable, Diagnostics) {
        (self.table, self.diagnostics)
    }
}

/// The walk that got furthest among the candidates of one expression.
struct Furthest {
    progress: usize,
    failure: MatchFailure,
    exhausted: bool,
}

/// Applies `expressions` in order, each against a fresh view of the mappings committed by the
/// ones before it.
pub(crate) fn apply(
    expressions: &[MethodExpression],
    model: &ProgramModel,
    options: &ApplyOptions,
) -> Result<ApplicationResult> {
    let realms = RealmTable::build(model);
    debug!(
        "applying {} expression(s) to {} class(es) with {} method realm(s)",
        expressions.len(),
        model.len(),
        realms.realm_count()
    );

    let mut stack = FrameStack::new(&realms);
    stack.push();
    let mut diagnostics = Diagnostics::new();

    for expression in expressions {
        apply_expression(expression, model, options, &mut stack, &mut diagnostics)?;
    }

    stack.expect_depth(BASE_DEPTH)?;
    Ok(ApplicationResult {
        table: stack.export(options.expand_realm_members),
        diagnostics,
    })
}

fn apply_expression(
    expression: &MethodExpression,
    model: &ProgramModel,
    options: &ApplyOptions,
    stack: &mut FrameStack<'_>,
    diagnostics: &mut Diagnostics,
) -> Result<()> {
    stack.expect_depth(BASE_DEPTH)?;

    let candidates: Vec<&ClassNode> = match expression.owner.as_ref().filter(|owner| owner.is_fixed()) {
        Some(owner) => match model.class(&owner.name) {
            Some(class) => vec![class],
            None => {
                diagnostics.error(
                    DiagnosticCategory::Binding,
                    owner.location,
                    format!("No class named '{}' exists in the program model", owner.name),
                );
                return Ok(());
            }
        },
        None => model.classes().iter().collect(),
    };

    let fixed_name = expression.name.as_ref().filter(|name| name.is_fixed());
    let fixed_desc = expression
        .descriptor
        .as_ref()
        .filter(|descriptor| !descriptor.is_inferable())
        .map(ToString::to_string);

    let mut visited = Vec::new();
    let mut winner: Option<(MemberLocation, MappingFrame)> = None;
    let mut furthest: Option<Furthest> = None;

    for class in candidates {
        for method in &class.methods {
            if fixed_name.is_some_and(|name| name.name != method.name)
                || fixed_desc.as_deref().is_some_and(|desc| desc != method.desc)
            {
                continue;
            }

            let location = class.location_of(method);
            if stack.realms().get(&location).is_none() {
                return Err(Error::MissingRealm(location));
            }
            visited.push(location.clone());

            stack.push();
            stack.expect_depth(CANDIDATE_DEPTH)?;
            if let MatchOutcome::NoMatch(failure) = bind_header(expression, class, method, stack)? {
                trace!("'{expression}' rejects {}: {failure}", location.to_compact());
                stack.discard()?;
                continue;
            }

            match walk(&expression.instructions, &method.instructions, stack)? {
                WalkResult::Failed {
                    progress,
                    failure,
                    exhausted,
                } => {
                    if furthest.as_ref().map_or(true, |best| progress > best.progress) {
                        furthest = Some(Furthest {
                            progress,
                            failure,
                            exhausted,
                        });
                    }
                    stack.discard()?;
                }
                WalkResult::Matched => {
                    trace!("'{expression}' matches {}", location.to_compact());
                    if let Some((first, _)) = &winner {
                        diagnostics.error(
                            DiagnosticCategory::Ambiguity,
                            expression.location(),
                            format!(
                                "Ambiguous expression: at least two methods match, '{}' and '{}'",
                                first.to_compact(),
                                abbreviate(first, &location)
                            ),
                        );
                        stack.discard()?;
                        debug!("'{expression}' is ambiguous, no mapping committed");
                        return Ok(());
                    }
                    winner = Some((location, stack.pop()?));
                }
            }
        }
    }

    stack.expect_depth(BASE_DEPTH)?;
    match (winner, furthest) {
        (Some((location, frame)), _) => {
            debug!(
                "'{expression}' committed {} mapping(s) from {}",
                frame.len(),
                location.to_compact()
            );
            stack.push_frame(frame);
            stack.merge()?;
        }
        (None, Some(furthest)) => {
            let message = if furthest.exhausted {
                format!(
                    "Instructions exhausted after {} matched pattern(s): {}",
                    furthest.progress, furthest.failure.reason
                )
            } else {
                format!(
                    "Instruction pattern failed to match after {} matched pattern(s): {}",
                    furthest.progress, furthest.failure.reason
                )
            };
            debug!("'{expression}' matched no method");
            diagnostics.error(DiagnosticCategory::Match, furthest.failure.location, message);
        }
        (None, None) => {
            debug!("'{expression}' bound no method");
            diagnostics.error(
                DiagnosticCategory::Match,
                expression.location(),
                format!(
                    "No methods match '{expression}'. Visited methods: {}",
                    listing(&visited, options.visited_listing_limit)
                ),
            );
        }
    }
    Ok(())
}

/// Binds the inferable parts of the expression header to a candidate method. Fixed parts were
/// already used to select the candidate.
fn bind_header(
    expression: &MethodExpression,
    class: &ClassNode,
    method: &MethodNode,
    stack: &mut FrameStack<'_>,
) -> Result<MatchOutcome> {
    if let Some(owner) = expression.owner.as_ref().filter(|owner| owner.infer) {
        require_match!(bind_class(stack, owner, &class.name, "Method owner")?);
    }
    if let Some(name) = expression.name.as_ref().filter(|name| name.infer) {
        require_match!(bind_method(stack, name, &class.name, &method.name, &method.desc)?);
    }
    if let Some(descriptor) = expression
        .descriptor
        .as_ref()
        .filter(|descriptor| descriptor.is_inferable())
    {
        require_match!(match_descriptor(stack, descriptor, &method.desc)?);
    }
    Ok(MatchOutcome::Break)
}

/// Renders `second` with every part equal to the same part of `first` replaced by `*`.
fn abbreviate(first: &MemberLocation, second: &MemberLocation) -> String {
    let part = |a: &str, b: &'_ str| if a == b { "*".to_string() } else { b.to_string() };
    format!(
        "{}.{}{}",
        part(&first.owner, &second.owner),
        part(&first.name, &second.name),
        part(&first.desc, &second.desc)
    )
}

fn listing(visited: &[MemberLocation], limit: Option<usize>) -> String {
    let shown = limit.unwrap_or(visited.len()).min(visited.len());
    let mut entries: Vec<String> = visited[..shown].iter().map(MemberLocation::to_compact).collect();
    if shown < visited.len() {
        entries.push(format!("... ({} more)", visited.len() - shown));
    }
    format!("[{}]", entries.join(", "))
}
