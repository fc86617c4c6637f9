use log::trace;

use crate::{
    mapping::FrameStack,
    model::Instruction,
    pattern::{InsnPattern, MatchFailure, MatchOutcome},
    Result,
};

/// Frame depth while a single instruction is being matched: base, candidate, attempt.
const ATTEMPT_DEPTH: usize = 3;

/// The result of walking one method body against an instruction pattern list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum WalkResult {
    /// Every pattern was consumed, or only wildcards remained when the instructions ran out
    Matched,
    /// The walk stopped before the patterns were consumed
    Failed {
        /// Number of patterns consumed before the failure
        progress: usize,
        /// Why the walk stopped
        failure: MatchFailure,
        /// True if the instructions ran out, false if a pattern rejected an instruction
        exhausted: bool,
    },
}

/// Walks `instructions` against `patterns`, writing inferred names into the innermost frame.
///
/// Each instruction attempt runs in a frame of its own that is merged on success and discarded
/// otherwise. A wildcard probes the pattern after it on every instruction it would consume;
/// a failed probe is kept as the explanation should the walk fail before another pattern
/// matches.
pub(crate) fn walk(
    patterns: &[InsnPattern],
    instructions: &[Instruction],
    stack: &mut FrameStack<'_>,
) -> Result<WalkResult> {
    let mut pi = 0;
    let mut ii = 0;
    let mut pending: Option<MatchFailure> = None;

    while pi < patterns.len() && ii < instructions.len() {
        let insn = &instructions[ii];
        stack.push();
        stack.expect_depth(ATTEMPT_DEPTH)?;

        match patterns[pi].matches(insn, stack)? {
            MatchOutcome::Break | MatchOutcome::Continue => {
                stack.merge()?;
                pi += 1;
                pending = None;
            }
            MatchOutcome::Greedy => match patterns.get(pi + 1) {
                Some(next) => match next.matches(insn, stack)? {
                    MatchOutcome::Break => {
                        stack.merge()?;
                        pi += 2;
                        pending = None;
                    }
                    MatchOutcome::Continue | MatchOutcome::Greedy => {
                        stack.merge()?;
                        pi += 1;
                        pending = None;
                    }
                    MatchOutcome::NoMatch(failure) => {
                        stack.discard()?;
                        pending = Some(failure);
                    }
                },
                None => stack.merge()?,
            },
            MatchOutcome::NoMatch(failure) => {
                stack.discard()?;
                trace!("pattern {pi} rejected instruction {ii}: {failure}");
                return Ok(WalkResult::Failed {
                    progress: pi,
                    failure,
                    exhausted: false,
                });
            }
        }
        ii += 1;
    }

    if patterns[pi..].iter().all(InsnPattern::is_wildcard) {
        return Ok(WalkResult::Matched);
    }

    let failure = pending.unwrap_or_else(|| {
        MatchFailure::new("instruction list exhausted", patterns[pi].location())
    });
    trace!("instructions exhausted at pattern {pi}: {failure}");
    Ok(WalkResult::Failed {
        progress: pi,
        failure,
        exhausted: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        diagnostics::Diagnostics,
        dispatch::RealmTable,
        model::Opcode,
        source::{Lexer, ParseOptions},
    };

    fn patterns(body: &str) -> Vec<InsnPattern> {
        let tokens = Lexer::new(body, &ParseOptions::default()).tokenize();
        let mut diagnostics = Diagnostics::new();
        let patterns = crate::softmap::parse_body(&tokens, &mut diagnostics);
        assert!(diagnostics.is_empty(), "{diagnostics}");
        patterns
    }

    fn run(body: &str, instructions: &[Instruction]) -> WalkResult {
        let realms = RealmTable::default();
        let mut stack = FrameStack::new(&realms);
        stack.push();
        stack.push();
        let result = walk(&patterns(body), instructions, &mut stack).unwrap();
        assert_eq!(stack.depth(), 2);
        result
    }

    fn field_read() -> Instruction {
        Instruction::field(Opcode::Getfield, "a", "b", "I")
    }

    #[test]
    fn exact_sequence() {
        let insns = [Instruction::var(Opcode::Aload, 0), Instruction::simple(Opcode::Return)];
        assert_eq!(run("ALOAD 0\nRETURN", &insns), WalkResult::Matched);
        assert_eq!(run("ALOAD 0", &insns), WalkResult::Matched);
        assert_eq!(run("", &insns), WalkResult::Matched);
    }

    #[test]
    fn mismatch_reports_progress() {
        let insns = [Instruction::var(Opcode::Aload, 0), Instruction::simple(Opcode::Areturn)];
        match run("ALOAD 0\nRETURN", &insns) {
            WalkResult::Failed {
                progress,
                exhausted,
                failure,
            } => {
                assert_eq!(progress, 1);
                assert!(!exhausted);
                assert_eq!(failure.location.line, 2);
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn wildcard_spans_any_run() {
        let body = "GETFIELD a.b I\n*\nRETURN";
        let short = [field_read(), Instruction::simple(Opcode::Return)];
        let long = [
            field_read(),
            Instruction::simple(Opcode::Nop),
            Instruction::var(Opcode::Iload, 3),
            Instruction::simple(Opcode::Pop),
            Instruction::simple(Opcode::Return),
        ];
        assert_eq!(run(body, &short), WalkResult::Matched);
        assert_eq!(run(body, &long), WalkResult::Matched);
    }

    #[test]
    fn wildcard_without_terminator_fails() {
        let body = "GETFIELD a.b I\n*\nRETURN";
        let insns = [field_read(), Instruction::simple(Opcode::Nop), Instruction::simple(Opcode::Ireturn)];
        match run(body, &insns) {
            WalkResult::Failed {
                progress,
                exhausted,
                failure,
            } => {
                assert_eq!(progress, 1);
                assert!(exhausted);
                assert!(failure.reason.contains("opcode mismatch"));
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn trailing_wildcards_accept_exhaustion() {
        let insns = [Instruction::simple(Opcode::Nop)];
        assert_eq!(run("NOP\n*\n*", &insns), WalkResult::Matched);
        assert_eq!(run("*", &[]), WalkResult::Matched);

        match run("NOP\nRETURN", &insns) {
            WalkResult::Failed { exhausted, failure, .. } => {
                assert!(exhausted);
                assert_eq!(failure.reason, "instruction list exhausted");
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn failed_probe_leaves_no_mapping() {
        let realms = RealmTable::default();
        let mut stack = FrameStack::new(&realms);
        stack.push();
        stack.push();
        let insns = [
            Instruction::field(Opcode::Getstatic, "x", "y", "I"),
            Instruction::simple(Opcode::Return),
        ];
        let result = walk(&patterns("*\nGETSTATIC x.y? J\nRETURN"), &insns, &mut stack).unwrap();
        assert!(matches!(result, WalkResult::Failed { exhausted: true, .. }));
        assert_eq!(stack.lookup_field("x", "y", "I"), None);
    }
}
