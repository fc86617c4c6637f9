use crate::{
    diagnostics::{DiagnosticCategory, Diagnostics},
    mapping::FrameStack,
    model::{return_type, DescriptorCursor, Instruction, Opcode},
    pattern::{
        bind::{bind_class, bind_method, bind_type},
        outcome::require_match,
        types::{DescriptorPattern, NamePattern},
        MatchOutcome,
    },
    source::{Location, Token},
    Result,
};

const FORMAT: &str = "The instruction is formatted in the scheme of '<opcode> <class>.<name><desc>', \
                      e.g.: 'INVOKESTATIC java/lang/String.valueOf(I)Ljava/lang/String;'";

/// Matches a method invocation: `INVOKEVIRTUAL <owner>.<name><desc>`.
///
/// The name is looked up through the realm of the invoked method, so a mapping recorded for an
/// override applies to calls through any class of the realm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokePattern {
    /// The expected opcode
    pub opcode: Opcode,
    /// Location of the mnemonic
    pub location: Location,
    /// Owner class of the invoked method
    pub owner: Option<NamePattern>,
    /// Method name
    pub name: Option<NamePattern>,
    /// Method descriptor, with per-type inference
    pub desc: Option<DescriptorPattern>,
}

impl InvokePattern {
    pub(crate) fn parse(opcode: Opcode, line: &[Token<'_>], diagnostics: &mut Diagnostics) -> Self {
        let category = DiagnosticCategory::Instruction;
        let mnemonic = &line[0];

        let target = match line {
            [_] => {
                diagnostics.error_at(
                    category,
                    mnemonic,
                    format!("Invoke instruction is missing the invoked method. {FORMAT}"),
                );
                None
            }
            [_, target] => Some(target),
            [_, target, extra @ ..] => {
                if let (Some(first), Some(last)) = (extra.first(), extra.last()) {
                    diagnostics.error(
                        category,
                        first.location().to(last.location()),
                        format!(
                            "Invoke instruction provided with superfluous arguments. {FORMAT}. \
                             Member names may not contain whitespace"
                        ),
                    );
                }
                Some(target)
            }
            [] => None,
        };

        let mut pattern = Self {
            opcode,
            location: mnemonic.location(),
            owner: None,
            name: None,
            desc: None,
        };
        let Some(target) = target else {
            return pattern;
        };

        let text = target.text;
        let dot = text.find('.');
        let name_start = dot.map_or(0, |dot| dot + 1);
        let open = text[name_start..].find('(').map(|i| name_start + i);
        let close = open.and_then(|open| text[open..].find(')').map(|i| open + i));

        if dot.is_none() {
            diagnostics.error_at(
                category,
                target,
                format!("Invoke target is missing its owner, which is separated from the method name by '.'. {FORMAT}"),
            );
        } else if open.is_none() {
            diagnostics.error_at(
                category,
                target,
                format!("Invoke target is missing its descriptor, which starts with '('. {FORMAT}"),
            );
        } else if close.is_none() {
            diagnostics.error_at(
                category,
                target,
                format!("Invoke target has an invalid descriptor: missing codepoint ')'. {FORMAT}"),
            );
        }

        let owner = dot.map(|dot| target.slice(0, dot));
        let name = target.slice(name_start, open.unwrap_or(text.len()));

        if name.text.contains('.') {
            let start = owner.map_or(name.location(), |owner| owner.location());
            diagnostics.error(
                category,
                start.to(name.location()),
                "The method name contains a '.', which is banned from member names. \
                 Packages are separated with '/', this hints at an invalid owner name",
            );
        }

        pattern.owner = owner.as_ref().map(NamePattern::from_token);
        pattern.name = Some(NamePattern::from_token(&name));
        if let (Some(open), Some(_)) = (open, close) {
            pattern.desc = DescriptorPattern::parse(&target.slice_from(open), category, diagnostics);
        }
        pattern
    }

    /// Matches opcode, owner, name and descriptor in that order, recording inferred names.
    ///
    /// # Errors
    ///
    /// Propagates mapping store failures.
    pub fn matches(&self, insn: &Instruction, stack: &mut FrameStack<'_>) -> Result<MatchOutcome> {
        if insn.opcode != self.opcode {
            return Ok(MatchOutcome::no_match(
                format!("Instruction opcode mismatch (got {})", insn.opcode),
                self.location,
            ));
        }

        let Some(method) = insn.method_ref() else {
            return Ok(MatchOutcome::no_match(
                "Instruction carries no method reference",
                self.location,
            ));
        };

        if let Some(owner) = &self.owner {
            require_match!(bind_class(stack, owner, &method.owner, "Method owner")?);
        }
        if let Some(name) = &self.name {
            require_match!(bind_method(stack, name, &method.owner, &method.name, &method.desc)?);
        }
        if let Some(desc) = &self.desc {
            require_match!(match_descriptor(stack, desc, &method.desc)?);
        }

        Ok(MatchOutcome::Break)
    }
}

/// Matches a method descriptor pattern against the concrete descriptor `desc`, argument by
/// argument and then the return type.
///
/// # Errors
///
/// Propagates mapping store failures.
pub(crate) fn match_descriptor(
    stack: &mut FrameStack<'_>,
    pattern: &DescriptorPattern,
    desc: &str,
) -> Result<MatchOutcome> {
    let mut cursor = DescriptorCursor::new(desc);
    for (index, arg) in pattern.args.iter().enumerate() {
        let Some(ty) = cursor.next() else {
            return Ok(argument_count_mismatch(pattern, desc));
        };
        let what = format!("Argument {}", index + 1);
        require_match!(bind_type(stack, arg, ty, &what)?);
    }

    if cursor.has_next() {
        return Ok(argument_count_mismatch(pattern, desc));
    }

    require_match!(bind_type(stack, &pattern.ret, return_type(desc), "Return type")?);
    Ok(MatchOutcome::Break)
}

fn argument_count_mismatch(pattern: &DescriptorPattern, desc: &str) -> MatchOutcome {
    MatchOutcome::no_match(
        format!(
            "Method descriptor mismatch (expected {} argument(s), descriptor of matched method: '{desc}')",
            pattern.args.len()
        ),
        pattern.location,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dispatch::RealmTable,
        model::{AccessFlags, ProgramModel},
        source::{Span, TokenKind},
        test::{class, method},
    };

    fn parse(texts: &[&str]) -> (InvokePattern, Diagnostics) {
        let mut offset = 0;
        let line: Vec<_> = texts
            .iter()
            .map(|text| {
                let token = Token::new(
                    TokenKind::Text,
                    text,
                    Span::new(offset, offset + text.len()),
                    1,
                    offset as u32 + 1,
                );
                offset += text.len() + 1;
                token
            })
            .collect();
        let mut diagnostics = Diagnostics::new();
        let opcode = texts[0].parse().unwrap();
        (InvokePattern::parse(opcode, &line, &mut diagnostics), diagnostics)
    }

    #[test]
    fn parses_target() {
        let (pattern, diagnostics) = parse(&["INVOKEVIRTUAL", "a/b.c?(La/d;?I)V"]);
        assert!(diagnostics.is_empty());
        assert_eq!(pattern.owner.unwrap().name, "a/b");
        assert_eq!(pattern.name.unwrap().name, "c");
        let desc = pattern.desc.unwrap();
        assert_eq!(desc.args.len(), 2);
        assert!(desc.is_inferable());
    }

    #[test]
    fn malformed_targets() {
        let cases: &[(&[&str], &str)] = &[
            (&["INVOKESTATIC"], "missing the invoked method"),
            (&["INVOKESTATIC", "c()V"], "missing its owner"),
            (&["INVOKESTATIC", "a.c"], "missing its descriptor"),
            (&["INVOKESTATIC", "a.c(I"], "missing codepoint ')'"),
            (&["INVOKESTATIC", "a.c()V", "x", "y"], "superfluous"),
        ];
        for (line, expected) in cases {
            let (_, diagnostics) = parse(line);
            assert_eq!(diagnostics.error_count(), 1, "{line:?}");
            assert!(
                diagnostics.iter().next().unwrap().message.contains(expected),
                "{line:?}"
            );
        }

        let (pattern, _) = parse(&["INVOKESTATIC", "a.c"]);
        assert_eq!(pattern.name.unwrap().name, "c");
        assert!(pattern.desc.is_none());
    }

    #[test]
    fn dotted_owner_is_reported() {
        let (pattern, diagnostics) = parse(&["INVOKESTATIC", "java.lang.String.valueOf(I)V"]);
        assert_eq!(diagnostics.error_count(), 1);
        assert_eq!(pattern.owner.unwrap().name, "java");
        assert_eq!(pattern.name.unwrap().name, "lang.String.valueOf");
    }

    #[test]
    fn identical_fixed_descriptor_always_matches() {
        let realms = RealmTable::default();
        let mut stack = FrameStack::new(&realms);
        stack.push();

        for desc in ["()V", "(I[[JLa/b;)La/c;", "([La/b;D)[I"] {
            let target = format!("x/Y.m{desc}");
            let (pattern, diagnostics) = parse(&["INVOKESTATIC", &target]);
            assert!(diagnostics.is_empty());
            let insn = Instruction::method(Opcode::Invokestatic, "x/Y", "m", desc);
            assert_eq!(pattern.matches(&insn, &mut stack).unwrap(), MatchOutcome::Break);
        }
    }

    #[test]
    fn descriptor_counts_and_returns() {
        let realms = RealmTable::default();
        let mut stack = FrameStack::new(&realms);
        stack.push();

        let (pattern, _) = parse(&["INVOKESTATIC", "x/Y.m(I)V"]);
        let fewer = Instruction::method(Opcode::Invokestatic, "x/Y", "m", "()V");
        let more = Instruction::method(Opcode::Invokestatic, "x/Y", "m", "(II)V");
        let returns = Instruction::method(Opcode::Invokestatic, "x/Y", "m", "(I)I");
        assert!(!pattern.matches(&fewer, &mut stack).unwrap().is_match());
        assert!(!pattern.matches(&more, &mut stack).unwrap().is_match());
        assert!(!pattern.matches(&returns, &mut stack).unwrap().is_match());
    }

    #[test]
    fn name_inference_goes_through_realm() {
        let model = ProgramModel::new(vec![
            class("a/A").with_method(method("m", "()V", AccessFlags::PUBLIC)),
            class("a/B").with_super("a/A"),
        ]);
        let realms = RealmTable::build(&model);
        let mut stack = FrameStack::new(&realms);
        stack.push();

        let (pattern, _) = parse(&["INVOKEVIRTUAL", "a/B.run?()V"]);
        let insn = Instruction::method(Opcode::Invokevirtual, "a/B", "m", "()V");
        assert_eq!(pattern.matches(&insn, &mut stack).unwrap(), MatchOutcome::Break);
        assert_eq!(stack.lookup_method("a/A", "m", "()V"), Some("run"));

        let (collides, _) = parse(&["INVOKEVIRTUAL", "a/B.walk?()V"]);
        assert!(!collides.matches(&insn, &mut stack).unwrap().is_match());

        let (fixed, _) = parse(&["INVOKEVIRTUAL", "a/A.run()V"]);
        let on_parent = Instruction::method(Opcode::Invokevirtual, "a/A", "m", "()V");
        assert_eq!(fixed.matches(&on_parent, &mut stack).unwrap(), MatchOutcome::Break);
    }
}
