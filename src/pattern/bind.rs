//! Binding name and type patterns against concrete names.
//!
//! Fixed patterns compare against the destination name of the concrete value, which is its
//! source name while it is unmapped. Inferable patterns record a mapping to the pattern text if
//! the concrete value is unmapped, accept an existing mapping equal to the pattern text, and fail
//! with a collision otherwise.

use crate::{
    mapping::FrameStack,
    model::{object_name, split_array},
    pattern::{
        outcome::require_match,
        types::{ElementPattern, NamePattern, TypePattern},
        MatchOutcome,
    },
    Result,
};

/// How a name pattern relates to a concrete name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Binding {
    /// The pattern agrees with the current state
    Holds,
    /// The concrete name is unmapped; the pattern name is to be recorded
    Record,
    /// The pattern contradicts the current state
    Rejected(String),
}

/// Decides how `pattern` binds to `src`, currently mapped to `current`.
pub(crate) fn decide(pattern: &NamePattern, src: &str, current: Option<&str>, what: &str) -> Binding {
    let dst = current.unwrap_or(src);
    if pattern.is_fixed() {
        if pattern.name == dst {
            Binding::Holds
        } else if dst != src {
            Binding::Rejected(format!(
                "{what} mismatch (expected '{}', got '{src}' mapped to '{dst}')",
                pattern.name
            ))
        } else {
            Binding::Rejected(format!(
                "{what} mismatch (expected '{}', got '{src}')",
                pattern.name
            ))
        }
    } else {
        match current {
            None => Binding::Record,
            Some(dst) if dst == pattern.name => Binding::Holds,
            Some(dst) => Binding::Rejected(format!(
                "{what} mismatch (mapping collision: '{src}' is already mapped to '{dst}')"
            )),
        }
    }
}

/// Binds a class name pattern to the concrete class `src`.
pub(crate) fn bind_class(
    stack: &mut FrameStack<'_>,
    pattern: &NamePattern,
    src: &str,
    what: &str,
) -> Result<MatchOutcome> {
    if pattern.infer && src.starts_with('[') {
        return Ok(MatchOutcome::no_match(
            format!("{what} mismatch (array type '{src}' cannot be renamed)"),
            pattern.location,
        ));
    }

    match decide(pattern, src, stack.lookup_class(src), what) {
        Binding::Holds => Ok(MatchOutcome::Break),
        Binding::Record => {
            stack.map_class(src, &pattern.name)?;
            Ok(MatchOutcome::Break)
        }
        Binding::Rejected(reason) => Ok(MatchOutcome::no_match(reason, pattern.location)),
    }
}

/// Binds a field name pattern to the concrete field `owner.name desc`.
pub(crate) fn bind_field(
    stack: &mut FrameStack<'_>,
    pattern: &NamePattern,
    owner: &str,
    name: &str,
    desc: &str,
) -> Result<MatchOutcome> {
    match decide(pattern, name, stack.lookup_field(owner, name, desc), "Field name") {
        Binding::Holds => Ok(MatchOutcome::Break),
        Binding::Record => {
            stack.map_field(owner, name, desc, &pattern.name)?;
            Ok(MatchOutcome::Break)
        }
        Binding::Rejected(reason) => Ok(MatchOutcome::no_match(reason, pattern.location)),
    }
}

/// Binds a method name pattern to the concrete method `owner.name desc`, through its realm.
pub(crate) fn bind_method(
    stack: &mut FrameStack<'_>,
    pattern: &NamePattern,
    owner: &str,
    name: &str,
    desc: &str,
) -> Result<MatchOutcome> {
    match decide(pattern, name, stack.lookup_method(owner, name, desc), "Method name") {
        Binding::Holds => Ok(MatchOutcome::Break),
        Binding::Record => {
            stack.map_method(owner, name, desc, &pattern.name)?;
            Ok(MatchOutcome::Break)
        }
        Binding::Rejected(reason) => Ok(MatchOutcome::no_match(reason, pattern.location)),
    }
}

/// Binds one type pattern to the concrete field type `ty`: array depth first, then the element
/// kind, then the class name of object elements.
pub(crate) fn bind_type(
    stack: &mut FrameStack<'_>,
    pattern: &TypePattern,
    ty: &str,
    what: &str,
) -> Result<MatchOutcome> {
    let (depth, element) = split_array(ty);
    if depth != pattern.array_depth {
        return Ok(MatchOutcome::no_match(
            format!(
                "{what} array depth mismatch (expected {}, got '{ty}')",
                pattern.array_depth
            ),
            pattern.location,
        ));
    }

    match (&pattern.element, object_name(element)) {
        (ElementPattern::Primitive(expected), None) => {
            if element.starts_with(*expected) && element.len() == 1 {
                Ok(MatchOutcome::Break)
            } else {
                Ok(MatchOutcome::no_match(
                    format!("{what} type mismatch (expected '{pattern}', got '{ty}')"),
                    pattern.location,
                ))
            }
        }
        (ElementPattern::Object(name), Some(class)) => {
            require_match!(bind_class(stack, name, class, what)?);
            Ok(MatchOutcome::Break)
        }
        _ => Ok(MatchOutcome::no_match(
            format!("{what} computational type mismatch (expected '{pattern}', got '{ty}')"),
            pattern.location,
        )),
    }
}
