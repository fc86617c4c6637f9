use std::fmt;

use serde::{Deserialize, Serialize};

/// An owner class, member name and member descriptor triple.
///
/// Identifies a method or a field, both as an instruction operand and as a key of the mapping
/// store. Equality, hashing and ordering are structural. Method descriptors start with `(`,
/// field descriptors never do.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberLocation {
    /// Internal name of the owner class, e.g. `java/lang/String`
    pub owner: String,
    /// Member name
    pub name: String,
    /// Member descriptor, e.g. `(I)V` or `Ljava/lang/String;`
    pub desc: String,
}

impl MemberLocation {
    /// Creates a new member location.
    pub fn new(owner: impl Into<String>, name: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            desc: desc.into(),
        }
    }

    /// Returns true if the descriptor is a method descriptor.
    #[must_use]
    pub fn is_method(&self) -> bool {
        self.desc.starts_with('(')
    }

    /// Returns the same member on a different owner.
    #[must_use]
    pub fn with_owner(&self, owner: &str) -> Self {
        Self::new(owner, self.name.as_str(), self.desc.as_str())
    }

    /// Renders the location as `owner.name` immediately followed by the descriptor, the way
    /// method locations are written in softmap text.
    #[must_use]
    pub fn to_compact(&self) -> String {
        format!("{}.{}{}", self.owner, self.name, self.desc)
    }
}

impl fmt::Display for MemberLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{} {}", self.owner, self.name, self.desc)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn structural_identity() {
        let a = MemberLocation::new("a/b", "c", "()V");
        let b = MemberLocation::new(String::from("a/b"), "c", "()V");
        assert_eq!(a, b);
        assert_ne!(a, a.with_owner("a/c"));

        let set: BTreeSet<_> = [b.clone(), a.clone(), a.with_owner("a/a")].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert_eq!(set.first().map(|l| l.owner.as_str()), Some("a/a"));
    }

    #[test]
    fn rendering() {
        let location = MemberLocation::new("a/b", "c", "(I)V");
        assert!(location.is_method());
        assert_eq!(location.to_string(), "a/b.c (I)V");
        assert_eq!(location.to_compact(), "a/b.c(I)V");
        assert!(!MemberLocation::new("a/b", "f", "I").is_method());
    }
}
