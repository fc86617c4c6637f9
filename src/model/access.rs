//! Method access flags and the visibility classification used for override resolution.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// JVM method access flags (`access_flags` of a `method_info` structure).
    ///
    /// In JSON program models the flags are written by name, e.g. `"PUBLIC | STATIC"`, or as
    /// hexadecimal, e.g. `"0x9"`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct AccessFlags: u16 {
        /// Declared public
        const PUBLIC = 0x0001;
        /// Declared private
        const PRIVATE = 0x0002;
        /// Declared protected
        const PROTECTED = 0x0004;
        /// Declared static
        const STATIC = 0x0008;
        /// Declared final
        const FINAL = 0x0010;
        /// Declared synchronized
        const SYNCHRONIZED = 0x0020;
        /// A bridge method, generated by the compiler
        const BRIDGE = 0x0040;
        /// Declared with a variable number of arguments
        const VARARGS = 0x0080;
        /// Declared native
        const NATIVE = 0x0100;
        /// Declared abstract
        const ABSTRACT = 0x0400;
        /// Declared strictfp
        const STRICT = 0x0800;
        /// Not present in the source code
        const SYNTHETIC = 0x1000;
    }
}

/// How far a method is visible, as far as overriding is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// `ACC_PUBLIC`
    Public,
    /// `ACC_PROTECTED`
    Protected,
    /// `ACC_PRIVATE`
    Private,
    /// No visibility flag: visible within the declaring package only
    Package,
}

impl AccessFlags {
    /// Classifies the visibility flags. `PUBLIC` wins over the others if several are set.
    #[must_use]
    pub fn visibility(self) -> Visibility {
        if self.contains(AccessFlags::PUBLIC) {
            Visibility::Public
        } else if self.contains(AccessFlags::PROTECTED) {
            Visibility::Protected
        } else if self.contains(AccessFlags::PRIVATE) {
            Visibility::Private
        } else {
            Visibility::Package
        }
    }

    /// Returns true if `STATIC` is set.
    #[must_use]
    pub fn is_static(self) -> bool {
        self.contains(AccessFlags::STATIC)
    }

    /// Returns true if the method can be overridden from other packages.
    #[must_use]
    pub fn is_widely_visible(self) -> bool {
        self.intersects(AccessFlags::PUBLIC | AccessFlags::PROTECTED)
    }

    /// Returns true if the method never takes part in virtual dispatch.
    #[must_use]
    pub fn is_non_virtual(self) -> bool {
        self.intersects(AccessFlags::STATIC | AccessFlags::PRIVATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visibility_classification() {
        assert_eq!(AccessFlags::PUBLIC.visibility(), Visibility::Public);
        assert_eq!(
            (AccessFlags::PROTECTED | AccessFlags::FINAL).visibility(),
            Visibility::Protected
        );
        assert_eq!(AccessFlags::PRIVATE.visibility(), Visibility::Private);
        assert_eq!(AccessFlags::empty().visibility(), Visibility::Package);
        assert_eq!(AccessFlags::STATIC.visibility(), Visibility::Package);
    }

    #[test]
    fn dispatch_helpers() {
        assert!((AccessFlags::PUBLIC | AccessFlags::STATIC).is_non_virtual());
        assert!(AccessFlags::PRIVATE.is_non_virtual());
        assert!(!AccessFlags::PUBLIC.is_non_virtual());
        assert!(AccessFlags::PROTECTED.is_widely_visible());
        assert!(!AccessFlags::empty().is_widely_visible());
        assert!(AccessFlags::STATIC.is_static());
    }

    #[test]
    fn raw_values() {
        assert_eq!(AccessFlags::from_bits_truncate(0x0009), AccessFlags::PUBLIC | AccessFlags::STATIC);
        assert_eq!(AccessFlags::SYNTHETIC.bits(), 0x1000);
    }

    #[test]
    fn serde_text_format() {
        let flags: AccessFlags = serde_json::from_str("\"PUBLIC | STATIC\"").unwrap();
        assert_eq!(flags, AccessFlags::PUBLIC | AccessFlags::STATIC);

        let json = serde_json::to_string(&AccessFlags::PROTECTED).unwrap();
        assert_eq!(json, "\"PROTECTED\"");
    }
}
