//! Virtual dispatch realms.
//!
//! Renaming a method that is overridden elsewhere has to rename every override with it, or
//! dispatch breaks. A [`MethodRealm`] groups all classes whose `(class, name, desc)` resolve to one
//! virtual slot, following JVM override rules: static and private methods never override, public
//! and protected methods are overridden from anywhere below the declaring class, package-private
//! methods only from the same package unless an override in that package widens the visibility.
//!
//! The [`RealmTable`] is computed once per program model and only read afterwards.

mod closure;
mod realm;

pub use closure::Descendants;
pub use realm::{MethodRealm, RealmTable};
