use std::{collections::BTreeSet, sync::Arc};

use log::trace;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::{
    dispatch::closure::Descendants,
    model::{package_of, ClassNode, MemberLocation, MethodNode, ProgramModel},
};

/// A set of methods that share one renameable identity under virtual dispatch.
///
/// The declaring class is the topmost class introducing the method; the members are every class
/// whose `(class, name, desc)` resolves to the same slot, the declaring class included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodRealm {
    /// The class introducing the method
    pub declaring_class: String,
    /// Method name
    pub name: String,
    /// Method descriptor
    pub desc: String,
    /// All member classes, in ascending order
    pub members: BTreeSet<String>,
}

impl MethodRealm {
    fn new(declaring_class: &str, method: &MethodNode, members: BTreeSet<String>) -> Self {
        Self {
            declaring_class: declaring_class.to_string(),
            name: method.name.clone(),
            desc: method.desc.clone(),
            members,
        }
    }

    /// The location of the method on its declaring class.
    #[must_use]
    pub fn declaring_location(&self) -> MemberLocation {
        MemberLocation::new(self.declaring_class.as_str(), self.name.as_str(), self.desc.as_str())
    }

    /// Returns true if `class` belongs to the realm.
    #[must_use]
    pub fn contains(&self, class: &str) -> bool {
        self.members.contains(class)
    }
}

/// Maps every `(class, name, desc)` of a program model to its [`MethodRealm`].
///
/// Inherited methods are included: a public method declared on `A` is reachable through the
/// location of every subclass of `A`, unless a subclass is visited first and declares the
/// method on its own.
///
/// # Example
///
/// ```rust
/// use softmap::dispatch::RealmTable;
/// use softmap::model::{AccessFlags, ClassNode, MemberLocation, MethodNode, ProgramModel};
///
/// let model = ProgramModel::new(vec![
///     ClassNode::new("a/A").with_method(MethodNode::new("m", "()V", AccessFlags::PUBLIC)),
///     ClassNode::new("a/B").with_super("a/A"),
/// ]);
/// let realms = RealmTable::build(&model);
///
/// let realm = realms.get(&MemberLocation::new("a/B", "m", "()V")).unwrap();
/// assert_eq!(realm.declaring_class, "a/A");
/// assert_eq!(realm.members.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RealmTable {
    realms: FxHashMap<MemberLocation, Arc<MethodRealm>>,
}

impl RealmTable {
    /// Computes the realm of every method of `model`.
    ///
    /// Classes are visited from the most to the fewest descendants, ties broken by descending
    /// name, so supertypes are visited before their subtypes.
    #[must_use]
    pub fn build(model: &ProgramModel) -> Self {
        let descendants = Descendants::build(model.classes().iter().flat_map(|class| {
            class
                .supertypes()
                .map(move |supertype| (class.name.as_str(), supertype))
        }));

        let mut order: Vec<&ClassNode> = model.classes().iter().collect();
        order.sort_by(|a, b| {
            descendants
                .count(b.name.as_str())
                .cmp(&descendants.count(a.name.as_str()))
                .then_with(|| b.name.cmp(&a.name))
        });

        let mut table = Self::default();
        for class in order {
            for method in &class.methods {
                let location = class.location_of(method);
                if table.realms.contains_key(&location) {
                    continue;
                }

                let members = if method.access.is_non_virtual() {
                    BTreeSet::from([class.name.clone()])
                } else if method.access.is_widely_visible() {
                    std::iter::once(class.name.as_str())
                        .chain(descendants.of(class.name.as_str()))
                        .map(str::to_string)
                        .collect()
                } else {
                    Self::package_members(model, &descendants, class, method)
                };

                trace!(
                    "realm of {} spans {} class(es)",
                    location,
                    members.len()
                );
                table.register(MethodRealm::new(&class.name, method, members));
            }
        }

        table
    }

    /// Members of a package-private method: same-package descendants, plus everything below a
    /// same-package descendant that widens the method to public or protected.
    fn package_members(
        model: &ProgramModel,
        descendants: &Descendants<&str>,
        class: &ClassNode,
        method: &MethodNode,
    ) -> BTreeSet<String> {
        let package = class.package();
        let mut members = BTreeSet::from([class.name.clone()]);

        for descendant in descendants.of(class.name.as_str()) {
            if package_of(descendant) != package {
                continue;
            }
            members.insert(descendant.to_string());

            let widened = model
                .class(descendant)
                .and_then(|node| node.method(&method.name, &method.desc))
                .is_some_and(|redeclared| redeclared.access.is_widely_visible());
            if widened {
                members.extend(descendants.of(descendant).map(str::to_string));
            }
        }

        members
    }

    fn register(&mut self, realm: MethodRealm) {
        let realm = Arc::new(realm);
        for member in &realm.members {
            let key = MemberLocation::new(member.as_str(), realm.name.as_str(), realm.desc.as_str());
            self.realms.insert(key, Arc::clone(&realm));
        }
    }

    /// The realm of a method location, if the location belongs to the program model.
    #[must_use]
    pub fn get(&self, location: &MemberLocation) -> Option<&MethodRealm> {
        self.realms.get(location).map(Arc::as_ref)
    }

    /// The realm of `owner.name desc`.
    #[must_use]
    pub fn lookup(&self, owner: &str, name: &str, desc: &str) -> Option<&MethodRealm> {
        self.get(&MemberLocation::new(owner, name, desc))
    }

    /// Number of registered locations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.realms.len()
    }

    /// Returns true if no location is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.realms.is_empty()
    }

    /// Number of distinct realms.
    #[must_use]
    pub fn realm_count(&self) -> usize {
        self.realms
            .iter()
            .filter(|(location, realm)| location.owner == realm.declaring_class)
            .count()
    }

    /// All registered locations with their realms, sorted by location.
    #[must_use]
    pub fn entries(&self) -> Vec<(&MemberLocation, &MethodRealm)> {
        let mut entries: Vec<_> = self
            .realms
            .iter()
            .map(|(location, realm)| (location, realm.as_ref()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AccessFlags;
    use crate::test::{class, method};

    fn members(realm: &MethodRealm) -> Vec<&str> {
        realm.members.iter().map(String::as_str).collect()
    }

    #[test]
    fn public_methods_span_all_descendants() {
        let model = ProgramModel::new(vec![
            class("x/C").with_super("y/B"),
            class("y/B").with_super("a/A"),
            class("a/A").with_method(method("m", "()V", AccessFlags::PUBLIC)),
            class("a/Other").with_method(method("m", "()V", AccessFlags::PUBLIC)),
        ]);
        let realms = RealmTable::build(&model);

        for owner in ["a/A", "y/B", "x/C"] {
            let realm = realms.lookup(owner, "m", "()V").unwrap();
            assert_eq!(realm.declaring_class, "a/A");
            assert_eq!(members(realm), ["a/A", "x/C", "y/B"]);
        }
        assert_eq!(realms.lookup("a/Other", "m", "()V").unwrap().members.len(), 1);
        assert_eq!(realms.realm_count(), 2);
    }

    #[test]
    fn redeclaring_subclass_joins_the_realm() {
        let model = ProgramModel::new(vec![
            class("a/B")
                .with_super("a/A")
                .with_method(method("m", "()V", AccessFlags::PUBLIC)),
            class("a/A").with_method(method("m", "()V", AccessFlags::PROTECTED)),
        ]);
        let realms = RealmTable::build(&model);
        let realm = realms.lookup("a/B", "m", "()V").unwrap();
        assert_eq!(realm.declaring_class, "a/A");
    }

    #[test]
    fn static_and_private_are_singletons() {
        let model = ProgramModel::new(vec![
            class("a/A")
                .with_method(method("s", "()V", AccessFlags::PUBLIC | AccessFlags::STATIC))
                .with_method(method("p", "()V", AccessFlags::PRIVATE)),
            class("a/B")
                .with_super("a/A")
                .with_method(method("p", "()V", AccessFlags::PRIVATE)),
        ]);
        let realms = RealmTable::build(&model);

        assert_eq!(members(realms.lookup("a/A", "s", "()V").unwrap()), ["a/A"]);
        assert!(realms.lookup("a/B", "s", "()V").is_none());
        assert_eq!(realms.lookup("a/B", "p", "()V").unwrap().declaring_class, "a/B");
        assert_eq!(realms.lookup("a/A", "p", "()V").unwrap().declaring_class, "a/A");
    }

    #[test]
    fn package_private_stays_in_package() {
        let model = ProgramModel::new(vec![
            class("p/A").with_method(method("m", "()V", AccessFlags::empty())),
            class("p/B").with_super("p/A"),
            class("q/C").with_super("p/B").with_method(method("m", "()V", AccessFlags::empty())),
        ]);
        let realms = RealmTable::build(&model);

        assert_eq!(members(realms.lookup("p/A", "m", "()V").unwrap()), ["p/A", "p/B"]);
        let foreign = realms.lookup("q/C", "m", "()V").unwrap();
        assert_eq!(foreign.declaring_class, "q/C");
        assert_eq!(members(foreign), ["q/C"]);
    }

    #[test]
    fn widened_override_pulls_in_foreign_descendants() {
        let model = ProgramModel::new(vec![
            class("p/A").with_method(method("m", "()V", AccessFlags::empty())),
            class("p/D").with_super("p/A").with_method(method("m", "()V", AccessFlags::PUBLIC)),
            class("q/E").with_super("p/D"),
            class("r/F").with_super("q/E"),
        ]);
        let realms = RealmTable::build(&model);

        let realm = realms.lookup("r/F", "m", "()V").unwrap();
        assert_eq!(realm.declaring_class, "p/A");
        assert_eq!(members(realm), ["p/A", "p/D", "q/E", "r/F"]);
    }

    #[test]
    fn interfaces_propagate_to_implementors() {
        let model = ProgramModel::new(vec![
            class("a/I").with_method(method(
                "run",
                "()V",
                AccessFlags::PUBLIC | AccessFlags::ABSTRACT,
            )),
            class("b/Impl")
                .with_interface("a/I")
                .with_method(method("run", "()V", AccessFlags::PUBLIC)),
        ]);
        let realms = RealmTable::build(&model);
        assert_eq!(
            realms.lookup("b/Impl", "run", "()V").unwrap().declaring_class,
            "a/I"
        );
        assert_eq!(realms.len(), 2);
    }

    #[test]
    fn entries_are_sorted() {
        let model = ProgramModel::new(vec![
            class("b/B").with_method(method("m", "()V", AccessFlags::PUBLIC)),
            class("a/A").with_method(method("m", "()V", AccessFlags::PUBLIC)),
        ]);
        let realms = RealmTable::build(&model);
        let owners: Vec<_> = realms.entries().iter().map(|(l, _)| l.owner.as_str()).collect();
        assert_eq!(owners, ["a/A", "b/B"]);
    }
}
