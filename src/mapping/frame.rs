use std::collections::BTreeMap;

use crate::model::MemberLocation;

/// One layer of the mapping store: source to destination names for classes, fields and methods.
///
/// Method keys are normalized to the declaring class of their realm before they reach a frame;
/// the frame itself stores what it is given. All maps are ordered so that exporting a frame is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingFrame {
    classes: BTreeMap<String, String>,
    fields: BTreeMap<MemberLocation, String>,
    methods: BTreeMap<MemberLocation, String>,
}

impl MappingFrame {
    /// Creates an empty frame.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the frame holds no mapping.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.fields.is_empty() && self.methods.is_empty()
    }

    /// Total number of mappings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len() + self.fields.len() + self.methods.len()
    }

    /// Destination name of a class.
    #[must_use]
    pub fn class(&self, src: &str) -> Option<&str> {
        self.classes.get(src).map(String::as_str)
    }

    /// Destination name of a field.
    #[must_use]
    pub fn field(&self, key: &MemberLocation) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Destination name of a method, keyed by its realm's declaring class.
    #[must_use]
    pub fn method(&self, key: &MemberLocation) -> Option<&str> {
        self.methods.get(key).map(String::as_str)
    }

    pub(crate) fn insert_class(&mut self, src: String, dst: String) {
        self.classes.insert(src, dst);
    }

    pub(crate) fn insert_field(&mut self, key: MemberLocation, dst: String) {
        self.fields.insert(key, dst);
    }

    pub(crate) fn insert_method(&mut self, key: MemberLocation, dst: String) {
        self.methods.insert(key, dst);
    }

    /// Moves every mapping of `inner` into this frame, overwriting on conflict.
    pub fn absorb(&mut self, inner: MappingFrame) {
        self.classes.extend(inner.classes);
        self.fields.extend(inner.fields);
        self.methods.extend(inner.methods);
    }

    /// Class mappings in ascending source order.
    pub fn classes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.classes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Field mappings in ascending key order.
    pub fn fields(&self) -> impl Iterator<Item = (&MemberLocation, &str)> {
        self.fields.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// Method mappings in ascending key order.
    pub fn methods(&self) -> impl Iterator<Item = (&MemberLocation, &str)> {
        self.methods.iter().map(|(k, v)| (k, v.as_str()))
    }
}
