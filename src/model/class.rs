//! Classes, methods and the program model handed to the application driver.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::model::{access::AccessFlags, insn::Instruction, member::MemberLocation};

/// A method declared by a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodNode {
    /// Method name
    pub name: String,
    /// Method descriptor, e.g. `(ILjava/lang/String;)V`
    pub desc: String,
    /// Access flags
    #[serde(default)]
    pub access: AccessFlags,
    /// The method body in order; empty for abstract and native methods
    #[serde(default)]
    pub instructions: Vec<Instruction>,
}

impl MethodNode {
    /// Creates a method without instructions.
    pub fn new(name: impl Into<String>, desc: impl Into<String>, access: AccessFlags) -> Self {
        Self {
            name: name.into(),
            desc: desc.into(),
            access,
            instructions: Vec::new(),
        }
    }

    /// Replaces the method body.
    #[must_use]
    pub fn with_instructions(mut self, instructions: Vec<Instruction>) -> Self {
        self.instructions = instructions;
        self
    }
}

/// A class or interface of the program model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassNode {
    /// Internal name, e.g. `a/b`
    pub name: String,
    /// Internal name of the superclass; `None` only for `java/lang/Object` and module infos
    #[serde(default)]
    pub super_name: Option<String>,
    /// Internal names of the directly implemented interfaces
    #[serde(default)]
    pub interfaces: Vec<String>,
    /// Declared methods in declaration order
    #[serde(default)]
    pub methods: Vec<MethodNode>,
}

impl ClassNode {
    /// Creates a class extending `java/lang/Object` without methods.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            super_name: Some("java/lang/Object".to_string()),
            interfaces: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Sets the superclass.
    #[must_use]
    pub fn with_super(mut self, super_name: impl Into<String>) -> Self {
        self.super_name = Some(super_name.into());
        self
    }

    /// Adds a directly implemented interface.
    #[must_use]
    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    /// Adds a method.
    #[must_use]
    pub fn with_method(mut self, method: MethodNode) -> Self {
        self.methods.push(method);
        self
    }

    /// The package part of the name: everything before the last `/`, or `""`.
    #[must_use]
    pub fn package(&self) -> &str {
        package_of(&self.name)
    }

    /// Looks up a declared method by name and descriptor.
    #[must_use]
    pub fn method(&self, name: &str, desc: &str) -> Option<&MethodNode> {
        self.methods
            .iter()
            .find(|m| m.name == name && m.desc == desc)
    }

    /// The location of one of this class's methods.
    #[must_use]
    pub fn location_of(&self, method: &MethodNode) -> MemberLocation {
        MemberLocation::new(self.name.as_str(), method.name.as_str(), method.desc.as_str())
    }

    /// Iterates over the direct supertypes: the superclass, then the interfaces.
    pub fn supertypes(&self) -> impl Iterator<Item = &str> {
        self.super_name
            .as_deref()
            .into_iter()
            .chain(self.interfaces.iter().map(String::as_str))
    }
}

/// The package part of an internal class name.
#[must_use]
pub fn package_of(name: &str) -> &str {
    name.rfind('/').map_or("", |slash| &name[..slash])
}

/// An ordered list of classes, indexed by name.
///
/// Stands for the output of a bytecode reading library: the classes the softmap document is
/// applied to. In JSON a program model is written as the plain array of its classes.
///
/// # Example
///
/// ```rust
/// use softmap::model::{AccessFlags, ClassNode, MethodNode, ProgramModel};
///
/// let model = ProgramModel::new(vec![
///     ClassNode::new("a/b").with_method(MethodNode::new("x", "()V", AccessFlags::PUBLIC)),
/// ]);
/// assert!(model.class("a/b").is_some());
/// assert_eq!(model.method_count(), 1);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<ClassNode>", into = "Vec<ClassNode>")]
pub struct ProgramModel {
    classes: Vec<ClassNode>,
    index: FxHashMap<String, usize>,
}

impl ProgramModel {
    /// Creates a model from classes in their original order.
    ///
    /// If two classes share a name the later one is reachable by name, both are iterated.
    #[must_use]
    pub fn new(classes: Vec<ClassNode>) -> Self {
        let index = classes
            .iter()
            .enumerate()
            .map(|(i, class)| (class.name.clone(), i))
            .collect();
        Self { classes, index }
    }

    /// All classes, in model order.
    #[must_use]
    pub fn classes(&self) -> &[ClassNode] {
        &self.classes
    }

    /// Looks up a class by internal name.
    #[must_use]
    pub fn class(&self, name: &str) -> Option<&ClassNode> {
        self.index.get(name).map(|&i| &self.classes[i])
    }

    /// Returns true if the model declares a class with that name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns true if the model has no classes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Total number of declared methods.
    #[must_use]
    pub fn method_count(&self) -> usize {
        self.classes.iter().map(|c| c.methods.len()).sum()
    }
}

impl From<Vec<ClassNode>> for ProgramModel {
    fn from(classes: Vec<ClassNode>) -> Self {
        Self::new(classes)
    }
}

impl From<ProgramModel> for Vec<ClassNode> {
    fn from(model: ProgramModel) -> Self {
        model.classes
    }
}

impl FromIterator<ClassNode> for ProgramModel {
    fn from_iter<T: IntoIterator<Item = ClassNode>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
