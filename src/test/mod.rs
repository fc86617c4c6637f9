//! Program model factories shared by the unit tests.

use crate::model::{AccessFlags, ClassNode, Instruction, MethodNode, Opcode, ProgramModel};

/// A class extending `java/lang/Object`.
pub fn class(name: &str) -> ClassNode {
    ClassNode::new(name)
}

/// A method without a body.
pub fn method(name: &str, desc: &str, access: AccessFlags) -> MethodNode {
    MethodNode::new(name, desc, access)
}

/// A public method with a body.
pub fn body(name: &str, desc: &str, instructions: Vec<Instruction>) -> MethodNode {
    MethodNode::new(name, desc, AccessFlags::PUBLIC).with_instructions(instructions)
}

/// `ALOAD 0; RETURN`
pub fn trivial_body() -> Vec<Instruction> {
    vec![
        Instruction::var(Opcode::Aload, 0),
        Instruction::simple(Opcode::Return),
    ]
}

/// A model with one class `a/b` declaring `x()V` as `ALOAD 0; RETURN`.
pub fn single_method_model() -> ProgramModel {
    ProgramModel::new(vec![class("a/b").with_method(body("x", "()V", trivial_body()))])
}
