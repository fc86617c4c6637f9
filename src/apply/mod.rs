//! Applying parsed softmap expressions to a program model.
//!
//! Expressions are applied one after another. For each expression the driver selects the
//! candidate methods its header allows, binds the inferable parts of the header and walks each
//! candidate's instructions against the expression body. Every candidate works in a speculative
//! frame of the [`crate::mapping::FrameStack`]; the frame of the single matching candidate is
//! committed, all others are dropped. An expression matched by two candidates commits nothing.
//!
//! Later expressions see the names committed by earlier ones, so fixed names in later
//! expressions may refer to names inferred before.

mod driver;
mod options;
mod walker;

pub(crate) use driver::apply;
pub use driver::ApplicationResult;
pub use options::ApplyOptions;
