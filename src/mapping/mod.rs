//! The transactional mapping store and the renaming table it exports.
//!
//! Matching a candidate method records the names it discovers into a speculative
//! [`MappingFrame`] on top of a [`FrameStack`]. A confirmed match is merged down towards the base
//! frame, a failed one is discarded without touching what was committed before. Once every
//! expression has been applied, [`FrameStack::export`] renders the base frame as a
//! [`MappingTable`].

mod frame;
mod stack;
mod table;

pub use frame::MappingFrame;
pub use stack::FrameStack;
pub use table::{MappingRow, MappingTable};
