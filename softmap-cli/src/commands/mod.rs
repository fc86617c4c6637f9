pub mod apply;
pub mod check;
pub mod common;
pub mod realms;
