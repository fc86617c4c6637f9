//! Reading softmap text: tokens, source locations and the lexer.
//!
//! # Key Components
//!
//! - [`Lexer`] - Turns a window of text into a [`Token`] stream
//! - [`Token`] / [`TokenKind`] - Position-tagged slices of the text
//! - [`Location`] / [`Span`] - Where a token or diagnostic sits in the text
//! - [`ParseOptions`] - Window, start position and tab width

mod lexer;
mod options;
mod token;

pub use lexer::Lexer;
pub use options::{ParseOptions, DEFAULT_TAB_WIDTH};
pub use token::{Location, Span, Token, TokenKind};
