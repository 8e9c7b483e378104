//! Parser for first-order sentences in text form.
//!
//! Example usage:
//!
//! ~~~
//! use formula_parse::{BinOp, Error, Sentence};
//!
//! let s = Sentence::parse_str("(A) => (B)")?;
//! assert!(matches!(s, Sentence::Bin(_, BinOp::Imp, _)));
//! # Ok::<_, Error>(())
//! ~~~
#![no_std]

extern crate alloc;

pub mod lex;
pub mod sentence;

pub use lex::Token;
pub use sentence::{BinOp, Error, Quant, Sentence, Term};

use logos::Logos;

pub fn lex(s: &str) -> impl Iterator<Item = Token<'_>> {
    Token::lexer(s).filter(|token| *token != Token::Space)
}
