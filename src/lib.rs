//! SLR(1) parser generator.
//!
//! A [`Grammar`] is turned into the canonical collection of LR(0) item
//! sets and SLR(1) ACTION/GOTO tables using FOLLOW sets. The resulting
//! [`Parser`] runs the tables over a token sequence and records each step.
//!
//! ```
//! let grammar = slrgen::Grammar::from_text("
//!   E -> E + T | T
//!   T -> T * F | F
//!   F -> ( E ) | id
//! ").unwrap();
//! let parser = slrgen::build(grammar).unwrap();
//!
//! assert!(parser.parse_str("id + id * id").accepted());
//! assert!(!parser.parse_str("id + +").accepted());
//! ```

pub mod bnf;
pub mod error;
pub mod grammar;
pub mod parser;
pub mod report;

pub use error::{Error, GrammarError, ParseError};
pub use grammar::{grammar, Grammar};
pub use parser::Parser;

pub fn build(grammar: Grammar) -> Result<Parser, Error> {
  Parser::new(grammar)
}

/// Reads a grammar from `LHS -> seq | seq` lines and builds its parser.
pub fn build_from_text(text: &str) -> Result<Parser, Error> {
  build(Grammar::from_text(text)?)
}
