use crate::error::Error;
use crate::grammar::{Grammar, NontermId};

pub mod engine;
pub mod item;
mod sets;
pub mod state;
pub mod table;
pub mod token_set;

use engine::Trace;
use state::Automaton;
use table::Table;
use token_set::TermSet;

/// SLR(1) tables for one grammar, with everything they were derived from.
/// Immutable once built; parses share it freely.
#[derive(Debug, Clone)]
pub struct Parser {
  grammar: Grammar,
  /// indexed by nonterminal
  follow: Vec<TermSet>,
  automaton: Automaton,
  table: Table,
}

impl Parser {
  pub(crate) fn new(grammar: Grammar) -> Result<Self, Error> {
    let follow = sets::gen_follow(&grammar);
    let automaton = state::gen_states(&grammar);
    let table = table::gen_table(&grammar, &automaton, &follow)?;

    Ok(Parser {
      grammar,
      follow,
      automaton,
      table,
    })
  }

  pub fn grammar(&self) -> &Grammar {
    &self.grammar
  }

  pub fn follow(&self, nonterm: NontermId) -> &TermSet {
    &self.follow[nonterm.0 as usize]
  }

  pub fn automaton(&self) -> &Automaton {
    &self.automaton
  }

  pub fn table(&self) -> &Table {
    &self.table
  }

  /// Runs the tables over `tokens`, followed by `$`.
  pub fn parse<I, S>(&self, tokens: I) -> Trace
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let input = tokens.into_iter().map(Into::into).collect();
    engine::run(&self.grammar, &self.table, input)
  }

  /// Parses whitespace-separated tokens.
  pub fn parse_str(&self, text: &str) -> Trace {
    self.parse(text.split_whitespace())
  }
}
