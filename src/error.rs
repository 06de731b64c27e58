use thiserror::Error;

/// Reasons a rule set cannot form a grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
  #[error("grammar has no nonterminals")]
  NoNonterminals,

  #[error("nonterminal `{0}` has no productions")]
  NoProductions(String),

  #[error("production {index} of `{nonterm}` has no symbols (write `e` for an empty production)")]
  EmptyProduction {
    nonterm: String,
    index: usize,
  },

  #[error("`$` is reserved for the end of input, found in a production of `{0}`")]
  ReservedEndMarker(String),
}

/// Failure to build the parser tables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error(transparent)]
  Grammar(#[from] GrammarError),

  /// A non-empty `goto` result matched none of the automaton's states.
  /// This is a bug in the automaton construction, not in the input.
  #[error("goto from state {state} on `{symbol}` leads to no known state")]
  UnreachableGotoTarget {
    state: u32,
    symbol: String,
  },
}

/// Why a parse was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
  #[error("no action for state {state} on `{symbol}`")]
  NoAction {
    state: u32,
    symbol: String,
  },

  #[error("no goto for state {state} on `{nonterm}`")]
  NoGoto {
    state: u32,
    nonterm: String,
  },

  /// Conflicting entries made the reductions on `symbol` loop forever.
  #[error("reductions in state {state} on `{symbol}` never terminate")]
  ReductionCycle {
    state: u32,
    symbol: String,
  },
}
