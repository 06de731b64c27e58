use indexmap::IndexSet;
use crate::grammar::Grammar;
use super::item::{closure, goto, Item, ItemSet};

/// The canonical collection of LR(0) item sets. A state is the index of
/// its item set, in discovery order; state 0 is the initial state.
///
/// The number of states can grow exponentially with the size of the
/// grammar.
#[derive(Debug, Clone)]
pub struct Automaton {
  states: IndexSet<ItemSet>,
}

impl Automaton {
  pub fn len(&self) -> usize {
    self.states.len()
  }

  pub fn is_empty(&self) -> bool {
    self.states.is_empty()
  }

  pub fn state(&self, state: u32) -> Option<&ItemSet> {
    self.states.get_index(state as usize)
  }

  pub fn states(&self) -> impl Iterator<Item = (u32, &ItemSet)> {
    self.states.iter().enumerate().map(|(i, items)| (i as u32, items))
  }

  /// Finds the state whose item set equals `items`.
  pub fn find(&self, items: &ItemSet) -> Option<u32> {
    self.states.get_index_of(items).map(|i| i as u32)
  }
}

/// Builds the canonical collection from `closure({S' -> . S})` by taking
/// `goto` on every grammar symbol from every state until no new item set
/// turns up.
pub(crate) fn gen_states(
  grammar: &Grammar,
) -> Automaton {
  let start = Item::start(grammar.augmented_start(), 0);
  let mut states = IndexSet::new();
  states.insert(closure(grammar, ItemSet::from([start])));

  let mut i = 0;
  while i < states.len() {
    for &sym in grammar.symbols() {
      let next = match states.get_index(i) {
        Some(items) => goto(grammar, items, sym),
        None => break,
      };
      if !next.is_empty() {
        states.insert(next);
      }
    }
    i += 1;
  }

  log::debug!("canonical collection has {} states", states.len());

  Automaton {
    states,
  }
}
