use std::collections::BTreeSet;
use crate::grammar::{Grammar, NontermId, Symbol};

/// A dotted production `nonterm -> prefix . suffix`, where the production
/// is `grammar.production(nonterm, prod)` split at `dot`.
///
/// Alternatives of a nonterminal are distinct, so two items are equal iff
/// they have the same left-hand side, prefix and suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Item {
  pub nonterm: NontermId,
  pub prod: u16,
  pub dot: u16,
}

/// A set of LR(0) items, ordered so that equal sets compare and hash equal.
pub type ItemSet = BTreeSet<Item>;

impl Item {
  pub fn start(nonterm: NontermId, prod: u16) -> Self {
    Item {
      nonterm,
      prod,
      dot: 0,
    }
  }

  pub fn prefix<'g>(&self, grammar: &'g Grammar) -> &'g [Symbol] {
    &grammar.production(self.nonterm, self.prod).symbols[..self.dot as usize]
  }

  pub fn suffix<'g>(&self, grammar: &'g Grammar) -> &'g [Symbol] {
    &grammar.production(self.nonterm, self.prod).symbols[self.dot as usize..]
  }

  /// The symbol right after the dot.
  pub fn next(&self, grammar: &Grammar) -> Option<Symbol> {
    self.suffix(grammar).first().copied()
  }

  pub fn is_complete(&self, grammar: &Grammar) -> bool {
    self.suffix(grammar).is_empty()
  }

  fn advance(self) -> Self {
    Item {
      dot: self.dot + 1,
      ..self
    }
  }
}

/// Adds `B -> . γ` for every item with the dot before a nonterminal `B`
/// and every production `γ` of `B`, until nothing more can be added.
pub fn closure(
  grammar: &Grammar,
  items: ItemSet,
) -> ItemSet {
  let mut closure = items;
  let mut pending = closure.iter().copied().collect::<Vec<_>>();

  while let Some(item) = pending.pop() {
    if let Some(Symbol::Nonterm(nonterm)) = item.next(grammar) {
      for prod in 0..grammar.productions(nonterm).len() {
        let new_item = Item::start(nonterm, prod as u16);
        if closure.insert(new_item) {
          pending.push(new_item);
        }
      }
    }
  }

  closure
}

/// Moves the dot over `symbol` in every item expecting it and closes the
/// result. An empty set means there is no transition on `symbol`.
pub fn goto(
  grammar: &Grammar,
  items: &ItemSet,
  symbol: Symbol,
) -> ItemSet {
  let kernel = items.iter()
    .filter(|item| item.next(grammar) == Some(symbol))
    .map(|item| item.advance())
    .collect();
  closure(grammar, kernel)
}
