use indexmap::IndexMap;
use crate::error::Error;
use crate::grammar::{Grammar, NontermId, Symbol, TermId};
use super::item::{goto, ItemSet};
use super::state::Automaton;
use super::token_set::TermSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
  Shift(u32),
  /// Reduce by `grammar.production(nonterm, prod)`.
  Reduce {
    nonterm: NontermId,
    prod: u16,
  },
  Accept,
}

/// Two different actions computed for the same entry. The later one is
/// kept in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
  pub state: u32,
  pub term: TermId,
  pub kept: Action,
  pub replaced: Action,
}

/// SLR(1) ACTION and GOTO tables, indexed by state.
#[derive(Debug, Clone)]
pub struct Table {
  pub(crate) actions: Vec<IndexMap<TermId, Action>>,
  pub(crate) gotos: Vec<IndexMap<NontermId, u32>>,
  conflicts: Vec<Conflict>,
}

impl Table {
  pub fn num_states(&self) -> usize {
    self.actions.len()
  }

  pub fn action(&self, state: u32, term: TermId) -> Option<Action> {
    self.actions.get(state as usize)?.get(&term).copied()
  }

  pub fn goto(&self, state: u32, nonterm: NontermId) -> Option<u32> {
    self.gotos.get(state as usize)?.get(&nonterm).copied()
  }

  pub fn actions(&self, state: u32) -> impl Iterator<Item = (TermId, Action)> + '_ {
    self.actions.get(state as usize)
      .into_iter()
      .flatten()
      .map(|(&term, &action)| (term, action))
  }

  pub fn gotos(&self, state: u32) -> impl Iterator<Item = (NontermId, u32)> + '_ {
    self.gotos.get(state as usize)
      .into_iter()
      .flatten()
      .map(|(&nonterm, &target)| (nonterm, target))
  }

  /// Entries that were computed more than once with different actions,
  /// in the order they were overwritten.
  pub fn conflicts(&self) -> &[Conflict] {
    &self.conflicts
  }

  pub fn is_slr1(&self) -> bool {
    self.conflicts.is_empty()
  }

  fn set_action(&mut self, state: u32, term: TermId, action: Action) {
    let replaced = self.actions[state as usize].insert(term, action);
    if let Some(replaced) = replaced {
      if replaced != action {
        self.conflicts.push(Conflict {
          state,
          term,
          kept: action,
          replaced,
        });
      }
    }
  }
}

pub(crate) fn gen_table(
  grammar: &Grammar,
  automaton: &Automaton,
  follow: &[TermSet],
) -> Result<Table, Error> {
  let mut table = Table {
    actions: vec![IndexMap::new(); automaton.len()],
    gotos: vec![IndexMap::new(); automaton.len()],
    conflicts: vec![],
  };

  for (state, items) in automaton.states() {
    for item in items {
      match item.next(grammar) {
        Some(sym @ Symbol::Term(term)) => {
          let target = find_target(grammar, automaton, state, items, sym)?;
          table.set_action(state, term, Action::Shift(target));
        }
        Some(Symbol::Nonterm(_)) => {}
        None if item.nonterm == grammar.augmented_start() => {
          table.set_action(state, TermId::END, Action::Accept);
        }
        None => {
          for term in &follow[item.nonterm.0 as usize] {
            table.set_action(state, term, Action::Reduce {
              nonterm: item.nonterm,
              prod: item.prod,
            });
          }
        }
      }
    }

    for nonterm in grammar.nonterms() {
      let sym = Symbol::Nonterm(nonterm);
      if goto(grammar, items, sym).is_empty() {
        continue;
      }
      let target = find_target(grammar, automaton, state, items, sym)?;
      table.gotos[state as usize].insert(nonterm, target);
    }
  }

  for conflict in &table.conflicts {
    log::warn!(
      "conflict in state {} on `{}`: {:?} replaces {:?}",
      conflict.state,
      grammar.term_name(conflict.term),
      conflict.kept,
      conflict.replaced);
  }
  log::debug!(
    "built tables: {} states, {} conflicts",
    table.num_states(),
    table.conflicts.len());

  Ok(table)
}

fn find_target(
  grammar: &Grammar,
  automaton: &Automaton,
  state: u32,
  items: &ItemSet,
  sym: Symbol,
) -> Result<u32, Error> {
  automaton.find(&goto(grammar, items, sym))
    .ok_or_else(|| Error::UnreachableGotoTarget {
      state,
      symbol: grammar.name(sym).to_owned(),
    })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::grammar::grammar;
  use crate::grammar::tests::{expr, ll_expr};
  use crate::parser::{sets::gen_follow, state::gen_states};
  use pretty_assertions::assert_eq;

  fn build(g: &Grammar) -> (Automaton, Table) {
    let automaton = gen_states(g);
    let table = gen_table(g, &automaton, &gen_follow(g)).unwrap();
    (automaton, table)
  }

  fn term(g: &Grammar, name: &str) -> TermId {
    g.term(name).unwrap()
  }

  #[test]
  fn expr_table() {
    let g = expr();
    let (automaton, table) = build(&g);

    assert!(table.is_slr1());
    assert_eq!(table.num_states(), automaton.len());

    let e = g.nonterm("E").unwrap();
    let after_e = table.goto(0, e).unwrap();
    assert_eq!(table.action(after_e, TermId::END), Some(Action::Accept));
    assert!(matches!(table.action(after_e, term(&g, "+")), Some(Action::Shift(_))));

    let after_id = match table.action(0, term(&g, "id")) {
      Some(Action::Shift(state)) => state,
      action => panic!("unexpected {:?}", action),
    };
    let f = g.nonterm("F").unwrap();
    for name in &["+", "*", ")", "$"] {
      assert_eq!(
        table.action(after_id, term(&g, name)),
        Some(Action::Reduce { nonterm: f, prod: 1 }));
    }
    assert_eq!(table.action(after_id, term(&g, "(")), None);
  }

  #[test]
  fn goto_only_on_nonterminals() {
    let g = expr();
    let (_, table) = build(&g);

    let targets = table.gotos(0)
      .map(|(nonterm, _)| g.nonterm_name(nonterm))
      .collect::<Vec<_>>();
    assert_eq!(targets, vec!["E", "T", "F"]);
  }

  #[test]
  fn epsilon_reduce() {
    let g = ll_expr();
    let (_, table) = build(&g);
    let t = g.nonterm("T'").unwrap();

    assert!(table.is_slr1());
    let reduces_on_end = (0..table.num_states() as u32)
      .filter(|&state| {
        table.action(state, TermId::END) == Some(Action::Reduce { nonterm: t, prod: 1 })
      })
      .count();
    assert_eq!(reduces_on_end, 2);
  }

  #[test]
  fn conflict_keeps_later_action() {
    let g = grammar(&[("E", &["E + E", "id"])]).unwrap();
    let (_, table) = build(&g);
    let e = g.nonterm("E").unwrap();
    let plus = term(&g, "+");

    assert!(!table.is_slr1());
    assert_eq!(table.conflicts().len(), 1);

    let conflict = &table.conflicts()[0];
    assert_eq!(conflict.term, plus);
    assert_eq!(conflict.kept, Action::Reduce { nonterm: e, prod: 0 });
    assert!(matches!(conflict.replaced, Action::Shift(_)));
    assert_eq!(table.action(conflict.state, plus), Some(conflict.kept));
  }
}
