//! Text renderings of the structures built for a grammar.

use std::fmt::Write;
use crate::grammar::{Grammar, Symbol};
use crate::parser::Parser;
use crate::parser::engine::{Move, StackEntry, Trace, Verdict};
use crate::parser::item::Item;
use crate::parser::table::Action;

/// `A -> α . β`
pub fn item(grammar: &Grammar, item: &Item) -> String {
  let mut parts = vec![grammar.nonterm_name(item.nonterm), "->"];
  parts.extend(item.prefix(grammar).iter().map(|&s| grammar.name(s)));
  parts.push(".");
  parts.extend(item.suffix(grammar).iter().map(|&s| grammar.name(s)));
  parts.join(" ")
}

/// Space-separated symbols, `ε` when empty.
pub fn body(grammar: &Grammar, symbols: &[Symbol]) -> String {
  if symbols.is_empty() {
    return "ε".to_owned();
  }
  symbols.iter()
    .map(|&s| grammar.name(s))
    .collect::<Vec<_>>()
    .join(" ")
}

pub fn action(grammar: &Grammar, action: Action) -> String {
  match action {
    Action::Shift(state) => format!("shift {}", state),
    Action::Reduce { nonterm, prod } => format!(
      "reduce {} -> {}",
      grammar.nonterm_name(nonterm),
      body(grammar, &grammar.production(nonterm, prod).symbols)),
    Action::Accept => "accept".to_owned(),
  }
}

pub fn follow(parser: &Parser) -> String {
  let grammar = parser.grammar();
  let mut out = String::new();
  for nonterm in grammar.nonterms() {
    let terms = parser.follow(nonterm).iter()
      .map(|t| grammar.term_name(t))
      .collect::<Vec<_>>();
    let _ = writeln!(
      out,
      "FOLLOW({}) = {{{}}}",
      grammar.nonterm_name(nonterm),
      terms.join(", "));
  }
  out
}

/// Every state with its items.
pub fn collection(parser: &Parser) -> String {
  let grammar = parser.grammar();
  let mut out = String::new();
  for (state, items) in parser.automaton().states() {
    let _ = writeln!(out, "I{}:", state);
    for it in items {
      let _ = writeln!(out, "  {}", item(grammar, it));
    }
  }
  out
}

/// ACTION and GOTO rows sorted by state and symbol name, then any
/// conflicts found while filling them.
pub fn table(parser: &Parser) -> String {
  let grammar = parser.grammar();
  let table = parser.table();
  let mut out = String::new();

  let mut actions = vec![];
  let mut gotos = vec![];
  for state in 0..table.num_states() as u32 {
    for (term, act) in table.actions(state) {
      actions.push((state, grammar.term_name(term), action(grammar, act)));
    }
    for (nonterm, target) in table.gotos(state) {
      gotos.push((state, grammar.nonterm_name(nonterm), target.to_string()));
    }
  }
  actions.sort();
  gotos.sort();

  let _ = writeln!(out, "ACTION");
  write_rows(&mut out, "action", &actions);
  let _ = writeln!(out);
  let _ = writeln!(out, "GOTO");
  write_rows(&mut out, "goto", &gotos);

  if !table.is_slr1() {
    let _ = writeln!(out);
    let _ = writeln!(out, "CONFLICTS");
    for conflict in table.conflicts() {
      let _ = writeln!(
        out,
        "state {} on `{}`: {} replaces {}",
        conflict.state,
        grammar.term_name(conflict.term),
        action(grammar, conflict.kept),
        action(grammar, conflict.replaced));
    }
  }

  out
}

fn write_rows(out: &mut String, last: &str, rows: &[(u32, &str, String)]) {
  let _ = writeln!(out, "{:<7} {:<7} {}", "state", "symbol", last);
  for (state, symbol, value) in rows {
    let _ = writeln!(out, "{:<7} {:<7} {}", state, symbol, value);
  }
}

/// One line per step, then the verdict.
pub fn trace(parser: &Parser, trace: &Trace) -> String {
  let grammar = parser.grammar();
  let mut out = String::new();

  for step in &trace.steps {
    let stack = step.stack.iter()
      .map(|entry| match *entry {
        StackEntry::State(state) => state.to_string(),
        StackEntry::Symbol(sym) => grammar.name(sym).to_owned(),
      })
      .collect::<Vec<_>>()
      .join(" ");
    let mv = match step.action {
      Move::Shift(target) => format!("shift {}", target),
      Move::Reduce { nonterm, prod, goto } => format!(
        "{}; goto {}",
        action(grammar, Action::Reduce { nonterm, prod }),
        goto),
      Move::Accept => "accept".to_owned(),
    };
    let _ = writeln!(
      out,
      "stack: {} | input: {} | {}",
      stack,
      trace.remaining(step).join(" "),
      mv);
  }

  let _ = match &trace.verdict {
    Verdict::Accept => writeln!(out, "accepted"),
    Verdict::Reject(err) => writeln!(out, "rejected: {}", err),
  };

  out
}
