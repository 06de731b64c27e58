use std::collections::HashSet;
use crate::error::ParseError;
use crate::grammar::{Grammar, NontermId, Symbol, END};
use super::table::{Action, Table};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StackEntry {
  State(u32),
  Symbol(Symbol),
}

/// What the parser did in one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
  Shift(u32),
  /// Reduced by `grammar.production(nonterm, prod)`, then went to `goto`.
  Reduce {
    nonterm: NontermId,
    prod: u16,
    goto: u32,
  },
  Accept,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
  /// stack before the move, bottom first
  pub stack: Vec<StackEntry>,
  /// index into [`Trace::input`] of the lookahead
  pub cursor: usize,
  pub action: Move,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
  Accept,
  Reject(ParseError),
}

/// Record of one parse.
#[derive(Debug, Clone)]
pub struct Trace {
  /// the tokens, ending with `$`
  pub input: Vec<String>,
  pub steps: Vec<Step>,
  pub verdict: Verdict,
}

impl Trace {
  pub fn accepted(&self) -> bool {
    self.verdict == Verdict::Accept
  }

  pub fn error(&self) -> Option<&ParseError> {
    match &self.verdict {
      Verdict::Accept => None,
      Verdict::Reject(err) => Some(err),
    }
  }

  /// Input left at `step`, lookahead first.
  pub fn remaining(&self, step: &Step) -> &[String] {
    self.input.get(step.cursor..).unwrap_or_default()
  }
}

pub(crate) fn run(
  grammar: &Grammar,
  table: &Table,
  mut input: Vec<String>,
) -> Trace {
  input.push(END.to_owned());

  let mut stack = vec![StackEntry::State(0)];
  let mut steps = vec![];
  let mut cursor = 0;
  let mut cycles = CycleCheck::default();

  let verdict = loop {
    let state = top_state(&stack);
    let token = input.get(cursor).map_or(END, String::as_str);
    let (term, action) = match grammar.term(token)
      .and_then(|term| Some((term, table.action(state, term)?)))
    {
      Some(entry) => entry,
      None => {
        break Verdict::Reject(ParseError::NoAction {
          state,
          symbol: token.to_owned(),
        });
      }
    };

    log::trace!("state {} on `{}`: {:?}", state, token, action);

    let before = stack.clone();
    let at = cursor;
    let action = match action {
      Action::Shift(target) => {
        stack.push(StackEntry::Symbol(Symbol::Term(term)));
        stack.push(StackEntry::State(target));
        cursor += 1;
        cycles.clear();
        Move::Shift(target)
      }
      Action::Reduce { nonterm, prod } => {
        let len = grammar.production(nonterm, prod).symbols.len();
        stack.truncate(stack.len().saturating_sub(2 * len).max(1));
        let low = stack.len();
        let exposed = top_state(&stack);
        let target = match table.goto(exposed, nonterm) {
          Some(target) => target,
          None => {
            break Verdict::Reject(ParseError::NoGoto {
              state: exposed,
              nonterm: grammar.nonterm_name(nonterm).to_owned(),
            });
          }
        };
        stack.push(StackEntry::Symbol(Symbol::Nonterm(nonterm)));
        stack.push(StackEntry::State(target));

        if cycles.repeats(&stack, low) {
          steps.push(Step {
            stack: before,
            cursor: at,
            action: Move::Reduce { nonterm, prod, goto: target },
          });
          break Verdict::Reject(ParseError::ReductionCycle {
            state,
            symbol: token.to_owned(),
          });
        }
        Move::Reduce { nonterm, prod, goto: target }
      }
      Action::Accept => Move::Accept,
    };

    steps.push(Step {
      stack: before,
      cursor: at,
      action,
    });
    if action == Move::Accept {
      break Verdict::Accept;
    }
  };

  if let Verdict::Reject(err) = &verdict {
    log::trace!("rejected: {}", err);
  }

  Trace {
    input,
    steps,
    verdict,
  }
}

fn top_state(stack: &[StackEntry]) -> u32 {
  stack.iter()
    .rev()
    .find_map(|entry| match entry {
      StackEntry::State(state) => Some(*state),
      StackEntry::Symbol(_) => None,
    })
    .unwrap_or(0)
}

/// Detects reductions that can never reach the next shift: either a stack
/// seen before since the last shift, or a state pushed again above an
/// earlier copy of itself that has not been popped since.
#[derive(Default)]
struct CycleCheck {
  seen: HashSet<Vec<StackEntry>>,
  /// (state, stack height) pushed by reductions since the last shift
  pushed: Vec<(u32, usize)>,
}

impl CycleCheck {
  fn clear(&mut self) {
    self.seen.clear();
    self.pushed.clear();
  }

  /// `low` is the stack height right after popping the production body.
  fn repeats(&mut self, stack: &[StackEntry], low: usize) -> bool {
    if !self.seen.insert(stack.to_vec()) {
      return true;
    }

    self.pushed.retain(|&(_, height)| height <= low);
    let state = top_state(stack);
    if self.pushed.iter().any(|&(s, _)| s == state) {
      return true;
    }
    self.pushed.push((state, stack.len()));
    false
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::grammar::grammar;
  use crate::grammar::tests::{expr, ll_expr};
  use crate::parser::Parser;
  use pretty_assertions::assert_eq;

  fn moves(trace: &Trace) -> Vec<&'static str> {
    trace.steps.iter()
      .map(|step| match step.action {
        Move::Shift(_) => "shift",
        Move::Reduce { .. } => "reduce",
        Move::Accept => "accept",
      })
      .collect()
  }

  #[test]
  fn accept() {
    let parser = Parser::new(expr()).unwrap();
    let trace = parser.parse_str("id + id * id");

    assert!(trace.accepted());
    assert_eq!(trace.input, vec!["id", "+", "id", "*", "id", "$"]);
    assert_eq!(trace.steps.len(), 14);
    assert_eq!(trace.steps[0].stack, vec![StackEntry::State(0)]);
    assert_eq!(trace.steps.last().unwrap().action, Move::Accept);
    assert_eq!(trace.remaining(trace.steps.last().unwrap()).to_vec(), vec!["$"]);
  }

  #[test]
  fn no_action() {
    let parser = Parser::new(expr()).unwrap();
    let trace = parser.parse_str("id + +");

    assert!(!trace.accepted());
    match trace.error() {
      Some(ParseError::NoAction { symbol, .. }) => assert_eq!(symbol, "+"),
      err => panic!("unexpected {:?}", err),
    }
    assert_eq!(
      moves(&trace),
      vec!["shift", "reduce", "reduce", "reduce", "shift"]);
  }

  #[test]
  fn unknown_token() {
    let parser = Parser::new(expr()).unwrap();
    let trace = parser.parse_str("id + x");

    assert_eq!(trace.error(), Some(&ParseError::NoAction {
      state: 6,
      symbol: "x".to_owned(),
    }));
  }

  #[test]
  fn empty_input() {
    let parser = Parser::new(expr()).unwrap();
    let trace = parser.parse_str("");

    assert!(trace.steps.is_empty());
    assert_eq!(trace.error(), Some(&ParseError::NoAction {
      state: 0,
      symbol: "$".to_owned(),
    }));
  }

  #[test]
  fn epsilon_reduction_pops_nothing() {
    let parser = Parser::new(ll_expr()).unwrap();
    let g = parser.grammar();
    let trace = parser.parse_str("id");

    assert!(trace.accepted());

    let mut reduced = vec![];
    for (step, next) in trace.steps.iter().zip(&trace.steps[1..]) {
      if let Move::Reduce { nonterm, prod, goto } = step.action {
        if !g.production(nonterm, prod).symbols.is_empty() {
          continue;
        }
        reduced.push(g.nonterm_name(nonterm));
        let mut expected = step.stack.clone();
        expected.push(StackEntry::Symbol(Symbol::Nonterm(nonterm)));
        expected.push(StackEntry::State(goto));
        assert_eq!(next.stack, expected);
        assert_eq!(next.cursor, step.cursor);
      }
    }
    assert_eq!(reduced, vec!["T'", "E'"]);
  }

  #[test]
  fn follow_does_not_see_through_nullable_suffix() {
    let parser = Parser::new(ll_expr()).unwrap();
    let trace = parser.parse_str("id + id");

    match trace.error() {
      Some(ParseError::NoAction { symbol, .. }) => assert_eq!(symbol, "+"),
      err => panic!("unexpected {:?}", err),
    }
  }

  #[test]
  fn missing_goto() {
    let mut parser = Parser::new(expr()).unwrap();
    parser.table.gotos[0].clear();
    let trace = parser.parse_str("id");

    assert_eq!(trace.error(), Some(&ParseError::NoGoto {
      state: 0,
      nonterm: "F".to_owned(),
    }));
  }

  #[test]
  fn conflict_resolved_by_later_reduce() {
    let parser = Parser::new(grammar(&[("E", &["E + E", "id"])]).unwrap())
      .unwrap();

    assert!(parser.parse_str("id + id + id").accepted());
    assert!(!parser.parse_str("id +").accepted());
  }

  #[test]
  fn unit_cycle() {
    let parser = Parser::new(grammar(&[("S", &["S", "x"])]).unwrap()).unwrap();
    let trace = parser.parse_str("x");

    assert_eq!(trace.error(), Some(&ParseError::ReductionCycle {
      state: 1,
      symbol: "$".to_owned(),
    }));
    assert_eq!(moves(&trace), vec!["shift", "reduce", "reduce"]);
  }
}
