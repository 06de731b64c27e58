use crate::grammar::{Grammar, Symbol, TermId};
use super::token_set::TermSet;

/// Computes FOLLOW sets, indexed by nonterminal.
///
/// For an occurrence `A -> ... X rest`, every terminal anywhere in `rest`
/// goes to FOLLOW(X), and FOLLOW(A) does too when `rest` has no terminal.
/// Nullability is not tracked: a nonterminal in `rest` neither contributes
/// its FIRST set nor stops the terminal scan.
pub(crate) fn gen_follow(
  grammar: &Grammar,
) -> Vec<TermSet> {
  let num_terms = grammar.num_terms();
  let mut follow = vec![TermSet::new(num_terms); grammar.num_nonterms()];
  follow[grammar.augmented_start().0 as usize].insert(TermId::END);
  follow[grammar.start().0 as usize].insert(TermId::END);

  let mut buf = TermSet::new(num_terms);
  let mut passes = 0;

  loop {
    let mut changed = false;
    passes += 1;
    for lhs in grammar.nonterms() {
      for prod in grammar.productions(lhs) {
        for (i, sym) in prod.symbols.iter().enumerate() {
          let nonterm = match sym {
            Symbol::Nonterm(id) => id.0 as usize,
            Symbol::Term(_) => continue,
          };
          let rest = &prod.symbols[i + 1..];

          buf.clear();
          for sym in rest {
            if let Symbol::Term(term) = sym {
              buf.insert(*term);
            }
          }
          if rest.iter().all(|sym| !sym.is_terminal()) {
            buf.union_with(&follow[lhs.0 as usize]);
          }

          changed |= follow[nonterm].union_with(&buf);
        }
      }
    }
    if !changed {
      break;
    }
  }

  log::debug!("FOLLOW sets converged after {} passes", passes);

  follow
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::grammar::grammar;
  use crate::grammar::tests::{expr, ll_expr};
  use pretty_assertions::assert_eq;

  fn follow_of(g: &Grammar, follow: &[TermSet], nonterm: &str) -> Vec<String> {
    let mut names = follow[g.nonterm(nonterm).unwrap().0 as usize].iter()
      .map(|t| g.term_name(t).to_owned())
      .collect::<Vec<_>>();
    names.sort();
    names
  }

  #[test]
  fn expr_follow() {
    let g = expr();
    let follow = gen_follow(&g);

    assert_eq!(follow_of(&g, &follow, "E'"), vec!["$"]);
    assert_eq!(follow_of(&g, &follow, "E"), vec!["$", ")", "+"]);
    assert_eq!(follow_of(&g, &follow, "T"), vec!["$", ")", "*", "+"]);
    assert_eq!(follow_of(&g, &follow, "F"), vec!["$", ")", "*", "+"]);
  }

  #[test]
  fn start_follows_end() {
    let g = grammar(&[("S", &["a"])]).unwrap();
    let follow = gen_follow(&g);

    assert!(follow[g.start().0 as usize].contains(TermId::END));
  }

  #[test]
  fn nullable_suffix_is_not_seen_through() {
    let g = ll_expr();
    let follow = gen_follow(&g);

    assert_eq!(follow_of(&g, &follow, "E"), vec!["$", ")"]);
    assert_eq!(follow_of(&g, &follow, "E'"), vec!["$", ")"]);
    assert_eq!(follow_of(&g, &follow, "T"), vec!["$", ")"]);
    assert_eq!(follow_of(&g, &follow, "F"), vec!["$", ")"]);
  }

  #[test]
  fn terminals_past_a_nonterminal() {
    let g = grammar(&[
      ("S", &["B C d"]),
      ("B", &["b"]),
      ("C", &["c"]),
    ]).unwrap();
    let follow = gen_follow(&g);

    assert_eq!(follow_of(&g, &follow, "B"), vec!["d"]);
    assert_eq!(follow_of(&g, &follow, "C"), vec!["d"]);
  }
}
