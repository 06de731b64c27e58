//! Reads grammars written one rule per line:
//!
//! ```text
//! E -> E + T | T
//! T -> T * F | F
//! F -> ( E ) | id
//! ```
//!
//! Symbols are separated by whitespace and alternatives by `|`.

use std::fmt::{self, Display, Formatter};
use indexmap::IndexMap;

pub struct Bnf {
  /// lhs -> alternatives, in declaration order
  pub rules: IndexMap<String, Vec<Vec<String>>>,
  pub skipped: Vec<SkippedLine>,
}

/// A non-blank line without `->`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
  /// 1-based
  pub line: usize,
  pub text: String,
}

impl Display for SkippedLine {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "line {} is not a rule: {}", self.line, self.text)
  }
}

pub fn parse(text: &str) -> Bnf {
  let mut rules = IndexMap::new();
  let mut skipped = vec![];

  for (i, line) in text.lines().enumerate() {
    let line = line.trim();
    if line.is_empty() {
      continue;
    }

    let (lhs, rhs) = match line.split_once("->") {
      Some(parts) => parts,
      None => {
        let skip = SkippedLine {
          line: i + 1,
          text: line.to_owned(),
        };
        log::warn!("{}", skip);
        skipped.push(skip);
        continue;
      }
    };

    let lhs = lhs.trim().to_owned();
    let alts = rhs.split('|')
      .map(|alt| alt.split_whitespace().map(str::to_owned).collect())
      .collect::<Vec<Vec<_>>>();

    if rules.insert(lhs.clone(), alts).is_some() {
      log::warn!("line {} redefines `{}`", i + 1, lhs);
    }
  }

  Bnf {
    rules,
    skipped,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  fn alts(bnf: &Bnf, lhs: &str) -> Vec<String> {
    bnf.rules[lhs].iter().map(|alt| alt.join(" ")).collect()
  }

  #[test]
  fn rules() {
    let bnf = parse(r#"
      E -> E + T | T
      T -> T * F | F

      F -> ( E ) | id
    "#);

    assert_eq!(bnf.rules.keys().collect::<Vec<_>>(), vec!["E", "T", "F"]);
    assert_eq!(alts(&bnf, "E"), vec!["E + T", "T"]);
    assert_eq!(alts(&bnf, "F"), vec!["( E )", "id"]);
    assert!(bnf.skipped.is_empty());
  }

  #[test]
  fn skips_lines_without_arrow() {
    let bnf = parse("S -> a S | b\nS = a\n  # comment\n");

    assert_eq!(alts(&bnf, "S"), vec!["a S", "b"]);
    assert_eq!(bnf.skipped, vec![
      SkippedLine { line: 2, text: "S = a".to_owned() },
      SkippedLine { line: 3, text: "# comment".to_owned() },
    ]);
    assert_eq!(bnf.skipped[0].to_string(), "line 2 is not a rule: S = a");
  }

  #[test]
  fn redefinition_replaces() {
    let bnf = parse("S -> A\nA -> a\nS -> b");

    assert_eq!(bnf.rules.keys().collect::<Vec<_>>(), vec!["S", "A"]);
    assert_eq!(alts(&bnf, "S"), vec!["b"]);
  }

  #[test]
  fn empty_alternative_is_kept() {
    let bnf = parse("S -> a |");

    assert_eq!(bnf.rules["S"], vec![vec!["a".to_owned()], vec![]]);
  }
}
