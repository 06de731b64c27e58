use indexmap::{IndexMap, IndexSet};
use crate::error::GrammarError;

/// Name of the end-of-input terminal.
pub const END: &str = "$";

/// Alternatives spelled as one of these symbols are empty productions.
const EPSILON: [&str; 2] = ["e", "ε"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TermId(pub u32);

impl TermId {
  pub const END: TermId = TermId(0);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NontermId(pub u32);

/// A grammar symbol, tagged once when the grammar is built: a name is a
/// nonterminal iff it has its own rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
  Term(TermId),
  Nonterm(NontermId),
}

impl Symbol {
  pub fn is_terminal(self) -> bool {
    matches!(self, Symbol::Term(_))
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Production {
  /// empty for an epsilon production
  pub symbols: Vec<Symbol>,
}

/// An augmented context-free grammar.
///
/// Nonterminal 0 is the synthesized start `S'` with the single production
/// `S' -> S`, where `S` (nonterminal 1) is the first declared nonterminal.
/// Terminal 0 is the end marker `$`.
#[derive(Debug, Clone)]
pub struct Grammar {
  terms: IndexSet<String>,
  nonterms: IndexMap<String, Vec<Production>>,
  /// every symbol used in a production, in order of first appearance
  symbols: Vec<Symbol>,
}

impl Grammar {
  /// Builds a grammar from `nonterminal -> alternatives` rules. The first
  /// rule's nonterminal is the start symbol. A later rule for the same
  /// nonterminal replaces the earlier one.
  pub fn new<I>(rules: I) -> Result<Self, GrammarError>
  where
    I: IntoIterator<Item = (String, Vec<Vec<String>>)>,
  {
    let rules = rules.into_iter().collect::<IndexMap<_, _>>();
    let start = match rules.keys().next() {
      Some(start) => start.clone(),
      None => return Err(GrammarError::NoNonterminals),
    };

    let mut augmented = format!("{}'", start);
    while rules.contains_key(&augmented)
      || rules.values().flatten().flatten().any(|s| *s == augmented)
    {
      augmented.push('\'');
    }

    let mut nonterms = IndexMap::with_capacity(rules.len() + 1);
    nonterms.insert(augmented, vec![Production {
      symbols: vec![Symbol::Nonterm(NontermId(1))],
    }]);
    for name in rules.keys() {
      nonterms.insert(name.clone(), vec![]);
    }

    let mut terms = IndexSet::new();
    terms.insert(END.to_owned());

    for (i, (name, alts)) in rules.iter().enumerate() {
      if alts.is_empty() {
        return Err(GrammarError::NoProductions(name.clone()));
      }

      let mut prods: Vec<Production> = Vec::with_capacity(alts.len());
      for (index, alt) in alts.iter().enumerate() {
        let prod = gen_prod(&nonterms, &mut terms, name, index, alt)?;
        if prods.contains(&prod) {
          log::warn!("duplicate alternative {} of `{}` merged", index, name);
          continue;
        }
        prods.push(prod);
      }
      if let Some((_, slot)) = nonterms.get_index_mut(i + 1) {
        *slot = prods;
      }
    }

    let symbols = nonterms.values()
      .flatten()
      .flat_map(|prod| prod.symbols.iter().copied())
      .collect::<IndexSet<_>>()
      .into_iter()
      .collect();

    Ok(Grammar {
      terms,
      nonterms,
      symbols,
    })
  }

  /// Parses `LHS -> seq | seq` lines, see [`crate::bnf::parse`].
  pub fn from_text(text: &str) -> Result<Self, GrammarError> {
    Grammar::new(crate::bnf::parse(text).rules)
  }

  /// The first declared nonterminal.
  pub fn start(&self) -> NontermId {
    NontermId(1)
  }

  /// The synthesized `S'` whose completion means acceptance.
  pub fn augmented_start(&self) -> NontermId {
    NontermId(0)
  }

  pub fn num_terms(&self) -> usize {
    self.terms.len()
  }

  pub fn num_nonterms(&self) -> usize {
    self.nonterms.len()
  }

  pub fn terms(&self) -> impl Iterator<Item = TermId> {
    (0..self.terms.len() as u32).map(TermId)
  }

  pub fn nonterms(&self) -> impl Iterator<Item = NontermId> {
    (0..self.nonterms.len() as u32).map(NontermId)
  }

  /// Grammar symbols in order of first appearance in the productions.
  /// The end marker is not among them.
  pub fn symbols(&self) -> &[Symbol] {
    &self.symbols
  }

  pub fn productions(&self, nonterm: NontermId) -> &[Production] {
    self.nonterms.get_index(nonterm.0 as usize)
      .map(|(_, prods)| prods.as_slice())
      .unwrap_or_default()
  }

  pub fn production(&self, nonterm: NontermId, prod: u16) -> &Production {
    &self.productions(nonterm)[prod as usize]
  }

  pub fn term_name(&self, term: TermId) -> &str {
    self.terms.get_index(term.0 as usize)
      .map(String::as_str)
      .unwrap_or_default()
  }

  pub fn nonterm_name(&self, nonterm: NontermId) -> &str {
    self.nonterms.get_index(nonterm.0 as usize)
      .map(|(name, _)| name.as_str())
      .unwrap_or_default()
  }

  pub fn name(&self, symbol: Symbol) -> &str {
    match symbol {
      Symbol::Term(id) => self.term_name(id),
      Symbol::Nonterm(id) => self.nonterm_name(id),
    }
  }

  pub fn term(&self, name: &str) -> Option<TermId> {
    self.terms.get_index_of(name).map(|i| TermId(i as u32))
  }

  pub fn nonterm(&self, name: &str) -> Option<NontermId> {
    self.nonterms.get_index_of(name).map(|i| NontermId(i as u32))
  }

  /// Classifies a name used in the grammar.
  pub fn symbol(&self, name: &str) -> Option<Symbol> {
    self.nonterm(name).map(Symbol::Nonterm)
      .or_else(|| self.term(name).map(Symbol::Term))
  }
}

fn gen_prod(
  nonterms: &IndexMap<String, Vec<Production>>,
  terms: &mut IndexSet<String>,
  nonterm: &str,
  index: usize,
  alt: &[String],
) -> Result<Production, GrammarError> {
  match alt {
    [] => Err(GrammarError::EmptyProduction {
      nonterm: nonterm.to_owned(),
      index,
    }),
    [sym] if EPSILON.contains(&sym.as_str()) => Ok(Production::default()),
    _ => {
      let symbols = alt.iter()
        .map(|sym| gen_sym(nonterms, terms, nonterm, sym))
        .collect::<Result<_, _>>()?;
      Ok(Production { symbols })
    }
  }
}

fn gen_sym(
  nonterms: &IndexMap<String, Vec<Production>>,
  terms: &mut IndexSet<String>,
  nonterm: &str,
  sym: &str,
) -> Result<Symbol, GrammarError> {
  if sym == END {
    return Err(GrammarError::ReservedEndMarker(nonterm.to_owned()));
  }
  if let Some(id) = nonterms.get_index_of(sym) {
    return Ok(Symbol::Nonterm(NontermId(id as u32)));
  }
  let (id, _) = terms.insert_full(sym.to_owned());
  Ok(Symbol::Term(TermId(id as u32)))
}

/// Shorthand for [`Grammar::new`] with whitespace-separated alternatives.
///
/// ```
/// let g = slrgen::grammar(&[
///   ("S", &["( S )", "x"]),
/// ]).unwrap();
/// assert_eq!(g.nonterm_name(g.start()), "S");
/// ```
pub fn grammar(
  rules: &[(&str, &[&str])],
) -> Result<Grammar, GrammarError> {
  Grammar::new(rules.iter().map(|(name, alts)| {
    let alts = alts.iter()
      .map(|alt| alt.split_whitespace().map(str::to_owned).collect::<Vec<_>>())
      .collect::<Vec<_>>();
    ((*name).to_owned(), alts)
  }))
}
