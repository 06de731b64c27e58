use std::fmt::{self, Debug, Formatter};
use crate::grammar::TermId;

type BitBlock = u64;

const BLOCK_NBITS: usize = std::mem::size_of::<BitBlock>() * 8;

/// A set of terminals of one grammar.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TermSet {
  slice: Box<[BitBlock]>,
}

impl TermSet {
  pub fn new(num_terms: usize) -> Self {
    let len = (num_terms + BLOCK_NBITS - 1) / BLOCK_NBITS;
    Self {
      slice: vec![0; len].into_boxed_slice(),
    }
  }

  pub fn from_term(num_terms: usize, term: TermId) -> Self {
    let mut s = Self::new(num_terms);
    s.insert(term);
    s
  }

  pub fn clear(&mut self) {
    for x in self.slice.iter_mut() {
      *x = 0;
    }
  }

  /// Returns whether the term was newly inserted.
  pub fn insert(&mut self, term: TermId) -> bool {
    let (block, mask) = Self::locate(term);
    let old = self.slice[block];
    self.slice[block] |= mask;
    old != self.slice[block]
  }

  pub fn contains(&self, term: TermId) -> bool {
    let (block, mask) = Self::locate(term);
    self.slice.get(block).map_or(false, |b| b & mask != 0)
  }

  /// Returns whether the set has changed.
  pub fn union_with(&mut self, other: &TermSet) -> bool {
    let mut changed = false;
    for i in 0..self.slice.len() {
      let old = self.slice[i];
      self.slice[i] |= other.slice[i];
      changed |= old != self.slice[i];
    }
    changed
  }

  pub fn len(&self) -> usize {
    self.slice.iter().map(|b| b.count_ones() as usize).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.slice.iter().all(|&b| b == 0)
  }

  pub fn iter(&self) -> Iter {
    Iter {
      slice: &self.slice,
      bit: 0,
      index: 0,
    }
  }

  fn locate(term: TermId) -> (usize, BitBlock) {
    let bit = term.0 as usize;
    (bit / BLOCK_NBITS, 1 << (bit % BLOCK_NBITS))
  }
}

pub struct Iter<'a> {
  slice: &'a [BitBlock],
  bit: usize,
  index: usize,
}

impl<'a> Iterator for Iter<'a> {
  type Item = TermId;

  fn next(&mut self) -> Option<TermId> {
    while self.index < self.slice.len() {
      if self.bit < BLOCK_NBITS {
        let bit = (self.slice[self.index] & !((1 << self.bit) - 1))
          .trailing_zeros() as usize;
        if bit < BLOCK_NBITS {
          self.bit = bit + 1;
          return Some(TermId((self.index * BLOCK_NBITS + bit) as u32));
        }
      }

      self.index += 1;
      self.bit = 0;
    }
    None
  }
}

impl<'a> IntoIterator for &'a TermSet {
  type Item = TermId;
  type IntoIter = Iter<'a>;

  fn into_iter(self) -> Iter<'a> {
    self.iter()
  }
}

impl Debug for TermSet {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    f.debug_set().entries(self.iter().map(|t| t.0)).finish()
  }
}
