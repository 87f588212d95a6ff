//! Chained tabula recta
//!
//! An ordered list of links consulted first to last. A rune belongs to the
//! first link that contains it; keys found in one link are transposed into
//! the coordinate space of the link that holds the target.

use super::tabula::{Direction, TabulaRecta};
use crate::alphabet::{Alphabet, CaseMode, Folding};

/// Where a rune was found in the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Index of the link holding the rune (0 = primary)
    pub link: usize,
    /// Position within that link
    pub shift: usize,
    /// Case relation to the member rune
    pub folding: Folding,
}

/// Ordered list of tabula recta links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainedTabulaRecta {
    links: Vec<TabulaRecta>,
}

impl ChainedTabulaRecta {
    /// Chain with a single primary link
    pub fn new(primary: TabulaRecta) -> Self {
        ChainedTabulaRecta {
            links: vec![primary],
        }
    }

    /// Chain over a primary alphabet with case folding
    pub fn from_alphabet(primary: Alphabet) -> Self {
        Self::new(TabulaRecta::new(primary))
    }

    /// Append a fallback link
    pub fn with_link(mut self, link: TabulaRecta) -> Self {
        self.links.push(link);
        self
    }

    /// Append a fallback alphabet with case folding
    pub fn with_alphabet(self, alphabet: Alphabet) -> Self {
        self.with_link(TabulaRecta::new(alphabet))
    }

    /// The primary link
    pub fn primary(&self) -> &TabulaRecta {
        &self.links[0]
    }

    /// All links in precedence order
    pub fn links(&self) -> &[TabulaRecta] {
        &self.links
    }

    /// Link at `index`
    pub fn link(&self, index: usize) -> Option<&TabulaRecta> {
        self.links.get(index)
    }

    /// Membership in any link
    pub fn contains(&self, rune: char, mode: CaseMode) -> bool {
        self.locate(rune, mode).is_some()
    }

    /// First link containing `rune`
    pub fn locate(&self, rune: char, mode: CaseMode) -> Option<Location> {
        self.links.iter().enumerate().find_map(|(link, table)| {
            table
                .locate(rune, mode)
                .map(|(shift, folding)| Location { link, shift, folding })
        })
    }

    /// Express a key location as a shift in `link`'s coordinate space
    pub fn transpose(&self, key: Location, link: usize) -> usize {
        if key.link == link {
            return key.shift;
        }
        match self.links.get(link) {
            Some(table) => table.transpose_key(key.shift),
            None => key.shift,
        }
    }

    /// Transform a located target with a located key, never mixing tables
    pub fn transform(&self, target: Location, key: Location, direction: Direction) -> char {
        let shift = self.transpose(key, target.link);
        self.links[target.link].shift(target.shift, target.folding, shift, direction)
    }

    /// True when every link's runes fit in a byte
    pub fn is_byte_range(&self) -> bool {
        self.links.iter().all(|l| l.alphabet().is_byte_range())
    }

    /// First link whose runes do not fit in a byte
    pub fn first_non_byte(&self) -> Option<&Alphabet> {
        self.links
            .iter()
            .map(TabulaRecta::alphabet)
            .find(|a| !a.is_byte_range())
    }
}
