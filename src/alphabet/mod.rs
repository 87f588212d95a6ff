//! Alphabets with Unicode-aware case folding
//!
//! An [`Alphabet`] is an ordered, duplicate-free list of runes. The position
//! of a rune doubles as its numeric shift in the tabula recta arithmetic.
//!
//! Case folding resolves a rune that is not itself a member in this order:
//! 1. alphabet-specific case exceptions (e.g. German `ß` ↔ `ẞ`)
//! 2. the generic single-rune Unicode upper/lower mapping, accepted only when
//!    mapping back yields the original rune
//!
//! Runes with irreversible mappings (Greek final sigma, long s, dotless i)
//! are treated as non-members so that decoding restores them exactly.
//!
//! Folding is only enabled when it can always be undone: every member has
//! the same case, and every member has a non-member case partner that
//! resolves back to it. Alphabets that mix cased and uncased runes, or hold
//! both forms of a letter (the `bytes` alphabet), match exactly.

pub mod catalog;

pub use catalog::{AlphabetCatalog, AlphabetDef};

use std::collections::HashMap;

use crate::cipher::{CipherError, CipherResult};

/// How a lookup treats case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseMode {
    /// Only exact members match
    Exact,
    /// Case variants of members match too
    #[default]
    Fold,
}

/// Case relation between a looked-up rune and the member it resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Folding {
    /// The rune is itself a member
    Native,
    /// The rune is the lowercase form of a member
    Lowered,
    /// The rune is the uppercase form of a member
    Raised,
}

/// An ordered set of runes with a case exception table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    name: String,
    runes: Vec<char>,
    index: HashMap<char, usize>,
    /// (variant, member) pairs consulted before generic folding
    exceptions: Vec<(char, char)>,
    /// Whether `CaseMode::Fold` lookups fold at all
    foldable: bool,
}

impl Alphabet {
    /// Create an alphabet, rejecting empty and duplicate rune lists
    pub fn new(name: impl Into<String>, runes: impl IntoIterator<Item = char>) -> CipherResult<Self> {
        let name = name.into();
        let runes: Vec<char> = runes.into_iter().collect();
        if runes.is_empty() {
            return Err(CipherError::EmptyAlphabet(name));
        }

        let mut index = HashMap::with_capacity(runes.len());
        for (pos, &rune) in runes.iter().enumerate() {
            if index.insert(rune, pos).is_some() {
                return Err(CipherError::DuplicateRune {
                    alphabet: name,
                    rune,
                });
            }
        }

        let mut alphabet = Alphabet {
            name,
            runes,
            index,
            exceptions: Vec::new(),
            foldable: false,
        };
        alphabet.foldable = alphabet.fold_is_invertible();
        Ok(alphabet)
    }

    /// Attach case exception pairs `(variant, member)`
    ///
    /// Each member must belong to the alphabet, each variant must be a cased
    /// non-member, and the pairs must form a one-to-one mapping.
    pub fn with_case_exceptions(
        mut self,
        pairs: impl IntoIterator<Item = (char, char)>,
    ) -> CipherResult<Self> {
        for (variant, canonical) in pairs {
            let invalid = !self.index.contains_key(&canonical)
                || self.index.contains_key(&variant)
                || folding_of(variant) == Folding::Native
                || folding_of(variant) == folding_of(canonical)
                || self
                    .exceptions
                    .iter()
                    .any(|&(v, c)| v == variant || c == canonical);
            if invalid {
                return Err(CipherError::InvalidCaseException {
                    alphabet: self.name,
                    variant,
                    canonical,
                });
            }
            self.exceptions.push((variant, canonical));
        }
        self.foldable = self.fold_is_invertible();
        Ok(self)
    }

    /// Alphabet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of runes
    pub fn len(&self) -> usize {
        self.runes.len()
    }

    /// Always false; construction rejects empty alphabets
    pub fn is_empty(&self) -> bool {
        self.runes.is_empty()
    }

    /// Member runes in order
    pub fn runes(&self) -> &[char] {
        &self.runes
    }

    /// Case exception pairs `(variant, member)`
    pub fn case_exceptions(&self) -> &[(char, char)] {
        &self.exceptions
    }

    /// True when `CaseMode::Fold` lookups match case variants of members
    pub fn folds_case(&self) -> bool {
        self.foldable
    }

    /// Membership test
    pub fn contains(&self, rune: char, mode: CaseMode) -> bool {
        self.resolve(rune, mode).is_some()
    }

    /// Exact position of a member rune
    pub fn position_of(&self, rune: char) -> Option<usize> {
        self.index.get(&rune).copied()
    }

    /// Rune at `index`; negative indices count from the end
    pub fn rune_at(&self, index: isize) -> Option<char> {
        let len = self.runes.len() as isize;
        let idx = if index < 0 { len + index } else { index };
        if (0..len).contains(&idx) {
            Some(self.runes[idx as usize])
        } else {
            None
        }
    }

    /// True when every rune fits in a single byte (Latin-1 range)
    pub fn is_byte_range(&self) -> bool {
        self.runes.iter().all(|&r| (r as u32) <= 0xFF)
    }

    /// Resolve a rune to its position and case relation
    pub fn resolve(&self, rune: char, mode: CaseMode) -> Option<(usize, Folding)> {
        if let Some(&pos) = self.index.get(&rune) {
            return Some((pos, Folding::Native));
        }
        if mode == CaseMode::Exact || !self.foldable {
            return None;
        }
        self.resolve_variant(rune)
    }

    /// Case-variant lookup for a non-member rune
    fn resolve_variant(&self, rune: char) -> Option<(usize, Folding)> {
        if let Some(&(_, member)) = self.exceptions.iter().find(|&&(v, _)| v == rune) {
            let pos = self.index.get(&member).copied()?;
            return Some((pos, folding_of(rune)));
        }

        if let Some(upper) = single(rune.to_uppercase()) {
            if upper != rune && single(upper.to_lowercase()) == Some(rune) {
                if let Some(&pos) = self.index.get(&upper) {
                    return Some((pos, Folding::Lowered));
                }
            }
        }
        if let Some(lower) = single(rune.to_lowercase()) {
            if lower != rune && single(lower.to_uppercase()) == Some(rune) {
                if let Some(&pos) = self.index.get(&lower) {
                    return Some((pos, Folding::Raised));
                }
            }
        }
        None
    }

    /// Case partner of member `rune` under `folding`
    fn partner(&self, rune: char, folding: Folding) -> Option<char> {
        match folding {
            Folding::Native => Some(rune),
            Folding::Lowered => self
                .exception_for(rune, Folding::Lowered)
                .or_else(|| single(rune.to_lowercase())),
            Folding::Raised => self
                .exception_for(rune, Folding::Raised)
                .or_else(|| single(rune.to_uppercase())),
        }
    }

    /// Every member shares one case and owns a non-member partner that
    /// resolves back to it; exceptions all point the same way
    fn fold_is_invertible(&self) -> bool {
        let folded = match folding_of(self.runes[0]) {
            Folding::Raised => Folding::Lowered,
            Folding::Lowered => Folding::Raised,
            Folding::Native => return false,
        };
        let native = folding_of(self.runes[0]);

        self.exceptions.iter().all(|&(v, _)| folding_of(v) == folded)
            && self.runes.iter().enumerate().all(|(pos, &rune)| {
                folding_of(rune) == native
                    && self.partner(rune, folded).is_some_and(|p| {
                        !self.index.contains_key(&p) && self.resolve_variant(p) == Some((pos, folded))
                    })
            })
    }

    /// Apply `folding` to member `rune`
    ///
    /// Folded lookups only happen on foldable alphabets, where every member
    /// has a partner for the folding its variants carry.
    pub fn restore(&self, rune: char, folding: Folding) -> char {
        if !self.foldable {
            return rune;
        }
        self.partner(rune, folding).unwrap_or(rune)
    }

    fn exception_for(&self, member: char, folding: Folding) -> Option<char> {
        self.exceptions
            .iter()
            .find(|&&(v, c)| c == member && folding_of(v) == folding)
            .map(|&(v, _)| v)
    }
}

impl std::fmt::Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} runes)", self.name, self.runes.len())
    }
}

fn folding_of(rune: char) -> Folding {
    if rune.is_lowercase() {
        Folding::Lowered
    } else if rune.is_uppercase() {
        Folding::Raised
    } else {
        Folding::Native
    }
}

/// The sole element of a case-mapping iterator, if it has exactly one
fn single(mut it: impl Iterator<Item = char>) -> Option<char> {
    let first = it.next()?;
    match it.next() {
        None => Some(first),
        Some(_) => None,
    }
}
