//! Tabula recta over a single alphabet
//!
//! Encoding shifts a rune's position by the key's position modulo the
//! alphabet size; decoding shifts it back. Case is folded before the lookup
//! and restored on the result.

use crate::alphabet::{Alphabet, CaseMode, Folding};

/// Direction of a transform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Plaintext to ciphertext
    Encode,
    /// Ciphertext to plaintext
    Decode,
}

/// Substitution table derived from one alphabet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabulaRecta {
    alphabet: Alphabet,
    case_fold: bool,
}

impl TabulaRecta {
    /// Table with case folding enabled
    pub fn new(alphabet: Alphabet) -> Self {
        TabulaRecta {
            alphabet,
            case_fold: true,
        }
    }

    /// Table with an explicit case folding flag
    pub fn with_case_fold(alphabet: Alphabet, case_fold: bool) -> Self {
        TabulaRecta { alphabet, case_fold }
    }

    /// The underlying alphabet
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Alphabet size
    pub fn len(&self) -> usize {
        self.alphabet.len()
    }

    /// Always false; alphabets are never empty
    pub fn is_empty(&self) -> bool {
        self.alphabet.is_empty()
    }

    /// Whether lookups fold case
    pub fn case_fold(&self) -> bool {
        self.case_fold
    }

    fn effective(&self, mode: CaseMode) -> CaseMode {
        if self.case_fold {
            mode
        } else {
            CaseMode::Exact
        }
    }

    /// Membership under `mode`, limited by this table's folding flag
    pub fn contains(&self, rune: char, mode: CaseMode) -> bool {
        self.locate(rune, mode).is_some()
    }

    /// Position and case relation of `rune` in this table
    pub fn locate(&self, rune: char, mode: CaseMode) -> Option<(usize, Folding)> {
        self.alphabet.resolve(rune, self.effective(mode))
    }

    /// Shift of `rune` (its position), folding case when enabled
    pub fn has_rune(&self, rune: char) -> Option<usize> {
        self.locate(rune, CaseMode::Fold).map(|(pos, _)| pos)
    }

    /// Map a shift from another alphabet's numeric space into this one
    ///
    /// Shifts beyond this alphabet's size wrap around.
    pub fn transpose_key(&self, shift: usize) -> usize {
        shift % self.alphabet.len()
    }

    /// Member rune at `pos` (mod size) with `folding` applied
    pub fn rune_at(&self, pos: usize, folding: Folding) -> char {
        let n = self.alphabet.len();
        let rune = self.alphabet.runes()[pos % n];
        self.alphabet.restore(rune, folding)
    }

    /// Shift the member at `pos` by `shift` in `direction`
    pub fn shift(&self, pos: usize, folding: Folding, shift: usize, direction: Direction) -> char {
        let n = self.alphabet.len();
        let shift = shift % n;
        let out = match direction {
            Direction::Encode => (pos + shift) % n,
            Direction::Decode => (pos + n - shift) % n,
        };
        self.rune_at(out, folding)
    }

    /// `alphabet[(pos(target) + pos(key)) mod N]`, preserving target case
    pub fn encode_rune(&self, target: char, key: char) -> Option<char> {
        self.apply(target, key, Direction::Encode)
    }

    /// `alphabet[(pos(cipher) - pos(key)) mod N]`, preserving cipher case
    pub fn decode_rune(&self, cipher: char, key: char) -> Option<char> {
        self.apply(cipher, key, Direction::Decode)
    }

    fn apply(&self, rune: char, key: char, direction: Direction) -> Option<char> {
        let shift = self.has_rune(key)?;
        let (pos, folding) = self.locate(rune, CaseMode::Fold)?;
        Some(self.shift(pos, folding, shift, direction))
    }
}
