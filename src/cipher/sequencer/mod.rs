//! Key sequencers
//!
//! A sequencer produces the key rune for each input position. The stream
//! iterator is variant-agnostic: it only talks to the [`KeySequencer`] trait.
//!
//! Sequencer state is call-scoped and strictly ordered. Reset it between
//! independent operations and never share one instance between two
//! operations; clone it with [`KeySequencer::box_clone`] instead.

mod affine;
mod bellaso;
mod caesar;
mod didimus;
mod fibonacci;
mod vigenere;

pub use affine::AffineSequencer;
pub use bellaso::BellasoSequencer;
pub use caesar::CaesarSequencer;
pub use didimus::DidimusSequencer;
pub use fibonacci::FibonacciSequencer;
pub use vigenere::VigenereSequencer;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use zeroize::Zeroize;

use super::error::{CipherError, CipherResult};
use super::tabula::Direction;
use crate::alphabet::{Alphabet, CaseMode};

/// The cipher variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Constant key
    Caesar,
    /// Alternating prime and offset key
    Didimus,
    /// Prime key rotated by Fibonacci terms
    Fibonacci,
    /// Repeating multi-rune secret
    Bellaso,
    /// Secret followed by the plaintext itself
    Vigenere,
    /// Closed-form `a·x + b`
    Affine,
}

impl Variant {
    /// Every variant in registry order
    pub const ALL: [Variant; 6] = [
        Variant::Caesar,
        Variant::Didimus,
        Variant::Fibonacci,
        Variant::Bellaso,
        Variant::Vigenere,
        Variant::Affine,
    ];

    /// Lowercase name used by the registry and the CLI
    pub fn name(&self) -> &'static str {
        match self {
            Variant::Caesar => "caesar",
            Variant::Didimus => "didimus",
            Variant::Fibonacci => "fibonacci",
            Variant::Bellaso => "bellaso",
            Variant::Vigenere => "vigenere",
            Variant::Affine => "affine",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = CipherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Variant::ALL
            .into_iter()
            .find(|v| v.name() == lower)
            .ok_or_else(|| CipherError::UnknownCipher(s.to_string()))
    }
}

/// Per-position key strategy
pub trait KeySequencer: fmt::Debug + Send {
    /// Which variant this is
    fn variant(&self) -> Variant;

    /// Key rune valid at `position` for `target`, in the primary alphabet's
    /// coordinate space
    fn get_key(&self, position: usize, target: char) -> char;

    /// Record the plaintext rune just processed (autokey variants only)
    fn feedback(&mut self, _plain: char) {}

    /// Account for a pass-through element; returns the skip count so far
    fn skip(&mut self) -> usize;

    /// Elements skipped since the last reset
    fn skipped(&self) -> usize;

    /// Select decryption (true) or encryption (false) bookkeeping
    fn set_decryption_mode(&mut self, decrypting: bool);

    /// Every key rune this sequencer can produce from its configuration
    fn key_runes(&self) -> Vec<char>;

    /// Check every configured key against `is_legal`
    fn verify(&self, is_legal: &dyn Fn(char) -> bool) -> CipherResult<()> {
        match self.key_runes().into_iter().find(|&k| !is_legal(k)) {
            Some(key) => Err(CipherError::IllegalKey(key)),
            None => Ok(()),
        }
    }

    /// Check that the sequencer can operate on a link of `size` runes
    fn verify_modulus(&self, _size: usize) -> CipherResult<()> {
        Ok(())
    }

    /// Closed-form transform of a position, bypassing the table.
    /// `None` means the table lookup applies.
    fn substitute(
        &self,
        _shift: usize,
        _size: usize,
        _direction: Direction,
    ) -> Option<CipherResult<usize>> {
        None
    }

    /// Clear skip count and autokey state
    fn reset(&mut self);

    /// Independent copy for a separate operation
    fn box_clone(&self) -> Box<dyn KeySequencer>;
}

impl Clone for Box<dyn KeySequencer> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

/// Skip and direction bookkeeping shared by every variant
#[derive(Debug, Clone, Default, Zeroize)]
pub(crate) struct Cursor {
    skipped: usize,
    decrypting: bool,
}

impl Cursor {
    pub(crate) fn skip(&mut self) -> usize {
        self.skipped += 1;
        self.skipped
    }

    pub(crate) fn skipped(&self) -> usize {
        self.skipped
    }

    /// Position with skipped elements removed
    pub(crate) fn adjusted(&self, position: usize) -> usize {
        position.saturating_sub(self.skipped)
    }

    pub(crate) fn set_decrypting(&mut self, decrypting: bool) {
        self.decrypting = decrypting;
    }

    pub(crate) fn decrypting(&self) -> bool {
        self.decrypting
    }

    pub(crate) fn reset(&mut self) {
        self.zeroize();
    }
}

/// Position of `key` in `alphabet`, folding case
pub(crate) fn key_position(alphabet: &Alphabet, key: char) -> CipherResult<usize> {
    alphabet
        .resolve(key, CaseMode::Fold)
        .map(|(pos, _)| pos)
        .ok_or_else(|| CipherError::KeyNotInAlphabet {
            key,
            alphabet: alphabet.name().to_string(),
        })
}

/// Normalize a secret to member runes, rejecting empty secrets
pub(crate) fn member_runes(alphabet: &Alphabet, secret: &str) -> CipherResult<Vec<char>> {
    let runes = secret
        .chars()
        .map(|r| key_position(alphabet, r).map(|pos| alphabet.runes()[pos]))
        .collect::<CipherResult<Vec<char>>>()?;
    if runes.is_empty() {
        return Err(CipherError::EmptySecret);
    }
    Ok(runes)
}
