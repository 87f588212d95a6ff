//! Bellaso: the key cycles through a multi-rune secret

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{member_runes, Cursor, KeySequencer, Variant};
use crate::alphabet::Alphabet;
use crate::cipher::error::CipherResult;

/// Repeating-secret sequencer
#[derive(Debug, Clone, Zeroize, ZeroizeOnDrop)]
pub struct BellasoSequencer {
    secret: Vec<char>,
    cursor: Cursor,
}

impl BellasoSequencer {
    /// Every rune of `secret` must belong to `alphabet`
    pub fn new(alphabet: &Alphabet, secret: &str) -> CipherResult<Self> {
        Ok(BellasoSequencer {
            secret: member_runes(alphabet, secret)?,
            cursor: Cursor::default(),
        })
    }

    /// Secret length in runes
    pub fn period(&self) -> usize {
        self.secret.len()
    }
}

impl KeySequencer for BellasoSequencer {
    fn variant(&self) -> Variant {
        Variant::Bellaso
    }

    fn get_key(&self, position: usize, _target: char) -> char {
        self.secret[self.cursor.adjusted(position) % self.secret.len()]
    }

    fn skip(&mut self) -> usize {
        self.cursor.skip()
    }

    fn skipped(&self) -> usize {
        self.cursor.skipped()
    }

    fn set_decryption_mode(&mut self, decrypting: bool) {
        self.cursor.set_decrypting(decrypting);
    }

    fn key_runes(&self) -> Vec<char> {
        self.secret.clone()
    }

    fn reset(&mut self) {
        self.cursor.reset();
    }

    fn box_clone(&self) -> Box<dyn KeySequencer> {
        Box::new(self.clone())
    }
}
