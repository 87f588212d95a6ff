//! Didimus: even positions use the prime key, odd positions an offset key

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{key_position, Cursor, KeySequencer, Variant};
use crate::alphabet::Alphabet;
use crate::cipher::error::CipherResult;

/// Two-key alternating sequencer
#[derive(Debug, Clone, Zeroize, ZeroizeOnDrop)]
pub struct DidimusSequencer {
    prime: char,
    alternate: char,
    cursor: Cursor,
}

impl DidimusSequencer {
    /// The alternate key sits `offset` places after the prime key. When that
    /// lands on the prime key itself it moves one further.
    pub fn new(alphabet: &Alphabet, prime: char, offset: usize) -> CipherResult<Self> {
        let n = alphabet.len();
        let prime_pos = key_position(alphabet, prime)?;
        let mut alt_pos = (prime_pos + offset) % n;
        if alt_pos == prime_pos {
            alt_pos = (alt_pos + 1) % n;
        }

        Ok(DidimusSequencer {
            prime: alphabet.runes()[prime_pos],
            alternate: alphabet.runes()[alt_pos],
            cursor: Cursor::default(),
        })
    }

    /// Key used at even positions
    pub fn prime(&self) -> char {
        self.prime
    }

    /// Key used at odd positions
    pub fn alternate(&self) -> char {
        self.alternate
    }
}

impl KeySequencer for DidimusSequencer {
    fn variant(&self) -> Variant {
        Variant::Didimus
    }

    fn get_key(&self, position: usize, _target: char) -> char {
        if self.cursor.adjusted(position) % 2 == 0 {
            self.prime
        } else {
            self.alternate
        }
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
        vec![self.prime, self.alternate]
    }

    fn reset(&mut self) {
        self.cursor.reset();
    }

    fn box_clone(&self) -> Box<dyn KeySequencer> {
        Box::new(self.clone())
    }
}
