//! Vigenère autokey: the secret primes the key stream, the plaintext extends it
//!
//! At adjusted position `p` the key is `secret[p]` while `p < len(secret)`,
//! afterwards the plaintext rune recorded `len(secret)` positions earlier.
//! Decoding at `p` therefore needs the plaintext already recovered at
//! `p - len(secret)`: processing must run strictly left to right.

use tracing::trace;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{member_runes, Cursor, KeySequencer, Variant};
use crate::alphabet::Alphabet;
use crate::cipher::error::CipherResult;

/// Autokey sequencer
#[derive(Debug, Clone, Zeroize, ZeroizeOnDrop)]
pub struct VigenereSequencer {
    secret: Vec<char>,
    /// Last `len(secret)` plaintext runes; entry `i % len` holds plaintext `i`
    history: Vec<char>,
    fed: usize,
    cursor: Cursor,
}

impl VigenereSequencer {
    /// Every rune of `secret` must belong to `alphabet`
    pub fn new(alphabet: &Alphabet, secret: &str) -> CipherResult<Self> {
        let secret = member_runes(alphabet, secret)?;
        Ok(VigenereSequencer {
            history: Vec::with_capacity(secret.len()),
            secret,
            fed: 0,
            cursor: Cursor::default(),
        })
    }

    /// Plaintext runes recorded since the last reset
    pub fn fed(&self) -> usize {
        self.fed
    }
}

impl KeySequencer for VigenereSequencer {
    fn variant(&self) -> Variant {
        Variant::Vigenere
    }

    fn get_key(&self, position: usize, _target: char) -> char {
        let len = self.secret.len();
        let p = self.cursor.adjusted(position);
        if p < len {
            return self.secret[p];
        }
        debug_assert!(
            p < self.fed + len,
            "autokey position {p} requested with only {} plaintext runes fed",
            self.fed
        );
        self.history[p % len]
    }

    fn feedback(&mut self, plain: char) {
        let len = self.secret.len();
        if self.history.len() < len {
            self.history.push(plain);
        } else {
            self.history[self.fed % len] = plain;
        }
        self.fed += 1;
        trace!(fed = self.fed, decrypting = self.cursor.decrypting(), "autokey feedback");
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
        self.history.zeroize();
        self.fed = 0;
        self.cursor.reset();
    }

    fn box_clone(&self) -> Box<dyn KeySequencer> {
        Box::new(self.clone())
    }
}
