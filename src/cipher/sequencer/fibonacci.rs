//! Fibonacci: the prime key advanced by a bounded Fibonacci series

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{key_position, Cursor, KeySequencer, Variant};
use crate::alphabet::Alphabet;
use crate::cipher::error::CipherResult;

/// Terms added to the prime key's position, cycled by adjusted position
pub const FIBONACCI_TERMS: [usize; 10] = [0, 1, 1, 2, 3, 5, 8, 13, 21, 34];

/// Slowly rotating key sequencer
#[derive(Debug, Clone, Zeroize, ZeroizeOnDrop)]
pub struct FibonacciSequencer {
    prime: char,
    keys: Vec<char>,
    cursor: Cursor,
}

impl FibonacciSequencer {
    /// Precompute the rotated keys for `prime` in `alphabet`
    pub fn new(alphabet: &Alphabet, prime: char) -> CipherResult<Self> {
        let n = alphabet.len();
        let prime_pos = key_position(alphabet, prime)?;
        let keys = FIBONACCI_TERMS
            .iter()
            .map(|term| alphabet.runes()[(prime_pos + term) % n])
            .collect();

        Ok(FibonacciSequencer {
            prime: alphabet.runes()[prime_pos],
            keys,
            cursor: Cursor::default(),
        })
    }

    /// The unrotated key
    pub fn prime(&self) -> char {
        self.prime
    }
}

impl KeySequencer for FibonacciSequencer {
    fn variant(&self) -> Variant {
        Variant::Fibonacci
    }

    fn get_key(&self, position: usize, _target: char) -> char {
        self.keys[self.cursor.adjusted(position) % self.keys.len()]
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
        self.keys.clone()
    }

    fn reset(&mut self) {
        self.cursor.reset();
    }

    fn box_clone(&self) -> Box<dyn KeySequencer> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation() {
        let latin = Alphabet::new("latin", 'A'..='Z').unwrap();
        let seq = FibonacciSequencer::new(&latin, 'B').unwrap();
        let keys: String = (0..10).map(|p| seq.get_key(p, 'X')).collect();
        // B + 0,1,1,2,3,5,8,13,21,34 (mod 26)
        assert_eq!(keys, "BCCDEGJOWJ");
        assert_eq!(seq.get_key(10, 'X'), 'B');
    }

    #[test]
    fn test_small_alphabet_wraps() {
        let digits = Alphabet::new("digits", '0'..='9').unwrap();
        let seq = FibonacciSequencer::new(&digits, '9').unwrap();
        assert_eq!(seq.get_key(9, 'X'), '3');
        assert!(seq.verify(&|k: char| k.is_ascii_digit()).is_ok());
    }
}
