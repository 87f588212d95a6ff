//! Affine: closed-form `E(x) = (a·x + b) mod N`, no table key

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{Cursor, KeySequencer, Variant};
use crate::alphabet::Alphabet;
use crate::cipher::error::{CipherError, CipherResult};
use crate::cipher::tabula::Direction;

/// Affine transform sequencer
#[derive(Debug, Clone, Zeroize, ZeroizeOnDrop)]
pub struct AffineSequencer {
    a: u32,
    b: u32,
    cursor: Cursor,
}

impl AffineSequencer {
    /// `a` must be coprime with the primary alphabet size
    pub fn new(alphabet: &Alphabet, a: u32, b: u32) -> CipherResult<Self> {
        let seq = AffineSequencer {
            a,
            b,
            cursor: Cursor::default(),
        };
        seq.verify_modulus(alphabet.len())?;
        Ok(seq)
    }

    /// Coefficients `(a, b)`
    pub fn coefficients(&self) -> (u32, u32) {
        (self.a, self.b)
    }
}

impl KeySequencer for AffineSequencer {
    fn variant(&self) -> Variant {
        Variant::Affine
    }

    /// Placeholder: the affine transform needs no key rune
    fn get_key(&self, _position: usize, target: char) -> char {
        target
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
        Vec::new()
    }

    fn verify_modulus(&self, size: usize) -> CipherResult<()> {
        if gcd(self.a as u64, size as u64) != 1 {
            return Err(CipherError::NotCoprime { a: self.a, size });
        }
        Ok(())
    }

    fn substitute(
        &self,
        shift: usize,
        size: usize,
        direction: Direction,
    ) -> Option<CipherResult<usize>> {
        let n = size as u64;
        let x = shift as u64 % n;
        let a = self.a as u64 % n;
        let b = self.b as u64 % n;

        let out = match direction {
            Direction::Encode => Ok((a * x + b) % n),
            Direction::Decode => match mod_inverse(a, n) {
                Some(inv) => Ok(inv * ((x + n - b) % n) % n),
                None => Err(CipherError::NotInvertible { a: self.a, size }),
            },
        };
        Some(out.map(|y| y as usize))
    }

    fn reset(&mut self) {
        self.cursor.reset();
    }

    fn box_clone(&self) -> Box<dyn KeySequencer> {
        Box::new(self.clone())
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Multiplicative inverse of `a` modulo `n` by the extended Euclidean algorithm
pub fn mod_inverse(a: u64, n: u64) -> Option<u64> {
    if n == 1 {
        return Some(0);
    }
    let (mut old_r, mut r) = (a as i128, n as i128);
    let (mut old_s, mut s) = (1i128, 0i128);
    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_s, s) = (s, old_s - q * s);
    }
    if old_r != 1 {
        return None;
    }
    Some(old_s.rem_euclid(n as i128) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn latin() -> Alphabet {
        Alphabet::new("latin", 'A'..='Z').unwrap()
    }

    #[test]
    fn test_encode_decode_positions() {
        let seq = AffineSequencer::new(&latin(), 5, 8).unwrap();
        let e = seq.substitute(0, 26, Direction::Encode).unwrap().unwrap();
        assert_eq!(e, 8);
        let d = seq.substitute(e, 26, Direction::Decode).unwrap().unwrap();
        assert_eq!(d, 0);

        for x in 0..26 {
            let y = seq.substitute(x, 26, Direction::Encode).unwrap().unwrap();
            assert_eq!(seq.substitute(y, 26, Direction::Decode).unwrap().unwrap(), x);
        }
    }

    #[test]
    fn test_mod_inverse() {
        assert_eq!(mod_inverse(5, 26), Some(21));
        assert_eq!(mod_inverse(13, 26), None);
        assert_eq!(mod_inverse(3, 10), Some(7));
    }

    #[test]
    fn test_rejects_non_coprime() {
        assert_eq!(
            AffineSequencer::new(&latin(), 13, 1).unwrap_err(),
            CipherError::NotCoprime { a: 13, size: 26 }
        );
        let seq = AffineSequencer::new(&latin(), 5, 8).unwrap();
        assert!(seq.verify_modulus(10).is_err());
        assert!(seq.verify_modulus(33).is_ok());
    }

    #[test]
    fn test_key_is_placeholder() {
        let seq = AffineSequencer::new(&latin(), 5, 8).unwrap();
        assert_eq!(seq.get_key(4, 'Q'), 'Q');
        assert!(seq.key_runes().is_empty());
    }
}
