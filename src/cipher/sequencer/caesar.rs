//! Caesar: one constant key for every position

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{key_position, Cursor, KeySequencer, Variant};
use crate::alphabet::Alphabet;
use crate::cipher::error::CipherResult;

/// Constant-key sequencer
#[derive(Debug, Clone, Zeroize, ZeroizeOnDrop)]
pub struct CaesarSequencer {
    key: char,
    cursor: Cursor,
}

impl CaesarSequencer {
    /// Sequencer returning `key` (normalized to its member form) everywhere
    pub fn new(alphabet: &Alphabet, key: char) -> CipherResult<Self> {
        let pos = key_position(alphabet, key)?;
        Ok(CaesarSequencer {
            key: alphabet.runes()[pos],
            cursor: Cursor::default(),
        })
    }

    /// The configured key
    pub fn key(&self) -> char {
        self.key
    }
}

impl KeySequencer for CaesarSequencer {
    fn variant(&self) -> Variant {
        Variant::Caesar
    }

    fn get_key(&self, _position: usize, _target: char) -> char {
        self.key
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
        vec![self.key]
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
    fn test_constant_key() {
        let latin = Alphabet::new("latin", 'A'..='Z').unwrap();
        let mut seq = CaesarSequencer::new(&latin, 'd').unwrap();
        assert_eq!(seq.key(), 'D');
        assert_eq!(seq.get_key(0, 'A'), 'D');
        seq.skip();
        assert_eq!(seq.get_key(99, 'Q'), 'D');
    }

    #[test]
    fn test_rejects_foreign_key() {
        let latin = Alphabet::new("latin", 'A'..='Z').unwrap();
        assert!(CaesarSequencer::new(&latin, 'Ж').is_err());
    }
}
