//! Position-aware stream driver
//!
//! One iterator per encode/decode call. Each [`StreamIterator::step`]
//! transforms the element at the cursor and advances it; the caller repeats
//! until the step reports completion and then takes the
//! [`result`](StreamIterator::result). Text and binary input share the same
//! algorithm and differ only in the element type.

use std::fmt;
use tracing::trace;

use super::chain::{ChainedTabulaRecta, Location};
use super::error::{CipherError, CipherResult};
use super::sequencer::KeySequencer;
use super::tabula::Direction;
use crate::alphabet::CaseMode;

/// Element type a stream iterator works on
pub trait Symbol: Copy + Eq + fmt::Debug {
    /// Case handling for input elements of this type
    const CASE_MODE: CaseMode;

    /// The element as a rune
    fn to_rune(self) -> char;

    /// The rune as an element, if representable
    fn from_rune(rune: char) -> Option<Self>;
}

impl Symbol for char {
    const CASE_MODE: CaseMode = CaseMode::Fold;

    fn to_rune(self) -> char {
        self
    }

    fn from_rune(rune: char) -> Option<Self> {
        Some(rune)
    }
}

/// Bytes map onto the Latin-1 code points and are matched exactly
impl Symbol for u8 {
    const CASE_MODE: CaseMode = CaseMode::Exact;

    fn to_rune(self) -> char {
        char::from(self)
    }

    fn from_rune(rune: char) -> Option<Self> {
        u8::try_from(rune).ok()
    }
}

/// Cooperative per-element transform loop
pub struct StreamIterator<'a, S: Symbol> {
    input: &'a [S],
    pos: usize,
    chain: &'a ChainedTabulaRecta,
    sequencer: &'a mut dyn KeySequencer,
    direction: Direction,
    output: Vec<S>,
}

/// Iterator over Unicode code points
pub type TextIterator<'a> = StreamIterator<'a, char>;

/// Iterator over raw bytes
pub type BinaryIterator<'a> = StreamIterator<'a, u8>;

impl<'a, S: Symbol> StreamIterator<'a, S> {
    /// Prepare a run over `input`; also sets the sequencer's direction
    pub fn new(
        input: &'a [S],
        chain: &'a ChainedTabulaRecta,
        sequencer: &'a mut dyn KeySequencer,
        direction: Direction,
    ) -> Self {
        sequencer.set_decryption_mode(direction == Direction::Decode);
        StreamIterator {
            input,
            pos: 0,
            chain,
            sequencer,
            direction,
            output: Vec::with_capacity(input.len()),
        }
    }

    /// Index of the next element to transform
    pub fn position(&self) -> usize {
        self.pos
    }

    /// True once every element has been transformed
    pub fn is_done(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Transform one element. Returns `Ok(true)` once the input is exhausted.
    pub fn step(&mut self) -> CipherResult<bool> {
        let Some(&target) = self.input.get(self.pos) else {
            return Ok(true);
        };
        let rune = target.to_rune();

        let out = match self.chain.locate(rune, S::CASE_MODE) {
            None => {
                let skipped = self.sequencer.skip();
                trace!(position = self.pos, skipped, "pass-through {:?}", rune);
                target
            }
            Some(location) => {
                let result = self.transform(rune, location)?;
                let plain = match self.direction {
                    Direction::Encode => rune,
                    Direction::Decode => result,
                };
                self.sequencer.feedback(plain);
                S::from_rune(result).ok_or(CipherError::NotByteRepresentable(result))?
            }
        };

        self.output.push(out);
        self.pos += 1;
        Ok(self.is_done())
    }

    /// Step until done
    pub fn run(&mut self) -> CipherResult<()> {
        while !self.step()? {}
        Ok(())
    }

    /// Take the accumulated output, leaving the accumulator empty
    pub fn result(&mut self) -> Vec<S> {
        std::mem::take(&mut self.output)
    }

    fn transform(&self, rune: char, target: Location) -> CipherResult<char> {
        let chain = self.chain;
        let link = &chain.links()[target.link];

        if let Some(substituted) = self.sequencer.substitute(target.shift, link.len(), self.direction) {
            return Ok(link.rune_at(substituted?, target.folding));
        }

        let key = self.sequencer.get_key(self.pos, rune);
        let key_location = chain
            .locate(key, CaseMode::Fold)
            .ok_or(CipherError::KeyNotInChain { key, position: self.pos })?;

        Ok(chain.transform(target, key_location, self.direction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;
    use crate::cipher::sequencer::{AffineSequencer, CaesarSequencer, VigenereSequencer};

    fn chain() -> ChainedTabulaRecta {
        ChainedTabulaRecta::from_alphabet(Alphabet::new("latin", 'A'..='Z').unwrap())
    }

    #[test]
    fn test_step_reports_completion() {
        let chain = chain();
        let mut seq = CaesarSequencer::new(chain.primary().alphabet(), 'D').unwrap();
        let input: Vec<char> = "AB".chars().collect();
        let mut it = TextIterator::new(&input, &chain, &mut seq, Direction::Encode);

        assert!(!it.step().unwrap());
        assert_eq!(it.position(), 1);
        assert!(it.step().unwrap());
        assert!(it.step().unwrap());
        assert_eq!(it.result(), vec!['D', 'E']);
        assert!(it.result().is_empty());
    }

    #[test]
    fn test_empty_input_completes_immediately() {
        let chain = chain();
        let mut seq = CaesarSequencer::new(chain.primary().alphabet(), 'D').unwrap();
        let mut it = TextIterator::new(&[], &chain, &mut seq, Direction::Encode);
        assert!(it.step().unwrap());
        assert!(it.result().is_empty());
    }

    #[test]
    fn test_pass_through_is_skipped() {
        let chain = chain();
        let mut seq = CaesarSequencer::new(chain.primary().alphabet(), 'B').unwrap();
        let input: Vec<char> = "A-B".chars().collect();
        let mut it = TextIterator::new(&input, &chain, &mut seq, Direction::Encode);
        it.run().unwrap();
        assert_eq!(it.result(), vec!['B', '-', 'C']);
        assert_eq!(seq.skipped(), 1);
    }

    #[test]
    fn test_key_outside_chain_is_configuration_error() {
        let chain = chain();
        let cyrillic = Alphabet::new("cyrillic", "АБВ".chars()).unwrap();
        let mut seq = CaesarSequencer::new(&cyrillic, 'Б').unwrap();
        let input: Vec<char> = "AB".chars().collect();
        let mut it = TextIterator::new(&input, &chain, &mut seq, Direction::Encode);

        let err = it.run().unwrap_err();
        assert_eq!(err, CipherError::KeyNotInChain { key: 'Б', position: 0 });
        assert!(err.is_configuration());
    }

    #[test]
    fn test_substitution_stays_in_target_link() {
        let chain = chain().with_alphabet(Alphabet::new("digits", '0'..='9').unwrap());
        let mut seq = AffineSequencer::new(chain.primary().alphabet(), 7, 3).unwrap();
        let input: Vec<char> = "A1z".chars().collect();
        let mut it = TextIterator::new(&input, &chain, &mut seq, Direction::Encode);
        it.run().unwrap();
        // 7*0+3 = 3 in latin, 7*1+3 = 0 mod 10 in digits, 7*25+3 = 22 mod 26
        assert_eq!(it.result(), vec!['D', '0', 'w']);
    }

    #[test]
    fn test_binary_is_case_exact() {
        let chain = chain();
        let mut seq = CaesarSequencer::new(chain.primary().alphabet(), 'B').unwrap();
        let input = b"Ab\x00";
        let mut it = BinaryIterator::new(input, &chain, &mut seq, Direction::Encode);
        it.run().unwrap();
        assert_eq!(it.result(), b"Bb\x00".to_vec());
    }

    #[test]
    fn test_autokey_decode_feeds_plaintext() {
        let chain = chain();
        let alphabet = chain.primary().alphabet().clone();

        let plain: Vec<char> = "HELLOWORLD".chars().collect();
        let mut enc = VigenereSequencer::new(&alphabet, "KEY").unwrap();
        let mut it = TextIterator::new(&plain, &chain, &mut enc, Direction::Encode);
        it.run().unwrap();
        let cipher = it.result();

        let mut dec = VigenereSequencer::new(&alphabet, "KEY").unwrap();
        let mut it = TextIterator::new(&cipher, &chain, &mut dec, Direction::Decode);
        it.run().unwrap();
        assert_eq!(it.result(), plain);
    }
}
