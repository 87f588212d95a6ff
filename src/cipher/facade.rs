//! Whole-buffer encode/decode over a chain and a sequencer

use tracing::debug;

use super::chain::ChainedTabulaRecta;
use super::error::{CipherError, CipherResult};
use super::sequencer::{member_runes, KeySequencer, Variant};
use super::stream::{StreamIterator, Symbol};
use super::tabula::Direction;
use crate::alphabet::{Alphabet, CaseMode};

/// A configured cipher: one chain of alphabets plus one key sequencer
///
/// Operations take `&mut self` because sequencer state is ordered and
/// call-scoped. Clone the cipher to run independent operations in parallel.
#[derive(Debug, Clone)]
pub struct Cipher {
    chain: ChainedTabulaRecta,
    sequencer: Box<dyn KeySequencer>,
}

impl Cipher {
    /// Wire a chain and a sequencer, running the key pre-flight checks
    pub fn new(chain: ChainedTabulaRecta, sequencer: Box<dyn KeySequencer>) -> CipherResult<Self> {
        let cipher = Cipher { chain, sequencer };
        cipher.verify_key()?;
        debug!(
            variant = %cipher.sequencer.variant(),
            alphabet = cipher.alphabet().name(),
            links = cipher.chain.links().len(),
            "cipher configured"
        );
        Ok(cipher)
    }

    /// Primary alphabet
    pub fn alphabet(&self) -> &Alphabet {
        self.chain.primary().alphabet()
    }

    /// The chain of alphabets
    pub fn chain(&self) -> &ChainedTabulaRecta {
        &self.chain
    }

    /// The configured variant
    pub fn variant(&self) -> Variant {
        self.sequencer.variant()
    }

    /// Check that every configured key is a member of the primary alphabet
    /// and that the sequencer can operate on every link
    pub fn verify_key(&self) -> CipherResult<()> {
        let primary = self.alphabet();
        self.sequencer
            .verify(&|key: char| primary.contains(key, CaseMode::Fold))
            .map_err(|err| match err {
                CipherError::IllegalKey(key) => CipherError::KeyNotInAlphabet {
                    key,
                    alphabet: primary.name().to_string(),
                },
                other => other,
            })?;

        for link in self.chain.links() {
            self.sequencer.verify_modulus(link.len())?;
        }
        Ok(())
    }

    /// Check a candidate secret against the primary alphabet
    pub fn verify_secret(&self, secret: &str) -> CipherResult<()> {
        member_runes(self.alphabet(), secret).map(|_| ())
    }

    /// Parse a single-rune key
    pub fn parse_key(key: &str) -> CipherResult<char> {
        let mut runes = key.chars();
        match (runes.next(), runes.next()) {
            (Some(rune), None) => Ok(rune),
            _ => Err(CipherError::KeyNotSingleRune(key.chars().count())),
        }
    }

    /// Encrypt text
    pub fn encode(&mut self, plain: &str) -> CipherResult<String> {
        let input: Vec<char> = plain.chars().collect();
        let output = self.run(&input, Direction::Encode)?;
        Ok(output.into_iter().collect())
    }

    /// Decrypt text
    pub fn decode(&mut self, cipher: &str) -> CipherResult<String> {
        let input: Vec<char> = cipher.chars().collect();
        let output = self.run(&input, Direction::Decode)?;
        Ok(output.into_iter().collect())
    }

    /// Encrypt raw bytes; every link must be byte-representable
    pub fn encode_bytes(&mut self, plain: &[u8]) -> CipherResult<Vec<u8>> {
        self.require_byte_range()?;
        self.run(plain, Direction::Encode)
    }

    /// Decrypt raw bytes; every link must be byte-representable
    pub fn decode_bytes(&mut self, cipher: &[u8]) -> CipherResult<Vec<u8>> {
        self.require_byte_range()?;
        self.run(cipher, Direction::Decode)
    }

    fn require_byte_range(&self) -> CipherResult<()> {
        match self.chain.first_non_byte() {
            Some(alphabet) => Err(CipherError::NotByteAlphabet(alphabet.name().to_string())),
            None => Ok(()),
        }
    }

    fn run<S: Symbol>(&mut self, input: &[S], direction: Direction) -> CipherResult<Vec<S>> {
        self.sequencer.reset();
        let outcome = {
            let mut iter = StreamIterator::new(input, &self.chain, self.sequencer.as_mut(), direction);
            iter.run().map(|()| iter.result())
        };
        debug!(
            ?direction,
            elements = input.len(),
            skipped = self.sequencer.skipped(),
            ok = outcome.is_ok(),
            "stream finished"
        );
        self.sequencer.reset();
        outcome
    }
}
