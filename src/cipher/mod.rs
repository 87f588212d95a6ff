//! Substitution engine
//!
//! This module provides the building blocks, leaves first:
//! - `tabula`: single-alphabet tabula recta
//! - `chain`: ordered fallback links with key transposition
//! - `sequencer`: per-position key strategies, one per variant
//! - `stream`: the per-element driver for text and bytes
//! - `facade`: [`Cipher`], whole-buffer encode/decode

pub mod chain;
pub mod error;
pub mod facade;
pub mod sequencer;
pub mod stream;
pub mod tabula;

pub use chain::{ChainedTabulaRecta, Location};
pub use error::{CipherError, CipherResult, ErrorKind};
pub use facade::Cipher;
pub use sequencer::{
    AffineSequencer, BellasoSequencer, CaesarSequencer, DidimusSequencer, FibonacciSequencer,
    KeySequencer, Variant, VigenereSequencer,
};
pub use stream::{BinaryIterator, StreamIterator, Symbol, TextIterator};
pub use tabula::{Direction, TabulaRecta};

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::alphabet::{Alphabet, AlphabetCatalog};

    fn roundtrip(cipher: &mut Cipher, text: &str) {
        let encoded = cipher.encode(text).unwrap();
        assert_eq!(cipher.decode(&encoded).unwrap(), text, "variant {}", cipher.variant());
    }

    #[test]
    fn test_every_variant_over_every_script() {
        let catalog = AlphabetCatalog::builtin().unwrap();
        let samples = [
            ("latin", 'K', "Gallia est omnis divisa in partes tres."),
            ("german", 'Ü', "Straße über Fluß, Größe 42!"),
            ("greek", 'Λ', "Γνῶθι σεαυτόν, ἀρετή καὶ σοφία."),
            ("cyrillic", 'Ж', "Съешь же ещё этих мягких булок."),
            ("spanish", 'Ñ', "El niño añora la montaña."),
            ("latin-ext", 'Ø', "Ça va? Œuvre à Zürich, ñandú 2024!"),
            ("bytes", 'K', "Größe Ÿ über ÿ, ǅ 42!"),
        ];

        for (name, key, text) in samples {
            let alphabet = catalog.get(name).unwrap().clone();
            let sequencers: Vec<Box<dyn KeySequencer>> = vec![
                Box::new(CaesarSequencer::new(&alphabet, key).unwrap()),
                Box::new(DidimusSequencer::new(&alphabet, key, 7).unwrap()),
                Box::new(FibonacciSequencer::new(&alphabet, key).unwrap()),
                Box::new(BellasoSequencer::new(&alphabet, &key.to_string().repeat(2)).unwrap()),
                Box::new(VigenereSequencer::new(&alphabet, &key.to_string()).unwrap()),
                // 7 is coprime with 10 and with every size above (26, 30, 24, 33, 27, 55, 256)
                Box::new(AffineSequencer::new(&alphabet, 7, 4).unwrap()),
            ];

            for seq in sequencers {
                let chain = ChainedTabulaRecta::from_alphabet(alphabet.clone())
                    .with_alphabet(catalog.get("digits").unwrap().clone());
                let mut cipher = Cipher::new(chain, seq).unwrap();
                roundtrip(&mut cipher, text);
            }
        }
    }

    #[test]
    fn test_german_sharp_s_survives() {
        let catalog = AlphabetCatalog::builtin().unwrap();
        let german = catalog.get("german").unwrap().clone();
        let seq = CaesarSequencer::new(&german, 'B').unwrap();
        let mut cipher = Cipher::new(ChainedTabulaRecta::from_alphabet(german), Box::new(seq)).unwrap();

        // ß is the last rune; shifting by one wraps to 'a'
        assert_eq!(cipher.encode("ß").unwrap(), "a");
        assert_eq!(cipher.decode("a").unwrap(), "ß");
        // 'z' moves onto the umlaut, keeping lowercase
        assert_eq!(cipher.encode("z").unwrap(), "ä");
    }

    #[test]
    fn test_affine_inverse_per_script() {
        let catalog = AlphabetCatalog::builtin().unwrap();
        for (name, a) in [("greek", 5), ("cyrillic", 5), ("spanish", 5), ("german", 7)] {
            let alphabet = catalog.get(name).unwrap().clone();
            let seq = AffineSequencer::new(&alphabet, a, 3).unwrap();
            let mut cipher = Cipher::new(ChainedTabulaRecta::from_alphabet(alphabet.clone()), Box::new(seq)).unwrap();

            let text: String = alphabet.runes().iter().collect();
            let encoded = cipher.encode(&text).unwrap();
            let mut distinct: Vec<char> = encoded.chars().collect();
            distinct.sort_unstable();
            distinct.dedup();
            assert_eq!(distinct.len(), alphabet.len(), "affine over {name} is a permutation");
            assert_eq!(cipher.decode(&encoded).unwrap(), text);
        }
    }

    #[test]
    fn test_affine_rejects_shared_factor() {
        let catalog = AlphabetCatalog::builtin().unwrap();
        let german = catalog.get("german").unwrap();
        assert_eq!(
            AffineSequencer::new(german, 5, 0).unwrap_err(),
            CipherError::NotCoprime { a: 5, size: 30 }
        );
    }

    #[test]
    fn test_mixed_alphabet_keeps_case_on_roundtrip() {
        let mixed = Alphabet::new("mixed", "ABC123".chars()).unwrap();
        let seq = CaesarSequencer::new(&mixed, '1').unwrap();
        let mut cipher = Cipher::new(ChainedTabulaRecta::from_alphabet(mixed), Box::new(seq)).unwrap();

        // lowercase has no member to fold onto, so it passes through
        assert_eq!(cipher.encode("a").unwrap(), "a");
        let encoded = cipher.encode("aA b3").unwrap();
        assert_eq!(encoded, "a1 b C");
        assert_eq!(cipher.decode(&encoded).unwrap(), "aA b3");
    }

    #[test]
    fn test_bytes_alphabet_in_text_mode() {
        let catalog = AlphabetCatalog::builtin().unwrap();
        let bytes = catalog.get("bytes").unwrap().clone();
        let seq = CaesarSequencer::new(&bytes, 'K').unwrap();
        let mut cipher = Cipher::new(ChainedTabulaRecta::from_alphabet(bytes), Box::new(seq)).unwrap();

        // 'Ÿ' lies outside Latin-1 and must not fold onto 'ÿ'
        assert_eq!(cipher.encode("Ÿ").unwrap(), "Ÿ");
        let encoded = cipher.encode("ÿŸ").unwrap();
        assert_eq!(cipher.decode(&encoded).unwrap(), "ÿŸ");
    }
}
