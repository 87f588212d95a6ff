//! # Tabula
//!
//! Historical polyalphabetic substitution ciphers over natural-language
//! alphabets, with Unicode-aware case folding.
//!
//! These are teaching and puzzle ciphers. They offer no cryptographic
//! security whatsoever.
//!
//! ## Features
//!
//! - **Six variants**: Caesar, Didimus, Fibonacci, Bellaso, Vigenère autokey, Affine
//! - **Any script**: Latin, extended Latin, Spanish, German, Greek, Cyrillic, or custom
//! - **Chained alphabets**: digits and punctuation as fallback links with transposed keys
//! - **Text or bytes**: the same engine over code points or raw bytes
//!
//! ## Quick Start
//!
//! ```rust
//! use tabula::{Alphabet, Cipher, ChainedTabulaRecta, CaesarSequencer};
//!
//! let latin = Alphabet::new("latin", 'A'..='Z').unwrap();
//! let key = CaesarSequencer::new(&latin, 'D').unwrap();
//! let mut cipher = Cipher::new(ChainedTabulaRecta::from_alphabet(latin), Box::new(key)).unwrap();
//!
//! assert_eq!(cipher.encode("Attack at dawn").unwrap(), "Dwwdfn dw gdzq");
//! assert_eq!(cipher.decode("Dwwdfn dw gdzq").unwrap(), "Attack at dawn");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 CLI (tabula)                │
//! │  files | n-grams | keygen | registry        │
//! └─────────────────────┬───────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────┐
//! │                CIPHER FACADE                │
//! │          encode / decode / verify           │
//! └─────────────────────┬───────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────┐
//! │               STREAM ITERATOR               │
//! │   KeySequencer  |  ChainedTabulaRecta       │
//! └─────────────────────┬───────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────┐
//! │          TABULA RECTA / ALPHABET            │
//! └─────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod alphabet;
pub mod cipher;
pub mod files;
pub mod keygen;
pub mod ngram;
pub mod registry;

// Re-export main types at crate root
pub use alphabet::{Alphabet, AlphabetCatalog, CaseMode};
pub use cipher::{
    AffineSequencer, BellasoSequencer, CaesarSequencer, ChainedTabulaRecta, Cipher, CipherError,
    CipherResult, DidimusSequencer, FibonacciSequencer, KeySequencer, TabulaRecta, Variant,
    VigenereSequencer,
};
pub use ngram::NgramFormatter;
pub use registry::{CipherRegistry, CipherSpec, KeyMaterial};
