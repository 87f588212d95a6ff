//! Explicit cipher registry
//!
//! Variants are registered by an initialization routine
//! ([`CipherRegistry::builtin`]) rather than at load time, so an embedding
//! application can start from an empty registry and add only what it needs.

use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::alphabet::Alphabet;
use crate::cipher::{
    AffineSequencer, BellasoSequencer, CaesarSequencer, ChainedTabulaRecta, Cipher, CipherError,
    CipherResult, DidimusSequencer, FibonacciSequencer, KeySequencer, Variant, VigenereSequencer,
};

/// Key material for any variant; each variant reads the fields it needs
#[derive(Clone, Debug, Default, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct KeyMaterial {
    /// Single key rune (Caesar, Didimus, Fibonacci)
    #[serde(default)]
    pub key: Option<char>,
    /// Alternate key offset (Didimus)
    #[serde(default)]
    pub offset: Option<usize>,
    /// Multi-rune secret (Bellaso, Vigenère)
    #[serde(default)]
    pub secret: Option<String>,
    /// Affine multiplier
    #[serde(default)]
    pub a: Option<u32>,
    /// Affine increment
    #[serde(default)]
    pub b: Option<u32>,
}

impl KeyMaterial {
    /// Set the key rune
    pub fn with_key(mut self, key: char) -> Self {
        self.key = Some(key);
        self
    }

    /// Set the Didimus offset
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set the secret
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Set the affine coefficients
    pub fn with_affine(mut self, a: u32, b: u32) -> Self {
        self.a = Some(a);
        self.b = Some(b);
        self
    }
}

/// Builds a sequencer for one variant
pub type SequencerBuilder = fn(&KeyMaterial, &Alphabet) -> CipherResult<Box<dyn KeySequencer>>;

/// One registered variant
#[derive(Clone)]
pub struct CipherEntry {
    /// Variant tag
    pub variant: Variant,
    /// One-line description
    pub summary: &'static str,
    /// Sequencer constructor
    pub build: SequencerBuilder,
}

impl std::fmt::Debug for CipherEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CipherEntry")
            .field("variant", &self.variant)
            .field("summary", &self.summary)
            .finish_non_exhaustive()
    }
}

/// Name-indexed set of cipher variants
#[derive(Clone, Debug, Default)]
pub struct CipherRegistry {
    entries: Vec<CipherEntry>,
}

impl CipherRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry populated with every built-in variant
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(CipherEntry {
            variant: Variant::Caesar,
            summary: "Constant key for every position",
            build: build_caesar,
        });
        registry.register(CipherEntry {
            variant: Variant::Didimus,
            summary: "Prime key on even positions, offset key on odd positions",
            build: build_didimus,
        });
        registry.register(CipherEntry {
            variant: Variant::Fibonacci,
            summary: "Prime key rotated by Fibonacci terms",
            build: build_fibonacci,
        });
        registry.register(CipherEntry {
            variant: Variant::Bellaso,
            summary: "Repeating multi-character secret",
            build: build_bellaso,
        });
        registry.register(CipherEntry {
            variant: Variant::Vigenere,
            summary: "Autokey: secret followed by the plaintext",
            build: build_vigenere,
        });
        registry.register(CipherEntry {
            variant: Variant::Affine,
            summary: "Closed-form (a*x + b) mod N",
            build: build_affine,
        });
        registry
    }

    /// Add an entry, replacing any entry for the same variant
    pub fn register(&mut self, entry: CipherEntry) -> Option<CipherEntry> {
        debug!(variant = %entry.variant, "registering cipher");
        match self.entries.iter_mut().find(|e| e.variant == entry.variant) {
            Some(existing) => Some(std::mem::replace(existing, entry)),
            None => {
                self.entries.push(entry);
                None
            }
        }
    }

    /// Look up an entry by variant name
    pub fn get(&self, name: &str) -> CipherResult<&CipherEntry> {
        let variant: Variant = name.parse()?;
        self.entries
            .iter()
            .find(|e| e.variant == variant)
            .ok_or_else(|| CipherError::UnknownCipher(name.to_string()))
    }

    /// Entries in registration order
    pub fn entries(&self) -> &[CipherEntry] {
        &self.entries
    }

    /// Build a sequencer for `name` over `alphabet`
    pub fn build(
        &self,
        name: &str,
        material: &KeyMaterial,
        alphabet: &Alphabet,
    ) -> CipherResult<Box<dyn KeySequencer>> {
        (self.get(name)?.build)(material, alphabet)
    }
}

/// A complete cipher description: variant plus key material
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CipherSpec {
    /// Variant to use
    pub cipher: Variant,
    /// Key material
    #[serde(flatten)]
    pub material: KeyMaterial,
}

impl CipherSpec {
    /// Build a verified cipher over `chain`
    pub fn build(&self, registry: &CipherRegistry, chain: ChainedTabulaRecta) -> CipherResult<Cipher> {
        let sequencer = registry.build(self.cipher.name(), &self.material, chain.primary().alphabet())?;
        Cipher::new(chain, sequencer)
    }
}

fn require<T: Copy>(value: Option<T>, cipher: Variant, what: &'static str) -> CipherResult<T> {
    value.ok_or(CipherError::MissingKeyMaterial {
        cipher: cipher.name(),
        what,
    })
}

fn require_secret(material: &KeyMaterial, cipher: Variant) -> CipherResult<&str> {
    material
        .secret
        .as_deref()
        .ok_or(CipherError::MissingKeyMaterial {
            cipher: cipher.name(),
            what: "a secret",
        })
}

fn build_caesar(m: &KeyMaterial, alphabet: &Alphabet) -> CipherResult<Box<dyn KeySequencer>> {
    let key = require(m.key, Variant::Caesar, "a key")?;
    Ok(Box::new(CaesarSequencer::new(alphabet, key)?))
}

fn build_didimus(m: &KeyMaterial, alphabet: &Alphabet) -> CipherResult<Box<dyn KeySequencer>> {
    let key = require(m.key, Variant::Didimus, "a key")?;
    let offset = require(m.offset, Variant::Didimus, "an offset")?;
    Ok(Box::new(DidimusSequencer::new(alphabet, key, offset)?))
}

fn build_fibonacci(m: &KeyMaterial, alphabet: &Alphabet) -> CipherResult<Box<dyn KeySequencer>> {
    let key = require(m.key, Variant::Fibonacci, "a key")?;
    Ok(Box::new(FibonacciSequencer::new(alphabet, key)?))
}

fn build_bellaso(m: &KeyMaterial, alphabet: &Alphabet) -> CipherResult<Box<dyn KeySequencer>> {
    let secret = require_secret(m, Variant::Bellaso)?;
    Ok(Box::new(BellasoSequencer::new(alphabet, secret)?))
}

fn build_vigenere(m: &KeyMaterial, alphabet: &Alphabet) -> CipherResult<Box<dyn KeySequencer>> {
    let secret = require_secret(m, Variant::Vigenere)?;
    Ok(Box::new(VigenereSequencer::new(alphabet, secret)?))
}

fn build_affine(m: &KeyMaterial, alphabet: &Alphabet) -> CipherResult<Box<dyn KeySequencer>> {
    let a = require(m.a, Variant::Affine, "coefficient a")?;
    let b = require(m.b, Variant::Affine, "coefficient b")?;
    Ok(Box::new(AffineSequencer::new(alphabet, a, b)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn latin() -> Alphabet {
        Alphabet::new("latin", 'A'..='Z').unwrap()
    }

    fn full_material() -> KeyMaterial {
        KeyMaterial::default()
            .with_key('K')
            .with_offset(3)
            .with_secret("LEMON")
            .with_affine(7, 3)
    }

    #[test]
    fn test_builtin_builds_every_variant() {
        let registry = CipherRegistry::builtin();
        assert_eq!(registry.entries().len(), 6);

        let material = full_material();
        for entry in registry.entries() {
            let seq = registry.build(entry.variant.name(), &material, &latin()).unwrap();
            assert_eq!(seq.variant(), entry.variant);
        }
    }

    #[test]
    fn test_empty_registry() {
        let registry = CipherRegistry::new();
        assert_eq!(
            registry.get("caesar").unwrap_err(),
            CipherError::UnknownCipher("caesar".into())
        );
    }

    #[test]
    fn test_missing_material() {
        let registry = CipherRegistry::builtin();
        let err = registry
            .build("didimus", &KeyMaterial::default().with_key('A'), &latin())
            .unwrap_err();
        assert_eq!(
            err,
            CipherError::MissingKeyMaterial {
                cipher: "didimus",
                what: "an offset"
            }
        );
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = CipherRegistry::builtin();
        let previous = registry.register(CipherEntry {
            variant: Variant::Caesar,
            summary: "replacement",
            build: build_caesar,
        });
        assert!(previous.is_some());
        assert_eq!(registry.get("caesar").unwrap().summary, "replacement");
        assert_eq!(registry.entries().len(), 6);
    }

    #[test]
    fn test_cipher_spec_from_json() {
        let spec: CipherSpec =
            serde_json::from_str(r#"{"cipher": "bellaso", "secret": "LEMON"}"#).unwrap();
        let registry = CipherRegistry::builtin();
        let mut cipher = spec
            .build(&registry, ChainedTabulaRecta::from_alphabet(latin()))
            .unwrap();
        assert_eq!(cipher.encode("ATTACKATDAWN").unwrap(), "LXFOPVEFRNHR");
    }
}
