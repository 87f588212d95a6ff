//! Cipher error types

use thiserror::Error;

/// Broad classification of a [`CipherError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The configured chain cannot serve a key the sequencer produced.
    /// Fatal to the operation in flight.
    Configuration,
    /// Key material or alphabet definition rejected before any transform starts
    Validation,
    /// File system failure
    Io,
    /// Malformed external input (JSON definitions)
    Format,
}

/// Errors that can occur while building or running a cipher
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CipherError {
    /// A key rune produced by the sequencer is absent from every chain link
    #[error("Key {key:?} at position {position} is not in any configured alphabet")]
    KeyNotInChain {
        /// The offending key rune
        key: char,
        /// Input position being transformed
        position: usize,
    },

    /// The affine multiplier has no inverse for the alphabet size
    #[error("Affine coefficient {a} is not invertible modulo {size}")]
    NotInvertible {
        /// Multiplier
        a: u32,
        /// Alphabet size
        size: usize,
    },

    /// A transformed rune cannot be written back as a byte
    #[error("Rune {0:?} cannot be represented as a byte")]
    NotByteRepresentable(char),

    /// A configured key rune is not a member of the alphabet
    #[error("Key {key:?} is not a member of alphabet '{alphabet}'")]
    KeyNotInAlphabet {
        /// The offending key rune
        key: char,
        /// Alphabet name
        alphabet: String,
    },

    /// A key the sequencer can produce fails the legality predicate
    #[error("Key {0:?} is not legal in the configured alphabet")]
    IllegalKey(char),

    /// A single-rune key was given with zero or several runes
    #[error("Key must be exactly one character, got {0}")]
    KeyNotSingleRune(usize),

    /// A secret has no runes
    #[error("Secret must not be empty")]
    EmptySecret,

    /// Affine multiplier shares a factor with a link size
    #[error("Affine coefficient {a} is not coprime with alphabet size {size}")]
    NotCoprime {
        /// Multiplier
        a: u32,
        /// Alphabet size
        size: usize,
    },

    /// Alphabet has no runes
    #[error("Alphabet '{0}' is empty")]
    EmptyAlphabet(String),

    /// Alphabet lists the same rune twice
    #[error("Alphabet '{alphabet}' contains {rune:?} more than once")]
    DuplicateRune {
        /// Alphabet name
        alphabet: String,
        /// The repeated rune
        rune: char,
    },

    /// A case exception pair is not bijective or targets a non-member
    #[error("Alphabet '{alphabet}' has an invalid case exception {variant:?} -> {canonical:?}")]
    InvalidCaseException {
        /// Alphabet name
        alphabet: String,
        /// Variant form (e.g. lowercase)
        variant: char,
        /// Member form
        canonical: char,
    },

    /// Binary mode needs every rune of every link to fit in a byte
    #[error("Alphabet '{0}' has runes outside the byte range")]
    NotByteAlphabet(String),

    /// No alphabet with that name is registered
    #[error("Unknown alphabet: {0}")]
    UnknownAlphabet(String),

    /// No cipher variant with that name is registered
    #[error("Unknown cipher: {0}")]
    UnknownCipher(String),

    /// Required key material for a variant was not supplied
    #[error("Cipher '{cipher}' requires {what}")]
    MissingKeyMaterial {
        /// Variant name
        cipher: &'static str,
        /// Description of the missing parameter
        what: &'static str,
    },

    /// N-gram group size must be positive
    #[error("N-gram size must be at least 1")]
    InvalidNgramSize,

    /// Round-trip verification produced a different plaintext
    #[error("Round-trip verification failed: expected {expected}, got {actual}")]
    VerificationFailed {
        /// Hex digest of the original plaintext
        expected: String,
        /// Hex digest of the recovered plaintext
        actual: String,
    },

    /// Reading or writing a file failed
    #[error("I/O error: {0}")]
    Io(String),

    /// Decoding an external definition failed
    #[error("Invalid format: {0}")]
    Format(String),
}

impl CipherError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CipherError::KeyNotInChain { .. }
            | CipherError::NotInvertible { .. }
            | CipherError::NotByteRepresentable(_) => ErrorKind::Configuration,
            CipherError::Io(_) => ErrorKind::Io,
            CipherError::Format(_) => ErrorKind::Format,
            _ => ErrorKind::Validation,
        }
    }

    /// True for errors that abort an operation in flight
    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }

    /// True for errors detected before any transform starts
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }
}

impl From<std::io::Error> for CipherError {
    fn from(err: std::io::Error) -> Self {
        CipherError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CipherError {
    fn from(err: serde_json::Error) -> Self {
        CipherError::Format(err.to_string())
    }
}

/// Result type for cipher operations
pub type CipherResult<T> = Result<T, CipherError>;
