//! N-gram grouping of cipher output
//!
//! Classical ciphertext is written in fixed-size blocks so word lengths do
//! not leak. Spaces belong to no built-in alphabet, so a grouped text decodes
//! with the same key stream as the ungrouped one.

use crate::cipher::{CipherError, CipherResult};

/// Fixed-size grouping formatter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NgramFormatter {
    size: usize,
}

impl NgramFormatter {
    /// Groups of `size` runes; `size` must be at least 1
    pub fn new(size: usize) -> CipherResult<Self> {
        if size == 0 {
            return Err(CipherError::InvalidNgramSize);
        }
        Ok(NgramFormatter { size })
    }

    /// Group size
    pub fn size(&self) -> usize {
        self.size
    }

    /// Drop whitespace, then join groups of `size` runes with single spaces
    pub fn format(&self, text: &str) -> String {
        let runes: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
        runes
            .chunks(self.size)
            .map(|chunk| chunk.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
