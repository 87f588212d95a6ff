//! Named alphabet catalog
//!
//! Holds the built-in alphabets and any user-defined ones loaded from a JSON
//! file. Lookup is by name; names are unique within a catalog.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

use super::Alphabet;
use crate::cipher::{CipherError, CipherResult};

/// Basic 26-letter Latin
pub const LATIN: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Latin with the common Western European diacritics
pub const LATIN_EXTENDED: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZÁÀÂÄÃÅÆÇÉÈÊËÍÌÎÏÑÓÒÔÖÕØŒÚÙÛÜÝ";

/// Spanish: Latin plus Ñ in collation order
pub const SPANISH: &str = "ABCDEFGHIJKLMNÑOPQRSTUVWXYZ";

/// German: Latin plus umlauts and capital sharp s
pub const GERMAN: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZÄÖÜẞ";

/// Greek capitals
pub const GREEK: &str = "ΑΒΓΔΕΖΗΘΙΚΛΜΝΞΟΠΡΣΤΥΦΧΨΩ";

/// Russian Cyrillic capitals
pub const CYRILLIC: &str = "АБВГДЕЁЖЗИЙКЛМНОПРСТУФХЦЧШЩЪЫЬЭЮЯ";

/// Decimal digits, the usual secondary link
pub const DIGITS: &str = "0123456789";

/// ASCII punctuation (no space)
pub const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// A user-defined alphabet as stored in JSON
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AlphabetDef {
    /// Catalog name
    pub name: String,
    /// Member runes in order
    pub runes: String,
    /// Case exception pairs `[variant, member]`
    #[serde(default)]
    pub case_exceptions: Vec<(char, char)>,
}

impl AlphabetDef {
    /// Validate and build the alphabet
    pub fn build(&self) -> CipherResult<Alphabet> {
        Alphabet::new(self.name.clone(), self.runes.chars())?
            .with_case_exceptions(self.case_exceptions.iter().copied())
    }
}

impl From<&Alphabet> for AlphabetDef {
    fn from(alphabet: &Alphabet) -> Self {
        AlphabetDef {
            name: alphabet.name().to_string(),
            runes: alphabet.runes().iter().collect(),
            case_exceptions: alphabet.case_exceptions().to_vec(),
        }
    }
}

/// Name-indexed set of alphabets
#[derive(Clone, Debug, Default)]
pub struct AlphabetCatalog {
    alphabets: BTreeMap<String, Alphabet>,
}

impl AlphabetCatalog {
    /// Empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding every built-in alphabet
    pub fn builtin() -> CipherResult<Self> {
        let mut catalog = Self::new();
        for def in builtin_defs() {
            catalog.insert(def.build()?);
        }
        Ok(catalog)
    }

    /// Add or replace an alphabet under its own name
    pub fn insert(&mut self, alphabet: Alphabet) -> Option<Alphabet> {
        self.alphabets.insert(alphabet.name().to_string(), alphabet)
    }

    /// Look up an alphabet by name
    pub fn get(&self, name: &str) -> CipherResult<&Alphabet> {
        self.alphabets
            .get(name)
            .ok_or_else(|| CipherError::UnknownAlphabet(name.to_string()))
    }

    /// Registered names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.alphabets.keys().map(String::as_str)
    }

    /// All alphabets in name order
    pub fn iter(&self) -> impl Iterator<Item = &Alphabet> {
        self.alphabets.values()
    }

    /// Parse a JSON array of [`AlphabetDef`] and add every entry
    ///
    /// Returns the number of alphabets added.
    pub fn load_json_str(&mut self, json: &str) -> CipherResult<usize> {
        let defs: Vec<AlphabetDef> = serde_json::from_str(json)?;
        let count = defs.len();
        for def in defs {
            let alphabet = def.build()?;
            debug!("Loaded alphabet {}", alphabet);
            self.insert(alphabet);
        }
        Ok(count)
    }

    /// Load user-defined alphabets from a JSON file
    pub fn load_json(&mut self, path: &Path) -> CipherResult<usize> {
        let json = fs::read_to_string(path)?;
        self.load_json_str(&json)
    }
}

fn builtin_defs() -> Vec<AlphabetDef> {
    let def = |name: &str, runes: String| AlphabetDef {
        name: name.to_string(),
        runes,
        case_exceptions: Vec::new(),
    };

    vec![
        def("latin", LATIN.to_string()),
        def("latin-ext", LATIN_EXTENDED.to_string()),
        def("spanish", SPANISH.to_string()),
        AlphabetDef {
            case_exceptions: vec![('ß', 'ẞ')],
            ..def("german", GERMAN.to_string())
        },
        def("greek", GREEK.to_string()),
        def("cyrillic", CYRILLIC.to_string()),
        def("digits", DIGITS.to_string()),
        def("punctuation", PUNCTUATION.to_string()),
        def("bytes", (0u8..=255).map(char::from).collect()),
    ]
}
