//! Random key material drawn from an alphabet

use rand::Rng;
use zeroize::Zeroizing;

use crate::alphabet::Alphabet;
use crate::cipher::{CipherError, CipherResult};

/// One rune chosen uniformly from `alphabet`
pub fn generate_key(alphabet: &Alphabet) -> char {
    let runes = alphabet.runes();
    runes[rand::thread_rng().gen_range(0..runes.len())]
}

/// `len` runes chosen uniformly from `alphabet`
pub fn generate_secret(alphabet: &Alphabet, len: usize) -> CipherResult<Zeroizing<String>> {
    if len == 0 {
        return Err(CipherError::EmptySecret);
    }
    let mut rng = rand::thread_rng();
    let runes = alphabet.runes();
    let secret = (0..len)
        .map(|_| runes[rng.gen_range(0..runes.len())])
        .collect::<String>();
    Ok(Zeroizing::new(secret))
}
