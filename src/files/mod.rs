//! File-level encryption and decryption
//!
//! Text mode reads UTF-8 and transforms code points; binary mode transforms
//! raw bytes and needs a byte-representable chain. The verified variant
//! decodes its own output with an independent copy of the cipher and
//! compares BLAKE3 digests before anything is written.

pub mod hash;

pub use hash::Digest;

use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::cipher::{Cipher, CipherError, CipherResult};

/// How file contents are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// UTF-8 text, case folding enabled
    #[default]
    Text,
    /// Raw bytes, exact matching
    Binary,
}

/// Summary of a completed file operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// Bytes read
    pub bytes_in: usize,
    /// Bytes written
    pub bytes_out: usize,
    /// Hex digest of the plaintext, when verified
    pub digest: Option<String>,
}

fn encode_buffer(cipher: &mut Cipher, data: Vec<u8>, mode: Mode) -> CipherResult<Vec<u8>> {
    match mode {
        Mode::Text => Ok(cipher.encode(&into_text(data)?)?.into_bytes()),
        Mode::Binary => cipher.encode_bytes(&data),
    }
}

fn decode_buffer(cipher: &mut Cipher, data: Vec<u8>, mode: Mode) -> CipherResult<Vec<u8>> {
    match mode {
        Mode::Text => Ok(cipher.decode(&into_text(data)?)?.into_bytes()),
        Mode::Binary => cipher.decode_bytes(&data),
    }
}

fn into_text(data: Vec<u8>) -> CipherResult<String> {
    String::from_utf8(data).map_err(|e| CipherError::Format(format!("input is not UTF-8: {e}")))
}

/// Encrypt `src` into `dst`
pub fn encrypt_file(cipher: &mut Cipher, src: &Path, dst: &Path, mode: Mode) -> CipherResult<FileReport> {
    let data = fs::read(src)?;
    let bytes_in = data.len();
    let out = encode_buffer(cipher, data, mode)?;
    fs::write(dst, &out)?;
    info!("Encrypted {:?} -> {:?} ({} bytes)", src, dst, out.len());
    Ok(FileReport {
        bytes_in,
        bytes_out: out.len(),
        digest: None,
    })
}

/// Decrypt `src` into `dst`
pub fn decrypt_file(cipher: &mut Cipher, src: &Path, dst: &Path, mode: Mode) -> CipherResult<FileReport> {
    let data = fs::read(src)?;
    let bytes_in = data.len();
    let out = decode_buffer(cipher, data, mode)?;
    fs::write(dst, &out)?;
    info!("Decrypted {:?} -> {:?} ({} bytes)", src, dst, out.len());
    Ok(FileReport {
        bytes_in,
        bytes_out: out.len(),
        digest: None,
    })
}

/// Encrypt `src` into `dst`, refusing to write unless decoding the result
/// reproduces the original digest
pub fn encrypt_file_verified(
    cipher: &mut Cipher,
    src: &Path,
    dst: &Path,
    mode: Mode,
) -> CipherResult<FileReport> {
    let data = fs::read(src)?;
    let bytes_in = data.len();
    let expected = Digest::of(&data);

    let out = encode_buffer(cipher, data, mode)?;
    let mut checker = cipher.clone();
    let recovered = decode_buffer(&mut checker, out.clone(), mode)?;

    if !expected.matches(&recovered) {
        let expected = expected.to_hex();
        let actual = Digest::of(&recovered).to_hex();
        warn!("Round-trip mismatch for {:?}: {} != {}", src, expected, actual);
        return Err(CipherError::VerificationFailed { expected, actual });
    }
    debug!("Round-trip verified for {:?}", src);

    fs::write(dst, &out)?;
    info!("Encrypted {:?} -> {:?} ({} bytes, verified)", src, dst, out.len());
    Ok(FileReport {
        bytes_in,
        bytes_out: out.len(),
        digest: Some(expected.to_hex()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::AlphabetCatalog;
    use crate::cipher::{ChainedTabulaRecta, VigenereSequencer};

    fn cipher(primary: &str) -> Cipher {
        let catalog = AlphabetCatalog::builtin().unwrap();
        let alphabet = catalog.get(primary).unwrap().clone();
        let seq = VigenereSequencer::new(&alphabet, "SECRET").unwrap();
        Cipher::new(ChainedTabulaRecta::from_alphabet(alphabet), Box::new(seq)).unwrap()
    }

    #[test]
    fn test_text_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("plain.txt");
        let enc = dir.path().join("plain.txt.enc");
        let dec = dir.path().join("plain.txt.dec");
        fs::write(&plain, "Veni, vidi, vici.\n").unwrap();

        let mut c = cipher("latin");
        let report = encrypt_file_verified(&mut c, &plain, &enc, Mode::Text).unwrap();
        assert_eq!(report.bytes_in, 18);
        assert_eq!(report.digest.unwrap(), Digest::of(b"Veni, vidi, vici.\n").to_hex());
        assert_ne!(fs::read(&enc).unwrap(), fs::read(&plain).unwrap());

        decrypt_file(&mut c, &enc, &dec, Mode::Text).unwrap();
        assert_eq!(fs::read_to_string(&dec).unwrap(), "Veni, vidi, vici.\n");
    }

    #[test]
    fn test_binary_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("blob.bin");
        let enc = dir.path().join("blob.enc");
        let dec = dir.path().join("blob.dec");
        let data: Vec<u8> = (0..2048u32).map(|i| (i * 7 % 256) as u8).collect();
        fs::write(&plain, &data).unwrap();

        let mut c = cipher("bytes");
        encrypt_file(&mut c, &plain, &enc, Mode::Binary).unwrap();
        decrypt_file(&mut c, &enc, &dec, Mode::Binary).unwrap();
        assert_eq!(fs::read(&dec).unwrap(), data);
    }

    #[test]
    fn test_verified_text_over_byte_alphabet() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("mixed.txt");
        let enc = dir.path().join("mixed.enc");
        let text = "Ÿvonne aß ÿ-Käse, ǅ!";
        fs::write(&plain, text).unwrap();

        let mut c = cipher("bytes");
        let report = encrypt_file_verified(&mut c, &plain, &enc, Mode::Text).unwrap();
        assert_eq!(report.digest.unwrap(), Digest::of(text.as_bytes()).to_hex());
        assert_eq!(c.decode(&fs::read_to_string(&enc).unwrap()).unwrap(), text);
    }

    #[test]
    fn test_text_mode_rejects_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("bad.txt");
        fs::write(&plain, [0xFFu8, 0xFE]).unwrap();

        let mut c = cipher("latin");
        let err = encrypt_file(&mut c, &plain, &dir.path().join("out"), Mode::Text).unwrap_err();
        assert_eq!(err.kind(), crate::cipher::ErrorKind::Format);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut c = cipher("latin");
        let err = encrypt_file(
            &mut c,
            &dir.path().join("absent"),
            &dir.path().join("out"),
            Mode::Text,
        )
        .unwrap_err();
        assert_eq!(err.kind(), crate::cipher::ErrorKind::Io);
    }
}
