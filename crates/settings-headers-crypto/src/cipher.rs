//! Password-based cipher used for `{...}` values in settings files.
//!
//! Payload layout (base64 encoded):
//!
//! ```text
//! salt (8) | pad_len (1) | AES-128-CBC/PKCS#7 ciphertext | pad_len filler bytes
//! ```
//!
//! Key and IV are the first and second halves of `SHA-256(password || salt)`.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use base64::Engine;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::error::DecryptionError;

type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;
type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;

const SALT_SIZE: usize = 8;
const CHUNK_SIZE: usize = 16;
const SPICE_SIZE: usize = 16;

/// Encrypt `clear` with `password` and return the base64 payload (undecorated).
pub fn encrypt(clear: &str, password: &str) -> String {
    let mut rng = rand::rng();

    let mut salt = [0u8; SALT_SIZE];
    rng.fill_bytes(&mut salt);

    let (key, iv) = derive_key_iv(password, &salt);
    let encrypted =
        Aes128CbcEnc::new(&key.into(), &iv.into()).encrypt_padded_vec_mut::<Pkcs7>(clear.as_bytes());

    // pad_len is in 1..=CHUNK_SIZE so the payload is a whole number of chunks.
    let pad_len = CHUNK_SIZE - (SALT_SIZE + encrypted.len() + 1) % CHUNK_SIZE;
    let mut filler = vec![0u8; pad_len];
    rng.fill_bytes(&mut filler);

    let mut payload = Vec::with_capacity(SALT_SIZE + 1 + encrypted.len() + pad_len);
    payload.extend_from_slice(&salt);
    payload.push(pad_len as u8);
    payload.extend_from_slice(&encrypted);
    payload.extend_from_slice(&filler);

    base64::engine::general_purpose::STANDARD.encode(payload)
}

/// Decrypt a base64 payload (undecorated) with `password`.
pub fn decrypt(payload: &str, password: &str) -> Result<String, DecryptionError> {
    let bytes = base64::engine::general_purpose::STANDARD.decode(payload.trim())?;

    if bytes.len() <= SALT_SIZE {
        return Err(DecryptionError::MalformedPayload(format!(
            "{} bytes is shorter than the salt header",
            bytes.len()
        )));
    }

    let (salt, rest) = bytes.split_at(SALT_SIZE);
    let pad_len = rest[0] as usize;
    let body = &rest[1..];
    if pad_len > body.len() {
        return Err(DecryptionError::MalformedPayload(format!(
            "filler length {} exceeds remaining {} bytes",
            pad_len,
            body.len()
        )));
    }
    let encrypted = &body[..body.len() - pad_len];

    let (key, iv) = derive_key_iv(password, salt);
    let clear = Aes128CbcDec::new(&key.into(), &iv.into())
        .decrypt_padded_vec_mut::<Pkcs7>(encrypted)
        .map_err(|_| DecryptionError::Cipher)?;

    Ok(String::from_utf8(clear)?)
}

/// Extract the payload of a decorated value.
///
/// The payload sits between the first `{` and the next `}` that is not
/// escaped with a backslash. Returns `None` for plaintext.
pub fn undecorate(value: &str) -> Option<&str> {
    let bytes = value.as_bytes();
    for (open, _) in value.match_indices('{') {
        let start = open + 1;
        let close = (start + 1..bytes.len()).find(|&i| bytes[i] == b'}' && bytes[i - 1] != b'\\');
        if let Some(close) = close {
            return Some(&value[start..close]);
        }
    }
    None
}

/// Whether `value` is a decorated (encrypted) value.
pub fn is_decorated(value: &str) -> bool {
    undecorate(value).is_some()
}

/// Wrap a payload in braces.
pub fn decorate(payload: &str) -> String {
    format!("{{{}}}", payload)
}

/// Decrypt a value that may or may not carry its braces.
pub fn decrypt_decorated(value: &str, password: &str) -> Result<String, DecryptionError> {
    decrypt(undecorate(value).unwrap_or(value), password)
}

fn derive_key_iv(password: &str, salt: &[u8]) -> ([u8; SPICE_SIZE], [u8; SPICE_SIZE]) {
    let digest = Sha256::new()
        .chain_update(password.as_bytes())
        .chain_update(salt)
        .finalize();

    let mut key = [0u8; SPICE_SIZE];
    let mut iv = [0u8; SPICE_SIZE];
    key.copy_from_slice(&digest[..SPICE_SIZE]);
    iv.copy_from_slice(&digest[SPICE_SIZE..]);
    (key, iv)
}
