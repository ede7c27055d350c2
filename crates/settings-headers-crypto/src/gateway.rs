use std::sync::Arc;

use crate::error::DecryptionError;

/// Something that can unwrap a stored secret.
///
/// Implementations must return values that are not encrypted unchanged; the
/// caller never inspects the content before asking.
pub trait Decryptor {
    /// Decrypt `value`, or return it as-is if it is plaintext.
    fn decrypt(&self, value: &str) -> Result<String, DecryptionError>;
}

impl<D: Decryptor + ?Sized> Decryptor for &D {
    fn decrypt(&self, value: &str) -> Result<String, DecryptionError> {
        (**self).decrypt(value)
    }
}

impl<D: Decryptor + ?Sized> Decryptor for Box<D> {
    fn decrypt(&self, value: &str) -> Result<String, DecryptionError> {
        (**self).decrypt(value)
    }
}

impl<D: Decryptor + ?Sized> Decryptor for Arc<D> {
    fn decrypt(&self, value: &str) -> Result<String, DecryptionError> {
        (**self).decrypt(value)
    }
}

/// Boundary wrapper around a [`Decryptor`].
///
/// Absent values pass through without reaching the decryptor. Failures are
/// returned as-is, never retried.
#[derive(Debug, Clone)]
pub struct DecryptionGateway<D> {
    decryptor: D,
}

impl<D: Decryptor> DecryptionGateway<D> {
    /// Wrap a decryptor.
    pub fn new(decryptor: D) -> Self {
        Self { decryptor }
    }

    /// Decrypt an optional value.
    pub fn decrypt(&self, input: Option<&str>) -> Result<Option<String>, DecryptionError> {
        match input {
            None => Ok(None),
            Some(value) => self.decryptor.decrypt(value).map(Some),
        }
    }

    /// The wrapped decryptor.
    pub fn decryptor(&self) -> &D {
        &self.decryptor
    }
}
