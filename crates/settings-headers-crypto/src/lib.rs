//! Decryption of secrets stored in build settings files.
//!
//! [`Decryptor`] is the seam to whatever unwraps a secret. [`DecryptionGateway`]
//! wraps one and is what the header rewriter talks to. [`MasterPasswordDecryptor`]
//! implements the build tool's own scheme: values wrapped in `{...}` are
//! AES-128-CBC payloads keyed by a master password kept in
//! `settings-security.xml`.

pub mod cipher;
pub mod error;
pub mod gateway;
pub mod security;

pub use error::DecryptionError;
pub use gateway::{DecryptionGateway, Decryptor};
pub use security::{
    encrypt_master_password, encrypt_with_master, MasterPasswordDecryptor, SecuritySettings,
};
