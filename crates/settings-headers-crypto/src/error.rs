use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn a stored value into plaintext.
#[derive(Debug, Error)]
pub enum DecryptionError {
    /// The payload between the braces is not valid base64.
    #[error("encrypted value is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded payload is too short or its padding header is inconsistent.
    #[error("malformed encrypted payload: {0}")]
    MalformedPayload(String),

    /// Block decryption failed, usually because of a wrong password.
    #[error("unable to decrypt value: bad padding or wrong password")]
    Cipher,

    /// The decrypted bytes are not UTF-8.
    #[error("decrypted value is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// The security file could not be read.
    #[error("failed to read security settings {}: {source}", path.display())]
    SecurityFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The security file is not well-formed.
    #[error("malformed security settings {}: {source}", path.display())]
    SecurityXml {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    /// The security file has no `<master>` element.
    #[error("master password is not set in {}", path.display())]
    MasterPasswordMissing { path: PathBuf },

    /// `<relocation>` entries point back to an already visited file.
    #[error("security settings relocation loop at {}", path.display())]
    RelocationLoop { path: PathBuf },

    /// Failure reported by an external decryption capability.
    #[error("{0}")]
    Capability(String),
}

impl DecryptionError {
    /// Wrap a failure message coming from an external capability.
    pub fn capability(message: impl Into<String>) -> Self {
        Self::Capability(message.into())
    }
}
