//! Master password storage (`settings-security.xml`).
//!
//! ```xml
//! <settingsSecurity>
//!   <master>{...}</master>
//!   <relocation>/mnt/usb/settings-security.xml</relocation>
//! </settingsSecurity>
//! ```
//!
//! The master password is itself encrypted with [`MASTER_PASSPHRASE`].

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use roxmltree::Document;
use zeroize::Zeroizing;

use crate::cipher;
use crate::error::DecryptionError;
use crate::gateway::Decryptor;

/// Passphrase protecting the master password.
pub const MASTER_PASSPHRASE: &str = "settings.security";

/// Contents of a security settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecuritySettings {
    /// Encrypted master password.
    pub master: Option<String>,
    /// Another file holding the real settings.
    pub relocation: Option<PathBuf>,
}

impl SecuritySettings {
    /// Parse a security settings document. `path` is only used in errors.
    pub fn parse(input: &str, path: &Path) -> Result<Self, DecryptionError> {
        let doc = Document::parse(input).map_err(|source| DecryptionError::SecurityXml {
            path: path.to_path_buf(),
            source,
        })?;

        let text_of = |name: &str| {
            doc.root_element()
                .children()
                .find(|n| n.is_element() && n.tag_name().name() == name)
                .and_then(|n| n.text())
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        Ok(Self {
            master: text_of("master"),
            relocation: text_of("relocation").map(PathBuf::from),
        })
    }

    /// Read the file at `path`, following `<relocation>` entries.
    pub fn load(path: &Path) -> Result<Self, DecryptionError> {
        let mut visited = HashSet::new();
        let mut current = path.to_path_buf();

        loop {
            if !visited.insert(current.clone()) {
                return Err(DecryptionError::RelocationLoop { path: current });
            }

            tracing::debug!(path = %current.display(), "reading security settings");
            let content =
                std::fs::read_to_string(&current).map_err(|source| DecryptionError::SecurityFile {
                    path: current.clone(),
                    source,
                })?;

            let settings = Self::parse(&content, &current)?;
            match settings.relocation {
                Some(next) => current = next,
                None => return Ok(settings),
            }
        }
    }
}

/// [`Decryptor`] backed by the master password of a security settings file.
///
/// Plaintext is returned unchanged without touching the file. For encrypted
/// values the file is read on every call.
#[derive(Debug, Clone)]
pub struct MasterPasswordDecryptor {
    location: PathBuf,
}

impl MasterPasswordDecryptor {
    /// Use the security settings at `location`.
    pub fn new(location: impl Into<PathBuf>) -> Self {
        Self {
            location: location.into(),
        }
    }

    /// Location of the security settings file.
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Load and decrypt the master password.
    pub fn master_password(&self) -> Result<Zeroizing<String>, DecryptionError> {
        let settings = SecuritySettings::load(&self.location)?;
        let master = settings
            .master
            .ok_or_else(|| DecryptionError::MasterPasswordMissing {
                path: self.location.clone(),
            })?;
        Ok(Zeroizing::new(cipher::decrypt_decorated(
            &master,
            MASTER_PASSPHRASE,
        )?))
    }
}

impl Decryptor for MasterPasswordDecryptor {
    fn decrypt(&self, value: &str) -> Result<String, DecryptionError> {
        match cipher::undecorate(value) {
            None => Ok(value.to_string()),
            Some(payload) => {
                let master = self.master_password()?;
                cipher::decrypt(payload, &master)
            }
        }
    }
}

/// Encrypt a master password for storage in the security settings file.
pub fn encrypt_master_password(clear: &str) -> String {
    cipher::decorate(&cipher::encrypt(clear, MASTER_PASSPHRASE))
}

/// Encrypt a value with an encrypted master password.
pub fn encrypt_with_master(clear: &str, encrypted_master: &str) -> Result<String, DecryptionError> {
    let master = Zeroizing::new(cipher::decrypt_decorated(
        encrypted_master,
        MASTER_PASSPHRASE,
    )?);
    Ok(cipher::decorate(&cipher::encrypt(clear, &master)))
}
