use settings_headers_crypto::DecryptionError;
use thiserror::Error;

use crate::schema::HeaderSchema;

/// A header value could not be decrypted.
///
/// Aborts the rewrite of the whole execution request.
#[derive(Debug, Error)]
#[error("Unable to decrypt header {header} in {schema}")]
pub struct HeaderDecryptionError {
    /// Name of the failing header.
    pub header: String,
    /// Schema the header was declared under.
    pub schema: HeaderSchema,
    /// Server entry holding the header.
    pub server_id: String,
    #[source]
    pub source: DecryptionError,
}
