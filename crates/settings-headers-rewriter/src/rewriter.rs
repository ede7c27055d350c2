use settings_headers_crypto::{DecryptionGateway, Decryptor};
use settings_headers_model::{ConfigNode, Server};
use settings_headers_telemetry::{
    log_header_decrypted, log_header_decryption_failed, log_server_handled,
};

use crate::error::HeaderDecryptionError;
use crate::schema::{HeaderSchema, NAME, PROPERTY, VALUE};

/// Name reported for a `property` without a `name` child.
const UNNAMED_HEADER: &str = "<unnamed>";

/// Rewrites server entries so their HTTP header values are decrypted.
pub struct HeaderRewriter<D> {
    gateway: DecryptionGateway<D>,
}

impl<D: Decryptor> HeaderRewriter<D> {
    /// Create a rewriter over a decryption gateway.
    pub fn new(gateway: DecryptionGateway<D>) -> Self {
        Self { gateway }
    }

    /// The gateway header values go through.
    pub fn gateway(&self) -> &DecryptionGateway<D> {
        &self.gateway
    }

    /// Produce decrypted copies of `servers`, in the same order.
    ///
    /// The input entries are never modified. The first header that fails to
    /// decrypt aborts the whole rewrite.
    pub fn rewrite(&self, servers: &[Server]) -> Result<Vec<Server>, HeaderDecryptionError> {
        let mut rewritten = Vec::with_capacity(servers.len());

        for server in servers {
            let mut server = server.clone();
            log_server_handled!(server_id = %server.id, "handling server");

            if let Some(config) = server.configuration.as_mut() {
                self.rewrite_configuration(&server.id, config)?;
            }
            rewritten.push(server);
        }

        Ok(rewritten)
    }

    /// Decrypt the headers of one configuration tree in place.
    ///
    /// Generic wagon headers are handled before legacy httpClient ones.
    pub fn rewrite_configuration(
        &self,
        server_id: &str,
        config: &mut ConfigNode,
    ) -> Result<(), HeaderDecryptionError> {
        for schema in HeaderSchema::ALL {
            if let Some(headers) = config.descend_mut(schema.path()) {
                self.decrypt_properties(server_id, headers, schema)?;
            }
        }
        Ok(())
    }

    fn decrypt_properties(
        &self,
        server_id: &str,
        headers: &mut ConfigNode,
        schema: HeaderSchema,
    ) -> Result<(), HeaderDecryptionError> {
        for property in headers.children_named_mut(PROPERTY) {
            let header = property
                .child(NAME)
                .and_then(ConfigNode::value)
                .unwrap_or(UNNAMED_HEADER)
                .to_string();

            // Nothing to decrypt without a value node.
            let Some(value) = property.child_mut(VALUE) else {
                continue;
            };

            match self.gateway.decrypt(value.value()) {
                Ok(decrypted) => {
                    value.set_value(decrypted);
                    log_header_decrypted!(
                        server_id,
                        header = %header,
                        schema = schema.as_str(),
                        "HTTP header value decrypted"
                    );
                }
                Err(source) => {
                    log_header_decryption_failed!(
                        server_id,
                        header = %header,
                        schema = schema.as_str(),
                        error = %source,
                        "failed to decrypt HTTP header value"
                    );
                    return Err(HeaderDecryptionError {
                        header,
                        schema,
                        server_id: server_id.to_string(),
                        source,
                    });
                }
            }
        }
        Ok(())
    }
}
