//! Shared helpers for header spy tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

use settings_headers_crypto::{DecryptionError, Decryptor};
use settings_headers_model::{parse_settings_file, ConfigNode, Server};
use settings_headers_rewriter::ExecutionRequest;

/// Decryptor double that records every call.
///
/// Values without a stubbed answer are returned unchanged; values registered
/// with [`RecordingDecryptor::fail_on`] produce a capability error.
#[derive(Default)]
pub struct RecordingDecryptor {
    answers: HashMap<String, String>,
    failures: HashMap<String, String>,
    calls: RefCell<Vec<String>>,
}

impl RecordingDecryptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, value: &str, decrypted: &str) -> Self {
        self.answers.insert(value.to_string(), decrypted.to_string());
        self
    }

    pub fn fail_on(mut self, value: &str, message: &str) -> Self {
        self.failures.insert(value.to_string(), message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl Decryptor for RecordingDecryptor {
    fn decrypt(&self, value: &str) -> Result<String, DecryptionError> {
        self.calls.borrow_mut().push(value.to_string());
        if let Some(message) = self.failures.get(value) {
            return Err(DecryptionError::capability(message.clone()));
        }
        Ok(self
            .answers
            .get(value)
            .cloned()
            .unwrap_or_else(|| value.to_string()))
    }
}

/// Absolute path to a settings fixture, without the `.xml` extension.
pub fn settings_fixture(name: &str) -> PathBuf {
    // CARGO_MANIFEST_DIR = .../crates/settings-headers-rewriter
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../tests/fixtures/settings")
        .join(format!("{}.xml", name))
}

/// Build an execution request from a settings fixture.
pub fn execution_request(name: &str) -> ExecutionRequest {
    let settings = parse_settings_file(&settings_fixture(name)).expect("fixture should parse");
    ExecutionRequest::new(settings.servers)
}

/// Value of a header declared under `httpHeaders`.
pub fn wagon_header_value<'a>(server: &'a Server, header: &str) -> Option<&'a str> {
    header_value(server, &["httpHeaders"], header)
}

/// Value of a header declared under `httpConfiguration/all/headers`.
pub fn http_client_header_value<'a>(server: &'a Server, header: &str) -> Option<&'a str> {
    header_value(server, &["httpConfiguration", "all", "headers"], header)
}

/// Value of a header declared under any path of the configuration.
pub fn header_value<'a>(server: &'a Server, path: &[&str], header: &str) -> Option<&'a str> {
    server
        .configuration
        .as_ref()?
        .descend(path)?
        .children_named("property")
        .find(|p| p.child("name").and_then(ConfigNode::value) == Some(header))?
        .child("value")
        .and_then(ConfigNode::value)
}
