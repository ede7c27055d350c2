//! Outcome of a `check` run.
//!
//! Lists the declared headers by name and schema, and whether each value went
//! through decryption. Header values are never part of the report.

use serde::Serialize;
use settings_headers_model::Server;
use settings_headers_rewriter::{declared_headers, HeaderDeclaration};

/// Headers found on one server entry.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ServerReport {
    pub id: String,
    pub headers: Vec<HeaderReport>,
}

/// What happened to a header value.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderState {
    /// An encrypted value was decrypted.
    Decrypted,
    /// The value was not encrypted and passed through as is.
    Plaintext,
    /// The declaration had no value.
    NoValue,
}

impl HeaderState {
    fn of(declaration: &HeaderDeclaration) -> Self {
        match (declaration.has_value, declaration.encrypted) {
            (false, _) => Self::NoValue,
            (true, true) => Self::Decrypted,
            (true, false) => Self::Plaintext,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Decrypted => "decrypted",
            Self::Plaintext => "plaintext",
            Self::NoValue => "no value",
        }
    }
}

/// One header declaration.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HeaderReport {
    pub name: Option<String>,
    pub schema: &'static str,
    pub state: HeaderState,
}

/// Report over all server entries of a settings file.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CheckReport {
    pub settings: String,
    pub servers: Vec<ServerReport>,
}

impl CheckReport {
    /// Inventory the headers declared by `servers`.
    pub fn new(settings: impl Into<String>, servers: &[Server]) -> Self {
        let servers = servers
            .iter()
            .map(|server| ServerReport {
                id: server.id.clone(),
                headers: server
                    .configuration
                    .as_ref()
                    .map(|config| {
                        declared_headers(config)
                            .into_iter()
                            .map(|d| HeaderReport {
                                state: HeaderState::of(&d),
                                name: d.name,
                                schema: d.schema.as_str(),
                            })
                            .collect()
                    })
                    .unwrap_or_default(),
            })
            .collect();

        Self {
            settings: settings.into(),
            servers,
        }
    }

    /// Number of encrypted header values that were decrypted.
    pub fn decrypted_count(&self) -> usize {
        self.servers
            .iter()
            .flat_map(|s| &s.headers)
            .filter(|h| h.state == HeaderState::Decrypted)
            .count()
    }

    /// JSON rendering with a summary block.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "settings": self.settings,
            "servers": self.servers,
            "summary": {
                "servers": self.servers.len(),
                "headers": self.decrypted_count(),
            }
        })
    }

    /// Human-readable rendering, one line per server plus a summary.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for server in &self.servers {
            if server.headers.is_empty() {
                out.push_str(&format!("✓ {}: no HTTP headers\n", server.id));
                continue;
            }
            out.push_str(&format!(
                "✓ {}: {} HTTP header(s)\n",
                server.id,
                server.headers.len()
            ));
            for header in &server.headers {
                let name = header.name.as_deref().unwrap_or("<unnamed>");
                out.push_str(&format!(
                    "  {} [{}]: {}\n",
                    name,
                    header.schema,
                    header.state.as_str()
                ));
            }
        }
        out.push_str(&format!(
            "\nchecked {} server(s) in {}: {} header value(s) decrypted\n",
            self.servers.len(),
            self.settings,
            self.decrypted_count()
        ));
        out
    }
}
