use std::fmt;

use settings_headers_crypto::cipher;
use settings_headers_model::ConfigNode;

pub(crate) const PROPERTY: &str = "property";
pub(crate) const NAME: &str = "name";
pub(crate) const VALUE: &str = "value";

/// Where a header declaration lives in a server configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderSchema {
    /// `httpHeaders/property*`.
    GenericWagon,
    /// `httpConfiguration/all/headers/property*`.
    ///
    /// Per-method scopes (`get`, `put`, `head`) are not read: only `all` is
    /// promoted by current build tool versions.
    LegacyHttpClientAll,
}

impl HeaderSchema {
    /// Schemas in processing order.
    pub const ALL: [HeaderSchema; 2] = [
        HeaderSchema::GenericWagon,
        HeaderSchema::LegacyHttpClientAll,
    ];

    /// Path from `<configuration>` to the node holding the `property` list.
    pub fn path(self) -> &'static [&'static str] {
        match self {
            HeaderSchema::GenericWagon => &["httpHeaders"],
            HeaderSchema::LegacyHttpClientAll => &["httpConfiguration", "all", "headers"],
        }
    }

    /// Human-readable label used in error messages.
    pub fn description(self) -> &'static str {
        match self {
            HeaderSchema::GenericWagon => "generic wagon configuration",
            HeaderSchema::LegacyHttpClientAll => "legacy wagon httpClient (all) configuration",
        }
    }

    /// Stable short identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            HeaderSchema::GenericWagon => "http-headers",
            HeaderSchema::LegacyHttpClientAll => "http-configuration-all",
        }
    }
}

impl fmt::Display for HeaderSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A header declared in a server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderDeclaration {
    /// Schema the declaration was found under.
    pub schema: HeaderSchema,
    /// Content of the `name` child, if any.
    pub name: Option<String>,
    /// Whether the declaration has a value to decrypt.
    pub has_value: bool,
    /// Whether that value is wrapped in `{...}`.
    pub encrypted: bool,
}

/// List the header declarations of a configuration tree, in processing order.
///
/// Values are only inspected for their `{...}` decoration, never decrypted.
pub fn declared_headers(config: &ConfigNode) -> Vec<HeaderDeclaration> {
    HeaderSchema::ALL
        .into_iter()
        .filter_map(|schema| config.descend(schema.path()).map(|headers| (schema, headers)))
        .flat_map(|(schema, headers)| {
            headers.children_named(PROPERTY).map(move |property| {
                let value = property.child(VALUE).and_then(ConfigNode::value);
                HeaderDeclaration {
                    schema,
                    name: property
                        .child(NAME)
                        .and_then(ConfigNode::value)
                        .map(str::to_string),
                    has_value: value.is_some(),
                    encrypted: value.is_some_and(cipher::is_decorated),
                }
            })
        })
        .collect()
}
