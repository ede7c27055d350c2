//! Build settings model.
//!
//! Holds the server entries of a settings file together with their free-form
//! `<configuration>` blocks, represented as a generic [`ConfigNode`] tree.
//! The XML parser turns a `settings.xml` document into that model.

pub mod error;
pub mod model;
pub mod parser;

pub use error::ParseError;
pub use model::{ConfigNode, Server, Settings};
pub use parser::{parse_settings, parse_settings_file};
