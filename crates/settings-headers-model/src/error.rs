use thiserror::Error;

/// Errors produced while reading a settings file.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The document is not well-formed XML.
    #[error("malformed settings XML: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The root element is not `<settings>`.
    #[error("unexpected root element <{0}>, expected <settings>")]
    UnexpectedRoot(String),

    /// A `<server>` entry has no `<id>`.
    #[error("server entry #{index} has no <id>")]
    MissingServerId { index: usize },

    /// I/O error reading the settings file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
