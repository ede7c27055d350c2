//! HTTP header decryption for build server configurations.
//!
//! Server entries may declare HTTP headers in two places of their
//! `<configuration>` block:
//!
//! - `httpHeaders/property*` (generic wagon configuration)
//! - `httpConfiguration/all/headers/property*` (legacy httpClient, `all` scope)
//!
//! [`HeaderRewriter`] clones each server entry and replaces every header
//! value with its decrypted form. [`HeaderDecryptionSpy`] hooks it onto the
//! execution request event of a build.

pub mod error;
pub mod event;
pub mod rewriter;
pub mod schema;

pub use error::HeaderDecryptionError;
pub use event::{BuildEvent, EventSpy, ExecutionRequest, HeaderDecryptionSpy};
pub use rewriter::HeaderRewriter;
pub use schema::{declared_headers, HeaderDeclaration, HeaderSchema};
