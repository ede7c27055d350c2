//! settings-headers library.
//!
//! Exposes the host-side pieces of the `settings-headers` binary for testing:
//! event delivery, the check report and default file locations.
//! The main entry point is the `settings-headers` binary.

pub mod host;
pub mod paths;
pub mod report;
