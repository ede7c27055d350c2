//! Test harnesses for settings-headers.
//!
//! `fixtures` locates the shared settings files under `tests/fixtures` and
//! writes throwaway settings documents; `cli` drives the binary.

#[cfg(test)]
pub mod cli;
pub mod fixtures;

pub use fixtures::{
    fixtures_dir, settings_fixture, write_security_settings, write_settings_with_headers,
};
