//! Default file locations.

use std::path::PathBuf;

/// `~/.m2/settings-security.xml`, if a home directory is known.
pub fn default_security_location() -> Option<PathBuf> {
    home::home_dir().map(|home| home.join(".m2").join("settings-security.xml"))
}

/// Explicit location if given, the default one otherwise.
pub fn resolve_security_location(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(default_security_location)
}
