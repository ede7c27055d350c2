//! Shared fixture locations and generated settings files.

use std::path::{Path, PathBuf};

/// Absolute path to the shared test fixtures directory.
pub fn fixtures_dir() -> PathBuf {
    // CARGO_MANIFEST_DIR = .../crates/settings-headers-test
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("crates/")
        .parent()
        .expect("workspace root")
        .join("tests/fixtures")
}

/// Path to `tests/fixtures/settings/<name>.xml`.
pub fn settings_fixture(name: &str) -> PathBuf {
    fixtures_dir().join("settings").join(format!("{}.xml", name))
}

/// Write a `settings-security.xml` holding `master` into `dir`.
pub fn write_security_settings(dir: &Path, master: &str) -> std::io::Result<PathBuf> {
    let path = dir.join("settings-security.xml");
    std::fs::write(
        &path,
        format!(
            "<settingsSecurity>\n  <master>{}</master>\n</settingsSecurity>\n",
            master
        ),
    )?;
    Ok(path)
}

/// Write a settings file with one server declaring `generic` headers under
/// `httpHeaders` and `legacy` headers under `httpConfiguration/all/headers`.
pub fn write_settings_with_headers(
    dir: &Path,
    server_id: &str,
    generic: &[(&str, &str)],
    legacy: &[(&str, &str)],
) -> std::io::Result<PathBuf> {
    let properties = |headers: &[(&str, &str)]| -> String {
        headers
            .iter()
            .map(|(name, value)| {
                format!(
                    "<property><name>{}</name><value>{}</value></property>",
                    name, value
                )
            })
            .collect()
    };

    let path = dir.join("settings.xml");
    std::fs::write(
        &path,
        format!(
            r#"<settings>
  <servers>
    <server>
      <id>{id}</id>
      <configuration>
        <httpHeaders>{generic}</httpHeaders>
        <httpConfiguration><all><headers>{legacy}</headers></all></httpConfiguration>
      </configuration>
    </server>
  </servers>
</settings>
"#,
            id = server_id,
            generic = properties(generic),
            legacy = properties(legacy),
        ),
    )?;
    Ok(path)
}
