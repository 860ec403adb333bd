use crate::error::{PbiDocsError, Result};
use crate::types::config::PbiDocsConfig;
use std::path::Path;
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "pbidocs.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".pbidocs/local.toml";

/// Loads configuration. An explicit `--config` path must exist; otherwise
/// `pbidocs.toml` in the current directory is used when present, with
/// `.pbidocs/local.toml` merged over it.
pub fn load_config(explicit: Option<&Path>) -> Result<Option<PbiDocsConfig>> {
    match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(PbiDocsError::ConfigNotFound(path.display().to_string()));
            }
            let cfg = read_config_file(path)?;
            cfg.validate()?;
            Ok(Some(cfg))
        }
        None => {
            let cwd = std::env::current_dir()?;
            load_config_in(&cwd)
        }
    }
}

pub(crate) fn load_config_in(root: &Path) -> Result<Option<PbiDocsConfig>> {
    let base_path = root.join(DEFAULT_CONFIG_FILE);
    if !base_path.exists() {
        return Ok(None);
    }

    let mut merged = Value::Table(Map::new());
    merge_file_if_exists(&mut merged, &base_path)?;
    merge_file_if_exists(&mut merged, &root.join(DEFAULT_LOCAL_FILE))?;

    let cfg: PbiDocsConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| PbiDocsError::ConfigParse(e.to_string()))?;
    cfg.validate()?;
    Ok(Some(cfg))
}

fn read_config_file(path: &Path) -> Result<PbiDocsConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| PbiDocsError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    let content = std::fs::read_to_string(path)?;
    let value: Value = toml::from_str(&content)
        .map_err(|e| PbiDocsError::ConfigParse(format!("{}: {}", path.display(), e)))?;
    merge_toml(merged, value);
    Ok(())
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Lang;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_config_in_returns_none_when_file_missing() {
        let dir = TempDir::new().expect("temp dir should be created");
        let cfg = load_config_in(dir.path()).expect("load should not fail");
        assert!(cfg.is_none());
    }

    #[test]
    fn load_config_in_merges_local_overlay() {
        let root = TempDir::new().expect("temp dir should be created");
        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            r#"
[docs]
language = "en"

[dax]
indent_width = 4
"#,
        )
        .expect("base config should write");

        fs::create_dir_all(root.path().join(".pbidocs")).expect("local dir should create");
        fs::write(
            root.path().join(DEFAULT_LOCAL_FILE),
            r#"
[docs]
language = "es"
"#,
        )
        .expect("local override should write");

        let cfg = load_config_in(root.path())
            .expect("load should succeed")
            .expect("merged config should exist");
        assert_eq!(cfg.language(), Some(Lang::Es));
        assert_eq!(cfg.indent_width(), 4);
    }

    #[test]
    fn explicit_config_must_exist() {
        let dir = TempDir::new().expect("temp dir should be created");
        let missing = dir.path().join("nope.toml");
        let err = load_config(Some(&missing)).expect_err("missing explicit config should fail");
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let root = TempDir::new().expect("temp dir should be created");
        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            r#"
[dax]
indent_width = 99
"#,
        )
        .expect("config should write");

        let err = load_config_in(root.path()).expect_err("validation should fail");
        assert!(err.to_string().contains("dax.indent_width"));
    }
}
