use crate::error::{EsgError, Result};
use crate::types::config::EsgConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "esg.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".esg/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/esg-bench/config.toml";

pub fn load_config(root: &Path) -> Result<EsgConfig> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, global.as_deref())
}

pub(crate) fn load_config_with_global(root: &Path, global_path: Option<&Path>) -> Result<EsgConfig> {
    let mut merged = Value::Table(Map::new());
    if let Some(path) = global_path {
        merge_file_if_exists(&mut merged, path)?;
    }
    merge_file_if_exists(&mut merged, &root.join(DEFAULT_CONFIG_FILE))?;
    merge_file_if_exists(&mut merged, &root.join(DEFAULT_LOCAL_FILE))?;

    let cfg: EsgConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| EsgError::ConfigParse(e.to_string()))?;
    cfg.validate()?;
    Ok(cfg)
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    tracing::debug!(path = %path.display(), "merging config layer");
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(())
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| EsgError::ConfigParse(format!("{}: {}", path.display(), e)))
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
    use crate::types::metric::{Direction, MetricKind};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_config_defaults_when_no_layer_exists() {
        let dir = TempDir::new().expect("temp dir should be created");
        let cfg = load_config_with_global(dir.path(), None).expect("load should not fail");
        assert!(cfg.directions.is_empty());
        assert_eq!(cfg.default_direction(), Direction::HigherIsBetter);
    }

    #[test]
    fn load_config_merges_global_project_and_local_in_order() {
        let root = TempDir::new().expect("root temp dir should be created");
        let global_root = TempDir::new().expect("global temp dir should be created");
        let global_path = global_root.path().join("config.toml");

        fs::write(
            &global_path,
            r#"
[directions]
custom_waste_kg = "lower_is_better"

[logging]
level = "info"
"#,
        )
        .expect("global config should write");

        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            r#"
[engine]
default_direction = "higher_is_better"

[kinds]
custom_policy_flag = "boolean"
"#,
        )
        .expect("project config should write");

        fs::create_dir_all(root.path().join(".esg")).expect("local dir should create");
        fs::write(
            root.path().join(DEFAULT_LOCAL_FILE),
            r#"
[engine]
default_direction = "lower_is_better"

[logging]
level = "debug"
"#,
        )
        .expect("local override should write");

        let cfg = load_config_with_global(root.path(), Some(&global_path))
            .expect("load should succeed");

        assert_eq!(cfg.default_direction(), Direction::LowerIsBetter);
        assert_eq!(cfg.log_level(), "debug");
        assert_eq!(
            cfg.directions.get("custom_waste_kg"),
            Some(&Direction::LowerIsBetter)
        );
        assert_eq!(
            cfg.kinds.get("custom_policy_flag"),
            Some(&MetricKind::Boolean)
        );
    }

    #[test]
    fn load_config_reports_path_of_broken_layer() {
        let root = TempDir::new().expect("temp dir should be created");
        fs::write(root.path().join(DEFAULT_CONFIG_FILE), "[engine\n").expect("write");

        let err = load_config_with_global(root.path(), None).expect_err("load should fail");
        assert!(err.to_string().contains(DEFAULT_CONFIG_FILE));
    }

    #[test]
    fn load_config_runs_validation() {
        let root = TempDir::new().expect("temp dir should be created");
        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            r#"
[directions]
flag = "lower_is_better"

[kinds]
flag = "boolean"
"#,
        )
        .expect("write");

        let err = load_config_with_global(root.path(), None).expect_err("load should fail");
        assert!(matches!(err, EsgError::ConfigParse(_)));
    }
}
