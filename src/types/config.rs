use crate::error::EsgError;
use crate::types::metric::{Direction, MetricKind};
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EsgConfig {
    pub engine: Option<EngineConfig>,
    #[serde(default)]
    pub directions: BTreeMap<String, Direction>,
    #[serde(default)]
    pub kinds: BTreeMap<String, MetricKind>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    pub default_direction: Option<Direction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl EsgConfig {
    pub fn default_direction(&self) -> Direction {
        self.engine
            .as_ref()
            .and_then(|engine| engine.default_direction)
            .unwrap_or_default()
    }

    pub fn log_level(&self) -> String {
        self.logging
            .as_ref()
            .map(|logging| logging.level.clone())
            .unwrap_or_else(default_log_level)
    }

    pub fn validate(&self) -> Result<(), EsgError> {
        for (section, keys) in [
            ("directions", self.directions.keys().collect::<Vec<_>>()),
            ("kinds", self.kinds.keys().collect::<Vec<_>>()),
        ] {
            if keys.iter().any(|key| key.trim().is_empty()) {
                return Err(EsgError::ConfigParse(format!(
                    "{section} entries must use non-empty metric keys"
                )));
            }
        }

        let conflicting = self
            .kinds
            .iter()
            .filter(|(key, kind)| {
                matches!(kind, MetricKind::Boolean) && self.directions.contains_key(*key)
            })
            .map(|(key, _)| key.as_str())
            .collect::<Vec<_>>();
        if !conflicting.is_empty() {
            return Err(EsgError::ConfigParse(format!(
                "boolean metrics cannot declare a direction: {}",
                conflicting.join(", ")
            )));
        }

        if let Some(logging) = &self.logging {
            if logging.level.trim().is_empty() {
                return Err(EsgError::ConfigParse(
                    "logging.level cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_config_uses_defaults() {
        let cfg: EsgConfig = toml::from_str("").expect("empty config should parse");
        assert_eq!(cfg.default_direction(), Direction::HigherIsBetter);
        assert_eq!(cfg.log_level(), "warn");
        assert!(cfg.directions.is_empty());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
[engine]
default_direction = "lower_is_better"

[directions]
custom_emissions_kg = "lower_is_better"
supplier_audits_pct = "higher_is_better"

[kinds]
custom_policy_flag = "boolean"

[logging]
level = "debug"
"#;
        let cfg: EsgConfig = toml::from_str(toml_str).expect("full config should parse");
        assert_eq!(cfg.default_direction(), Direction::LowerIsBetter);
        assert_eq!(
            cfg.directions.get("custom_emissions_kg"),
            Some(&Direction::LowerIsBetter)
        );
        assert_eq!(
            cfg.kinds.get("custom_policy_flag"),
            Some(&MetricKind::Boolean)
        );
        assert_eq!(cfg.log_level(), "debug");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn parse_rejects_unknown_direction_literal() {
        let toml_str = r#"
[directions]
custom = "sideways"
"#;
        assert!(toml::from_str::<EsgConfig>(toml_str).is_err());
    }

    #[test]
    fn validate_rejects_direction_on_boolean_metric() {
        let toml_str = r#"
[directions]
policy_flag = "lower_is_better"

[kinds]
policy_flag = "boolean"
"#;
        let cfg: EsgConfig = toml::from_str(toml_str).expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("policy_flag"));
    }

    #[test]
    fn validate_rejects_blank_metric_key() {
        let toml_str = r#"
[directions]
" " = "lower_is_better"
"#;
        let cfg: EsgConfig = toml::from_str(toml_str).expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("non-empty metric keys"));
    }

    #[test]
    fn validate_rejects_blank_log_level() {
        let toml_str = r#"
[logging]
level = ""
"#;
        let cfg: EsgConfig = toml::from_str(toml_str).expect("config should parse");
        assert!(cfg.validate().is_err());
    }
}
