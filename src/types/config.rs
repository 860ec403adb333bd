use crate::error::{PbiDocsError, Result};
use crate::i18n::Lang;
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_TECHNICAL_PREFIXES: [&str; 3] =
    ["LocalDateTable_", "DateTableTemplate_", "ParameterTable_"];
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_INDENT_WIDTH: usize = 4;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PbiDocsConfig {
    pub output: Option<OutputConfig>,
    pub docs: Option<DocsConfig>,
    pub model: Option<ModelConfig>,
    pub dax: Option<DaxConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocsConfig {
    pub language: Option<Lang>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Table-name prefixes treated as technical. Replaces the defaults
    /// when set.
    pub technical_prefixes: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DaxConfig {
    pub indent_width: Option<usize>,
}

impl PbiDocsConfig {
    pub fn technical_prefixes(&self) -> Vec<String> {
        self.model
            .as_ref()
            .and_then(|model| model.technical_prefixes.clone())
            .unwrap_or_else(|| {
                DEFAULT_TECHNICAL_PREFIXES
                    .iter()
                    .map(|prefix| prefix.to_string())
                    .collect()
            })
    }

    pub fn indent_width(&self) -> usize {
        self.dax
            .as_ref()
            .and_then(|dax| dax.indent_width)
            .unwrap_or(DEFAULT_INDENT_WIDTH)
    }

    pub fn language(&self) -> Option<Lang> {
        self.docs.as_ref().and_then(|docs| docs.language)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output
            .as_ref()
            .and_then(|output| output.dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(indent_width) = self.dax.as_ref().and_then(|dax| dax.indent_width) {
            if !(1..=8).contains(&indent_width) {
                return Err(PbiDocsError::ConfigParse(format!(
                    "dax.indent_width must be between 1 and 8 (found {indent_width})"
                )));
            }
        }

        if let Some(prefixes) = self
            .model
            .as_ref()
            .and_then(|model| model.technical_prefixes.as_ref())
        {
            if prefixes.iter().any(|prefix| prefix.trim().is_empty()) {
                return Err(PbiDocsError::ConfigParse(
                    "model.technical_prefixes entries must be non-empty".to_string(),
                ));
            }
        }

        if let Some(dir) = self.output.as_ref().and_then(|output| output.dir.as_ref()) {
            if dir.as_os_str().is_empty() {
                return Err(PbiDocsError::ConfigParse(
                    "output.dir must not be empty".to_string(),
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
    fn defaults_apply_when_sections_are_missing() {
        let cfg = PbiDocsConfig::default();
        assert_eq!(cfg.indent_width(), 4);
        assert_eq!(cfg.output_dir(), PathBuf::from("output"));
        assert_eq!(cfg.language(), None);
        assert_eq!(
            cfg.technical_prefixes(),
            vec![
                "LocalDateTable_".to_string(),
                "DateTableTemplate_".to_string(),
                "ParameterTable_".to_string(),
            ]
        );
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
[output]
dir = "docs/models"

[docs]
language = "es"

[model]
technical_prefixes = ["Hidden_", "Internal_"]

[dax]
indent_width = 2
"#;
        let cfg: PbiDocsConfig = toml::from_str(toml_str).expect("full config should parse");
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.language(), Some(Lang::Es));
        assert_eq!(cfg.indent_width(), 2);
        assert_eq!(cfg.output_dir(), PathBuf::from("docs/models"));
        assert_eq!(
            cfg.technical_prefixes(),
            vec!["Hidden_".to_string(), "Internal_".to_string()]
        );
    }

    #[test]
    fn validate_rejects_out_of_range_indent() {
        let toml_str = r#"
[dax]
indent_width = 0
"#;
        let cfg: PbiDocsConfig = toml::from_str(toml_str).expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("dax.indent_width"));
    }

    #[test]
    fn validate_rejects_empty_technical_prefix() {
        let toml_str = r#"
[model]
technical_prefixes = ["LocalDateTable_", " "]
"#;
        let cfg: PbiDocsConfig = toml::from_str(toml_str).expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("technical_prefixes"));
    }
}
