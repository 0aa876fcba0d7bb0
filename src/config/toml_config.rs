use crate::domain::model::EmptyGroupPolicy;
use crate::utils::error::{ParamError, Result};
use crate::utils::validation::{validate_non_empty_list, validate_path, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional file-based settings; every field falls back to the CLI or defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub generator: GeneratorSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorSection {
    pub filter_file: Option<String>,
    pub output_file: Option<String>,
    pub main_branches: Option<Vec<String>>,
    pub empty_groups: Option<EmptyGroupPolicy>,
    pub pretty: Option<bool>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ParamError::ConfigFileError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::from_toml_str_with(content, |name| std::env::var(name).ok())
    }

    /// Parses `content`, resolving `${VAR}` through `lookup` instead of the process environment.
    pub fn from_toml_str_with<F>(content: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let processed_content = Self::substitute_vars(content, lookup)?;

        toml::from_str(&processed_content).map_err(|e| ParamError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the looked-up value; unknown variables are left as-is.
    fn substitute_vars<F>(content: &str, lookup: F) -> Result<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ParamError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            lookup(var_name).unwrap_or_else(|| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        let generator = &self.generator;
        if let Some(filter_file) = &generator.filter_file {
            validate_path("generator.filter_file", filter_file)?;
        }
        if let Some(output_file) = &generator.output_file {
            validate_path("generator.output_file", output_file)?;
        }
        if let Some(main_branches) = &generator.main_branches {
            validate_non_empty_list("generator.main_branches", main_branches)?;
        }
        Ok(())
    }
}
