pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::model::EmptyGroupPolicy;
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use crate::utils::validation::{validate_non_empty_list, validate_path, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use toml_config::TomlConfig;

/// Relative to the repository root the job runs from.
pub const DEFAULT_FILTER_FILE: &str = ".circleci/filter-services.json";
pub const DEFAULT_OUTPUT_FILE: &str = ".circleci/pipeline-parameters.json";
pub const DEFAULT_MAIN_BRANCH: &str = "main";

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "ci-param-gen")]
#[command(about = "Generate CI pipeline parameters for the services changed on this branch")]
pub struct CliConfig {
    /// Branch that triggered the run
    #[arg(long, env = "CIRCLE_BRANCH")]
    pub branch: Option<String>,

    /// JSON array of changed service names, read on non-main branches
    #[arg(long)]
    pub filter_file: Option<String>,

    /// Where the parameters JSON is written
    #[arg(long)]
    pub output_file: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Whether groups without changed services are omitted or written as []
    #[arg(long, value_enum)]
    pub empty_groups: Option<EmptyGroupPolicy>,

    /// Pretty-print the output file
    #[arg(long)]
    pub pretty: bool,

    /// Compute and print the parameters without writing the output file
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Effective settings after layering CLI flags over the TOML file over defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorSettings {
    pub branch: Option<String>,
    pub filter_file: String,
    pub output_file: String,
    pub main_branches: Vec<String>,
    pub empty_groups: EmptyGroupPolicy,
    pub pretty: bool,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            branch: None,
            filter_file: DEFAULT_FILTER_FILE.to_string(),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            main_branches: vec![DEFAULT_MAIN_BRANCH.to_string()],
            empty_groups: EmptyGroupPolicy::default(),
            pretty: false,
        }
    }
}

impl GeneratorSettings {
    /// Loads the `--config` file when given and merges it with the CLI flags.
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                Some(file)
            }
            None => None,
        };
        Ok(Self::merge(cli, file.as_ref()))
    }

    pub fn merge(cli: &CliConfig, file: Option<&TomlConfig>) -> Self {
        let defaults = Self::default();
        let generator = file.map(|f| f.generator.clone()).unwrap_or_default();

        Self {
            branch: cli.branch.clone(),
            filter_file: cli
                .filter_file
                .clone()
                .or(generator.filter_file)
                .unwrap_or(defaults.filter_file),
            output_file: cli
                .output_file
                .clone()
                .or(generator.output_file)
                .unwrap_or(defaults.output_file),
            main_branches: generator.main_branches.unwrap_or(defaults.main_branches),
            empty_groups: cli
                .empty_groups
                .or(generator.empty_groups)
                .unwrap_or(defaults.empty_groups),
            pretty: cli.pretty || generator.pretty.unwrap_or(defaults.pretty),
        }
    }
}

impl ConfigProvider for GeneratorSettings {
    fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    fn filter_file(&self) -> &str {
        &self.filter_file
    }

    fn output_file(&self) -> &str {
        &self.output_file
    }

    fn main_branches(&self) -> &[String] {
        &self.main_branches
    }

    fn empty_group_policy(&self) -> EmptyGroupPolicy {
        self.empty_groups
    }

    fn pretty(&self) -> bool {
        self.pretty
    }
}

impl Validate for GeneratorSettings {
    fn validate(&self) -> Result<()> {
        validate_path("filter_file", &self.filter_file)?;
        validate_path("output_file", &self.output_file)?;
        validate_non_empty_list("main_branches", &self.main_branches)?;
        Ok(())
    }
}
