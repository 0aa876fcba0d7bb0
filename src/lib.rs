pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, CliConfig, GeneratorSettings};
pub use crate::core::{
    engine::{GenerationOutcome, ParameterEngine},
    pipeline::ParameterPipeline,
};
pub use domain::model::{EmptyGroupPolicy, LanguageGroup, Parameters, ServiceSelection};
pub use utils::error::{ParamError, Result};
