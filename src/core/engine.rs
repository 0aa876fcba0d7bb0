use crate::core::{Parameters, Pipeline};
use crate::utils::error::Result;

/// Result of a generator run. `output_path` is `None` for dry runs.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub parameters: Parameters,
    pub output_path: Option<String>,
}

pub struct ParameterEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ParameterEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Runs extract and transform only.
    pub async fn plan(&self) -> Result<Parameters> {
        tracing::debug!("Resolving service selection...");
        let selection = self.pipeline.extract().await?;

        tracing::debug!("Partitioning services by language group...");
        let parameters = self.pipeline.transform(selection).await?;
        tracing::debug!(
            "Partitioned {} services into {} groups",
            parameters.service_count(),
            parameters.groups().count()
        );

        Ok(parameters)
    }

    pub async fn run(&self) -> Result<GenerationOutcome> {
        let parameters = self.plan().await?;

        tracing::debug!("Writing parameters...");
        let output_path = self.pipeline.load(&parameters).await?;
        tracing::info!("Parameters saved to: {}", output_path);

        Ok(GenerationOutcome {
            parameters,
            output_path: Some(output_path),
        })
    }

    pub async fn dry_run(&self) -> Result<GenerationOutcome> {
        let parameters = self.plan().await?;
        tracing::info!("🔍 DRY RUN MODE - output file not written");

        Ok(GenerationOutcome {
            parameters,
            output_path: None,
        })
    }
}
