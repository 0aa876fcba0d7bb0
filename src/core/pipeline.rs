use crate::core::{ConfigProvider, Parameters, Pipeline, ServiceSelection, Storage};
use crate::domain::partition::partition;
use crate::utils::error::{ParamError, Result};
use std::path::PathBuf;

/// Branch-aware parameter generation: choose services, partition, write JSON.
pub struct ParameterPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ParameterPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    fn parse_filter(&self, data: &[u8]) -> Result<Vec<String>> {
        serde_json::from_slice::<Vec<String>>(data).map_err(|e| ParamError::InvalidFilterFile {
            path: PathBuf::from(self.storage.describe(self.config.filter_file())),
            message: e.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ParameterPipeline<S, C> {
    async fn extract(&self) -> Result<ServiceSelection> {
        if self.config.is_main_branch() {
            tracing::info!(
                "Branch '{}' is a main branch, selecting all services",
                self.config.branch().unwrap_or_default()
            );
            return Ok(ServiceSelection::All);
        }

        match self.config.branch() {
            Some(branch) => tracing::debug!("Branch '{}' is not a main branch", branch),
            None => tracing::debug!("No branch set, treating run as non-main"),
        }

        let filter_file = self.config.filter_file();
        tracing::debug!("Reading filter file: {}", self.storage.describe(filter_file));
        let data = self.storage.read_file(filter_file).await?;
        let services = self.parse_filter(&data)?;
        tracing::debug!("Filter file lists {} services", services.len());

        Ok(ServiceSelection::Filtered(services))
    }

    async fn transform(&self, selection: ServiceSelection) -> Result<Parameters> {
        Ok(partition(&selection, self.config.empty_group_policy()))
    }

    async fn load(&self, parameters: &Parameters) -> Result<String> {
        let json = if self.config.pretty() {
            parameters.to_json_pretty()?
        } else {
            parameters.to_json()?
        };

        let output_file = self.config.output_file();
        tracing::debug!("Writing {} bytes to {}", json.len(), output_file);
        self.storage.write_file(output_file, json.as_bytes()).await?;

        Ok(self.storage.describe(output_file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorSettings;
    use crate::domain::model::{EmptyGroupPolicy, LanguageGroup};
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        async fn with_file(path: &str, data: &[u8]) -> Self {
            let storage = Self::default();
            storage
                .files
                .lock()
                .await
                .insert(path.to_string(), data.to_vec());
            storage
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            self.files.lock().await.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files
                .get(path)
                .cloned()
                .ok_or_else(|| ParamError::ReadError {
                    path: PathBuf::from(path),
                    source: std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("File not found: {}", path),
                    ),
                })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    fn settings(branch: Option<&str>) -> GeneratorSettings {
        GeneratorSettings {
            branch: branch.map(str::to_string),
            filter_file: "filtered.json".to_string(),
            output_file: "params.json".to_string(),
            ..GeneratorSettings::default()
        }
    }

    #[tokio::test]
    async fn test_extract_on_main_skips_filter_file() {
        let storage = MockStorage::default();
        let pipeline = ParameterPipeline::new(storage, settings(Some("main")));

        let selection = pipeline.extract().await.unwrap();
        assert_eq!(selection, ServiceSelection::All);
    }

    #[tokio::test]
    async fn test_extract_reads_filter_file_off_main() {
        let storage = MockStorage::with_file("filtered.json", br#"["frontend","ledgerwriter"]"#).await;
        let pipeline = ParameterPipeline::new(storage, settings(Some("dev")));

        let selection = pipeline.extract().await.unwrap();
        assert_eq!(
            selection,
            ServiceSelection::Filtered(vec!["frontend".to_string(), "ledgerwriter".to_string()])
        );
    }

    #[tokio::test]
    async fn test_extract_without_branch_uses_filter_file() {
        let storage = MockStorage::with_file("filtered.json", b"[]").await;
        let pipeline = ParameterPipeline::new(storage, settings(None));

        let selection = pipeline.extract().await.unwrap();
        assert_eq!(selection, ServiceSelection::Filtered(vec![]));
    }

    #[tokio::test]
    async fn test_extract_missing_filter_file() {
        let pipeline = ParameterPipeline::new(MockStorage::default(), settings(Some("dev")));

        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, ParamError::ReadError { .. }));
    }

    #[tokio::test]
    async fn test_extract_rejects_non_string_entries() {
        let bodies: [&[u8]; 4] = [b"[1, 2]", b"{\"frontend\": true}", b"not json", b"\"frontend\""];
        for body in bodies {
            let storage = MockStorage::with_file("filtered.json", body).await;
            let pipeline = ParameterPipeline::new(storage, settings(Some("dev")));

            let err = pipeline.extract().await.unwrap_err();
            assert!(
                matches!(err, ParamError::InvalidFilterFile { .. }),
                "unexpected error for {:?}: {err:?}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[tokio::test]
    async fn test_transform_applies_policy() {
        let mut config = settings(Some("dev"));
        config.empty_groups = EmptyGroupPolicy::Include;
        let pipeline = ParameterPipeline::new(MockStorage::default(), config);

        let params = pipeline
            .transform(ServiceSelection::Filtered(vec!["contacts".to_string()]))
            .await
            .unwrap();

        assert_eq!(params.group(LanguageGroup::Java), Some(&[][..]));
        assert_eq!(params.service_count(), 1);
    }

    #[tokio::test]
    async fn test_load_writes_compact_json() {
        let storage = MockStorage::default();
        let pipeline = ParameterPipeline::new(storage.clone(), settings(Some("main")));

        let params = pipeline.transform(ServiceSelection::All).await.unwrap();
        let written_to = pipeline.load(&params).await.unwrap();

        assert_eq!(written_to, "params.json");
        let data = storage.get_file("params.json").await.unwrap();
        assert_eq!(String::from_utf8(data).unwrap(), params.to_json().unwrap());
    }

    #[tokio::test]
    async fn test_load_pretty_json() {
        let storage = MockStorage::default();
        let mut config = settings(Some("main"));
        config.pretty = true;
        let pipeline = ParameterPipeline::new(storage.clone(), config);

        let params = pipeline.transform(ServiceSelection::All).await.unwrap();
        pipeline.load(&params).await.unwrap();

        let data = String::from_utf8(storage.get_file("params.json").await.unwrap()).unwrap();
        assert!(data.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&data).unwrap();
        assert_eq!(value["all-services"].as_array().unwrap().len(), 6);
    }
}
