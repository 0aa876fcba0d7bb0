use crate::domain::model::{EmptyGroupPolicy, Parameters, ServiceSelection};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Location `path` refers to, for reporting.
    fn describe(&self, path: &str) -> String {
        path.to_string()
    }
}

pub trait ConfigProvider: Send + Sync {
    fn branch(&self) -> Option<&str>;
    fn filter_file(&self) -> &str;
    fn output_file(&self) -> &str;
    fn main_branches(&self) -> &[String];
    fn empty_group_policy(&self) -> EmptyGroupPolicy;
    fn pretty(&self) -> bool;

    /// Exact match against the configured main branches; absent means not main.
    fn is_main_branch(&self) -> bool {
        self.branch()
            .is_some_and(|branch| self.main_branches().iter().any(|m| m == branch))
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<ServiceSelection>;
    async fn transform(&self, selection: ServiceSelection) -> Result<Parameters>;
    async fn load(&self, parameters: &Parameters) -> Result<String>;
}
