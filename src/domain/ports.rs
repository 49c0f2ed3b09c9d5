use crate::domain::model::Table;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    /// Creates or replaces the file at `path` with `data`.
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn output_file(&self) -> &str;
    fn request_timeout(&self) -> Duration;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    /// Source URL the pipeline extracts from.
    fn endpoint(&self) -> &str;
    async fn extract(&self) -> Result<Table>;
    async fn transform(&self, table: Table) -> Result<Table>;
    /// Writes the table and returns the output path.
    async fn load(&self, table: Table) -> Result<String>;
}
