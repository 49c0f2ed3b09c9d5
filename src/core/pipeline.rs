use crate::core::{extract, load, transform};
use crate::core::{ConfigProvider, Pipeline, Storage, Table};
use crate::utils::error::Result;
use reqwest::Client;

/// Fetch posts from an API, reshape them, write them as CSV.
pub struct PostsPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> PostsPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for PostsPipeline<S, C> {
    fn endpoint(&self) -> &str {
        self.config.api_endpoint()
    }

    async fn extract(&self) -> Result<Table> {
        extract::extract(
            &self.client,
            self.config.api_endpoint(),
            self.config.request_timeout(),
        )
        .await
    }

    async fn transform(&self, table: Table) -> Result<Table> {
        transform::transform(table)
    }

    async fn load(&self, table: Table) -> Result<String> {
        let path = self.config.output_file();
        load::load(&self.storage, &table, path).await?;
        Ok(path.to_string())
    }
}
