// Application layer: wires config, storage and pipeline into a single run.

use crate::adapters::storage::LocalStorage;
use crate::config::EtlConfig;
use crate::core::etl::{EtlEngine, RunSummary};
use crate::core::pipeline::PostsPipeline;
use crate::utils::error::Result;
use crate::utils::validation::Validate;

/// Runs the pipeline once against `endpoint`, writing CSV to `output_file`.
pub async fn run(endpoint: &str, output_file: &str) -> Result<RunSummary> {
    run_with_config(EtlConfig::new(endpoint, output_file)).await
}

pub async fn run_with_config(config: EtlConfig) -> Result<RunSummary> {
    config.validate()?;
    tracing::debug!("Effective config: {:?}", config);

    let pipeline = PostsPipeline::new(LocalStorage::new(), config);
    EtlEngine::new(pipeline).run().await
}
