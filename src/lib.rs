pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::storage::LocalStorage;
pub use app::{run, run_with_config};
pub use config::EtlConfig;
pub use core::{
    etl::{EtlEngine, PipelineState, RunSummary},
    pipeline::PostsPipeline,
};
pub use domain::model::{Record, Table};
pub use utils::error::{EtlError, Result};
