#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_range, validate_url, Validate};
use serde::Serialize;
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_API_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/posts";
pub const DEFAULT_OUTPUT_FILE: &str = "api_data.csv";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const MAX_TIMEOUT_SECONDS: u64 = 300;

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EtlConfig {
    pub api_endpoint: String,
    pub output_file: String,
    pub timeout_seconds: u64,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl EtlConfig {
    pub fn new(api_endpoint: impl Into<String>, output_file: impl Into<String>) -> Self {
        Self {
            api_endpoint: api_endpoint.into(),
            output_file: output_file.into(),
            ..Self::default()
        }
    }

    /// Overlays the values present in a TOML config file.
    pub fn merge_toml(mut self, toml: TomlConfig) -> Self {
        if let Some(endpoint) = toml.source.endpoint {
            self.api_endpoint = endpoint;
        }
        if let Some(timeout) = toml.source.timeout_seconds {
            self.timeout_seconds = timeout;
        }
        if let Some(output_file) = toml.load.output_file {
            self.output_file = output_file;
        }
        self
    }
}

impl ConfigProvider for EtlConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn output_file(&self) -> &str {
        &self.output_file
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Validate for EtlConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_endpoint", &self.api_endpoint)?;
        validate_path("output_file", &self.output_file)?;
        validate_range("timeout_seconds", self.timeout_seconds, 1, MAX_TIMEOUT_SECONDS)?;
        Ok(())
    }
}
