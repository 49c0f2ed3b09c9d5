use super::toml_config::TomlConfig;
use super::EtlConfig;
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "posts-etl")]
#[command(about = "Fetch JSON records from an API, reshape them and save them as CSV")]
pub struct CliConfig {
    /// API endpoint returning a JSON array of objects
    #[arg(long)]
    pub api_endpoint: Option<String>,

    /// CSV file to create or overwrite
    #[arg(short, long)]
    pub output_file: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, default_value = "compact")]
    pub log_format: LogFormat,

    /// Print the run summary or failure report as JSON on stdout/stderr
    #[arg(long)]
    pub json: bool,
}

impl CliConfig {
    /// Defaults, then the TOML file, then explicit flags.
    pub fn resolve(&self) -> Result<EtlConfig> {
        let mut config = EtlConfig::default();

        if let Some(path) = &self.config {
            tracing::info!("📁 Loading configuration from: {}", path);
            config = config.merge_toml(TomlConfig::from_file(path)?);
        }

        if let Some(endpoint) = &self.api_endpoint {
            config.api_endpoint = endpoint.clone();
        }
        if let Some(output_file) = &self.output_file {
            config.output_file = output_file.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            config.timeout_seconds = timeout;
        }

        Ok(config)
    }
}
