use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Network error while requesting {url}: {source}")]
    NetworkError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP status {status} returned by {url}")]
    HttpStatusError { url: String, status: u16 },

    #[error("Decode error: {message}")]
    DecodeError { message: String },

    #[error("Transform error: {message}")]
    TransformError { message: String },

    #[error("IO error on {path}: {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV encoding error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

/// 管道階段，用於錯誤回報
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Setup,
    Extract,
    Transform,
    Load,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Configuration,
    Network,
    HttpStatus,
    Decode,
    Transform,
    Io,
}

impl EtlError {
    pub fn decode(message: impl Into<String>) -> Self {
        Self::DecodeError {
            message: message.into(),
        }
    }

    pub fn transform(message: impl Into<String>) -> Self {
        Self::TransformError {
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NetworkError { .. } => ErrorCategory::Network,
            Self::HttpStatusError { .. } => ErrorCategory::HttpStatus,
            Self::DecodeError { .. } => ErrorCategory::Decode,
            Self::TransformError { .. } => ErrorCategory::Transform,
            Self::IoError { .. } | Self::CsvError(_) => ErrorCategory::Io,
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn stage(&self) -> Stage {
        match self.category() {
            ErrorCategory::Configuration => Stage::Setup,
            ErrorCategory::Network | ErrorCategory::HttpStatus | ErrorCategory::Decode => {
                Stage::Extract
            }
            ErrorCategory::Transform => Stage::Transform,
            ErrorCategory::Io => Stage::Load,
        }
    }

    /// 每種失敗類型對應一個獨立的結束碼
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 2,
            ErrorCategory::Network => 3,
            ErrorCategory::HttpStatus => 4,
            ErrorCategory::Decode => 5,
            ErrorCategory::Transform => 6,
            ErrorCategory::Io => 7,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::NetworkError { url, .. } => format!("Could not reach {}", url),
            Self::HttpStatusError { url, status } => {
                format!("{} answered with HTTP {}", url, status)
            }
            Self::DecodeError { message } => {
                format!("The API response could not be read: {}", message)
            }
            Self::TransformError { message } => {
                format!("The fetched data could not be transformed: {}", message)
            }
            Self::IoError { path, source } => {
                format!("Could not write output file {}: {}", path, source)
            }
            Self::CsvError(e) => format!("Could not encode CSV output: {}", e),
            Self::ConfigError { message } => format!("Invalid configuration: {}", message),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid configuration for {}: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => "Check the command line flags and the TOML config file",
            ErrorCategory::Network => {
                "Check the endpoint host, your network connection, or raise --timeout-seconds"
            }
            ErrorCategory::HttpStatus => "Verify the endpoint URL and that the API is available",
            ErrorCategory::Decode => "The endpoint must return a JSON array of objects",
            ErrorCategory::Transform => "Every record's content/body field must be a string",
            ErrorCategory::Io => "Check that the output directory exists and is writable",
        }
    }

    pub fn report(&self) -> FailureReport {
        FailureReport {
            stage: self.stage(),
            category: self.category(),
            exit_code: self.exit_code(),
            message: self.to_string(),
            suggestion: self.recovery_suggestion().to_string(),
        }
    }
}

/// `--json` 模式下輸出的失敗摘要
#[derive(Debug, Clone, Serialize)]
pub struct FailureReport {
    pub stage: Stage,
    pub category: ErrorCategory,
    pub exit_code: i32,
    pub message: String,
    pub suggestion: String,
}

pub type Result<T> = std::result::Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_per_category() {
        let errors = vec![
            EtlError::ConfigError {
                message: "bad".to_string(),
            },
            EtlError::HttpStatusError {
                url: "http://example.com".to_string(),
                status: 500,
            },
            EtlError::decode("not json"),
            EtlError::transform("null content"),
            EtlError::io(
                "out.csv",
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            ),
        ];

        let mut codes: Vec<i32> = errors.iter().map(|e| e.exit_code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
        assert!(codes.iter().all(|c| *c != 0));
    }

    #[test]
    fn test_stage_mapping() {
        assert_eq!(EtlError::decode("x").stage(), Stage::Extract);
        assert_eq!(EtlError::transform("x").stage(), Stage::Transform);
        assert_eq!(
            EtlError::io("p", std::io::Error::other("x")).stage(),
            Stage::Load
        );
    }

    #[test]
    fn test_failure_report_serializes() {
        let report = EtlError::HttpStatusError {
            url: "http://example.com/posts".to_string(),
            status: 503,
        }
        .report();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["stage"], "extract");
        assert_eq!(json["category"], "http_status");
        assert_eq!(json["exit_code"], 4);
    }
}
