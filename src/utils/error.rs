use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Geolocation failed: {message}")]
    GeolocationError { message: String },

    #[error("Geolocation timed out after {seconds}s")]
    GeolocationTimeout { seconds: u64 },

    #[error("Feed '{feed}' failed: {message}")]
    FeedError { feed: String, message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

/// 錯誤分類，決定 CLI 的退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Upstream,
    System,
}

impl SiteError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SiteError::ConfigError { .. }
            | SiteError::InvalidConfigValueError { .. }
            | SiteError::MissingConfigError { .. }
            | SiteError::SerializationError(_) => ErrorCategory::Configuration,
            SiteError::ApiError(_)
            | SiteError::GeolocationError { .. }
            | SiteError::GeolocationTimeout { .. }
            | SiteError::FeedError { .. } => ErrorCategory::Upstream,
            SiteError::IoError(_) | SiteError::ProcessingError { .. } => ErrorCategory::System,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 1,
            ErrorCategory::Upstream => 2,
            ErrorCategory::System => 3,
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            SiteError::ApiError(e) if e.is_timeout() => {
                "An upstream service did not answer in time".to_string()
            }
            SiteError::ApiError(_) => "Could not reach an upstream service".to_string(),
            SiteError::IoError(e) => format!("File access failed: {}", e),
            SiteError::SerializationError(e) => format!("Site configuration is not valid JSON: {}", e),
            SiteError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check site-widgets.toml and the site configuration JSON"
            }
            ErrorCategory::Upstream => "Check your network connection and try again",
            ErrorCategory::System => "Check file permissions of the output directory",
        }
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;
