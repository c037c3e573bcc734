use thiserror::Error;

#[derive(Error, Debug)]
pub enum PetError {
    #[error("{service} request failed with HTTP status {status}")]
    UpstreamError { service: String, status: u16 },

    #[error("Failed to parse {service} response: {message}")]
    ParseError { service: String, message: String },

    #[error("HTTP transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Upstream,
    Parse,
    Network,
    Output,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PetError {
    pub fn upstream(service: &str, status: u16) -> Self {
        PetError::UpstreamError {
            service: service.to_string(),
            status,
        }
    }

    pub fn parse(service: &str, message: impl Into<String>) -> Self {
        PetError::ParseError {
            service: service.to_string(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            PetError::UpstreamError { .. } => ErrorCategory::Upstream,
            PetError::ParseError { .. } => ErrorCategory::Parse,
            PetError::Transport(_) => ErrorCategory::Network,
            PetError::IoError(_) | PetError::SerializationError(_) => ErrorCategory::Output,
            PetError::ConfigError { .. }
            | PetError::MissingConfigError { .. }
            | PetError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 上游暫時失敗，稍後重跑即可
            ErrorCategory::Upstream | ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Parse | ErrorCategory::Output => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PetError::UpstreamError { service, status } => {
                format!("{} is not answering right now (HTTP {})", service, status)
            }
            PetError::ParseError { service, .. } => {
                format!("{} sent a page we could not understand", service)
            }
            PetError::Transport(_) => "Could not reach the pet adoption service".to_string(),
            PetError::IoError(_) | PetError::SerializationError(_) => {
                "Could not write the pet record".to_string()
            }
            PetError::ConfigError { .. }
            | PetError::MissingConfigError { .. }
            | PetError::InvalidConfigValueError { .. } => format!("Configuration problem: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Upstream => "Try again later; the upstream service returned an error",
            ErrorCategory::Parse => "The upstream response format may have changed; run with --verbose and inspect the body",
            ErrorCategory::Network => "Check your network connection and the configured endpoint",
            ErrorCategory::Output => "Check that the output path exists and is writable",
            ErrorCategory::Configuration => {
                "Check the config file or the petfinder_*/petharbor_* environment variables"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, PetError>;
