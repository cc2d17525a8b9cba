use crate::error::*;
use std::fmt::Display;
use tracing::{debug, error, warn};

/// Logging helpers and stable codes shared by every error in the workspace.
pub trait ErrorExt: Display + Sized {
    /// Prefix used in log lines.
    fn kind(&self) -> &'static str;

    /// Stable machine-readable code, recorded in fallback reasons and reports.
    fn error_code(&self) -> &'static str;

    fn user_friendly_message(&self) -> String;

    fn log_error(&self) -> &Self {
        error!(code = self.error_code(), "{}: {}", self.kind(), self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!(code = self.error_code(), "{}: {}", self.kind(), self);
        self
    }
}

impl ErrorExt for CoreError {
    fn kind(&self) -> &'static str {
        match self {
            CoreError::TrendSource(e) => e.kind(),
            CoreError::Llm(e) => e.kind(),
            CoreError::Config(e) => e.kind(),
            _ => "CoreError",
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            CoreError::TrendSource(e) => e.error_code(),
            CoreError::Llm(e) => e.error_code(),
            CoreError::Config(e) => e.error_code(),
            CoreError::Io(_) => "IO",
            CoreError::Serialization(_) => "SERIALIZATION",
            CoreError::Network(e) if e.is_timeout() => "NETWORK_TIMEOUT",
            CoreError::Network(_) => "NETWORK",
            CoreError::InvalidInput { .. } => "INVALID_INPUT",
            CoreError::Internal { .. } => "INTERNAL",
        }
    }

    fn user_friendly_message(&self) -> String {
        match self {
            CoreError::TrendSource(e) => e.user_friendly_message(),
            CoreError::Llm(e) => e.user_friendly_message(),
            CoreError::Config(e) => e.user_friendly_message(),
            CoreError::Io(e) => format!("Could not read or write output files: {}", e),
            CoreError::Serialization(_) => "A record could not be encoded as JSON.".to_string(),
            CoreError::Network(_) => {
                "Network connection error. Please check your internet connection.".to_string()
            }
            CoreError::InvalidInput { message } => format!("Invalid input: {}", message),
            CoreError::Internal { .. } => "An unexpected error occurred.".to_string(),
        }
    }

    fn log_error(&self) -> &Self {
        error!(code = self.error_code(), "{}: {}", self.kind(), self);
        if let CoreError::TrendSource(e) = self {
            debug!("Failed source: {}", e.origin());
        }
        self
    }
}

impl ErrorExt for TrendSourceError {
    fn kind(&self) -> &'static str {
        "TrendSourceError"
    }

    fn error_code(&self) -> &'static str {
        match self {
            TrendSourceError::Unavailable { .. } => "SOURCE_UNAVAILABLE",
            TrendSourceError::RequestTimeout { .. } => "SOURCE_TIMEOUT",
            TrendSourceError::RequestFailed { .. } => "SOURCE_REQUEST_FAILED",
            TrendSourceError::InvalidResponse { .. } => "SOURCE_INVALID_RESPONSE",
        }
    }

    fn user_friendly_message(&self) -> String {
        let problem = match self {
            TrendSourceError::Unavailable { status_code, .. } => {
                format!("is unavailable right now (status {})", status_code)
            }
            TrendSourceError::RequestTimeout { .. } => "did not answer in time".to_string(),
            TrendSourceError::RequestFailed { .. } => "could not be reached".to_string(),
            TrendSourceError::InvalidResponse { .. } => "sent an unexpected response".to_string(),
        };
        format!("{} {}. Its trends were skipped.", self.origin(), problem)
    }
}

impl ErrorExt for LlmError {
    fn kind(&self) -> &'static str {
        "LlmError"
    }

    fn error_code(&self) -> &'static str {
        match self {
            LlmError::InvalidApiKey { .. } => "LLM_INVALID_API_KEY",
            LlmError::RateLimitExceeded { .. } => "LLM_RATE_LIMIT",
            LlmError::ModelNotAvailable { .. } => "LLM_MODEL_NOT_AVAILABLE",
            LlmError::ServiceUnavailable { .. } => "LLM_SERVICE_UNAVAILABLE",
            LlmError::RequestTimeout { .. } => "LLM_TIMEOUT",
            LlmError::RequestRejected { .. } => "LLM_REQUEST_REJECTED",
            LlmError::InvalidResponseFormat { .. } => "LLM_INVALID_RESPONSE",
        }
    }

    fn user_friendly_message(&self) -> String {
        match self {
            LlmError::InvalidApiKey { provider } => {
                format!("The {} API key was rejected. Templates were used instead.", provider)
            }
            LlmError::RateLimitExceeded { provider } => {
                format!("{} is rate limiting requests. Templates were used instead.", provider)
            }
            LlmError::ModelNotAvailable { model } => {
                format!("Model '{}' is not available. Set GROQ_MODEL to another model.", model)
            }
            LlmError::ServiceUnavailable { provider, .. } => {
                format!("{} is temporarily unavailable. Templates were used instead.", provider)
            }
            LlmError::RequestTimeout { provider } => {
                format!("{} took too long to answer. Templates were used instead.", provider)
            }
            LlmError::RequestRejected { provider, status_code, .. } => {
                format!("{} rejected the request (status {}).", provider, status_code)
            }
            LlmError::InvalidResponseFormat { provider, .. } => {
                format!("{} answered in an unexpected format.", provider)
            }
        }
    }
}

impl ErrorExt for ConfigError {
    fn kind(&self) -> &'static str {
        "ConfigError"
    }

    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::FileNotFound { .. } => "CONFIG_FILE_NOT_FOUND",
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE",
            ConfigError::ValidationFailed { .. } => "CONFIG_VALIDATION_FAILED",
            ConfigError::Parse(_) => "CONFIG_PARSE_ERROR",
        }
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ConfigError::FileNotFound { path } => format!("Configuration file '{}' not found.", path),
            ConfigError::InvalidValue { field, .. } => {
                format!("Invalid value for configuration field '{}'.", field)
            }
            ConfigError::ValidationFailed { reason } => format!("Configuration is invalid: {}", reason),
            ConfigError::Parse(e) => format!("Configuration file is not valid TOML: {}", e),
        }
    }
}

/// Reports fatal errors at the binary boundary: logs them and renders a
/// one-line message for the terminal.
#[derive(Debug, Clone, Copy)]
pub struct ErrorReporter {
    include_code: bool,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self { include_code: true }
    }

    pub fn with_code(mut self, include_code: bool) -> Self {
        self.include_code = include_code;
        self
    }

    pub fn render(&self, error: &CoreError) -> String {
        if self.include_code {
            format!("[{}] {}", error.error_code(), error.user_friendly_message())
        } else {
            error.user_friendly_message()
        }
    }

    /// Logs the error and returns the rendered message.
    pub fn report_error(&self, error: &CoreError) -> String {
        error.log_error();
        self.render(error)
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}
