use crate::TrendSource;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Trend source error: {0}")]
    TrendSource(#[from] TrendSourceError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

#[derive(Error, Debug, Clone)]
pub enum TrendSourceError {
    #[error("{origin} returned status {status_code}")]
    Unavailable { origin: TrendSource, status_code: u16 },

    #[error("Request to {origin} timed out")]
    RequestTimeout { origin: TrendSource },

    #[error("Request to {origin} failed: {reason}")]
    RequestFailed { origin: TrendSource, reason: String },

    #[error("Invalid response from {origin}: {details}")]
    InvalidResponse { origin: TrendSource, details: String },
}

impl TrendSourceError {
    pub fn origin(&self) -> TrendSource {
        match self {
            TrendSourceError::Unavailable { origin, .. }
            | TrendSourceError::RequestTimeout { origin }
            | TrendSourceError::RequestFailed { origin, .. }
            | TrendSourceError::InvalidResponse { origin, .. } => *origin,
        }
    }
}

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("API key invalid or missing for {provider}")]
    InvalidApiKey { provider: String },

    #[error("Rate limit exceeded for {provider}")]
    RateLimitExceeded { provider: String },

    #[error("Model not available: {model}")]
    ModelNotAvailable { model: String },

    #[error("Provider service unavailable: {provider} (status {status_code})")]
    ServiceUnavailable { provider: String, status_code: u16 },

    #[error("Request timeout for {provider}")]
    RequestTimeout { provider: String },

    #[error("Request to {provider} rejected with status {status_code}: {body}")]
    RequestRejected {
        provider: String,
        status_code: u16,
        body: String,
    },

    #[error("Invalid response format from {provider}: {details}")]
    InvalidResponseFormat { provider: String, details: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Configuration validation failed: {reason}")]
    ValidationFailed { reason: String },

    #[error("Configuration parsing error: {0}")]
    Parse(#[from] toml::de::Error),
}
