use trendcast_core::{
    ConfigError, CoreError, ErrorExt, ErrorReporter, LlmError, TrendSource, TrendSourceError,
};

#[test]
fn test_error_codes() {
    let source_error = CoreError::TrendSource(TrendSourceError::RequestTimeout {
        origin: TrendSource::LinkAggregator,
    });
    assert_eq!(source_error.error_code(), "SOURCE_TIMEOUT");

    let llm_error = CoreError::Llm(LlmError::InvalidApiKey {
        provider: "groq".to_string(),
    });
    assert_eq!(llm_error.error_code(), "LLM_INVALID_API_KEY");

    let config_error = CoreError::Config(ConfigError::ValidationFailed {
        reason: "bad".to_string(),
    });
    assert_eq!(config_error.error_code(), "CONFIG_VALIDATION_FAILED");

    let io_error = CoreError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
    assert_eq!(io_error.error_code(), "IO");
}

#[test]
fn test_source_error_origin() {
    let error = TrendSourceError::Unavailable {
        origin: TrendSource::QaPlatform,
        status_code: 503,
    };
    assert_eq!(error.origin(), TrendSource::QaPlatform);
    assert_eq!(error.to_string(), "Stack Overflow returned status 503");
}

#[test]
fn test_user_friendly_messages() {
    let source_error = CoreError::TrendSource(TrendSourceError::InvalidResponse {
        origin: TrendSource::ArticlePlatform,
        details: "missing items".to_string(),
    });
    let message = source_error.user_friendly_message();
    assert!(message.contains("Dev.to"));
    assert!(message.contains("skipped"));

    let config_error = CoreError::Config(ConfigError::InvalidValue {
        field: "api_base".to_string(),
        value: "nope".to_string(),
    });
    assert!(config_error.user_friendly_message().contains("api_base"));
}

#[test]
fn test_error_reporter_renders_code_and_message() {
    let error = CoreError::Llm(LlmError::RateLimitExceeded {
        provider: "groq".to_string(),
    });

    let line = ErrorReporter::new().report_error(&error);
    assert!(line.starts_with("[LLM_RATE_LIMIT] "));
    assert!(line.contains("rate limiting"));

    let plain = ErrorReporter::new().with_code(false).render(&error);
    assert!(!plain.contains("LLM_RATE_LIMIT"));
}

#[test]
fn test_kind_follows_wrapped_error() {
    let error = CoreError::Config(ConfigError::FileNotFound {
        path: "trendcast.toml".to_string(),
    });
    assert_eq!(error.kind(), "ConfigError");
    assert_eq!(
        CoreError::Internal { message: "x".to_string() }.kind(),
        "CoreError"
    );
}
