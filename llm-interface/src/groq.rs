use crate::LlmProvider;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, warn};
use trendcast_core::{clamp_chars, AppConfig, CoreError, LlmError};

const PROVIDER_NAME: &str = "groq";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const ERROR_BODY_CHARS: usize = 200;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatResponseMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponseMessage {
    pub content: Option<String>,
}

/// OpenAI-compatible chat completions client, pointed at Groq by default.
#[derive(Debug, Clone)]
pub struct GroqProvider {
    http_client: Client,
    api_key: String,
    model: String,
    api_base: String,
    timeout: Duration,
}

impl GroqProvider {
    pub fn new(api_key: String, model: String, api_base: String) -> Self {
        Self {
            http_client: Client::new(),
            api_key,
            model,
            api_base: api_base.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Returns `None` when no usable key is configured.
    pub fn from_config(config: &AppConfig) -> Option<Self> {
        if !config.use_ai() {
            return None;
        }
        let api_key = config.groq_api_key.clone()?;
        info!("Groq provider initialized with model: {}", config.model_name);
        Some(Self::new(
            api_key,
            config.model_name.clone(),
            config.api_base.clone(),
        ))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn map_status(&self, status: StatusCode, body: String) -> LlmError {
        let provider = PROVIDER_NAME.to_string();
        match status.as_u16() {
            401 | 403 => LlmError::InvalidApiKey { provider },
            404 => LlmError::ModelNotAvailable {
                model: self.model.clone(),
            },
            429 => LlmError::RateLimitExceeded { provider },
            code if status.is_server_error() => LlmError::ServiceUnavailable {
                provider,
                status_code: code,
            },
            code => LlmError::RequestRejected {
                provider,
                status_code: code,
                body: clamp_chars(&body, ERROR_BODY_CHARS),
            },
        }
    }
}

impl LlmProvider for GroqProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, CoreError> {
        let url = format!("{}/chat/completions", self.api_base);
        let request = ChatRequest {
            model: &self.model,
            max_tokens,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        debug!(
            "Sending chat completion to {} (model {}, max_tokens {})",
            url, self.model, max_tokens
        );
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Network error calling {}: {}", PROVIDER_NAME, e);
                if e.is_timeout() {
                    CoreError::Llm(LlmError::RequestTimeout {
                        provider: PROVIDER_NAME.to_string(),
                    })
                } else {
                    CoreError::Network(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("{} returned status {}", PROVIDER_NAME, status);
            return Err(CoreError::Llm(self.map_status(status, body)));
        }

        let completion: ChatResponse = response.json().await.map_err(|e| {
            CoreError::Llm(LlmError::InvalidResponseFormat {
                provider: PROVIDER_NAME.to_string(),
                details: e.to_string(),
            })
        })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| {
                CoreError::Llm(LlmError::InvalidResponseFormat {
                    provider: PROVIDER_NAME.to_string(),
                    details: "response has no message content".to_string(),
                })
            })
    }
}
