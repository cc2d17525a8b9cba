pub mod groq;
pub mod json;
pub mod prompts;

use trendcast_core::CoreError;

pub use groq::GroqProvider;
pub use json::{parse_reply, strip_code_fence};

/// A hosted text-completion model. One prompt in, one reply out.
pub trait LlmProvider {
    fn name(&self) -> &str;

    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, CoreError>;
}

impl<T: LlmProvider> LlmProvider for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, CoreError> {
        (**self).complete(prompt, max_tokens).await
    }
}
