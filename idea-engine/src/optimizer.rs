use llm_interface::prompts::{idea_prompt, IDEA_MAX_TOKENS};
use llm_interface::{parse_reply, LlmProvider};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};
use trendcast_core::{clamp_chars, ErrorExt, FallbackReason, Generated, OptimizedIdea, RawIdea};

/// Score given to model answers that omit or garble `viral_score`.
pub const MODEL_DEFAULT_SCORE: i64 = 85;
pub const RULE_SCORE_CAP: u64 = 98;
const SALVAGED_HOOK_CHARS: usize = 100;

/// Loose view of the model's JSON answer. Every field may be absent.
#[derive(Debug, Default, Deserialize)]
struct ModelIdea {
    title: Option<String>,
    hook: Option<String>,
    keyword: Option<String>,
    viral_elements: Option<Value>,
    viral_score: Option<Value>,
}

pub struct IdeaOptimizer<P> {
    provider: Option<P>,
}

impl<P: LlmProvider> IdeaOptimizer<P> {
    pub fn new(provider: Option<P>) -> Self {
        Self { provider }
    }

    pub fn has_model(&self) -> bool {
        self.provider.is_some()
    }

    pub async fn optimize(&self, raw: &RawIdea, use_model: bool) -> Generated<OptimizedIdea> {
        let provider = match (&self.provider, use_model) {
            (Some(provider), true) => provider,
            _ => return Generated::Fallback(Self::rule_based(raw), FallbackReason::ModelDisabled),
        };

        let reply = match provider.complete(&idea_prompt(raw), IDEA_MAX_TOKENS).await {
            Ok(reply) => reply,
            Err(e) => {
                e.log_warn();
                return Generated::Fallback(Self::rule_based(raw), FallbackReason::call_failed(&e));
            }
        };

        match parse_reply::<ModelIdea>(&reply) {
            Ok(answer) => {
                debug!("Model optimized idea: {}", raw.title);
                Generated::Ok(Self::from_model(raw, answer))
            }
            Err(e) => {
                warn!("Model reply for '{}' is not JSON: {}", raw.title, e);
                Generated::Degraded(
                    Self::salvage(raw, &reply),
                    FallbackReason::malformed(e.to_string()),
                )
            }
        }
    }

    /// Deterministic optimisation used without a model.
    pub fn rule_based(raw: &RawIdea) -> OptimizedIdea {
        let title = non_empty(&raw.title).unwrap_or("New Trend");
        let score = (raw.popularity / 100 + OptimizedIdea::BASELINE_SCORE as u64).min(RULE_SCORE_CAP);
        OptimizedIdea::new(
            title,
            format!("Breaking: {} is changing everything...", title),
            raw_keyword(raw),
            score as i64,
        )
    }

    fn from_model(raw: &RawIdea, answer: ModelIdea) -> OptimizedIdea {
        let title = answer
            .title
            .as_deref()
            .and_then(non_empty)
            .unwrap_or(&raw.title)
            .to_string();
        let hook = answer
            .hook
            .filter(|hook| !hook.trim().is_empty())
            .unwrap_or_else(|| format!("Breaking: {}...", raw.title));
        let keyword = answer
            .keyword
            .filter(|keyword| !keyword.trim().is_empty())
            .unwrap_or_else(|| raw_keyword(raw));
        let score = answer
            .viral_score
            .as_ref()
            .and_then(score_from_value)
            .unwrap_or(MODEL_DEFAULT_SCORE);
        let elements = answer
            .viral_elements
            .map(elements_from_value)
            .unwrap_or_default();

        OptimizedIdea::new(&title, hook, keyword, score).with_viral_elements(elements)
    }

    fn salvage(raw: &RawIdea, reply: &str) -> OptimizedIdea {
        OptimizedIdea::new(
            &raw.title,
            clamp_chars(reply.trim(), SALVAGED_HOOK_CHARS),
            raw_keyword(raw),
            MODEL_DEFAULT_SCORE,
        )
    }
}

fn non_empty(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn raw_keyword(raw: &RawIdea) -> String {
    non_empty(&raw.keywords).unwrap_or("coding").to_string()
}

/// Accepts integers, floats and numeric strings.
fn score_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|score| score.round() as i64)),
        Value::String(text) => {
            let text = text.trim();
            text.parse::<i64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().map(|score| score.round() as i64))
        }
        _ => None,
    }
}

fn elements_from_value(value: Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(text) if !text.trim().is_empty() => Some(text),
                _ => None,
            })
            .collect(),
        Value::String(text) if !text.trim().is_empty() => vec![text],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trendcast_core::{CoreError, LlmError, TrendSource};

    enum StubReply {
        Text(String),
        Fail,
    }

    struct StubProvider(StubReply);

    impl LlmProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        async fn complete(&self, _prompt: &str, max_tokens: u32) -> Result<String, CoreError> {
            assert_eq!(max_tokens, IDEA_MAX_TOKENS);
            match &self.0 {
                StubReply::Text(text) => Ok(text.clone()),
                StubReply::Fail => Err(CoreError::Llm(LlmError::RateLimitExceeded {
                    provider: "stub".to_string(),
                })),
            }
        }
    }

    fn raw(popularity: u64) -> RawIdea {
        RawIdea {
            title: "Rust 2.0 announced".to_string(),
            source: TrendSource::LinkAggregator,
            keywords: "Tech News".to_string(),
            description: "Rust 2.0 announced".to_string(),
            url: String::new(),
            popularity,
        }
    }

    fn optimizer(reply: StubReply) -> IdeaOptimizer<StubProvider> {
        IdeaOptimizer::new(Some(StubProvider(reply)))
    }

    #[test]
    fn test_rule_based_scores() {
        assert_eq!(IdeaOptimizer::<StubProvider>::rule_based(&raw(0)).viral_score, 70);
        assert_eq!(IdeaOptimizer::<StubProvider>::rule_based(&raw(250)).viral_score, 72);
        assert_eq!(IdeaOptimizer::<StubProvider>::rule_based(&raw(1_234)).viral_score, 82);
        assert_eq!(IdeaOptimizer::<StubProvider>::rule_based(&raw(250_000)).viral_score, 98);

        let idea = IdeaOptimizer::<StubProvider>::rule_based(&raw(0));
        assert_eq!(idea.hook, "Breaking: Rust 2.0 announced is changing everything...");
        assert_eq!(idea.keyword, "Tech News");
    }

    #[tokio::test]
    async fn test_no_provider_is_model_disabled() {
        let optimizer: IdeaOptimizer<StubProvider> = IdeaOptimizer::new(None);
        let result = optimizer.optimize(&raw(500), true).await;
        assert_eq!(result.reason(), Some(&FallbackReason::ModelDisabled));
        assert_eq!(result.value().viral_score, 75);
    }

    #[tokio::test]
    async fn test_use_model_false_skips_provider() {
        let result = optimizer(StubReply::Fail).optimize(&raw(0), false).await;
        assert_eq!(result.reason(), Some(&FallbackReason::ModelDisabled));
    }

    #[tokio::test]
    async fn test_model_json_reply() {
        let reply = r#"```json
{"title": "Rust 2.0 Changes Everything", "hook": "You will not believe this", "keyword": "Rust",
 "viral_elements": ["shock", "curiosity"], "viral_score": 140}
```"#;
        let result = optimizer(StubReply::Text(reply.to_string()))
            .optimize(&raw(0), true)
            .await;
        assert!(result.is_ok());
        let idea = result.value();
        assert_eq!(idea.title, "Rust 2.0 Changes Everything");
        assert_eq!(idea.keyword, "Rust");
        assert_eq!(idea.viral_score, 100);
        assert_eq!(idea.viral_elements, vec!["shock", "curiosity"]);
    }

    #[tokio::test]
    async fn test_model_reply_backfills_missing_fields() {
        let result = optimizer(StubReply::Text(r#"{"viral_score": "91"}"#.to_string()))
            .optimize(&raw(0), true)
            .await;
        assert!(result.is_ok());
        let idea = result.value();
        assert_eq!(idea.title, "Rust 2.0 announced");
        assert_eq!(idea.hook, "Breaking: Rust 2.0 announced...");
        assert_eq!(idea.keyword, "Tech News");
        assert_eq!(idea.viral_score, 91);

        let defaulted = optimizer(StubReply::Text(r#"{"viral_score": "very high"}"#.to_string()))
            .optimize(&raw(0), true)
            .await;
        assert_eq!(defaulted.value().viral_score, 85);
    }

    #[tokio::test]
    async fn test_non_json_reply_is_degraded() {
        let reply = format!("Here is a great idea: {}", "a".repeat(200));
        let result = optimizer(StubReply::Text(reply)).optimize(&raw(0), true).await;
        assert!(result.is_degraded());
        let idea = result.value();
        assert_eq!(idea.hook.chars().count(), 100);
        assert!(idea.hook.starts_with("Here is a great idea"));
        assert_eq!(idea.viral_score, 85);
        assert_eq!(idea.title, "Rust 2.0 announced");
    }

    #[tokio::test]
    async fn test_call_failure_uses_rule_based() {
        let result = optimizer(StubReply::Fail).optimize(&raw(1_000), true).await;
        assert!(result.is_fallback());
        assert_eq!(result.value().viral_score, 80);
        match result.reason() {
            Some(FallbackReason::ModelCallFailed { code, .. }) => assert_eq!(code, "LLM_RATE_LIMIT"),
            other => panic!("unexpected reason {:?}", other),
        }
    }

    #[test]
    fn test_score_from_value() {
        assert_eq!(score_from_value(&serde_json::json!(92)), Some(92));
        assert_eq!(score_from_value(&serde_json::json!(88.6)), Some(89));
        assert_eq!(score_from_value(&serde_json::json!(" 90 ")), Some(90));
        assert_eq!(score_from_value(&serde_json::json!(null)), None);
        assert_eq!(score_from_value(&serde_json::json!([1])), None);
    }
}
