use crate::template::{category_of, template_description, template_image_prompt, template_script};
use llm_interface::prompts::{script_prompt, SCRIPT_MAX_TOKENS};
use llm_interface::{parse_reply, LlmProvider};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};
use trendcast_core::{ErrorExt, FallbackReason, Generated, OptimizedIdea, Scene, SceneKind, Script};

#[derive(Debug, Deserialize)]
struct ModelScript {
    title: Option<String>,
    description: Option<String>,
    scenes: Vec<ModelScene>,
}

#[derive(Debug, Deserialize)]
struct ModelScene {
    #[serde(default, alias = "image-prompt")]
    image_prompt: Option<String>,
    #[serde(default)]
    narration: Option<String>,
    #[serde(default)]
    duration: Option<Value>,
}

pub struct ScriptExpander<P> {
    provider: Option<P>,
}

impl<P: LlmProvider> ScriptExpander<P> {
    pub fn new(provider: Option<P>) -> Self {
        Self { provider }
    }

    pub async fn expand(&self, idea: &OptimizedIdea, use_model: bool) -> Generated<Script> {
        let provider = match (&self.provider, use_model) {
            (Some(provider), true) => provider,
            _ => {
                info!("Using template script for: {}", idea.title);
                return Generated::Fallback(template_script(idea), FallbackReason::ModelDisabled);
            }
        };

        let prompt = script_prompt(idea, category_of(idea));
        let reply = match provider.complete(&prompt, SCRIPT_MAX_TOKENS).await {
            Ok(reply) => reply,
            Err(e) => {
                e.log_warn();
                return Generated::Fallback(template_script(idea), FallbackReason::call_failed(&e));
            }
        };

        match Self::from_reply(idea, &reply) {
            Ok(script) => {
                info!("Model wrote a {}-scene script for: {}", script.scenes.len(), idea.title);
                Generated::Ok(script)
            }
            Err(details) => {
                warn!("Discarding model script for '{}': {}", idea.title, details);
                Generated::Fallback(template_script(idea), FallbackReason::malformed(details))
            }
        }
    }

    /// Parses and normalises a model reply onto the canonical schedule.
    fn from_reply(idea: &OptimizedIdea, reply: &str) -> Result<Script, String> {
        let answer: ModelScript = parse_reply(reply).map_err(|e| e.to_string())?;

        if answer.scenes.len() != Script::SCENE_COUNT {
            return Err(format!(
                "expected {} scenes, got {}",
                Script::SCENE_COUNT,
                answer.scenes.len()
            ));
        }

        let mut scenes = Vec::with_capacity(Script::SCENE_COUNT);
        for (kind, scene) in SceneKind::ALL.iter().zip(answer.scenes) {
            let narration = scene
                .narration
                .map(|text| text.trim().to_string())
                .filter(|text| !text.is_empty())
                .ok_or_else(|| format!("scene {} has no narration", kind.number()))?;
            let image_prompt = scene
                .image_prompt
                .map(|text| text.trim().to_string())
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| template_image_prompt(*kind, idea));
            let duration = scene
                .duration
                .as_ref()
                .and_then(duration_from_value)
                .unwrap_or_else(|| kind.default_duration());

            scenes.push(Scene::new(*kind, duration, image_prompt, narration));
        }

        let title = answer
            .title
            .filter(|title| !title.trim().is_empty())
            .unwrap_or_else(|| idea.title.clone());
        let description = answer
            .description
            .filter(|description| !description.trim().is_empty())
            .unwrap_or_else(|| template_description(idea));

        Ok(Script::new(title, description, scenes))
    }
}

fn duration_from_value(value: &Value) -> Option<u32> {
    let seconds = match value {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse::<u64>().ok(),
        _ => None,
    }?;
    u32::try_from(seconds).ok().filter(|seconds| *seconds > 0)
}
