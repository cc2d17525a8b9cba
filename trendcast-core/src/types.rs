use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Public web API a raw idea was fetched from. Declaration order is the
/// order in which sources are scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendSource {
    CodeHost,
    LinkAggregator,
    ArticlePlatform,
    DiscussionForum,
    QaPlatform,
}

impl TrendSource {
    pub const ALL: [TrendSource; 5] = [
        TrendSource::CodeHost,
        TrendSource::LinkAggregator,
        TrendSource::ArticlePlatform,
        TrendSource::DiscussionForum,
        TrendSource::QaPlatform,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TrendSource::CodeHost => "GitHub",
            TrendSource::LinkAggregator => "HackerNews",
            TrendSource::ArticlePlatform => "Dev.to",
            TrendSource::DiscussionForum => "Reddit",
            TrendSource::QaPlatform => "Stack Overflow",
        }
    }
}

impl std::fmt::Display for TrendSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawIdea {
    pub title: String,
    pub source: TrendSource,
    pub keywords: String,
    pub description: String,
    pub url: String,
    /// Source-specific signal: stars, score, reactions or tag usage count.
    pub popularity: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizedIdea {
    pub title: String,
    pub hook: String,
    pub keyword: String,
    pub viral_score: u8,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub viral_elements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl OptimizedIdea {
    pub const MAX_TITLE_CHARS: usize = 100;
    pub const BASELINE_SCORE: u8 = 70;

    pub fn new(title: &str, hook: impl Into<String>, keyword: impl Into<String>, viral_score: i64) -> Self {
        Self {
            title: clamp_chars(title, Self::MAX_TITLE_CHARS),
            hook: hook.into(),
            keyword: keyword.into(),
            viral_score: clamp_score(viral_score),
            viral_elements: Vec::new(),
            category: None,
        }
    }

    pub fn with_viral_elements(mut self, elements: Vec<String>) -> Self {
        self.viral_elements = elements;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// The eleven stages of a script, in the order they are played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    Hook,
    PatternInterrupt,
    PainPoint,
    SolutionTeaser,
    LessonOne,
    LessonTwo,
    MistakeExpose,
    Implementation,
    Results,
    AdvancedInsight,
    CallToAction,
}

impl SceneKind {
    pub const ALL: [SceneKind; 11] = [
        SceneKind::Hook,
        SceneKind::PatternInterrupt,
        SceneKind::PainPoint,
        SceneKind::SolutionTeaser,
        SceneKind::LessonOne,
        SceneKind::LessonTwo,
        SceneKind::MistakeExpose,
        SceneKind::Implementation,
        SceneKind::Results,
        SceneKind::AdvancedInsight,
        SceneKind::CallToAction,
    ];

    pub fn default_duration(&self) -> u32 {
        match self {
            SceneKind::Hook => 30,
            SceneKind::PatternInterrupt => 45,
            SceneKind::PainPoint => 90,
            SceneKind::SolutionTeaser => 60,
            SceneKind::LessonOne => 90,
            SceneKind::LessonTwo => 90,
            SceneKind::MistakeExpose => 75,
            SceneKind::Implementation => 90,
            SceneKind::Results => 75,
            SceneKind::AdvancedInsight => 60,
            SceneKind::CallToAction => 30,
        }
    }

    /// 1-based position in the schedule.
    pub fn number(&self) -> u8 {
        SceneKind::ALL
            .iter()
            .position(|kind| kind == self)
            .map(|index| index as u8 + 1)
            .unwrap_or(0)
    }

    pub fn from_number(number: u8) -> Option<SceneKind> {
        SceneKind::ALL.get((number as usize).checked_sub(1)?).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub number: u8,
    pub duration_seconds: u32,
    pub kind: SceneKind,
    pub image_prompt: String,
    pub narration: String,
    pub is_hook: bool,
    pub is_cta: bool,
}

impl Scene {
    pub fn new(kind: SceneKind, duration_seconds: u32, image_prompt: String, narration: String) -> Self {
        Self {
            number: kind.number(),
            duration_seconds,
            kind,
            image_prompt,
            narration,
            is_hook: kind == SceneKind::Hook,
            is_cta: kind == SceneKind::CallToAction,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub title: String,
    pub description: String,
    pub duration_seconds: u32,
    pub scenes: Vec<Scene>,
}

impl Script {
    pub const SCENE_COUNT: usize = 11;

    pub fn new(title: impl Into<String>, description: impl Into<String>, scenes: Vec<Scene>) -> Self {
        let duration_seconds = scenes.iter().map(|scene| scene.duration_seconds).sum();
        Self {
            title: title.into(),
            description: description.into(),
            duration_seconds,
            scenes,
        }
    }

    /// True when the scenes follow the fixed eleven-stage schedule.
    pub fn is_canonical(&self) -> bool {
        self.scenes.len() == Self::SCENE_COUNT
            && self
                .scenes
                .iter()
                .zip(SceneKind::ALL.iter())
                .enumerate()
                .all(|(index, (scene, kind))| {
                    scene.kind == *kind
                        && scene.number as usize == index + 1
                        && scene.is_hook == (*kind == SceneKind::Hook)
                        && scene.is_cta == (*kind == SceneKind::CallToAction)
                })
    }

    pub fn narration_text(&self) -> String {
        self.scenes
            .iter()
            .map(|scene| scene.narration.trim())
            .filter(|narration| !narration.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Projection consumed by media assembly. Durations and kinds are dropped.
    pub fn scene_map(&self) -> SceneMap {
        SceneMap {
            entries: self
                .scenes
                .iter()
                .map(|scene| {
                    (
                        format!("scene-{}", scene.number),
                        SceneAsset {
                            image_prompt: scene.image_prompt.clone(),
                            narration: scene.narration.clone(),
                        },
                    )
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneAsset {
    #[serde(rename = "image-prompt")]
    pub image_prompt: String,
    pub narration: String,
}

/// `scene-{n}` keyed assets, serialized as a JSON object in scene order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SceneMap {
    entries: Vec<(String, SceneAsset)>,
}

impl SceneMap {
    pub fn get(&self, key: &str) -> Option<&SceneAsset> {
        self.entries
            .iter()
            .find(|(entry_key, _)| entry_key == key)
            .map(|(_, asset)| asset)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for SceneMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, asset) in &self.entries {
            map.serialize_entry(key, asset)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScriptMetadata {
    pub duration: u32,
    pub video_type: String,
    pub language: String,
    pub category: String,
    pub is_dynamic: bool,
    pub ai_optimized: bool,
}

/// On-disk `script.json` layout handed to media assembly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScriptDocument {
    pub title: String,
    pub description: String,
    pub scene: SceneMap,
    pub metadata: ScriptMetadata,
}

impl ScriptDocument {
    pub const VIDEO_TYPE: &'static str = "viral-coding-longform";

    pub fn from_script(script: &Script, ai_optimized: bool) -> Self {
        Self {
            title: script.title.clone(),
            description: script.description.clone(),
            scene: script.scene_map(),
            metadata: ScriptMetadata {
                duration: script.duration_seconds,
                video_type: Self::VIDEO_TYPE.to_string(),
                language: "en".to_string(),
                category: "Technology".to_string(),
                is_dynamic: true,
                ai_optimized,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub title_score: u8,
    pub description_score: u8,
    pub tags_score: u8,
    pub total_score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoMetadata {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub score: ScoreBreakdown,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordMetrics {
    pub difficulty: String,
    pub trend: String,
    pub clicks: f32,
}

pub fn clamp_score(score: i64) -> u8 {
    score.clamp(0, 100) as u8
}

/// Truncates to at most `max` characters without splitting a code point.
pub fn clamp_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(kind: SceneKind) -> Scene {
        Scene::new(
            kind,
            kind.default_duration(),
            format!("prompt {}", kind.number()),
            format!("narration {}", kind.number()),
        )
    }

    #[test]
    fn test_scene_schedule() {
        let total: u32 = SceneKind::ALL.iter().map(|kind| kind.default_duration()).sum();
        assert_eq!(total, 660);
        assert_eq!(SceneKind::Hook.number(), 1);
        assert_eq!(SceneKind::CallToAction.number(), 11);
        assert_eq!(SceneKind::from_number(5), Some(SceneKind::LessonOne));
        assert_eq!(SceneKind::from_number(0), None);
        assert_eq!(SceneKind::from_number(12), None);
    }

    #[test]
    fn test_scene_flags() {
        assert!(scene(SceneKind::Hook).is_hook);
        assert!(!scene(SceneKind::Hook).is_cta);
        assert!(scene(SceneKind::CallToAction).is_cta);
        assert!(!scene(SceneKind::Results).is_hook);
    }

    #[test]
    fn test_script_scene_map_keeps_order() {
        let scenes = SceneKind::ALL.iter().map(|kind| scene(*kind)).collect();
        let script = Script::new("Title", "Description", scenes);
        assert!(script.is_canonical());
        assert_eq!(script.duration_seconds, 660);

        let map = script.scene_map();
        assert_eq!(map.len(), 11);
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys[0], "scene-1");
        assert_eq!(keys[9], "scene-10");
        assert_eq!(keys[10], "scene-11");
        assert_eq!(map.get("scene-3").unwrap().narration, "narration 3");

        let json = serde_json::to_string(&map).unwrap();
        let first = json.find("\"scene-1\"").unwrap();
        let second = json.find("\"scene-2\"").unwrap();
        let tenth = json.find("\"scene-10\"").unwrap();
        assert!(first < second && second < tenth);
        assert!(json.contains("\"image-prompt\":\"prompt 1\""));
    }

    #[test]
    fn test_non_canonical_script_detected() {
        let mut scenes: Vec<Scene> = SceneKind::ALL.iter().map(|kind| scene(*kind)).collect();
        scenes.swap(1, 2);
        assert!(!Script::new("t", "d", scenes.clone()).is_canonical());
        scenes.truncate(10);
        assert!(!Script::new("t", "d", scenes).is_canonical());
    }

    #[test]
    fn test_optimized_idea_clamps() {
        let long_title = "x".repeat(150);
        let idea = OptimizedIdea::new(&long_title, "hook", "rust", 140);
        assert_eq!(idea.title.chars().count(), OptimizedIdea::MAX_TITLE_CHARS);
        assert_eq!(idea.viral_score, 100);
        assert_eq!(OptimizedIdea::new("t", "h", "k", -3).viral_score, 0);
    }

    #[test]
    fn test_clamp_chars_respects_code_points() {
        assert_eq!(clamp_chars("héllo", 2), "hé");
        assert_eq!(clamp_chars("abc", 10), "abc");
    }

    #[test]
    fn test_trend_source_serialization() {
        let json = serde_json::to_string(&TrendSource::QaPlatform).unwrap();
        assert_eq!(json, "\"qa_platform\"");
        assert_eq!(TrendSource::LinkAggregator.to_string(), "HackerNews");
    }
}
