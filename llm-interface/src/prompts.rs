//! Prompt texts for the two model-assisted stages.

use trendcast_core::{OptimizedIdea, RawIdea};

pub const IDEA_MAX_TOKENS: u32 = 300;
pub const SCRIPT_MAX_TOKENS: u32 = 4500;

pub fn idea_prompt(raw: &RawIdea) -> String {
    format!(
        r#"You are a YouTube video strategist for coding/tech content.
Optimize this web-sourced idea into a viral video concept:

Source: {source}
Title: {title}
Description: {description}
Keywords: {keywords}

Return ONLY a JSON response (no markdown, no extra text) with:
{{
    "title": "Compelling 50-60 char video title",
    "hook": "Attention-grabbing opening hook (100 chars max)",
    "keyword": "Primary keyword for SEO",
    "viral_elements": ["element1", "element2", "element3"],
    "viral_score": <85-99>
}}"#,
        source = raw.source.label(),
        title = raw.title,
        description = raw.description,
        keywords = raw.keywords,
    )
}

pub fn script_prompt(idea: &OptimizedIdea, category: &str) -> String {
    let keyword = &idea.keyword;
    format!(
        r#"You are an EXPERT YouTube video scriptwriter for VIRAL long-form coding/tech content (10-12 minutes).
Create a COMPLETELY UNIQUE script tailored to {keyword} and the latest trends.

TOPIC: {title}
KEYWORD: {keyword}
CATEGORY: {category}
VIRAL SCORE: {score}/100
OPENING HOOK: {hook}

MANDATORY STRUCTURE (exactly 11 scenes, in this order):
1. HOOK (30 sec): Shocking stat, contrarian take, or curiosity gap about {keyword}
2. PATTERN INTERRUPT (45 sec): Unexpected twist that reframes the narrative
3. PAIN POINT (90 sec): Relatable developer struggle with {keyword}
4. SOLUTION TEASER (60 sec): Hint at what's coming, build suspense
5. MICRO-LESSON 1 (90 sec): Deep dive into the first concept with real-world value
6. MICRO-LESSON 2 (90 sec): Build complexity, include a company example
7. MISTAKES EXPOSE (75 sec): Common errors and their costly consequences
8. IMPLEMENTATION (90 sec): Step-by-step but engaging
9. RESULTS (75 sec): Impressive outcomes and transformation
10. ADVANCED INSIGHTS (60 sec): Premium technique most devs don't know
11. CTA (30 sec): Subscribe, community, next video teaser

IMAGE PROMPTS: ultra-specific, cinematic, professional production quality.
NARRATION: conversational, pattern interrupts, micro-stories, emotional hooks.

Return ONLY valid JSON (no markdown, no extra text):
{{
    "title": "{title}",
    "description": "SEO description mentioning {keyword}",
    "scenes": [
        {{"number": 1, "duration": 30, "type": "hook", "image_prompt": "ULTRA-SPECIFIC visual", "narration": "Shocking hook"}},
        ... (10 more scenes)
    ]
}}"#,
        keyword = keyword,
        title = idea.title,
        category = category,
        score = idea.viral_score,
        hook = idea.hook,
    )
}
