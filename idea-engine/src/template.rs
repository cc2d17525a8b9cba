//! Deterministic eleven-scene script used whenever the model path is off
//! or fails. Pure and total: every idea yields a canonical script.

use trendcast_core::{OptimizedIdea, Scene, SceneKind, Script};

pub const DEFAULT_CATEGORY: &str = "Tech";

pub fn category_of(idea: &OptimizedIdea) -> &str {
    idea.category
        .as_deref()
        .map(str::trim)
        .filter(|category| !category.is_empty())
        .unwrap_or(DEFAULT_CATEGORY)
}

pub fn hook_of(idea: &OptimizedIdea) -> String {
    if idea.hook.trim().is_empty() {
        format!("What if {} is about to change everything?", idea.keyword)
    } else {
        idea.hook.clone()
    }
}

pub fn template_description(idea: &OptimizedIdea) -> String {
    format!(
        "Master {} with this comprehensive guide. Learn fundamentals, real-world applications, \
         proven patterns, and avoid costly mistakes. Perfect for {} developers.",
        idea.keyword,
        category_of(idea)
    )
}

/// Image prompt of the template scene at `kind`, used to fill gaps in
/// model-written scenes.
pub fn template_image_prompt(kind: SceneKind, idea: &OptimizedIdea) -> String {
    let keyword = &idea.keyword;
    match kind {
        SceneKind::Hook => format!(
            "Cinematic YouTube thumbnail for {}: dynamic text overlay, neon accent colors, tech \
             aesthetic, dark professional background, lens flare, 4K quality, high production",
            idea.title
        ),
        SceneKind::PatternInterrupt => format!(
            "Visual contradiction about {}: unexpected twist, cinematic lighting, dark moody \
             aesthetic with accent colors, professional production",
            keyword
        ),
        SceneKind::PainPoint => format!(
            "Developer struggling with {}: frustrated in professional workspace, multiple \
             monitors, error messages visible, dramatic lighting, authentic struggle",
            keyword
        ),
        SceneKind::SolutionTeaser => "Revelation moment: light bulb or insight visualization, \
             glowing elements emerging from darkness, mysterious professional aesthetic, high \
             production"
            .to_string(),
        SceneKind::LessonOne => format!(
            "Technical visualization of {} concept: abstract professional, data flows, code-like \
             elements, digital transformation, modern UI principles, cinematic tech",
            keyword
        ),
        SceneKind::LessonTwo => format!(
            "Real-world {} in production: metrics dashboard, success indicators, performance \
             graphs, company implementation, professional achievement aesthetic",
            keyword
        ),
        SceneKind::MistakeExpose => format!(
            "Before/after comparison with {}: wrong approach vs right approach split screen, \
             chaos vs success, dramatic contrast, professional comparison",
            keyword
        ),
        SceneKind::Implementation => format!(
            "Step-by-step {} implementation: clean code editor interface, highlighted sections, \
             professional annotations, visual step markers, teaching aesthetic",
            keyword
        ),
        SceneKind::Results => format!(
            "Impressive {} results: project success, performance metrics, exponential growth \
             graphs, celebration energy, professional achievement, success visualization",
            keyword
        ),
        SceneKind::AdvancedInsight => format!(
            "Advanced {} strategies: professional architecture diagrams, elegant solutions, \
             high-level thinking, professional aesthetic, future-focused",
            keyword
        ),
        SceneKind::CallToAction => "Professional YouTube end card: animated subscribe button, \
             community links, next video teased, engagement-focused design, brand aesthetic"
            .to_string(),
    }
}

fn template_narration(kind: SceneKind, idea: &OptimizedIdea) -> String {
    let keyword = &idea.keyword;
    match kind {
        SceneKind::Hook => format!("Wait... {}", hook_of(idea)),
        SceneKind::PatternInterrupt => format!(
            "But that's not the whole story. Here's what {} developers miss about {}.",
            category_of(idea),
            keyword
        ),
        SceneKind::PainPoint => format!(
            "I spent years getting this wrong. Every attempt to implement {} failed. The root \
             cause? Most devs don't understand the underlying principle. It costs months of \
             wasted development.",
            keyword
        ),
        SceneKind::SolutionTeaser => format!(
            "Then I discovered the pattern. It's what every successful {} implementation \
             shares. Once you see it, everything clicks.",
            keyword
        ),
        SceneKind::LessonOne => format!(
            "Here's the foundation: {} is essentially about [core principle]. Think of it like \
             [analogy]. The key insight is efficiency. Most implementations fail because they \
             [common mistake], but the winners do [solution].",
            keyword
        ),
        SceneKind::LessonTwo => format!(
            "Here's where it gets insane. Google, Netflix, and Amazon all use {} because of one \
             specific advantage: performance at scale. They saw 300% improvements. And here's \
             why that happens...",
            keyword
        ),
        SceneKind::MistakeExpose => "The biggest mistake? Trying to [common mistake] without \
             understanding [prerequisite]. I see this constantly. It costs companies thousands. \
             The right way is [correct approach], and the results speak for themselves."
            .to_string(),
        SceneKind::Implementation => "The implementation pattern is straightforward: first do \
             [step]. Then [step]. Finally [step]. Each step matters because of [reason]. I've \
             proven this works across hundreds of projects."
            .to_string(),
        SceneKind::Results => "This is what becomes possible: dramatic performance \
             improvements, maintainable code, faster development. The transformation is real. \
             Before wrapping up, here are the pitfalls to avoid..."
            .to_string(),
        SceneKind::AdvancedInsight => format!(
            "For those ready to go deeper: there's an advanced technique most devs never \
             discover. It takes {} to the next level. Once you know it, you'll see opportunities \
             everywhere.",
            keyword
        ),
        SceneKind::CallToAction => format!(
            "If this helped you master {}, please like, subscribe, and hit notifications. Join \
             our Discord. Comment: what's your biggest {} challenge? Check out the advanced \
             tutorial next. See you in the next video.",
            keyword, keyword
        ),
    }
}

pub fn template_script(idea: &OptimizedIdea) -> Script {
    let scenes = SceneKind::ALL
        .iter()
        .map(|kind| {
            Scene::new(
                *kind,
                kind.default_duration(),
                template_image_prompt(*kind, idea),
                template_narration(*kind, idea),
            )
        })
        .collect();

    Script::new(idea.title.clone(), template_description(idea), scenes)
}
