pub mod keywords;

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use tracing::debug;
use trendcast_core::{
    clamp_chars, KeywordMetrics, OptimizedIdea, ScoreBreakdown, Script, SeoMetadata,
};

use keywords::{
    category_tags, engagement_triggers_in, lookup_keyword, title_power_words,
    viral_keyword_names, CTA_HOOKS, NUMERIC_HOOKS,
};

pub const MAX_TITLE_CHARS: usize = 80;
pub const MAX_DESCRIPTION_CHARS: usize = 5000;
pub const MAX_TAGS: usize = 30;
pub const DEFAULT_CATEGORY: &str = "Education";

const SHORT_TITLE_CHARS: usize = 30;
const MIN_BODY_CHARS: usize = 20;
const MAX_KEYWORD_PREFIX_CHARS: usize = 30;
const EXPLAINED_SUFFIX: &str = " | Explained";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoType {
    #[default]
    General,
    Ranking,
    Tutorial,
    Controversy,
    Experiment,
}

/// Decorations added around the input title. Each is added at most
/// once; the body is truncated to whatever room they leave.
#[derive(Debug, Default)]
struct TitleParts {
    lead: Option<&'static str>,
    power: Option<String>,
    keyword: Option<String>,
    number_prefix: Option<String>,
    number_suffix: Option<String>,
    explained: bool,
    /// Uppercase every piece before measuring it.
    upper: bool,
}

impl TitleParts {
    fn render(&self, part: &str) -> String {
        if self.upper {
            part.to_uppercase()
        } else {
            part.to_string()
        }
    }

    fn assemble(&self, body: &str) -> String {
        let number_prefix = self.number_prefix.as_deref().map(|part| self.render(part));
        let keyword = self.keyword.as_deref().map(|part| self.render(part));
        let power = self.power.as_deref().map(|part| self.render(part));
        let mut lead = self.lead.map(|part| self.render(part));
        let mut explained = self.explained.then(|| self.render(EXPLAINED_SUFFIX));
        let number_suffix = self.number_suffix.as_deref().map(|part| self.render(part));

        let fixed_len = |lead: &Option<String>, explained: &Option<String>| {
            [&number_prefix, &keyword, &power, lead, explained, &number_suffix]
                .into_iter()
                .flatten()
                .map(|part| part.chars().count())
                .sum::<usize>()
        };

        // Cosmetic parts go first when the required ones crowd out the body.
        if fixed_len(&lead, &explained) > MAX_TITLE_CHARS - MIN_BODY_CHARS {
            explained = None;
        }
        if fixed_len(&lead, &explained) > MAX_TITLE_CHARS - MIN_BODY_CHARS {
            lead = None;
        }

        let budget = MAX_TITLE_CHARS.saturating_sub(fixed_len(&lead, &explained));
        let body = clamp_chars(&self.render(body), budget);

        let mut title = String::new();
        for part in [
            number_prefix.as_deref(),
            keyword.as_deref(),
            power.as_deref(),
            lead.as_deref(),
            Some(body.trim_end()),
            explained.as_deref(),
            number_suffix.as_deref(),
        ]
        .into_iter()
        .flatten()
        {
            title.push_str(part);
        }
        title.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

fn title_case(phrase: &str) -> String {
    phrase
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn has_digit(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
}

/// Fixed heuristics for YouTube titles, descriptions and tags.
#[derive(Debug, Clone)]
pub struct MetadataOptimizer {
    year: i32,
}

impl Default for MetadataOptimizer {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataOptimizer {
    pub fn new() -> Self {
        Self::with_year(chrono::Local::now().year())
    }

    pub fn with_year(year: i32) -> Self {
        Self { year }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Output is at most 80 characters and, unless the input already had
    /// them, contains a power word and a digit. The keyword is prefixed
    /// when missing and no longer than 30 characters.
    pub fn optimize_title(
        &self,
        base_title: &str,
        keyword: Option<&str>,
        video_type: VideoType,
        rng: &mut fastrand::Rng,
    ) -> String {
        let body = base_title.trim();
        let keyword = keyword.map(str::trim).filter(|keyword| !keyword.is_empty());

        let mut parts = TitleParts {
            explained: !body.contains('|'),
            upper: video_type == VideoType::Controversy,
            ..TitleParts::default()
        };
        if body.chars().count() < SHORT_TITLE_CHARS {
            parts.lead = Some(if video_type == VideoType::Tutorial {
                "Why "
            } else {
                "The Ultimate "
            });
        }

        // Each pass adds at most one missing element of each kind, so this
        // settles within four passes.
        loop {
            let candidate = parts.assemble(body);
            let lower = candidate.to_lowercase();
            let mut changed = false;

            if parts.power.is_none() && !title_power_words().iter().any(|word| lower.contains(word)) {
                let word = title_power_words()[rng.usize(..title_power_words().len())];
                parts.power = Some(format!("{} ", title_case(word)));
                changed = true;
            }

            if let Some(keyword) = keyword.filter(|k| k.chars().count() <= MAX_KEYWORD_PREFIX_CHARS) {
                if parts.keyword.is_none() && !lower.contains(&keyword.to_lowercase()) {
                    parts.keyword = Some(format!("{}: ", keyword));
                    changed = true;
                }
            }

            if parts.number_prefix.is_none() && parts.number_suffix.is_none() && !has_digit(&candidate) {
                let count = NUMERIC_HOOKS[rng.usize(..NUMERIC_HOOKS.len())];
                if video_type == VideoType::Ranking {
                    parts.number_prefix = Some(format!("Top {}: ", count));
                } else {
                    parts.number_suffix = Some(format!(" ({} Tips)", count));
                }
                changed = true;
            }

            if !changed {
                break;
            }
        }

        let title = parts.assemble(body);
        debug!("Optimized title '{}' -> '{}'", base_title, title);
        title
    }

    pub fn generate_description(&self, title: &str, script_text: &str, keywords: &[String]) -> String {
        let keywords: Vec<&str> = keywords
            .iter()
            .map(|keyword| keyword.trim())
            .filter(|keyword| !keyword.is_empty())
            .collect();
        let topic = keywords.first().copied().unwrap_or("this topic");

        let mut description = format!(
            "📚 {title}\n\n\
             Learn everything you need to know about {topic} in this comprehensive guide.\n\n\
             ⏲️ TIMESTAMPS:\n\
             0:00 - Intro\n\
             1:00 - Key Concepts\n\
             3:00 - Practical Examples\n\
             5:00 - Advanced Tips\n\
             7:00 - Conclusion\n\n\
             🎯 WHAT YOU'LL LEARN:\n"
        );

        for point in script_text
            .split('.')
            .take(5)
            .map(str::trim)
            .filter(|sentence| sentence.chars().count() > 20)
        {
            description.push_str(&format!("✓ {}\n", point));
        }

        let listed: Vec<&str> = keywords.iter().copied().take(8).collect();
        description.push_str(&format!("\n🔍 KEYWORDS: {}\n\n", listed.join(", ")));

        description.push_str(
            "👍 HELP ME OUT:\n\
             - Like this video\n\
             - Subscribe to the channel\n\
             - Turn on notifications\n\
             - Drop a comment below\n\n\
             📱 CONNECT:\n\
             - Twitter: [Link]\n\
             - GitHub: [Link]\n\
             - Discord: [Link]\n\n\
             ⚠️ DISCLAIMER:\n\
             This video is for educational purposes only.\n",
        );

        let hashtags: Vec<String> = keywords
            .iter()
            .take(5)
            .map(|keyword| format!("#{}", keyword.split_whitespace().collect::<String>()))
            .collect();
        if !hashtags.is_empty() {
            description.push('\n');
            description.push_str(&hashtags.join(" "));
        }

        clamp_chars(&description, MAX_DESCRIPTION_CHARS)
    }

    /// Unique (on the trimmed, lowercased form), non-empty, at most 30, in
    /// insertion order.
    pub fn generate_tags(&self, _title: &str, keywords: &[String], category: &str) -> Vec<String> {
        let keywords: Vec<String> = keywords
            .iter()
            .map(|keyword| keyword.trim().to_lowercase())
            .filter(|keyword| !keyword.is_empty())
            .collect();

        let mut candidates: Vec<String> = keywords.iter().take(5).cloned().collect();
        for keyword in keywords.iter().take(3) {
            candidates.push(format!("{} tutorial", keyword));
            candidates.push(format!("learn {}", keyword));
        }
        candidates.extend(category_tags(category).iter().map(|tag| tag.to_string()));
        candidates.push(self.year.to_string());
        candidates.push(category.to_lowercase());
        candidates.push("explained".to_string());
        candidates.push("for beginners".to_string());

        let mut tags: Vec<String> = Vec::with_capacity(MAX_TAGS);
        for candidate in candidates {
            let tag = candidate.trim().to_lowercase();
            if tag.is_empty() || tags.contains(&tag) {
                continue;
            }
            tags.push(tag);
            if tags.len() == MAX_TAGS {
                break;
            }
        }
        tags
    }

    pub fn score(&self, title: &str, description: &str, tags: &[String]) -> ScoreBreakdown {
        let title_lower = title.to_lowercase();
        let mut title_score: u32 = 0;
        match title.chars().count() {
            40..=60 => title_score += 25,
            30..=100 => title_score += 15,
            _ => {}
        }
        if title_power_words().iter().any(|word| title_lower.contains(word)) {
            title_score += 20;
        }
        if viral_keyword_names().any(|keyword| title_lower.contains(keyword)) {
            title_score += 25;
        }
        if has_digit(title) {
            title_score += 15;
        }

        let description_lower = description.to_lowercase();
        let mut description_score: u32 = 0;
        if (200..=MAX_DESCRIPTION_CHARS).contains(&description.chars().count()) {
            description_score += 25;
        }
        let keywords_found = viral_keyword_names()
            .filter(|keyword| description_lower.contains(keyword))
            .count() as u32;
        description_score += (keywords_found * 10).min(30);
        if description.contains("http") || CTA_HOOKS.iter().any(|cta| description.contains(cta)) {
            description_score += 20;
        }

        let tags_score: u32 = match tags.len() {
            10..=30 => 30,
            5..=9 => 20,
            count if count > 30 => 20,
            _ => 0,
        };

        let title_score = title_score.min(100);
        let description_score = description_score.min(100);
        let tags_score = tags_score.min(100);
        ScoreBreakdown {
            title_score: title_score as u8,
            description_score: description_score as u8,
            tags_score: tags_score as u8,
            total_score: ((title_score + description_score + tags_score) / 3) as u8,
        }
    }

    pub fn suggest_improvements(&self, title: &str, description: &str, tags: &[String]) -> Vec<String> {
        let mut suggestions = Vec::new();
        let title_lower = title.to_lowercase();

        if title.chars().count() < 30 {
            suggestions.push("✓ Extend title to 40-60 characters for better CTR".to_string());
        }
        if !title_power_words().iter().any(|word| title_lower.contains(word)) {
            suggestions
                .push("✓ Add a power word to the title (e.g., 'Why', 'Stop', 'Avoid')".to_string());
        }
        if !has_digit(title) {
            suggestions.push("✓ Add numbers to title (e.g., 'Top 10', 'In 30 Days')".to_string());
        }
        if engagement_triggers_in(title).is_empty() {
            suggestions.push(
                "✓ Consider an engagement trigger (e.g., 'WARNING', 'NOBODY TALKS ABOUT')"
                    .to_string(),
            );
        }
        if description.chars().count() < 200 {
            suggestions.push("✓ Expand description to 200+ characters for better SEO".to_string());
        }
        if !description.contains("http") {
            suggestions
                .push("✓ Add relevant links in description (GitHub, website, etc.)".to_string());
        }
        if tags.len() < 10 {
            suggestions.push(format!(
                "✓ Add more tags (currently {}, recommend 10-30)",
                tags.len()
            ));
        }
        suggestions
    }

    pub fn keyword_metrics(&self, keyword: &str) -> KeywordMetrics {
        lookup_keyword(keyword).unwrap_or_else(|| KeywordMetrics {
            difficulty: "unknown".to_string(),
            trend: "unknown".to_string(),
            clicks: 5.0,
        })
    }

    /// Full metadata for one idea and its script.
    pub fn optimize_metadata(
        &self,
        idea: &OptimizedIdea,
        script: &Script,
        rng: &mut fastrand::Rng,
    ) -> SeoMetadata {
        let title = self.optimize_title(&idea.title, Some(&idea.keyword), VideoType::Ranking, rng);

        let script_text = script.narration_text();
        let script_text = if script_text.is_empty() {
            idea.hook.clone()
        } else {
            script_text
        };

        let mut keywords = vec![idea.keyword.clone()];
        keywords.extend(idea.viral_elements.iter().cloned());

        let description = self.generate_description(&title, &script_text, &keywords);
        let tags = self.generate_tags(&title, &keywords, DEFAULT_CATEGORY);
        let score = self.score(&title, &description, &tags);
        let suggestions = self.suggest_improvements(&title, &description, &tags);

        SeoMetadata {
            title,
            description,
            tags,
            score,
            suggestions,
        }
    }
}
