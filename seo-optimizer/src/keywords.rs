//! Static dictionaries behind the metadata heuristics.

use trendcast_core::KeywordMetrics;

/// High-converting title words. Only the first [`TITLE_POWER_WORDS`] count
/// toward the title score and are used as prefixes.
pub const POWER_WORDS: [&str; 28] = [
    "incredible",
    "amazing",
    "shocking",
    "unbelievable",
    "mind-blowing",
    "the ultimate",
    "secrets",
    "hidden",
    "finally revealed",
    "exposed",
    "the truth about",
    "why",
    "how to",
    "avoid",
    "stop",
    "never",
    "biggest",
    "best",
    "worst",
    "crucial",
    "critical",
    "essential",
    "proven",
    "official",
    "real",
    "honest",
    "brutal",
    "raw",
];

pub const TITLE_POWER_WORDS: usize = 10;

/// `(keyword, difficulty, trend, relative clicks)`
pub const VIRAL_KEYWORDS: [(&str, &str, &str, f32); 15] = [
    ("ai", "high", "rising", 8.5),
    ("python", "medium", "stable", 7.2),
    ("javascript", "medium", "stable", 6.8),
    ("react", "medium", "stable", 6.5),
    ("chatgpt", "low", "rising", 9.0),
    ("machine learning", "high", "rising", 8.2),
    ("web development", "low", "stable", 6.0),
    ("devops", "high", "rising", 7.8),
    ("kubernetes", "high", "rising", 7.5),
    ("rust", "high", "rising", 7.9),
    ("golang", "medium", "rising", 7.3),
    ("typescript", "medium", "rising", 7.1),
    ("nextjs", "medium", "rising", 6.9),
    ("api", "low", "stable", 5.8),
    ("database", "medium", "stable", 6.2),
];

pub const ENGAGEMENT_TRIGGERS: [&str; 13] = [
    "TOP 10",
    "STOP MAKING",
    "WHY I",
    "I BUILT",
    "NOBODY TALKS ABOUT",
    "THE BIGGEST MISTAKE",
    "RANKING",
    "FINALLY REVEALED",
    "THIS CHANGED EVERYTHING",
    "WARNING",
    "EXPOSED",
    "WATCH THIS",
    "PROOF THAT",
];

pub const CTA_HOOKS: [&str; 6] = [
    "If you find this helpful, smash the like button and subscribe",
    "Make sure to watch till the end for the bonus tip",
    "Drop a comment telling me what you think",
    "Subscribe to the channel for more advanced content",
    "Follow for weekly tutorials and coding tips",
    "Join our Discord community for daily challenges",
];

/// Counts used by the numeric title hooks ("Top 5: ...", "(7 Tips)").
pub const NUMERIC_HOOKS: [u8; 4] = [3, 5, 7, 10];

pub fn category_tags(category: &str) -> &'static [&'static str] {
    match category {
        "Education" => &["tutorial", "learn", "how to", "guide", "beginner"],
        "Technology" => &["tech", "software", "programming", "coding", "development"],
        "Entertainment" => &["viral", "trending", "reaction", "funny", "entertainment"],
        _ => &[],
    }
}

pub fn title_power_words() -> &'static [&'static str] {
    &POWER_WORDS[..TITLE_POWER_WORDS]
}

pub fn lookup_keyword(keyword: &str) -> Option<KeywordMetrics> {
    let keyword = keyword.trim().to_lowercase();
    VIRAL_KEYWORDS
        .iter()
        .find(|(name, ..)| *name == keyword)
        .map(|(_, difficulty, trend, clicks)| KeywordMetrics {
            difficulty: difficulty.to_string(),
            trend: trend.to_string(),
            clicks: *clicks,
        })
}

pub fn viral_keyword_names() -> impl Iterator<Item = &'static str> {
    VIRAL_KEYWORDS.iter().map(|(name, ..)| *name)
}

/// Uppercase phrases that mark a title as engagement bait.
pub fn engagement_triggers_in(title: &str) -> Vec<&'static str> {
    let upper = title.to_uppercase();
    ENGAGEMENT_TRIGGERS
        .iter()
        .copied()
        .filter(|trigger| upper.contains(trigger))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let metrics = lookup_keyword(" Rust ").unwrap();
        assert_eq!(metrics.difficulty, "high");
        assert_eq!(metrics.trend, "rising");
        assert!((metrics.clicks - 7.9).abs() < f32::EPSILON);
        assert!(lookup_keyword("cobol").is_none());
    }

    #[test]
    fn test_category_tags() {
        assert_eq!(category_tags("Technology").len(), 5);
        assert!(category_tags("Cooking").is_empty());
    }

    #[test]
    fn test_engagement_triggers() {
        assert_eq!(
            engagement_triggers_in("Top 10 things nobody talks about"),
            vec!["TOP 10", "NOBODY TALKS ABOUT"]
        );
    }

    #[test]
    fn test_title_power_words() {
        assert_eq!(title_power_words().len(), 10);
        assert_eq!(title_power_words()[9], "exposed");
    }
}
