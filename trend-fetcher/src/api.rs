//! Wire shapes of the five public trend APIs and their conversion into
//! [`RawIdea`]. Only the fields the pipeline reads are declared; everything
//! else in the payloads is ignored.

use serde::{Deserialize, Serialize};
use trendcast_core::{RawIdea, TrendSource};

// GitHub search

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubSearchResponse {
    #[serde(default)]
    pub total_count: u64,
    pub items: Vec<GithubRepoData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubRepoData {
    pub name: String,
    pub html_url: String,
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
}

impl From<GithubRepoData> for RawIdea {
    fn from(repo: GithubRepoData) -> Self {
        let description = repo
            .description
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| repo.name.clone());
        Self {
            title: format!("{} - GitHub Trending", repo.name),
            source: TrendSource::CodeHost,
            keywords: repo
                .language
                .filter(|language| !language.is_empty())
                .unwrap_or_else(|| "Open Source".to_string()),
            description,
            url: repo.html_url,
            popularity: repo.stargazers_count,
        }
    }
}

// HackerNews

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HackerNewsItem {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub score: Option<u64>,
}

impl HackerNewsItem {
    /// Only titled stories become ideas; jobs, polls and comments are dropped.
    pub fn into_idea(self) -> Option<RawIdea> {
        if self.kind.as_deref() != Some("story") {
            return None;
        }
        let title = self.title?;
        Some(RawIdea {
            description: title.clone(),
            title,
            source: TrendSource::LinkAggregator,
            keywords: "Tech News".to_string(),
            url: self.url.unwrap_or_default(),
            popularity: self.score.unwrap_or(0),
        })
    }
}

// Dev.to

/// The list endpoint returns tags as an array, the single-article endpoint
/// as a comma separated string. Both are accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DevToTags {
    List(Vec<String>),
    Joined(String),
}

impl DevToTags {
    fn joined(&self) -> String {
        match self {
            DevToTags::List(tags) => tags.join(","),
            DevToTags::Joined(tags) => tags.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevToArticle {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub tag_list: Option<DevToTags>,
    #[serde(default)]
    pub public_reactions_count: u64,
}

impl From<DevToArticle> for RawIdea {
    fn from(article: DevToArticle) -> Self {
        let keywords = article
            .tag_list
            .map(|tags| tags.joined())
            .filter(|tags| !tags.is_empty())
            .unwrap_or_else(|| "coding".to_string());
        // Only a missing description falls back to the title.
        let description = article
            .description
            .unwrap_or_else(|| article.title.clone());
        Self {
            title: article.title,
            source: TrendSource::ArticlePlatform,
            keywords,
            description,
            url: article.url,
            popularity: article.public_reactions_count,
        }
    }
}

// Reddit

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListing<T> {
    pub kind: String,
    pub data: RedditListingData<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListingData<T> {
    pub children: Vec<RedditListingChild<T>>,
    pub after: Option<String>,
    pub before: Option<String>,
    pub dist: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListingChild<T> {
    pub kind: String,
    pub data: T,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditPostData {
    pub title: String,
    pub permalink: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub is_self: bool,
}

impl RedditPostData {
    pub fn is_linkable(&self) -> bool {
        self.is_self || !self.url.is_empty()
    }
}

impl From<RedditPostData> for RawIdea {
    fn from(post: RedditPostData) -> Self {
        Self {
            description: post.title.clone(),
            title: post.title,
            source: TrendSource::DiscussionForum,
            keywords: "Programming".to_string(),
            url: format!("https://reddit.com{}", post.permalink),
            popularity: post.score.max(0) as u64,
        }
    }
}

// Stack Exchange

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackExchangeTagsResponse {
    pub items: Vec<StackExchangeTag>,
    #[serde(default)]
    pub has_more: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackExchangeTag {
    pub name: String,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub has_synonyms: bool,
}

impl StackExchangeTag {
    pub const POPULAR_COUNT: u64 = 50_000;

    pub fn is_popular(&self) -> bool {
        self.has_synonyms || self.count > Self::POPULAR_COUNT
    }
}

impl From<StackExchangeTag> for RawIdea {
    fn from(tag: StackExchangeTag) -> Self {
        Self {
            title: format!("Mastering {} on Stack Overflow", tag.name),
            source: TrendSource::QaPlatform,
            description: format!("{} questions about {}", tag.count, tag.name),
            url: format!("https://stackoverflow.com/questions/tagged/{}", tag.name),
            keywords: tag.name,
            popularity: tag.count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_github_repo_conversion() {
        let repo = GithubRepoData {
            name: "ripgrep".to_string(),
            html_url: "https://github.com/BurntSushi/ripgrep".to_string(),
            description: None,
            language: None,
            stargazers_count: 42_000,
        };

        let idea: RawIdea = repo.into();
        assert_eq!(idea.title, "ripgrep - GitHub Trending");
        assert_eq!(idea.keywords, "Open Source");
        assert_eq!(idea.description, "ripgrep");
        assert_eq!(idea.popularity, 42_000);
        assert_eq!(idea.source, TrendSource::CodeHost);
    }

    #[test]
    fn test_hackernews_item_filtering() {
        let story = HackerNewsItem {
            id: 1,
            kind: Some("story".to_string()),
            title: Some("Show HN: A tiny database".to_string()),
            url: None,
            score: Some(120),
        };
        let idea = story.into_idea().unwrap();
        assert_eq!(idea.keywords, "Tech News");
        assert_eq!(idea.description, idea.title);
        assert_eq!(idea.url, "");
        assert_eq!(idea.popularity, 120);

        let job = HackerNewsItem {
            id: 2,
            kind: Some("job".to_string()),
            title: Some("Hiring".to_string()),
            url: None,
            score: None,
        };
        assert!(job.into_idea().is_none());

        let untitled = HackerNewsItem {
            id: 3,
            kind: Some("story".to_string()),
            title: None,
            url: None,
            score: None,
        };
        assert!(untitled.into_idea().is_none());
    }

    #[test]
    fn test_devto_tag_shapes() {
        let listed: DevToArticle = serde_json::from_value(serde_json::json!({
            "title": "Rust tips",
            "url": "https://dev.to/a/rust-tips",
            "description": "",
            "tag_list": ["rust", "webdev"],
            "public_reactions_count": 9
        }))
        .unwrap();
        let idea: RawIdea = listed.into();
        assert_eq!(idea.keywords, "rust,webdev");
        assert_eq!(idea.description, "");

        let joined: DevToArticle = serde_json::from_value(serde_json::json!({
            "title": "Go tips",
            "url": "https://dev.to/a/go-tips",
            "tag_list": "go, backend"
        }))
        .unwrap();
        assert_eq!(RawIdea::from(joined).keywords, "go, backend");

        let untagged: DevToArticle = serde_json::from_value(serde_json::json!({
            "title": "Misc",
            "url": "https://dev.to/a/misc"
        }))
        .unwrap();
        let idea = RawIdea::from(untagged);
        assert_eq!(idea.keywords, "coding");
        assert_eq!(idea.description, "Misc");
        assert_eq!(idea.popularity, 0);
    }

    #[test]
    fn test_reddit_post_conversion() {
        let listing: RedditListing<RedditPostData> = serde_json::from_value(serde_json::json!({
            "kind": "Listing",
            "data": {
                "after": "t3_abc",
                "before": null,
                "dist": 1,
                "children": [{
                    "kind": "t3",
                    "data": {
                        "title": "Why we rewrote it",
                        "permalink": "/r/programming/comments/abc/why/",
                        "url": "https://example.com/why",
                        "score": -4,
                        "is_self": false
                    }
                }]
            }
        }))
        .unwrap();

        let post = listing.data.children[0].data.clone();
        assert!(post.is_linkable());
        let idea: RawIdea = post.into();
        assert_eq!(idea.url, "https://reddit.com/r/programming/comments/abc/why/");
        assert_eq!(idea.keywords, "Programming");
        assert_eq!(idea.popularity, 0);
    }

    #[test]
    fn test_stackexchange_tag_conversion() {
        let tag = StackExchangeTag {
            name: "rust".to_string(),
            count: 40_000,
            has_synonyms: false,
        };
        assert!(!tag.is_popular());

        let popular = StackExchangeTag {
            name: "python".to_string(),
            count: 2_000_000,
            has_synonyms: false,
        };
        assert!(popular.is_popular());
        let idea: RawIdea = popular.into();
        assert_eq!(idea.title, "Mastering python on Stack Overflow");
        assert_eq!(idea.description, "2000000 questions about python");
        assert_eq!(idea.url, "https://stackoverflow.com/questions/tagged/python");
        assert_eq!(idea.keywords, "python");
    }
}
