use crate::api::{
    DevToArticle, GithubSearchResponse, HackerNewsItem, RedditListing, RedditPostData,
    StackExchangeTagsResponse,
};
use crate::report::{FetchSummary, SourceReport};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use trendcast_core::{AppConfig, CoreError, ErrorExt, RawIdea, TrendSource, TrendSourceError};

const GITHUB_API_BASE: &str = "https://api.github.com";
const HACKERNEWS_API_BASE: &str = "https://hacker-news.firebaseio.com";
const DEVTO_API_BASE: &str = "https://dev.to";
const REDDIT_API_BASE: &str = "https://www.reddit.com";
const STACKEXCHANGE_API_BASE: &str = "https://api.stackexchange.com";

/// Records kept per source after normalisation.
pub const MAX_IDEAS_PER_SOURCE: usize = 8;
const HACKERNEWS_ID_WINDOW: usize = 20;

const GITHUB_QUERY: &str =
    "language:python OR language:javascript OR language:rust OR language:go sort:stars";
const DEVTO_TAGS: &str = "coding,javascript,python,webdev,productivity,tutorial";

/// Anything that can produce the pool of raw ideas for one generation pass.
pub trait TrendFeed {
    async fn fetch_all(&self) -> Vec<RawIdea>;
}

impl<T: TrendFeed> TrendFeed for &T {
    async fn fetch_all(&self) -> Vec<RawIdea> {
        (**self).fetch_all().await
    }
}

#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub github_base: String,
    pub hackernews_base: String,
    pub devto_base: String,
    pub reddit_base: String,
    pub stackexchange_base: String,
    pub user_agent: String,
    pub request_timeout: Duration,
    pub item_timeout: Duration,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            github_base: GITHUB_API_BASE.to_string(),
            hackernews_base: HACKERNEWS_API_BASE.to_string(),
            devto_base: DEVTO_API_BASE.to_string(),
            reddit_base: REDDIT_API_BASE.to_string(),
            stackexchange_base: STACKEXCHANGE_API_BASE.to_string(),
            user_agent: trendcast_core::DEFAULT_USER_AGENT.to_string(),
            request_timeout: Duration::from_secs(10),
            item_timeout: Duration::from_secs(5),
        }
    }
}

impl FetcherConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            item_timeout: Duration::from_secs(config.item_timeout_secs),
            ..Self::default()
        }
    }

    /// Points every source at the same host, e.g. a local mock server.
    pub fn with_base_url(mut self, base: &str) -> Self {
        let base = base.trim_end_matches('/').to_string();
        self.github_base = base.clone();
        self.hackernews_base = base.clone();
        self.devto_base = base.clone();
        self.reddit_base = base.clone();
        self.stackexchange_base = base;
        self
    }
}

/// Sequential client over the five public trend sources. A failing source
/// contributes nothing; the pass itself never fails.
#[derive(Debug)]
pub struct TrendFetcher {
    http_client: Client,
    config: FetcherConfig,
}

impl TrendFetcher {
    pub fn new(config: FetcherConfig) -> Result<Self, CoreError> {
        let http_client = Client::builder().user_agent(&config.user_agent).build()?;
        Ok(Self {
            http_client,
            config,
        })
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    pub async fn fetch_all_with_report(&self) -> (Vec<RawIdea>, Vec<SourceReport>) {
        let mut ideas = Vec::new();
        let mut reports = Vec::with_capacity(TrendSource::ALL.len());

        for source in TrendSource::ALL {
            let start_time = Instant::now();
            let (count, error_code) = match self.fetch_source(source).await {
                Ok(batch) => {
                    debug!("{} returned {} ideas", source, batch.len());
                    let count = batch.len();
                    ideas.extend(batch);
                    (count, None)
                }
                Err(e) => {
                    e.log_warn();
                    (0, Some(e.error_code().to_string()))
                }
            };
            reports.push(SourceReport {
                source,
                ideas: count,
                elapsed: start_time.elapsed(),
                error_code,
            });
        }

        let summary = FetchSummary::from_reports(&reports);
        info!(
            "Found {} trending topics from {} sources ({} failed)",
            summary.total_ideas, summary.sources_responding, summary.sources_failed
        );
        (ideas, reports)
    }

    pub async fn fetch_source(&self, source: TrendSource) -> Result<Vec<RawIdea>, TrendSourceError> {
        match source {
            TrendSource::CodeHost => self.fetch_github_trends().await,
            TrendSource::LinkAggregator => self.fetch_hackernews_trends().await,
            TrendSource::ArticlePlatform => self.fetch_devto_trends().await,
            TrendSource::DiscussionForum => self.fetch_reddit_trends().await,
            TrendSource::QaPlatform => self.fetch_stackoverflow_trends().await,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        origin: TrendSource,
        url: &str,
        query: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<T, TrendSourceError> {
        debug!("Requesting {} from {}", url, origin);
        let response = self
            .http_client
            .get(url)
            .query(query)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TrendSourceError::RequestTimeout { origin }
                } else {
                    TrendSourceError::RequestFailed {
                        origin,
                        reason: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TrendSourceError::Unavailable {
                origin,
                status_code: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_timeout() {
                TrendSourceError::RequestTimeout { origin }
            } else {
                TrendSourceError::InvalidResponse {
                    origin,
                    details: e.to_string(),
                }
            }
        })
    }

    async fn fetch_github_trends(&self) -> Result<Vec<RawIdea>, TrendSourceError> {
        let url = format!("{}/search/repositories", self.config.github_base);
        let response: GithubSearchResponse = self
            .get_json(
                TrendSource::CodeHost,
                &url,
                &[
                    ("q", GITHUB_QUERY),
                    ("sort", "stars"),
                    ("order", "desc"),
                    ("per_page", "15"),
                ],
                self.config.request_timeout,
            )
            .await?;

        Ok(response
            .items
            .into_iter()
            .take(MAX_IDEAS_PER_SOURCE)
            .map(RawIdea::from)
            .collect())
    }

    async fn fetch_hackernews_trends(&self) -> Result<Vec<RawIdea>, TrendSourceError> {
        let origin = TrendSource::LinkAggregator;
        let url = format!("{}/v0/topstories.json", self.config.hackernews_base);
        let story_ids: Vec<u64> = self
            .get_json(origin, &url, &[], self.config.request_timeout)
            .await?;

        let mut ideas = Vec::new();
        for story_id in story_ids
            .into_iter()
            .take(HACKERNEWS_ID_WINDOW)
            .take(MAX_IDEAS_PER_SOURCE)
        {
            let item_url = format!("{}/v0/item/{}.json", self.config.hackernews_base, story_id);
            match self
                .get_json::<HackerNewsItem>(origin, &item_url, &[], self.config.item_timeout)
                .await
            {
                Ok(item) => ideas.extend(item.into_idea()),
                Err(e) => debug!("Skipping HackerNews item {}: {}", story_id, e),
            }
        }
        Ok(ideas)
    }

    async fn fetch_devto_trends(&self) -> Result<Vec<RawIdea>, TrendSourceError> {
        let url = format!("{}/api/articles", self.config.devto_base);
        let articles: Vec<DevToArticle> = self
            .get_json(
                TrendSource::ArticlePlatform,
                &url,
                &[("per_page", "15"), ("tag", DEVTO_TAGS)],
                self.config.request_timeout,
            )
            .await?;

        Ok(articles
            .into_iter()
            .take(MAX_IDEAS_PER_SOURCE)
            .map(RawIdea::from)
            .collect())
    }

    async fn fetch_reddit_trends(&self) -> Result<Vec<RawIdea>, TrendSourceError> {
        let url = format!("{}/r/programming/top.json", self.config.reddit_base);
        let listing: RedditListing<RedditPostData> = self
            .get_json(
                TrendSource::DiscussionForum,
                &url,
                &[("t", "week"), ("limit", "10")],
                self.config.request_timeout,
            )
            .await?;

        // The window is taken before filtering, so fewer than eight may remain.
        Ok(listing
            .data
            .children
            .into_iter()
            .take(MAX_IDEAS_PER_SOURCE)
            .map(|child| child.data)
            .filter(RedditPostData::is_linkable)
            .map(RawIdea::from)
            .collect())
    }

    async fn fetch_stackoverflow_trends(&self) -> Result<Vec<RawIdea>, TrendSourceError> {
        let url = format!("{}/2.3/tags", self.config.stackexchange_base);
        let response: StackExchangeTagsResponse = self
            .get_json(
                TrendSource::QaPlatform,
                &url,
                &[
                    ("site", "stackoverflow"),
                    ("sort", "popular"),
                    ("order", "desc"),
                    ("pagesize", "10"),
                ],
                self.config.request_timeout,
            )
            .await?;

        Ok(response
            .items
            .into_iter()
            .take(MAX_IDEAS_PER_SOURCE)
            .filter(|tag| tag.is_popular())
            .map(RawIdea::from)
            .collect())
    }
}

impl TrendFeed for TrendFetcher {
    async fn fetch_all(&self) -> Vec<RawIdea> {
        let (ideas, _reports) = self.fetch_all_with_report().await;
        ideas
    }
}
