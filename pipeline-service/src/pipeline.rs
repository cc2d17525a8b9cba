use crate::store::{slugify, RunStore, IDEAS_DIR, METADATA_DIR, SCRIPTS_DIR};
use chrono::{DateTime, Utc};
use idea_engine::{IdeaGenerator, IdeaOptimizer, ScriptExpander};
use llm_interface::{GroqProvider, LlmProvider};
use seo_optimizer::MetadataOptimizer;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};
use trend_fetcher::{FetcherConfig, TrendFeed, TrendFetcher};
use trendcast_core::{
    AppConfig, CoreError, ErrorExt, Generated, OptimizedIdea, OutcomeReport, Script,
    ScriptDocument, SeoMetadata,
};
use uuid::Uuid;

/// One line of `ideas/ideas_{ts}.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdeaEntry {
    #[serde(flatten)]
    pub idea: OptimizedIdea,
    pub outcome: OutcomeReport,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunOutcomes {
    pub idea: OutcomeReport,
    pub script: OutcomeReport,
}

/// Everything known about one video, as written to `metadata/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataRecord {
    pub run_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub idea: OptimizedIdea,
    pub script: Script,
    pub seo: SeoMetadata,
    pub outcomes: RunOutcomes,
}

#[derive(Debug, Clone, Serialize)]
pub struct VideoRecord {
    pub title: String,
    pub script_file: PathBuf,
    pub metadata_file: PathBuf,
    pub seo_score: u8,
    pub outcomes: RunOutcomes,
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineRun {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
    pub ideas_file: PathBuf,
    pub videos: Vec<VideoRecord>,
}

/// Trend fetch, idea optimization, script expansion and metadata, run
/// sequentially and persisted as JSON.
pub struct Pipeline<F, P> {
    feed: F,
    provider: Option<P>,
    metadata: MetadataOptimizer,
    store: RunStore,
    idea_count: usize,
    rng: fastrand::Rng,
}

impl Pipeline<TrendFetcher, GroqProvider> {
    /// Live sources and, when a key is configured, the hosted model.
    pub fn from_config(config: &AppConfig) -> Result<Self, CoreError> {
        let fetcher = TrendFetcher::new(FetcherConfig::from_app_config(config))?;
        let provider = GroqProvider::from_config(config);
        if provider.is_none() {
            info!("No API key configured, ideas and scripts will use templates");
        }
        Ok(Self::new(fetcher, provider, config))
    }
}

impl<F: TrendFeed, P: LlmProvider> Pipeline<F, P> {
    pub fn new(feed: F, provider: Option<P>, config: &AppConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self {
            feed,
            provider,
            metadata: MetadataOptimizer::new(),
            store: RunStore::new(config.output_dir.clone()),
            idea_count: config.idea_count,
            rng,
        }
    }

    pub fn with_metadata_optimizer(mut self, metadata: MetadataOptimizer) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn store(&self) -> &RunStore {
        &self.store
    }

    /// Fetch and optimize only. Nothing is written.
    pub async fn generate_ideas(&mut self, count: usize) -> Vec<Generated<OptimizedIdea>> {
        let generator = IdeaGenerator::new(&self.feed, IdeaOptimizer::new(self.provider.as_ref()));
        generator.generate(count, &mut self.rng).await
    }

    /// One full pass. Generation never fails; only persistence can.
    pub async fn run_once(&mut self) -> Result<PipelineRun, CoreError> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let start_time = Instant::now();
        let stamp = started_at.format("%Y%m%d_%H%M%S").to_string();
        info!("Starting pipeline run {}", run_id);

        let ideas = self.generate_ideas(self.idea_count).await;
        if ideas.is_empty() {
            warn!("Run {} produced no ideas", run_id);
        }

        let entries: Vec<IdeaEntry> = ideas
            .iter()
            .map(|idea| IdeaEntry {
                idea: idea.value().clone(),
                outcome: idea.report(),
            })
            .collect();
        let ideas_file = self
            .store
            .write_json(IDEAS_DIR, &format!("ideas_{}", stamp), &entries)?;

        let expander = ScriptExpander::new(self.provider.as_ref());
        let mut videos = Vec::with_capacity(ideas.len());

        for generated in &ideas {
            let idea = generated.value();
            info!("Writing script for: {}", idea.title);
            let script = expander.expand(idea, true).await;
            let seo = self
                .metadata
                .optimize_metadata(idea, script.value(), &mut self.rng);
            info!("SEO score {}/100 for: {}", seo.score.total_score, seo.title);

            let outcomes = RunOutcomes {
                idea: generated.report(),
                script: script.report(),
            };
            let stem = format!("{}_{}", slugify(&idea.keyword), stamp);

            let document = ScriptDocument::from_script(script.value(), script.is_ok());
            let script_file = self.store.write_json(SCRIPTS_DIR, &stem, &document)?;

            let record = MetadataRecord {
                run_id,
                timestamp: Utc::now(),
                idea: idea.clone(),
                script: script.value().clone(),
                seo,
                outcomes: outcomes.clone(),
            };
            let metadata_file = self.store.write_json(METADATA_DIR, &stem, &record)?;

            videos.push(VideoRecord {
                title: record.seo.title,
                script_file,
                metadata_file,
                seo_score: record.seo.score.total_score,
                outcomes,
            });
        }

        let run = PipelineRun {
            run_id,
            started_at,
            elapsed: start_time.elapsed(),
            ideas_file,
            videos,
        };
        info!(
            "Pipeline run {} finished in {:.2}s with {} video(s)",
            run_id,
            run.elapsed.as_secs_f64(),
            run.videos.len()
        );
        Ok(run)
    }

    /// Repeats `run_once` every `every` until Ctrl-C.
    pub async fn run_scheduled(&mut self, every: Duration) -> Result<(), CoreError> {
        self.run_until(every, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await
        .map(|runs| info!("Scheduler stopped after {} run(s)", runs))
    }

    /// Runs immediately, then on every tick, until `shutdown` resolves.
    /// A failed run is logged and does not stop the loop. Returns the number
    /// of runs started.
    pub async fn run_until<S>(&mut self, every: Duration, shutdown: S) -> Result<usize, CoreError>
    where
        S: Future<Output = ()>,
    {
        if every.is_zero() {
            return Err(CoreError::InvalidInput {
                message: "schedule interval must be greater than zero".to_string(),
            });
        }

        info!("Scheduling pipeline every {:?}", every);
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        let mut runs = 0;
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Received shutdown signal");
                    return Ok(runs);
                }
                _ = ticker.tick() => {
                    runs += 1;
                    if let Err(e) = self.run_once().await {
                        e.log_error();
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trendcast_core::{FallbackReason, RawIdea, TrendSource};

    struct NoModel;

    impl LlmProvider for NoModel {
        fn name(&self) -> &str {
            "none"
        }

        async fn complete(&self, _prompt: &str, _max_tokens: u32) -> Result<String, CoreError> {
            unreachable!("model disabled in these tests")
        }
    }

    struct FixedFeed(Vec<RawIdea>);

    impl TrendFeed for FixedFeed {
        async fn fetch_all(&self) -> Vec<RawIdea> {
            self.0.clone()
        }
    }

    fn config(dir: &std::path::Path, idea_count: usize) -> AppConfig {
        AppConfig {
            output_dir: dir.to_path_buf(),
            idea_count,
            seed: Some(7),
            ..AppConfig::default()
        }
    }

    #[tokio::test]
    async fn test_generate_ideas_without_sources() {
        let dir = tempfile::tempdir().unwrap();
        let mut pipeline: Pipeline<FixedFeed, NoModel> =
            Pipeline::new(FixedFeed(Vec::new()), None, &config(dir.path(), 1));

        let ideas = pipeline.generate_ideas(2).await;
        assert_eq!(ideas.len(), 2);
        assert!(ideas
            .iter()
            .all(|idea| idea.reason() == Some(&FallbackReason::NoTrendSources)));
        assert!(!dir.path().join(IDEAS_DIR).exists());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut pipeline: Pipeline<FixedFeed, NoModel> =
            Pipeline::new(FixedFeed(Vec::new()), None, &config(dir.path(), 1));

        let result = tokio_test::block_on(pipeline.run_until(Duration::ZERO, async {}));
        assert!(matches!(result, Err(CoreError::InvalidInput { .. })));
    }

    #[tokio::test]
    async fn test_seeded_runs_pick_same_ideas() {
        let pool: Vec<RawIdea> = (0..10)
            .map(|i| RawIdea {
                title: format!("topic {}", i),
                source: TrendSource::ArticlePlatform,
                keywords: "rust".to_string(),
                description: String::new(),
                url: String::new(),
                popularity: 50,
            })
            .collect();

        let dir = tempfile::tempdir().unwrap();
        let mut first: Pipeline<FixedFeed, NoModel> =
            Pipeline::new(FixedFeed(pool.clone()), None, &config(dir.path(), 3));
        let mut second: Pipeline<FixedFeed, NoModel> =
            Pipeline::new(FixedFeed(pool), None, &config(dir.path(), 3));

        let titles = |ideas: Vec<Generated<OptimizedIdea>>| -> Vec<String> {
            ideas.into_iter().map(|idea| idea.into_value().title).collect()
        };
        assert_eq!(
            titles(first.generate_ideas(3).await),
            titles(second.generate_ideas(3).await)
        );
    }
}
