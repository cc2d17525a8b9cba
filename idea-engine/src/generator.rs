use crate::optimizer::IdeaOptimizer;
use llm_interface::LlmProvider;
use tracing::{info, warn};
use trend_fetcher::TrendFeed;
use trendcast_core::{FallbackReason, Generated, OptimizedIdea, RawIdea};

/// Curated ideas served when no trend source responds.
pub fn fallback_ideas(count: usize) -> Vec<OptimizedIdea> {
    [
        (
            "The Hidden Power of Async/Await in JavaScript",
            "Most developers miss this async trick...",
            "JavaScript",
            87,
        ),
        (
            "Why Your API Design is Wrong",
            "APIs should be designed differently...",
            "API Design",
            85,
        ),
        (
            "Database Optimization Will Change Everything",
            "This database trick saved us $100k...",
            "Database Optimization",
            90,
        ),
    ]
    .into_iter()
    .take(count)
    .map(|(title, hook, keyword, score)| OptimizedIdea::new(title, hook, keyword, score))
    .collect()
}

/// Uniform sample of `count` ideas without replacement. Returns the whole
/// pool, shuffled, when it is smaller than `count`.
pub fn sample_ideas(mut pool: Vec<RawIdea>, count: usize, rng: &mut fastrand::Rng) -> Vec<RawIdea> {
    rng.shuffle(&mut pool);
    pool.truncate(count);
    pool
}

pub struct IdeaGenerator<F, P> {
    feed: F,
    optimizer: IdeaOptimizer<P>,
}

impl<F: TrendFeed, P: LlmProvider> IdeaGenerator<F, P> {
    pub fn new(feed: F, optimizer: IdeaOptimizer<P>) -> Self {
        Self { feed, optimizer }
    }

    pub fn optimizer(&self) -> &IdeaOptimizer<P> {
        &self.optimizer
    }

    /// Fetches the pool, samples up to `count` ideas and optimizes each.
    /// Never pads: fewer ideas than asked are returned when the pool is small.
    pub async fn generate(
        &self,
        count: usize,
        rng: &mut fastrand::Rng,
    ) -> Vec<Generated<OptimizedIdea>> {
        let pool = self.feed.fetch_all().await;

        if pool.is_empty() {
            warn!("No web sources available, using fallback ideas");
            return fallback_ideas(count)
                .into_iter()
                .map(|idea| Generated::Fallback(idea, FallbackReason::NoTrendSources))
                .collect();
        }

        info!("Sampling {} of {} trending topics", count.min(pool.len()), pool.len());
        let selected = sample_ideas(pool, count, rng);
        let use_model = self.optimizer.has_model();

        let mut ideas = Vec::with_capacity(selected.len());
        for raw in &selected {
            ideas.push(self.optimizer.optimize(raw, use_model).await);
        }
        ideas
    }
}
