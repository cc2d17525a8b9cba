pub mod api;
pub mod fetcher;
pub mod report;

pub use fetcher::{FetcherConfig, TrendFeed, TrendFetcher, MAX_IDEAS_PER_SOURCE};
pub use report::{FetchSummary, SourceReport};
