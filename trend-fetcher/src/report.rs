use serde::{Deserialize, Serialize};
use std::time::Duration;
use trendcast_core::TrendSource;

/// Outcome of one source call during a fetch pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceReport {
    pub source: TrendSource,
    pub ideas: usize,
    pub elapsed: Duration,
    pub error_code: Option<String>,
}

impl SourceReport {
    pub fn succeeded(&self) -> bool {
        self.error_code.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchSummary {
    pub total_ideas: usize,
    pub sources_responding: usize,
    pub sources_failed: usize,
    pub total_time: Duration,
}

impl FetchSummary {
    pub fn from_reports(reports: &[SourceReport]) -> Self {
        reports.iter().fold(Self::default(), |mut summary, report| {
            summary.total_ideas += report.ideas;
            summary.total_time += report.elapsed;
            if report.succeeded() {
                if report.ideas > 0 {
                    summary.sources_responding += 1;
                }
            } else {
                summary.sources_failed += 1;
            }
            summary
        })
    }
}
