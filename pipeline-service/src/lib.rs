pub mod pipeline;
pub mod store;

pub use pipeline::{IdeaEntry, MetadataRecord, Pipeline, PipelineRun, RunOutcomes, VideoRecord};
pub use store::{slugify, RunStore};
