pub mod generator;
pub mod optimizer;
pub mod script;
pub mod template;

pub use generator::{fallback_ideas, sample_ideas, IdeaGenerator};
pub use optimizer::IdeaOptimizer;
pub use script::ScriptExpander;
pub use template::template_script;
