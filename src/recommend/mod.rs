pub mod formatter;
pub mod pipeline;

pub use formatter::{ikigai_components, RecommendationRequest, RoadmapParams};
pub use pipeline::{RecommendationPipeline, RecommendationResult};
