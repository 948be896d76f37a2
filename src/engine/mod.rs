// ==========================================
// Roteiro PCP - engine layer
// ==========================================
// Responsibility: routing rules and the upload pipeline
// Red line: engines never touch SQL or the filesystem
// ==========================================

pub mod legend;
pub mod pipeline;
pub mod routing;
pub mod special_service;

// Re-exports
pub use legend::{legend_for, LegendEntry};
pub use pipeline::{PipelineOptions, RoutingPipeline};
pub use routing::{route, RoutingEngine};
pub use special_service::{detect_service_tags, strip_service_tags, ServiceTag};
