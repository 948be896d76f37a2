// ==========================================
// Roteiro PCP - core library
// ==========================================
// Dinabox export -> canonical pieces -> sector routes
// Stack: Rust + SQLite (history) + CSV/XLSX readers
// ==========================================

// i18n bootstrap
rust_i18n::i18n!("locales", fallback = "pt-BR");

// ==========================================
// Modules
// ==========================================

// Domain layer - entities and closed types
pub mod domain;

// Import layer - bytes to canonical records
pub mod importer;

// Engine layer - routing rules and pipeline
pub mod engine;

// Report layer - CSV rendering
pub mod report;

// Repository layer - job history
pub mod repository;

// Configuration layer
pub mod config;

// SQLite connection setup (PRAGMAs, schema)
pub mod db;

// Logging
pub mod logging;

// i18n
pub mod i18n;

// API layer - front-end entry points
pub mod api;

// ==========================================
// Re-exports
// ==========================================

pub use domain::{
    CanonicalField, CanonicalRecord, JobRecord, RecordBatch, RouteResult, RoutedPiece,
    RulesetGeneration, SectorCode,
};
pub use engine::{route, PipelineOptions, RoutingEngine, RoutingPipeline};
pub use importer::{ImportError, ImportResult};
pub use api::{ApiError, ApiResult, RoutingApi};

// ==========================================
// Constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "Roteiro PCP";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
