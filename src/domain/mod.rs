// ==========================================
// Roteiro PCP - domain layer
// ==========================================
// Responsibility: entities and closed type sets
// Red line: no data access, no routing rules
// ==========================================

pub mod history;
pub mod piece;
pub mod types;

// Re-exports
pub use history::{JobRecord, JOB_DATE_FORMAT};
pub use piece::{
    CanonicalField, CanonicalRecord, RecordBatch, RouteCount, RouteResult, RoutedPiece,
    SummaryOrder, ROUTE_SEPARATOR,
};
pub use types::{
    BorderVariant, RulesetGeneration, SectorCode, SourceFormat, TextEncoding,
    UnmappedColumnPolicy, VocabularyKind,
};
