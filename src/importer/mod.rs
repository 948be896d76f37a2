// ==========================================
// Roteiro PCP - import layer
// ==========================================
// Responsibility: Dinabox export bytes -> canonical records
// Stages: block extraction -> tabular parse -> schema normalization
// Red line: no routing rules, no persistence
// ==========================================

pub mod block_extractor;
pub mod error;
pub mod file_parser;
pub mod header_vocabulary;
pub mod importer_trait;
pub mod schema_normalizer;

// Re-exports
pub use block_extractor::{BlockExtractor, BlockLayout, ExtractedText, FIELD_DELIMITER};
pub use error::{ImportError, ImportResult};
pub use file_parser::{DelimitedTextParser, SpreadsheetParser, TabularSheet};
pub use header_vocabulary::{fold_header, HeaderVocabulary, VOCABULARIES};
pub use schema_normalizer::{to_canonical_sheet, HeaderNormalizer, NormalizedSheet};

// Trait seams
pub use importer_trait::{SchemaNormalizer, SheetParser, TextExtractor};
