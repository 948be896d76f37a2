// ==========================================
// Roteiro PCP - importer traits
// ==========================================
// Responsibility: seams between the import stages (no implementations)
// Pipeline: TextExtractor -> (DelimitedTextParser) -> SchemaNormalizer
//           SheetParser   ----------------------------^
// ==========================================

use crate::domain::types::SourceFormat;
use crate::importer::block_extractor::ExtractedText;
use crate::importer::error::ImportResult;
use crate::importer::file_parser::TabularSheet;
use crate::importer::schema_normalizer::NormalizedSheet;

// ==========================================
// TextExtractor
// ==========================================
// Implementor: BlockExtractor
pub trait TextExtractor: Send + Sync {
    /// Decodes raw CSV bytes and returns the table lines
    ///
    /// # Returns
    /// - Ok(ExtractedText): header line first, then data lines
    /// - Err(ImportError::Decode): no configured encoding accepts the bytes
    fn extract(&self, raw: &[u8]) -> ImportResult<ExtractedText>;
}

// ==========================================
// SheetParser
// ==========================================
// Implementor: SpreadsheetParser
pub trait SheetParser: Send + Sync {
    /// Decodes a spreadsheet upload into header + rows
    fn parse_sheet(&self, raw: &[u8], format: SourceFormat) -> ImportResult<TabularSheet>;
}

// ==========================================
// SchemaNormalizer
// ==========================================
// Implementor: HeaderNormalizer
pub trait SchemaNormalizer: Send + Sync {
    /// Maps source headers to canonical fields and builds complete records
    ///
    /// # Returns
    /// - Ok(NormalizedSheet): records in source row order
    /// - Err(ImportError::Schema): a required canonical field did not resolve
    fn normalize_sheet(&self, sheet: &TabularSheet) -> ImportResult<NormalizedSheet>;
}
