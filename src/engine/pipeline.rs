// ==========================================
// Roteiro PCP - routing pipeline
// ==========================================
// Responsibility: one upload -> one RecordBatch
// Flow: CSV:        extract -> parse lines -> normalize -> route
//       XLSX / XLS: parse sheet            -> normalize -> route
// Generation B rewrites observations after routing.
// ==========================================

use crate::domain::piece::{CanonicalField, RecordBatch, RoutedPiece};
use crate::domain::types::{RulesetGeneration, SourceFormat, TextEncoding, UnmappedColumnPolicy};
use crate::engine::routing::RoutingEngine;
use crate::engine::special_service::strip_service_tags;
use crate::importer::block_extractor::BlockExtractor;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{DelimitedTextParser, SpreadsheetParser};
use crate::importer::importer_trait::{SchemaNormalizer, SheetParser, TextExtractor};
use crate::importer::schema_normalizer::{HeaderNormalizer, NormalizedSheet};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

// ==========================================
// PipelineOptions
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineOptions {
    pub generation: RulesetGeneration,
    pub unmapped_policy: UnmappedColumnPolicy,
    /// Decode attempts, in order
    pub encodings: Vec<TextEncoding>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            generation: RulesetGeneration::default(),
            unmapped_policy: UnmappedColumnPolicy::default(),
            encodings: TextEncoding::PREFERENCE.to_vec(),
        }
    }
}

impl PipelineOptions {
    pub fn with_generation(mut self, generation: RulesetGeneration) -> Self {
        self.generation = generation;
        self
    }
}

// ==========================================
// RoutingPipeline
// ==========================================
pub struct RoutingPipeline {
    text_extractor: Box<dyn TextExtractor>,
    sheet_parser: Box<dyn SheetParser>,
    normalizer: Box<dyn SchemaNormalizer>,
    line_parser: DelimitedTextParser,
    engine: RoutingEngine,
}

impl RoutingPipeline {
    /// Assembles the pipeline from explicit stages
    pub fn new(
        text_extractor: Box<dyn TextExtractor>,
        sheet_parser: Box<dyn SheetParser>,
        normalizer: Box<dyn SchemaNormalizer>,
        generation: RulesetGeneration,
    ) -> Self {
        Self {
            text_extractor,
            sheet_parser,
            normalizer,
            line_parser: DelimitedTextParser::default(),
            engine: RoutingEngine::new(generation),
        }
    }

    /// Default stages configured from options
    pub fn from_options(options: &PipelineOptions) -> Self {
        Self::new(
            Box::new(BlockExtractor::new(options.encodings.clone())),
            Box::new(SpreadsheetParser),
            Box::new(HeaderNormalizer::new(options.unmapped_policy)),
            options.generation,
        )
    }

    pub fn generation(&self) -> RulesetGeneration {
        self.engine.generation()
    }

    /// Processes an upload identified by its file name
    ///
    /// # Returns
    /// - Ok(RecordBatch): routed pieces in source row order
    /// - Err(UnsupportedFormat): extension is not csv/xlsx/xls
    /// - Err(Decode | Schema): the batch is aborted
    #[instrument(skip(self, raw), fields(bytes = raw.len(), generation = %self.generation()))]
    pub fn process(&self, file_name: &str, raw: &[u8]) -> ImportResult<RecordBatch> {
        let format = SourceFormat::from_file_name(file_name).ok_or_else(|| {
            warn!(file_name, "formato não suportado");
            ImportError::UnsupportedFormat(file_name.to_string())
        })?;
        self.process_bytes(format, raw)
    }

    /// Processes raw bytes of a known format
    pub fn process_bytes(&self, format: SourceFormat, raw: &[u8]) -> ImportResult<RecordBatch> {
        let start = Instant::now();

        let (normalized, encoding) = match format {
            SourceFormat::Csv => {
                let extracted = self.text_extractor.extract(raw)?;
                let sheet = self.line_parser.parse_lines(&extracted.lines)?;
                (self.normalizer.normalize_sheet(&sheet)?, Some(extracted.encoding))
            }
            SourceFormat::Xlsx | SourceFormat::Xls => {
                let sheet = self.sheet_parser.parse_sheet(raw, format)?;
                (self.normalizer.normalize_sheet(&sheet)?, None)
            }
        };

        let batch = self.route_sheet(normalized, format, encoding);

        info!(
            format = %format,
            pieces = batch.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "lote roteado"
        );
        Ok(batch)
    }

    /// Routes already normalized records
    pub fn route_sheet(
        &self,
        normalized: NormalizedSheet,
        source_format: SourceFormat,
        encoding: Option<TextEncoding>,
    ) -> RecordBatch {
        let generation = self.generation();
        let pieces: Vec<RoutedPiece> = normalized
            .records
            .into_iter()
            .map(|mut record| {
                let route = self.engine.route(&record);
                if generation == RulesetGeneration::Extended {
                    // tags have been read; the shop floor only sees the clean text
                    let cleaned = strip_service_tags(record.observation());
                    record.set(CanonicalField::Observation, cleaned);
                }
                RoutedPiece { record, route }
            })
            .collect();

        debug!(pieces = pieces.len(), generation = %generation, "peças roteadas");

        RecordBatch {
            pieces,
            generation,
            source_format,
            vocabulary: normalized.vocabulary,
            border_variant: normalized.border_variant,
            encoding,
        }
    }
}

impl Default for RoutingPipeline {
    fn default() -> Self {
        Self::from_options(&PipelineOptions::default())
    }
}
