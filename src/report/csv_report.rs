// ==========================================
// Roteiro PCP - CSV report rendering
// ==========================================
// Routed batch -> ';'-separated report for the shop floor.
// Column labels follow the vocabulary the upload used, so a
// legacy export comes back with its own accented headers.
// ROTEIRO is always the last column.
// ==========================================

use crate::domain::piece::{CanonicalField, RecordBatch};
use crate::domain::types::{RulesetGeneration, VocabularyKind};
use crate::engine::legend::legend_for;
use crate::importer::block_extractor::FIELD_DELIMITER;
use csv::WriterBuilder;
use thiserror::Error;

pub const ROUTE_COLUMN: &str = "ROTEIRO";

/// Written first so spreadsheet tools pick UTF-8
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

const DISPLAY_FIELDS: [CanonicalField; 17] = [
    CanonicalField::ProjectId,
    CanonicalField::ProjectName,
    CanonicalField::ModuleDescription,
    CanonicalField::PieceDescription,
    CanonicalField::PieceId,
    CanonicalField::Quantity,
    CanonicalField::Width,
    CanonicalField::Height,
    CanonicalField::Thickness,
    CanonicalField::Material,
    CanonicalField::Location,
    CanonicalField::BorderFront,
    CanonicalField::BorderBack,
    CanonicalField::BorderLeft,
    CanonicalField::BorderRight,
    CanonicalField::Drilling,
    CanonicalField::Lamination,
];

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("falha ao gerar relatório CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("falha ao finalizar relatório: {0}")]
    Flush(String),
}

pub type ReportResult<T> = Result<T, ReportError>;

/// Fields shown in the report for a generation
///
/// Generation B also shows the cleaned observation.
pub fn report_fields(generation: RulesetGeneration) -> Vec<CanonicalField> {
    let mut fields = DISPLAY_FIELDS.to_vec();
    if generation == RulesetGeneration::Extended {
        fields.push(CanonicalField::Observation);
    }
    fields
}

/// Header row for a vocabulary and generation
pub fn report_headers(vocabulary: VocabularyKind, generation: RulesetGeneration) -> Vec<String> {
    let mut headers: Vec<String> = report_fields(generation)
        .iter()
        .map(|field| field.label(vocabulary).to_string())
        .collect();
    headers.push(ROUTE_COLUMN.to_string());
    headers
}

/// Renders the routed batch
pub fn render_report(batch: &RecordBatch) -> ReportResult<Vec<u8>> {
    let fields = report_fields(batch.generation);
    let mut writer = WriterBuilder::new()
        .delimiter(FIELD_DELIMITER as u8)
        .from_writer(UTF8_BOM.to_vec());

    writer.write_record(report_headers(batch.vocabulary, batch.generation))?;
    for piece in batch.iter() {
        let mut row: Vec<String> = fields
            .iter()
            .map(|field| piece.record.get(*field).to_string())
            .collect();
        row.push(piece.route.display());
        writer.write_record(&row)?;
    }

    writer
        .into_inner()
        .map_err(|e| ReportError::Flush(e.to_string()))
}

/// Renders the sector legend (SETOR;NOME;CRITÉRIO)
pub fn render_legend(generation: RulesetGeneration) -> ReportResult<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .delimiter(FIELD_DELIMITER as u8)
        .from_writer(UTF8_BOM.to_vec());

    writer.write_record(["SETOR", "NOME", "CRITÉRIO"])?;
    for entry in legend_for(generation) {
        writer.write_record([entry.sector.code(), entry.name(), entry.criterion])?;
    }

    writer
        .into_inner()
        .map_err(|e| ReportError::Flush(e.to_string()))
}
