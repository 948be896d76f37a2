// ==========================================
// Roteiro PCP - schema normalizer
// ==========================================
// Responsibility: source headers -> canonical fields
// 1. clean header names, drop empty ones
// 2. detect the border-column variant once per document
// 3. resolve every header through the vocabulary list (first claim wins)
// 4. fail with SchemaError when a required field is unresolved
// 5. build complete records, drop blank and footer rows
// ==========================================

use crate::domain::piece::{CanonicalField, CanonicalRecord};
use crate::domain::types::{BorderVariant, UnmappedColumnPolicy, VocabularyKind};
use crate::importer::block_extractor::FOOTER_SENTINEL;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{DelimitedTextParser, TabularSheet};
use crate::importer::header_vocabulary::{
    border_variant_of, detect_border_variant, fold_header, resolve_header, HeaderVocabulary,
    VOCABULARIES,
};
use crate::importer::importer_trait::SchemaNormalizer;
use tracing::{debug, info, warn};

/// Normalizer output
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSheet {
    pub records: Vec<CanonicalRecord>,
    /// Vocabulary the report should use for display labels
    pub vocabulary: VocabularyKind,
    pub border_variant: Option<BorderVariant>,
    /// Cleaned names of the columns no vocabulary claimed
    pub unmapped_columns: Vec<String>,
    /// Rows removed as blank or footer artifacts
    pub dropped_rows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ColumnTarget {
    Canonical(CanonicalField),
    Extra(String),
    Skip,
}

/// Column plan computed once from the header row
#[derive(Debug)]
struct ColumnPlan {
    targets: Vec<ColumnTarget>,
    resolved: [bool; CanonicalField::COUNT],
    border_variant: Option<BorderVariant>,
    vocabulary: VocabularyKind,
    unmapped: Vec<String>,
}

impl ColumnPlan {
    fn is_resolved(&self, field: CanonicalField) -> bool {
        self.resolved[field as usize]
    }
}

// ==========================================
// HeaderNormalizer
// ==========================================
#[derive(Debug, Clone)]
pub struct HeaderNormalizer {
    policy: UnmappedColumnPolicy,
    vocabularies: Vec<&'static HeaderVocabulary>,
}

impl Default for HeaderNormalizer {
    fn default() -> Self {
        Self::new(UnmappedColumnPolicy::default())
    }
}

impl HeaderNormalizer {
    pub fn new(policy: UnmappedColumnPolicy) -> Self {
        Self {
            policy,
            vocabularies: VOCABULARIES.to_vec(),
        }
    }

    pub fn policy(&self) -> UnmappedColumnPolicy {
        self.policy
    }

    /// Normalizes extracted ';' lines (first line = header row)
    pub fn normalize_lines(&self, lines: &[String]) -> ImportResult<NormalizedSheet> {
        let sheet = DelimitedTextParser::default().parse_lines(lines)?;
        self.normalize_sheet(&sheet)
    }

    fn plan_columns(&self, headers: &[String]) -> ColumnPlan {
        let cleaned: Vec<String> = headers.iter().map(|h| clean_header(h)).collect();
        let folded: Vec<String> = cleaned.iter().map(|h| fold_header(h)).collect();
        let border_variant = detect_border_variant(folded.iter().map(String::as_str));

        let mut targets = Vec::with_capacity(headers.len());
        let mut resolved = [false; CanonicalField::COUNT];
        let mut unmapped = Vec::new();
        let mut description_header: Option<&str> = None;

        for (name, key) in cleaned.iter().zip(&folded) {
            if name.is_empty() {
                // trailing empty column left by the stray ';'
                targets.push(ColumnTarget::Skip);
                continue;
            }

            let claim = resolve_header(&self.vocabularies, key).filter(|_| {
                // only the document's border variant feeds the border fields
                border_variant_of(key).map_or(true, |variant| Some(variant) == border_variant)
            });

            match claim {
                Some((field, _)) if !resolved[field as usize] => {
                    resolved[field as usize] = true;
                    if field == CanonicalField::PieceDescription {
                        description_header = Some(name.as_str());
                    }
                    targets.push(ColumnTarget::Canonical(field));
                }
                other => {
                    if let Some((field, _)) = other {
                        warn!(column = %name, field = %field, "campo canônico já mapeado por outra coluna");
                    }
                    unmapped.push(name.clone());
                    targets.push(match self.policy {
                        UnmappedColumnPolicy::Keep => ColumnTarget::Extra(name.clone()),
                        UnmappedColumnPolicy::Drop => ColumnTarget::Skip,
                    });
                }
            }
        }

        // Accented description header => the export uses the legacy names
        let vocabulary = match description_header {
            Some(header) if !header.is_ascii() => VocabularyKind::Legacy,
            _ => VocabularyKind::Standardized,
        };

        ColumnPlan {
            targets,
            resolved,
            border_variant,
            vocabulary,
            unmapped,
        }
    }

    fn build_record(&self, plan: &ColumnPlan, row: &[String]) -> CanonicalRecord {
        let mut record = CanonicalRecord::new();
        for (idx, target) in plan.targets.iter().enumerate() {
            let value = row.get(idx).map(|v| clean_cell(v)).unwrap_or_default();
            match target {
                ColumnTarget::Canonical(field) => record.set(*field, value),
                ColumnTarget::Extra(name) => record.extras.push((name.clone(), value)),
                ColumnTarget::Skip => {}
            }
        }
        record
    }
}

impl SchemaNormalizer for HeaderNormalizer {
    fn normalize_sheet(&self, sheet: &TabularSheet) -> ImportResult<NormalizedSheet> {
        let plan = self.plan_columns(&sheet.headers);

        let missing: Vec<CanonicalField> = CanonicalField::REQUIRED
            .iter()
            .copied()
            .filter(|field| !plan.is_resolved(*field))
            .collect();
        if !missing.is_empty() {
            warn!(missing = ?missing, headers = ?sheet.headers, "colunas obrigatórias ausentes");
            return Err(ImportError::Schema { missing });
        }

        let filter_client = plan.is_resolved(CanonicalField::ClientName);
        let footer_key = fold_header(FOOTER_SENTINEL);
        let mut records = Vec::with_capacity(sheet.rows.len());
        let mut dropped_rows = 0;

        for row in &sheet.rows {
            if row.iter().all(|cell| clean_cell(cell).is_empty()) {
                dropped_rows += 1;
                continue;
            }

            let record = self.build_record(&plan, row);
            if filter_client {
                let client = record.get(CanonicalField::ClientName);
                if client.is_empty() || fold_header(client) == footer_key {
                    dropped_rows += 1;
                    continue;
                }
            }
            records.push(record);
        }

        if !plan.unmapped.is_empty() {
            debug!(columns = ?plan.unmapped, policy = ?self.policy, "colunas sem mapeamento");
        }
        info!(
            records = records.len(),
            dropped_rows,
            vocabulary = ?plan.vocabulary,
            border_variant = ?plan.border_variant,
            "esquema normalizado"
        );

        Ok(NormalizedSheet {
            records,
            vocabulary: plan.vocabulary,
            border_variant: plan.border_variant,
            unmapped_columns: plan.unmapped,
            dropped_rows,
        })
    }
}

/// Contract entry point: lines -> canonical records, default policy
pub fn normalize(lines: &[String]) -> ImportResult<Vec<CanonicalRecord>> {
    HeaderNormalizer::default()
        .normalize_lines(lines)
        .map(|sheet| sheet.records)
}

/// Renders canonical records back as a sheet with canonical headers
///
/// The client-name column is only written when some record carries one,
/// so re-normalizing the sheet never filters rows out.
pub fn to_canonical_sheet(records: &[CanonicalRecord]) -> TabularSheet {
    let fields: Vec<CanonicalField> = CanonicalField::ALL
        .iter()
        .copied()
        .filter(|field| {
            *field != CanonicalField::ClientName
                || records.iter().any(|r| !r.get(*field).is_empty())
        })
        .collect();
    let extra_names: Vec<String> = records
        .first()
        .map(|r| r.extras.iter().map(|(name, _)| name.clone()).collect())
        .unwrap_or_default();

    let mut headers: Vec<String> = fields
        .iter()
        .map(|f| f.canonical_label().to_string())
        .collect();
    headers.extend(extra_names.iter().cloned());

    let rows = records
        .iter()
        .map(|record| {
            let mut row: Vec<String> = fields.iter().map(|f| record.get(*f).to_string()).collect();
            row.extend(
                extra_names
                    .iter()
                    .map(|name| record.extra(name).unwrap_or_default().to_string()),
            );
            row
        })
        .collect();

    TabularSheet::new(headers, rows)
}

fn clean_header(raw: &str) -> String {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
        .to_string()
}

/// Trims a cell; spreadsheet "nan" artifacts read as empty
fn clean_cell(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("nan") {
        String::new()
    } else {
        trimmed.to_string()
    }
}
