// ==========================================
// Schema normalizer integration tests
// ==========================================
// Legacy vs standardized headers, idempotence, schema errors
// ==========================================

mod test_helpers;

use roteiro_pcp::domain::{
    BorderVariant, CanonicalField, RulesetGeneration, UnmappedColumnPolicy, VocabularyKind,
};
use roteiro_pcp::engine::route;
use roteiro_pcp::importer::{
    to_canonical_sheet, BlockExtractor, HeaderNormalizer, ImportError, SchemaNormalizer,
    TextExtractor,
};
use test_helpers::*;

fn normalize_export(text: &[u8]) -> roteiro_pcp::importer::NormalizedSheet {
    let extracted = BlockExtractor::default().extract(text).unwrap();
    HeaderNormalizer::default()
        .normalize_lines(&extracted.lines)
        .unwrap()
}

#[test]
fn test_legacy_and_standardized_headers_give_same_records() {
    let standard = normalize_export(sectioned_export(STANDARD_HEADER, &SAMPLE_ROWS).as_bytes());
    let legacy = normalize_export(&to_cp1252(&sectioned_export(LEGACY_HEADER, &SAMPLE_ROWS)));

    assert_eq!(standard.vocabulary, VocabularyKind::Standardized);
    assert_eq!(legacy.vocabulary, VocabularyKind::Legacy);
    assert_eq!(standard.border_variant, Some(BorderVariant::Standard));
    assert_eq!(legacy.border_variant, Some(BorderVariant::Face));

    assert_eq!(standard.records.len(), SAMPLE_ROWS.len());
    for (a, b) in standard.records.iter().zip(&legacy.records) {
        for field in CanonicalField::ALL {
            assert_eq!(a.get(field), b.get(field), "field {}", field);
        }
        for generation in [RulesetGeneration::Basic, RulesetGeneration::Extended] {
            assert_eq!(route(a, generation), route(b, generation));
        }
    }
}

#[test]
fn test_every_record_carries_all_canonical_fields() {
    let sheet = normalize_export(sectioned_export(STANDARD_HEADER, &SAMPLE_ROWS).as_bytes());

    let first = &sheet.records[0];
    assert_eq!(first.get(CanonicalField::ProjectId), "784");
    assert_eq!(first.get(CanonicalField::Location), "Caixa");
    assert_eq!(first.get(CanonicalField::BorderLeft), "PVC");
    // absent from the export, still present
    assert_eq!(first.get(CanonicalField::ProjectName), "");
    assert!(sheet.unmapped_columns.is_empty());
}

#[test]
fn test_normalize_is_idempotent_over_canonical_sheet() {
    let first = normalize_export(sectioned_export(STANDARD_HEADER, &SAMPLE_ROWS).as_bytes());
    let normalizer = HeaderNormalizer::default();

    let second = normalizer
        .normalize_sheet(&to_canonical_sheet(&first.records))
        .unwrap();

    assert_eq!(second.records, first.records);
    assert_eq!(second.dropped_rows, 0);
}

#[test]
fn test_missing_location_is_a_schema_error() {
    let header = STANDARD_HEADER.replace(";LOCAL;", ";SETOR;");
    let text = sectioned_export(&header, &SAMPLE_ROWS);
    let extracted = BlockExtractor::default().extract(text.as_bytes()).unwrap();

    let err = HeaderNormalizer::default()
        .normalize_lines(&extracted.lines)
        .unwrap_err();

    assert_eq!(err.missing_fields(), Some(&[CanonicalField::Location][..]));
    assert!(matches!(err, ImportError::Schema { .. }));
    assert!(err.to_string().contains("LOCAL"));
}

#[test]
fn test_drop_policy_discards_unknown_columns() {
    let header = format!("{};COR DO FITA", STANDARD_HEADER);
    let rows: Vec<String> = SAMPLE_ROWS.iter().map(|r| format!("{};azul", r)).collect();
    let row_refs: Vec<&str> = rows.iter().map(String::as_str).collect();
    let text = sectioned_export(&header, &row_refs);
    let extracted = BlockExtractor::default().extract(text.as_bytes()).unwrap();

    let kept = HeaderNormalizer::new(UnmappedColumnPolicy::Keep)
        .normalize_lines(&extracted.lines)
        .unwrap();
    assert_eq!(kept.records[0].extra("COR DO FITA"), Some("azul"));

    let dropped = HeaderNormalizer::new(UnmappedColumnPolicy::Drop)
        .normalize_lines(&extracted.lines)
        .unwrap();
    assert!(dropped.records[0].extras.is_empty());
    assert_eq!(dropped.unmapped_columns, vec!["COR DO FITA".to_string()]);
}

#[test]
fn test_footer_client_row_is_dropped() {
    let mut rows = SAMPLE_ROWS[..2].to_vec();
    rows.push("784;RODAPE;;;;;;;;;;;;;;;;");
    let text = legacy_export(STANDARD_HEADER, &rows);
    let sheet = normalize_export(text.as_bytes());

    assert_eq!(sheet.records.len(), 2);
    assert_eq!(sheet.dropped_rows, 1);
}
