// ==========================================
// Pipeline end-to-end tests
// ==========================================
// Bytes in, routed batch out: order, counts, error paths
// ==========================================

mod test_helpers;

use roteiro_pcp::domain::{
    CanonicalField, RulesetGeneration, SourceFormat, SummaryOrder, TextEncoding, VocabularyKind,
};
use roteiro_pcp::engine::{PipelineOptions, RoutingPipeline};
use roteiro_pcp::importer::ImportError;
use roteiro_pcp::report::render_report;
use test_helpers::*;

fn pipeline(generation: RulesetGeneration) -> RoutingPipeline {
    RoutingPipeline::from_options(&PipelineOptions::default().with_generation(generation))
}

fn routes(batch: &roteiro_pcp::domain::RecordBatch) -> Vec<String> {
    batch.iter().map(|p| p.route.display()).collect()
}

#[test]
fn test_basic_generation_routes_sample_order() {
    let text = sectioned_export(STANDARD_HEADER, &SAMPLE_ROWS);
    let batch = pipeline(RulesetGeneration::Basic)
        .process("pedido_784.csv", text.as_bytes())
        .unwrap();

    assert_eq!(batch.len(), SAMPLE_ROWS.len());
    assert_eq!(batch.source_format, SourceFormat::Csv);
    assert_eq!(
        routes(&batch),
        vec![
            "COR > BOR > USI > FUR > CAX > EXP",
            "COR > XBOR > XMAR > EXP",
            "COR > BOR > USI > FUR > CAX > EXP",
            "COR > BOR > DUP > MAR > EXP",
            "COR > EXP",
        ]
    );
    let ids: Vec<&str> = batch
        .iter()
        .map(|p| p.record.get(CanonicalField::PieceId))
        .collect();
    assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
}

#[test]
fn test_extended_generation_routes_and_cleans_observation() {
    let text = sectioned_export(STANDARD_HEADER, &SAMPLE_ROWS);
    let batch = pipeline(RulesetGeneration::Extended)
        .process("pedido_784.csv", text.as_bytes())
        .unwrap();

    assert_eq!(
        routes(&batch),
        vec![
            "COR > BOR > USI > FUR > MCX > CQL > EXP",
            "COR > BOR > MPE > MAR > CQL > EXP",
            "COR > BOR > USI > FUR > MCX > PIN > CQL > EXP",
            "COR > BOR > DUP > MAR > CQL > EXP",
            "COR > CQL > EXP",
        ]
    );
    assert_eq!(batch.pieces[2].record.observation(), "laca");
}

#[test]
fn test_legacy_cp1252_export_routes_like_standardized() {
    let standard = pipeline(RulesetGeneration::Extended)
        .process("a.csv", sectioned_export(STANDARD_HEADER, &SAMPLE_ROWS).as_bytes())
        .unwrap();
    let legacy = pipeline(RulesetGeneration::Extended)
        .process("b.CSV", &to_cp1252(&legacy_export(LEGACY_HEADER, &SAMPLE_ROWS)))
        .unwrap();

    assert_eq!(legacy.vocabulary, VocabularyKind::Legacy);
    assert_eq!(legacy.encoding, Some(TextEncoding::Windows1252));
    assert_eq!(routes(&legacy), routes(&standard));
}

#[test]
fn test_summary_counts_every_piece() {
    let text = sectioned_export(STANDARD_HEADER, &SAMPLE_ROWS);
    let batch = pipeline(RulesetGeneration::Basic)
        .process("pedido.csv", text.as_bytes())
        .unwrap();

    let summary = batch.route_summary(SummaryOrder::Frequency);
    assert_eq!(summary[0].route, "COR > BOR > USI > FUR > CAX > EXP");
    assert_eq!(summary[0].count, 2);
    assert_eq!(summary.iter().map(|c| c.count).sum::<usize>(), batch.len());
}

#[test]
fn test_missing_location_column_aborts_batch() {
    let header = STANDARD_HEADER.replace(";LOCAL;", ";");
    let rows: Vec<String> = SAMPLE_ROWS
        .iter()
        .map(|row| {
            let mut cells: Vec<&str> = row.split(';').collect();
            cells.remove(10);
            cells.join(";")
        })
        .collect();
    let row_refs: Vec<&str> = rows.iter().map(String::as_str).collect();
    let text = sectioned_export(&header, &row_refs);

    let err = RoutingPipeline::default()
        .process("pedido.csv", text.as_bytes())
        .unwrap_err();

    assert_eq!(err.missing_fields(), Some(&[CanonicalField::Location][..]));
    assert!(err.is_user_error());
}

#[test]
fn test_garbage_spreadsheet_is_rejected() {
    let err = RoutingPipeline::default()
        .process("pedido.xlsx", b"definitely not a zip archive")
        .unwrap_err();
    assert!(matches!(err, ImportError::SpreadsheetParse(_)));
}

#[test]
fn test_unknown_extension_is_unsupported() {
    let err = RoutingPipeline::default()
        .process("pedido.pdf", b"%PDF-1.4")
        .unwrap_err();
    assert!(matches!(err, ImportError::UnsupportedFormat(_)));
}

#[test]
fn test_report_has_one_line_per_piece() {
    let text = sectioned_export(STANDARD_HEADER, &SAMPLE_ROWS);
    let batch = pipeline(RulesetGeneration::Extended)
        .process("pedido.csv", text.as_bytes())
        .unwrap();

    let report = String::from_utf8(render_report(&batch).unwrap()).unwrap();
    let lines: Vec<&str> = report.trim_start_matches('\u{feff}').lines().collect();
    assert_eq!(lines.len(), 1 + batch.len());
    assert!(lines[0].ends_with("OBSERVACAO;ROTEIRO"));
    assert!(lines[3].ends_with("laca;COR > BOR > USI > FUR > MCX > PIN > CQL > EXP"));
}

#[test]
fn test_untagged_observation_spacing_survives_extended_generation() {
    let rows = [
        "784;DENISE NEVES;Aéreo;Fundo;5;1;1200;600;6;HDF;Fundo;;;;;;;cor   azul    fosco",
        "784;DENISE NEVES;Aéreo;Fundo;6;1;1200;600;6;HDF;Fundo;;;;;;;cor   azul  _pin_  fosco",
    ];
    let text = sectioned_export(STANDARD_HEADER, &rows);
    let batch = pipeline(RulesetGeneration::Extended)
        .process("pedido.csv", text.as_bytes())
        .unwrap();

    assert_eq!(batch.pieces[0].record.observation(), "cor   azul    fosco");
    assert_eq!(batch.pieces[1].record.observation(), "cor   azul fosco");
    assert_eq!(batch.pieces[1].route.display(), "COR > PIN > CQL > EXP");
}
