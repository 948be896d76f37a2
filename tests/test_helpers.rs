// ==========================================
// Test helpers
// ==========================================
// Responsibility: temporary databases / data dirs and Dinabox
// export builders shared by the integration tests
// ==========================================

#![allow(dead_code)]

use roteiro_pcp::api::RoutingApi;
use roteiro_pcp::config::AppPaths;
use rusqlite::Connection;
use std::error::Error;
use std::path::PathBuf;
use tempfile::{NamedTempFile, TempDir};

/// Standardized-template header row (no trailing ';')
pub const STANDARD_HEADER: &str = "ID DO PROJETO;NOME DO CLIENTE;DESCRICAO MODULO;DESCRICAO DA PECA;ID DA PECA;QUANTIDADE;LARGURA;ALTURA;ESPESSURA;MATERIAL;LOCAL;BORDA_FRENTE;BORDA_TRASEIRA;BORDA_LE;BORDA_LD;FURO;DUPLAGEM;OBSERVACAO";

/// Legacy header row with accented names and BORDA_FACE_* columns
pub const LEGACY_HEADER: &str = "ID DO PROJETO;NOME DO CLIENTE;DESCRIÇÃO MÓDULO;DESCRIÇÃO DA PEÇA;ID DA PEÇA;QUANTIDADE;LARGURA DA PEÇA;ALTURA DA PEÇA;ESPESSURA;MATERIAL DA PEÇA;LOCAL;BORDA_FACE_FRENTE;BORDA_FACE_TRASEIRA;BORDA_FACE_LE;BORDA_FACE_LD;FURO;DUPLAGEM;OBSERVAÇÃO";

/// Data rows that fit both header rows above
pub const SAMPLE_ROWS: [&str; 5] = [
    "784;DENISE NEVES;Balcão pia;Lateral;1;2;550;720;15;MDF Branco;Caixa;PVC;;PVC;;F;;",
    "784;DENISE NEVES;Balcão pia;Porta Perfil DB;2;1;400;700;18;MDF Branco;Porta;PVC;PVC;PVC;PVC;;;",
    "784;DENISE NEVES;Aéreo;Frente gaveta;3;1;600;180;18;MDF Branco;Gaveta;PVC;;;;F;;#pin laca",
    "784;DENISE NEVES;Aéreo;Tampo;4;1;1200;600;36;MDF Branco;Tamponamento;PVC;;;;;Duplagem 36mm;",
    "784;DENISE NEVES;Aéreo;Fundo;5;1;1200;600;6;HDF;Fundo;;;;;;;",
];

/// Temporary database file with the schema created
///
/// # Returns
/// - NamedTempFile: keep it alive for the duration of the test
/// - String: database path
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    roteiro_pcp::logging::init_test();
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_string_lossy().to_string();

    let conn = Connection::open(&db_path)?;
    roteiro_pcp::db::init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// RoutingApi over a temporary data directory
pub fn create_test_api() -> Result<(TempDir, RoutingApi), Box<dyn Error>> {
    roteiro_pcp::logging::init_test();
    let dir = tempfile::tempdir()?;
    let api = RoutingApi::open(AppPaths::new(dir.path()))?;
    Ok((dir, api))
}

/// Sectioned export: [CABECALHO] header, [LISTA] rows, [RODAPE] footer,
/// CRLF line endings and the exporter's trailing ';'
pub fn sectioned_export(header: &str, rows: &[&str]) -> String {
    let mut out = String::new();
    out.push_str("[CABECALHO]\r\n");
    out.push_str(header);
    out.push_str(";\r\n[/CABECALHO]\r\n[LISTA]\r\n");
    for row in rows {
        out.push_str(row);
        out.push_str(";\r\n");
    }
    out.push_str("[/LISTA]\r\n[RODAPE]\r\nTOTAL;");
    out.push_str(&rows.len().to_string());
    out.push_str(";\r\n");
    out
}

/// Marker-less export: header, rows, footer sentinel line
pub fn legacy_export(header: &str, rows: &[&str]) -> String {
    let mut out = String::new();
    out.push_str(header);
    out.push_str(";\n");
    for row in rows {
        out.push_str(row);
        out.push_str(";\n");
    }
    out.push_str("\nRODAPÉ\n");
    out
}

/// Windows-1252 bytes of a text (what older exporters write)
pub fn to_cp1252(text: &str) -> Vec<u8> {
    let (bytes, _, had_errors) = encoding_rs::WINDOWS_1252.encode(text);
    assert!(!had_errors, "text not representable in cp1252");
    bytes.into_owned()
}

/// UTF-8 bytes with a BOM
pub fn to_utf8_sig(text: &str) -> Vec<u8> {
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(text.as_bytes());
    bytes
}

/// Bytes of a file under tests/fixtures
pub fn fixture_bytes(name: &str) -> Result<Vec<u8>, Box<dyn Error>> {
    let path: PathBuf = [env!("CARGO_MANIFEST_DIR"), "tests", "fixtures", name]
        .iter()
        .collect();
    Ok(std::fs::read(path)?)
}
