// ==========================================
// Roteiro PCP - importer error types
// ==========================================
// Tool: thiserror derive
// Only DecodeError, SchemaError and UnsupportedFormat reach the
// user as "fix your export" messages; the rest are I/O failures.
// ==========================================

use crate::domain::piece::CanonicalField;
use crate::domain::types::TextEncoding;
use thiserror::Error;

/// Importer error type
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== Decoding =====
    #[error("Não foi possível decodificar o arquivo CSV (codificações tentadas: {})", join_encodings(.tried))]
    Decode { tried: Vec<TextEncoding> },

    // ===== Schema =====
    #[error("Colunas não encontradas: {}", join_fields(.missing))]
    Schema { missing: Vec<CanonicalField> },

    // ===== Format =====
    #[error("Formato não suportado: {0} (use CSV, XLS ou XLSX)")]
    UnsupportedFormat(String),

    // ===== File / parser =====
    #[error("Falha ao ler o arquivo: {0}")]
    FileRead(String),

    #[error("Falha ao interpretar o CSV: {0}")]
    CsvParse(String),

    #[error("Falha ao interpretar a planilha: {0}")]
    SpreadsheetParse(String),

    // ===== Catch-all =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ImportError {
    /// Missing canonical fields of a SchemaError
    pub fn missing_fields(&self) -> Option<&[CanonicalField]> {
        match self {
            ImportError::Schema { missing } => Some(missing),
            _ => None,
        }
    }

    /// True when the user can fix the problem by re-exporting the file
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            ImportError::Decode { .. }
                | ImportError::Schema { .. }
                | ImportError::UnsupportedFormat(_)
        )
    }
}

fn join_encodings(tried: &[TextEncoding]) -> String {
    tried
        .iter()
        .map(|e| e.label())
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_fields(missing: &[CanonicalField]) -> String {
    missing
        .iter()
        .map(|f| f.canonical_label())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileRead(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParse(err.to_string())
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::SpreadsheetParse(err.to_string())
    }
}

impl From<calamine::XlsxError> for ImportError {
    fn from(err: calamine::XlsxError) -> Self {
        ImportError::SpreadsheetParse(err.to_string())
    }
}

impl From<calamine::XlsError> for ImportError {
    fn from(err: calamine::XlsError) -> Self {
        ImportError::SpreadsheetParse(err.to_string())
    }
}

/// Result alias
pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_lists_missing_labels() {
        let err = ImportError::Schema {
            missing: vec![CanonicalField::Location, CanonicalField::Drilling],
        };
        assert_eq!(err.to_string(), "Colunas não encontradas: LOCAL, FURO");
        assert_eq!(
            err.missing_fields(),
            Some(&[CanonicalField::Location, CanonicalField::Drilling][..])
        );
        assert!(err.is_user_error());
    }

    #[test]
    fn test_decode_error_lists_encodings() {
        let err = ImportError::Decode {
            tried: vec![TextEncoding::Utf8Sig, TextEncoding::Utf8],
        };
        assert!(err.to_string().contains("utf-8-sig, utf-8"));
    }

    #[test]
    fn test_io_error_is_not_user_error() {
        let err: ImportError = std::io::Error::new(std::io::ErrorKind::Other, "boom").into();
        assert!(!err.is_user_error());
        assert!(err.missing_fields().is_none());
    }
}
