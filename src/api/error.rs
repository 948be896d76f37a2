// ==========================================
// Roteiro PCP - API layer errors
// ==========================================
// Responsibility: turn importer / repository / report failures
// into messages the person uploading the file can act on
// ==========================================

use crate::i18n::{t, t_with_args};
use crate::importer::error::ImportError;
use crate::report::ReportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API layer errors
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // Upload / export problems (user can fix)
    // ==========================================
    #[error("entrada inválida: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Import(ImportError),

    #[error("recurso não encontrado: {0}")]
    NotFound(String),

    // ==========================================
    // Infrastructure
    // ==========================================
    #[error("erro de banco de dados: {0}")]
    DatabaseError(String),

    #[error("falha ao gravar relatório: {0}")]
    ReportError(String),

    #[error("erro interno: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// True when the fix is on the uploader's side (HTTP 4xx territory)
    pub fn is_client_error(&self) -> bool {
        match self {
            ApiError::InvalidInput(_) | ApiError::NotFound(_) => true,
            ApiError::Import(err) => err.is_user_error(),
            _ => false,
        }
    }

    /// Translated message for the current locale
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Import(ImportError::Schema { missing }) => {
                let columns = missing
                    .iter()
                    .map(|field| field.canonical_label())
                    .collect::<Vec<_>>()
                    .join(", ");
                t_with_args("api.schema_error", &[("columns", &columns)])
            }
            ApiError::Import(ImportError::Decode { .. }) => t("api.decode_error"),
            ApiError::Import(ImportError::UnsupportedFormat(_)) => t("api.unsupported_format"),
            ApiError::InvalidInput(msg) => msg.clone(),
            ApiError::NotFound(id) => t_with_args("api.not_found", &[("id", id)]),
            other => t_with_args("api.processing_failed", &[("reason", &other.to_string())]),
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::Other(inner) => ApiError::Other(inner),
            other => ApiError::Import(other),
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})", entity, id))
            }
            RepositoryError::DatabaseConnectionError(msg)
            | RepositoryError::DatabaseQueryError(msg)
            | RepositoryError::UniqueConstraintViolation(msg) => ApiError::DatabaseError(msg),
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseError(format!("falha ao obter o lock do banco: {}", msg))
            }
            RepositoryError::ArtifactIo { path, message } => {
                ApiError::ReportError(format!("{}: {}", path, message))
            }
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        ApiError::ReportError(err.to_string())
    }
}

/// Result alias
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::piece::CanonicalField;

    #[test]
    fn test_import_user_errors_are_client_errors() {
        let err: ApiError = ImportError::Schema {
            missing: vec![CanonicalField::Location],
        }
        .into();
        assert!(err.is_client_error());

        let err: ApiError = ImportError::CsvParse("x".into()).into();
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_repository_not_found_maps_to_not_found() {
        let err: ApiError = RepositoryError::NotFound {
            entity: "pedido".into(),
            id: "abc".into(),
        }
        .into();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
