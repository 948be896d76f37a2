// ==========================================
// Roteiro PCP - routing API
// ==========================================
// Responsibility: the operations a front end calls
//   process_upload  -> route an upload, store report + history
//   download        -> report artifact for a job
//   list_history    -> processed jobs, newest first
//   delete_job      -> drop a job and its artifacts
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::{AppPaths, ConfigManager, RoutingConfigReader};
use crate::domain::history::JobRecord;
use crate::domain::piece::{RecordBatch, RouteCount, SummaryOrder};
use crate::domain::types::{RulesetGeneration, SourceFormat, VocabularyKind};
use crate::engine::legend::{legend_for, LegendEntry};
use crate::engine::pipeline::{PipelineOptions, RoutingPipeline};
use crate::i18n::{set_locale, t};
use crate::report::{render_legend, render_report};
use crate::repository::error::RepositoryError;
use crate::repository::JobHistoryRepository;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Upload size ceiling (16 MiB)
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Pieces returned in the preview
pub const PREVIEW_LIMIT: usize = 50;

const JOB_ID_LEN: usize = 8;
const DOWNLOAD_PREFIX: &str = "ROTEIRO_";
const LEGEND_SUFFIX: &str = "_legenda";

/// One preview line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewRow {
    pub piece_description: String,
    pub location: String,
    pub route: String,
}

/// Response of process_upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessUploadResponse {
    pub job_id: String,
    pub total: usize,
    /// First PREVIEW_LIMIT pieces
    pub preview: Vec<PreviewRow>,
    /// Route histogram, most frequent first
    pub summary: Vec<RouteCount>,
    pub generation: RulesetGeneration,
    pub vocabulary: VocabularyKind,
    /// Decoding used (CSV uploads only)
    pub encoding: Option<String>,
    pub artifact: String,
}

/// What a download endpoint needs to stream the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadInfo {
    pub path: PathBuf,
    pub download_name: String,
}

// ==========================================
// RoutingApi
// ==========================================
pub struct RoutingApi {
    paths: AppPaths,
    history: JobHistoryRepository,
    config: ConfigManager,
}

impl RoutingApi {
    /// Opens (creating if needed) the data directory and database
    ///
    /// Messages switch to the configured locale (pt-BR by default).
    pub fn open(paths: AppPaths) -> ApiResult<Self> {
        paths.ensure_dirs().map_err(|e| {
            ApiError::InternalError(format!(
                "não foi possível criar {}: {}",
                paths.outputs_dir().display(),
                e
            ))
        })?;

        let db_path = paths.db_path();
        let conn = crate::db::open_sqlite_connection(&db_path.to_string_lossy())
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?;
        crate::db::init_schema(&conn).map_err(RepositoryError::from)?;

        let conn = Arc::new(Mutex::new(conn));
        let history = JobHistoryRepository::from_connection(conn.clone());
        let config = ConfigManager::from_connection(conn)?;
        set_locale(&config.get_locale()?);

        info!(data_dir = %paths.data_dir.display(), "API de roteiro inicializada");
        Ok(Self::from_parts(paths, history, config))
    }

    /// Test helper: in-memory database, artifacts under `paths`
    pub fn open_in_memory(paths: AppPaths) -> ApiResult<Self> {
        paths
            .ensure_dirs()
            .map_err(|e| ApiError::InternalError(e.to_string()))?;
        let conn = Connection::open_in_memory().map_err(RepositoryError::from)?;
        crate::db::init_schema(&conn).map_err(RepositoryError::from)?;

        let conn = Arc::new(Mutex::new(conn));
        let history = JobHistoryRepository::from_connection(conn.clone());
        let config = ConfigManager::from_connection(conn)?;
        set_locale(&config.get_locale()?);
        Ok(Self::from_parts(paths, history, config))
    }

    pub fn from_parts(
        paths: AppPaths,
        history: JobHistoryRepository,
        config: ConfigManager,
    ) -> Self {
        Self {
            paths,
            history,
            config,
        }
    }

    pub fn config(&self) -> &ConfigManager {
        &self.config
    }

    pub fn paths(&self) -> &AppPaths {
        &self.paths
    }

    /// Routes an upload with the configured options
    pub fn process_upload(
        &self,
        file_name: &str,
        raw: &[u8],
    ) -> ApiResult<ProcessUploadResponse> {
        let options = self.config.load_pipeline_options()?;
        self.process_upload_with(file_name, raw, &options)
    }

    /// Routes an upload with explicit options
    #[instrument(skip(self, raw, options), fields(bytes = raw.len(), generation = %options.generation))]
    pub fn process_upload_with(
        &self,
        file_name: &str,
        raw: &[u8],
        options: &PipelineOptions,
    ) -> ApiResult<ProcessUploadResponse> {
        let file_name = base_name(file_name);
        if file_name.is_empty() {
            return Err(ApiError::InvalidInput(t("api.no_file")));
        }
        if raw.is_empty() {
            return Err(ApiError::InvalidInput(t("api.empty_file")));
        }
        if raw.len() > MAX_UPLOAD_BYTES {
            return Err(ApiError::InvalidInput(t("api.file_too_large")));
        }

        let batch = RoutingPipeline::from_options(options).process(&file_name, raw)?;

        let job_id = new_job_id();
        let artifact = format!("{}_{}.csv", job_id, file_stem(&file_name));
        self.write_artifacts(&artifact, &batch)?;

        let job = JobRecord::new(job_id.clone(), file_name.clone(), batch.len(), artifact.clone());
        if let Err(e) = self.history.insert(&job) {
            self.remove_artifacts(&artifact);
            return Err(e.into());
        }

        info!(job_id = %job_id, pieces = batch.len(), artifact = %artifact, "pedido processado");
        Ok(build_response(job_id, artifact, &batch))
    }

    /// Report path and download name of a job
    pub fn download(&self, job_id: &str) -> ApiResult<DownloadInfo> {
        let job = self
            .history
            .find_by_id(job_id)?
            .ok_or_else(|| ApiError::NotFound(job_id.to_string()))?;

        Ok(DownloadInfo {
            path: self.paths.outputs_dir().join(&job.artifact),
            download_name: format!("{}{}.csv", DOWNLOAD_PREFIX, file_stem(&job.name)),
        })
    }

    /// Every processed job, newest first
    pub fn list_history(&self) -> ApiResult<Vec<JobRecord>> {
        Ok(self.history.list_recent(None)?)
    }

    /// Removes a job; unknown ids are not an error
    ///
    /// Returns whether a job was removed.
    pub fn delete_job(&self, job_id: &str) -> ApiResult<bool> {
        let Some(job) = self.history.find_by_id(job_id)? else {
            return Ok(false);
        };

        self.remove_artifacts(&job.artifact);
        let removed = self.history.delete(job_id)?;
        info!(job_id, removed, "pedido excluído");
        Ok(removed)
    }

    /// Sector legend for a generation
    pub fn legend(&self, generation: RulesetGeneration) -> &'static [LegendEntry] {
        legend_for(generation)
    }

    fn write_artifacts(&self, artifact: &str, batch: &RecordBatch) -> ApiResult<()> {
        let outputs = self.paths.outputs_dir();
        write_file(&outputs.join(artifact), &render_report(batch)?)?;
        write_file(
            &outputs.join(legend_artifact_name(artifact)),
            &render_legend(batch.generation)?,
        )?;
        Ok(())
    }

    fn remove_artifacts(&self, artifact: &str) {
        let outputs = self.paths.outputs_dir();
        for name in [artifact.to_string(), legend_artifact_name(artifact)] {
            let path = outputs.join(&name);
            match std::fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => warn!(path = %path.display(), error = %e, "falha ao remover artefato"),
            }
        }
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> ApiResult<()> {
    std::fs::write(path, bytes).map_err(|e| {
        RepositoryError::ArtifactIo {
            path: path.display().to_string(),
            message: e.to_string(),
        }
        .into()
    })
}

fn build_response(job_id: String, artifact: String, batch: &RecordBatch) -> ProcessUploadResponse {
    let preview = batch
        .iter()
        .take(PREVIEW_LIMIT)
        .map(|piece| PreviewRow {
            piece_description: piece.record.piece_description().to_string(),
            location: piece.record.location().to_string(),
            route: piece.route.display(),
        })
        .collect();

    ProcessUploadResponse {
        job_id,
        total: batch.len(),
        preview,
        summary: batch.route_summary(SummaryOrder::Frequency),
        generation: batch.generation,
        vocabulary: batch.vocabulary,
        encoding: batch.encoding.map(|e| e.label().to_string()),
        artifact,
    }
}

/// First 8 hex chars of a v4 UUID
pub fn new_job_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(JOB_ID_LEN);
    id
}

/// Name without directories (uploads from Windows keep backslashes)
fn base_name(file_name: &str) -> String {
    file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or("")
        .trim()
        .to_string()
}

/// Name without its last extension when the extension is a known format
fn file_stem(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if SourceFormat::from_file_name(ext).is_some() && !stem.is_empty() => {
            stem
        }
        _ => file_name,
    }
}

fn legend_artifact_name(artifact: &str) -> String {
    let stem = artifact.strip_suffix(".csv").unwrap_or(artifact);
    format!("{}{}.csv", stem, LEGEND_SUFFIX)
}
