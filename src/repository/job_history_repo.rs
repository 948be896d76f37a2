// ==========================================
// Roteiro PCP - job history repository
// ==========================================
// Table: pedidos (one row per processed upload)
// Red line: no routing logic, data access only
// ==========================================

use crate::domain::history::JobRecord;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

// created_at is stored as fixed-width RFC 3339: text order is time order
const SELECT_COLUMNS: &str = "id, nome, data, total_pecas, arquivo_out, created_at";

// ==========================================
// JobHistoryRepository
// ==========================================
pub struct JobHistoryRepository {
    conn: Arc<Mutex<Connection>>,
}

impl JobHistoryRepository {
    /// Opens the database file and makes sure the schema exists
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = crate::db::open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        crate::db::init_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Repository over an existing (already initialized) connection
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    pub fn insert(&self, job: &JobRecord) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO pedidos (id, nome, data, total_pecas, arquivo_out, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                job.id,
                job.name,
                job.date,
                job.piece_count,
                job.artifact,
                job.created_at.to_rfc3339_opts(SecondsFormat::Nanos, true),
            ],
        )?;
        debug!(job_id = %job.id, pieces = job.piece_count, "pedido gravado");
        Ok(())
    }

    pub fn find_by_id(&self, id: &str) -> RepositoryResult<Option<JobRecord>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM pedidos WHERE id = ?1", SELECT_COLUMNS);
        let job = conn
            .query_row(&sql, params![id], map_job_row)
            .optional()?;
        Ok(job)
    }

    /// Most recent first; `limit = None` returns everything
    pub fn list_recent(&self, limit: Option<usize>) -> RepositoryResult<Vec<JobRecord>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM pedidos ORDER BY created_at DESC, rowid DESC LIMIT ?1",
            SELECT_COLUMNS
        );
        // SQLite treats a negative LIMIT as "no limit"
        let limit = limit.map(|n| n as i64).unwrap_or(-1);

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![limit], map_job_row)?;

        let mut jobs = Vec::new();
        for row in rows {
            jobs.push(row?);
        }
        Ok(jobs)
    }

    /// Deletes a row; returns whether it existed
    pub fn delete(&self, id: &str) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM pedidos WHERE id = ?1", params![id])?;
        debug!(job_id = %id, affected, "pedido removido");
        Ok(affected > 0)
    }

    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let total = conn.query_row("SELECT COUNT(*) FROM pedidos", [], |row| row.get(0))?;
        Ok(total)
    }
}

fn map_job_row(row: &Row<'_>) -> rusqlite::Result<JobRecord> {
    let created_raw: String = row.get(5)?;
    let created_at = DateTime::parse_from_rfc3339(&created_raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(JobRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        date: row.get(2)?,
        piece_count: row.get(3)?,
        artifact: row.get(4)?,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> JobHistoryRepository {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::init_schema(&conn).unwrap();
        JobHistoryRepository::from_connection(Arc::new(Mutex::new(conn)))
    }

    #[test]
    fn test_insert_and_find() {
        let repo = repo();
        let job = JobRecord::new("ab12cd34", "cozinha.csv", 12, "ab12cd34_cozinha.csv");
        repo.insert(&job).unwrap();

        let found = repo.find_by_id("ab12cd34").unwrap().unwrap();
        assert_eq!(found.name, "cozinha.csv");
        assert_eq!(found.piece_count, 12);
        assert_eq!(found.created_at, job.created_at);
        assert!(repo.find_by_id("nope").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let repo = repo();
        let job = JobRecord::new("dup00001", "a.csv", 1, "dup00001_a.csv");
        repo.insert(&job).unwrap();
        let err = repo.insert(&job).unwrap_err();
        assert!(matches!(err, RepositoryError::UniqueConstraintViolation(_)));
    }

    #[test]
    fn test_delete_reports_existence() {
        let repo = repo();
        repo.insert(&JobRecord::new("del00001", "a.csv", 1, "x.csv"))
            .unwrap();
        assert!(repo.delete("del00001").unwrap());
        assert!(!repo.delete("del00001").unwrap());
        assert_eq!(repo.count().unwrap(), 0);
    }
}
