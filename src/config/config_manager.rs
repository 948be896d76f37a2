// ==========================================
// Roteiro PCP - configuration manager
// ==========================================
// Responsibility: load, query and upsert configuration
// Storage: config_kv table (scope_id + key -> value)
// Unparseable stored values fall back to the default with a warning.
// ==========================================

use crate::config::routing_config_trait::RoutingConfigReader;
use crate::db::{configure_sqlite_connection, init_schema, open_sqlite_connection};
use crate::domain::types::{RulesetGeneration, TextEncoding, UnmappedColumnPolicy};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::warn;

pub const DEFAULT_LOCALE: &str = "pt-BR";

const GLOBAL_SCOPE: &str = "global";

// ==========================================
// ConfigManager
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// Opens the database file; the schema is created if missing
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        init_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Wraps an existing connection (PRAGMAs re-applied, idempotent)
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            configure_sqlite_connection(&guard)?;
        }
        Ok(Self { conn })
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Global-scope value, None when absent
    pub fn get_config_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
                params![GLOBAL_SCOPE, key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Upserts a global-scope value
    pub fn set_config_value(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES (?1, ?2, ?3)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?3, updated_at = datetime('now')",
            params![GLOBAL_SCOPE, key, value],
        )?;
        Ok(())
    }

    /// Every global value, ordered by key
    pub fn get_config_snapshot(&self) -> RepositoryResult<BTreeMap<String, String>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = ?1")?;
        let rows = stmt.query_map(params![GLOBAL_SCOPE], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut snapshot = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            snapshot.insert(key, value);
        }
        Ok(snapshot)
    }

    fn get_parsed_or_default<T>(&self, key: &str, default: T) -> RepositoryResult<T>
    where
        T: FromStr<Err = String>,
    {
        match self.get_config_value(key)? {
            Some(raw) => Ok(raw.parse::<T>().unwrap_or_else(|e| {
                warn!(key, value = %raw, error = %e, "valor de configuração inválido, usando padrão");
                default
            })),
            None => Ok(default),
        }
    }
}

impl RoutingConfigReader for ConfigManager {
    fn get_ruleset_generation(&self) -> RepositoryResult<RulesetGeneration> {
        self.get_parsed_or_default(config_keys::RULESET_GENERATION, RulesetGeneration::default())
    }

    fn get_unmapped_policy(&self) -> RepositoryResult<UnmappedColumnPolicy> {
        self.get_parsed_or_default(config_keys::UNMAPPED_COLUMNS, UnmappedColumnPolicy::default())
    }

    fn get_encodings(&self) -> RepositoryResult<Vec<TextEncoding>> {
        let default = TextEncoding::PREFERENCE.to_vec();
        let Some(raw) = self.get_config_value(config_keys::ENCODINGS)? else {
            return Ok(default);
        };

        // comma-separated labels, e.g. "utf-8-sig,cp1252"
        let parsed: Result<Vec<TextEncoding>, String> = raw
            .split(',')
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map(TextEncoding::from_str)
            .collect();

        match parsed {
            Ok(list) if !list.is_empty() => Ok(list),
            Ok(_) => Ok(default),
            Err(e) => {
                warn!(value = %raw, error = %e, "lista de codificações inválida, usando padrão");
                Ok(default)
            }
        }
    }

    fn get_locale(&self) -> RepositoryResult<String> {
        Ok(self
            .get_config_value(config_keys::LOCALE)?
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string()))
    }
}

/// config_kv keys
pub mod config_keys {
    pub const RULESET_GENERATION: &str = "routing.ruleset_generation";
    pub const UNMAPPED_COLUMNS: &str = "normalizer.unmapped_columns";
    pub const ENCODINGS: &str = "extractor.encodings";
    pub const LOCALE: &str = "ui.locale";
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> ConfigManager {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        ConfigManager::from_connection(Arc::new(Mutex::new(conn))).unwrap()
    }

    #[test]
    fn test_defaults_when_keys_absent() {
        let config = manager();
        let options = config.load_pipeline_options().unwrap();
        assert_eq!(options, crate::engine::pipeline::PipelineOptions::default());
        assert_eq!(config.get_locale().unwrap(), "pt-BR");
    }

    #[test]
    fn test_upsert_and_read_back() {
        let config = manager();
        config
            .set_config_value(config_keys::RULESET_GENERATION, "B")
            .unwrap();
        config
            .set_config_value(config_keys::RULESET_GENERATION, "b")
            .unwrap();
        config
            .set_config_value(config_keys::UNMAPPED_COLUMNS, "drop")
            .unwrap();
        config
            .set_config_value(config_keys::ENCODINGS, "utf-8, cp1252")
            .unwrap();

        let options = config.load_pipeline_options().unwrap();
        assert_eq!(options.generation, RulesetGeneration::Extended);
        assert_eq!(options.unmapped_policy, UnmappedColumnPolicy::Drop);
        assert_eq!(
            options.encodings,
            vec![TextEncoding::Utf8, TextEncoding::Windows1252]
        );
        assert_eq!(config.get_config_snapshot().unwrap().len(), 3);
    }

    #[test]
    fn test_invalid_value_falls_back_to_default() {
        let config = manager();
        config
            .set_config_value(config_keys::RULESET_GENERATION, "Z")
            .unwrap();
        config
            .set_config_value(config_keys::ENCODINGS, "ebcdic")
            .unwrap();

        assert_eq!(
            config.get_ruleset_generation().unwrap(),
            RulesetGeneration::Basic
        );
        assert_eq!(
            config.get_encodings().unwrap(),
            TextEncoding::PREFERENCE.to_vec()
        );
    }
}
