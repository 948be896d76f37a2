// ==========================================
// Roteiro PCP - data directory layout
// ==========================================
// <data_dir>/historico.db   job history + config_kv
// <data_dir>/outputs/       report artifacts
//
// data_dir resolution: explicit override > ROTEIRO_PCP_DATA_DIR
//                      > user data dir (dirs) > working directory
// ==========================================

use std::io;
use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "ROTEIRO_PCP_DATA_DIR";
pub const DB_FILE_NAME: &str = "historico.db";
pub const OUTPUTS_DIR_NAME: &str = "outputs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub data_dir: PathBuf,
}

impl AppPaths {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Resolves the data directory (does not create it)
    pub fn resolve(override_dir: Option<&Path>) -> Self {
        if let Some(dir) = override_dir {
            return Self::new(dir);
        }

        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            let trimmed = dir.trim();
            if !trimmed.is_empty() {
                return Self::new(trimmed);
            }
        }

        match dirs::data_dir() {
            // debug builds get their own directory
            #[cfg(debug_assertions)]
            Some(base) => Self::new(base.join("roteiro-pcp-dev")),
            #[cfg(not(debug_assertions))]
            Some(base) => Self::new(base.join("roteiro-pcp")),
            None => Self::new("."),
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    pub fn outputs_dir(&self) -> PathBuf {
        self.data_dir.join(OUTPUTS_DIR_NAME)
    }

    /// Creates data_dir and outputs/ if missing
    pub fn ensure_dirs(&self) -> io::Result<()> {
        std::fs::create_dir_all(self.outputs_dir())
    }
}
