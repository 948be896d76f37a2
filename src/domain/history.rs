// ==========================================
// Roteiro PCP - job history entity
// ==========================================
// One processed upload: id, original file name, date,
// piece count and the report artifact written for it.
// ==========================================

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Date format shown to the user (dd/mm/YYYY HH:MM)
pub const JOB_DATE_FORMAT: &str = "%d/%m/%Y %H:%M";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    /// Short job id (first 8 hex chars of a v4 UUID)
    pub id: String,
    /// Original upload name
    pub name: String,
    /// Local date, JOB_DATE_FORMAT
    pub date: String,
    pub piece_count: i64,
    /// Report file name under the outputs directory
    pub artifact: String,
    pub created_at: DateTime<Utc>,
}

impl JobRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        piece_count: usize,
        artifact: impl Into<String>,
    ) -> Self {
        let created_at = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            date: created_at
                .with_timezone(&Local)
                .format(JOB_DATE_FORMAT)
                .to_string(),
            piece_count: piece_count as i64,
            artifact: artifact.into(),
            created_at,
        }
    }
}
