// ==========================================
// Roteiro PCP - repository layer
// ==========================================
// Responsibility: data access behind plain methods
// Constraint: parameterized queries only
// Red line: no routing logic
// ==========================================

pub mod error;
pub mod job_history_repo;

// Re-exports
pub use error::{RepositoryError, RepositoryResult};
pub use job_history_repo::JobHistoryRepository;
