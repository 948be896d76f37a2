// ==========================================
// Roteiro PCP - routing configuration reader
// ==========================================
// Responsibility: read-side interface the pipeline is configured from
// Red line: no writes, no routing logic
// ==========================================

use crate::domain::types::{RulesetGeneration, TextEncoding, UnmappedColumnPolicy};
use crate::engine::pipeline::PipelineOptions;
use crate::repository::error::RepositoryResult;

// ==========================================
// RoutingConfigReader
// ==========================================
// Implementor: ConfigManager (config_kv table)
pub trait RoutingConfigReader: Send + Sync {
    /// Ruleset generation
    ///
    /// # Default
    /// - A (basic)
    fn get_ruleset_generation(&self) -> RepositoryResult<RulesetGeneration>;

    /// Unmapped-column policy
    ///
    /// # Default
    /// - KEEP
    fn get_unmapped_policy(&self) -> RepositoryResult<UnmappedColumnPolicy>;

    /// Decode preference list
    ///
    /// # Default
    /// - utf-8-sig, utf-8, cp1252, latin-1
    fn get_encodings(&self) -> RepositoryResult<Vec<TextEncoding>>;

    /// UI locale
    ///
    /// # Default
    /// - pt-BR
    fn get_locale(&self) -> RepositoryResult<String>;

    /// Everything the pipeline needs, in one value
    fn load_pipeline_options(&self) -> RepositoryResult<PipelineOptions> {
        Ok(PipelineOptions {
            generation: self.get_ruleset_generation()?,
            unmapped_policy: self.get_unmapped_policy()?,
            encodings: self.get_encodings()?,
        })
    }
}
