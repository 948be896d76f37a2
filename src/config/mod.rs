// ==========================================
// Roteiro PCP - configuration layer
// ==========================================
// Responsibility: runtime configuration and data paths
// Storage: config_kv table
// ==========================================

pub mod config_manager;
pub mod paths;
pub mod routing_config_trait;

// Re-exports
pub use config_manager::{config_keys, ConfigManager, DEFAULT_LOCALE};
pub use paths::{AppPaths, DATA_DIR_ENV};
pub use routing_config_trait::RoutingConfigReader;
