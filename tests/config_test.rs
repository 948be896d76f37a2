// ==========================================
// Configuration integration tests
// ==========================================
// config_kv round trips and pipeline option loading
// ==========================================

mod test_helpers;

use roteiro_pcp::config::{config_keys, ConfigManager, RoutingConfigReader, DEFAULT_LOCALE};
use roteiro_pcp::domain::{RulesetGeneration, TextEncoding, UnmappedColumnPolicy};
use roteiro_pcp::engine::PipelineOptions;
use test_helpers::create_test_db;

#[test]
fn test_defaults_when_nothing_is_stored() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let config = ConfigManager::new(&db_path).unwrap();

    assert_eq!(config.load_pipeline_options().unwrap(), PipelineOptions::default());
    assert_eq!(config.get_locale().unwrap(), DEFAULT_LOCALE);
}

#[test]
fn test_stored_values_drive_pipeline_options() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let config = ConfigManager::new(&db_path).unwrap();

    config.set_config_value(config_keys::RULESET_GENERATION, "b").unwrap();
    config.set_config_value(config_keys::UNMAPPED_COLUMNS, "drop").unwrap();
    config.set_config_value(config_keys::ENCODINGS, "cp1252, utf-8").unwrap();

    let options = config.load_pipeline_options().unwrap();
    assert_eq!(options.generation, RulesetGeneration::Extended);
    assert_eq!(options.unmapped_policy, UnmappedColumnPolicy::Drop);
    assert_eq!(options.encodings, vec![TextEncoding::Windows1252, TextEncoding::Utf8]);
}

#[test]
fn test_invalid_values_fall_back_to_defaults() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let config = ConfigManager::new(&db_path).unwrap();

    config.set_config_value(config_keys::RULESET_GENERATION, "Z").unwrap();
    config.set_config_value(config_keys::ENCODINGS, "utf-8,ebcdic").unwrap();

    assert_eq!(config.get_ruleset_generation().unwrap(), RulesetGeneration::Basic);
    assert_eq!(config.get_encodings().unwrap(), TextEncoding::PREFERENCE.to_vec());
}

#[test]
fn test_values_persist_in_the_database_file() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    ConfigManager::new(&db_path)
        .unwrap()
        .set_config_value(config_keys::LOCALE, "en")
        .unwrap();

    let reopened = ConfigManager::new(&db_path).unwrap();
    assert_eq!(reopened.get_locale().unwrap(), "en");
    assert_eq!(
        reopened.get_config_snapshot().unwrap().get(config_keys::LOCALE),
        Some(&"en".to_string())
    );
}
