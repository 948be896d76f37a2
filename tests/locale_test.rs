// ==========================================
// Locale integration tests
// ==========================================
// Own test binary: the rust-i18n locale is process-global
// ==========================================

use roteiro_pcp::api::RoutingApi;
use roteiro_pcp::config::{config_keys, AppPaths};
use roteiro_pcp::i18n::{current_locale, set_locale};

#[test]
fn test_open_applies_configured_locale() {
    let dir = tempfile::tempdir().unwrap();
    set_locale("en");

    // nothing configured: pt-BR
    let api = RoutingApi::open(AppPaths::new(dir.path())).unwrap();
    assert_eq!(current_locale(), "pt-BR");
    let err = api.process_upload("", b"x").unwrap_err();
    assert_eq!(err.user_message(), "Nenhum arquivo enviado.");

    api.config()
        .set_config_value(config_keys::LOCALE, "en")
        .unwrap();
    drop(api);

    let api = RoutingApi::open(AppPaths::new(dir.path())).unwrap();
    assert_eq!(current_locale(), "en");
    let err = api.process_upload("", b"x").unwrap_err();
    assert_eq!(err.user_message(), "No file was sent.");

    set_locale("pt-BR");
}
